//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(
    f: &mut Frame<'_>,
    area: Rect,
    form_visible: bool,
    notice_visible: bool,
    colors: &ThemeColors,
) {
    let keymap_text = if notice_visible {
        "Enter/Esc:dismiss"
    } else if form_visible {
        "Tab/↓:next | S-Tab/↑:prev | Enter:send | Esc:cancel"
    } else {
        "q:quit | ←→/hl:window ±1 | []/PgUp/PgDn:±10 | r:refetch | d:device | e:settings | T:theme | ?:help"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
