//! Popups drawn over the dashboard: settings form, notice and help.

use super::ThemeColors;
use crate::dashboard::{Notice, SettingsField, SettingsForm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Width of the label column in the settings form.
const LABEL_WIDTH: usize = 20;

/// Draw the settings form.
pub(super) fn draw_settings_form(f: &mut Frame<'_>, form: &SettingsForm, colors: &ThemeColors) {
    let area = fixed_height_rect(60, 9, f.area());
    f.render_widget(Clear, area);

    let block = popup_block(" Device Settings ", colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    for field in SettingsField::ALL {
        let focused = field == form.focus();
        let value_style = if focused {
            Style::default()
                .fg(colors.cursor_fg)
                .bg(colors.cursor_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.value)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
                Style::default().fg(colors.label),
            ),
            Span::styled(format!("{} ", form.value(field)), value_style),
        ]));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).style(Style::default().fg(colors.text)), inner);

    // Cursor sits after the focused field's text
    let row = SettingsField::ALL
        .iter()
        .position(|&field| field == form.focus())
        .unwrap_or(0);
    let text_width = form.value(form.focus()).width();
    let x = inner.x as usize + 1 + LABEL_WIDTH + text_width;
    let y = inner.y as usize + 1 + row * 2;
    if x < (inner.x + inner.width) as usize && y < (inner.y + inner.height) as usize {
        f.set_cursor_position(Position::new(x as u16, y as u16));
    }
}

/// Draw a notice that must be dismissed.
pub(super) fn draw_notice(f: &mut Frame<'_>, notice: &Notice, colors: &ThemeColors) {
    let area = fixed_height_rect(50, 7, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.message.clone(),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter to continue"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(popup_block(&format!(" {} ", notice.title), colors))
        .style(Style::default().fg(colors.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Draw the help popup.
pub(super) fn draw_help(f: &mut Frame<'_>, colors: &ThemeColors) {
    let area = fixed_height_rect(60, 16, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard shortcuts",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  ←/→ or h/l      - Window -1/+1"),
        Line::from("  [/] or PgDn/PgUp - Window -10/+10"),
        Line::from("  r               - Fetch graph now"),
        Line::from("  d               - Refresh device settings"),
        Line::from("  e or s          - Edit settings"),
        Line::from("  T               - Cycle theme"),
        Line::from("  ?               - Toggle this help"),
        Line::from("  q               - Quit"),
        Line::from(""),
        Line::from("In the settings form: Tab/↑/↓ move, Enter sends, Esc cancels."),
    ];

    let paragraph = Paragraph::new(lines)
        .block(popup_block(" Help ", colors))
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn popup_block<'a>(title: &str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.heading))
        .style(Style::default().bg(colors.bg))
}

/// Horizontally centered rect of `percent_x` width and `height` rows.
fn fixed_height_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_form_shows_fields_and_values() {
        let mut form = SettingsForm::new();
        form.open();
        "72".chars().for_each(|c| form.input(c));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let colors = ThemeColors::from_theme(&Theme::GruvboxLight);
        terminal
            .draw(|f| draw_settings_form(f, &form, &colors))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Target temperature"));
        assert!(screen.contains("Light duration"));
        assert!(screen.contains("72"));
    }
}
