//! User interface rendering.

mod dashboard;
mod formatters;
mod keymap_bar;
mod popups;
mod status_bar;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);
    let dash = &app.dashboard;

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    dashboard::draw_dashboard(f, chunks[0], dash, &colors);
    status_bar::draw_status(f, chunks[1], &app.status, &colors);
    keymap_bar::draw_keymap(
        f,
        chunks[2],
        dash.form.is_visible(),
        dash.notice().is_some(),
        &colors,
    );

    // Overlays, notice on top
    if dash.form.is_visible() {
        popups::draw_settings_form(f, &dash.form, &colors);
    }
    if app.show_help {
        popups::draw_help(f, &colors);
    }
    if let Some(notice) = dash.notice() {
        popups::draw_notice(f, notice, &colors);
    }
}
