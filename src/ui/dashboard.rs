//! Main dashboard view: temperature chart, window control and device panel.

use super::formatters::{format_axis_label, format_temperature};
use super::ThemeColors;
use crate::dashboard::{ChartView, Dashboard, X_AXIS_TITLE, Y_AXIS_TITLE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame,
};

/// Y-axis margin as a fraction of the data span.
const Y_AXIS_PADDING: f64 = 0.1;

/// Width of the device panel.
const DEVICE_PANEL_WIDTH: u16 = 30;

/// Draw the chart, window gauge and device panel into `area`.
pub(super) fn draw_dashboard(
    f: &mut Frame<'_>,
    area: Rect,
    dash: &Dashboard,
    colors: &ThemeColors,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(DEVICE_PANEL_WIDTH)])
        .split(rows[0]);

    match dash.chart() {
        Some(chart) if !chart.is_empty() => {
            draw_chart(f, columns[0], chart, dash.in_flight(), colors)
        },
        _ => draw_empty_chart(f, columns[0], dash.in_flight(), colors),
    }
    draw_device_panel(f, columns[1], dash, colors);
    draw_window_gauge(f, rows[1], dash, colors);
}

fn chart_title(chart: &ChartView, in_flight: usize, colors: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Temperature ",
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(latest) = chart.latest() {
        spans.push(Span::styled(
            format!("now {} ", format_temperature(latest)),
            Style::default().fg(colors.value),
        ));
    }
    if let Some((lo, hi)) = chart.range() {
        spans.push(Span::styled(
            format!("min {} max {} ", format_temperature(lo), format_temperature(hi)),
            Style::default().fg(colors.label),
        ));
    }
    if let Some(present) = chart.presence() {
        let text = if present { "occupied " } else { "empty " };
        spans.push(Span::styled(text, Style::default().fg(colors.text)));
    }
    if in_flight > 0 {
        spans.push(Span::styled("⟳ ", Style::default().fg(colors.warning)));
    }

    Line::from(spans)
}

fn draw_chart(
    f: &mut Frame<'_>,
    area: Rect,
    chart: &ChartView,
    in_flight: usize,
    colors: &ThemeColors,
) {
    let points = chart.points();
    let datasets = vec![Dataset::default()
        .name(Y_AXIS_TITLE)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(colors.series))
        .data(&points)];

    let x_axis = Axis::default()
        .title(X_AXIS_TITLE)
        .style(Style::default().fg(colors.text))
        .bounds(chart.x_bounds())
        .labels(chart.x_labels());

    let [y_min, y_max] = chart.y_bounds(Y_AXIS_PADDING);
    let y_labels = vec![
        format_axis_label(y_min),
        format_axis_label((y_min + y_max) / 2.0),
        format_axis_label(y_max),
    ];

    let y_axis = Axis::default()
        .title(Y_AXIS_TITLE)
        .style(Style::default().fg(colors.text))
        .bounds([y_min, y_max])
        .labels(y_labels);

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(chart_title(chart, in_flight, colors))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(widget, area);
}

fn draw_empty_chart(f: &mut Frame<'_>, area: Rect, in_flight: usize, colors: &ThemeColors) {
    let message = if in_flight > 0 {
        "Waiting for samples..."
    } else {
        "No samples yet (r to fetch)"
    };

    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .title(" Temperature ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_device_panel(f: &mut Frame<'_>, area: Rect, dash: &Dashboard, colors: &ThemeColors) {
    let mut lines = vec![];

    match dash.device() {
        Some(device) => {
            for (label, value) in device.rows() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().fg(colors.label)),
                    Span::styled(value, Style::default().fg(colors.value)),
                ]));
            }
        },
        None => lines.push(Line::from(Span::styled(
            "Not loaded (d to refresh)",
            Style::default().fg(colors.text),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Samples: ", Style::default().fg(colors.label)),
        Span::styled(
            dash.series().len().to_string(),
            Style::default().fg(colors.value),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Device ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn draw_window_gauge(f: &mut Frame<'_>, area: Rect, dash: &Dashboard, colors: &ThemeColors) {
    let window = dash.window();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Window ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .gauge_style(Style::default().fg(colors.series).bg(colors.status_bg))
        .ratio(window.ratio())
        .label(window.label());

    f.render_widget(gauge, area);
}
