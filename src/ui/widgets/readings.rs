//! Latest-readings strip above the charts.
//!
//! Shows the newest non-gap sample of every channel in the current window
//! plus the event totals, so the state of the plants is readable without
//! following the chart lines.

use crate::view::{MarkerKind, View};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the latest-readings strip
pub fn render_readings(frame: &mut Frame, area: Rect, view: Option<&View>) {
    let block = Block::default()
        .title(" Latest readings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let view = match view {
        Some(view) => view,
        None => {
            let paragraph = Paragraph::new("Waiting for first fetch...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, channel) in [&view.soil.s1, &view.soil.s2, &view.soil.s3]
        .into_iter()
        .enumerate()
    {
        spans.push(Span::raw(format!("Pot {}: ", i + 1)));
        spans.push(reading_span(latest(channel), "%", soil_style));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::raw("Temp: "));
    spans.push(reading_span(latest(&view.env.temp), "C", |_| {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }));
    spans.push(Span::raw("  Humidity: "));
    spans.push(reading_span(latest(&view.env.hum), "%", |_| {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    }));

    let waterings = count_kind(view, MarkerKind::Watering);
    let manual = count_kind(view, MarkerKind::Manual);
    spans.push(Span::raw(format!(
        "  Events: {} watering, {} manual",
        waterings, manual
    )));

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            format!(" Window: last {}h", view.window_hours),
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Newest sample that is not a gap
fn latest(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().find_map(|v| *v)
}

fn reading_span(value: Option<f64>, unit: &str, style_for: fn(f64) -> Style) -> Span<'static> {
    match value {
        Some(v) => Span::styled(format!("{:.1}{}", v, unit), style_for(v)),
        None => Span::styled("--".to_string(), Style::default().fg(Color::DarkGray)),
    }
}

/// Colour soil moisture by how urgently the pot needs water
fn soil_style(percent: f64) -> Style {
    let color = if percent < 30.0 {
        Color::Red
    } else if percent < 60.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn count_kind(view: &View, kind: MarkerKind) -> usize {
    view.events.iter().filter(|e| e.kind == kind).count()
}
