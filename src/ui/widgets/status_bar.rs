//! Status bar widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    window_hours: u32,
    refreshing: bool,
    status_message: Option<&str>,
    error_message: Option<&str>,
) {
    let mut spans = vec![];

    // Fetch state
    let fetch_text = if refreshing { "FETCHING" } else { "LIVE" };
    let fetch_color = if refreshing { Color::Yellow } else { Color::Green };
    spans.push(Span::styled(
        fetch_text,
        Style::default().fg(fetch_color).add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::raw(" │ "));

    // Current window
    spans.push(Span::styled(
        format!("Window: {}h", window_hours),
        Style::default().fg(Color::Cyan),
    ));

    // Error message takes priority
    if let Some(error) = error_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("ERROR: {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(status) = status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(status, Style::default().fg(Color::Gray)));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        "? help  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
