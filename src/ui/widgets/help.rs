//! Help panel widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect) {
    // Clear the area first
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("History window", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  ←/[", Style::default().fg(Color::Cyan)),
            Span::raw("  - Shorter window"),
        ]),
        Line::from(vec![
            Span::styled("  →/]", Style::default().fg(Color::Cyan)),
            Span::raw("  - Longer window"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Controls", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  r", Style::default().fg(Color::Cyan)),
            Span::raw("      - Refresh now"),
        ]),
        Line::from(vec![
            Span::styled("  ?/h/F1", Style::default().fg(Color::Cyan)),
            Span::raw(" - Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("  q/Esc", Style::default().fg(Color::Cyan)),
            Span::raw("  - Quit application"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Chart markers", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  P1..P3", Style::default().fg(Color::LightBlue)),
            Span::raw(" - Watering event for that pot"),
        ]),
        Line::from(vec![
            Span::styled("  M", Style::default().fg(Color::Magenta)),
            Span::raw("      - Manually triggered watering"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" to close this help"),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
