//! Terminal UI module using ratatui.
//!
//! This module provides an interactive terminal dashboard for soil and
//! climate history with real-time charts and keyboard controls.

pub mod app;
pub mod input;
pub mod widgets;

pub use app::{App, FetchOutcome};
pub use input::{action_for, InputAction};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use widgets::{
    render_env_chart, render_help, render_readings, render_soil_chart, render_status_bar,
};

/// Draw the whole dashboard for the current application state
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_readings(frame, chunks[0], app.view.as_ref());
    render_soil_chart(frame, chunks[1], &app.soil_chart);
    render_env_chart(frame, chunks[2], &app.env_chart);
    render_status_bar(
        frame,
        chunks[3],
        app.window_hours,
        app.refreshing,
        app.status_message.as_deref(),
        app.error_message.as_deref(),
    );

    if app.show_help {
        render_help(frame, centered_rect(60, 70, frame.area()));
    }
}

/// Centered rectangle covering the given percentages of the parent area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
