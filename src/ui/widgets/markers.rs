//! Event marker overlay for line charts.
//!
//! Markers carry a sample index, never a pixel position. Every repaint
//! maps the index through the chart's bounds at that moment, which keeps
//! markers attached to their samples across resizes, window switches and
//! refreshes.

use crate::view::{EventMarker, MarkerKind};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Context, Line};

const DASH_SECTIONS: usize = 9;

/// Colour for a marker's line and label
pub fn marker_color(kind: MarkerKind) -> Color {
    match kind {
        MarkerKind::Watering => Color::LightBlue,
        MarkerKind::Manual => Color::Magenta,
    }
}

/// Horizontal plot position of a marker, `None` when it is off the axis
pub fn marker_x(marker: &EventMarker, x_max: f64) -> Option<f64> {
    let x = marker.idx as f64;
    if x <= x_max { Some(x) } else { None }
}

/// Draw a dashed vertical line and label for every visible marker.
///
/// Markers beyond the axis are skipped, not clamped to the edge. The view
/// itself is only read; positions are recomputed from the live bounds on
/// each call.
pub fn draw_markers(ctx: &mut Context, markers: &[EventMarker], x_max: f64, y_bounds: [f64; 2]) {
    let [y_min, y_max] = y_bounds;
    let span = y_max - y_min;

    for marker in markers {
        if let Some(x) = marker_x(marker, x_max) {
            let color = marker_color(marker.kind);

            // alternate sections stand in for a dash pattern
            let section = span / DASH_SECTIONS as f64;
            let mut i = 0;
            while i < DASH_SECTIONS {
                let from = y_min + section * i as f64;
                ctx.draw(&Line::new(x, from, x, from + section, color));
                i += 2;
            }

            if !marker.text.is_empty() {
                let label_x = (x + x_max * 0.02).min(x_max);
                ctx.print(
                    label_x,
                    y_max - span * 0.05,
                    Span::styled(marker.text.clone(), Style::default().fg(color)),
                );
            }
        }
    }
}
