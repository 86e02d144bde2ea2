//! Soil moisture chart adapter.
//!
//! The chart state is created once and rewritten in place whenever a new
//! view arrives; nothing is torn down between refreshes. Event markers
//! live here, on the chart whose axis they were located against.

use crate::ui::widgets::chart::{split_segments, LineChart, Scale, Series};
use crate::view::{AxisRange, EventMarker, View};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

const POT_COLORS: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

/// Retained state of the soil moisture chart
pub struct SoilChart {
    labels: Vec<String>,
    segments: [Vec<Vec<(f64, f64)>>; 3],
    range: AxisRange,
    events: Vec<EventMarker>,
}

impl SoilChart {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            segments: [Vec::new(), Vec::new(), Vec::new()],
            range: AxisRange { min: 0.0, max: 100.0 },
            events: Vec::new(),
        }
    }

    /// Overwrite labels, series data, axis range and markers from a view
    pub fn apply(&mut self, view: &View) {
        self.labels = view.labels.clone();
        self.segments = [
            split_segments(&view.soil.s1, |v| v),
            split_segments(&view.soil.s2, |v| v),
            split_segments(&view.soil.s3, |v| v),
        ];
        self.range = view.ranges.soil;
        self.events = view.events.clone();
    }
}

/// Render the soil moisture chart
pub fn render_soil_chart(frame: &mut Frame, area: Rect, chart: &SoilChart) {
    let title = Line::from(vec![
        Span::raw(" Soil moisture (%) "),
        Span::styled("*Pot 1 ", Style::default().fg(POT_COLORS[0])),
        Span::styled("*Pot 2 ", Style::default().fg(POT_COLORS[1])),
        Span::styled("*Pot 3 ", Style::default().fg(POT_COLORS[2])),
    ]);

    let mut widget = LineChart::new(title)
        .x_labels(&chart.labels)
        .y_bounds([chart.range.min, chart.range.max])
        .left_scale(Scale {
            range: chart.range,
            color: Color::Gray,
        })
        .markers(&chart.events);

    for (segments, color) in chart.segments.iter().zip(POT_COLORS) {
        widget = widget.series(Series { color, segments });
    }

    frame.render_widget(widget, area);
}
