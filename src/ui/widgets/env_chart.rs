//! Environment chart adapter.
//!
//! Temperature and humidity share one plot but keep independent scales.
//! Both series are mapped into the unit plot space by their own axis
//! range; the real scales are printed in the left and right gutters.

use crate::ui::widgets::chart::{normalized, split_segments, LineChart, Scale, Series};
use crate::view::{AxisRange, View};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

const TEMP_COLOR: Color = Color::Red;
const HUM_COLOR: Color = Color::Blue;

/// Retained state of the environment chart
pub struct EnvChart {
    labels: Vec<String>,
    temp_segments: Vec<Vec<(f64, f64)>>,
    hum_segments: Vec<Vec<(f64, f64)>>,
    temp_range: AxisRange,
    hum_range: AxisRange,
}

impl EnvChart {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            temp_segments: Vec::new(),
            hum_segments: Vec::new(),
            temp_range: AxisRange { min: -10.0, max: 60.0 },
            hum_range: AxisRange { min: 0.0, max: 100.0 },
        }
    }

    /// Overwrite labels, series data and both axis ranges from a view
    pub fn apply(&mut self, view: &View) {
        self.labels = view.labels.clone();
        self.temp_range = view.ranges.temp;
        self.hum_range = view.ranges.hum;
        self.temp_segments = split_segments(&view.env.temp, normalized(view.ranges.temp));
        self.hum_segments = split_segments(&view.env.hum, normalized(view.ranges.hum));
    }
}

/// Render the environment chart
pub fn render_env_chart(frame: &mut Frame, area: Rect, chart: &EnvChart) {
    let title = Line::from(vec![
        Span::raw(" Environment "),
        Span::styled("*Temp (C) ", Style::default().fg(TEMP_COLOR)),
        Span::styled("*Humidity (%) ", Style::default().fg(HUM_COLOR)),
    ]);

    let widget = LineChart::new(title)
        .x_labels(&chart.labels)
        .y_bounds([0.0, 1.0])
        .left_scale(Scale {
            range: chart.temp_range,
            color: TEMP_COLOR,
        })
        .right_scale(Scale {
            range: chart.hum_range,
            color: HUM_COLOR,
        })
        .series(Series {
            color: TEMP_COLOR,
            segments: &chart.temp_segments,
        })
        .series(Series {
            color: HUM_COLOR,
            segments: &chart.hum_segments,
        });

    frame.render_widget(widget, area);
}
