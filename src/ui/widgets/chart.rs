//! Line chart widget drawn on a braille canvas.
//!
//! ratatui's stock chart has a single y axis and hides its plot area, so
//! this widget lays out its own gutters instead: an optional numeric scale
//! on each side, one row of time labels below, and a braille canvas in
//! between. Event markers are painted through [`draw_markers`] on a second
//! canvas layer using the same bounds as the series, so they always land
//! on their sample regardless of the terminal size.

use crate::ui::widgets::markers::draw_markers;
use crate::view::{AxisRange, EventMarker};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{
        canvas::{self, Canvas},
        Block, Borders, Widget,
    },
};

/// One plotted series, already mapped into plot coordinates
pub struct Series<'a> {
    pub color: Color,
    /// Contiguous gap-free polylines, x = sample index
    pub segments: &'a [Vec<(f64, f64)>],
}

/// A numeric scale printed in a side gutter
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub range: AxisRange,
    pub color: Color,
}

/// Time-series chart with optional dual y scales and event markers
pub struct LineChart<'a> {
    title: Line<'a>,
    series: Vec<Series<'a>>,
    x_labels: &'a [String],
    y_bounds: [f64; 2],
    left_scale: Option<Scale>,
    right_scale: Option<Scale>,
    markers: &'a [EventMarker],
}

impl<'a> LineChart<'a> {
    pub fn new(title: Line<'a>) -> Self {
        Self {
            title,
            series: Vec::new(),
            x_labels: &[],
            y_bounds: [0.0, 1.0],
            left_scale: None,
            right_scale: None,
            markers: &[],
        }
    }

    pub fn series(mut self, series: Series<'a>) -> Self {
        self.series.push(series);
        self
    }

    pub fn x_labels(mut self, labels: &'a [String]) -> Self {
        self.x_labels = labels;
        self
    }

    /// Vertical plot bounds; series points must already be in this space
    pub fn y_bounds(mut self, bounds: [f64; 2]) -> Self {
        self.y_bounds = bounds;
        self
    }

    pub fn left_scale(mut self, scale: Scale) -> Self {
        self.left_scale = Some(scale);
        self
    }

    pub fn right_scale(mut self, scale: Scale) -> Self {
        self.right_scale = Some(scale);
        self
    }

    pub fn markers(mut self, markers: &'a [EventMarker]) -> Self {
        self.markers = markers;
        self
    }
}

impl Widget for LineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let samples = self.x_labels.len();
        if samples == 0 {
            if inner.width > 2 && inner.height > 0 {
                buf.set_stringn(
                    inner.x + 1,
                    inner.y,
                    "No data available",
                    inner.width as usize - 2,
                    Style::default().fg(Color::DarkGray),
                );
            }
            return;
        }

        let left_w = self.left_scale.map(|s| gutter_width(s.range)).unwrap_or(0);
        let right_w = self.right_scale.map(|s| gutter_width(s.range)).unwrap_or(0);
        if inner.width <= left_w + right_w + 4 || inner.height < 3 {
            return;
        }

        let plot = Rect {
            x: inner.x + left_w,
            y: inner.y,
            width: inner.width - left_w - right_w,
            height: inner.height - 1,
        };

        if let Some(scale) = self.left_scale {
            let gutter = Rect { x: inner.x, width: left_w, ..plot };
            draw_y_scale(buf, gutter, scale, true);
        }
        if let Some(scale) = self.right_scale {
            let gutter = Rect { x: plot.x + plot.width, width: right_w, ..plot };
            draw_y_scale(buf, gutter, scale, false);
        }

        let label_row = Rect { y: plot.y + plot.height, height: 1, ..plot };
        draw_x_labels(buf, label_row, self.x_labels);

        let x_max = samples.saturating_sub(1).max(1) as f64;
        Canvas::default()
            .marker(symbols::Marker::Braille)
            .x_bounds([0.0, x_max])
            .y_bounds(self.y_bounds)
            .paint(|ctx| {
                for series in &self.series {
                    for segment in series.segments {
                        for pair in segment.windows(2) {
                            ctx.draw(&canvas::Line::new(
                                pair[0].0,
                                pair[0].1,
                                pair[1].0,
                                pair[1].1,
                                series.color,
                            ));
                        }
                        // a run of one sample has no line to draw
                        if segment.len() == 1 {
                            ctx.draw(&canvas::Points {
                                coords: segment,
                                color: series.color,
                            });
                        }
                    }
                }
                ctx.layer();
                draw_markers(ctx, self.markers, x_max, self.y_bounds);
            })
            .render(plot, buf);
    }
}

/// Split a channel into gap-free polylines, mapping values with `scale`.
///
/// The x coordinate is the sample index. Gaps and NaN samples end the
/// current polyline, matching how missing data reads on the chart.
pub fn split_segments<F>(values: &[Option<f64>], scale: F) -> Vec<Vec<(f64, f64)>>
where
    F: Fn(f64) -> f64,
{
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) if !v.is_nan() => current.push((i as f64, scale(*v))),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Map values of `range` into the 0..1 plot space
pub fn normalized(range: AxisRange) -> impl Fn(f64) -> f64 {
    move |v| (v - range.min) / (range.max - range.min)
}

fn tick_label(value: f64) -> String {
    format!("{:.1}", value)
}

/// Gutter width for a scale: widest end label plus one space toward the plot
fn gutter_width(range: AxisRange) -> u16 {
    let widest = tick_label(range.min).len().max(tick_label(range.max).len());
    widest as u16 + 1
}

fn tick_count(height: u16) -> u16 {
    (height / 4 + 2).clamp(2, 5)
}

fn draw_y_scale(buf: &mut Buffer, area: Rect, scale: Scale, right_align: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let style = Style::default().fg(scale.color);
    let ticks = tick_count(area.height);
    let span = scale.range.max - scale.range.min;

    for i in 0..ticks {
        let frac = i as f64 / (ticks - 1) as f64;
        let value = scale.range.max - span * frac;
        let row = area.y + ((area.height - 1) as f64 * frac).round() as u16;
        let label = tick_label(value);
        let max_width = area.width.saturating_sub(1) as usize;
        if right_align {
            let x = area.x + area.width.saturating_sub(label.len() as u16 + 1);
            buf.set_stringn(x, row, &label, max_width, style);
        } else {
            buf.set_stringn(area.x + 1, row, &label, max_width, style);
        }
    }
}

/// How many time labels fit in the row, capped like a crowded axis
fn x_tick_count(width: u16, samples: usize) -> usize {
    if width == 0 {
        return 0;
    }
    ((width / 13).max(1) as usize).min(12).min(samples)
}

fn draw_x_labels(buf: &mut Buffer, area: Rect, labels: &[String]) {
    if area.height == 0 || labels.is_empty() {
        return;
    }
    let style = Style::default().fg(Color::Gray);
    let count = x_tick_count(area.width, labels.len());
    let last = labels.len() - 1;

    let mut previous = usize::MAX;
    for i in 0..count {
        let idx = if count == 1 { 0 } else { i * last / (count - 1) };
        if idx == previous {
            continue;
        }
        previous = idx;

        let label = &labels[idx];
        let col = if last == 0 {
            0
        } else {
            area.width.saturating_sub(1) as usize * idx / last
        };
        let mut x = area.x + col as u16;
        // keep the rightmost label inside the row
        x = x.min((area.x + area.width).saturating_sub(label.len() as u16));
        let remaining = ((area.x + area.width).saturating_sub(x)) as usize;
        buf.set_stringn(x, area.y, label, remaining, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MarkerKind;

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in buf.area.top()..buf.area.bottom() {
            for x in buf.area.left()..buf.area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_smoke_labels_scale_and_marker_visible() {
        let segments = vec![vec![(0.0, 10.0), (1.0, 60.0), (2.0, 90.0), (3.0, 40.0)]];
        let labels: Vec<String> = ["10:00", "10:05", "10:10", "10:15"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let markers = vec![EventMarker {
            idx: 1,
            text: "P2".to_string(),
            kind: MarkerKind::Watering,
        }];

        let widget = LineChart::new(Line::from(" Soil moisture "))
            .series(Series { color: Color::Red, segments: &segments })
            .x_labels(&labels)
            .y_bounds([0.0, 100.0])
            .left_scale(Scale {
                range: AxisRange { min: 0.0, max: 100.0 },
                color: Color::Gray,
            })
            .markers(&markers);

        let area = Rect::new(0, 0, 60, 18);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Soil moisture"));
        assert!(text.contains("100.0"), "left scale missing:\n{}", text);
        assert!(text.contains("10:00"), "x labels missing:\n{}", text);
        assert!(text.contains("P2"), "marker label missing:\n{}", text);
    }

    #[test]
    fn test_render_placeholder_without_data() {
        let widget = LineChart::new(Line::from(" Soil moisture "));
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        assert!(buffer_text(&buf).contains("No data available"));
    }

    #[test]
    fn test_split_segments_breaks_on_gaps() {
        let values = [
            Some(1.0),
            Some(2.0),
            None,
            Some(4.0),
            Some(f64::NAN),
            Some(6.0),
        ];
        let segments = split_segments(&values, |v| v);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(segments[1], vec![(3.0, 4.0)]);
        assert_eq!(segments[2], vec![(5.0, 6.0)]);
    }

    #[test]
    fn test_split_segments_all_gaps() {
        let values = [None, Some(f64::NAN), None];
        assert!(split_segments(&values, |v| v).is_empty());
    }

    #[test]
    fn test_split_segments_applies_scale() {
        let values = [Some(10.0), Some(20.0)];
        let segments = split_segments(&values, |v| v / 10.0);
        assert_eq!(segments[0], vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_normalized_maps_range_to_unit() {
        let scale = normalized(AxisRange { min: 20.0, max: 30.0 });
        assert!((scale(20.0) - 0.0).abs() < 1e-9);
        assert!((scale(25.0) - 0.5).abs() < 1e-9);
        assert!((scale(30.0) - 1.0).abs() < 1e-9);
        // clamped-off values land outside the plot and get clipped there
        assert!(scale(35.0) > 1.0);
    }

    #[test]
    fn test_gutter_width_fits_widest_label() {
        assert_eq!(gutter_width(AxisRange { min: 0.0, max: 100.0 }), 6);
        assert_eq!(gutter_width(AxisRange { min: -10.0, max: 60.0 }), 6);
        assert_eq!(gutter_width(AxisRange { min: 48.2, max: 51.8 }), 5);
    }

    #[test]
    fn test_x_tick_count_limits() {
        assert_eq!(x_tick_count(0, 100), 0);
        assert_eq!(x_tick_count(80, 100), 6);
        assert_eq!(x_tick_count(400, 100), 12); // never more than 12
        assert_eq!(x_tick_count(400, 3), 3); // never more than the samples
    }

    #[test]
    fn test_tick_count_bounds() {
        assert_eq!(tick_count(1), 2);
        assert_eq!(tick_count(8), 4);
        assert_eq!(tick_count(100), 5);
    }
}
