//! Immutable per-refresh snapshot of one telemetry window.
//!
//! Every refresh builds one `View` from the raw history payload: the
//! downsampled axis, per-channel series, display labels, axis ranges and
//! event markers. The view is never mutated afterwards; the next refresh
//! replaces it wholesale.

pub mod downsample;
pub mod locate;
pub mod range;

pub use downsample::{downsample, Downsampled, DEFAULT_BUDGET};
pub use locate::nearest_index;
pub use range::{auto_range, AxisRange};

use crate::api::HistoryResponse;
use chrono::{Local, TimeZone};

/// Which kind of event a marker annotates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Watering,
    Manual,
}

/// A chart annotation anchored to a sample index on the displayed axis.
///
/// `idx` always refers to the current view's axis, never a raw timestamp
/// and never a pixel position, so markers stay put across resizes and
/// redraws.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub idx: usize,
    pub text: String,
    pub kind: MarkerKind,
}

/// Soil moisture series, percent per pot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoilChannels {
    pub s1: Vec<Option<f64>>,
    pub s2: Vec<Option<f64>>,
    pub s3: Vec<Option<f64>>,
}

/// Environment series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvChannels {
    pub temp: Vec<Option<f64>>,
    pub hum: Vec<Option<f64>>,
}

/// Display ranges for the three logical axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRanges {
    pub soil: AxisRange,
    pub temp: AxisRange,
    pub hum: AxisRange,
}

/// Everything both charts need for one window
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub window_hours: u32,
    pub ts: Vec<i64>,
    pub labels: Vec<String>,
    pub soil: SoilChannels,
    pub env: EnvChannels,
    pub ranges: ViewRanges,
    pub events: Vec<EventMarker>,
}

/// Build a view from one raw history payload.
///
/// The axis and all five channels are reduced in one co-indexed pass,
/// ranges are inferred from the reduced values, and each event is located
/// on the reduced axis. Channels of the wrong length are padded with gaps
/// or truncated to the axis first, so the result is always
/// self-consistent: equal lengths everywhere and every marker index valid.
pub fn build_view(raw: HistoryResponse, window_hours: u32, budget: usize) -> View {
    let HistoryResponse {
        timestamps,
        soil1,
        soil2,
        soil3,
        temp,
        hum,
        watering,
        manual,
    } = raw;

    let n = timestamps.len();
    let channels = vec![
        fit(soil1, n),
        fit(soil2, n),
        fit(soil3, n),
        fit(temp, n),
        fit(hum, n),
    ];

    let Downsampled { timestamps: ts, channels } = downsample(timestamps, channels, budget);
    let mut channels = channels.into_iter();
    let s1 = channels.next().unwrap_or_default();
    let s2 = channels.next().unwrap_or_default();
    let s3 = channels.next().unwrap_or_default();
    let temp = channels.next().unwrap_or_default();
    let hum = channels.next().unwrap_or_default();

    let with_date = window_hours >= 24;
    let labels = ts.iter().map(|&t| format_label(t, with_date)).collect();

    let soil_all: Vec<Option<f64>> = s1.iter().chain(&s2).chain(&s3).copied().collect();
    let ranges = ViewRanges {
        soil: range::soil_range(&soil_all),
        temp: range::temp_range(&temp),
        hum: range::hum_range(&hum),
    };

    let mut events = Vec::with_capacity(watering.len() + manual.len());
    if !ts.is_empty() {
        for event in &watering {
            let pot = event.pot.map(|p| p.to_string()).unwrap_or_default();
            events.push(EventMarker {
                idx: nearest_index(&ts, event.ts),
                text: format!("P{}", pot),
                kind: MarkerKind::Watering,
            });
        }
        for event in &manual {
            events.push(EventMarker {
                idx: nearest_index(&ts, event.ts),
                text: "M".to_string(),
                kind: MarkerKind::Manual,
            });
        }
    }

    View {
        window_hours,
        ts,
        labels,
        soil: SoilChannels { s1, s2, s3 },
        env: EnvChannels { temp, hum },
        ranges,
        events,
    }
}

/// Force a channel to the axis length; missing samples become gaps
fn fit(mut channel: Vec<Option<f64>>, len: usize) -> Vec<Option<f64>> {
    channel.resize(len, None);
    channel
}

/// Format one axis timestamp for display, with the date on long windows
fn format_label(ts: i64, with_date: bool) -> String {
    let pattern = if with_date { "%d/%m %H:%M" } else { "%H:%M" };
    Local
        .timestamp_opt(ts, 0)
        .earliest()
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| ts.to_string())
}
