//! Picked-sample reduction of a raw window to a fixed point budget.
//!
//! Long windows return far more samples than a chart can usefully draw.
//! Instead of averaging, every step-th original sample is kept, and the
//! timestamp axis and all channels are reduced with the same retained
//! indices so they stay aligned with each other.

/// Default per-chart point budget
pub const DEFAULT_BUDGET: usize = 600;

/// A reduced timestamp axis plus its co-indexed channels
#[derive(Debug, Clone, PartialEq)]
pub struct Downsampled {
    pub timestamps: Vec<i64>,
    pub channels: Vec<Vec<Option<f64>>>,
}

/// Reduce `timestamps` and every channel to at most `budget` points.
///
/// Retains original indices `0, step, 2*step, ..` with
/// `step = ceil(n / budget)`, so index 0 always survives. Input already
/// within budget is returned unchanged. A budget of 0 falls back to
/// [`DEFAULT_BUDGET`].
pub fn downsample(
    timestamps: Vec<i64>,
    channels: Vec<Vec<Option<f64>>>,
    budget: usize,
) -> Downsampled {
    let budget = if budget == 0 { DEFAULT_BUDGET } else { budget };
    let n = timestamps.len();
    if n <= budget {
        return Downsampled {
            timestamps,
            channels,
        };
    }

    let step = n.div_ceil(budget);
    let reduced_ts = timestamps.iter().copied().step_by(step).collect();
    let reduced_channels = channels
        .iter()
        .map(|channel| channel.iter().copied().step_by(step).collect())
        .collect();

    Downsampled {
        timestamps: reduced_ts,
        channels: reduced_channels,
    }
}
