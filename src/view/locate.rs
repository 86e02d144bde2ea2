//! Event placement on the displayed axis.

/// Index of the first sample at or after `target`, clamped into bounds.
///
/// `timestamps` must be ascending (duplicates allowed). A target before
/// the first sample maps to 0, one past the last maps to the last index.
/// An empty axis returns 0; callers must not dereference in that case.
pub fn nearest_index(timestamps: &[i64], target: i64) -> usize {
    if timestamps.is_empty() {
        return 0;
    }
    let lower = timestamps.partition_point(|&ts| ts < target);
    lower.min(timestamps.len() - 1)
}
