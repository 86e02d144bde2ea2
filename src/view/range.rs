//! Data-driven axis ranges, clamped to physically plausible bounds.

/// Inclusive display range of one chart axis, `min < max` always
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

const SOIL_PAD: f64 = 0.8;
const SOIL_MIN: f64 = 0.0;
const SOIL_MAX: f64 = 100.0;

const TEMP_PAD: f64 = 0.5;
const TEMP_MIN: f64 = -10.0;
const TEMP_MAX: f64 = 60.0;

const HUM_PAD: f64 = 2.0;
const HUM_MIN: f64 = 0.0;
const HUM_MAX: f64 = 100.0;

/// Infer a display range from plotted values.
///
/// Gaps and NaN are ignored. Fewer than 2 usable values falls back to the
/// hard bounds (or 0..1 where a bound is absent). An all-equal series is
/// expanded by 1 on each side before padding so the axis never collapses.
/// The padded range is then clamped into the hard bounds, cutting off
/// impossible values while leaving data-driven padding intact elsewhere.
pub fn auto_range(
    values: &[Option<f64>],
    pad: f64,
    hard_min: Option<f64>,
    hard_max: Option<f64>,
) -> AxisRange {
    let clean: Vec<f64> = values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect();
    if clean.len() < 2 {
        return AxisRange {
            min: hard_min.unwrap_or(0.0),
            max: hard_max.unwrap_or(1.0),
        };
    }

    let mut vmin = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let mut vmax = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if vmax == vmin {
        vmin -= 1.0;
        vmax += 1.0;
    }

    vmin -= pad;
    vmax += pad;

    if let Some(hard) = hard_min {
        vmin = vmin.max(hard);
    }
    if let Some(hard) = hard_max {
        vmax = vmax.min(hard);
    }

    AxisRange { min: vmin, max: vmax }
}

/// Range for the soil moisture axis (percent)
pub fn soil_range(values: &[Option<f64>]) -> AxisRange {
    auto_range(values, SOIL_PAD, Some(SOIL_MIN), Some(SOIL_MAX))
}

/// Range for the temperature axis (degrees Celsius)
pub fn temp_range(values: &[Option<f64>]) -> AxisRange {
    auto_range(values, TEMP_PAD, Some(TEMP_MIN), Some(TEMP_MAX))
}

/// Range for the humidity axis (percent)
pub fn hum_range(values: &[Option<f64>]) -> AxisRange {
    auto_range(values, HUM_PAD, Some(HUM_MIN), Some(HUM_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_range(range: AxisRange, min: f64, max: f64) {
        assert!(
            (range.min - min).abs() < EPS && (range.max - max).abs() < EPS,
            "expected {{{}, {}}}, got {{{}, {}}}",
            min,
            max,
            range.min,
            range.max
        );
    }

    #[test]
    fn test_pad_applied_both_ends() {
        let values = [Some(10.0), Some(20.0)];
        assert_range(auto_range(&values, 2.0, None, None), 8.0, 22.0);
    }

    #[test]
    fn test_equal_values_expand_before_pad_and_clamp() {
        let values = [Some(50.0), Some(50.0)];
        assert_range(auto_range(&values, 0.8, Some(0.0), Some(100.0)), 48.2, 51.8);
    }

    #[test]
    fn test_insufficient_data_falls_back() {
        assert_range(auto_range(&[], 1.0, None, None), 0.0, 1.0);
        assert_range(auto_range(&[Some(42.0)], 1.0, None, None), 0.0, 1.0);
        assert_range(auto_range(&[], 1.0, Some(-10.0), Some(60.0)), -10.0, 60.0);
    }

    #[test]
    fn test_gaps_and_nan_ignored() {
        let values = [None, Some(f64::NAN), Some(40.0), None, Some(45.0)];
        assert_range(auto_range(&values, 0.8, Some(0.0), Some(100.0)), 39.2, 45.8);
    }

    #[test]
    fn test_all_gaps_fall_back() {
        let values = [None, Some(f64::NAN), None];
        assert_range(auto_range(&values, 1.0, Some(0.0), Some(100.0)), 0.0, 100.0);
    }

    #[test]
    fn test_hard_bounds_cut_impossible_padding() {
        // padding would push humidity below 0
        let values = [Some(0.5), Some(1.5)];
        assert_range(auto_range(&values, 2.0, Some(0.0), Some(100.0)), 0.0, 3.5);

        let values = [Some(98.5), Some(99.5)];
        assert_range(auto_range(&values, 2.0, Some(0.0), Some(100.0)), 96.5, 100.0);
    }

    #[test]
    fn test_domain_ranges() {
        let soil = [Some(40.0), Some(45.0)];
        assert_range(soil_range(&soil), 39.2, 45.8);

        let temp = [Some(21.0), Some(23.0)];
        assert_range(temp_range(&temp), 20.5, 23.5);

        let hum = [Some(55.0), Some(65.0)];
        assert_range(hum_range(&hum), 53.0, 67.0);

        // empty series land on the full plausible span
        assert_range(temp_range(&[]), -10.0, 60.0);
        assert_range(hum_range(&[]), 0.0, 100.0);
    }

    #[test]
    fn test_range_never_inverted() {
        let cases: [&[Option<f64>]; 4] = [
            &[Some(50.0), Some(50.0)],
            &[Some(0.0), Some(100.0)],
            &[Some(-5.0), Some(70.0)],
            &[Some(33.3), Some(33.4)],
        ];
        for values in cases {
            for range in [soil_range(values), temp_range(values), hum_range(values)] {
                assert!(range.min < range.max, "inverted range {:?}", range);
            }
        }
    }
}
