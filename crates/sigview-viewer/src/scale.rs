//! Axis scale transforms for spectrum display
//!
//! Pure value mapping, stateless. Nonpositive inputs are undefined under a
//! logarithm, so each logarithmic scale substitutes a fixed floor sentinel
//! instead of producing NaN or -inf; the floors sit below any real data and
//! render as the bottom of the axis.

/// Display value substituted for nonpositive inputs under [`ScaleKind::LogFrequency`]
pub const LOG_FREQUENCY_FLOOR: f32 = -10.0;

/// Display value substituted for nonpositive inputs under [`ScaleKind::Decibel`]
pub const DECIBEL_FLOOR: f32 = -80.0;

/// How a data value maps to a display value on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleKind {
    /// Identity mapping
    #[default]
    Linear,
    /// `log10(v)` for frequency axes, floored at -10 for v <= 0
    LogFrequency,
    /// `20 * log10(v)` for magnitude axes, floored at -80 dB for v <= 0
    Decibel,
}

impl ScaleKind {
    /// Map a single data value to its display value
    pub fn apply(self, value: f32) -> f32 {
        match self {
            ScaleKind::Linear => value,
            ScaleKind::LogFrequency => {
                if value > 0.0 {
                    value.log10()
                } else {
                    LOG_FREQUENCY_FLOOR
                }
            }
            ScaleKind::Decibel => {
                if value > 0.0 {
                    20.0 * value.log10()
                } else {
                    DECIBEL_FLOOR
                }
            }
        }
    }
}

/// Map a slice of data values to display values under one scale
pub fn to_display(values: &[f32], kind: ScaleKind) -> Vec<f32> {
    values.iter().map(|&v| kind.apply(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_frequency_floors_nonpositive() {
        // [0, 1, 100] -> [-10, 0, 2]
        let out = to_display(&[0.0, 1.0, 100.0], ScaleKind::LogFrequency);
        assert_eq!(out, vec![-10.0, 0.0, 2.0]);
    }

    #[test]
    fn test_decibel_floors_nonpositive() {
        let out = to_display(&[0.0, -0.5, 1.0, 10.0], ScaleKind::Decibel);
        assert_eq!(out[0], DECIBEL_FLOOR);
        assert_eq!(out[1], DECIBEL_FLOOR);
        assert_eq!(out[2], 0.0);
        assert!((out[3] - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_linear_is_identity() {
        let values = [-3.0f32, 0.0, 0.5, 42.0];
        assert_eq!(to_display(&values, ScaleKind::Linear), values.to_vec());
    }

    #[test]
    fn test_floors_sit_below_real_data() {
        // A floored point must never rise above a genuine small value
        let tiny = ScaleKind::Decibel.apply(1e-3);
        assert!(DECIBEL_FLOOR < tiny);
        let low_freq = ScaleKind::LogFrequency.apply(1e-9);
        assert!(LOG_FREQUENCY_FLOOR < low_freq);
    }

    #[test]
    fn test_no_nan_or_infinity_emitted() {
        for kind in [ScaleKind::Linear, ScaleKind::LogFrequency, ScaleKind::Decibel] {
            for v in [-1.0f32, 0.0, f32::MIN_POSITIVE, 1.0, 1e6] {
                let out = kind.apply(v);
                assert!(out.is_finite(), "{:?}({}) = {}", kind, v, out);
            }
        }
    }
}
