//! Volatility normalization for oscillator output
//!
//! Scales an oscillator by the ATR so values are comparable across
//! instruments, and optionally squashes the result into (-1, 1) with `tanh`.

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub values: Vec<f64>,
    /// True when the ATR was zero (or unusable) and scaling was bypassed
    pub zero_volatility: bool,
}

/// Divide by `atr` and apply `scaling_factor`, then optionally bound with tanh
///
/// A zero or non-finite ATR skips the division and returns the raw values
/// (still bounded when `bound_with_tanh` is set).
pub fn normalize_by_atr(
    values: &[f64],
    atr: f64,
    scaling_factor: f64,
    bound_with_tanh: bool,
) -> Normalized {
    let zero_volatility = atr == 0.0 || !atr.is_finite();

    let values = values
        .iter()
        .map(|&v| {
            let scaled = if zero_volatility {
                v
            } else {
                (v / atr) * scaling_factor
            };
            if bound_with_tanh {
                scaled.tanh()
            } else {
                scaled
            }
        })
        .collect();

    Normalized {
        values,
        zero_volatility,
    }
}
