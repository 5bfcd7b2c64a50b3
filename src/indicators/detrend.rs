/// Adaptive detrend
///
/// Subtracts the price one dominant cycle back: `value[i] = p[i] - p[i - lookback[i]]`
/// with `lookback[i] = round(period[i]) - 1`, clamped so it never reaches
/// past the start of the series. An undefined period (0.0) yields a zero
/// lookback and therefore a zero value.
use super::finite_or_zero;

#[derive(Debug, Clone, PartialEq)]
pub struct Detrended {
    pub lookback: Vec<usize>,
    pub values: Vec<f64>,
}

/// Lookback for bar `i`, always in `[0, i)` for `i >= 1` and 0 at `i == 0`
pub fn cycle_lookback(period: f64, i: usize) -> usize {
    if i == 0 || !period.is_finite() || period <= 0.0 {
        return 0;
    }

    let raw = period.round() - 1.0;
    if raw <= 0.0 {
        return 0;
    }

    // f64 -> usize saturates for huge periods
    (raw as usize).min(i - 1)
}

pub fn calculate_detrended(prices: &[f64], period: &[f64]) -> Detrended {
    let len = prices.len().min(period.len());
    let mut lookback = vec![0; len];
    let mut values = vec![0.0; len];

    for i in 0..len {
        let shift = cycle_lookback(period[i], i);
        lookback[i] = shift;
        values[i] = finite_or_zero(prices[i] - prices[i - shift]);
    }

    Detrended { lookback, values }
}
