use serde::{Deserialize, Serialize};

use super::moving_average::calculate_ema_series;

/// MACD (Moving Average Convergence/Divergence) settings
///
/// MACD line = EMA(fast) - EMA(slow), signal = EMA(macd_line, signal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    /// Closes needed before the first signal value exists
    pub fn min_len(&self) -> usize {
        self.slow + self.signal - 1
    }
}

/// MACD result, every series aligned with the input closes
///
/// Entries before the respective warm-up are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdOutput {
    /// Latest (macd, signal) pair
    pub fn last(&self) -> Option<(f64, f64)> {
        let macd = *self.macd.last()?;
        let signal = *self.signal.last()?;
        (macd.is_finite() && signal.is_finite()).then_some((macd, signal))
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self.last(), Some((macd, signal)) if macd > signal)
    }
}

/// Compute MACD over close prices (oldest first)
///
/// Returns None when `fast >= slow`, any period is zero, or there are fewer
/// than `slow + signal - 1` closes.
pub fn calculate_macd(closes: &[f64], params: &MacdParams) -> Option<MacdOutput> {
    let MacdParams { fast, slow, signal } = *params;
    if fast == 0 || signal == 0 || fast >= slow || closes.len() < params.min_len() {
        return None;
    }

    let n = closes.len();
    let fast_ema = calculate_ema_series(closes, fast);
    let slow_ema = calculate_ema_series(closes, slow);

    // Both EMA series end at the last close; trim the fast one to the slow one's start
    let offset = slow - fast;
    let macd_line: Vec<f64> = slow_ema
        .iter()
        .zip(&fast_ema[offset..])
        .map(|(slow_value, fast_value)| fast_value - slow_value)
        .collect();
    let signal_line = calculate_ema_series(&macd_line, signal);

    let mut macd = vec![f64::NAN; n];
    let mut signal_out = vec![f64::NAN; n];
    let mut histogram = vec![f64::NAN; n];

    let macd_start = slow - 1;
    macd[macd_start..].copy_from_slice(&macd_line);

    let signal_start = macd_start + signal - 1;
    for (k, value) in signal_line.iter().enumerate() {
        let i = signal_start + k;
        signal_out[i] = *value;
        histogram[i] = macd[i] - value;
    }

    Some(MacdOutput {
        macd,
        signal: signal_out,
        histogram,
    })
}
