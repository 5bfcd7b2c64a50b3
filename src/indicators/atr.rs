/// Average True Range (ATR) indicator
///
/// Measures market volatility by averaging true ranges over a window.
/// True Range is the greatest of:
/// - Current High - Current Low
/// - Abs(Current High - Previous Close)
/// - Abs(Current Low - Previous Close)
///
/// The first bar has no previous close, so its true range is High - Low.
use crate::models::PriceBar;

pub const DEFAULT_ATR_WINDOW: usize = 14;

/// True range for every bar, aligned with the input
pub fn calculate_true_range_series<B: PriceBar>(bars: &[B]) -> Vec<f64> {
    let mut true_ranges = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let high = bar.high();
        let low = bar.low();

        let tr = if i == 0 {
            high - low
        } else {
            let prev_close = bars[i - 1].close();
            (high - low)
                .max((high - prev_close).abs())
                .max((low - prev_close).abs())
        };

        true_ranges.push(tr);
    }

    true_ranges
}

/// Simple mean of the last `window` true ranges
///
/// Uses every available bar when fewer than `window` exist. Returns None for
/// an empty input or a zero window.
pub fn calculate_atr<B: PriceBar>(bars: &[B], window: usize) -> Option<f64> {
    if bars.is_empty() || window == 0 {
        return None;
    }

    let true_ranges = calculate_true_range_series(bars);
    let take = window.min(true_ranges.len());
    let sum: f64 = true_ranges.iter().rev().take(take).sum();

    Some(sum / take as f64)
}
