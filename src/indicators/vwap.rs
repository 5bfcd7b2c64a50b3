use crate::models::Candle;

/// Rolling Volume Weighted Average Price over the last `period` candles
///
/// Uses the typical price (high + low + close) / 3. Returns None when there
/// are fewer than `period` candles or the window carries no volume
/// (backfilled data often has volume = 0).
pub fn calculate_vwap(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let (weighted, volume) = candles
        .iter()
        .rev()
        .take(period)
        .fold((0.0, 0.0), |(weighted, volume), candle| {
            let typical = (candle.high + candle.low + candle.close) / 3.0;
            (weighted + typical * candle.volume, volume + candle.volume)
        });

    if volume <= 0.0 {
        return None;
    }

    Some(weighted / volume)
}
