use crate::models::Candle;

/// Close prices, oldest first
pub fn extract_closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Validate that candles are in chronological order
///
/// Gaps are allowed; the indicators never assume filled bars.
///
/// # Example
/// ```
/// use chrono::{Duration, Utc};
/// use cyclebot::models::Candle;
/// use cyclebot::strategy::signals::validate_candle_order;
///
/// let start = Utc::now();
/// let candle = |hours: i64| Candle {
///     token: "SPY".to_string(),
///     timestamp: start + Duration::hours(hours),
///     open: 1.0,
///     high: 1.0,
///     low: 1.0,
///     close: 1.0,
///     volume: 0.0,
/// };
///
/// assert!(validate_candle_order(&[candle(0), candle(5)]).is_ok());
/// assert!(validate_candle_order(&[candle(5), candle(0)]).is_err());
/// ```
pub fn validate_candle_order(candles: &[Candle]) -> anyhow::Result<()> {
    for window in candles.windows(2) {
        if window[1].timestamp < window[0].timestamp {
            anyhow::bail!(
                "Candles are not sorted by timestamp: {} comes after {}",
                window[1].timestamp.format("%Y-%m-%d %H:%M:%S"),
                window[0].timestamp.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn candles_at(offsets_hours: &[i64]) -> Vec<Candle> {
        let start = Utc::now();
        offsets_hours
            .iter()
            .map(|&h| Candle {
                token: "TEST".to_string(),
                timestamp: start + Duration::hours(h),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0 + h as f64,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn test_gaps_are_allowed() {
        let candles = candles_at(&[0, 1, 2, 10, 11]);
        assert!(validate_candle_order(&candles).is_ok());
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let candles = candles_at(&[0, 2, 1]);
        let err = validate_candle_order(&candles).unwrap_err();
        assert!(err.to_string().contains("not sorted"));
    }

    #[test]
    fn test_extract_closes() {
        let candles = candles_at(&[0, 1, 2]);
        assert_eq!(extract_closes(&candles), vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn test_empty_and_single_candle() {
        assert!(validate_candle_order(&[]).is_ok());
        assert!(validate_candle_order(&candles_at(&[0])).is_ok());
    }
}
