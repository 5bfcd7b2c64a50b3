use serde::{Deserialize, Serialize};

use super::signals::extract_closes;
use super::Strategy;
use crate::error::{Result, StrategyError};
use crate::indicators::{calculate_sma, calculate_vwap};
use crate::models::{Candle, Signal};

const STRATEGY_NAME: &str = "SmaTrendStrategy";

/// Configuration for the dual-SMA trend rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaTrendConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    /// Also require price above a rolling VWAP of this many candles
    pub vwap_period: Option<usize>,
}

impl Default for SmaTrendConfig {
    fn default() -> Self {
        Self {
            fast_period: 5,
            slow_period: 13,
            vwap_period: None,
        }
    }
}

/// Price-versus-SMA trend strategy
///
/// - Buy when price is above both the fast and slow SMA (and above VWAP
///   when configured)
/// - Sell when price falls below the slow SMA
/// - Hold otherwise
#[derive(Debug, Clone, Default)]
pub struct SmaTrendStrategy {
    config: SmaTrendConfig,
}

impl SmaTrendStrategy {
    pub fn new(config: SmaTrendConfig) -> Self {
        Self { config }
    }
}

impl Strategy for SmaTrendStrategy {
    fn generate_signal(&self, candles: &[Candle]) -> Result<Signal> {
        let required = self.min_candles_required();
        let insufficient = || StrategyError::InsufficientCandles {
            strategy: STRATEGY_NAME,
            required,
            actual: candles.len(),
        };
        if candles.len() < required {
            return Err(insufficient());
        }

        let closes = extract_closes(candles);
        let price = *closes.last().ok_or_else(insufficient)?;
        let fast = calculate_sma(&closes, self.config.fast_period).ok_or_else(insufficient)?;
        let slow = calculate_sma(&closes, self.config.slow_period).ok_or_else(insufficient)?;

        // Missing volume disables the VWAP filter rather than blocking entries
        let above_vwap = match self.config.vwap_period {
            Some(period) => calculate_vwap(candles, period).map_or(true, |vwap| price > vwap),
            None => true,
        };

        let signal = if price > fast && price > slow && above_vwap {
            Signal::Buy
        } else if price < slow {
            Signal::Sell
        } else {
            Signal::Hold
        };

        tracing::debug!(price, fast, slow, above_vwap, %signal, "SMA trend evaluation");

        Ok(signal)
    }

    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn min_candles_required(&self) -> usize {
        self.config
            .fast_period
            .max(self.config.slow_period)
            .max(self.config.vwap_period.unwrap_or(0))
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn create_candles(closes: &[f64], volume: f64) -> Vec<Candle> {
        let start = Utc::now() - Duration::hours(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                token: "SPY".to_string(),
                timestamp: start + Duration::hours(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume,
            })
            .collect()
    }

    #[test]
    fn test_breakout_buys() {
        let mut closes = vec![100.0; 13];
        closes.push(105.0);
        let signal = SmaTrendStrategy::default()
            .generate_signal(&create_candles(&closes, 1000.0))
            .unwrap();
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn test_drop_below_slow_sma_sells() {
        let mut closes = vec![100.0; 13];
        closes.push(95.0);
        let signal = SmaTrendStrategy::default()
            .generate_signal(&create_candles(&closes, 1000.0))
            .unwrap();
        assert_eq!(signal, Signal::Sell);
    }

    #[test]
    fn test_between_averages_holds() {
        // Above the slow SMA but below the fast one
        let mut closes = vec![100.0; 9];
        closes.extend([110.0, 110.0, 110.0, 110.0, 106.0]);
        let signal = SmaTrendStrategy::default()
            .generate_signal(&create_candles(&closes, 1000.0))
            .unwrap();
        assert_eq!(signal, Signal::Hold);
    }

    #[test]
    fn test_vwap_filter_blocks_entry() {
        let config = SmaTrendConfig {
            vwap_period: Some(5),
            ..SmaTrendConfig::default()
        };
        let mut candles = create_candles(&[100.0; 13], 1.0);
        // Heavy volume at a high price drags VWAP above the latest close
        let mut spike = candles[12].clone();
        spike.close = 140.0;
        spike.high = 140.0;
        spike.low = 140.0;
        spike.volume = 1000.0;
        candles.push(spike);
        let mut last = candles[12].clone();
        last.close = 120.0;
        last.high = 120.0;
        last.low = 120.0;
        last.volume = 1.0;
        candles.push(last);

        let signal = SmaTrendStrategy::new(config).generate_signal(&candles).unwrap();
        assert_eq!(signal, Signal::Hold);
    }

    #[test]
    fn test_insufficient_candles() {
        let err = SmaTrendStrategy::default()
            .generate_signal(&create_candles(&[100.0; 5], 1.0))
            .unwrap_err();
        assert!(err.to_string().contains("need 13"));
    }
}
