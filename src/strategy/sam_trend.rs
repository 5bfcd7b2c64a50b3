use serde::{Deserialize, Serialize};

use super::signals::extract_closes;
use super::Strategy;
use crate::error::{Result, StrategyError};
use crate::indicators::{calculate_macd, calculate_sma, compute_sam_detailed, MacdParams, SamParams};
use crate::models::{Candle, Signal};

const STRATEGY_NAME: &str = "SamTrendStrategy";

/// Configuration for the SAM trend-following rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamStrategyConfig {
    pub sam: SamParams,
    pub macd: MacdParams,
    /// Long SMA acting as the trend filter
    pub trend_period: usize,
}

impl Default for SamStrategyConfig {
    fn default() -> Self {
        Self {
            sam: SamParams::bounded(),
            macd: MacdParams::default(),
            trend_period: 150,
        }
    }
}

/// Indicator readings behind a SAM trend decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamTrendSnapshot {
    pub price: f64,
    pub sam: f64,
    /// Latest defined dominant cycle period, if one was established
    pub dominant_period: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub trend_sma: f64,
    pub signal: Signal,
}

/// Trend-following strategy gated by the SAM oscillator
///
/// - Buy when SAM > 0, the MACD line is above its signal line and price is
///   above the trend SMA
/// - Sell when price drops below the trend SMA
/// - Hold otherwise
#[derive(Debug, Clone, Default)]
pub struct SamTrendStrategy {
    config: SamStrategyConfig,
}

impl SamTrendStrategy {
    pub fn new(config: SamStrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamStrategyConfig {
        &self.config
    }

    /// Compute every indicator reading and the resulting signal
    pub fn evaluate(&self, candles: &[Candle]) -> Result<SamTrendSnapshot> {
        let required = self.min_candles_required();
        if candles.len() < required {
            return Err(StrategyError::InsufficientCandles {
                strategy: STRATEGY_NAME,
                required,
                actual: candles.len(),
            });
        }

        let closes = extract_closes(candles);
        let insufficient = || StrategyError::InsufficientCandles {
            strategy: STRATEGY_NAME,
            required,
            actual: candles.len(),
        };

        let sam_output = compute_sam_detailed(candles, &self.config.sam)?;
        let sam = sam_output.last().ok_or_else(insufficient)?;
        let (macd, macd_signal) = calculate_macd(&closes, &self.config.macd)
            .and_then(|output| output.last())
            .ok_or_else(insufficient)?;
        let trend_sma = calculate_sma(&closes, self.config.trend_period).ok_or_else(insufficient)?;
        let price = *closes.last().ok_or_else(insufficient)?;

        let signal = if price < trend_sma {
            Signal::Sell
        } else if sam > 0.0 && macd > macd_signal && price > trend_sma {
            Signal::Buy
        } else {
            Signal::Hold
        };

        let token = candles.last().map(|c| c.token.as_str()).unwrap_or_default();
        tracing::debug!(
            token,
            price,
            sam,
            macd,
            macd_signal,
            trend_sma,
            %signal,
            "SAM trend evaluation"
        );

        Ok(SamTrendSnapshot {
            price,
            sam,
            dominant_period: sam_output.last_period(),
            macd,
            macd_signal,
            trend_sma,
            signal,
        })
    }
}

impl Strategy for SamTrendStrategy {
    fn generate_signal(&self, candles: &[Candle]) -> Result<Signal> {
        self.evaluate(candles).map(|snapshot| snapshot.signal)
    }

    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn min_candles_required(&self) -> usize {
        self.config
            .trend_period
            .max(self.config.sam.min_bars())
            .max(self.config.macd.min_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn create_candles(closes: &[f64]) -> Vec<Candle> {
        let start = Utc::now() - Duration::days(closes.len() as i64);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                token: "AAPL".to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn test_min_candles_required() {
        let strategy = SamTrendStrategy::default();
        assert_eq!(strategy.min_candles_required(), 150);

        let strategy = SamTrendStrategy::new(SamStrategyConfig {
            trend_period: 10,
            ..SamStrategyConfig::default()
        });
        // MACD 26 + 9 - 1 dominates
        assert_eq!(strategy.min_candles_required(), 34);
    }

    #[test]
    fn test_insufficient_candles() {
        let strategy = SamTrendStrategy::default();
        let candles = create_candles(&vec![100.0; 100]);

        let err = strategy.generate_signal(&candles).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::InsufficientCandles {
                required: 150,
                actual: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_breakdown_below_trend_sells() {
        let mut closes = vec![100.0; 160];
        closes.extend([90.0, 85.0, 80.0]);
        let strategy = SamTrendStrategy::default();

        assert_eq!(strategy.generate_signal(&create_candles(&closes)).unwrap(), Signal::Sell);
    }

    #[test]
    fn test_flat_market_holds() {
        // SAM is exactly zero on a constant series, so no entry
        let strategy = SamTrendStrategy::default();
        let snapshot = strategy.evaluate(&create_candles(&vec![100.0; 200])).unwrap();

        assert_eq!(snapshot.sam, 0.0);
        assert_eq!(snapshot.signal, Signal::Hold);
    }

    #[test]
    fn test_accelerating_rally_buys() {
        let mut closes = vec![100.0; 160];
        closes.extend((1..=40).map(|i| 100.0 + (i * i) as f64 * 0.05));
        let strategy = SamTrendStrategy::default();
        let snapshot = strategy.evaluate(&create_candles(&closes)).unwrap();

        assert!(snapshot.price > snapshot.trend_sma);
        assert!(snapshot.macd > snapshot.macd_signal);
        assert!(snapshot.sam > 0.0);
        assert_eq!(snapshot.signal, Signal::Buy);
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(SamTrendStrategy::default().name(), "SamTrendStrategy");
    }
}
