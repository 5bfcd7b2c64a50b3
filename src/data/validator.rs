use anyhow::{bail, Result};

use crate::models::Candle;

/// Validates OHLC candle data for sanity before it reaches the indicators
pub struct CandleValidator;

impl CandleValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candle for correctness
    pub fn validate(&self, candle: &Candle) -> Result<()> {
        self.validate_prices(candle)?;
        self.validate_ohlc_relationship(candle)?;
        Ok(())
    }

    /// Validate every candle and their chronological order
    pub fn validate_series(&self, candles: &[Candle]) -> Result<()> {
        for (i, candle) in candles.iter().enumerate() {
            if let Err(e) = self.validate(candle) {
                bail!("{} bar {}: {}", candle.token, i, e);
            }
        }
        crate::strategy::signals::validate_candle_order(candles)
    }

    /// Validate that all prices are positive and finite
    fn validate_prices(&self, candle: &Candle) -> Result<()> {
        let fields = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                bail!("Invalid {} price: {}", name, value);
            }
        }
        // Volume can be 0.0 (for backfilled data)
        if !candle.volume.is_finite() || candle.volume < 0.0 {
            bail!("Invalid volume: {}", candle.volume);
        }
        Ok(())
    }

    /// Validate OHLC relationships (high >= low, etc.)
    fn validate_ohlc_relationship(&self, candle: &Candle) -> Result<()> {
        if candle.high < candle.low {
            bail!("High ({}) is less than low ({})", candle.high, candle.low);
        }
        if candle.high < candle.open.max(candle.close) {
            bail!(
                "High ({}) is below open/close ({} / {})",
                candle.high,
                candle.open,
                candle.close
            );
        }
        if candle.low > candle.open.min(candle.close) {
            bail!(
                "Low ({}) is above open/close ({} / {})",
                candle.low,
                candle.open,
                candle.close
            );
        }
        Ok(())
    }
}

impl Default for CandleValidator {
    fn default() -> Self {
        Self::new()
    }
}
