use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::validator::CandleValidator;
use crate::models::Candle;

/// One bar as stored in a price history file (the ticker is the map key)
#[derive(Debug, Clone, Deserialize)]
struct BarRecord {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

/// Price history for several tickers, each oldest first
pub type PriceHistory = BTreeMap<String, Vec<Candle>>;

/// Parse `{"TICKER": [{"timestamp": ..., "open": ..., ...}, ...], ...}`
///
/// Every series is validated for OHLC sanity and chronological order.
pub fn parse_price_history(json: &str) -> Result<PriceHistory> {
    let raw: BTreeMap<String, Vec<BarRecord>> =
        serde_json::from_str(json).context("Failed to parse price history JSON")?;

    let validator = CandleValidator::new();
    let mut history = PriceHistory::new();

    for (ticker, records) in raw {
        let candles: Vec<Candle> = records
            .into_iter()
            .map(|r| Candle {
                token: ticker.clone(),
                timestamp: r.timestamp,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
            })
            .collect();

        validator
            .validate_series(&candles)
            .with_context(|| format!("Invalid price history for {}", ticker))?;

        tracing::debug!(ticker = %ticker, bars = candles.len(), "Loaded price history");
        history.insert(ticker, candles);
    }

    Ok(history)
}

/// Load a price history file from disk
pub fn load_price_history(path: impl AsRef<Path>) -> Result<PriceHistory> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read price history from {}", path.display()))?;
    parse_price_history(&json)
}
