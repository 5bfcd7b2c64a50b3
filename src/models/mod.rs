use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only access to the price fields the indicators consume
///
/// `high`/`low` are only read when volatility normalization is requested.
pub trait PriceBar {
    fn close(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
}

/// OHLCV candlestick data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub token: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PriceBar for Candle {
    fn close(&self) -> f64 {
        self.close
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }
}

/// Minimal close/high/low bar for callers that don't carry timestamps
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl Bar {
    /// Bar where high, low and close are all the same price
    pub fn flat(price: f64) -> Self {
        Self {
            close: price,
            high: price,
            low: price,
        }
    }
}

impl PriceBar for Bar {
    fn close(&self) -> f64 {
        self.close
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}
