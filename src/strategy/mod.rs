// Trading strategy module
pub mod sam_trend;
pub mod signals;
pub mod sma_trend;

use crate::error::Result;
use crate::models::{Candle, Signal};

pub use sam_trend::{SamStrategyConfig, SamTrendStrategy};
pub use sma_trend::{SmaTrendConfig, SmaTrendStrategy};

/// Base trait for all trading strategies
///
/// Strategies are stateless: they read the full candle history and emit a
/// signal. Whether a `Buy` opens a position or confirms an existing one is
/// up to the caller.
pub trait Strategy: Send + Sync {
    /// Generate a trading signal based on market data
    fn generate_signal(&self, candles: &[Candle]) -> Result<Signal>;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Minimum candles required for this strategy
    fn min_candles_required(&self) -> usize;
}
