use thiserror::Error;

/// Errors surfaced by indicator computations
///
/// Numeric edge cases inside a computation (zero denominators, zero
/// volatility, non-finite samples) are absorbed locally and never show up here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IndicatorError {
    #[error("insufficient data for {indicator}: need {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("series too long for {indicator}: {actual} bars exceeds cap of {max}")]
    SeriesTooLong {
        indicator: &'static str,
        max: usize,
        actual: usize,
    },
}

impl IndicatorError {
    /// True when the caller should skip this instrument for now and retry later
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, IndicatorError::InsufficientData { .. })
    }
}

/// Errors surfaced by strategies
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("insufficient candles for {strategy}: need {required}, got {actual}")]
    InsufficientCandles {
        strategy: &'static str,
        required: usize,
        actual: usize,
    },

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

pub type Result<T, E = StrategyError> = std::result::Result<T, E>;
