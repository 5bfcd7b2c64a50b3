//! Concurrent SAM evaluation across many tickers
//!
//! Each ticker is computed on the blocking pool with no shared state, so a
//! failure (typically too little history) only skips that ticker.

use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::data::PriceHistory;
use crate::error::StrategyError;
use crate::indicators::compute_sam_detailed;
use crate::models::{Candle, Signal};
use crate::strategy::SamTrendStrategy;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerReading {
    pub sam: f64,
    pub dominant_period: Option<f64>,
    pub undefined_phase_bars: usize,
    pub zero_volatility: bool,
    /// None when there is enough history for SAM but not for the strategy filters
    pub signal: Option<Signal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TickerOutcome {
    Ready(TickerReading),
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerReport {
    pub ticker: String,
    pub bars: usize,
    pub outcome: TickerOutcome,
}

/// Evaluate SAM and the SAM trend strategy for one ticker
///
/// The reading uses the strategy's own SAM settings, so `sam` is the value
/// the signal was decided on.
pub fn evaluate_ticker(
    ticker: &str,
    candles: &[Candle],
    strategy: &SamTrendStrategy,
) -> TickerReport {
    let outcome = match compute_sam_detailed(candles, &strategy.config().sam) {
        Ok(output) => {
            let signal = match strategy.evaluate(candles) {
                Ok(snapshot) => Some(snapshot.signal),
                Err(StrategyError::InsufficientCandles { required, .. }) => {
                    tracing::debug!(ticker, required, "Not enough history for strategy filters");
                    None
                }
                Err(e) => {
                    tracing::warn!(ticker, error = %e, "Strategy evaluation failed");
                    None
                }
            };

            TickerOutcome::Ready(TickerReading {
                sam: output.last().unwrap_or(0.0),
                dominant_period: output.last_period(),
                undefined_phase_bars: output.diagnostics.undefined_phase_bars,
                zero_volatility: output.diagnostics.zero_volatility,
                signal,
            })
        }
        Err(e) => {
            if e.is_insufficient_data() {
                tracing::info!(ticker, error = %e, "Skipping ticker");
            } else {
                tracing::warn!(ticker, error = %e, "Skipping ticker");
            }
            TickerOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    };

    TickerReport {
        ticker: ticker.to_string(),
        bars: candles.len(),
        outcome,
    }
}

/// Evaluate every ticker in `history` concurrently
///
/// Reports come back sorted by ticker.
pub async fn evaluate_batch(
    history: PriceHistory,
    strategy: SamTrendStrategy,
) -> Vec<TickerReport> {
    let strategy = Arc::new(strategy);
    let mut tasks = JoinSet::new();

    for (ticker, candles) in history {
        let strategy = Arc::clone(&strategy);
        tasks.spawn_blocking(move || evaluate_ticker(&ticker, &candles, &strategy));
    }

    let mut reports = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(report) => reports.push(report),
            Err(e) => tracing::error!(error = %e, "Ticker evaluation task failed"),
        }
    }

    reports.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    reports
}
