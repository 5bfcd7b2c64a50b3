//! SAM adaptive-cycle oscillator
//!
//! Pipeline, each stage strictly causal:
//! 1. 4-tap smoother over close prices
//! 2. Cyber Cycle band-pass and phase-difference dominant period estimate
//! 3. Detrend by the estimated cycle length, then a 2-pole low-pass filter
//! 4. Optional ATR normalization and tanh bounding
//!
//! Every call recomputes from the full history passed in; nothing is cached
//! between calls, so concurrent calls on different series need no locking.

use serde::{Deserialize, Serialize};

use super::atr::{calculate_atr, DEFAULT_ATR_WINDOW};
use super::cyber_cycle::calculate_cyber_cycle;
use super::detrend::calculate_detrended;
use super::dominant_cycle::calculate_dominant_cycle;
use super::normalize::normalize_by_atr;
use super::smoother::{calculate_smooth_series, SMOOTHER_WARMUP};
use super::super_smoother::calculate_super_smoother;
use crate::error::IndicatorError;
use crate::models::PriceBar;

const INDICATOR: &str = "sam";

pub const DEFAULT_MAX_SERIES_LEN: usize = 1_000_000;

/// Tunable SAM settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamParams {
    /// Band-pass lag; only affects the minimum history requirement
    pub cc_length: usize,
    /// Window of instantaneous periods feeding the median
    pub median_length: usize,
    /// Design length of the final 2-pole filter
    pub smooth_length: usize,
    pub normalize: bool,
    pub atr_window: usize,
    pub scaling_factor: f64,
    pub bound_with_tanh: bool,
    /// Inputs longer than this are rejected
    pub max_series_len: usize,
}

impl Default for SamParams {
    fn default() -> Self {
        Self {
            cc_length: 8,
            median_length: 8,
            smooth_length: 8,
            normalize: false,
            atr_window: DEFAULT_ATR_WINDOW,
            scaling_factor: 1.0,
            bound_with_tanh: false,
            max_series_len: DEFAULT_MAX_SERIES_LEN,
        }
    }
}

impl SamParams {
    /// Normalized, tanh-bounded variant with a 0.1 scaling factor and a
    /// 14-bar final filter
    pub fn bounded() -> Self {
        Self {
            smooth_length: 14,
            normalize: true,
            scaling_factor: 0.1,
            bound_with_tanh: true,
            ..Self::default()
        }
    }

    /// Minimum number of bars a computation needs
    pub fn min_bars(&self) -> usize {
        self.cc_length
            .max(self.median_length)
            .max(self.smooth_length)
            .saturating_add(SMOOTHER_WARMUP)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        let lengths = [
            ("cc_length", self.cc_length),
            ("median_length", self.median_length),
            ("smooth_length", self.smooth_length),
            ("atr_window", self.atr_window),
            ("max_series_len", self.max_series_len),
        ];
        for (name, value) in lengths {
            if value == 0 {
                return Err(IndicatorError::InvalidParameter {
                    name,
                    value: value.to_string(),
                    reason: "must be at least 1",
                });
            }
        }

        if !self.scaling_factor.is_finite() {
            return Err(IndicatorError::InvalidParameter {
                name: "scaling_factor",
                value: self.scaling_factor.to_string(),
                reason: "must be finite",
            });
        }

        Ok(())
    }
}

/// Bars where the pipeline fell back to a defined default
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamDiagnostics {
    pub undefined_phase_bars: usize,
    /// Normalization was requested but ATR was zero
    pub zero_volatility: bool,
    pub atr: Option<f64>,
}

/// Every intermediate series of a SAM run, aligned with the input bars
#[derive(Debug, Clone, PartialEq)]
pub struct SamOutput {
    pub smooth: Vec<f64>,
    pub cycle: Vec<f64>,
    /// Dominant cycle period; 0.0 where undefined
    pub period: Vec<f64>,
    pub lookback: Vec<usize>,
    pub detrended: Vec<f64>,
    /// Raw oscillator before normalization
    pub oscillator: Vec<f64>,
    /// Final series: normalized/bounded when configured, else the raw oscillator
    pub values: Vec<f64>,
    pub diagnostics: SamDiagnostics,
}

impl SamOutput {
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn last_period(&self) -> Option<f64> {
        self.period.iter().rev().copied().find(|p| *p > 0.0)
    }
}

/// Compute the SAM oscillator series
///
/// # Example
/// ```
/// use cyclebot::indicators::sam::{compute_sam, SamParams};
/// use cyclebot::models::Bar;
///
/// let bars: Vec<Bar> = (0..60)
///     .map(|i| Bar::flat(100.0 + (i as f64 * 0.3).sin()))
///     .collect();
/// let sam = compute_sam(&bars, &SamParams::default()).unwrap();
/// assert_eq!(sam.len(), bars.len());
///
/// // Ten bars is below max(8, 8, 8) + 3
/// assert!(compute_sam(&bars[..10], &SamParams::default()).is_err());
/// ```
pub fn compute_sam<B: PriceBar>(prices: &[B], params: &SamParams) -> Result<Vec<f64>, IndicatorError> {
    compute_sam_detailed(prices, params).map(|output| output.values)
}

/// Compute the SAM oscillator and keep every intermediate stage
pub fn compute_sam_detailed<B: PriceBar>(
    prices: &[B],
    params: &SamParams,
) -> Result<SamOutput, IndicatorError> {
    params.validate()?;

    let required = params.min_bars();
    if prices.len() < required {
        return Err(IndicatorError::InsufficientData {
            indicator: INDICATOR,
            required,
            actual: prices.len(),
        });
    }
    if prices.len() > params.max_series_len {
        return Err(IndicatorError::SeriesTooLong {
            indicator: INDICATOR,
            max: params.max_series_len,
            actual: prices.len(),
        });
    }

    let closes: Vec<f64> = prices.iter().map(|bar| bar.close()).collect();

    let smooth = calculate_smooth_series(&closes);
    let cycle = calculate_cyber_cycle(&smooth);
    let dominant = calculate_dominant_cycle(&cycle, params.median_length);
    let detrended = calculate_detrended(&closes, &dominant.period);
    let oscillator = calculate_super_smoother(&detrended.values, params.smooth_length);

    let mut diagnostics = SamDiagnostics {
        undefined_phase_bars: dominant.undefined_phase_bars,
        ..SamDiagnostics::default()
    };

    let values = if params.normalize {
        let atr = calculate_atr(prices, params.atr_window).unwrap_or(0.0);
        let normalized = normalize_by_atr(
            &oscillator,
            atr,
            params.scaling_factor,
            params.bound_with_tanh,
        );
        if normalized.zero_volatility {
            tracing::debug!(atr, "zero volatility, returning unnormalized SAM");
        }
        diagnostics.atr = Some(atr);
        diagnostics.zero_volatility = normalized.zero_volatility;
        normalized.values
    } else if params.bound_with_tanh {
        oscillator.iter().map(|v| v.tanh()).collect()
    } else {
        oscillator.clone()
    };

    log_summary(&values, &diagnostics);

    Ok(SamOutput {
        smooth,
        cycle,
        period: dominant.period,
        lookback: detrended.lookback,
        detrended: detrended.values,
        oscillator,
        values,
        diagnostics,
    })
}

fn log_summary(values: &[f64], diagnostics: &SamDiagnostics) {
    if values.is_empty() {
        return;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    tracing::debug!(
        bars = values.len(),
        min,
        max,
        mean,
        undefined_phase_bars = diagnostics.undefined_phase_bars,
        "SAM calculation complete"
    );
}
