// Technical indicators module
// SAM adaptive-cycle oscillator and its stages, plus the helper indicators
// the strategies combine it with (ATR, SMA/EMA, MACD, VWAP)

pub mod atr;
pub mod cyber_cycle;
pub mod detrend;
pub mod dominant_cycle;
pub mod macd;
pub mod median_window;
pub mod moving_average;
pub mod normalize;
pub mod sam;
pub mod smoother;
pub mod super_smoother;
pub mod vwap;

pub use atr::{calculate_atr, calculate_true_range_series};
pub use dominant_cycle::{calculate_dominant_cycle, DominantCycle};
pub use macd::{calculate_macd, MacdOutput, MacdParams};
pub use moving_average::{calculate_ema, calculate_ema_series, calculate_sma};
pub use sam::{compute_sam, compute_sam_detailed, SamDiagnostics, SamOutput, SamParams};
pub use vwap::calculate_vwap;

/// Replace NaN/infinite filter outputs with 0 so recursive state stays usable
#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
