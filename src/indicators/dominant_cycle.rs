//! Dominant cycle period estimator
//!
//! Treats `cycle[i]` as the real component and the one-bar-delayed
//! `cycle[i-1]` as the imaginary proxy. The phase increment between bars
//! comes from the cotangent-difference identity
//!
//! `delta_phi = (q[i] - q[i-1]) / (1 + q[i] * q[i-1])`, with `q = imag / real`
//!
//! and the instantaneous period is `2π / |delta_phi|`. The output is the
//! median of the last `median_length` valid instantaneous periods, floored
//! at [`MIN_CYCLE_PERIOD`].
//!
//! A bar where the phase increment is undefined (zero real part, zero
//! denominator, zero increment, or non-finite arithmetic) records nothing
//! and carries the previous output forward. `0.0` in the output means no
//! period has been established yet.

use std::f64::consts::PI;

use super::median_window::MedianWindow;

/// A cycle cannot be shorter than two bars
pub const MIN_CYCLE_PERIOD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DominantCycle {
    /// Per-bar dominant period; 0.0 where undefined
    pub period: Vec<f64>,
    /// Bars where the phase increment could not be measured
    pub undefined_phase_bars: usize,
}

impl DominantCycle {
    /// Most recent defined period, if any
    pub fn last_defined(&self) -> Option<f64> {
        self.period.iter().rev().copied().find(|p| *p > 0.0)
    }
}

/// Instantaneous period at bar `i`, or `None` when the phase is undefined
///
/// Requires `i >= 2` so both quadrature ratios have a delayed sample.
pub fn instantaneous_period(cycle: &[f64], i: usize) -> Option<f64> {
    if i < 2 || i >= cycle.len() {
        return None;
    }

    let real = cycle[i];
    let real_prev = cycle[i - 1];
    if real == 0.0 || real_prev == 0.0 {
        return None;
    }

    let q = cycle[i - 1] / real;
    let q_prev = cycle[i - 2] / real_prev;

    let denominator = 1.0 + q * q_prev;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let delta_phi = (q - q_prev) / denominator;
    if delta_phi == 0.0 || !delta_phi.is_finite() {
        return None;
    }

    let period = 2.0 * PI / delta_phi.abs();
    (period.is_finite() && period > 0.0).then_some(period)
}

pub fn calculate_dominant_cycle(cycle: &[f64], median_length: usize) -> DominantCycle {
    let mut period = vec![0.0; cycle.len()];
    let mut history = MedianWindow::new(median_length);
    let mut undefined_phase_bars = 0;
    let mut current = 0.0;

    for i in 2..cycle.len() {
        match instantaneous_period(cycle, i) {
            Some(inst_period) => {
                history.push(inst_period);
                if history.is_full() {
                    if let Some(median) = history.median() {
                        current = median.max(MIN_CYCLE_PERIOD);
                    }
                }
            }
            None => {
                undefined_phase_bars += 1;
                tracing::trace!(bar = i, "undefined phase increment, carrying period forward");
            }
        }

        period[i] = current;
    }

    DominantCycle {
        period,
        undefined_phase_bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::cyber_cycle::calculate_cyber_cycle;
    use crate::indicators::smoother::calculate_smooth_series;

    fn sine_cycle(bars: usize, period: f64) -> Vec<f64> {
        let prices: Vec<f64> = (0..bars)
            .map(|i| 100.0 + 5.0 * (2.0 * PI * i as f64 / period).sin())
            .collect();
        calculate_cyber_cycle(&calculate_smooth_series(&prices))
    }

    #[test]
    fn test_zero_real_part_is_undefined() {
        let cycle = vec![0.0, 0.0, 1.0, 2.0, 0.0, 3.0];

        assert_eq!(instantaneous_period(&cycle, 2), None); // cycle[1] == 0
        assert_eq!(instantaneous_period(&cycle, 4), None); // cycle[4] == 0
        assert_eq!(instantaneous_period(&cycle, 5), None); // cycle[4] == 0
        // A zero imaginary sample is fine, only the real parts divide
        assert!(instantaneous_period(&cycle, 3).is_some());
    }

    #[test]
    fn test_zero_phase_increment_is_undefined() {
        // Geometric sequence: q is constant so delta_phi is exactly zero
        let cycle = vec![1.0, 2.0, 4.0, 8.0, 16.0];
        assert_eq!(instantaneous_period(&cycle, 3), None);
        assert_eq!(instantaneous_period(&cycle, 4), None);
    }

    #[test]
    fn test_instantaneous_period_hand_calculation() {
        let cycle = vec![1.0, 2.0, 1.0];
        // q = 2/1 = 2, q_prev = 1/2, delta = 1.5 / 2 = 0.75
        let period = instantaneous_period(&cycle, 2).unwrap();
        assert!((period - 2.0 * PI / 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_until_window_is_full() {
        let cycle = sine_cycle(200, 20.0);
        let dominant = calculate_dominant_cycle(&cycle, 8);

        let first_defined = dominant
            .period
            .iter()
            .position(|p| *p > 0.0)
            .expect("period should become defined");

        // Needs 8 valid estimates, the first possible at bar 4
        assert!(first_defined >= 4 + 7);
        assert!(dominant.period[..first_defined].iter().all(|p| *p == 0.0));
    }

    #[test]
    fn test_defined_period_respects_floor() {
        let cycle = sine_cycle(200, 20.0);
        let dominant = calculate_dominant_cycle(&cycle, 8);

        for p in &dominant.period {
            assert!(*p == 0.0 || *p >= MIN_CYCLE_PERIOD);
            assert!(p.is_finite());
        }
        assert!(dominant.last_defined().is_some());
    }

    #[test]
    fn test_floor_applies_to_fast_oscillation() {
        // Alternating signs give a huge phase increment and a sub-2 period
        let cycle: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 1.0 + i as f64 } else { -(1.0 + i as f64) * 0.5 })
            .collect();
        let dominant = calculate_dominant_cycle(&cycle, 3);

        for p in dominant.period.iter().filter(|p| **p > 0.0) {
            assert!(*p >= MIN_CYCLE_PERIOD);
        }
    }

    #[test]
    fn test_undefined_phase_carries_forward() {
        let mut cycle = sine_cycle(120, 20.0);
        let baseline = calculate_dominant_cycle(&cycle, 4);
        let before = baseline.period[99];
        assert!(before > 0.0);

        cycle[100] = 0.0;
        let dominant = calculate_dominant_cycle(&cycle, 4);

        // Bars 100 and 101 both read cycle[100] as a real part
        assert_eq!(dominant.period[100], before);
        assert_eq!(dominant.period[101], before);
        assert!(dominant.undefined_phase_bars > baseline.undefined_phase_bars);
    }

    #[test]
    fn test_all_zero_cycle_never_defines_period() {
        let dominant = calculate_dominant_cycle(&[0.0; 50], 8);

        assert!(dominant.period.iter().all(|p| *p == 0.0));
        assert_eq!(dominant.undefined_phase_bars, 48);
        assert_eq!(dominant.last_defined(), None);
    }
}
