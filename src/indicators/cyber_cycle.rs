/// Cyber Cycle band-pass filter
///
/// Fixed-coefficient 2-pole recursive filter over the smoothed series that
/// isolates the short/medium-term oscillation from trend:
///
/// `cycle[i] = (1 - 0.5*k) * (s[i] - 2*s[i-1] + s[i-2]) + 2*k*cycle[i-1] - k^2 * cycle[i-2]`
///
/// with damping `k = 0.707`.
use super::finite_or_zero;

pub const CYCLE_DAMPING: f64 = 0.707;

/// Bars that need two prior cycle values before the recursion starts
pub const CYCLE_WARMUP: usize = 2;

pub fn calculate_cyber_cycle(smooth: &[f64]) -> Vec<f64> {
    let gain = 1.0 - 0.5 * CYCLE_DAMPING;
    let feedback_1 = 2.0 * CYCLE_DAMPING;
    let feedback_2 = CYCLE_DAMPING * CYCLE_DAMPING;

    let mut cycle = vec![0.0; smooth.len()];

    for i in CYCLE_WARMUP..smooth.len() {
        let value = gain * (smooth[i] - 2.0 * smooth[i - 1] + smooth[i - 2])
            + feedback_1 * cycle[i - 1]
            - feedback_2 * cycle[i - 2];
        cycle[i] = finite_or_zero(value);
    }

    cycle
}
