/// 4-tap weighted low-pass pre-filter
///
/// `smooth[i] = (p[i] + 2*p[i-1] + 2*p[i-2] + p[i-3]) / 6`
///
/// The first three entries have no full tap history and are left at 0.
use super::finite_or_zero;

/// Bars without a complete 4-tap history
pub const SMOOTHER_WARMUP: usize = 3;

pub fn calculate_smooth_series(prices: &[f64]) -> Vec<f64> {
    let mut smooth = vec![0.0; prices.len()];

    for i in SMOOTHER_WARMUP..prices.len() {
        let value =
            (prices[i] + 2.0 * prices[i - 1] + 2.0 * prices[i - 2] + prices[i - 3]) / 6.0;
        smooth[i] = finite_or_zero(value);
    }

    smooth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warmup_is_zero() {
        let prices = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let smooth = calculate_smooth_series(&prices);

        assert_eq!(&smooth[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weighted_taps() {
        let prices = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let smooth = calculate_smooth_series(&prices);

        // (4 + 2*3 + 2*2 + 1) / 6
        assert!((smooth[3] - 2.5).abs() < 1e-12);
        // (5 + 2*4 + 2*3 + 2) / 6
        assert!((smooth[4] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_constant_input_passes_through() {
        let prices = vec![42.0; 10];
        let smooth = calculate_smooth_series(&prices);

        for value in &smooth[3..] {
            assert!((value - 42.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_short_and_empty_input() {
        assert!(calculate_smooth_series(&[]).is_empty());
        assert_eq!(calculate_smooth_series(&[1.0, 2.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_nan_sample_is_replaced() {
        let prices = vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        let smooth = calculate_smooth_series(&prices);

        assert_eq!(smooth[3], 0.0);
        assert_eq!(smooth[5], 0.0);
        // NaN has left the 4-tap window
        assert!((smooth[6] - (7.0 + 12.0 + 10.0 + 4.0) / 6.0).abs() < 1e-12);
    }
}
