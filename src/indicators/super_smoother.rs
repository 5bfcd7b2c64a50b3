//! 2-pole recursive low-pass filter
//!
//! Coefficients come from a pole placement at `1.414π / length`:
//!
//! ```text
//! a1 = exp(-1.414π / length)
//! b1 = 2 * a1 * cos(1.414π / length)
//! c2 = b1, c3 = -a1², c1 = 1 - c2 - c3
//! ```
//!
//! `c1 + c2 + c3 == 1`, so a constant input converges to that constant.

use std::f64::consts::PI;

use super::finite_or_zero;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmootherCoefficients {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl SmootherCoefficients {
    /// Coefficients for a design length in bars; lengths below 1 are treated as 1
    pub fn new(length: usize) -> Self {
        let length = length.max(1) as f64;
        let a1 = (-1.414 * PI / length).exp();
        let b1 = 2.0 * a1 * (1.414 * PI / length).cos();
        let c2 = b1;
        let c3 = -a1 * a1;
        let c1 = 1.0 - c2 - c3;
        Self { c1, c2, c3 }
    }

    pub fn dc_gain(&self) -> f64 {
        self.c1 + self.c2 + self.c3
    }
}

/// Filter `values`, leaving the first two outputs at 0
pub fn calculate_super_smoother(values: &[f64], length: usize) -> Vec<f64> {
    let SmootherCoefficients { c1, c2, c3 } = SmootherCoefficients::new(length);
    let mut out = vec![0.0; values.len()];

    for i in 2..values.len() {
        out[i] = finite_or_zero(c1 * values[i] + c2 * out[i - 1] + c3 * out[i - 2]);
    }

    out
}
