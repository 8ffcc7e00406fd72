// src/math_utils.rs
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Standard normal cumulative distribution function Φ(x).
///
/// Uses the complementary error function, `Φ(x) = ½·erfc(−x/√2)`, which keeps
/// full relative precision in the lower tail where `½·(1 + erf(x/√2))` cancels.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function φ(x) = e^(−x²/2)/√(2π)
pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-13);
        assert!((norm_cdf(-1.96) - 0.024_997_895_148_220_43).abs() < 1e-13);
        assert!((norm_cdf(3.0) - 0.998_650_101_968_369_9).abs() < 1e-13);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 5.0] {
            assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_norm_cdf_lower_tail_keeps_precision() {
        // Φ(-10) ≈ 7.6199e-24; the erf form would round this to zero.
        let tail = norm_cdf(-10.0);
        assert!(tail > 0.0);
        assert!((tail - 7.619_853_024_160_527e-24).abs() / 7.619_853_024_160_527e-24 < 1e-10);
    }

    #[test]
    fn test_norm_cdf_matches_statrs_normal() {
        use statrs::distribution::{ContinuousCDF, Normal};
        let n = match Normal::new(0.0, 1.0) {
            Ok(n) => n,
            Err(e) => panic!("standard normal: {}", e),
        };
        for &x in &[-6.0, -2.5, -0.3, 0.0, 0.7, 1.5, 4.0] {
            assert!((norm_cdf(x) - n.cdf(x)).abs() < 1e-9, "x = {}", x);
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
        assert_eq!(norm_pdf(1.5), norm_pdf(-1.5));
    }
}
