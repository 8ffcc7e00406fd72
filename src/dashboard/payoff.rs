// src/dashboard/payoff.rs
//! Profit/loss at expiry for a single long option.
//!
//! ```text
//! payoff(x) = max(x - K, 0)   (call)
//!             max(K - x, 0)   (put)
//! pnl(x)    = payoff(x) - premium
//! ```
//! The premium is today's Black-Scholes fair value.

use crate::analytics::{price, OptionParameters, OptionType};
use crate::error::{AppError, AppResult};
use ndarray::Array1;
use serde::Serialize;

pub const DEFAULT_POINTS: usize = 300;
pub const SPOT_LOW_FACTOR: f64 = 0.5;
pub const SPOT_HIGH_FACTOR: f64 = 1.5;

/// Intrinsic value at expiry
pub fn intrinsic(option_type: OptionType, spot_at_expiry: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot_at_expiry - strike).max(0.0),
        OptionType::Put => (strike - spot_at_expiry).max(0.0),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PayoffCurve {
    pub option_type: OptionType,
    pub strike: f64,
    pub spot: f64,
    pub premium: f64,
    pub spots: Vec<f64>,
    pub payoff: Vec<f64>,
    pub pnl: Vec<f64>,
}

impl PayoffCurve {
    /// Evaluate the curve over `points` spots evenly spaced in [0.5·S, 1.5·S]
    pub fn compute(params: &OptionParameters, points: usize) -> AppResult<Self> {
        if points < 2 {
            return Err(AppError::InvalidInput {
                field: "points".to_string(),
                reason: format!("need at least 2 points, got {}", points),
            });
        }
        let premium = price(params)?;
        let spots = Array1::linspace(
            SPOT_LOW_FACTOR * params.spot,
            SPOT_HIGH_FACTOR * params.spot,
            points,
        );
        let payoff: Vec<f64> = spots
            .iter()
            .map(|&x| intrinsic(params.option_type, x, params.strike))
            .collect();
        let pnl = payoff.iter().map(|v| v - premium).collect();

        tracing::debug!(
            option_type = %params.option_type,
            premium,
            points,
            "computed payoff curve"
        );

        Ok(PayoffCurve {
            option_type: params.option_type,
            strike: params.strike,
            spot: params.spot,
            premium,
            spots: spots.to_vec(),
            payoff,
            pnl,
        })
    }

    /// Spot at expiry where the position breaks even
    pub fn breakeven(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.strike + self.premium,
            OptionType::Put => self.strike - self.premium,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.spots.iter().copied().zip(self.pnl.iter().copied())
    }

    pub fn pnl_range(&self) -> (f64, f64) {
        self.pnl
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(option_type: OptionType) -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type).unwrap()
    }

    #[test]
    fn test_curve_spans_half_to_one_and_a_half_spot() {
        let curve = PayoffCurve::compute(&params(OptionType::Call), DEFAULT_POINTS).unwrap();
        assert_eq!(curve.spots.len(), DEFAULT_POINTS);
        assert!((curve.spots[0] - 50.0).abs() < 1e-12);
        assert!((curve.spots[DEFAULT_POINTS - 1] - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_loss_is_capped_at_premium() {
        for option_type in OptionType::ALL {
            let curve = PayoffCurve::compute(&params(option_type), 101).unwrap();
            let (lo, _) = curve.pnl_range();
            assert!((lo + curve.premium).abs() < 1e-12);
        }
    }

    #[test]
    fn test_breakeven_has_zero_pnl() {
        for option_type in OptionType::ALL {
            let curve = PayoffCurve::compute(&params(option_type), 11).unwrap();
            let at_breakeven = intrinsic(option_type, curve.breakeven(), curve.strike) - curve.premium;
            assert!(at_breakeven.abs() < 1e-12);
        }
    }

    #[test]
    fn test_too_few_points_rejected() {
        assert!(PayoffCurve::compute(&params(OptionType::Call), 1).is_err());
    }
}
