// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes-Merton formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options this has closed-form solutions involving the
//! cumulative normal distribution function Φ(x) and density φ(x). No
//! dividend yield term is modelled.
//!
//! Every function here is pure: no state, no I/O, no logging. Inputs are
//! validated before any formula is evaluated.

use crate::error::{validation::*, PricingError, PricingResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days per year used to express Theta per calendar day
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Vega and Rho are quoted per 1 percentage-point move
pub const PERCENT_SCALE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(PricingError::InvalidParameter {
                parameter: "option_type",
                reason: format!("must be 'call' or 'put', got '{}'", other),
            }),
        }
    }
}

/// Inputs to a single Black-Scholes evaluation.
///
/// Fields are public so callers can build the record directly; `price` and
/// `greeks` validate it again before evaluating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    pub spot: f64,
    pub strike: f64,
    /// Years
    pub time_to_expiry: f64,
    /// Decimal, e.g. 0.05 for 5%
    pub risk_free_rate: f64,
    /// Decimal, e.g. 0.20 for 20%
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionParameters {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        let params = OptionParameters {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check S, K, T, σ > 0 and that r is finite
    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("spot", self.spot)?;
        validate_positive("strike", self.strike)?;
        validate_positive("time_to_expiry", self.time_to_expiry)?;
        validate_positive("volatility", self.volatility)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        Ok(())
    }

    /// Same market inputs, other option type
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        OptionParameters {
            option_type,
            ..*self
        }
    }

    /// Same inputs, different spot (unvalidated until priced)
    pub fn with_spot(&self, spot: f64) -> Self {
        OptionParameters { spot, ..*self }
    }

    /// Same inputs, different volatility (unvalidated until priced)
    pub fn with_volatility(&self, volatility: f64) -> Self {
        OptionParameters {
            volatility,
            ..*self
        }
    }

    /// Discounted strike K·e^(−rT)
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

/// The five first-order sensitivities in display units.
///
/// - `vega`: price change per 1 percentage-point move in volatility
/// - `theta`: price change per calendar day
/// - `rho`: price change per 1 percentage-point move in the rate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

impl Greeks {
    pub const NAMES: [&'static str; 5] = ["delta", "gamma", "vega", "theta", "rho"];

    /// Fixed-key view in display order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("vega", self.vega),
            ("theta", self.theta),
            ("rho", self.rho),
        ]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, value)| value)
    }
}

/// Intermediate quantities shared by `price` and `greeks`.
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
struct D1D2 {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    discount: f64,
}

impl D1D2 {
    fn compute(p: &OptionParameters) -> Self {
        let sqrt_t = p.time_to_expiry.sqrt();
        let sigma_sqrt_t = p.volatility * sqrt_t;
        let d1 = ((p.spot / p.strike).ln()
            + (p.risk_free_rate + 0.5 * p.volatility * p.volatility) * p.time_to_expiry)
            / sigma_sqrt_t;
        D1D2 {
            d1,
            d2: d1 - sigma_sqrt_t,
            sqrt_t,
            discount: (-p.risk_free_rate * p.time_to_expiry).exp(),
        }
    }
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// # Errors
/// `InvalidParameter` if S, K, T or σ is not strictly positive, or r is not finite.
pub fn price(params: &OptionParameters) -> PricingResult<f64> {
    params.validate()?;
    let d = D1D2::compute(params);
    let k_disc = params.strike * d.discount;

    let value = match params.option_type {
        OptionType::Call => params.spot * norm_cdf(d.d1) - k_disc * norm_cdf(d.d2),
        OptionType::Put => k_disc * norm_cdf(-d.d2) - params.spot * norm_cdf(-d.d1),
    };
    Ok(value.max(0.0))
}

/// Black-Scholes Greeks for a European option
///
/// # Formulas
/// ```text
/// Δ = Φ(d₁)                      (call)    Φ(d₁) - 1            (put)
/// Γ = φ(d₁) / (S σ √T)           (both)
/// ν = S φ(d₁) √T / 100           (both)
/// Θ = [-S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)] / 365     (call)
///     [-S φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂)] / 365    (put)
/// ρ =  K T e^(-rT) Φ(d₂) / 100   (call)   -K T e^(-rT) Φ(-d₂) / 100   (put)
/// ```
pub fn greeks(params: &OptionParameters) -> PricingResult<Greeks> {
    params.validate()?;
    let d = D1D2::compute(params);
    let s = params.spot;
    let k = params.strike;
    let r = params.risk_free_rate;
    let t = params.time_to_expiry;
    let sigma = params.volatility;

    let pdf_d1 = norm_pdf(d.d1);
    let gamma = pdf_d1 / (s * sigma * d.sqrt_t);
    let vega = s * pdf_d1 * d.sqrt_t / PERCENT_SCALE;
    let time_decay = -s * pdf_d1 * sigma / (2.0 * d.sqrt_t);

    let greeks = match params.option_type {
        OptionType::Call => Greeks {
            delta: norm_cdf(d.d1),
            gamma,
            vega,
            theta: (time_decay - r * k * d.discount * norm_cdf(d.d2)) / DAYS_PER_YEAR,
            rho: k * t * d.discount * norm_cdf(d.d2) / PERCENT_SCALE,
        },
        OptionType::Put => Greeks {
            delta: norm_cdf(d.d1) - 1.0,
            gamma,
            vega,
            theta: (time_decay + r * k * d.discount * norm_cdf(-d.d2)) / DAYS_PER_YEAR,
            rho: -k * t * d.discount * norm_cdf(-d.d2) / PERCENT_SCALE,
        },
    };
    Ok(greeks)
}

/// Price from six scalar inputs
pub fn bs_price(
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    price(&OptionParameters::new(s, k, t, r, sigma, option_type)?)
}

/// Greeks from six scalar inputs
pub fn bs_greeks(
    s: f64,
    k: f64,
    t: f64,
    r: f64,
    sigma: f64,
    option_type: OptionType,
) -> PricingResult<Greeks> {
    greeks(&OptionParameters::new(s, k, t, r, sigma, option_type)?)
}
