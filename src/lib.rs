//! # bsm-pricer: Black-Scholes-Merton Pricing and Greeks
//!
//! Closed-form fair values and first-order sensitivities for European vanilla
//! options, plus the views built on top of them: a pricer report, a payoff
//! diagram, and spot × volatility value and P&L heatmaps.
//!
//! ## Key Features
//!
//! - **Pure engine**: `price` and `greeks` are stateless and deterministic
//! - **Validated inputs**: S, K, T, σ > 0 are checked before any formula runs
//! - **Display units**: Vega and Rho per 1 percentage-point, Theta per calendar day
//! - **Parallel grids**: heatmap cells evaluated with Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_pricer::analytics::{greeks, price, OptionParameters, OptionType};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.20, OptionType::Call)
//!     .expect("valid parameters");
//!
//! let value = price(&params).expect("valid parameters");
//! let g = greeks(&params).expect("valid parameters");
//! assert!((value - 10.4506).abs() < 1e-4);
//! assert!((g.delta - 0.6368).abs() < 1e-4);
//! ```
//!
//! ## Mathematical Foundation
//!
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! C  = S Φ(d₁) - K e^(-rT) Φ(d₂)
//! P  = K e^(-rT) Φ(-d₂) - S Φ(-d₁)
//! ```

// Module declarations
pub mod analytics;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod math_utils;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::{greeks, price, Greeks, OptionParameters, OptionType};
pub use error::{AppError, AppResult, PricingError, PricingResult};
