// src/analytics/mod.rs
pub mod bs_analytic;

pub use bs_analytic::{greeks, price, Greeks, OptionParameters, OptionType};
