// src/dashboard/controls.rs
//! Bounded input controls for the dashboard.
//!
//! Rate and volatility are entered in percent and converted to decimals when
//! the engine is called.

use crate::analytics::{OptionParameters, OptionType};
use crate::error::validation::validate_range;
use crate::error::{AppError, AppResult, PricingError};
use serde::Serialize;

/// Closed range and default for one numeric control
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Control {
    pub const fn new(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Control {
            name,
            min,
            max,
            default,
        }
    }

    pub fn check(&self, value: f64) -> AppResult<f64> {
        validate_range(self.name, value, self.min, self.max).map_err(|e| match e {
            PricingError::InvalidParameter { parameter, reason } => AppError::InvalidInput {
                field: parameter.to_string(),
                reason,
            },
        })?;
        Ok(value)
    }
}

pub const SPOT: Control = Control::new("spot", 1.0, 1e6, 100.0);
pub const STRIKE: Control = Control::new("strike", 1.0, 1e6, 100.0);
pub const TIME_TO_EXPIRY: Control = Control::new("expiry", 0.01, 10.0, 1.0);
pub const RATE_PCT: Control = Control::new("rate", 0.0, 20.0, 5.0);
pub const VOLATILITY_PCT: Control = Control::new("vol", 1.0, 150.0, 20.0);

// Heatmap volatility sliders, percent
pub const VOL_MIN_PCT: Control = Control::new("vol-min", 1.0, 100.0, 10.0);
pub const VOL_MAX_PCT: Control = Control::new("vol-max", 1.0, 150.0, 40.0);

/// Default spot window for heatmaps, as multiples of the current spot
pub const SPOT_MIN_FACTOR: f64 = 0.7;
pub const SPOT_MAX_FACTOR: f64 = 1.3;

/// The five core market inputs as the user enters them
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarketInputs {
    pub spot: f64,
    pub strike: f64,
    pub time_to_expiry: f64,
    pub rate_pct: f64,
    pub volatility_pct: f64,
}

impl Default for MarketInputs {
    fn default() -> Self {
        MarketInputs {
            spot: SPOT.default,
            strike: STRIKE.default,
            time_to_expiry: TIME_TO_EXPIRY.default,
            rate_pct: RATE_PCT.default,
            volatility_pct: VOLATILITY_PCT.default,
        }
    }
}

impl MarketInputs {
    pub fn validate(&self) -> AppResult<()> {
        SPOT.check(self.spot)?;
        STRIKE.check(self.strike)?;
        TIME_TO_EXPIRY.check(self.time_to_expiry)?;
        RATE_PCT.check(self.rate_pct)?;
        VOLATILITY_PCT.check(self.volatility_pct)?;
        Ok(())
    }

    pub fn rate(&self) -> f64 {
        self.rate_pct / 100.0
    }

    pub fn volatility(&self) -> f64 {
        self.volatility_pct / 100.0
    }

    /// Check control bounds, then build validated engine parameters
    pub fn to_parameters(&self, option_type: OptionType) -> AppResult<OptionParameters> {
        self.validate()?;
        Ok(OptionParameters::new(
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.rate(),
            self.volatility(),
            option_type,
        )?)
    }
}
