// src/error.rs
use thiserror::Error;

/// The single failure the pricing engine can report.
///
/// Raised before any formula is evaluated; the engine never produces a
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Result type alias for engine operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors surfaced by the dashboard front-end and the `bsm` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("grid error: {0}")]
    Grid(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ndarray::ShapeError> for AppError {
    fn from(e: ndarray::ShapeError) -> Self {
        AppError::Grid(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Validate that a parameter is finite and strictly positive.
    ///
    /// NaN fails this check as well, since `NaN > 0.0` is false.
    pub fn validate_positive(name: &'static str, value: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(PricingError::InvalidParameter {
                parameter: name,
                reason: format!("must be positive (> 0), got {}", value),
            })
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &'static str, value: f64) -> PricingResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(PricingError::InvalidParameter {
                parameter: name,
                reason: format!("must be finite (not NaN or infinite), got {}", value),
            })
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &'static str, value: f64, min: f64, max: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value < min || value > max {
            Err(PricingError::InvalidParameter {
                parameter: name,
                reason: format!("must be in range [{}, {}], got {}", min, max, value),
            })
        } else {
            Ok(())
        }
    }
}
