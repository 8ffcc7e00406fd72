// src/dashboard/heatmap.rs
//! Spot × volatility grids of option value and profit/loss.
//!
//! Rows index volatility (ascending), columns index spot (ascending). Each cell
//! is an independent engine call, so cells are evaluated with Rayon; the
//! sequential mode exists for comparison and yields identical grids.

use crate::analytics::{price, OptionParameters, OptionType};
use crate::dashboard::controls::{SPOT_MAX_FACTOR, SPOT_MIN_FACTOR, VOL_MAX_PCT, VOL_MIN_PCT};
use crate::error::{AppError, AppResult};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

pub const DEFAULT_RESOLUTION: usize = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

/// Axes of a heatmap. Volatility bounds are decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub spot_min: f64,
    pub spot_max: f64,
    pub vol_min: f64,
    pub vol_max: f64,
    pub resolution: usize,
}

impl GridSpec {
    /// Default window around the current spot: [0.7·S, 1.3·S] × [10%, 40%]
    pub fn around(spot: f64, resolution: usize) -> Self {
        GridSpec {
            spot_min: SPOT_MIN_FACTOR * spot,
            spot_max: SPOT_MAX_FACTOR * spot,
            vol_min: VOL_MIN_PCT.default / 100.0,
            vol_max: VOL_MAX_PCT.default / 100.0,
            resolution,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let invalid = |field: &str, reason: String| AppError::InvalidInput {
            field: field.to_string(),
            reason,
        };
        if self.resolution < 2 {
            return Err(invalid(
                "resolution",
                format!("need at least 2 points per axis, got {}", self.resolution),
            ));
        }
        if !(self.spot_min > 0.0) || !self.spot_max.is_finite() {
            return Err(invalid(
                "spot-min",
                format!("spot range must be positive and finite, got [{}, {}]", self.spot_min, self.spot_max),
            ));
        }
        if self.spot_min >= self.spot_max {
            return Err(invalid(
                "spot-max",
                format!("must exceed spot-min ({}), got {}", self.spot_min, self.spot_max),
            ));
        }
        VOL_MIN_PCT.check(self.vol_min * 100.0)?;
        VOL_MAX_PCT.check(self.vol_max * 100.0)?;
        if self.vol_min >= self.vol_max {
            return Err(invalid(
                "vol-max",
                format!("must exceed vol-min ({}%), got {}%", self.vol_min * 100.0, self.vol_max * 100.0),
            ));
        }
        Ok(())
    }

    pub fn spots(&self) -> Array1<f64> {
        Array1::linspace(self.spot_min, self.spot_max, self.resolution)
    }

    pub fn vols(&self) -> Array1<f64> {
        Array1::linspace(self.vol_min, self.vol_max, self.resolution)
    }
}

/// One evaluated grid
#[derive(Clone, Debug)]
pub struct Heatmap {
    pub option_type: OptionType,
    pub spots: Array1<f64>,
    pub vols: Array1<f64>,
    /// `values[[vol_index, spot_index]]`
    pub values: Array2<f64>,
    /// Purchase price subtracted from each cell, if this is a P&L grid
    pub purchase_price: Option<f64>,
}

impl Heatmap {
    /// Option value for every (volatility, spot) pair.
    ///
    /// Strike, expiry and rate are taken from `base`; its spot and volatility
    /// are replaced per cell.
    pub fn values(base: &OptionParameters, spec: &GridSpec, mode: ExecutionMode) -> AppResult<Self> {
        Self::evaluate(base, spec, mode, None)
    }

    /// Value minus `purchase_price` for every (volatility, spot) pair
    pub fn pnl(
        base: &OptionParameters,
        spec: &GridSpec,
        purchase_price: f64,
        mode: ExecutionMode,
    ) -> AppResult<Self> {
        if !purchase_price.is_finite() || purchase_price < 0.0 {
            return Err(AppError::InvalidInput {
                field: format!("{}-premium", base.option_type),
                reason: format!("must be a non-negative price, got {}", purchase_price),
            });
        }
        Self::evaluate(base, spec, mode, Some(purchase_price))
    }

    fn evaluate(
        base: &OptionParameters,
        spec: &GridSpec,
        mode: ExecutionMode,
        purchase_price: Option<f64>,
    ) -> AppResult<Self> {
        spec.validate()?;
        base.validate()?;
        let spots = spec.spots();
        let vols = spec.vols();
        let (rows, cols) = (vols.len(), spots.len());
        let offset = purchase_price.unwrap_or(0.0);

        let cell = |idx: usize| {
            let cell_params = base
                .with_volatility(vols[idx / cols])
                .with_spot(spots[idx % cols]);
            price(&cell_params).map(|v| v - offset)
        };

        let flat: Vec<f64> = match mode {
            ExecutionMode::Parallel => (0..rows * cols)
                .into_par_iter()
                .map(cell)
                .collect::<Result<_, _>>()?,
            ExecutionMode::Sequential => (0..rows * cols).map(cell).collect::<Result<_, _>>()?,
        };

        tracing::debug!(
            option_type = %base.option_type,
            rows,
            cols,
            ?mode,
            pnl = purchase_price.is_some(),
            "evaluated heatmap"
        );

        Ok(Heatmap {
            option_type: base.option_type,
            spots,
            vols,
            values: Array2::from_shape_vec((rows, cols), flat)?,
            purchase_price,
        })
    }

    pub fn is_pnl(&self) -> bool {
        self.purchase_price.is_some()
    }

    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn title(&self) -> String {
        let kind = match self.option_type {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        };
        if self.is_pnl() {
            format!("{} Option P&L", kind)
        } else {
            format!("{} Option Value", kind)
        }
    }
}
