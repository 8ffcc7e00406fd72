// src/dashboard/mod.rs
//! Front-end over the pricing engine.
//!
//! Four views, each a function of the same market inputs:
//! - **Option Pricer**: call, put and selected price plus the five Greeks
//! - **Payoff Diagram**: P&L at expiry over [0.5·S, 1.5·S]
//! - **Sensitivity Analysis**: call/put value over a spot × volatility grid
//! - **P&L Heatmaps**: the same grids netted against purchase prices

pub mod controls;
pub mod explain;
pub mod heatmap;
pub mod payoff;
pub mod render;

use crate::analytics::{greeks, price, Greeks, OptionType};
use crate::error::{AppError, AppResult};
use crate::output::{self, OutputFormats};
use controls::{MarketInputs, VOL_MAX_PCT, VOL_MIN_PCT};
use heatmap::{ExecutionMode, GridSpec, Heatmap, DEFAULT_RESOLUTION};
use payoff::{PayoffCurve, DEFAULT_POINTS};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    OptionPricer,
    PayoffDiagram,
    SensitivityAnalysis,
    PnlHeatmaps,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::OptionPricer,
        ViewMode::PayoffDiagram,
        ViewMode::SensitivityAnalysis,
        ViewMode::PnlHeatmaps,
    ];

    /// Command-line name
    pub fn key(&self) -> &'static str {
        match self {
            ViewMode::OptionPricer => "pricer",
            ViewMode::PayoffDiagram => "payoff",
            ViewMode::SensitivityAnalysis => "sensitivity",
            ViewMode::PnlHeatmaps => "pnl",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            ViewMode::OptionPricer => "Option Pricer",
            ViewMode::PayoffDiagram => "Payoff Diagram",
            ViewMode::SensitivityAnalysis => "Sensitivity Analysis",
            ViewMode::PnlHeatmaps => "P&L Heatmaps",
        };
        f.write_str(title)
    }
}

impl FromStr for ViewMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.key() == key)
            .ok_or_else(|| AppError::InvalidInput {
                field: "view".to_string(),
                reason: format!("unknown view '{}' (expected pricer, payoff, sensitivity, pnl)", s),
            })
    }
}

/// Everything the user can set across the four views
#[derive(Clone, Debug)]
pub struct Settings {
    pub inputs: MarketInputs,
    pub option_type: OptionType,
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min_pct: Option<f64>,
    pub vol_max_pct: Option<f64>,
    pub call_premium: Option<f64>,
    pub put_premium: Option<f64>,
    pub resolution: usize,
    pub payoff_points: usize,
    pub explain: bool,
    pub execution: ExecutionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            inputs: MarketInputs::default(),
            option_type: OptionType::Call,
            spot_min: None,
            spot_max: None,
            vol_min_pct: None,
            vol_max_pct: None,
            call_premium: None,
            put_premium: None,
            resolution: DEFAULT_RESOLUTION,
            payoff_points: DEFAULT_POINTS,
            explain: false,
            execution: ExecutionMode::Parallel,
        }
    }
}

impl Settings {
    /// Heatmap axes, falling back to the window around the current spot
    pub fn grid_spec(&self) -> GridSpec {
        let default = GridSpec::around(self.inputs.spot, self.resolution);
        GridSpec {
            spot_min: self.spot_min.unwrap_or(default.spot_min),
            spot_max: self.spot_max.unwrap_or(default.spot_max),
            vol_min: self.vol_min_pct.unwrap_or(VOL_MIN_PCT.default) / 100.0,
            vol_max: self.vol_max_pct.unwrap_or(VOL_MAX_PCT.default) / 100.0,
            resolution: self.resolution,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PriceReport {
    pub inputs: MarketInputs,
    pub option_type: OptionType,
    pub call_price: f64,
    pub put_price: f64,
    pub selected_price: f64,
    pub greeks: Greeks,
}

impl PriceReport {
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("option_type", self.option_type.to_string()),
            ("call_price", self.call_price.to_string()),
            ("put_price", self.put_price.to_string()),
            ("selected_price", self.selected_price.to_string()),
        ];
        rows.extend(
            self.greeks
                .entries()
                .iter()
                .map(|&(name, value)| (name, value.to_string())),
        );
        rows
    }
}

#[derive(Clone, Debug)]
pub enum ViewOutput {
    Pricer(PriceReport),
    Payoff(PayoffCurve),
    Sensitivity { call: Heatmap, put: Heatmap },
    Pnl { call: Heatmap, put: Heatmap },
}

/// Evaluate one view
pub fn run_view(mode: ViewMode, settings: &Settings) -> AppResult<ViewOutput> {
    tracing::info!(view = %mode, option_type = %settings.option_type, "running view");
    let call_params = settings.inputs.to_parameters(OptionType::Call)?;
    let put_params = call_params.with_option_type(OptionType::Put);

    match mode {
        ViewMode::OptionPricer => {
            let call_price = price(&call_params)?;
            let put_price = price(&put_params)?;
            let selected = call_params.with_option_type(settings.option_type);
            Ok(ViewOutput::Pricer(PriceReport {
                inputs: settings.inputs,
                option_type: settings.option_type,
                call_price,
                put_price,
                selected_price: match settings.option_type {
                    OptionType::Call => call_price,
                    OptionType::Put => put_price,
                },
                greeks: greeks(&selected)?,
            }))
        }
        ViewMode::PayoffDiagram => {
            let selected = call_params.with_option_type(settings.option_type);
            Ok(ViewOutput::Payoff(PayoffCurve::compute(
                &selected,
                settings.payoff_points,
            )?))
        }
        ViewMode::SensitivityAnalysis => {
            let spec = settings.grid_spec();
            Ok(ViewOutput::Sensitivity {
                call: Heatmap::values(&call_params, &spec, settings.execution)?,
                put: Heatmap::values(&put_params, &spec, settings.execution)?,
            })
        }
        ViewMode::PnlHeatmaps => {
            let spec = settings.grid_spec();
            let call_premium = match settings.call_premium {
                Some(p) => p,
                None => price(&call_params)?,
            };
            let put_premium = match settings.put_premium {
                Some(p) => p,
                None => price(&put_params)?,
            };
            Ok(ViewOutput::Pnl {
                call: Heatmap::pnl(&call_params, &spec, call_premium, settings.execution)?,
                put: Heatmap::pnl(&put_params, &spec, put_premium, settings.execution)?,
            })
        }
    }
}

impl ViewOutput {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewOutput::Pricer(_) => ViewMode::OptionPricer,
            ViewOutput::Payoff(_) => ViewMode::PayoffDiagram,
            ViewOutput::Sensitivity { .. } => ViewMode::SensitivityAnalysis,
            ViewOutput::Pnl { .. } => ViewMode::PnlHeatmaps,
        }
    }

    /// Human-readable console report with fixed decimal precision
    pub fn summary(&self, with_notes: bool) -> String {
        let mut out = format!("== {} ==\n", self.mode());
        match self {
            ViewOutput::Pricer(report) => {
                out.push_str(&format!(
                    "Call Price: ${:.2}\nPut Price: ${:.2}\nSelected ({}): {:.2}\n\nGreeks\n",
                    report.call_price, report.put_price, report.option_type, report.selected_price
                ));
                let labels = ["Delta", "Gamma", "Vega (per 1%)", "Theta (per day)", "Rho (per 1%)"];
                for (label, (_, value)) in labels.iter().zip(report.greeks.entries()) {
                    out.push_str(&format!("  {:<16} {:>10.4}\n", label, value));
                }
                if with_notes {
                    out.push('\n');
                    for note in explain::greek_notes(report.option_type, report.selected_price, &report.greeks) {
                        out.push_str(&note.render());
                        out.push('\n');
                    }
                    out.push_str("About Black-Scholes\n");
                    for line in explain::MODEL_ASSUMPTIONS {
                        out.push_str(&format!("  - {}\n", line));
                    }
                    out.push_str(explain::DISCLAIMER);
                    out.push('\n');
                }
            }
            ViewOutput::Payoff(curve) => {
                let (lo, hi) = curve.pnl_range();
                out.push_str(&format!(
                    "Long {} K={:.2} S={:.2}\nPremium: {:.2}\nBreakeven: {:.2}\nP&L range over [{:.2}, {:.2}]: [{:.2}, {:.2}]\n",
                    curve.option_type,
                    curve.strike,
                    curve.spot,
                    curve.premium,
                    curve.breakeven(),
                    curve.spots.first().copied().unwrap_or(0.0),
                    curve.spots.last().copied().unwrap_or(0.0),
                    lo,
                    hi
                ));
            }
            ViewOutput::Sensitivity { call, put } | ViewOutput::Pnl { call, put } => {
                for map in [call, put] {
                    let (lo, hi) = map.value_range();
                    out.push_str(&format!(
                        "{}: {}x{} grid, min {:.2}, max {:.2}",
                        map.title(),
                        map.vols.len(),
                        map.spots.len(),
                        lo,
                        hi
                    ));
                    if let Some(paid) = map.purchase_price {
                        out.push_str(&format!(", purchase price {:.2}", paid));
                    }
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Write the requested artifacts into `dir`, returning the paths written
    pub fn write_artifacts(&self, dir: &Path, formats: OutputFormats) -> AppResult<Vec<PathBuf>> {
        if formats.is_empty() {
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        let stem = self.mode().key();

        match self {
            ViewOutput::Pricer(report) => {
                if formats.contains(OutputFormats::CSV) {
                    let path = dir.join(format!("{}.csv", stem));
                    output::write_summary_to_csv(&path, &report.summary_rows())?;
                    written.push(path);
                }
                if formats.contains(OutputFormats::JSON) {
                    let path = dir.join(format!("{}.json", stem));
                    output::write_json(&path, report)?;
                    written.push(path);
                }
            }
            ViewOutput::Payoff(curve) => {
                if formats.contains(OutputFormats::CSV) {
                    let path = dir.join(format!("{}.csv", stem));
                    output::write_payoff_to_csv(&path, curve)?;
                    written.push(path);
                }
                if formats.contains(OutputFormats::SVG) {
                    let path = dir.join(format!("{}.svg", stem));
                    render::render_payoff(curve, &path)?;
                    written.push(path);
                }
                if formats.contains(OutputFormats::JSON) {
                    let path = dir.join(format!("{}.json", stem));
                    output::write_json(&path, curve)?;
                    written.push(path);
                }
            }
            ViewOutput::Sensitivity { call, put } | ViewOutput::Pnl { call, put } => {
                if formats.contains(OutputFormats::CSV) {
                    for map in [call, put] {
                        let path = dir.join(format!("{}_{}.csv", stem, map.option_type));
                        output::write_heatmap_to_csv(&path, map)?;
                        written.push(path);
                    }
                }
                if formats.contains(OutputFormats::SVG) {
                    let path = dir.join(format!("{}.svg", stem));
                    render::render_heatmap_pair(call, put, &path)?;
                    written.push(path);
                }
                if formats.contains(OutputFormats::JSON) {
                    tracing::warn!(view = %self.mode(), "json output is not available for heatmaps, skipping");
                }
            }
        }

        for path in &written {
            tracing::info!(path = %path.display(), "wrote artifact");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_round_trip_keys() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.key().parse::<ViewMode>().unwrap(), mode);
        }
        assert!("greeks".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::PnlHeatmaps.to_string(), "P&L Heatmaps");
    }

    #[test]
    fn test_pricer_view_selects_requested_type() {
        let settings = Settings {
            option_type: OptionType::Put,
            ..Default::default()
        };
        match run_view(ViewMode::OptionPricer, &settings).unwrap() {
            ViewOutput::Pricer(report) => {
                assert_eq!(report.selected_price, report.put_price);
                assert!(report.greeks.delta < 0.0);
                assert_eq!(report.summary_rows().len(), 9);
            }
            other => panic!("unexpected output {:?}", other.mode()),
        }
    }

    #[test]
    fn test_pnl_view_defaults_to_fair_premium() {
        let settings = Settings {
            resolution: 5,
            ..Default::default()
        };
        match run_view(ViewMode::PnlHeatmaps, &settings).unwrap() {
            ViewOutput::Pnl { call, put } => {
                // Centre cell sits at the current spot and 25% vol, above the 20% used for the premium
                assert!(call.values[[2, 2]] > 0.0);
                assert!(put.values[[2, 2]] > 0.0);
                // Lowest vol cell at the current spot is below fair value
                assert!(call.values[[0, 2]] < 0.0);
            }
            other => panic!("unexpected output {:?}", other.mode()),
        }
    }

    #[test]
    fn test_grid_spec_overrides() {
        let settings = Settings {
            spot_min: Some(80.0),
            vol_max_pct: Some(60.0),
            ..Default::default()
        };
        let spec = settings.grid_spec();
        assert_eq!(spec.spot_min, 80.0);
        assert!((spec.spot_max - 130.0).abs() < 1e-12);
        assert_eq!(spec.vol_max, 0.6);
        assert_eq!(spec.vol_min, 0.1);
    }

    #[test]
    fn test_summary_mentions_every_greek() {
        let output = run_view(ViewMode::OptionPricer, &Settings::default()).unwrap();
        let text = output.summary(true);
        for label in ["Delta", "Gamma", "Vega", "Theta", "Rho", "About Black-Scholes"] {
            assert!(text.contains(label), "missing {}", label);
        }
    }
}
