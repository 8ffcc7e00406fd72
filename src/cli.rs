// src/cli.rs
//! Argument parsing for the `bsm` binary.
//!
//! ```text
//! bsm <pricer|payoff|sensitivity|pnl> [--flag value]...
//! ```

use crate::analytics::OptionType;
use crate::config::{AppConfig, MAX_PAYOFF_POINTS, MAX_RESOLUTION};
use crate::dashboard::heatmap::ExecutionMode;
use crate::dashboard::{Settings, ViewMode};
use crate::error::{AppError, AppResult};
use crate::output::OutputFormats;
use std::path::PathBuf;

pub const USAGE: &str = "\
Black-Scholes option pricer

USAGE:
    bsm <VIEW> [OPTIONS]

VIEWS:
    pricer        Call/put price and Greeks (default)
    payoff        P&L at expiry over [0.5*S, 1.5*S]
    sensitivity   Call/put value heatmaps over spot x volatility
    pnl           Call/put P&L heatmaps against purchase prices

MARKET INPUTS:
    --spot <S>            Current stock price          [1, 1e6]    (100)
    --strike <K>          Strike price                 [1, 1e6]    (100)
    --expiry <T>          Time to expiry in years      [0.01, 10]  (1)
    --rate <PCT>          Risk-free rate in percent    [0, 20]     (5)
    --vol <PCT>           Volatility in percent        [1, 150]    (20)
    --type <call|put>     Option type                              (call)

HEATMAPS:
    --spot-min <S>        Lowest spot on the grid      (0.7*S)
    --spot-max <S>        Highest spot on the grid     (1.3*S)
    --vol-min <PCT>       Lowest volatility            [1, 100]    (10)
    --vol-max <PCT>       Highest volatility           [1, 150]    (40)
    --call-premium <P>    Call purchase price          (fair value)
    --put-premium <P>     Put purchase price           (fair value)
    --resolution <N>      Grid points per axis         (25)
    --sequential          Evaluate grid cells on one thread

OUTPUT:
    --points <N>          Points on the payoff curve   (300)
    --explain             Describe each Greek with a worked example
    --out <DIR>           Output directory             (output)
    --formats <LIST>      Any of csv,svg,json or none  (csv,svg)
    --json                Add json to the output formats
    -h, --help            Print this help
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

/// Flags as given; `None` means fall back to config or control defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub view: Option<ViewMode>,
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub expiry: Option<f64>,
    pub rate_pct: Option<f64>,
    pub vol_pct: Option<f64>,
    pub option_type: Option<OptionType>,
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min_pct: Option<f64>,
    pub vol_max_pct: Option<f64>,
    pub call_premium: Option<f64>,
    pub put_premium: Option<f64>,
    pub resolution: Option<usize>,
    pub points: Option<usize>,
    pub explain: bool,
    pub sequential: bool,
    pub out: Option<PathBuf>,
    pub formats: Option<OutputFormats>,
    pub json: bool,
}

fn invalid(field: &str, reason: impl Into<String>) -> AppError {
    AppError::InvalidInput {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn parse_f64(flag: &str, raw: &str) -> AppResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(flag, format!("expected a number, got '{}'", raw)))?;
    if !value.is_finite() {
        return Err(invalid(flag, format!("expected a finite number, got '{}'", raw)));
    }
    Ok(value)
}

fn parse_usize(flag: &str, raw: &str, min: usize, max: usize) -> AppResult<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| invalid(flag, format!("expected a whole number, got '{}'", raw)))?;
    if value < min || value > max {
        return Err(invalid(flag, format!("must be in [{}, {}], got {}", min, max, value)));
    }
    Ok(value)
}

impl CliArgs {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> AppResult<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--explain" => parsed.explain = true,
                "--sequential" => parsed.sequential = true,
                "--json" => parsed.json = true,
                flag if flag.starts_with("--") => {
                    let name = &flag[2..];
                    let value = iter
                        .next()
                        .ok_or_else(|| invalid(name, "missing value"))?;
                    parsed.set(name, &value)?;
                }
                view => {
                    if parsed.view.is_some() {
                        return Err(invalid("view", format!("unexpected argument '{}'", view)));
                    }
                    parsed.view = Some(view.parse()?);
                }
            }
        }
        Ok(Command::Run(parsed))
    }

    fn set(&mut self, name: &str, value: &str) -> AppResult<()> {
        match name {
            "spot" => self.spot = Some(parse_f64(name, value)?),
            "strike" => self.strike = Some(parse_f64(name, value)?),
            "expiry" => self.expiry = Some(parse_f64(name, value)?),
            "rate" => self.rate_pct = Some(parse_f64(name, value)?),
            "vol" => self.vol_pct = Some(parse_f64(name, value)?),
            "type" => self.option_type = Some(value.parse()?),
            "spot-min" => self.spot_min = Some(parse_f64(name, value)?),
            "spot-max" => self.spot_max = Some(parse_f64(name, value)?),
            "vol-min" => self.vol_min_pct = Some(parse_f64(name, value)?),
            "vol-max" => self.vol_max_pct = Some(parse_f64(name, value)?),
            "call-premium" => self.call_premium = Some(parse_f64(name, value)?),
            "put-premium" => self.put_premium = Some(parse_f64(name, value)?),
            "resolution" => self.resolution = Some(parse_usize(name, value, 2, MAX_RESOLUTION)?),
            "points" => self.points = Some(parse_usize(name, value, 2, MAX_PAYOFF_POINTS)?),
            "out" => self.out = Some(PathBuf::from(value)),
            "formats" => self.formats = Some(OutputFormats::parse_list(value)?),
            other => return Err(invalid(other, "unknown option, see --help")),
        }
        Ok(())
    }

    pub fn view(&self) -> ViewMode {
        self.view.unwrap_or(ViewMode::OptionPricer)
    }

    /// Merge flags over config and control defaults
    pub fn settings(&self, config: &AppConfig) -> Settings {
        let mut settings = Settings {
            resolution: self.resolution.unwrap_or(config.heatmap_resolution),
            payoff_points: self.points.unwrap_or(config.payoff_points),
            spot_min: self.spot_min,
            spot_max: self.spot_max,
            vol_min_pct: self.vol_min_pct,
            vol_max_pct: self.vol_max_pct,
            call_premium: self.call_premium,
            put_premium: self.put_premium,
            explain: self.explain,
            execution: if self.sequential {
                ExecutionMode::Sequential
            } else {
                ExecutionMode::Parallel
            },
            ..Settings::default()
        };
        let inputs = &mut settings.inputs;
        if let Some(v) = self.spot {
            inputs.spot = v;
        }
        if let Some(v) = self.strike {
            inputs.strike = v;
        }
        if let Some(v) = self.expiry {
            inputs.time_to_expiry = v;
        }
        if let Some(v) = self.rate_pct {
            inputs.rate_pct = v;
        }
        if let Some(v) = self.vol_pct {
            inputs.volatility_pct = v;
        }
        if let Some(t) = self.option_type {
            settings.option_type = t;
        }
        settings
    }

    pub fn output_dir(&self, config: &AppConfig) -> PathBuf {
        self.out.clone().unwrap_or_else(|| config.output_dir.clone())
    }

    pub fn formats(&self, config: &AppConfig) -> OutputFormats {
        let base = self.formats.unwrap_or(config.formats);
        if self.json {
            base | OutputFormats::JSON
        } else {
            base
        }
    }
}
