// src/config.rs
use crate::dashboard::heatmap::DEFAULT_RESOLUTION;
use crate::dashboard::payoff::DEFAULT_POINTS;
use crate::error::{AppError, AppResult};
use crate::output::OutputFormats;
use std::path::PathBuf;

/// Largest accepted grid edge; 25 is the usual size
pub const MAX_RESOLUTION: usize = 500;
pub const MAX_PAYOFF_POINTS: usize = 100_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub heatmap_resolution: usize,
    pub payoff_points: usize,
    pub formats: OutputFormats,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            output_dir: PathBuf::from("output"),
            heatmap_resolution: DEFAULT_RESOLUTION,
            payoff_points: DEFAULT_POINTS,
            formats: OutputFormats::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `BSM_*` variables, loading a `.env` file first if one exists
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let heatmap_resolution = match lookup("BSM_HEATMAP_RESOLUTION") {
            Some(raw) => parse_count("BSM_HEATMAP_RESOLUTION", &raw, 2, MAX_RESOLUTION)?,
            None => defaults.heatmap_resolution,
        };

        let payoff_points = match lookup("BSM_PAYOFF_POINTS") {
            Some(raw) => parse_count("BSM_PAYOFF_POINTS", &raw, 2, MAX_PAYOFF_POINTS)?,
            None => defaults.payoff_points,
        };

        let formats = match lookup("BSM_OUTPUT_FORMATS") {
            Some(raw) => OutputFormats::parse_list(&raw)
                .map_err(|e| AppError::Config(format!("BSM_OUTPUT_FORMATS: {e}")))?,
            None => defaults.formats,
        };

        Ok(Self {
            output_dir: lookup("BSM_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            heatmap_resolution,
            payoff_points,
            formats,
            log_filter: lookup("BSM_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_count(key: &str, raw: &str, min: usize, max: usize) -> AppResult<usize> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("{key}: {e}")))?;
    if value < min || value > max {
        return Err(AppError::Config(format!(
            "{key}: must be in [{min}, {max}], got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.heatmap_resolution, 25);
        assert_eq!(cfg.payoff_points, 300);
        assert_eq!(cfg.output_dir, PathBuf::from("output"));
        assert_eq!(cfg.formats, OutputFormats::CSV | OutputFormats::SVG);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("BSM_HEATMAP_RESOLUTION", "40"),
            ("BSM_OUTPUT_DIR", "/tmp/bsm"),
            ("BSM_OUTPUT_FORMATS", "json"),
            ("BSM_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.heatmap_resolution, 40);
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/bsm"));
        assert_eq!(cfg.formats, OutputFormats::JSON);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        for (key, value) in [
            ("BSM_HEATMAP_RESOLUTION", "abc"),
            ("BSM_HEATMAP_RESOLUTION", "1"),
            ("BSM_PAYOFF_POINTS", "0"),
            ("BSM_OUTPUT_FORMATS", "gif"),
        ] {
            let err = AppConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{key}={value}");
        }
    }
}
