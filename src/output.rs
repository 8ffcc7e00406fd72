// src/output.rs
use crate::dashboard::heatmap::Heatmap;
use crate::dashboard::payoff::PayoffCurve;
use crate::error::{AppError, AppResult};
use bitflags::bitflags;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

bitflags! {
    /// Artifacts a view writes to the output directory
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutputFormats: u32 {
        const NONE = 0;
        const CSV  = 1 << 0;
        const SVG  = 1 << 1;
        const JSON = 1 << 2;
    }
}

impl OutputFormats {
    /// Parse a comma separated list such as `csv,svg`. `none` or an empty
    /// string selects nothing.
    pub fn parse_list(list: &str) -> AppResult<Self> {
        let mut formats = OutputFormats::NONE;
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            formats |= match item.to_ascii_lowercase().as_str() {
                "csv" => OutputFormats::CSV,
                "svg" => OutputFormats::SVG,
                "json" => OutputFormats::JSON,
                "none" => OutputFormats::NONE,
                other => {
                    return Err(AppError::InvalidInput {
                        field: "formats".to_string(),
                        reason: format!("unknown output format '{}' (expected csv, svg, json)", other),
                    })
                }
            };
        }
        Ok(formats)
    }
}

impl Default for OutputFormats {
    fn default() -> Self {
        OutputFormats::CSV | OutputFormats::SVG
    }
}

pub fn write_payoff_to_csv(path: &Path, curve: &PayoffCurve) -> AppResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "spot,payoff,pnl")?;
    for ((s, payoff), pnl) in curve.spots.iter().zip(&curve.payoff).zip(&curve.pnl) {
        writeln!(file, "{},{},{}", s, payoff, pnl)?;
    }
    file.flush()?;
    Ok(())
}

/// Header row holds the spot axis; each following row starts with its volatility.
pub fn write_heatmap_to_csv(path: &Path, map: &Heatmap) -> AppResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let header: Vec<String> = map.spots.iter().map(|s| s.to_string()).collect();
    writeln!(file, "vol\\spot,{}", header.join(","))?;
    for (vol, row) in map.vols.iter().zip(map.values.rows()) {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(file, "{},{}", vol, cells.join(","))?;
    }
    file.flush()?;
    Ok(())
}

pub fn write_summary_to_csv(path: &Path, summary_data: &[(&str, String)]) -> AppResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "key,value")?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    file.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
