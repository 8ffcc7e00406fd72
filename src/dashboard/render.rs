// src/dashboard/render.rs
//! SVG charts for the payoff curve and the spot × volatility heatmaps.

use crate::dashboard::heatmap::Heatmap;
use crate::dashboard::payoff::PayoffCurve;
use crate::error::{AppError, AppResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const FONT: &str = "sans-serif";

// Sequential ramp for option values (dark blue → green → yellow)
const VALUE_STOPS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

// Diverging ramp for P&L (red → yellow → green), zero maps to the middle stop
const PNL_STOPS: [(u8, u8, u8); 5] = [
    (215, 48, 39),
    (252, 141, 89),
    (255, 255, 191),
    (145, 207, 96),
    (26, 152, 80),
];

fn render_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

/// Linear interpolation across evenly spaced colour stops, `t` in [0, 1]
pub fn ramp(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (stops.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - idx as f64;
    let (a, b) = (stops[idx], stops[idx + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Colour for one heatmap cell given the grid's value range
pub fn cell_colour(value: f64, lo: f64, hi: f64, pnl: bool) -> RGBColor {
    if pnl {
        let scale = lo.abs().max(hi.abs());
        let t = if scale > 0.0 { 0.5 + 0.5 * value / scale } else { 0.5 };
        ramp(&PNL_STOPS, t)
    } else {
        let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
        ramp(&VALUE_STOPS, t)
    }
}

/// P&L-at-expiry line with zero line, strike and spot markers
pub fn render_payoff(curve: &PayoffCurve, path: &Path) -> AppResult<()> {
    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let x_min = curve.spots.first().copied().unwrap_or(0.0);
    let x_max = curve.spots.last().copied().unwrap_or(1.0);
    let (lo, hi) = curve.pnl_range();
    let pad = ((hi - lo) * 0.05).max(1e-6);
    let (y_min, y_max) = (lo - pad, hi + pad);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Long {} payoff at expiry (premium {:.2}, breakeven {:.2})",
                curve.option_type,
                curve.premium,
                curve.breakeven()
            ),
            (FONT, 22),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Stock Price at Expiration")
        .y_desc("Profit / Loss")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(curve.points(), BLUE.stroke_width(2)))
        .map_err(render_err)?
        .label("P&L")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            vec![(curve.strike, y_min), (curve.strike, y_max)],
            &RED,
        ))
        .map_err(render_err)?
        .label("Strike")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .draw_series(LineSeries::new(
            vec![(curve.spot, y_min), (curve.spot, y_max)],
            &CYAN,
        ))
        .map_err(render_err)?
        .label("Spot")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &CYAN));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Call and put grids side by side
pub fn render_heatmap_pair(call: &Heatmap, put: &Heatmap, path: &Path) -> AppResult<()> {
    let root = SVGBackend::new(path, (1600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let panels = root.split_evenly((1, 2));
    for (panel, map) in panels.iter().zip([call, put]) {
        draw_heatmap(panel, map)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_heatmap(area: &DrawingArea<SVGBackend<'_>, Shift>, map: &Heatmap) -> AppResult<()> {
    let n_spot = map.spots.len();
    let n_vol = map.vols.len();
    if n_spot < 2 || n_vol < 2 {
        return Err(AppError::Grid(format!(
            "cannot draw a {}x{} grid",
            n_vol, n_spot
        )));
    }

    // Cell widths; axes are evenly spaced
    let dx = (map.spots[n_spot - 1] - map.spots[0]) / (n_spot - 1) as f64;
    let dv = (map.vols[n_vol - 1] - map.vols[0]) * 100.0 / (n_vol - 1) as f64;
    let (lo, hi) = map.value_range();

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} [{:.2}, {:.2}]", map.title(), lo, hi),
            (FONT, 20),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (map.spots[0] - dx / 2.0)..(map.spots[n_spot - 1] + dx / 2.0),
            (map.vols[0] * 100.0 - dv / 2.0)..(map.vols[n_vol - 1] * 100.0 + dv / 2.0),
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Spot Price")
        .y_desc("Volatility (%)")
        .draw()
        .map_err(render_err)?;

    let pnl = map.is_pnl();
    chart
        .draw_series(map.values.indexed_iter().map(|((i, j), &value)| {
            let s = map.spots[j];
            let v = map.vols[i] * 100.0;
            Rectangle::new(
                [(s - dx / 2.0, v - dv / 2.0), (s + dx / 2.0, v + dv / 2.0)],
                cell_colour(value, lo, hi, pnl).filled(),
            )
        }))
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(ramp(&VALUE_STOPS, 0.0), RGBColor(68, 1, 84));
        assert_eq!(ramp(&VALUE_STOPS, 1.0), RGBColor(253, 231, 37));
        assert_eq!(ramp(&VALUE_STOPS, 2.0), RGBColor(253, 231, 37));
        assert_eq!(ramp(&VALUE_STOPS, f64::NAN), RGBColor(33, 145, 140));
    }

    #[test]
    fn test_pnl_zero_is_neutral() {
        assert_eq!(cell_colour(0.0, -5.0, 20.0, true), RGBColor(255, 255, 191));
        assert_eq!(cell_colour(-20.0, -5.0, 20.0, true), RGBColor(215, 48, 39));
        assert_eq!(cell_colour(20.0, -5.0, 20.0, true), RGBColor(26, 152, 80));
    }

    #[test]
    fn test_flat_grid_uses_mid_colour() {
        assert_eq!(cell_colour(3.0, 3.0, 3.0, false), RGBColor(33, 145, 140));
    }
}
