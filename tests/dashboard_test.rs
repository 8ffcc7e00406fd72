// tests/dashboard_test.rs
use bsm_pricer::analytics::{price, OptionType};
use bsm_pricer::cli::{CliArgs, Command};
use bsm_pricer::config::AppConfig;
use bsm_pricer::dashboard::heatmap::{ExecutionMode, GridSpec, Heatmap};
use bsm_pricer::dashboard::{run_view, Settings, ViewMode, ViewOutput};
use bsm_pricer::output::OutputFormats;

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("bsm-dashboard-{}-{}", std::process::id(), name));
    std::fs::remove_dir_all(&dir).ok();
    dir
}

#[test]
fn test_parallel_and_sequential_heatmaps_are_identical() {
    let settings = Settings::default();
    let base = settings.inputs.to_parameters(OptionType::Call).unwrap();
    let spec = GridSpec::around(base.spot, 25);

    let parallel = Heatmap::values(&base, &spec, ExecutionMode::Parallel).unwrap();
    let sequential = Heatmap::values(&base, &spec, ExecutionMode::Sequential).unwrap();

    assert_eq!(parallel.values.dim(), (25, 25));
    assert_eq!(parallel.values, sequential.values);
}

#[test]
fn test_sensitivity_view_grid_shape_and_monotonicity() {
    let output = run_view(ViewMode::SensitivityAnalysis, &Settings::default()).unwrap();
    let (call, put) = match output {
        ViewOutput::Sensitivity { call, put } => (call, put),
        _ => panic!("expected sensitivity output"),
    };
    assert_eq!(call.values.dim(), (25, 25));
    assert!(!call.is_pnl() && !put.is_pnl());

    // Calls gain and puts lose value as spot rises along a row
    for row in 0..25 {
        for col in 1..25 {
            assert!(call.values[[row, col]] > call.values[[row, col - 1]]);
            assert!(put.values[[row, col]] < put.values[[row, col - 1]]);
        }
    }
}

#[test]
fn test_pnl_view_uses_supplied_purchase_prices() {
    let settings = Settings {
        call_premium: Some(15.0),
        put_premium: Some(1.0),
        resolution: 9,
        ..Default::default()
    };
    let output = run_view(ViewMode::PnlHeatmaps, &settings).unwrap();
    let (call, put) = match output {
        ViewOutput::Pnl { call, put } => (call, put),
        _ => panic!("expected P&L output"),
    };
    assert_eq!(call.purchase_price, Some(15.0));
    assert_eq!(put.purchase_price, Some(1.0));

    let cell_params = settings
        .inputs
        .to_parameters(OptionType::Put)
        .unwrap()
        .with_spot(put.spots[4])
        .with_volatility(put.vols[6]);
    assert_eq!(put.values[[6, 4]], price(&cell_params).unwrap() - 1.0);
}

#[test]
fn test_payoff_view_from_command_line() {
    let args = match CliArgs::parse(["payoff", "--type", "put", "--strike", "110", "--points", "201"]).unwrap() {
        Command::Run(args) => args,
        Command::Help => panic!("unexpected help"),
    };
    let settings = args.settings(&AppConfig::default());
    let output = run_view(args.view(), &settings).unwrap();
    match &output {
        ViewOutput::Payoff(curve) => {
            assert_eq!(curve.spots.len(), 201);
            assert_eq!(curve.option_type, OptionType::Put);
            // Midpoint is the current spot, 10 below the strike
            assert!((curve.payoff[100] - 10.0).abs() < 1e-9);
        }
        _ => panic!("expected payoff output"),
    }
    assert!(output.summary(false).contains("Breakeven"));
}

#[test]
fn test_out_of_range_controls_fail_without_output() {
    let mut settings = Settings::default();
    settings.inputs.rate_pct = 25.0;
    for mode in ViewMode::ALL {
        assert!(run_view(mode, &settings).is_err(), "{} accepted a 25% rate", mode);
    }
}

#[test]
fn test_artifacts_written_for_requested_formats() {
    let dir = scratch_dir("artifacts");

    let pricer = run_view(ViewMode::OptionPricer, &Settings::default()).unwrap();
    let written = pricer
        .write_artifacts(&dir, OutputFormats::CSV | OutputFormats::JSON)
        .unwrap();
    assert_eq!(written.len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("pricer.json")).unwrap()).unwrap();
    assert_eq!(json["option_type"], "call");
    assert!((json["greeks"]["delta"].as_f64().unwrap() - 0.6368).abs() < 1e-4);

    let settings = Settings {
        resolution: 4,
        ..Default::default()
    };
    let grids = run_view(ViewMode::SensitivityAnalysis, &settings).unwrap();
    let written = grids.write_artifacts(&dir, OutputFormats::CSV).unwrap();
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["sensitivity_call.csv", "sensitivity_put.csv"]);

    assert!(grids.write_artifacts(&dir, OutputFormats::NONE).unwrap().is_empty());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_svg_charts_for_payoff_and_pnl_views() {
    let dir = scratch_dir("svg");
    let settings = Settings {
        resolution: 6,
        payoff_points: 50,
        ..Default::default()
    };

    for (mode, file) in [(ViewMode::PayoffDiagram, "payoff.svg"), (ViewMode::PnlHeatmaps, "pnl.svg")] {
        let output = run_view(mode, &settings).unwrap();
        let written = output.write_artifacts(&dir, OutputFormats::SVG).unwrap();
        assert_eq!(written, vec![dir.join(file)]);

        let svg = std::fs::read_to_string(dir.join(file)).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG document", file);
    }
    std::fs::remove_dir_all(&dir).ok();
}
