// demos/demo.rs
use bsm_pricer::analytics::bs_analytic::{greeks, price, OptionParameters, OptionType};
use bsm_pricer::dashboard::heatmap::{ExecutionMode, GridSpec, Heatmap};
use bsm_pricer::dashboard::payoff::PayoffCurve;
use bsm_pricer::math_utils::Timer;

fn main() {
    println!("Running bsm-pricer demo\n");

    let (s, k, t, r, sigma) = (100.0, 100.0, 1.0, 0.05, 0.20);

    for option_type in OptionType::ALL {
        let params = OptionParameters::new(s, k, t, r, sigma, option_type).expect("valid parameters");
        let value = price(&params).expect("valid parameters");
        let g = greeks(&params).expect("valid parameters");

        println!("--- European {} (S={}, K={}, T={}, r={}, sigma={}) ---", option_type, s, k, t, r, sigma);
        println!("  Price: {:.4}", value);
        for (name, v) in g.entries() {
            println!("  {:<6} {:>10.4}", name, v);
        }
        println!();
    }

    let call = OptionParameters::new(s, k, t, r, sigma, OptionType::Call).expect("valid parameters");
    let curve = PayoffCurve::compute(&call, 11).expect("valid curve");
    println!("Call P&L at expiry (premium {:.4}, breakeven {:.2}):", curve.premium, curve.breakeven());
    for (spot, pnl) in curve.points() {
        println!("  S_T = {:>6.1}  P&L = {:>8.4}", spot, pnl);
    }
    println!();

    let spec = GridSpec::around(s, 25);
    let mut timer = Timer::new();
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        timer.start();
        let map = Heatmap::values(&call, &spec, mode).expect("valid grid");
        let (lo, hi) = map.value_range();
        println!(
            "{:?} 25x25 heatmap: {:.3} ms, values in [{:.4}, {:.4}]",
            mode,
            timer.elapsed_ms(),
            lo,
            hi
        );
    }
}
