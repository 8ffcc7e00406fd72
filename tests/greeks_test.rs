// tests/greeks_test.rs
use bsm_pricer::analytics::bs_analytic::{self, OptionParameters, OptionType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reference(option_type: OptionType) -> OptionParameters {
    OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.20, option_type).expect("valid parameters")
}

fn random_params(rng: &mut StdRng, option_type: OptionType) -> OptionParameters {
    OptionParameters::new(
        rng.gen_range(20.0..300.0),
        rng.gen_range(20.0..300.0),
        rng.gen_range(0.02..5.0),
        rng.gen_range(0.0..0.15),
        rng.gen_range(0.05..1.2),
        option_type,
    )
    .expect("sampled parameters are valid")
}

#[test]
fn test_reference_greeks() {
    let g = bs_analytic::greeks(&reference(OptionType::Call)).unwrap();

    let expected = [
        ("delta", g.delta, 0.636_830_651_175_619),
        ("gamma", g.gamma, 0.018_762_017_345_847),
        ("vega", g.vega, 0.375_240_346_916_938),
        ("theta", g.theta, -0.017_572_678_209_419),
        ("rho", g.rho, 0.532_324_815_454_631),
    ];

    for (name, value, target) in expected {
        let rel_error = ((value - target) / target).abs();
        println!("{}: {} (expected {}, rel error {:e})", name, value, target, rel_error);
        assert!(rel_error < 1e-7, "Relative error for {} exceeds tolerance: {}", name, rel_error);
    }

    // Four-decimal display values
    assert_eq!(format!("{:.4}", g.delta), "0.6368");
    assert_eq!(format!("{:.4}", g.gamma), "0.0188");
    assert_eq!(format!("{:.4}", g.vega), "0.3752");
    assert_eq!(format!("{:.4}", g.theta), "-0.0176");
    assert_eq!(format!("{:.4}", g.rho), "0.5323");
}

#[test]
fn test_delta_bounds_and_non_negative_convexity() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2_000 {
        let call = random_params(&mut rng, OptionType::Call);
        let put = call.with_option_type(OptionType::Put);
        let gc = bs_analytic::greeks(&call).unwrap();
        let gp = bs_analytic::greeks(&put).unwrap();

        assert!((0.0..=1.0).contains(&gc.delta), "call delta {} for {:?}", gc.delta, call);
        assert!((-1.0..=0.0).contains(&gp.delta), "put delta {} for {:?}", gp.delta, put);
        assert!(gc.gamma >= 0.0 && gc.vega >= 0.0);
        assert!(gp.gamma >= 0.0 && gp.vega >= 0.0);
    }
}

#[test]
fn test_gamma_and_vega_identical_for_call_and_put() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let call = random_params(&mut rng, OptionType::Call);
        let gc = bs_analytic::greeks(&call).unwrap();
        let gp = bs_analytic::greeks(&call.with_option_type(OptionType::Put)).unwrap();
        assert_eq!(gc.gamma, gp.gamma);
        assert_eq!(gc.vega, gp.vega);
        // Φ(d1) - 1 for the put
        assert!((gc.delta - gp.delta - 1.0).abs() < 1e-15);
    }
}

#[test]
fn test_delta_matches_central_difference() {
    let mut rng = StdRng::seed_from_u64(2024);
    for option_type in OptionType::ALL {
        for _ in 0..200 {
            let p = random_params(&mut rng, option_type);
            let h = 1e-4 * p.spot;
            let up = bs_analytic::price(&p.with_spot(p.spot + h)).unwrap();
            let down = bs_analytic::price(&p.with_spot(p.spot - h)).unwrap();
            let fd_delta = (up - down) / (2.0 * h);
            let delta = bs_analytic::greeks(&p).unwrap().delta;

            assert!(
                (fd_delta - delta).abs() < 1e-3,
                "FD delta {} vs analytic {} for {:?}",
                fd_delta,
                delta,
                p
            );
        }
    }
}

#[test]
fn test_scaled_greeks_match_finite_differences() {
    // Vega and Rho per 1 percentage-point, Theta per calendar day
    for option_type in OptionType::ALL {
        let p = reference(option_type);
        let g = bs_analytic::greeks(&p).unwrap();
        let price = |q: &OptionParameters| bs_analytic::price(q).unwrap();

        let h = 1e-5;
        let vega_fd = (price(&p.with_volatility(p.volatility + h))
            - price(&p.with_volatility(p.volatility - h)))
            / (2.0 * h)
            / 100.0;

        let mut up = p;
        up.risk_free_rate += h;
        let mut down = p;
        down.risk_free_rate -= h;
        let rho_fd = (price(&up) - price(&down)) / (2.0 * h) / 100.0;

        // Theta is -∂V/∂T
        let mut longer = p;
        longer.time_to_expiry += h;
        let mut shorter = p;
        shorter.time_to_expiry -= h;
        let theta_fd = -(price(&longer) - price(&shorter)) / (2.0 * h) / 365.0;

        println!("\n{} vega {} vs {}", option_type, g.vega, vega_fd);
        println!("{} rho {} vs {}", option_type, g.rho, rho_fd);
        println!("{} theta {} vs {}", option_type, g.theta, theta_fd);

        assert!((g.vega - vega_fd).abs() < 1e-6);
        assert!((g.rho - rho_fd).abs() < 1e-6);
        assert!((g.theta - theta_fd).abs() < 1e-7);
    }
}

#[test]
fn test_gamma_matches_delta_difference() {
    let p = reference(OptionType::Call);
    let h = 1e-3;
    let delta = |s: f64| bs_analytic::greeks(&p.with_spot(s)).unwrap().delta;
    let gamma_fd = (delta(p.spot + h) - delta(p.spot - h)) / (2.0 * h);
    let gamma = bs_analytic::greeks(&p).unwrap().gamma;
    let rel_error = ((gamma_fd - gamma) / gamma).abs();
    assert!(rel_error < 1e-6, "Relative error for Gamma exceeds tolerance: {}", rel_error);
}

#[test]
fn test_greeks_reject_invalid_inputs() {
    let err = bs_analytic::bs_greeks(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Put).unwrap_err();
    assert!(err.to_string().contains("time_to_expiry"));
}
