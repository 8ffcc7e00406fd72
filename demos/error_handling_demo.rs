// demos/error_handling_demo.rs
use bsm_pricer::analytics::bs_analytic::{bs_price, OptionParameters, OptionType};
use bsm_pricer::dashboard::controls::MarketInputs;
use bsm_pricer::dashboard::heatmap::{ExecutionMode, GridSpec, Heatmap};
use bsm_pricer::error::{AppError, PricingError};

fn main() {
    println!("Error Handling Demo for bsm-pricer");
    println!("==================================\n");

    println!("1. Testing zero spot price...");
    match bs_price(0.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n2. Testing negative strike...");
    match bs_price(100.0, -5.0, 1.0, 0.05, 0.2, OptionType::Put) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n3. Testing zero time to expiry and zero volatility...");
    for (t, sigma) in [(0.0, 0.2), (1.0, 0.0)] {
        match OptionParameters::new(100.0, 100.0, t, 0.05, sigma, OptionType::Call) {
            Ok(_) => println!("   Unexpected: Should have failed!"),
            Err(e) => println!("   ✓ Caught error: {}", e),
        }
    }

    println!("\n4. Testing unknown option type...");
    match "straddle".parse::<OptionType>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(PricingError::InvalidParameter { parameter, reason }) => {
            println!("   ✓ Caught InvalidParameter: {} ({})", parameter, reason);
        }
    }

    println!("\n5. Testing out-of-range dashboard control...");
    let inputs = MarketInputs {
        volatility_pct: 200.0,
        ..Default::default()
    };
    match inputs.to_parameters(OptionType::Call) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(AppError::InvalidInput { field, reason }) => {
            println!("   ✓ Caught InvalidInput: {} ({})", field, reason);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n6. Testing inverted heatmap axis...");
    let base = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).expect("valid parameters");
    let spec = GridSpec {
        spot_min: 130.0,
        spot_max: 70.0,
        ..GridSpec::around(100.0, 25)
    };
    match Heatmap::values(&base, &spec, ExecutionMode::Parallel) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n7. Testing valid configuration...");
    match bs_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call) {
        Ok(price) => println!("   ✓ Success: Price = {:.4}", price),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    println!("\n✓ Error handling demo complete!");
}
