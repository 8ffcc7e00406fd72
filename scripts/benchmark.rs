// scripts/benchmark.rs
use bsm_pricer::analytics::bs_analytic::{greeks, price, OptionParameters, OptionType};
use bsm_pricer::dashboard::heatmap::{ExecutionMode, GridSpec, Heatmap};
use bsm_pricer::math_utils::Timer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal};
use std::env;
use std::fs::File;
use std::io::{self, Write};

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: std::process::Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    /// Mean value, or a check statistic for grid runs
    value: f64,
    /// Largest put-call parity residual seen, where measured
    parity_error: Option<f64>,
}

/// Random valid inputs: log-normal spot around 100, strikes within ±50%
fn sample_parameters(n: usize, seed: u64) -> Vec<OptionParameters> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spot_dist = match LogNormal::new(100f64.ln(), 0.3) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("invalid spot distribution: {}", e);
            return Vec::new();
        }
    };

    (0..n)
        .filter_map(|_| {
            let spot = spot_dist.sample(&mut rng);
            OptionParameters::new(
                spot,
                spot * rng.gen_range(0.5..1.5),
                rng.gen_range(0.01..10.0),
                rng.gen_range(0.0..0.20),
                rng.gen_range(0.01..1.5),
                if rng.gen_bool(0.5) { OptionType::Call } else { OptionType::Put },
            )
            .ok()
        })
        .collect()
}

fn run_engine_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();

    for &n in &[10_000, 100_000, 1_000_000] {
        println!("Running engine benchmarks with {} parameter sets...", n);
        let inputs = sample_parameters(n, 42);

        let mut timer = Timer::new();
        timer.start();
        let mut total = 0.0;
        let mut max_parity = 0.0f64;
        for p in &inputs {
            let value = price(p).unwrap_or(f64::NAN);
            total += value;
            if n == 10_000 {
                let call = price(&p.with_option_type(OptionType::Call)).unwrap_or(f64::NAN);
                let put = price(&p.with_option_type(OptionType::Put)).unwrap_or(f64::NAN);
                let residual = ((call - put) - (p.spot - p.discounted_strike())).abs() / p.spot.max(p.strike);
                max_parity = max_parity.max(residual);
            }
        }
        let time_ms = timer.elapsed_ms();
        results.push(BenchmarkResult {
            name: format!("price ({}k sets)", n / 1000),
            evaluations: inputs.len(),
            time_ms,
            throughput_per_sec: inputs.len() as f64 / (time_ms / 1000.0),
            value: total / inputs.len() as f64,
            parity_error: if n == 10_000 { Some(max_parity) } else { None },
        });

        timer.start();
        let mut delta_sum = 0.0;
        for p in &inputs {
            delta_sum += greeks(p).map(|g| g.delta).unwrap_or(f64::NAN);
        }
        let time_ms = timer.elapsed_ms();
        results.push(BenchmarkResult {
            name: format!("greeks ({}k sets)", n / 1000),
            evaluations: inputs.len(),
            time_ms,
            throughput_per_sec: inputs.len() as f64 / (time_ms / 1000.0),
            value: delta_sum / inputs.len() as f64,
            parity_error: None,
        });
    }

    results
}

fn run_heatmap_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let base = match OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return results;
        }
    };

    for &resolution in &[25, 100, 400] {
        let spec = GridSpec::around(base.spot, resolution);
        for (mode, label) in [
            (ExecutionMode::Sequential, "sequential"),
            (ExecutionMode::Parallel, "parallel"),
        ] {
            println!("Benchmarking {}x{} heatmap ({})...", resolution, resolution, label);
            let mut timer = Timer::new();
            timer.start();
            let map = match Heatmap::values(&base, &spec, mode) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("heatmap failed: {}", e);
                    continue;
                }
            };
            let time_ms = timer.elapsed_ms();
            let cells = resolution * resolution;
            let (_, hi) = map.value_range();
            results.push(BenchmarkResult {
                name: format!("heatmap {}x{} {}", resolution, resolution, label),
                evaluations: cells,
                time_ms,
                throughput_per_sec: cells as f64 / (time_ms / 1000.0),
                value: hi,
                parity_error: None,
            });
        }
    }

    results
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;
    writeln!(file, "Benchmark,Evaluations,Time_ms,Throughput_per_sec,Value,Parity_Error")?;

    for result in results {
        writeln!(
            file,
            "{},{},{:.3},{:.0},{:.6},{}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_per_sec,
            result.value,
            result
                .parity_error
                .map(|e| format!("{:e}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }
    Ok(())
}

fn main() {
    println!("bsm-pricer Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut all_results = run_engine_benchmarks();
    println!();
    all_results.extend(run_heatmap_benchmarks());

    println!("\n{:=<90}", "");
    println!(
        "{:<32} {:>10} {:>12} {:>16} {:>10} {:>12}",
        "Benchmark", "Evals", "Time (ms)", "Throughput/s", "Value", "Parity"
    );
    println!("{:-<90}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>10} {:>12.3} {:>16.0} {:>10.4} {:>12}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_per_sec,
            result.value,
            result
                .parity_error
                .map(|e| format!("{:.1e}", e))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }
    println!("{:=<90}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nCould not write {}: {}", filename, e),
    }
    println!("Run with: cargo run --bin benchmark --release");
}
