use bsm_pricer::cli::{CliArgs, Command, USAGE};
use bsm_pricer::config::AppConfig;
use bsm_pricer::dashboard::run_view;
use bsm_pricer::error::AppResult;

fn main() {
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e}");
            std::process::exit(2);
        }
    };

    // Structured logging to stderr; RUST_LOG takes precedence over BSM_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("\n{USAGE}");
            std::process::exit(2);
        }
    };

    let args = match command {
        Command::Help => {
            println!("{USAGE}");
            return;
        }
        Command::Run(args) => args,
    };

    if let Err(e) = run(&args, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs, config: &AppConfig) -> AppResult<()> {
    let settings = args.settings(config);
    let output = run_view(args.view(), &settings)?;
    println!("{}", output.summary(settings.explain));

    let written = output.write_artifacts(&args.output_dir(config), args.formats(config))?;
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
