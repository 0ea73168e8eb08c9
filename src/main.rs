use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tsctl::cli::{Arguments, ExitStatus};

/// Environment variable holding a tracing filter, e.g. `TSCTL_LOG=tsctl=trace`.
const LOG_ENV: &str = "TSCTL_LOG";

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match tsctl::cli::run_cli(args) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
