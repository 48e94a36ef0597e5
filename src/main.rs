use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use qr_compare_rs::logging::init_logging;
use qr_compare_rs::prelude::*;

fn try_main(config: &Config) -> Result<()> {
    // Set up rayon thread pool
    if let Some(workers) = config.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    info!("QR Compare (Rust Edition)");
    info!("Using {} worker thread(s)", rayon::current_num_threads());

    run(config)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid path argument: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match try_main(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
