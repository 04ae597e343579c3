//! prefstore CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use prefstore::cli::{Cli, CommandDispatcher};
use prefstore::config::load_config;
use prefstore::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so command output is not interleaved with logs
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("prefstore=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prefstore=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("prefstore starting with args: {:?}", cli);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(cli.data_dir.clone(), cli.store.clone()),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    tracing::debug!("Using data dir {:?}", config.resolved_data_dir());

    let dispatcher = CommandDispatcher::new(Context::from_config(&config));
    let mut stdout = std::io::stdout().lock();

    match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => ExitCode::from(result.process_exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
