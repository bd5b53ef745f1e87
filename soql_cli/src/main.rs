mod cli;
mod commands;
mod errors;
mod session;
mod source;
mod ui;

use clap::Parser;
use std::process::ExitCode;

use cli::{SoqlCli, SoqlCliCommand};

fn main() -> ExitCode {
    let cli = SoqlCli::parse();
    initialize_logging(cli.verbose);

    let result = match cli.command {
        SoqlCliCommand::Build { session } => commands::build_query(&session, cli.format),
        SoqlCliCommand::Validate { expression, rows } => {
            commands::validate_logic(&expression, rows, cli.format)
        }
        SoqlCliCommand::Operators { data_type } => {
            commands::list_operators(&data_type, cli.format)
        }
        SoqlCliCommand::Fields { session } => commands::list_fields(&session, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn initialize_logging(verbose: bool) {
    let rust_log_set = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = default_log_level(verbose, rust_log_set) {
        builder.filter_level(level);
    }
    builder
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

/// `--verbose` wins over `RUST_LOG`; otherwise `RUST_LOG` wins over Warn
fn default_log_level(verbose: bool, rust_log_set: bool) -> Option<log::LevelFilter> {
    if verbose {
        Some(log::LevelFilter::Debug)
    } else if rust_log_set {
        None
    } else {
        Some(log::LevelFilter::Warn)
    }
}
