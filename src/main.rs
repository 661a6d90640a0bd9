//! Command-line entry point: executes one computation request file.
//!
//! ```text
//! ahp-core <request.json|request.yaml>
//! ```
//!
//! The response is printed to stdout as JSON. Failures print a JSON error
//! to stdout and exit non-zero; logs go to stderr.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ahp_core::adapters::request::{execute, load_request};
use ahp_core::config::{AppConfig, LoggingConfig};
use ahp_core::domain::foundation::{DomainError, ErrorCode};

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to encode output");
            ExitCode::FAILURE
        }
    }
}

fn fail(err: DomainError) -> ExitCode {
    error!(code = %err.code, message = %err.message, "Computation failed");
    print_json(&err);
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    if let Err(e) = config.validate() {
        return fail(DomainError::validation("config", e.to_string()));
    }

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: ahp-core <request.json|request.yaml>");
        return ExitCode::from(2);
    };

    let request = match load_request(&path).await {
        Ok(request) => request,
        Err(e) => {
            return fail(
                DomainError::new(ErrorCode::ValidationFailed, e.to_string())
                    .with_detail("path", path),
            );
        }
    };

    info!(operation = request.operation(), path = %path, "Executing request");
    match execute(request, &config.analysis) {
        Ok(response) => print_json(&response),
        Err(err) => fail(err),
    }
}
