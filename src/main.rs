//! ec2-greeter: application entry point.
//!
//! Reads configuration from the environment, initializes tracing, builds the
//! Axum router, and serves it until SIGTERM/SIGINT.

use std::process::ExitCode;

use clap::Parser;

use ec2_greeter::{create_router, http, logging, AppConfig};

/// A greeting web service with a health check endpoint
#[derive(Parser, Debug)]
#[command(name = "ec2-greeter", version, about)]
struct Args {
    /// Log level filter (e.g., "ec2_greeter=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration comes first so LOG_FORMAT can select the subscriber
    let config = AppConfig::from_env()?;

    logging::init(args.log_level, config.logging.format);

    tracing::info!(
        addr = %config.http.socket_addr(),
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    http::start_server(create_router(), &config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
