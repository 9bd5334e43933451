//! cas - operator tool for the CAS records desk

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cas::{
    commands::{self, Desk},
    config::{Args, DeskConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Logs go to stderr so command output stays clean
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cas={},access={},casework={}", log_level, log_level, log_level).into()),
        )
        .with(
            args.json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!args.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    let config = match DeskConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }
    debug!(
        accounts = config.accounts.len(),
        custom_roles = config.roles.len(),
        "Directory seed loaded"
    );

    let mut desk = match Desk::from_config(&config) {
        Ok(desk) => desk,
        Err(e) => {
            error!("Failed to build directory: {}", e);
            std::process::exit(1);
        }
    };

    match commands::run(&mut desk, &args.command).await {
        Ok(report) => {
            println!("{}", report.render(args.json));
            if report.exit_code != 0 {
                std::process::exit(report.exit_code);
            }
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
