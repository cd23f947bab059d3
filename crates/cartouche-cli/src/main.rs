//! Cartouche CLI - resolve and render Mermaid-style diagrams

mod cli;

use cartouche::core::logging::init_logging;
use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Environment variables take precedence over the CLI flags
    let log_level = std::env::var("CARTOUCHE_LOG_LEVEL")
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| cli_args.log_level.as_str().to_string());
    let log_format = std::env::var("CARTOUCHE_LOG_FORMAT")
        .ok()
        .unwrap_or_else(|| cli_args.log_format.as_str().to_string());

    if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if let Err(e) = cli::CartoucheApp::run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
