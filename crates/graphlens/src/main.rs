//! graphlens CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use graphlens::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over -v, e.g. RUST_LOG=graphlens=debug,graphlens_gml=trace
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("graphlens={level},graphlens_gml={level}"))
        }))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting graphlens");

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
