//! Bursar Application CLI

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let _env = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _init = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();

    let cli = bursar_app::cli::Cli::parse();

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        process::exit(1);
    }
}
