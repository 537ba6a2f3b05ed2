//! Bursar CLI
//!
//! The command-line presentation layer: it reads the session identity,
//! dispatches mutation intents to the request store, renders projections,
//! and surfaces typed denials as human-readable messages. No business rule
//! lives here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use rusty_money::{Findable, iso::Currency};

use crate::{
    context::{AppContext, Config},
    store::RequestStore,
};

mod request;
mod session;
mod view;

/// Fund-request approval dashboard.
#[derive(Debug, Parser)]
#[command(name = "bursar", about = "Fund-request approval dashboard", long_about = None)]
pub struct Cli {
    /// Directory holding the session slot and the store document
    #[arg(long, env = "BURSAR_DATA_DIR", default_value = ".bursar", global = true)]
    data_dir: PathBuf,

    /// ISO code of the ledger currency
    #[arg(long, env = "BURSAR_CURRENCY", default_value = "NGN", global = true)]
    currency: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in with an email and password
    Login(session::LoginArgs),

    /// End the current session
    Logout,

    /// Show the logged-in identity
    Whoami,

    /// Operate on fund requests
    Request(request::RequestCommand),

    /// List requests, optionally filtered
    List(view::ListArgs),

    /// Show ledger statistics
    Stats,

    /// Export a register to a file
    Export(view::ExportArgs),

    /// Seed the demo ledger into an empty store
    Seed,
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when the command fails; the caller
    /// prints it and exits non-zero.
    pub fn run(self) -> Result<(), String> {
        let currency = Currency::find(&self.currency)
            .ok_or_else(|| format!("unknown currency code: {}", self.currency))?;

        let config = Config {
            data_dir: self.data_dir,
            currency,
        };

        let mut ctx = AppContext::initialise(&config)
            .map_err(|error| format!("failed to initialise: {error}"))?;

        match self.command {
            Commands::Login(args) => session::login(&ctx, &args),
            Commands::Logout => session::logout(&ctx),
            Commands::Whoami => session::whoami(&ctx),
            Commands::Request(command) => request::run(&mut ctx, command),
            Commands::List(args) => view::list(&ctx, &args),
            Commands::Stats => view::stats(&ctx),
            Commands::Export(args) => view::export(&ctx, &args),
            Commands::Seed => seed(&mut ctx),
        }
    }
}

fn seed(ctx: &mut AppContext) -> Result<(), String> {
    if !ctx.store.requests().is_empty() {
        return Err("store already holds requests; refusing to seed".to_string());
    }

    let directory = bursar::fixtures::demo_users();
    let requests = bursar::fixtures::demo_requests(&directory.accountant, Timestamp::now());

    ctx.store = RequestStore::with_seed(ctx.store.currency(), requests, Vec::new());
    ctx.save()
        .map_err(|error| format!("failed to save: {error}"))?;

    println!("demo ledger seeded");

    Ok(())
}
