//! Read-side commands.

use std::{fs::File, io, path::PathBuf};

use bursar::{
    export,
    requests::{FundRequest, Status},
};
use clap::Args;

use crate::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Only requests in this status
    #[arg(long)]
    status: Option<Status>,

    /// Only requests raised for this staff member
    #[arg(long)]
    staff: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Export the memo register instead of the request register
    #[arg(long)]
    memos: bool,

    /// Output file path
    #[arg(long, default_value = "register.txt")]
    output: PathBuf,
}

pub(crate) fn list(ctx: &AppContext, args: &ListArgs) -> Result<(), String> {
    let selected: Vec<FundRequest> = match (args.status, &args.staff) {
        (None, None) => ctx.store.requests().to_vec(),
        (Some(status), None) => ctx.store.by_status(status).into_iter().cloned().collect(),
        (None, Some(name)) => ctx
            .store
            .for_staff_member(name)
            .into_iter()
            .cloned()
            .collect(),
        (Some(status), Some(name)) => ctx
            .store
            .for_staff_member(name)
            .into_iter()
            .filter(|request| request.status() == status)
            .cloned()
            .collect(),
    };

    export::write_register(io::stdout(), &selected, ctx.store.currency())
        .map_err(|error| error.to_string())
}

pub(crate) fn stats(ctx: &AppContext) -> Result<(), String> {
    let stats = ctx.store.statistics();
    let currency = ctx.store.currency();

    for status in Status::ALL {
        println!("{:>9}: {}", status.to_string(), stats.counts.get(status));
    }

    println!("    total: {}", export::format_amount(stats.total_amount, currency));
    println!(
        " released: {}",
        export::format_amount(stats.released_amount, currency)
    );
    println!(
        "  pending: {}",
        export::format_amount(stats.pending_amount(), currency)
    );

    Ok(())
}

pub(crate) fn export(ctx: &AppContext, args: &ExportArgs) -> Result<(), String> {
    let file = File::create(&args.output)
        .map_err(|error| format!("failed to create {}: {error}", args.output.display()))?;

    let result = if args.memos {
        export::write_memo_register(file, ctx.store.memos(), ctx.store.currency())
    } else {
        export::write_register(file, ctx.store.requests(), ctx.store.currency())
    };

    result.map_err(|error| error.to_string())?;

    println!("wrote {}", args.output.display());

    Ok(())
}
