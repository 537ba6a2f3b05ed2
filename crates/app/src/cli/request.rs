//! Request commands.

use bursar::{
    export,
    requests::{NewFundRequest, RequestId},
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::{cli::session, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct RequestCommand {
    #[command(subcommand)]
    command: RequestSubcommand,
}

#[derive(Debug, Subcommand)]
enum RequestSubcommand {
    /// Raise a new fund request
    Create(CreateArgs),

    /// Approve a pending request
    Approve(RulingArgs),

    /// Reject a pending request
    Reject(RulingArgs),

    /// Release the funds of an approved request
    Release(IdArg),

    /// Close out a released request
    Done(IdArg),

    /// File a memo from a released request
    Memo(MemoArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Requested amount
    #[arg(long)]
    amount: Decimal,

    /// Short purpose line
    #[arg(long)]
    purpose: String,

    /// Longer description
    #[arg(long, default_value = "")]
    description: String,

    /// Staff member the funds are for
    #[arg(long)]
    requested_for: String,

    /// Optional supporting-material reference
    #[arg(long)]
    attachment: Option<String>,
}

#[derive(Debug, Args)]
struct RulingArgs {
    /// Request id
    id: u64,

    /// Comments on the ruling
    #[arg(long)]
    comments: Option<String>,
}

#[derive(Debug, Args)]
struct IdArg {
    /// Request id
    id: u64,
}

#[derive(Debug, Args)]
struct MemoArgs {
    /// Request id
    id: u64,

    /// Memo body; generated when omitted
    #[arg(long)]
    text: Option<String>,
}

pub(crate) fn run(ctx: &mut AppContext, command: RequestCommand) -> Result<(), String> {
    let actor = session::current_user(ctx)?;

    let notice = match command.command {
        RequestSubcommand::Create(args) => {
            let input = NewFundRequest {
                amount: args.amount,
                purpose: args.purpose,
                description: args.description,
                requested_for: args.requested_for,
                attachment_url: args.attachment,
            };

            let (_, notice) = ctx
                .store
                .create_request(&actor, input)
                .map_err(|error| error.to_string())?;

            notice
        }
        RequestSubcommand::Approve(args) => {
            let (_, notice) = ctx
                .store
                .approve(&actor, RequestId::new(args.id), args.comments)
                .map_err(|error| error.to_string())?;

            notice
        }
        RequestSubcommand::Reject(args) => {
            let (_, notice) = ctx
                .store
                .reject(&actor, RequestId::new(args.id), args.comments)
                .map_err(|error| error.to_string())?;

            notice
        }
        RequestSubcommand::Release(args) => {
            let (_, notice) = ctx
                .store
                .release(&actor, RequestId::new(args.id))
                .map_err(|error| error.to_string())?;

            notice
        }
        RequestSubcommand::Done(args) => {
            let (_, notice) = ctx
                .store
                .mark_done(&actor, RequestId::new(args.id))
                .map_err(|error| error.to_string())?;

            notice
        }
        RequestSubcommand::Memo(args) => {
            let (memo, notice) = ctx
                .store
                .convert_to_memo(&actor, RequestId::new(args.id), args.text)
                .map_err(|error| error.to_string())?;

            println!(
                "{}",
                export::render_memo_document(&memo, ctx.store.currency())
            );

            notice
        }
    };

    ctx.save()
        .map_err(|error| format!("failed to save: {error}"))?;

    println!("{notice}");

    Ok(())
}
