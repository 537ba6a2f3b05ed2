//! Session commands.

use bursar::users::User;
use clap::Args;
use zeroize::Zeroizing;

use crate::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "BURSAR_PASSWORD")]
    password: String,
}

pub(crate) fn login(ctx: &AppContext, args: &LoginArgs) -> Result<(), String> {
    // Wipe the plaintext once hashing is done with it.
    let password = Zeroizing::new(args.password.clone());

    let user = ctx
        .identity
        .authenticate(&args.email, &password)
        .map_err(|error| error.to_string())?;

    ctx.session
        .save(&user)
        .map_err(|error| format!("failed to persist session: {error}"))?;

    println!("Welcome back, {}!", user.name);

    Ok(())
}

pub(crate) fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.session
        .clear()
        .map_err(|error| format!("failed to clear session: {error}"))?;

    println!("You have been logged out");

    Ok(())
}

pub(crate) fn whoami(ctx: &AppContext) -> Result<(), String> {
    let user = current_user(ctx)?;

    println!("{} <{}> ({})", user.name, user.email, user.role);

    Ok(())
}

pub(crate) fn current_user(ctx: &AppContext) -> Result<User, String> {
    ctx.session
        .load()
        .ok_or_else(|| "not logged in; run `bursar login`".to_string())
}
