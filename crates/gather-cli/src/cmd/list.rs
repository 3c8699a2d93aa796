//! List subcommand - show a user's collections without their pages

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use gather_core::{RunToken, SHARED_RUNTIME, SharedProgress};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Wiki user name
    pub user: String,

    /// Wiki domain (e.g. en.wikipedia.org)
    #[arg(short, long)]
    pub domain: Option<String>,
}

pub fn run(args: ListArgs, config: &Config, progress: &SharedProgress) -> Result<ExitCode> {
    let user = args.user.trim();
    anyhow::ensure!(!user.is_empty(), "User name must not be empty");
    let domain = args
        .domain
        .as_deref()
        .unwrap_or(&config.wiki.default_domain);

    let aggregator = super::aggregator(config, domain);
    let token = RunToken::new();
    super::cancel_on_signal(&token)?;

    let stage = progress.stage_line("list");
    stage.update(format!("Fetching user {user} lists from {domain}"));
    let result = SHARED_RUNTIME.block_on(aggregator.list_collections(user, &token));
    stage.clear();

    let collections = match result {
        Err(e) if e.is_cancelled() => {
            log::warn!("Interrupted");
            return Ok(ExitCode::from(130));
        }
        other => other.with_context(|| format!("Cannot list {user}'s collections on {domain}"))?,
    };

    progress.println(format!("Received {} lists for {user}", collections.len()));
    if !collections.is_empty() {
        super::print_collections(&collections, false);
    }
    Ok(ExitCode::SUCCESS)
}
