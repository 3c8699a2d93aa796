//! Export subcommand - aggregate collections and save the zip bundle

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use gather_core::{SHARED_RUNTIME, SharedProgress, fmt_num};
use gather_export::ExportContext;
use gather_wiki::{Collection, RunEvent, Session};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Wiki user name whose collections are exported
    pub user: String,

    /// Wiki domain (e.g. en.wikipedia.org)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Archive file name
    #[arg(long)]
    pub archive: Option<String>,
}

pub fn run(args: ExportArgs, config: &Config, progress: &SharedProgress) -> Result<ExitCode> {
    let user = args.user.trim().to_string();
    anyhow::ensure!(!user.is_empty(), "User name must not be empty");
    let domain = args
        .domain
        .unwrap_or_else(|| config.wiki.default_domain.clone());
    let output_dir = args
        .output
        .unwrap_or_else(|| config.output.default_dir.clone());
    let archive_name = args
        .archive
        .unwrap_or_else(|| config.output.archive_name.clone());

    let session = Session::new(super::aggregator(config, &domain));
    let stage = progress.stage_line("export");

    let outcome: Result<Option<Vec<Collection>>> = SHARED_RUNTIME.block_on(async {
        let mut handle = session.start(user.as_str());
        super::cancel_on_signal(handle.token())?;

        while let Some(event) = handle.next_event().await {
            match event {
                RunEvent::Progress(p) => stage.update(p.to_string()),
                RunEvent::Failed(e) => {
                    return Err(anyhow::Error::new(e).context(format!(
                        "Export of {user}'s collections from {domain} failed"
                    )));
                }
                RunEvent::Completed(collections) => return Ok(Some(collections)),
            }
        }
        // Channel closed without a terminal event: the run was cancelled
        Ok(None)
    });

    let collections = match outcome {
        Ok(Some(collections)) => collections,
        Ok(None) => {
            stage.clear();
            log::warn!("Interrupted, nothing saved");
            return Ok(ExitCode::from(130));
        }
        Err(e) => {
            stage.clear();
            return Err(e);
        }
    };

    let pages: usize = collections.iter().map(|c| c.pages.len()).sum();
    stage.finish(format!(
        "Fetched {} lists with {} pages for {user}",
        fmt_num(collections.len()),
        fmt_num(pages)
    ));
    super::print_collections(&collections, true);

    let ctx = ExportContext::new(user, domain);
    let bytes = gather_export::build_bundle(&collections, &ctx)?;
    let path = gather_export::save(&bytes, &output_dir, &archive_name)?;
    progress.println(format!("Saved {}", path.display()));

    Ok(ExitCode::SUCCESS)
}
