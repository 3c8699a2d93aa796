//! gather-export - export Gather collections from a Wikimedia wiki
//!
//! Fetches a user's collections with all member pages and writes them as a
//! zip of JSON, YAML, HTML and wikitext.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "gather-export")]
#[command(about = "Export your Gather collections from a Wikimedia wiki")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./gather-export.toml or ~/.config/gather-export/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// API endpoint override (default: https://<domain>/w/api.php)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Items per API request, 1-500
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all collections with their pages and save the zip bundle
    Export(cmd::export::ExportArgs),
    /// List a user's collections without fetching member pages
    List(cmd::list::ListArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let progress = Arc::new(gather_core::ProgressContext::new());
    let multi = progress.is_tty().then(|| progress.multi());
    gather_core::init_logging(cli.debug, multi);

    let mut config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // CLI flags override config file values
    if let Some(url) = cli.api_url {
        config.wiki.api_url = Some(url);
    }
    if let Some(size) = cli.page_size {
        config.wiki.page_size = size;
    }
    if let Some(secs) = cli.timeout {
        config.http.request_timeout = secs;
    }
    gather_core::set_http_config(gather_core::HttpConfig {
        connect_timeout: Duration::from_secs(config.http.connect_timeout),
        request_timeout: Duration::from_secs(config.http.request_timeout),
    });

    match cli.command {
        Command::Export(args) => cmd::export::run(args, &config, &progress),
        Command::List(args) => cmd::list::run(args, &config, &progress),
        Command::Config => {
            cmd::print_config(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}
