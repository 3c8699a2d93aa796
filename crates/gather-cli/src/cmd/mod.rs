//! Subcommands and shared terminal output

pub mod export;
pub mod list;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use gather_core::{RunToken, fmt_num};
use gather_wiki::{Aggregator, Collection, HttpWikiApi};

use crate::config::Config;

/// Aggregator for `domain` built from the effective configuration
pub fn aggregator(config: &Config, domain: &str) -> Aggregator<HttpWikiApi> {
    let wiki = config.wiki_config(domain);
    log::debug!("API endpoint: {}", wiki.endpoint.api_url);
    Aggregator::new(HttpWikiApi::new(wiki.endpoint, wiki.page_size))
}

/// First SIGINT/SIGTERM cancels the run, a second one exits immediately.
pub fn cancel_on_signal(token: &RunToken) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register_conditional_shutdown(signal, 130, token.flag())
            .context("Failed to register signal handler")?;
        signal_hook::flag::register(signal, token.flag())
            .context("Failed to register signal handler")?;
    }
    Ok(())
}

fn styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

/// Title / Description / Count overview, plus fetched pages when known
pub fn print_collections(collections: &[Collection], with_pages: bool) {
    let mut headers = vec!["Title", "Description", "Count"];
    if with_pages {
        headers.push("Fetched");
    }
    let mut table = styled_table(&headers);
    for c in collections {
        let mut row = vec![
            Cell::new(&c.label),
            Cell::new(c.description.as_deref().unwrap_or_default()),
            Cell::new(fmt_num(c.count as usize)),
        ];
        if with_pages {
            row.push(Cell::new(fmt_num(c.pages.len())));
        }
        table.add_row(row);
    }
    eprintln!("\n{table}");
}

pub fn print_config(config: &Config) {
    let mut table = styled_table(&["Setting", "Value"]);
    let wiki = config.wiki_config(&config.wiki.default_domain);

    table.add_row(vec!["Default domain", &config.wiki.default_domain]);
    table.add_row(vec!["API URL", &wiki.endpoint.api_url]);
    table.add_row(vec!["Page size", &config.wiki.page_size.to_string()]);
    table.add_row(vec![
        "Output directory",
        &config.output.default_dir.display().to_string(),
    ]);
    table.add_row(vec!["Archive name", &config.output.archive_name]);
    table.add_row(vec![
        "Connect timeout",
        &format!("{}s", config.http.connect_timeout),
    ]);
    table.add_row(vec![
        "Request timeout",
        &format!("{}s", config.http.request_timeout),
    ]);

    eprintln!("\n{table}");
}
