//! bkx-catalog - Book search and detail lookup
//!
//! Thin command-line consumer of the bkx-catalog library: search for books,
//! aggregate a work's detail page, or run a debounced interactive search.

use anyhow::{bail, Context, Result};
use bkx_catalog::render::{byline, detail_block, summary_block};
use bkx_catalog::session::{SearchSession, SearchUpdate};
use bkx_catalog::{author_hint_for, BookExplorer};
use bkx_common::config::{CliOverrides, ConfigResolver, LoggingConfig, ENV_LOG_LEVEL};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "bkx-catalog", version, about = "Search books and view aggregated details")]
struct Cli {
    /// TOML config file (default: <config dir>/bkx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    catalog_url: Option<String>,

    #[arg(long, global = true)]
    search_url: Option<String>,

    #[arg(long, global = true)]
    cover_url: Option<String>,

    #[arg(long, global = true)]
    encyclopedia_url: Option<String>,

    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search by title
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Aggregate description, author bio and rating for a work key
    Details {
        /// Work key, e.g. /works/OL66554W
        work_id: String,
        /// Author name used when the catalog has no biography
        #[arg(long)]
        author: Option<String>,
    },
    /// Search, pick one result and show its details
    Lookup {
        #[arg(required = true)]
        query: Vec<String>,
        /// 1-based result index
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
    /// Read queries from stdin line by line with debounced search
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging comes up before configuration so resolution messages are
    // visible; the TOML level is applied afterwards through the reload handle.
    let rust_log_set = std::env::var(EnvFilter::DEFAULT_ENV).is_ok();
    let bootstrap_level =
        bootstrap_log_level(cli.log_level.as_deref(), std::env::var(ENV_LOG_LEVEL).ok());
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&bootstrap_level)),
    );
    // Logs go to stderr so stdout stays machine-readable with --json
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = CliOverrides {
        catalog_url: cli.catalog_url.clone(),
        search_url: cli.search_url.clone(),
        cover_url: cli.cover_url.clone(),
        encyclopedia_url: cli.encyclopedia_url.clone(),
        user_agent: cli.user_agent.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = ConfigResolver::new(cli.config.clone())
        .resolve(&overrides)
        .context("Failed to resolve configuration")?;

    if let Some(level) = deferred_log_level(rust_log_set, &bootstrap_level, &config.logging.level) {
        filter_handle
            .reload(EnvFilter::new(level))
            .context("Failed to apply configured log level")?;
    }

    info!(
        "Starting bkx-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let explorer =
        BookExplorer::from_settings(&config.providers).context("Failed to build HTTP clients")?;

    match cli.command {
        Command::Search { query } => {
            let books = explorer.search.search(&query.join(" ")).await?;
            if cli.json {
                print_json(&books)?;
            } else if books.is_empty() {
                println!("No results.");
            } else {
                for (i, book) in books.iter().enumerate() {
                    print!("{}", summary_block(i + 1, book));
                }
            }
        }
        Command::Details { work_id, author } => {
            let detail = explorer
                .details
                .get_details(&work_id, author.as_deref())
                .await;
            if cli.json {
                print_json(&detail)?;
            } else {
                print!("{}", detail_block(&detail));
            }
        }
        Command::Lookup { query, pick } => {
            let books = explorer.search.search(&query.join(" ")).await?;
            if pick == 0 || pick > books.len() {
                bail!("--pick {} is out of range ({} results)", pick, books.len());
            }
            let book = &books[pick - 1];
            info!(work_id = %book.id, hint = ?author_hint_for(book), "Selected search result");

            let detail = explorer.details_for(book).await;
            if cli.json {
                print_json(&serde_json::json!({ "book": book, "detail": detail }))?;
            } else {
                println!("{}", book.title);
                println!("{}", byline(&book.authors));
                println!();
                print!("{}", detail_block(&detail));
            }
        }
        Command::Watch => {
            run_watch(explorer, Duration::from_millis(config.search.debounce_ms), cli.json).await?;
        }
    }

    Ok(())
}

async fn run_watch(explorer: BookExplorer, debounce: Duration, json: bool) -> Result<()> {
    let session = SearchSession::new(explorer.search.clone());
    let (input_tx, mut updates, pipeline) = session.spawn(debounce);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    while let Some(update) = updates.recv().await {
        match update {
            SearchUpdate::Cleared => println!("(cleared)"),
            SearchUpdate::Results { query, books } => {
                if json {
                    print_json(&books)?;
                } else {
                    println!("== {} ({} results)", query, books.len());
                    for (i, book) in books.iter().enumerate() {
                        print!("{}", summary_block(i + 1, book));
                    }
                }
            }
            SearchUpdate::Failed { query, .. } => println!("== {} (0 results, search failed)", query),
        }
    }

    reader.await?;
    pipeline.await?;
    Ok(())
}

/// Level usable before the TOML file is read: CLI flag, then `BKX_LOG_LEVEL`
fn bootstrap_log_level(cli_level: Option<&str>, env_level: Option<String>) -> String {
    cli_level
        .filter(|level| !level.trim().is_empty())
        .map(str::to_string)
        .or_else(|| env_level.filter(|level| !level.trim().is_empty()))
        .unwrap_or_else(|| LoggingConfig::default().level)
}

/// Level to switch to once configuration is resolved, if any
fn deferred_log_level<'a>(
    rust_log_set: bool,
    bootstrap_level: &str,
    configured_level: &'a str,
) -> Option<&'a str> {
    (!rust_log_set && configured_level != bootstrap_level).then_some(configured_level)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
