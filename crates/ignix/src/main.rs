//! Command-line front end over the catalog and download pipeline.

mod select;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ignix_cache::TtlCache;
use ignix_catalog::{CatalogClient, CatalogEntry, DownloadOp, WriteMode};
use ignix_fetch::{ClientSetting, Downloader, GithubListing, ReqwestClient, Transport};

use crate::select::Selection;

/// Remote collections merged into the catalog: the root language templates
/// plus the Global OS/editor templates.
const SUB_PATHS: &[&str] = &["", "Global"];

const DEFAULT_TARGET: &str = ".gitignore";

#[derive(Parser)]
#[command(name = "ignix", version, about)]
struct Cli {
    /// Proxy URL for all outbound requests; overrides the environment.
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Seconds a fetched listing stays cached; 0 disables caching.
    #[arg(long, global = true, default_value_t = 3600)]
    cache_ttl: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the merged template catalog.
    List,
    /// Download one template into a local file.
    Pull {
        /// Template label; prompts with a pick-list when omitted.
        template: Option<String>,
        /// Append to the target instead of being asked when it exists.
        #[arg(long)]
        append: bool,
        /// Target file [default: ./.gitignore]
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let transport = Arc::new(Transport::new(ClientSetting {
        proxy: cli.proxy.clone(),
    }));
    let catalog = CatalogClient::new(
        GithubListing::new(Arc::clone(&transport)),
        TtlCache::new(Duration::from_secs(cli.cache_ttl)),
    );

    match cli.command {
        Command::List => list(&catalog).await,
        Command::Pull {
            template,
            append,
            out,
        } => pull(&catalog, transport, template, append, out).await,
    }
}

async fn list(catalog: &CatalogClient<GithubListing>) -> Result<()> {
    let entries = catalog
        .list_merged(SUB_PATHS)
        .await
        .context("failed to list templates")?;
    for entry in &entries {
        println!("{:<24} {}", entry.label, entry.description);
    }
    Ok(())
}

async fn pull(
    catalog: &CatalogClient<GithubListing>,
    transport: Arc<Transport>,
    template: Option<String>,
    append: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let entries = catalog
        .list_merged(SUB_PATHS)
        .await
        .context("failed to list templates")?;
    if entries.is_empty() {
        bail!("the remote catalog is empty");
    }

    let entry = match template {
        Some(name) => find_entry(entries, &name)?,
        None => match select::pick_entry(&entries)? {
            Selection::Picked(entry) => entry,
            Selection::Cancelled => return Ok(()),
        },
    };

    let target = out.unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
    let mode = if append {
        WriteMode::Append
    } else {
        match select::pick_mode(&target)? {
            Selection::Picked(mode) => mode,
            Selection::Cancelled => return Ok(()),
        }
    };

    let downloader = Downloader::new(ReqwestClient::new(transport));
    let op = DownloadOp { mode, target, entry };
    let done = downloader
        .download(op)
        .await
        .context("failed to download template")?;

    println!(
        "Wrote {} ({}) to {}",
        done.entry.label,
        done.entry.description,
        done.target.display()
    );
    Ok(())
}

fn find_entry(entries: Vec<CatalogEntry>, name: &str) -> Result<CatalogEntry> {
    entries
        .into_iter()
        .find(|e| e.label.eq_ignore_ascii_case(name))
        .with_context(|| format!("no template named '{name}' in the catalog"))
}
