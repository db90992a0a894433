//! Downloads the configured TLS blacklist feeds and writes each one as a
//! normalized `listing date,sha1,reason,source` CSV file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use certmeta::config::Config;
use certmeta::feeds::{collect_feed, render_feed};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fetch-feeds")]
#[command(about = "Download and normalize TLS certificate blacklist feeds")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the normalized feed files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.env_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let directory = cli
        .output_dir
        .unwrap_or_else(|| config.feed_output.directory.clone());
    fs::create_dir_all(&directory)
        .with_context(|| format!("cannot create {}", directory.display()))?;

    let mut failures = 0;
    for feed in &config.feeds {
        let path = directory.join(format!("{}.csv", feed.name));
        let result = collect_feed(feed)
            .and_then(|entries| render_feed(&entries))
            .map_err(anyhow::Error::from)
            .and_then(|body| {
                fs::write(&path, body).with_context(|| format!("cannot write {}", path.display()))
            });

        match result {
            Ok(()) => info!("{} saved to {}", feed.name, path.display()),
            Err(e) => {
                failures += 1;
                error!("{} failed: {:#}", feed.name, e);
            }
        }
    }

    if !config.feeds.is_empty() && failures == config.feeds.len() {
        bail!("every configured feed failed to download");
    }
    Ok(())
}
