//! Converts a file of base64-encoded certificates into a pipe-delimited
//! metadata table ready for bulk loading.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use certmeta::batch::{BatchRecordWriter, output_path, scan_date_from_path};
use certmeta::config::Config;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "split-certs")]
#[command(about = "Extract certificate metadata into a pipe-delimited table")]
#[command(version)]
struct Cli {
    /// File of `<sha1>,<base64 DER>` lines
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scan date label (defaults to the input file name without `_certs`)
    #[arg(long)]
    date: Option<String>,

    /// Output file (defaults to the input path plus the configured suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

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

    let scan_date = cli.date.unwrap_or_else(|| scan_date_from_path(&cli.input));
    let output = cli
        .output
        .unwrap_or_else(|| output_path(&cli.input, &config.output));

    let input = File::open(&cli.input)
        .with_context(|| format!("cannot open {}", cli.input.display()))?;
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }

    info!("Reading certificates from {}", cli.input.display());
    info!("Writing metadata for scan date {} to {}", scan_date, output.display());

    let sink = File::create(&output)
        .with_context(|| format!("cannot create {}", output.display()))?;

    let writer = BatchRecordWriter::builder()
        .decoder(config.decoder.to_decoder())
        .scan_date(scan_date)
        .build();
    let summary = writer.write_batch(BufReader::new(input), BufWriter::new(sink))?;

    info!(
        "Done: {} of {} certificates written",
        summary.written,
        summary.total()
    );
    Ok(())
}
