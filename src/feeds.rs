//! TLS blacklist feeds.
//!
//! abuse.ch publishes its SSL blacklists as CSV with `#` comment lines and
//! rows of `listing date,sha1,reason`. Rows are normalized to
//! `listing date,sha1,reason,source` so several feeds can share one table.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{CertMetaError, Result};

const LISTING_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn default_timeout_secs() -> u64 {
    30
}

/// Where a feed is downloaded from and how its rows are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Also the output file stem.
    pub name: String,
    pub url: String,
    /// Written to the `source` column of every row.
    pub source: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// The abuse.ch SSL fingerprint and Dyre C2 blacklists.
pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: "sslbl".to_string(),
            url: "https://sslbl.abuse.ch/blacklist/sslblacklist.csv".to_string(),
            source: "abuse.ch SSL Fingerprint Blacklist".to_string(),
            timeout_secs: 30,
        },
        FeedSource {
            name: "dyressl".to_string(),
            url: "https://sslbl.abuse.ch/blacklist/dyre_sslblacklist.csv".to_string(),
            source: "abuse.ch Dyre C2 SSL Fingerprint Blacklist".to_string(),
            timeout_secs: 60,
        },
    ]
}

/// One blacklisted certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub listed_at: PrimitiveDateTime,
    /// Lowercase hex.
    pub sha1: String,
    pub description: String,
    pub source: String,
}

/// Parses a feed body, tagging every row with `source`.
///
/// Comment lines and rows with fewer than three fields are ignored; rows
/// whose listing date does not parse are dropped with a warning.
pub fn parse_feed(body: &str, source: &str) -> Vec<FeedEntry> {
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
            let [listed_at, sha1, description, ..] = fields.as_slice() else {
                return None;
            };
            match PrimitiveDateTime::parse(listed_at, LISTING_FORMAT) {
                Ok(listed_at) => Some(FeedEntry {
                    listed_at,
                    sha1: sha1.to_ascii_lowercase(),
                    description: description.to_string(),
                    source: source.to_string(),
                }),
                Err(e) => {
                    tracing::warn!("{}: dropping row with bad listing date {:?}: {}", source, listed_at, e);
                    None
                }
            }
        })
        .collect()
}

/// Renders entries as `listing date,sha1,reason,source` lines.
pub fn render_feed(entries: &[FeedEntry]) -> Result<String> {
    let mut output = String::new();
    for entry in entries {
        let listed_at = entry
            .listed_at
            .format(LISTING_FORMAT)
            .map_err(|e| CertMetaError::Feed(e.to_string()))?;
        output.push_str(&format!(
            "{},{},{},{}\n",
            listed_at, entry.sha1, entry.description, entry.source
        ));
    }
    Ok(output)
}

/// Downloads a feed body.
///
/// # Errors
/// Returns [`CertMetaError::Feed`] on connection failure, timeout, or a
/// non-success status.
pub fn fetch_feed(feed: &FeedSource) -> Result<String> {
    tracing::info!("downloading {} from {}", feed.name, feed.url);
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(feed.timeout_secs))
        .build()?;
    let body = client.get(&feed.url).send()?.error_for_status()?.text()?;
    Ok(body)
}

/// Downloads and parses a feed.
pub fn collect_feed(feed: &FeedSource) -> Result<Vec<FeedEntry>> {
    let body = fetch_feed(feed)?;
    let entries = parse_feed(&body, &feed.source);
    tracing::info!("{}: {} blacklisted certificates", feed.name, entries.len());
    Ok(entries)
}
