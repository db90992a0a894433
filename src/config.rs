//! TOML configuration for the command-line tools.
//!
//! Every section is optional; a missing file or section means defaults.
//!
//! ```toml
//! [decoder]
//! program = "openssl"
//! args = ["x509", "-inform", "der", "-text", "-noout"]
//!
//! [output]
//! suffix = ".csv"
//! directory = "./output"
//!
//! [logging]
//! level = "info"
//!
//! [[feeds]]
//! name = "sslbl"
//! url = "https://sslbl.abuse.ch/blacklist/sslblacklist.csv"
//! source = "abuse.ch SSL Fingerprint Blacklist"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::decoder::{CommandDecoder, DEFAULT_ARGS, DEFAULT_PROGRAM};
use crate::error::{CertMetaError, Result};
use crate::feeds::{FeedSource, default_feeds};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub feeds: Vec<FeedSource>,
    pub feed_output: FeedOutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
            feeds: default_feeds(),
            feed_output: FeedOutputConfig::default(),
        }
    }
}

/// The external program that renders certificates as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl DecoderConfig {
    pub fn to_decoder(&self) -> CommandDecoder {
        CommandDecoder::builder()
            .program(self.program.clone())
            .args(self.args.clone())
            .build()
    }
}

/// Placement of the metadata table written for an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the input file name.
    pub suffix: String,
    /// When unset, the table is written next to the input file.
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: ".csv".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` wins; otherwise `debug` when verbose, else the configured level.
    pub fn env_filter(&self, verbose: bool) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new(&self.level)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOutputConfig {
    pub directory: PathBuf,
}

impl Default for FeedOutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    /// Returns [`CertMetaError::Config`] if the file cannot be read, is not
    /// valid TOML, or fails [`Config::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CertMetaError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.decoder.program.trim().is_empty() {
            return Err(CertMetaError::Config(
                "decoder.program cannot be empty".to_string(),
            ));
        }

        if self.output.suffix.is_empty() {
            return Err(CertMetaError::Config(
                "output.suffix cannot be empty".to_string(),
            ));
        }

        for feed in &self.feeds {
            if feed.url.trim().is_empty() || feed.source.trim().is_empty() {
                return Err(CertMetaError::Config(format!(
                    "feed {} needs both url and source",
                    feed.name
                )));
            }
            if feed.timeout_secs == 0 {
                return Err(CertMetaError::Config(format!(
                    "feed {} timeout_secs must be greater than 0",
                    feed.name
                )));
            }
        }

        Ok(())
    }
}
