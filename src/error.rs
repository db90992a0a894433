//! Error type shared by every certmeta module.

use thiserror::Error;

/// Represents errors that can occur in the certmeta library.
///
/// Per-certificate problems never surface through this type during a batch;
/// they are reported as skipped records instead.
#[derive(Debug, Error, Clone)]
pub enum CertMetaError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The certificate bytes could not be decoded into a text report.
    #[error("Failed to decode certificate: {0}")]
    Decode(String),

    /// The configuration file is unreadable or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Downloading or parsing a blacklist feed failed.
    #[error("Feed error: {0}")]
    Feed(String),
}

pub type Result<T> = std::result::Result<T, CertMetaError>;

impl From<std::io::Error> for CertMetaError {
    fn from(err: std::io::Error) -> Self {
        CertMetaError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for CertMetaError {
    fn from(err: toml::de::Error) -> Self {
        CertMetaError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for CertMetaError {
    fn from(err: reqwest::Error) -> Self {
        CertMetaError::Feed(err.to_string())
    }
}
