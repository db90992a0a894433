//! # certmeta - Certificate Metadata Extraction
//!
//! certmeta turns bulk certificate scans into a flat table that a warehouse
//! can bulk-load, so certificate metadata can be compared against TLS
//! blacklist feeds. Each certificate is rendered as text by an external
//! decoder (`openssl x509 -text` by default), the text report is parsed into
//! a record, and the record is written as one pipe-delimited row.
//!
//! ## Pipeline
//!
//! ```text
//! <sha1>,<base64 DER>  ->  decoder  ->  text report  ->  CertificateRecord  ->  a|b|c|...
//! ```
//!
//! - **Decoding**: [`decoder::CertificateDecoder`] runs once per certificate.
//! - **Parsing**: [`parser::parse_decoder_text`] recognizes the report's line
//!   prefixes and never fails; unrecognized or malformed lines are skipped.
//! - **Names**: [`dn::DistinguishedName`] splits subject and issuer strings.
//! - **Timestamps**: [`timestamp::parse_timestamp`] normalizes validity dates
//!   to UTC epoch seconds.
//! - **Output**: [`record::serializer`] writes the fixed columns of
//!   [`record::FIELD_NAMES`], leaving absent values empty.
//! - **Batches**: [`batch::BatchRecordWriter`] ties it together, skipping any
//!   certificate that cannot be decoded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use std::path::Path;
//!
//! use certmeta::batch::{BatchRecordWriter, output_path, scan_date_from_path};
//! use certmeta::config::Config;
//!
//! # fn main() -> Result<(), certmeta::error::CertMetaError> {
//! let config = Config::default();
//! let input = Path::new("./20161017_certs");
//!
//! let writer = BatchRecordWriter::builder()
//!     .decoder(config.decoder.to_decoder())
//!     .scan_date(scan_date_from_path(input))
//!     .build();
//!
//! let output = File::create(output_path(input, &config.output))?;
//! let summary = writer.write_batch(BufReader::new(File::open(input)?), output)?;
//! println!("{} written, {} skipped", summary.written, summary.skipped);
//! # Ok(())
//! # }
//! ```
//!
//! ### Parsing a Report Directly
//!
//! ```rust
//! use certmeta::parser::parse_decoder_text;
//! use certmeta::record::serializer::serialize;
//!
//! let report = "\
//!         Issuer: C = GB, O = Example, CN = Example CA
//!         Subject: C = GB, O = Example, CN = Example CA
//!             Not Before: Jan  1 00:00:00 2024 GMT
//!             Not After : Jan  1 00:00:00 2025 GMT
//!             RSA Public Key: (2048 bit)
//! ";
//! let record = parse_decoder_text(report);
//! assert_eq!(record.text("enc_subject_CN"), Some("Example CA"));
//! assert_eq!(record.integer("key_length"), Some(2048));
//! assert_eq!(
//!     serialize(&record, &["key_type", "not_valid_before", "curve"]),
//!     "rsa|1704067200|"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Only whole-run problems are errors; a certificate that cannot be decoded
//! is reported as [`batch::RecordOutcome::Skipped`] and counted in the
//! [`batch::BatchSummary`].
//!
//! ```rust
//! use certmeta::config::Config;
//! use certmeta::error::CertMetaError;
//!
//! match Config::from_toml("[decoder]\nprogram = \"\"\n") {
//!     Ok(_) => println!("configuration accepted"),
//!     Err(CertMetaError::Config(msg)) => println!("bad configuration: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`parser`]: decoder text report to record
//! - [`dn`]: distinguished-name splitting
//! - [`timestamp`]: validity timestamp normalization
//! - [`record`]: the record type, column list and serializer
//! - [`decoder`]: the external decoder seam
//! - [`batch`]: whole-file processing
//! - [`feeds`]: blacklist feed download and normalization
//! - [`config`]: TOML configuration
//! - [`error`]: error types

pub mod batch;
pub mod config;
pub mod decoder;
pub mod dn;
pub mod error;
pub mod feeds;
pub mod parser;
pub mod record;
pub mod timestamp;
