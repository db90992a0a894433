//! Driving the parser over a file of base64-encoded certificates.
//!
//! Every input line is `<sha1>,<base64 DER>[,...]`. Each one becomes a
//! [`RecordOutcome`]: either a finished record or the reason it was skipped.
//! A skipped line never stops the batch.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bon::Builder;
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::config::OutputConfig;
use crate::decoder::CertificateDecoder;
use crate::error::Result;
use crate::parser::parse_decoder_text;
use crate::record::serializer::{header, serialize};
use crate::record::{self, CertificateRecord, FIELD_NAMES, FieldValue};

/// Why one input line produced no output row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(String),
    #[error("line has no certificate field")]
    MissingCertificate,
    #[error("certificate is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("{0}")]
    Decoder(String),
}

/// The result of processing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Parsed(CertificateRecord),
    Skipped(SkipReason),
}

/// Counts reported once a batch has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.written + self.skipped
    }
}

/// Decodes, parses and serializes certificates one line at a time.
///
/// # Example
/// ```
/// use certmeta::batch::BatchRecordWriter;
/// use certmeta::error::Result;
///
/// let decoder = |_: &[u8]| -> Result<String> { Ok("Version: 3 (0x2)\n".to_string()) };
/// let writer = BatchRecordWriter::builder()
///     .decoder(decoder)
///     .scan_date("20161017".to_string())
///     .build();
///
/// let mut output = Vec::new();
/// let summary = writer.write_batch(&b"abcd,AAEC\n"[..], &mut output)?;
/// assert_eq!(summary.written, 1);
/// # Ok::<(), certmeta::error::CertMetaError>(())
/// ```
#[derive(Debug, Builder)]
pub struct BatchRecordWriter<D: CertificateDecoder> {
    decoder: D,
    /// Label written to the `date` column of every row.
    scan_date: String,
}

impl<D: CertificateDecoder> BatchRecordWriter<D> {
    /// Turns one input line into a complete record.
    pub fn process_line(&self, line: &str) -> RecordOutcome {
        let mut fields = line.split(',');
        let hash = fields.next().unwrap_or_default().trim();
        let Some(encoded) = fields.next().map(str::trim).filter(|field| !field.is_empty()) else {
            return RecordOutcome::Skipped(SkipReason::MissingCertificate);
        };

        let der = match STANDARD.decode(encoded) {
            Ok(der) => der,
            Err(e) => return RecordOutcome::Skipped(SkipReason::InvalidBase64(e.to_string())),
        };

        match self.decoder.decode(&der) {
            Ok(report) => {
                let record = parse_decoder_text(&report);
                RecordOutcome::Parsed(self.complete_record(record, hash, &der))
            }
            Err(e) => RecordOutcome::Skipped(SkipReason::Decoder(e.to_string())),
        }
    }

    /// Adds the fields that do not come from the decoder report.
    fn complete_record(&self, mut record: CertificateRecord, hash: &str, der: &[u8]) -> CertificateRecord {
        let fingerprint = sha1_hex(der);
        let sha1 = if hash.is_empty() {
            fingerprint
        } else {
            if !hash.eq_ignore_ascii_case(&fingerprint) {
                tracing::warn!("listed hash {} does not match certificate SHA-1 {}", hash, fingerprint);
            }
            hash.to_string()
        };

        record.insert(record::SHA1, FieldValue::Text(sha1));
        // Blacklist membership is filled in after loading.
        record.insert(record::FEED_MATCH, FieldValue::Boolean(false));
        record.insert(record::SIZE, FieldValue::Integer(der.len() as i64));
        record.insert(record::DATE, FieldValue::text(self.scan_date.as_str()));

        let self_signed = match (record.text(record::ENC_ISSUER), record.text(record::ENC_SUBJECT)) {
            (Some(issuer), Some(subject)) => FieldValue::Boolean(issuer == subject),
            _ => FieldValue::Empty,
        };
        record.insert(record::SELF_SIGNED, self_signed);

        if let (Some(not_before), Some(not_after)) = (
            record.integer(record::NOT_VALID_BEFORE),
            record.integer(record::NOT_VALID_AFTER),
        ) {
            record.insert(record::DURATION, FieldValue::Integer(not_after - not_before));
        }
        record
    }

    /// Writes the header and one row per decodable certificate, in input order.
    ///
    /// Blank lines are ignored. A line that is not UTF-8 is skipped like any
    /// other undecodable certificate.
    ///
    /// # Errors
    /// Only failures to read the input or write the output are errors.
    pub fn write_batch<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<BatchSummary> {
        writeln!(output, "{}", header(&FIELD_NAMES))?;

        let mut summary = BatchSummary::default();
        for (index, line) in input.split(b'\n').enumerate() {
            let line = line?;
            let outcome = match std::str::from_utf8(&line) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.process_line(line),
                Err(e) => RecordOutcome::Skipped(SkipReason::InvalidUtf8(e.to_string())),
            };
            match outcome {
                RecordOutcome::Parsed(record) => {
                    writeln!(output, "{}", serialize(&record, &FIELD_NAMES))?;
                    summary.written += 1;
                    tracing::debug!("line {}: wrote {} fields", index + 1, record.len());
                }
                RecordOutcome::Skipped(reason) => {
                    summary.skipped += 1;
                    tracing::warn!("line {}: skipping certificate: {}", index + 1, reason);
                }
            }
        }
        output.flush()?;

        tracing::info!(
            "wrote {} certificate records, skipped {}",
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }
}

fn sha1_hex(der: &[u8]) -> String {
    Sha1::digest(der)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Derives the scan-date label from an input path: the file name with `./`
/// and `_certs` removed, so `./20161017_certs` yields `20161017`.
pub fn scan_date_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
        .replace("./", "")
        .replace("_certs", "")
}

/// Where the table for `input` is written: next to the input, or inside the
/// configured directory, with the configured suffix appended to the file name.
pub fn output_path(input: &Path, output: &OutputConfig) -> PathBuf {
    let mut file_name = input
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(&output.suffix);

    match &output.directory {
        Some(directory) => directory.join(file_name),
        None => input.with_file_name(file_name),
    }
}
