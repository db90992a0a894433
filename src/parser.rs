//! Conversion of a decoder text report into a [`CertificateRecord`].
//!
//! The report is scanned one trimmed line at a time. Each line is matched
//! against a fixed vocabulary of prefixes; everything else is ignored. The
//! only state carried between lines is whether the previous line opened a
//! multi-line serial number. While that flag is set, the next line is taken as
//! the serial whatever it says, ahead of every prefix match.
//!
//! Parsing never fails: a line whose payload does not have the expected shape
//! just leaves its field out of the record.

use crate::dn::{self, DistinguishedName};
use crate::record::{self, CertificateRecord, FieldValue};
use crate::timestamp::parse_timestamp;

/// Bit length recorded for every named-curve key, whatever the curve.
pub const NAMED_CURVE_KEY_LENGTH: i64 = 256;

/// Parses the full text report of one decoded certificate.
///
/// # Example
/// ```
/// use certmeta::parser::parse_decoder_text;
/// let record = parse_decoder_text("Version: 3 (0x2)\nSerial Number:\n    0a:ff\n");
/// assert_eq!(record.integer("version"), Some(3));
/// assert_eq!(record.text("serial_number"), Some("0AFF"));
/// ```
pub fn parse_decoder_text(text: &str) -> CertificateRecord {
    text.lines()
        .map(str::trim)
        .fold(ParserState::default(), ParserState::consume)
        .finish()
}

#[derive(Debug, Default)]
struct ParserState {
    awaiting_serial_continuation: bool,
    record: CertificateRecord,
}

impl ParserState {
    fn consume(mut self, line: &str) -> Self {
        if self.awaiting_serial_continuation {
            self.awaiting_serial_continuation = false;
            self.record.insert(
                record::SERIAL_NUMBER,
                FieldValue::text(line.replace(':', "").to_uppercase()),
            );
            return self;
        }

        if let Some(rest) = line.strip_prefix("Version:") {
            self.set_integer(record::VERSION, rest);
        } else if let Some(rest) = line.strip_prefix("Serial Number:") {
            self.serial_number(rest.trim());
        } else if let Some(rest) = line.strip_prefix("Signature Algorithm:") {
            self.set_text(record::SIG_ALGORITHM, rest);
        } else if let Some(rest) = line.strip_prefix("Issuer:") {
            self.name(record::ENC_ISSUER, rest.trim());
        } else if let Some(rest) = line.strip_prefix("Subject:") {
            self.name(record::ENC_SUBJECT, rest.trim());
        } else if let Some(rest) = line.strip_prefix("Not Before:") {
            self.validity(rest);
        } else if let Some(rest) = line.strip_prefix("Not After :") {
            self.timestamp(record::NOT_VALID_AFTER, record::NOT_VALID_AFTER_RAW, rest.trim());
        } else if let Some(rest) = line
            .strip_prefix("Public Key Algorithm:")
            .or_else(|| line.strip_prefix("Subject Public Key Info:"))
        {
            self.set_text(record::KEY_ALGORITHM, rest);
        } else if let Some(rest) = line
            .strip_prefix("RSA Public Key: (")
            .or_else(|| line.strip_prefix("RSA Public-Key: ("))
        {
            self.record.insert(record::KEY_TYPE, FieldValue::text("rsa"));
            self.set_integer(record::KEY_LENGTH, rest);
        } else if let Some(rest) = line.strip_prefix("Public-Key: (") {
            self.set_integer(record::KEY_LENGTH, rest);
        } else if line.starts_with("EC Public Key:") {
            self.record.insert(record::KEY_TYPE, FieldValue::text("ecdsa"));
        } else if let Some(rest) = line.strip_prefix("ASN1 OID:") {
            self.set_text(record::CURVE, rest);
            self.record
                .insert(record::KEY_LENGTH, FieldValue::Integer(NAMED_CURVE_KEY_LENGTH));
        } else if let Some(rest) = line.strip_prefix("Exponent:") {
            self.set_integer(record::EXPONENT, rest);
        }
        self
    }

    fn finish(mut self) -> CertificateRecord {
        if !self.record.contains(record::KEY_TYPE) {
            let inferred = match self.record.text(record::KEY_ALGORITHM) {
                Some("rsaEncryption") => Some("rsa"),
                Some("id-ecPublicKey") => Some("ecdsa"),
                _ => None,
            };
            if let Some(key_type) = inferred {
                self.record.insert(record::KEY_TYPE, FieldValue::text(key_type));
            }
        }
        self.record
    }

    fn serial_number(&mut self, rest: &str) {
        if !rest.contains('(') {
            self.awaiting_serial_continuation = true;
            return;
        }
        // `4660 (0x1234)` or `-4660 (-0x1234)`
        if let Some(hex) = rest.split_whitespace().find(|token| token.starts_with('(')) {
            let serial = hex
                .replace("(0x", "")
                .replace("(-0x", "-")
                .replace(')', "")
                .to_uppercase();
            self.record.insert(record::SERIAL_NUMBER, FieldValue::text(serial));
        }
    }

    fn name(&mut self, field: &str, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let name = dn::normalize_spacing(raw);
        self.record.insert(field, FieldValue::escaped(&name));
        for (attribute_type, value) in DistinguishedName::split(&name).iter() {
            self.record
                .insert(format!("{field}_{attribute_type}"), FieldValue::escaped(value));
        }
    }

    /// `Not Before: <ts>` optionally followed by `, Not After: <ts>`.
    fn validity(&mut self, rest: &str) {
        let mut parts = rest.split(',').map(str::trim);
        if let Some(not_before) = parts.next() {
            self.timestamp(record::NOT_VALID_BEFORE, record::NOT_VALID_BEFORE_RAW, not_before);
        }
        if let Some(not_after) = parts.next().and_then(|part| part.strip_prefix("Not After:")) {
            self.timestamp(
                record::NOT_VALID_AFTER,
                record::NOT_VALID_AFTER_RAW,
                not_after.trim(),
            );
        }
    }

    fn timestamp(&mut self, field: &str, raw_field: &str, text: &str) {
        if let Some(epoch) = parse_timestamp(text) {
            self.record.insert(field, FieldValue::Integer(epoch));
        }
        self.record.insert(raw_field, FieldValue::text(format!("'{text}'")));
    }

    fn set_text(&mut self, field: &str, rest: &str) {
        let value = rest.trim();
        if !value.is_empty() {
            self.record.insert(field, FieldValue::text(value));
        }
    }

    fn set_integer(&mut self, field: &str, rest: &str) {
        if let Some(value) = leading_integer(rest) {
            self.record.insert(field, FieldValue::Integer(value));
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    text.split_whitespace().next()?.parse().ok()
}
