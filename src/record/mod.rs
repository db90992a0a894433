//! The flat per-certificate record and its fixed column vocabulary.

pub mod serializer;

use std::collections::BTreeMap;
use std::fmt;

pub const DATE: &str = "date";
pub const SHA1: &str = "sha1";
pub const VERSION: &str = "version";
pub const SERIAL_NUMBER: &str = "serial_number";
pub const ENC_SUBJECT: &str = "enc_subject";
pub const ENC_ISSUER: &str = "enc_issuer";
pub const NOT_VALID_BEFORE: &str = "not_valid_before";
pub const NOT_VALID_BEFORE_RAW: &str = "not_valid_before_raw";
pub const NOT_VALID_AFTER: &str = "not_valid_after";
pub const NOT_VALID_AFTER_RAW: &str = "not_valid_after_raw";
pub const DURATION: &str = "duration";
pub const KEY_ALGORITHM: &str = "key_algorithm";
pub const SIG_ALGORITHM: &str = "sig_algorithm";
pub const KEY_TYPE: &str = "key_type";
pub const KEY_LENGTH: &str = "key_length";
pub const EXPONENT: &str = "exponent";
pub const CURVE: &str = "curve";
pub const SIZE: &str = "size";
pub const SELF_SIGNED: &str = "self_signed";
pub const FEED_MATCH: &str = "feed_match";

/// Every column of the output table, in output order.
///
/// Distinguished-name attributes other than the nine listed per name are kept
/// in the record but have no column.
pub const FIELD_NAMES: [&str; 38] = [
    DATE,
    SHA1,
    VERSION,
    SERIAL_NUMBER,
    ENC_SUBJECT,
    "enc_subject_C",
    "enc_subject_CN",
    "enc_subject_L",
    "enc_subject_O",
    "enc_subject_OU",
    "enc_subject_ST",
    "enc_subject_emailAddress",
    "enc_subject_unstructuredName",
    "enc_subject_serialNumber",
    ENC_ISSUER,
    "enc_issuer_C",
    "enc_issuer_CN",
    "enc_issuer_L",
    "enc_issuer_O",
    "enc_issuer_OU",
    "enc_issuer_ST",
    "enc_issuer_emailAddress",
    "enc_issuer_unstructuredName",
    "enc_issuer_serialNumber",
    NOT_VALID_BEFORE,
    NOT_VALID_BEFORE_RAW,
    NOT_VALID_AFTER,
    NOT_VALID_AFTER_RAW,
    DURATION,
    KEY_ALGORITHM,
    SIG_ALGORITHM,
    KEY_TYPE,
    KEY_LENGTH,
    EXPONENT,
    CURVE,
    SIZE,
    SELF_SIGNED,
    FEED_MATCH,
];

/// A single scalar value held by a [`CertificateRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
    /// Free text taken from the decoder report or the input line.
    Text(String),
    /// Text that has already been pattern-escaped, so it never carries a bare
    /// delimiter or backslash.
    Escaped(String),
    /// Present in the record but deliberately blank.
    Empty,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Pattern-escapes `value` so every regular-expression metacharacter is
    /// preceded by a backslash.
    pub fn escaped(value: &str) -> Self {
        FieldValue::Escaped(regex::escape(value))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) | FieldValue::Escaped(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Text(value) | FieldValue::Escaped(value) => f.write_str(value),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// Metadata extracted from one certificate, keyed by column name.
///
/// A record is built fresh for every certificate and dropped once its output
/// line has been written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl CertificateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_unique() {
        let mut names = FIELD_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIELD_NAMES.len());
        assert_eq!(FIELD_NAMES.len(), 38);
    }

    #[test]
    fn escaped_values_quote_metacharacters() {
        let value = FieldValue::escaped("O=Acme|Co.");
        assert_eq!(value.as_str(), Some(r"O=Acme\|Co\."));
    }

    #[test]
    fn display_renders_each_variant() {
        assert_eq!(FieldValue::Integer(-7).to_string(), "-7");
        assert_eq!(FieldValue::Boolean(false).to_string(), "false");
        assert_eq!(FieldValue::text("rsa").to_string(), "rsa");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }

    #[test]
    fn typed_accessors() {
        let mut record = CertificateRecord::new();
        record.insert(VERSION, FieldValue::Integer(3));
        record.insert(KEY_TYPE, FieldValue::text("rsa"));
        assert_eq!(record.integer(VERSION), Some(3));
        assert_eq!(record.text(VERSION), None);
        assert_eq!(record.text(KEY_TYPE), Some("rsa"));
        assert!(record.contains(KEY_TYPE));
        assert!(!record.contains(CURVE));

        record.insert(VERSION, FieldValue::Integer(1));
        assert_eq!(record.integer(VERSION), Some(1));
        assert_eq!(record.len(), 2);
    }
}
