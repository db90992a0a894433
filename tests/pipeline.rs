mod util;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use certmeta::batch::{BatchRecordWriter, BatchSummary, RecordOutcome, SkipReason};
use certmeta::decoder::CommandDecoder;
use certmeta::record::FIELD_NAMES;
use certmeta::record::serializer::{header, split_row};
use pretty_assertions::assert_eq;

fn rows(output: &[u8]) -> Vec<HashMap<String, String>> {
    let text = String::from_utf8(output.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(header(&FIELD_NAMES).as_str()));
    lines
        .map(|line| {
            let columns = split_row(line);
            assert_eq!(columns.len(), FIELD_NAMES.len(), "column count for {line}");
            FIELD_NAMES
                .iter()
                .map(|name| name.to_string())
                .zip(columns)
                .collect()
        })
        .collect()
}

fn writer() -> BatchRecordWriter<CommandDecoder> {
    BatchRecordWriter::builder()
        .decoder(CommandDecoder::default())
        .scan_date("20161017".to_string())
        .build()
}

/// Runs the fixture batch through the real openssl decoder.
#[test]
fn openssl_batch_skips_undecodable_certificate() {
    if !util::openssl_available() {
        return;
    }

    let input = BufReader::new(File::open(util::fixture("20161017_certs")).unwrap());
    let mut output = Vec::new();
    let summary = writer().write_batch(input, &mut output).unwrap();
    assert_eq!(summary, BatchSummary { written: 2, skipped: 1 });

    let rows = rows(&output);
    assert_eq!(rows.len(), 2);

    let rsa = &rows[0];
    assert_eq!(rsa["sha1"], util::RSA_SHA1);
    assert_eq!(rsa["date"], "20161017");
    assert_eq!(rsa["version"], "3");
    assert_eq!(rsa["serial_number"], "1234");
    assert_eq!(rsa["enc_subject_CN"], "localhost");
    assert_eq!(rsa["enc_subject_O"], r"MyCompany Ltd\.");
    assert_eq!(rsa["not_valid_before"], "1792182791");
    assert_eq!(rsa["not_valid_before_raw"], "'Oct 16 20:33:11 2026 GMT'");
    assert_eq!(rsa["duration"], "31536000");
    assert_eq!(rsa["key_type"], "rsa");
    assert_eq!(rsa["key_length"], "1024");
    assert_eq!(rsa["exponent"], "65537");
    assert_eq!(rsa["curve"], "");
    assert_eq!(rsa["size"], "734");
    assert_eq!(rsa["self_signed"], "true");
    assert_eq!(rsa["feed_match"], "false");

    let ec = &rows[1];
    assert_eq!(ec["sha1"], util::EC_SHA1);
    assert_eq!(ec["serial_number"], "0A1B2C3D4E5F60718293A4B5C6D7E8F9");
    assert_eq!(ec["enc_subject_CN"], r"server\.example\.com");
    assert_eq!(ec["enc_issuer_CN"], "localhost");
    assert_eq!(ec["duration"], "7776000");
    assert_eq!(ec["key_type"], "ecdsa");
    assert_eq!(ec["key_length"], "256");
    assert_eq!(ec["curve"], "prime256v1");
    assert_eq!(ec["exponent"], "");
    assert_eq!(ec["size"], "516");
    assert_eq!(ec["self_signed"], "false");
}

#[test]
fn openssl_rejection_is_reported_as_a_skip() {
    if !util::openssl_available() {
        return;
    }

    let outcome = writer().process_line("00,bm90IGEgY2VydGlmaWNhdGU=");
    assert!(matches!(
        outcome,
        RecordOutcome::Skipped(SkipReason::Decoder(_))
    ));
}

#[test]
fn each_certificate_is_parsed_independently() {
    if !util::openssl_available() {
        return;
    }

    let lines = std::fs::read_to_string(util::fixture("20161017_certs")).unwrap();
    let ec_line = lines.lines().nth(2).unwrap();
    let writer = writer();

    let RecordOutcome::Parsed(alone) = writer.process_line(ec_line) else {
        panic!("ec certificate should decode");
    };
    for line in lines.lines().take(2) {
        let _ = writer.process_line(line);
    }
    let RecordOutcome::Parsed(after_others) = writer.process_line(ec_line) else {
        panic!("ec certificate should decode");
    };
    assert_eq!(alone, after_others);
}
