//! Validity timestamp normalization.
//!
//! Decoders print `notBefore`/`notAfter` as `Jan  1 00:00:00 2024 GMT`, sometimes
//! without the trailing zone token. Both forms normalize to UTC epoch seconds.

use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// `Mon D HH:MM:SS YYYY` once runs of whitespace are collapsed to one space.
const DECODER_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none] [hour]:[minute]:[second] [year]");

/// Parses a decoder validity timestamp into UTC epoch seconds.
///
/// The zone-qualified form is tried first, then the bare form. Any zone
/// abbreviation is accepted and ignored: the calendar fields are read as UTC.
/// Returns `None` when neither form matches so the caller can keep the raw
/// text instead.
///
/// # Example
/// ```
/// use certmeta::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("Jan  1 00:00:00 2024 GMT"), Some(1_704_067_200));
/// assert_eq!(parse_timestamp("Jan  1 00:00:00 2024"), Some(1_704_067_200));
/// assert_eq!(parse_timestamp("not a date"), None);
/// ```
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    parse_zoned(&tokens).or_else(|| parse_bare(&tokens))
}

fn parse_zoned(tokens: &[&str]) -> Option<i64> {
    let (zone, rest) = tokens.split_last()?;
    if !is_zone_abbreviation(zone) {
        return None;
    }
    parse_bare(rest)
}

fn parse_bare(tokens: &[&str]) -> Option<i64> {
    let joined = tokens.join(" ");
    PrimitiveDateTime::parse(&joined, DECODER_FORMAT)
        .ok()
        .map(|datetime| datetime.assume_utc().unix_timestamp())
}

fn is_zone_abbreviation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoned_and_bare_forms_agree() {
        let zoned = parse_timestamp("Jan  1 00:00:00 2024 GMT");
        let bare = parse_timestamp("Jan  1 00:00:00 2024");
        assert_eq!(zoned, Some(1_704_067_200));
        assert_eq!(zoned, bare);
    }

    #[test]
    fn zone_abbreviation_does_not_shift_the_result() {
        assert_eq!(
            parse_timestamp("Oct 16 20:33:11 2026 UTC"),
            parse_timestamp("Oct 16 20:33:11 2026 GMT")
        );
        assert_eq!(
            parse_timestamp("Oct 16 20:33:11 2026 PST"),
            Some(1_792_182_791)
        );
    }

    #[test]
    fn two_digit_days_and_single_spacing() {
        assert_eq!(parse_timestamp("Dec 31 23:59:59 1999 GMT"), Some(946_684_799));
        assert_eq!(parse_timestamp("Feb 5 12:00:00 2030"), parse_timestamp("Feb  5 12:00:00 2030 GMT"));
    }

    #[test]
    fn unparseable_text_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("GMT"), None);
        assert_eq!(parse_timestamp("2024-01-01 00:00:00"), None);
        assert_eq!(parse_timestamp("Foo  1 00:00:00 2024 GMT"), None);
        assert_eq!(parse_timestamp("Jan  1 00:00:00 2024 GMT trailing"), None);
    }
}
