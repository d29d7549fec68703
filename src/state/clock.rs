//! Parsing and formatting of `minutes:seconds` clock text

use crate::error::EditError;

/// Parse a `minutes:seconds` literal into a total number of seconds.
///
/// The text is split once on the first colon. Both halves must be
/// non-negative integers, and a blank half counts as zero (`"5:"` is five
/// minutes). Seconds of 60 or more are taken literally, so `"2:90"` yields
/// 210.
pub fn parse_clock(input: &str) -> Result<i64, EditError> {
    let malformed = || EditError::Malformed {
        input: input.to_string(),
    };

    let (minutes, seconds) = input.split_once(':').ok_or_else(malformed)?;
    let minutes = parse_part(minutes).ok_or_else(malformed)?;
    let seconds = parse_part(seconds).ok_or_else(malformed)?;

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(malformed)
}

fn parse_part(part: &str) -> Option<i64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    // i64::from_str accepts a leading '+' or '-'
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Render seconds as `M:SS`, with a leading minus for negative values
pub fn format_clock(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let abs = total_seconds.unsigned_abs();
    format!("{}{}:{:02}", sign, abs / 60, abs % 60)
}
