//! Best-effort extraction of structured values from free-form model replies.
//!
//! The provider is not a structured API: replies are prose that usually, but
//! not always, contains the requested value. These helpers are pure and
//! decoupled from the HTTP layer so every parsing policy can be tested
//! without a live endpoint.

use chrono::NaiveDate;

/// Extract the first run of digits in `reply`, optionally carrying one
/// decimal point (`85`, `85.5`, but not the second number in `4.5.6`).
///
/// A leading minus sign is not part of a digit run, so the result is always
/// non-negative. Returns `None` when the reply contains no digits.
#[must_use]
pub fn first_number(reply: &str) -> Option<f64> {
    let bytes = reply.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    // One decimal point, and only when digits follow it.
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    reply[start..end].parse().ok()
}

/// Clamp a raw score into the documented `[0, 100]` range.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Extract the first `YYYY-MM-DD` substring of `reply` as a calendar date.
///
/// Only the first pattern match is considered: a match that is not a real
/// calendar date (month 13, day 45) yields `None` rather than continuing
/// the scan, so callers fall back deterministically.
#[must_use]
pub fn first_date(reply: &str) -> Option<NaiveDate> {
    let matched = first_date_pattern(reply)?;
    NaiveDate::parse_from_str(matched, "%Y-%m-%d").ok()
}

/// First substring matching the strict 4-2-2 digit-hyphen pattern.
fn first_date_pattern(reply: &str) -> Option<&str> {
    let bytes = reply.as_bytes();
    if bytes.len() < 10 {
        return None;
    }

    for start in 0..=bytes.len() - 10 {
        let window = &bytes[start..start + 10];
        let shape = window[0].is_ascii_digit()
            && window[1].is_ascii_digit()
            && window[2].is_ascii_digit()
            && window[3].is_ascii_digit()
            && window[4] == b'-'
            && window[5].is_ascii_digit()
            && window[6].is_ascii_digit()
            && window[7] == b'-'
            && window[8].is_ascii_digit()
            && window[9].is_ascii_digit();
        if shape {
            return Some(&reply[start..start + 10]);
        }
    }
    None
}

/// Normalize a category/tag reply into an ordered list.
///
/// Newlines and periods count as separators alongside commas. Pieces are
/// trimmed and empty pieces dropped; first-seen order is preserved.
/// Duplicates are kept; deduplication is the caller's policy.
#[must_use]
pub fn split_list(reply: &str) -> Vec<String> {
    reply
        .replace(['\n', '.'], ",")
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
