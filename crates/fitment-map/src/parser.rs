//! Application string parsing.
//!
//! A part application looks like `2005-2010 Honda Accord (Front Left) notes`:
//! a leading year range, the vehicle text, an optional parenthesized position
//! phrase, and optional trailing notes.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use fitment_model::{FitmentError, PartApplication, Result};

static LEADING_YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{4})\b").expect("Invalid year range regex"));

static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{4})\b").expect("Invalid year range regex"));

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("Invalid parenthesis regex"));

/// Parses a raw application string.
///
/// Strings without a leading `YYYY-YYYY` range come back with `year_range`
/// unset and every other parsed field empty; callers must check
/// [`PartApplication::is_parsed`] before expanding.
///
/// # Errors
///
/// Returns [`FitmentError::Parsing`] when the leading range is inverted.
pub fn parse_application(raw: &str) -> Result<PartApplication> {
    let mut application = PartApplication::unparsed(raw);

    let text = raw.trim();
    let text = text.strip_suffix(';').unwrap_or(text).trim_end();

    let Some(anchor) = LEADING_YEAR_RANGE.find(text) else {
        debug!(text, "application has no leading year range");
        return Ok(application);
    };
    application.year_range = Some(extract_year_range(anchor.as_str())?);

    let remainder = text[anchor.end()..].trim();
    match PARENTHESIZED.captures(remainder) {
        Some(captures) => {
            let Some(whole) = captures.get(0) else {
                return Ok(application);
            };
            application.vehicle_text = non_empty(&remainder[..whole.start()]);
            application.position_text = captures.get(1).and_then(|m| non_empty(m.as_str()));
            application.additional_notes = non_empty(&remainder[whole.end()..]);
        }
        None => {
            application.vehicle_text = non_empty(remainder);
        }
    }

    debug!(
        text,
        year_range = ?application.year_range,
        vehicle_text = ?application.vehicle_text,
        position_text = ?application.position_text,
        "parsed application"
    );
    Ok(application)
}

/// Extracts the first `YYYY-YYYY` range from the text.
///
/// # Errors
///
/// Returns [`FitmentError::Parsing`] when no range is present or when the
/// start year is after the end year.
pub fn extract_year_range(text: &str) -> Result<(u16, u16)> {
    let captures = YEAR_RANGE
        .captures(text)
        .ok_or_else(|| FitmentError::parsing(format!("No year range found in '{text}'")))?;
    let year = |index: usize| -> Result<u16> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u16>().ok())
            .ok_or_else(|| FitmentError::parsing(format!("Invalid year in '{text}'")))
    };
    let start = year(1)?;
    let end = year(2)?;
    if start > end {
        return Err(FitmentError::parsing(format!(
            "Invalid year range: {start}-{end}"
        )));
    }
    Ok((start, end))
}

/// Every year from `start` through `end`, inclusive. Empty when `end < start`.
pub fn expand_year_range(start: u16, end: u16) -> Vec<u16> {
    (start..=end).collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
