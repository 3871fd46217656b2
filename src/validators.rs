//! Input validators
//!
//! Pure text -> typed-value parsers for every answer category the intake
//! flow accepts. No state, no side effects; each failure maps to one of
//! the three recoverable categories the presenter knows how to phrase.

use serde::{Deserialize, Serialize};

/// Why a single answer was rejected.
///
/// Every variant is recoverable: the state machine re-prompts the same
/// stage and the session draft stays untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// Expected a numeric answer, got something unparseable or negative.
    NotANumber,
    /// Expected one of a finite set of choice tokens.
    InvalidOption,
    /// Double-bed count exceeds the bed count for the room being entered.
    DoublesExceedBeds,
}

/// A 1-or-2 answer to a choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryChoice {
    First,
    Second,
}

/// Strict choice parsing: the trimmed input must be exactly "1" or "2".
///
/// Used for language and location prompts, where the keyboard buttons
/// send the bare digit.
pub fn parse_binary_choice(input: &str) -> Result<BinaryChoice, ValidationError> {
    match input.trim() {
        "1" => Ok(BinaryChoice::First),
        "2" => Ok(BinaryChoice::Second),
        _ => Err(ValidationError::InvalidOption),
    }
}

/// Lenient choice parsing: accepts any answer starting with "1" or "2".
///
/// The manager prompt's buttons send their full label ("1 - 50% Partner"),
/// so only the leading digit is significant.
pub fn parse_prefixed_choice(input: &str) -> Result<BinaryChoice, ValidationError> {
    let trimmed = input.trim();
    if trimmed.starts_with('1') {
        Ok(BinaryChoice::First)
    } else if trimmed.starts_with('2') {
        Ok(BinaryChoice::Second)
    } else {
        Err(ValidationError::InvalidOption)
    }
}

/// Largest accepted room/bed count. No real apartment comes close, and
/// capping here keeps every downstream sum (beds + doubles across all
/// rooms plus the hall) comfortably inside `u32`.
pub const MAX_COUNT: u32 = 10_000;

/// Non-negative integer, thousands separators stripped.
///
/// Fractional text ("2.5") is rejected: bed counts are whole numbers.
/// Counts above [`MAX_COUNT`] are rejected as not-a-number so the
/// capacity arithmetic can never overflow.
pub fn parse_count(input: &str) -> Result<u32, ValidationError> {
    let cleaned = strip_separators(input);
    if cleaned.is_empty() {
        return Err(ValidationError::NotANumber);
    }

    let count: u32 = cleaned.parse().map_err(|_| ValidationError::NotANumber)?;
    if count > MAX_COUNT {
        return Err(ValidationError::NotANumber);
    }

    Ok(count)
}

/// Non-negative monetary amount, thousands separators stripped.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let cleaned = strip_separators(input);
    if cleaned.is_empty() {
        return Err(ValidationError::NotANumber);
    }

    let value: f64 = cleaned.parse().map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::NotANumber);
    }

    Ok(value)
}

/// Double-bed count for a room whose bed count is already known.
pub fn parse_doubles(input: &str, beds: u32) -> Result<u32, ValidationError> {
    let doubles = parse_count(input)?;
    if doubles > beds {
        return Err(ValidationError::DoublesExceedBeds);
    }
    Ok(doubles)
}

fn strip_separators(input: &str) -> String {
    input.trim().replace(',', "")
}
