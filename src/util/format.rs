//! Display formatting pinned to the site locale: Moroccan dirham amounts
//! and French long-form dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

pub const CURRENCY_CODE: &str = "MAD";

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const NBSP: char = '\u{a0}';
/// 2^53: from here on every `f64` is an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unrecognized date {0:?}")]
    InvalidDate(String),
}

impl FormatError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "E_INVALID_DATE",
        }
    }
}

/// Format an amount as `1.234,50 MAD` (non-breaking space before the code).
///
/// Amounts are rounded half away from zero to two decimals. Non-finite
/// input is rendered verbatim.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{amount}{NBSP}{CURRENCY_CODE}");
    }

    let magnitude = amount.abs();
    let (units, cents) = if magnitude < EXACT_INTEGER_LIMIT {
        // Below 2^53, so magnitude * 100 stays under u64::MAX.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cents = (magnitude * 100.0).round() as u64;
        ((cents / 100).to_string(), cents % 100)
    } else {
        // Every f64 this large is an integer; `{:.0}` prints it exactly.
        (format!("{magnitude:.0}"), 0)
    };
    let sign = if amount < 0.0 && (cents > 0 || units != "0") { "-" } else { "" };
    format!("{sign}{}{DECIMAL_SEPARATOR}{cents:02}{NBSP}{CURRENCY_CODE}", group_thousands(&units))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Format a date as `15 janvier 2024`.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`.
/// Timestamps keep the calendar day of their own offset.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDate`] for anything else.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    let date = parse_date(input.trim()).ok_or_else(|| FormatError::InvalidDate(input.to_owned()))?;
    Ok(format!("{} {} {}", date.day(), month_name(date.month()), date.year()))
}

fn parse_date(input: &str) -> Option<Date> {
    if let Ok(date) = Date::parse(input, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    if let Ok(stamp) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(stamp.date());
    }
    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    match PrimitiveDateTime::parse(input, naive) {
        Ok(stamp) => Some(stamp.date()),
        Err(_) => None,
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janvier",
        Month::February => "février",
        Month::March => "mars",
        Month::April => "avril",
        Month::May => "mai",
        Month::June => "juin",
        Month::July => "juillet",
        Month::August => "août",
        Month::September => "septembre",
        Month::October => "octobre",
        Month::November => "novembre",
        Month::December => "décembre",
    }
}
