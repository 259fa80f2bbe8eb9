//! Duration and date codec between user-facing and backend wire formats.
//!
//! Users enter estimates as decimal hours (`2.5`) and dates as `DD/MM/YYYY`;
//! the backend expects ISO-8601 durations (`PT2H30M`) and `YYYY-MM-DD`
//! dates. Estimates are held as whole hours plus minutes so that fractional
//! hours round to the nearest minute exactly, without float arithmetic.

use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated non-negative task estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateHours {
    hours: u64,
    minutes: u8,
}

impl EstimateHours {
    /// Largest accepted whole-hour component; keeps minute arithmetic
    /// comfortably in range.
    const MAX_WHOLE_HOURS: u64 = 1_000_000;

    /// Parses a decimal-hours string such as `2.5`.
    ///
    /// Accepts ASCII digits with at most one decimal point; the fractional
    /// part rounds to the nearest minute, carrying into the hour when it
    /// rounds to sixty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEstimate`] for anything that is not
    /// a non-negative decimal number within range.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidEstimate(raw.to_owned());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits =
            |part: &str| part.chars().all(|character| character.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let mut hours: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        if hours > Self::MAX_WHOLE_HOURS {
            return Err(invalid());
        }

        let mut minutes = round_fraction_to_minutes(fraction).ok_or_else(invalid)?;
        if minutes == 60 {
            hours += 1;
            minutes = 0;
        }

        Ok(Self { hours, minutes })
    }

    /// Returns the whole-hour component.
    #[must_use]
    pub const fn whole_hours(self) -> u64 {
        self.hours
    }

    /// Returns the minutes past the whole hour.
    #[must_use]
    pub const fn minutes_past_hour(self) -> u8 {
        self.minutes
    }

    /// Returns the estimate as a total number of minutes.
    #[must_use]
    pub fn total_minutes(self) -> u64 {
        self.hours * 60 + u64::from(self.minutes)
    }

    /// Renders the ISO-8601 duration the backend expects.
    ///
    /// A zero estimate renders as `PT0H`, an explicit zero duration rather
    /// than an absent field.
    #[must_use]
    pub fn to_iso8601(self) -> String {
        if self.minutes == 0 {
            format!("PT{}H", self.hours)
        } else {
            format!("PT{}H{}M", self.hours, self.minutes)
        }
    }
}

impl fmt::Display for EstimateHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes == 0 {
            write!(f, "{}h", self.hours)
        } else {
            write!(f, "{}h {}m", self.hours, self.minutes)
        }
    }
}

/// Rounds a decimal fraction of an hour to the nearest minute.
///
/// Returns 0..=60; 60 signals a carry into the hour. Fractions beyond nine
/// digits are truncated before rounding.
fn round_fraction_to_minutes(fraction: &str) -> Option<u8> {
    if fraction.is_empty() {
        return Some(0);
    }
    let digits: String = fraction.chars().take(9).collect();
    let numerator: u64 = digits.parse().ok()?;
    let mut denominator: u64 = 1;
    for _ in 0..digits.len() {
        denominator = denominator.checked_mul(10)?;
    }
    #[expect(
        clippy::integer_division,
        reason = "round-half-up of numerator/denominator hours to minutes is exact"
    )]
    let minutes = (numerator.checked_mul(120)? + denominator) / (denominator * 2);
    u8::try_from(minutes).ok()
}

/// Parses a user-entered `DD/MM/YYYY` date.
///
/// Requires a zero-padded two-digit day and month and a four-digit year, and
/// the date must exist on the calendar.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateFormat`] otherwise.
pub fn parse_user_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDateFormat(raw.to_owned());
    let mut parts = raw.split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return Err(invalid());
    }
    let all_digits = |part: &str| part.chars().all(|character| character.is_ascii_digit());
    if !all_digits(day) || !all_digits(month) || !all_digits(year) {
        return Err(invalid());
    }

    let day_number: u32 = day.parse().map_err(|_| invalid())?;
    let month_number: u32 = month.parse().map_err(|_| invalid())?;
    let year_number: i32 = year.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year_number, month_number, day_number).ok_or_else(invalid)
}

/// Formats a date in the backend's `YYYY-MM-DD` wire format.
#[must_use]
pub fn format_backend_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date back into the user-facing `DD/MM/YYYY` form.
#[must_use]
pub fn format_user_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Checks that an end date does not precede a start date.
///
/// Both-absent and single-present combinations are valid.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateRange`] when both dates are present
/// and the end precedes the start.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(start_date), Some(end_date)) = (start, end) {
        if end_date < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
    }
    Ok(())
}
