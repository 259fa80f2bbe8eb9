//! Raw form input and its validated counterpart.

use super::{
    EstimateHours, ValidationError,
    schedule::{parse_user_date, validate_date_range},
    validation::validate_title,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw task form fields as the requester typed them.
///
/// Empty strings stand for absent optional fields, matching how a chat form
/// round trip delivers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraftForm {
    /// Task name.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Estimate in decimal hours, or empty.
    pub estimate: String,
    /// Start date as `DD/MM/YYYY`, or empty.
    pub start_date: String,
    /// End date as `DD/MM/YYYY`, or empty.
    pub end_date: String,
}

/// Validated task details carried by a submitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: String,
    estimate: Option<EstimateHours>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl TaskDetails {
    /// Validates a raw form into task details.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first field that fails: blank
    /// title, malformed estimate, malformed date, or an end date preceding
    /// the start date.
    pub fn from_form(form: &TaskDraftForm) -> Result<Self, ValidationError> {
        validate_title(&form.title)?;
        let estimate = parse_optional(&form.estimate, EstimateHours::parse)?;
        let start_date = parse_optional(&form.start_date, parse_user_date)?;
        let end_date = parse_optional(&form.end_date, parse_user_date)?;
        validate_date_range(start_date, end_date)?;

        Ok(Self {
            title: form.title.trim().to_owned(),
            description: form.description.trim().to_owned(),
            estimate,
            start_date,
            end_date,
        })
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the estimate, when one was supplied.
    #[must_use]
    pub const fn estimate(&self) -> Option<EstimateHours> {
        self.estimate
    }

    /// Returns the start date, when one was supplied.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the end date, when one was supplied.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// Applies a parser to a field that treats blank input as absent.
fn parse_optional<T>(
    raw: &str,
    parser: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parser(trimmed).map(Some)
}
