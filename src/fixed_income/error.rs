//! Error type raised by the fixed-income pricing engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Pattern every period duration must match, quoted back in format errors.
pub const PERIOD_DURATION_PATTERN: &str = r"^\d+[YM]$";

/// A failure of the fixed-income calculator. A quote is all-or-nothing, so
/// every cause aborts the call that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedIncomeError {
    /// One or more required metadata keys are absent.
    #[error("The following metadata not provided: {}", .fields.join(", "))]
    MissingMetadata { fields: Vec<String> },

    /// A metadata value is present but cannot be parsed into its type.
    #[error("Invalid value '{value}' for metadata '{field}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "Incorrect period duration format '{value}', expected r'{}'",
        PERIOD_DURATION_PATTERN
    )]
    MalformedDuration { value: String },

    /// An interest rate schedule entry is not a number.
    #[error("Incorrect interest rate '{value}' for period {period}")]
    MalformedRate { period: u32, value: String },

    #[error("No interest rate provided for period {period}")]
    MissingRateEntry { period: u32 },

    /// Accrued value of a period does not fit the decimal range.
    #[error("Value of period {period} exceeds the supported decimal range")]
    DecimalOverflow { period: u32 },

    #[error("Date {date} is outside of the instrument coverage [{issue_date}, {maturity})")]
    DateOutOfCoverage {
        date: NaiveDate,
        issue_date: NaiveDate,
        maturity: NaiveDate,
    },
}

impl FixedIncomeError {
    pub(crate) fn invalid_field(
        field: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
