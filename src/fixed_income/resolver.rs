//! Resolution of a query date onto its period and the theoretical price.

use super::error::FixedIncomeError;
use super::instrument::InstrumentMetadata;
use super::period::{Period, PeriodSchedule};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which period owns a date that falls exactly on a boundary between two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryRule {
    /// The boundary starts the next period, so it carries no accrued interest.
    #[default]
    OpensNext,
    /// The boundary ends the period it terminates and carries its full coupon.
    /// Equivalent to a forward as-of lookup on period end dates with exact
    /// matches allowed.
    ClosesPrevious,
}

/// Finds the period enclosing `date`, rejecting dates outside
/// `[issue_date, maturity)`.
pub fn resolve_period(
    schedule: &PeriodSchedule,
    date: NaiveDate,
    rule: BoundaryRule,
) -> Result<&Period, FixedIncomeError> {
    let out_of_coverage = || FixedIncomeError::DateOutOfCoverage {
        date,
        issue_date: schedule.issue_date,
        maturity: schedule.maturity,
    };
    if date < schedule.issue_date || date >= schedule.maturity {
        return Err(out_of_coverage());
    }

    let found = match rule {
        BoundaryRule::OpensNext => schedule.periods.iter().find(|p| p.contains(date)),
        BoundaryRule::ClosesPrevious => schedule
            .periods
            .iter()
            .find(|p| p.start_date <= date && date <= p.end_date),
    };
    found.ok_or_else(out_of_coverage)
}

/// Theoretical value of `instrument` on `date`, rounded to two places.
pub fn price_on(
    instrument: &InstrumentMetadata,
    schedule: &PeriodSchedule,
    date: NaiveDate,
    rule: BoundaryRule,
) -> Result<Decimal, FixedIncomeError> {
    let period = resolve_period(schedule, date, rule)?;
    let day_diff = (date - period.start_date).num_days();
    let price = period
        .value_after(instrument.nominal_value, instrument.coupon_divisor, day_diff)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    debug!(
        %date,
        period = period.number,
        day_diff,
        length = period.length,
        %price,
        "Resolved daily price"
    );
    Ok(price)
}
