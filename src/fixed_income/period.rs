//! Coupon period schedule spanning an instrument's life.

use super::error::FixedIncomeError;
use super::instrument::{InstrumentMetadata, PERIOD_COUNT};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// 1-based period number.
    pub number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Length in days.
    pub length: i64,
    /// Interest rate as a fraction.
    pub rate: Decimal,
    /// Multiplier carrying the interest of all prior periods.
    pub cumulative_factor: Decimal,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }

    /// Theoretical value `days` into this period. Not rounded.
    pub fn value_after(
        &self,
        nominal: Decimal,
        coupon_divisor: u32,
        days: i64,
    ) -> Result<Decimal, FixedIncomeError> {
        self.rate
            .checked_mul(Decimal::from(days))
            .and_then(|v| v.checked_div(Decimal::from(self.length)))
            .and_then(|v| v.checked_div(Decimal::from(coupon_divisor)))
            .and_then(|accrued| Decimal::ONE.checked_add(accrued))
            .and_then(|growth| {
                nominal
                    .checked_mul(self.cumulative_factor)?
                    .checked_mul(growth)
            })
            .ok_or(FixedIncomeError::DecimalOverflow {
                period: self.number,
            })
    }
}

/// Ordered periods tiling `[issue_date, maturity)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSchedule {
    pub periods: Vec<Period>,
    pub issue_date: NaiveDate,
    pub maturity: NaiveDate,
}

impl PeriodSchedule {
    /// Generates the periods of `instrument` and applies its accrual policy.
    pub fn build(instrument: &InstrumentMetadata) -> Result<Self, FixedIncomeError> {
        let count = instrument.period_count;
        let boundaries = (0..=count)
            .map(|k| {
                instrument
                    .period_duration
                    .advance(instrument.issue_date, k)
                    .ok_or_else(|| {
                        FixedIncomeError::invalid_field(
                            PERIOD_COUNT,
                            count.to_string(),
                            format!(
                                "schedule of {count} x {} from {} exceeds the supported date range",
                                instrument.period_duration, instrument.issue_date
                            ),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rates = (1..=count)
            .map(|number| instrument.interest_rates.rate_for(number))
            .collect::<Result<Vec<_>, _>>()?;
        let factors = instrument.accrual.cumulative_factors(&rates)?;

        let periods: Vec<Period> = boundaries
            .windows(2)
            .zip(rates.into_iter().zip(factors))
            .zip(1u32..)
            .map(|((bounds, (rate, cumulative_factor)), number)| Period {
                number,
                start_date: bounds[0],
                end_date: bounds[1],
                length: (bounds[1] - bounds[0]).num_days(),
                rate,
                cumulative_factor,
            })
            .collect();

        let maturity = boundaries[boundaries.len() - 1];
        debug!(
            periods = periods.len(),
            issue_date = %instrument.issue_date,
            %maturity,
            accrual = %instrument.accrual,
            "Built period schedule"
        );

        Ok(PeriodSchedule {
            periods,
            issue_date: instrument.issue_date,
            maturity,
        })
    }
}
