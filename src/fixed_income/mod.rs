//! Fixed-income accrual pricing.
//!
//! Computes the theoretical daily value of a bond or note from its static
//! metadata, without any network access. Every quote runs the same pipeline:
//! the metadata is validated into an [`InstrumentMetadata`], its period
//! schedule is generated with cumulative interest factors, and the query date
//! is resolved onto its period to price the accrued interest.

pub mod accrual;
pub mod error;
pub mod instrument;
pub mod period;
pub mod resolver;
pub mod schedule;

pub use accrual::AccrualPolicy;
pub use error::FixedIncomeError;
pub use instrument::InstrumentMetadata;
pub use period::{Period, PeriodSchedule};
pub use resolver::BoundaryRule;

use crate::core::clock::Clock;
use crate::core::metadata::Metadata;
use crate::core::price::{PriceSource, Quote};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Name the fixed-income source registers under.
pub const SOURCE_NAME: &str = "fixedincome";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedIncomeSettings {
    /// Currency attached to every quote.
    pub currency: String,
    /// Zone whose midnight stamps quotes and whose calendar defines "today".
    pub time_zone: Tz,
    pub boundary: BoundaryRule,
}

impl Default for FixedIncomeSettings {
    fn default() -> Self {
        Self {
            currency: "PLN".to_string(),
            time_zone: chrono_tz::Europe::Warsaw,
            boundary: BoundaryRule::default(),
        }
    }
}

/// Prices `metadata` on `date`.
pub fn quote_on(
    metadata: &Metadata,
    date: NaiveDate,
    settings: &FixedIncomeSettings,
) -> Result<Quote, FixedIncomeError> {
    let instrument = InstrumentMetadata::from_metadata(metadata)?;
    let schedule = PeriodSchedule::build(&instrument)?;
    let price = resolver::price_on(&instrument, &schedule, date, settings.boundary)?;

    Ok(Quote {
        price,
        time: midnight(date, settings.time_zone),
        currency: settings.currency.clone(),
    })
}

/// Start of `date` in `tz`. Where a DST change skips local midnight the first
/// existing hour of the day is used.
fn midnight(date: NaiveDate, tz: Tz) -> DateTime<FixedOffset> {
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.fixed_offset())
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Quote source computing prices from instrument metadata.
#[derive(Clone)]
pub struct FixedIncomeSource {
    settings: FixedIncomeSettings,
    clock: Arc<dyn Clock>,
}

impl FixedIncomeSource {
    pub fn new(settings: FixedIncomeSettings, clock: Arc<dyn Clock>) -> Self {
        Self { settings, clock }
    }

    pub fn settings(&self) -> &FixedIncomeSettings {
        &self.settings
    }

    /// Prices the instrument as of today in the configured zone.
    pub fn latest_quote(&self, metadata: &Metadata) -> Result<Quote, FixedIncomeError> {
        let today = self.clock.today(self.settings.time_zone);
        debug!(%today, "Using today's date for latest quote");
        quote_on(metadata, today, &self.settings)
    }

    pub fn historical_quote(
        &self,
        metadata: &Metadata,
        date: NaiveDate,
    ) -> Result<Quote, FixedIncomeError> {
        quote_on(metadata, date, &self.settings)
    }

    /// Validated instrument and its full period schedule.
    pub fn schedule(
        &self,
        metadata: &Metadata,
    ) -> Result<(InstrumentMetadata, PeriodSchedule), FixedIncomeError> {
        let instrument = InstrumentMetadata::from_metadata(metadata)?;
        let schedule = PeriodSchedule::build(&instrument)?;
        Ok((instrument, schedule))
    }
}

#[async_trait]
impl PriceSource for FixedIncomeSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    #[tracing::instrument(name = "FixedIncomeLatest", skip(self, metadata))]
    async fn get_latest_price(&self, ticker: &str, metadata: &Metadata) -> anyhow::Result<Quote> {
        Ok(self.latest_quote(metadata)?)
    }

    #[tracing::instrument(name = "FixedIncomeHistorical", skip(self, metadata))]
    async fn get_historical_price(
        &self,
        ticker: &str,
        metadata: &Metadata,
        date: NaiveDate,
    ) -> anyhow::Result<Quote> {
        Ok(self.historical_quote(metadata, date)?)
    }
}
