//! Pricing abstractions shared by every quote source

use crate::core::metadata::Metadata;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced quote: amount, the instant it applies to and its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Decimal,
    pub time: DateTime<FixedOffset>,
    pub currency: String,
}

/// Host interface every pluggable source implements.
///
/// `metadata` is the instrument's registry entry; sources that fetch prices
/// over the network usually only need the ticker, sources that compute prices
/// only need the metadata.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Name the source is registered under.
    fn name(&self) -> &str;

    async fn get_latest_price(&self, ticker: &str, metadata: &Metadata) -> Result<Quote>;

    async fn get_historical_price(
        &self,
        ticker: &str,
        metadata: &Metadata,
        date: NaiveDate,
    ) -> Result<Quote>;
}
