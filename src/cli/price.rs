use super::ui;
use crate::core::config::{AppConfig, Instrument};
use crate::core::{Quote, SourceRegistry};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::Cell;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct QuoteOutput<'a> {
    ticker: &'a str,
    source: &'a str,
    #[serde(flatten)]
    quote: &'a Quote,
}

/// Looks up the instrument's source and asks it for a latest or dated quote.
pub async fn fetch_quote(
    registry: &SourceRegistry,
    instrument: &Instrument,
    date: Option<NaiveDate>,
) -> Result<Quote> {
    let source = registry.get(&instrument.source)?;
    debug!(
        ticker = %instrument.ticker,
        source = %instrument.source,
        ?date,
        "Fetching quote"
    );
    match date {
        Some(date) => {
            source
                .get_historical_price(&instrument.ticker, &instrument.metadata, date)
                .await
        }
        None => {
            source
                .get_latest_price(&instrument.ticker, &instrument.metadata)
                .await
        }
    }
}

pub async fn run(
    config: &AppConfig,
    registry: &SourceRegistry,
    ticker: &str,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let instrument = config.instrument(ticker)?;
    let quote = fetch_quote(registry, instrument, date)
        .await
        .with_context(|| format!("Failed to price {ticker}"))?;

    if json {
        let output = QuoteOutput {
            ticker,
            source: &instrument.source,
            quote: &quote,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Date"),
        ui::header_cell("Price"),
        ui::header_cell("Currency"),
    ]);
    table.add_row(vec![
        Cell::new(ticker),
        Cell::new(quote.time.format("%Y-%m-%d")),
        ui::price_cell(quote.price),
        Cell::new(&quote.currency),
    ]);
    println!("{table}");
    Ok(())
}
