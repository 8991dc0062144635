use super::price::fetch_quote;
use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Quote, SourceRegistry};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use futures::future::join_all;
use tracing::{info, warn};

/// Outcome of pricing one registry instrument.
pub struct BatchEntry {
    pub ticker: String,
    pub result: Result<Quote>,
}

/// Prices every instrument concurrently. A failure only affects its own entry.
pub async fn price_all(
    config: &AppConfig,
    registry: &SourceRegistry,
    date: Option<NaiveDate>,
) -> Vec<BatchEntry> {
    let lookups = config.instruments.iter().map(|instrument| async move {
        let result = fetch_quote(registry, instrument, date).await;
        if let Err(e) = &result {
            warn!(
                ticker = %instrument.ticker,
                source = %instrument.source,
                error = %e,
                "Skipping instrument"
            );
        }
        BatchEntry {
            ticker: instrument.ticker.clone(),
            result,
        }
    });
    join_all(lookups).await
}

pub async fn run(
    config: &AppConfig,
    registry: &SourceRegistry,
    date: Option<NaiveDate>,
) -> Result<()> {
    if config.instruments.is_empty() {
        println!("No instruments found in the registry.");
        return Ok(());
    }

    let entries = price_all(config, registry, date).await;
    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    info!(
        priced = entries.len() - failed,
        failed, "Batch pricing finished"
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Date"),
        ui::header_cell("Price"),
        ui::header_cell("Currency"),
        ui::header_cell("Error"),
    ]);
    for entry in &entries {
        match &entry.result {
            Ok(quote) => table.add_row(vec![
                Cell::new(&entry.ticker),
                Cell::new(quote.time.format("%Y-%m-%d")),
                ui::price_cell(quote.price),
                Cell::new(&quote.currency),
                Cell::new(""),
            ]),
            Err(e) => table.add_row(vec![
                Cell::new(&entry.ticker),
                ui::na_cell(true),
                ui::na_cell(true),
                ui::na_cell(true),
                Cell::new(ui::style_text(&format!("{e:#}"), ui::StyleType::Error)),
            ]),
        };
    }
    println!("{table}");

    if failed > 0 {
        println!(
            "{} {}",
            ui::style_text("Skipped:", ui::StyleType::TotalLabel),
            ui::style_text(
                &format!("{failed} of {} instruments", entries.len()),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}
