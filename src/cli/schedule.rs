use super::ui;
use crate::core::Clock;
use crate::core::config::AppConfig;
use crate::fixed_income::{FixedIncomeSource, SOURCE_NAME};
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use std::sync::Arc;

/// Prints the coupon periods of a fixed-income instrument.
pub fn run(config: &AppConfig, clock: Arc<dyn Clock>, ticker: &str) -> Result<()> {
    let instrument = config.instrument(ticker)?;
    if instrument.source != SOURCE_NAME {
        bail!(
            "Instrument {} uses source '{}', schedules are only available for '{}'",
            ticker,
            instrument.source,
            SOURCE_NAME
        );
    }

    let source = FixedIncomeSource::new(config.fixed_income.clone(), clock);
    let (details, schedule) = source
        .schedule(&instrument.metadata)
        .with_context(|| format!("Failed to build schedule for {ticker}"))?;

    println!(
        "\nInstrument: {}",
        ui::style_text(ticker, ui::StyleType::Title)
    );
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Nominal {} {}, {} x {}, coupon divisor {}, capitalization {}",
                details.nominal_value,
                source.settings().currency,
                details.period_count,
                details.period_duration,
                details.coupon_divisor,
                details.accrual
            ),
            ui::StyleType::Subtle
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Start"),
        ui::header_cell("End"),
        ui::header_cell("Days"),
        ui::header_cell("Rate"),
        ui::header_cell("Cumulative Factor"),
    ]);
    for period in &schedule.periods {
        table.add_row(vec![
            ui::number_cell(period.number),
            Cell::new(period.start_date),
            Cell::new(period.end_date),
            ui::number_cell(period.length),
            ui::number_cell(ui::format_rate(period.rate)),
            ui::number_cell(period.cumulative_factor.round_dp(6).normalize()),
        ]);
    }
    println!("{table}");

    println!(
        "{} {}",
        ui::style_text("Maturity:", ui::StyleType::TotalLabel),
        ui::style_text(&schedule.maturity.to_string(), ui::StyleType::TotalValue)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SystemClock;
    use crate::core::config::Instrument;
    use crate::fixed_income::instrument::tests::sample_metadata;

    fn config_with(source: &str) -> AppConfig {
        AppConfig {
            instruments: vec![Instrument {
                ticker: "NOTE".to_string(),
                source: source.to_string(),
                metadata: sample_metadata(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_schedule_for_fixed_income() {
        assert!(run(&config_with("fixedincome"), Arc::new(SystemClock), "NOTE").is_ok());
    }

    #[test]
    fn test_schedule_rejects_other_sources() {
        let err = run(&config_with("ratesapi"), Arc::new(SystemClock), "NOTE").unwrap_err();
        assert!(err.to_string().contains("schedules are only available"));
    }

    #[test]
    fn test_schedule_unknown_ticker() {
        let err = run(&config_with("fixedincome"), Arc::new(SystemClock), "OTHER").unwrap_err();
        assert!(err.to_string().contains("Instrument not found"));
    }
}
