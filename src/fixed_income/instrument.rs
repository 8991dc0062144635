//! Validation of registry metadata into a typed instrument description.

use super::accrual::{AccrualPolicy, CapitalizationMode};
use super::error::FixedIncomeError;
use super::schedule::{PeriodDuration, RateSchedule};
use crate::core::metadata::{MetaValue, Metadata};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const ISSUE_DATE: &str = "commodity_date";
pub const NOMINAL_VALUE: &str = "fixed_income_nominal_value";
pub const PERIOD_DURATION: &str = "fixed_income_period_duration";
pub const PERIOD_COUNT: &str = "fixed_income_period_count";
pub const INTEREST_RATES: &str = "fixed_income_interest_rates";
pub const COUPON_DIVISOR: &str = "fixed_income_coupon_rate";
pub const CAPITALIZATION: &str = "fixed_income_capitalization";
pub const ACCRUAL_MODE: &str = "fixed_income_accrual_mode";

/// Keys every fixed-income instrument must carry.
pub const REQUIRED_KEYS: [&str; 7] = [
    ISSUE_DATE,
    NOMINAL_VALUE,
    PERIOD_DURATION,
    PERIOD_COUNT,
    INTEREST_RATES,
    COUPON_DIVISOR,
    CAPITALIZATION,
];

/// Static description of a bond or note, parsed once from registry metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentMetadata {
    pub issue_date: NaiveDate,
    pub nominal_value: Decimal,
    pub period_duration: PeriodDuration,
    pub period_count: u32,
    pub interest_rates: RateSchedule,
    pub coupon_divisor: u32,
    pub accrual: AccrualPolicy,
}

impl InstrumentMetadata {
    /// Checks that every required key is present, then parses each value.
    ///
    /// Absent keys are reported together, in declaration order, before any
    /// value is looked at.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, FixedIncomeError> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| !metadata.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FixedIncomeError::MissingMetadata { fields: missing });
        }

        let capitalization = parse_bool(metadata, CAPITALIZATION)?;
        let mode = match metadata.get(ACCRUAL_MODE) {
            Some(value) => Some(
                CapitalizationMode::from_str(&value.to_string()).map_err(|reason| {
                    FixedIncomeError::invalid_field(ACCRUAL_MODE, value.to_string(), reason)
                })?,
            ),
            None => None,
        };

        Ok(InstrumentMetadata {
            issue_date: parse_date(metadata, ISSUE_DATE)?,
            nominal_value: parse_decimal(metadata, NOMINAL_VALUE)?,
            period_duration: text(metadata, PERIOD_DURATION)?.parse()?,
            period_count: parse_positive(metadata, PERIOD_COUNT)?,
            interest_rates: text(metadata, INTEREST_RATES)?.parse()?,
            coupon_divisor: parse_positive(metadata, COUPON_DIVISOR)?,
            accrual: AccrualPolicy::from_flags(capitalization, mode),
        })
    }
}

fn get<'a>(metadata: &'a Metadata, key: &str) -> Result<&'a MetaValue, FixedIncomeError> {
    metadata
        .get(key)
        .ok_or_else(|| FixedIncomeError::MissingMetadata {
            fields: vec![key.to_string()],
        })
}

fn text(metadata: &Metadata, key: &str) -> Result<String, FixedIncomeError> {
    Ok(get(metadata, key)?.to_string())
}

fn parse_date(metadata: &Metadata, key: &str) -> Result<NaiveDate, FixedIncomeError> {
    let value = text(metadata, key)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| FixedIncomeError::invalid_field(key, value.clone(), e.to_string()))
}

fn parse_decimal(metadata: &Metadata, key: &str) -> Result<Decimal, FixedIncomeError> {
    match get(metadata, key)? {
        MetaValue::Integer(i) => Ok(Decimal::from(*i)),
        MetaValue::Float(x) => Decimal::try_from(*x)
            .map_err(|e| FixedIncomeError::invalid_field(key, x.to_string(), e.to_string())),
        MetaValue::Text(s) => Decimal::from_str(s.trim())
            .map_err(|e| FixedIncomeError::invalid_field(key, s.clone(), e.to_string())),
        MetaValue::Bool(b) => Err(FixedIncomeError::invalid_field(
            key,
            b.to_string(),
            "expected a decimal number",
        )),
    }
}

fn parse_positive(metadata: &Metadata, key: &str) -> Result<u32, FixedIncomeError> {
    let value = get(metadata, key)?;
    let parsed = match value {
        MetaValue::Integer(i) => u32::try_from(*i).ok(),
        MetaValue::Text(s) => s.trim().parse::<u32>().ok(),
        MetaValue::Float(_) | MetaValue::Bool(_) => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(FixedIncomeError::invalid_field(
            key,
            value.to_string(),
            "expected a positive integer",
        )),
    }
}

fn parse_bool(metadata: &Metadata, key: &str) -> Result<bool, FixedIncomeError> {
    let value = get(metadata, key)?;
    let parsed = match value {
        MetaValue::Bool(b) => Some(*b),
        MetaValue::Integer(0) => Some(false),
        MetaValue::Integer(1) => Some(true),
        MetaValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| {
        FixedIncomeError::invalid_field(key, value.to_string(), "expected a boolean")
    })
}
