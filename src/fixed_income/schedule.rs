//! Parsing of the string-encoded period duration and interest rate schedule.

use super::error::FixedIncomeError;
use chrono::{Months, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

static PERIOD_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>\d+)((?P<years>Y)|(?P<months>M))$")
        .expect("period duration pattern is valid")
});

/// Length of one coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodDuration {
    Years(u32),
    Months(u32),
}

impl PeriodDuration {
    pub fn months(&self) -> u32 {
        match self {
            PeriodDuration::Years(n) => n.saturating_mul(12),
            PeriodDuration::Months(n) => *n,
        }
    }

    /// Advances `anchor` by `count` whole periods.
    ///
    /// Always computed from the anchor rather than step by step, so a day of
    /// month clamped once (Jan 31 -> Feb 29) does not drift the later
    /// boundaries. Days that overflow the target month clamp to its last day.
    /// Returns `None` when the result leaves the supported calendar range.
    pub fn advance(&self, anchor: NaiveDate, count: u32) -> Option<NaiveDate> {
        let months = self.months().checked_mul(count)?;
        anchor.checked_add_months(Months::new(months))
    }
}

impl Display for PeriodDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodDuration::Years(n) => write!(f, "{n}Y"),
            PeriodDuration::Months(n) => write!(f, "{n}M"),
        }
    }
}

impl FromStr for PeriodDuration {
    type Err = FixedIncomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FixedIncomeError::MalformedDuration {
            value: s.to_string(),
        };

        let captures = PERIOD_DURATION_RE.captures(s).ok_or_else(malformed)?;
        let number: u32 = captures["number"].parse().map_err(|_| malformed())?;
        if number == 0 {
            return Err(malformed());
        }

        if captures.name("years").is_some() {
            Ok(PeriodDuration::Years(number))
        } else if captures.name("months").is_some() {
            Ok(PeriodDuration::Months(number))
        } else {
            Err(malformed())
        }
    }
}

/// Per-period interest rates as fractions, keyed by 1-based period number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateSchedule {
    rates: BTreeMap<u32, Decimal>,
}

impl RateSchedule {
    /// Rate of the given period, failing when the schedule has no entry for it.
    pub fn rate_for(&self, period: u32) -> Result<Decimal, FixedIncomeError> {
        self.rates
            .get(&period)
            .copied()
            .ok_or(FixedIncomeError::MissingRateEntry { period })
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromStr for RateSchedule {
    type Err = FixedIncomeError;

    /// Parses percentages separated by `/`, e.g. `"3.5/3.5/4.0"`. The count is
    /// not checked against the number of periods here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rates = s
            .split('/')
            .zip(1u32..)
            .map(|(entry, period)| {
                let percent = Decimal::from_str(entry.trim()).map_err(|_| {
                    FixedIncomeError::MalformedRate {
                        period,
                        value: entry.to_string(),
                    }
                })?;
                Ok((period, percent / Decimal::ONE_HUNDRED))
            })
            .collect::<Result<BTreeMap<_, _>, FixedIncomeError>>()?;

        Ok(RateSchedule { rates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_period_duration() {
        assert_eq!(
            "1Y".parse::<PeriodDuration>().unwrap(),
            PeriodDuration::Years(1)
        );
        assert_eq!(
            "6M".parse::<PeriodDuration>().unwrap(),
            PeriodDuration::Months(6)
        );
        assert_eq!(
            "12M".parse::<PeriodDuration>().unwrap(),
            PeriodDuration::Months(12)
        );
        assert_eq!("3Y".parse::<PeriodDuration>().unwrap().to_string(), "3Y");
    }

    #[test]
    fn test_malformed_period_duration() {
        for value in ["5weeks", "", "Y", "3", "3D", "-1Y", "1y", " 1Y", "1YM", "0M"] {
            let err = value.parse::<PeriodDuration>().unwrap_err();
            assert_eq!(
                err,
                FixedIncomeError::MalformedDuration {
                    value: value.to_string()
                },
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_advance_clamps_to_end_of_month() {
        let monthly = PeriodDuration::Months(1);
        let anchor = date(2020, 1, 31);
        assert_eq!(monthly.advance(anchor, 1), Some(date(2020, 2, 29)));
        assert_eq!(monthly.advance(anchor, 2), Some(date(2020, 3, 31)));
        assert_eq!(monthly.advance(anchor, 3), Some(date(2020, 4, 30)));

        let annual = PeriodDuration::Years(1);
        assert_eq!(annual.advance(date(2020, 2, 29), 1), Some(date(2021, 2, 28)));
        assert_eq!(annual.advance(date(2020, 2, 29), 4), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_advance_out_of_range() {
        let annual = PeriodDuration::Years(1000);
        assert_eq!(annual.advance(date(2020, 1, 1), u32::MAX), None);
    }

    #[test]
    fn test_parse_rate_schedule() {
        let schedule: RateSchedule = "3.5/4.0/4.5".parse().unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.rate_for(1).unwrap(), Decimal::new(35, 3));
        assert_eq!(schedule.rate_for(2).unwrap(), Decimal::new(4, 2));
        assert_eq!(schedule.rate_for(3).unwrap(), Decimal::new(45, 3));
        assert_eq!(
            schedule.rate_for(4),
            Err(FixedIncomeError::MissingRateEntry { period: 4 })
        );
        assert_eq!(
            schedule.rate_for(0),
            Err(FixedIncomeError::MissingRateEntry { period: 0 })
        );
    }

    #[test]
    fn test_parse_single_rate_with_whitespace() {
        let schedule: RateSchedule = " 7.25 ".parse().unwrap();
        assert_eq!(schedule.rate_for(1).unwrap(), Decimal::new(725, 4));
    }

    #[test]
    fn test_malformed_rate_schedule() {
        let err = "3.5/abc/4".parse::<RateSchedule>().unwrap_err();
        assert_eq!(
            err,
            FixedIncomeError::MalformedRate {
                period: 2,
                value: "abc".to_string()
            }
        );

        let err = "3.5//4".parse::<RateSchedule>().unwrap_err();
        assert!(matches!(err, FixedIncomeError::MalformedRate { period: 2, .. }));
    }
}
