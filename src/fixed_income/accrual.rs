//! Cumulative interest factors under the instrument's capitalization policy.

use super::error::FixedIncomeError;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;

/// How interest earned in earlier periods carries into later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccrualPolicy {
    /// No capitalization, every period accrues on the bare nominal value.
    #[default]
    None,
    /// Running sum of the gross factors `1 + rate` of all prior periods.
    Simple,
    /// Compounded product of the gross factors `1 + rate` of all prior periods.
    Compound,
}

impl AccrualPolicy {
    /// Builds the policy from the capitalization flag and the optional mode
    /// name. A mode without capitalization is ignored.
    pub fn from_flags(capitalization: bool, mode: Option<CapitalizationMode>) -> Self {
        match (capitalization, mode.unwrap_or_default()) {
            (false, _) => AccrualPolicy::None,
            (true, CapitalizationMode::Compound) => AccrualPolicy::Compound,
            (true, CapitalizationMode::Simple) => AccrualPolicy::Simple,
        }
    }

    /// Factor of each period given the rates of periods `1..=n` in order.
    /// The first period's factor is always one.
    pub fn cumulative_factors(
        &self,
        rates: &[Decimal],
    ) -> Result<Vec<Decimal>, FixedIncomeError> {
        let mut factors = Vec::with_capacity(rates.len());
        let mut running = Decimal::ONE;
        for (number, rate) in (1u32..).zip(rates) {
            factors.push(running);
            if factors.len() == rates.len() {
                break;
            }
            let gross = Decimal::ONE.checked_add(*rate);
            let next = match self {
                AccrualPolicy::None => Some(Decimal::ONE),
                AccrualPolicy::Compound => gross.and_then(|g| running.checked_mul(g)),
                // The sum starts at period 2, replacing the leading one.
                AccrualPolicy::Simple if number == 1 => gross,
                AccrualPolicy::Simple => gross.and_then(|g| running.checked_add(g)),
            };
            running = next.ok_or(FixedIncomeError::DecimalOverflow { period: number + 1 })?;
        }
        Ok(factors)
    }
}

impl Display for AccrualPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AccrualPolicy::None => "none",
                AccrualPolicy::Simple => "simple",
                AccrualPolicy::Compound => "compound",
            }
        )
    }
}

/// Formula used once capitalization is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapitalizationMode {
    #[default]
    Compound,
    Simple,
}

impl FromStr for CapitalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compound" => Ok(CapitalizationMode::Compound),
            "simple" => Ok(CapitalizationMode::Simple),
            _ => Err("expected 'compound' or 'simple'".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: i64) -> Decimal {
        Decimal::new(value, 2)
    }

    #[test]
    fn test_no_capitalization() {
        let factors = AccrualPolicy::None
            .cumulative_factors(&[pct(4), pct(5), pct(6)])
            .unwrap();
        assert_eq!(factors, vec![Decimal::ONE; 3]);
    }

    #[test]
    fn test_compound_factors() {
        let factors = AccrualPolicy::Compound
            .cumulative_factors(&[pct(4), pct(5), pct(6)])
            .unwrap();
        assert_eq!(
            factors,
            vec![
                Decimal::ONE,
                Decimal::new(104, 2),
                Decimal::new(104, 2) * Decimal::new(105, 2),
            ]
        );
        assert_eq!(factors[2], Decimal::new(1092, 3));
    }

    #[test]
    fn test_simple_factors() {
        let factors = AccrualPolicy::Simple
            .cumulative_factors(&[pct(4), pct(5), pct(6)])
            .unwrap();
        assert_eq!(
            factors,
            vec![Decimal::ONE, Decimal::new(104, 2), Decimal::new(209, 2)]
        );
    }

    #[test]
    fn test_policies_agree_for_two_periods() {
        let rates = [pct(4), pct(5)];
        assert_eq!(
            AccrualPolicy::Simple.cumulative_factors(&rates).unwrap(),
            AccrualPolicy::Compound.cumulative_factors(&rates).unwrap()
        );
    }

    #[test]
    fn test_empty_rates() {
        assert!(
            AccrualPolicy::Compound
                .cumulative_factors(&[])
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(AccrualPolicy::from_flags(false, None), AccrualPolicy::None);
        assert_eq!(
            AccrualPolicy::from_flags(false, Some(CapitalizationMode::Simple)),
            AccrualPolicy::None
        );
        assert_eq!(AccrualPolicy::from_flags(true, None), AccrualPolicy::Compound);
        assert_eq!(
            AccrualPolicy::from_flags(true, Some(CapitalizationMode::Simple)),
            AccrualPolicy::Simple
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            "Simple".parse::<CapitalizationMode>(),
            Ok(CapitalizationMode::Simple)
        );
        assert_eq!(
            "compound".parse::<CapitalizationMode>(),
            Ok(CapitalizationMode::Compound)
        );
        assert!("sum".parse::<CapitalizationMode>().is_err());
    }

    #[test]
    fn test_factor_overflow_is_an_error() {
        // 1.1^n leaves the decimal range before period 720.
        let rates = vec![pct(10); 720];
        assert!(matches!(
            AccrualPolicy::Compound.cumulative_factors(&rates),
            Err(FixedIncomeError::DecimalOverflow { .. })
        ));
        assert_eq!(
            AccrualPolicy::Simple.cumulative_factors(&rates).unwrap().len(),
            720
        );
    }

    #[test]
    fn test_last_period_growth_is_not_computed() {
        let rates = [Decimal::MAX];
        assert_eq!(
            AccrualPolicy::Compound.cumulative_factors(&rates).unwrap(),
            vec![Decimal::ONE]
        );
    }
}
