//! Compounding frequencies.
//!
//! Each variant resolves to the number of times per year that interest is
//! applied. Calendar-based frequencies use a 365.25-day year so that leap
//! years are averaged in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReserveError;

const DAYS_PER_YEAR: Decimal = dec!(365.25);
const TICKS_PER_SECOND: Decimal = dec!(10_000_000);

/// How often interest is compounded within a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Annually,
    #[default]
    Monthly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
    /// 100-nanosecond ticks.
    Tick,
}

impl CompoundingFrequency {
    /// Every frequency in selector order, coarsest first.
    pub const ALL: [CompoundingFrequency; 7] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
        CompoundingFrequency::Hourly,
        CompoundingFrequency::Minutely,
        CompoundingFrequency::Secondly,
        CompoundingFrequency::Tick,
    ];

    /// Compounding periods per year.
    pub fn periods_per_year(self) -> Decimal {
        match self {
            CompoundingFrequency::Annually => Decimal::ONE,
            CompoundingFrequency::Monthly => dec!(12),
            CompoundingFrequency::Daily => DAYS_PER_YEAR,
            CompoundingFrequency::Hourly => DAYS_PER_YEAR * dec!(24),
            CompoundingFrequency::Minutely => DAYS_PER_YEAR * dec!(1440),
            CompoundingFrequency::Secondly => DAYS_PER_YEAR * dec!(86_400),
            CompoundingFrequency::Tick => DAYS_PER_YEAR * dec!(86_400) * TICKS_PER_SECOND,
        }
    }

    /// Resolve a selector position (0 = annually … 6 = tick).
    ///
    /// Positions outside the selector fall back to monthly compounding.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            CompoundingFrequency::Annually => "annually",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Daily => "daily",
            CompoundingFrequency::Hourly => "hourly",
            CompoundingFrequency::Minutely => "minutely",
            CompoundingFrequency::Secondly => "secondly",
            CompoundingFrequency::Tick => "tick",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = ReserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| ReserveError::InvalidParameter {
                field: "compounding_frequency".into(),
                reason: format!(
                    "Unknown frequency '{s}' (expected one of: annually, monthly, daily, \
                     hourly, minutely, secondly, tick)"
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(CompoundingFrequency::Annually.periods_per_year(), dec!(1));
        assert_eq!(CompoundingFrequency::Monthly.periods_per_year(), dec!(12));
        assert_eq!(CompoundingFrequency::Daily.periods_per_year(), dec!(365.25));
        assert_eq!(CompoundingFrequency::Hourly.periods_per_year(), dec!(8766));
        assert_eq!(CompoundingFrequency::Minutely.periods_per_year(), dec!(525960));
        assert_eq!(CompoundingFrequency::Secondly.periods_per_year(), dec!(31557600));
        assert_eq!(
            CompoundingFrequency::Tick.periods_per_year(),
            dec!(315576000000000)
        );
    }

    #[test]
    fn test_from_index_defaults_to_monthly() {
        assert_eq!(CompoundingFrequency::from_index(0), CompoundingFrequency::Annually);
        assert_eq!(CompoundingFrequency::from_index(6), CompoundingFrequency::Tick);
        assert_eq!(CompoundingFrequency::from_index(42), CompoundingFrequency::Monthly);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Daily".parse::<CompoundingFrequency>().unwrap(),
            CompoundingFrequency::Daily
        );
        assert!(" tick ".parse::<CompoundingFrequency>().is_ok());
    }

    #[test]
    fn test_parse_unknown_frequency() {
        let err = "fortnightly".parse::<CompoundingFrequency>().unwrap_err();
        assert!(matches!(err, ReserveError::InvalidParameter { .. }));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&CompoundingFrequency::Secondly).unwrap();
        assert_eq!(json, "\"secondly\"");
        let back: CompoundingFrequency = serde_json::from_str("\"annually\"").unwrap();
        assert_eq!(back, CompoundingFrequency::Annually);
    }
}
