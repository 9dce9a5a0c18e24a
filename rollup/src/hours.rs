use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::RollupError;

/// Largest value a single entry may log (`NUMERIC(5,2)` in storage).
pub const MAX_HOURS: Decimal = Decimal::from_parts(99_999, 0, 0, false, 2);

/// Hours logged by a single time entry.
///
/// Always positive, at most [`MAX_HOURS`] and never finer than hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Hours(Decimal);

impl Hours {
    pub fn new(value: Decimal) -> Result<Self, RollupError> {
        if value <= Decimal::ZERO || value > MAX_HOURS || value.normalize().scale() > 2 {
            return Err(RollupError::InvalidHours(value.to_string()));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Hours {
    type Error = RollupError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for Decimal {
    fn from(hours: Hours) -> Self {
        hours.0
    }
}

impl FromStr for Hours {
    type Err = RollupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| RollupError::InvalidHours(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounds an exact amount to whole currency units. Only used when rendering.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Rounds an exact hour sum to two fraction digits. Only used when rendering.
pub fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dec;

    #[test]
    fn accepts_values_within_bounds() {
        assert_eq!(Hours::new(dec("7.5")).unwrap().value(), dec("7.5"));
        assert_eq!(Hours::new(dec("0.01")).unwrap().value(), dec("0.01"));
        assert_eq!(Hours::new(dec("999.99")).unwrap().value(), MAX_HOURS);
    }

    #[test]
    fn rejects_zero_and_negative_values() {
        assert!(Hours::new(Decimal::ZERO).is_err());
        assert!(Hours::new(dec("-1")).is_err());
    }

    #[test]
    fn rejects_values_above_max() {
        assert_eq!(
            Hours::new(dec("1000")).unwrap_err(),
            RollupError::InvalidHours("1000".to_string())
        );
    }

    #[test]
    fn rejects_sub_hundredth_precision() {
        assert!(Hours::new(dec("1.005")).is_err());
        // trailing zeros are not extra precision
        assert!(Hours::new(dec("1.500")).is_ok());
    }

    #[test]
    fn parses_from_string() {
        assert_eq!("2.25".parse::<Hours>().unwrap().value(), dec("2.25"));
        assert!("abc".parse::<Hours>().is_err());
    }

    #[test]
    fn deserializing_validates() {
        let hours: Hours = serde_json::from_str("\"3.5\"").unwrap();
        assert_eq!(hours.value(), dec("3.5"));
        assert!(serde_json::from_str::<Hours>("\"1200\"").is_err());
    }

    #[test]
    fn display_rounding_is_half_even() {
        assert_eq!(round_amount(dec("54.5")), dec("54"));
        assert_eq!(round_amount(dec("55.5")), dec("56"));
        assert_eq!(round_amount(dec("12.49")), dec("12"));
        assert_eq!(round_hours(dec("1.005")), dec("1.00"));
        assert_eq!(round_hours(dec("1.015")), dec("1.02"));
    }
}
