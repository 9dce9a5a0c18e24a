use time::{macros::format_description, Date};

use crate::RollupError;

/// Parses an externally supplied date.
///
/// `DD.MM.YYYY` is the display format and is tried first; ISO `YYYY-MM-DD` is
/// still accepted for older stored values and query strings. Day and month may
/// omit their leading zero in both forms.
pub fn parse_date(input: &str) -> Result<Date, RollupError> {
    let trimmed = input.trim();

    Date::parse(
        trimmed,
        format_description!("[day padding:none].[month padding:none].[year]"),
    )
    .or_else(|_| {
        Date::parse(
            trimmed,
            format_description!("[year]-[month padding:none]-[day padding:none]"),
        )
    })
    .map_err(|_| RollupError::InvalidDate(input.to_string()))
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}.{:02}.{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// An optionally bounded, inclusive range of dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: Option<Date>,
    to: Option<Date>,
}

impl DateRange {
    pub fn new(from: Option<Date>, to: Option<Date>) -> Result<Self, RollupError> {
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(RollupError::InvalidDateRange { from, to });
            }
        }

        Ok(Self { from, to })
    }

    /// Builds a range from query string values. Blank values are unbounded.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, RollupError> {
        let parse_bound = |value: Option<&str>| match value.map(str::trim) {
            Some(value) if !value.is_empty() => parse_date(value).map(Some),
            _ => Ok(None),
        };

        Self::new(parse_bound(from)?, parse_bound(to)?)
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn single(date: Date) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
        }
    }

    pub fn from(&self) -> Option<Date> {
        self.from
    }

    pub fn to(&self) -> Option<Date> {
        self.to
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Number of calendar days covered, when both bounds are set.
    pub fn days(&self) -> Option<i64> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((to - from).whole_days() + 1),
            _ => None,
        }
    }
}
