use chrono::{Duration, NaiveDate};

use crate::errors::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// `[reference - days, reference]`, both ends inclusive.
    pub fn trailing_days(reference: NaiveDate, days: u32) -> Self {
        Self {
            from: reference - Duration::days(days as i64),
            to: reference,
        }
    }

    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| Error::InvalidDate(format!("{s}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_days() {
        let reference = parse_date("2025-10-30").unwrap();
        let range = DateRange::trailing_days(reference, 30);
        assert_eq!(range.from_param(), "2025-09-30");
        assert_eq!(range.to_param(), "2025-10-30");
    }

    #[test]
    fn test_trailing_days_crosses_year() {
        let reference = parse_date("2025-01-10").unwrap();
        let range = DateRange::trailing_days(reference, 30);
        assert_eq!(range.from_param(), "2024-12-11");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(parse_date("30/10/2025"), Err(Error::InvalidDate(_))));
    }
}
