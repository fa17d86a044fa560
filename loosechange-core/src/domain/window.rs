//! Date range used for budget and transaction queries

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::transaction::API_DATE_FORMAT;

/// Inclusive date range sent as `start_date`/`end_date` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// From the first day of `today`'s month through tomorrow, so that
    /// anything recorded today is included regardless of timezone.
    pub fn current_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self {
            start,
            end: today + Duration::days(1),
        }
    }

    pub fn start_param(&self) -> String {
        self.start.format(API_DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(API_DATE_FORMAT).to_string()
    }
}
