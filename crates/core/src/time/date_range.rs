use crate::error::PlanError;
use anyhow::Context;
use chrono::{Duration, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Longest trip a plan may span, in days (both ends included).
pub const MAX_TRIP_DAYS: i64 = 366;

/// Inclusive calendar range of a trip. `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start || (end - start).num_days() >= MAX_TRIP_DAYS {
            return Err(PlanError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.len_days() {
            return None;
        }
        Some(self.start + Duration::days(index as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len_days()).map(move |i| self.start + Duration::days(i as i64))
    }
}

/// Accepts ISO `YYYY-MM-DD` as well as the `DD/MM/YYYY` display form.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, DISPLAY_FORMAT))
        .with_context(|| format!("invalid date {s:?} (expected YYYY-MM-DD or DD/MM/YYYY)"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
