use crate::domain::destination::Destination;
use crate::error::{validate_amount, PlanError};
use crate::time::DateRange;
use chrono::NaiveDate;

/// One calendar day of the trip. Destination order is the visit order.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDay {
    pub date: NaiveDate,
    pub destinations: Vec<Destination>,
}

impl ItineraryDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            destinations: Vec::new(),
        }
    }
}

/// The plan under edit.
///
/// `days.len() == date_range.len_days()` and `days[i].date == start + i`.
/// Fields are crate-private: outside the crate, only the store operations
/// (which return a new value) and `from_parts` can produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub(crate) date_range: DateRange,
    pub(crate) days: Vec<ItineraryDay>,
    pub(crate) budget: f64,
}

impl Itinerary {
    /// Empty plan spanning `start..=end` with no budget set.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        let date_range = DateRange::new(start, end)?;
        let days = date_range.dates().map(ItineraryDay::empty).collect();
        Ok(Self {
            date_range,
            days,
            budget: 0.0,
        })
    }

    /// Rebuilds an itinerary from stored parts, checking every invariant.
    pub fn from_parts(
        date_range: DateRange,
        days: Vec<ItineraryDay>,
        budget: f64,
    ) -> Result<Self, PlanError> {
        validate_amount(budget)?;
        if days.len() != date_range.len_days() {
            return Err(PlanError::MalformedStorage(format!(
                "expected {} days for {}..{}, got {}",
                date_range.len_days(),
                date_range.start(),
                date_range.end(),
                days.len()
            )));
        }
        for (day, expected) in days.iter().zip(date_range.dates()) {
            if day.date != expected {
                return Err(PlanError::MalformedStorage(format!(
                    "day dated {} where {expected} was expected",
                    day.date
                )));
            }
            for dest in &day.destinations {
                dest.validate()?;
            }
        }
        Ok(Self {
            date_range,
            days,
            budget,
        })
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn days(&self) -> &[ItineraryDay] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Result<&ItineraryDay, PlanError> {
        self.days
            .get(index)
            .ok_or_else(|| PlanError::day_index(index, self.days.len()))
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }
}
