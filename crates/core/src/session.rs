//! Event dispatch for the planning screen.
//!
//! The UI shell turns user gestures into [`PlannerEvent`]s and renders
//! whatever [`PlannerSession`] comes back; each event maps onto one store
//! operation.

use crate::domain::destination::Catalog;
use crate::domain::itinerary::Itinerary;
use crate::domain::saved::SavedItinerary;
use crate::error::PlanError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannerEvent {
    SetDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },
    SetBudget {
        amount: f64,
    },
    AddDestination {
        day: usize,
        destination_id: String,
    },
    RemoveDestination {
        day: usize,
        index: usize,
    },
    MoveDestination {
        from_day: usize,
        from_index: usize,
        to_day: usize,
        to_index: usize,
    },
    SelectDay {
        day: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSession {
    pub itinerary: Itinerary,
    /// Zero-based day the editor is focused on.
    pub current_day: usize,
}

impl PlannerSession {
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            itinerary,
            current_day: 0,
        }
    }

    /// Working copy of a saved itinerary; edits do not touch `saved`.
    pub fn from_saved(saved: &SavedItinerary) -> Self {
        Self::new(saved.itinerary.clone())
    }

    pub fn dispatch(&self, event: &PlannerEvent, catalog: &Catalog) -> Result<Self, PlanError> {
        let it = &self.itinerary;
        let next = match event {
            PlannerEvent::SetDateRange { start, end } => {
                let itinerary = it.set_date_range(*start, *end)?;
                let last = itinerary.days().len() - 1;
                return Ok(Self {
                    current_day: self.current_day.min(last),
                    itinerary,
                });
            }
            PlannerEvent::SetBudget { amount } => it.set_budget(*amount)?,
            PlannerEvent::AddDestination {
                day,
                destination_id,
            } => it.add_destination(*day, catalog.find(destination_id)?.clone())?,
            PlannerEvent::RemoveDestination { day, index } => {
                it.remove_destination(*day, *index)?
            }
            PlannerEvent::MoveDestination {
                from_day,
                from_index,
                to_day,
                to_index,
            } => it.move_destination(*from_day, *from_index, *to_day, *to_index)?,
            PlannerEvent::SelectDay { day } => {
                it.day(*day)?;
                return Ok(Self {
                    itinerary: it.clone(),
                    current_day: *day,
                });
            }
        };

        Ok(Self {
            itinerary: next,
            current_day: self.current_day,
        })
    }

    /// Applies `events` in order, stopping at the first failure.
    pub fn replay<'a>(
        &self,
        events: impl IntoIterator<Item = &'a PlannerEvent>,
        catalog: &Catalog,
    ) -> Result<Self, PlanError> {
        let mut session = self.clone();
        for event in events {
            session = session.dispatch(event, catalog)?;
        }
        Ok(session)
    }
}
