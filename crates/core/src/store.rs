//! Itinerary edit operations.
//!
//! Each operation borrows the current itinerary and returns a new one, so a
//! failed edit leaves the caller's value exactly as it was.

use crate::aggregate::trip_cost;
use crate::domain::destination::Destination;
use crate::domain::itinerary::{Itinerary, ItineraryDay};
use crate::error::{validate_amount, PlanError};
use crate::time::DateRange;
use chrono::NaiveDate;
use std::collections::HashMap;

impl Itinerary {
    /// Re-spans the plan over `start..=end`. Days whose date is still in range
    /// keep their destinations; new dates start empty.
    pub fn set_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        let date_range = DateRange::new(start, end)?;

        let mut existing: HashMap<NaiveDate, &ItineraryDay> =
            self.days.iter().map(|day| (day.date, day)).collect();
        let days = date_range
            .dates()
            .map(|date| match existing.remove(&date) {
                Some(day) => day.clone(),
                None => ItineraryDay::empty(date),
            })
            .collect();

        Ok(Self {
            date_range,
            days,
            budget: self.budget,
        })
    }

    pub fn set_budget(&self, amount: f64) -> Result<Self, PlanError> {
        let budget = validate_amount(amount)?;
        Ok(Self {
            budget,
            ..self.clone()
        })
    }

    /// Appends `destination` as the last stop of `day_index`.
    pub fn add_destination(
        &self,
        day_index: usize,
        destination: Destination,
    ) -> Result<Self, PlanError> {
        self.day(day_index)?;
        destination.validate()?;
        // Each price is finite, but their sum can still overflow.
        let total = trip_cost(self) + destination.price;
        if !total.is_finite() {
            return Err(PlanError::InvalidAmount { amount: total });
        }

        let mut next = self.clone();
        next.days[day_index].destinations.push(destination);
        Ok(next)
    }

    /// Removes the stop at `dest_index`; later stops shift down by one.
    pub fn remove_destination(&self, day_index: usize, dest_index: usize) -> Result<Self, PlanError> {
        let day = self.day(day_index)?;
        check_dest_index(day, dest_index)?;

        let mut next = self.clone();
        next.days[day_index].destinations.remove(dest_index);
        Ok(next)
    }

    /// Drag-reorder: takes the stop at `(from_day, from_index)` out, then
    /// inserts it at `to_index` of `to_day`. When both days are the same,
    /// `to_index` addresses the list after the removal.
    pub fn move_destination(
        &self,
        from_day: usize,
        from_index: usize,
        to_day: usize,
        to_index: usize,
    ) -> Result<Self, PlanError> {
        let source = self.day(from_day)?;
        check_dest_index(source, from_index)?;
        let target = self.day(to_day)?;

        // Insert positions range over 0..=len of the post-removal list.
        let target_len = if from_day == to_day {
            target.destinations.len() - 1
        } else {
            target.destinations.len()
        };
        if to_index > target_len {
            return Err(PlanError::destination_index(to_index, target_len));
        }

        let mut next = self.clone();
        let moved = next.days[from_day].destinations.remove(from_index);
        next.days[to_day].destinations.insert(to_index, moved);
        Ok(next)
    }
}

fn check_dest_index(day: &ItineraryDay, index: usize) -> Result<(), PlanError> {
    if index >= day.destinations.len() {
        return Err(PlanError::destination_index(index, day.destinations.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn dest(id: &str, price: f64) -> Destination {
        Destination {
            id: id.to_string(),
            name: id.to_uppercase(),
            location: "Viet Nam".to_string(),
            image_url: String::new(),
            price,
            coordinates: None,
        }
    }

    fn ids(it: &Itinerary, day: usize) -> Vec<&str> {
        it.days()[day]
            .destinations
            .iter()
            .map(|d| d.id.as_str())
            .collect()
    }

    fn day_with(ids: &[&str]) -> Itinerary {
        let mut it = Itinerary::new(d(1), d(3)).unwrap();
        for id in ids {
            it = it.add_destination(0, dest(id, 1.0)).unwrap();
        }
        it
    }

    #[test]
    fn set_date_range_produces_sequential_days() {
        let it = Itinerary::new(d(1), d(1)).unwrap();
        for end in 1..=10 {
            let next = it.set_date_range(d(1), d(end)).unwrap();
            assert_eq!(next.days().len(), end as usize);
            for (i, day) in next.days().iter().enumerate() {
                assert_eq!(day.date, d(1 + i as u32));
            }
        }
    }

    #[test]
    fn set_date_range_keeps_destinations_by_date() {
        let it = Itinerary::new(d(1), d(3))
            .unwrap()
            .add_destination(0, dest("a", 1.0))
            .unwrap()
            .add_destination(2, dest("c", 1.0))
            .unwrap();

        // Drop June 1st, keep June 3rd, add June 4th-5th.
        let next = it.set_date_range(d(2), d(5)).unwrap();
        assert_eq!(next.days().len(), 4);
        assert_eq!(next.days()[0].date, d(2));
        assert!(next.days()[0].destinations.is_empty());
        assert_eq!(ids(&next, 1), vec!["c"]);
        assert!(next.days()[3].destinations.is_empty());
    }

    #[test]
    fn set_date_range_rejects_inverted_range() {
        let it = Itinerary::new(d(1), d(3)).unwrap();
        let err = it.set_date_range(d(5), d(4)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidRange { .. }));
        assert_eq!(it.days().len(), 3);
    }

    #[test]
    fn set_budget_rejects_negative() {
        let it = Itinerary::new(d(1), d(1)).unwrap();
        assert_eq!(it.set_budget(700_000.0).unwrap().budget(), 700_000.0);
        assert_eq!(
            it.set_budget(-1.0).unwrap_err(),
            PlanError::InvalidAmount { amount: -1.0 }
        );
    }

    #[test]
    fn add_destination_appends_and_validates_day() {
        let it = day_with(&["a", "b"]);
        assert_eq!(ids(&it, 0), vec!["a", "b"]);
        assert!(matches!(
            it.add_destination(3, dest("x", 1.0)),
            Err(PlanError::IndexOutOfRange { what: "day", .. })
        ));
        assert!(matches!(
            it.add_destination(0, dest("x", -1.0)),
            Err(PlanError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn add_destination_rejects_overflowing_trip_cost() {
        let it = Itinerary::new(d(1), d(2))
            .unwrap()
            .add_destination(0, dest("big", 1e308))
            .unwrap();
        assert!(matches!(
            it.add_destination(1, dest("bigger", 1e308)),
            Err(PlanError::InvalidAmount { amount }) if amount.is_infinite()
        ));
        assert_eq!(it.days()[1].destinations.len(), 0);
    }

    #[test]
    fn add_then_remove_at_new_index_restores_state() {
        let it = day_with(&["a", "b"]);
        let added = it.add_destination(0, dest("z", 9.0)).unwrap();
        let restored = added.remove_destination(0, 2).unwrap();
        assert_eq!(restored, it);
    }

    #[test]
    fn remove_is_positional() {
        let it = day_with(&["a", "b", "a"]);
        let next = it.remove_destination(0, 2).unwrap();
        assert_eq!(ids(&next, 0), vec!["a", "b"]);
        let next = it.remove_destination(0, 0).unwrap();
        assert_eq!(ids(&next, 0), vec!["b", "a"]);
    }

    #[test]
    fn remove_out_of_range_leaves_state_unchanged() {
        let it = day_with(&["a", "b"]);
        let before = it.clone();
        assert_eq!(
            it.remove_destination(0, 5).unwrap_err(),
            PlanError::IndexOutOfRange {
                what: "destination",
                index: 5,
                len: 2
            }
        );
        assert!(it.remove_destination(9, 0).is_err());
        assert_eq!(it, before);
    }

    #[test]
    fn no_op_move_returns_equal_state() {
        let it = day_with(&["a", "b", "c"]);
        for i in 0..3 {
            assert_eq!(it.move_destination(0, i, 0, i).unwrap(), it);
        }
    }

    #[test]
    fn same_day_move_uses_post_removal_index() {
        let it = day_with(&["a", "b", "c", "d"]);

        // Dragging "a" down to the last slot: after removal the list is
        // [b, c, d], so the last insert position is 3.
        let next = it.move_destination(0, 0, 0, 3).unwrap();
        assert_eq!(ids(&next, 0), vec!["b", "c", "d", "a"]);

        let next = it.move_destination(0, 3, 0, 0).unwrap();
        assert_eq!(ids(&next, 0), vec!["d", "a", "b", "c"]);

        let next = it.move_destination(0, 0, 0, 2).unwrap();
        assert_eq!(ids(&next, 0), vec!["b", "c", "a", "d"]);

        // 4 would be valid only before the removal.
        assert!(matches!(
            it.move_destination(0, 0, 0, 4),
            Err(PlanError::IndexOutOfRange { index: 4, len: 3, .. })
        ));
    }

    #[test]
    fn cross_day_move_inserts_into_target() {
        let it = day_with(&["a", "b"])
            .add_destination(1, dest("x", 1.0))
            .unwrap();

        let next = it.move_destination(0, 1, 1, 0).unwrap();
        assert_eq!(ids(&next, 0), vec!["a"]);
        assert_eq!(ids(&next, 1), vec!["b", "x"]);

        // Appending to the target is allowed (index == len).
        let next = it.move_destination(0, 0, 1, 1).unwrap();
        assert_eq!(ids(&next, 1), vec!["x", "a"]);

        // Into an empty day.
        let next = it.move_destination(0, 0, 2, 0).unwrap();
        assert_eq!(ids(&next, 2), vec!["a"]);
        assert!(it.move_destination(0, 0, 2, 1).is_err());
    }

    #[test]
    fn move_rejects_bad_source_and_target_days() {
        let it = day_with(&["a"]);
        assert!(it.move_destination(0, 1, 1, 0).is_err());
        assert!(it.move_destination(1, 0, 0, 0).is_err());
        assert!(it.move_destination(0, 0, 7, 0).is_err());
    }
}
