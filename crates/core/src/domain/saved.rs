use crate::aggregate::trip_cost;
use crate::domain::itinerary::Itinerary;
use chrono::{DateTime, Utc};

/// A named, frozen copy of an itinerary. Owns its data outright, so later
/// edits to the working plan never reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItinerary {
    pub id: String,
    pub name: String,
    pub itinerary: Itinerary,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

impl SavedItinerary {
    /// Snapshot with a fresh UUID id and the cost frozen at save time.
    pub fn snapshot(name: &str, itinerary: &Itinerary, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            itinerary: itinerary.clone(),
            total_cost: trip_cost(itinerary),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::destination::Destination;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn snapshot_is_independent_of_later_edits() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let working = Itinerary::new(start, start)
            .unwrap()
            .add_destination(
                0,
                Destination {
                    id: "a".to_string(),
                    name: "A".to_string(),
                    location: String::new(),
                    image_url: String::new(),
                    price: 500_000.0,
                    coordinates: None,
                },
            )
            .unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();

        let saved = SavedItinerary::snapshot("  Summer trip ", &working, at);
        let edited = working.remove_destination(0, 0).unwrap();

        assert_eq!(saved.name, "Summer trip");
        assert_eq!(saved.total_cost, 500_000.0);
        assert_eq!(saved.itinerary, working);
        assert_ne!(saved.itinerary, edited);
        assert!(uuid::Uuid::parse_str(&saved.id).is_ok());
    }

    #[test]
    fn snapshots_get_distinct_ids() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let it = Itinerary::new(start, start).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap();
        let a = SavedItinerary::snapshot("a", &it, at);
        let b = SavedItinerary::snapshot("a", &it, at);
        assert_ne!(a.id, b.id);
    }
}
