use crate::domain::destination::Destination;
use crate::domain::itinerary::{Itinerary, ItineraryDay};
use crate::domain::saved::SavedItinerary;
use crate::error::PlanError;
use crate::time::DateRange;
use anyhow::ensure;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// On-disk shape of one saved itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItineraryRecord {
    pub id: String,
    pub name: String,
    pub date_range: [NaiveDate; 2],
    pub days: Vec<DayRecord>,
    pub budget: f64,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub destinations: Vec<Destination>,
}

impl From<&SavedItinerary> for SavedItineraryRecord {
    fn from(saved: &SavedItinerary) -> Self {
        let range = saved.itinerary.date_range();
        Self {
            id: saved.id.clone(),
            name: saved.name.clone(),
            date_range: [range.start(), range.end()],
            days: saved
                .itinerary
                .days()
                .iter()
                .map(|day| DayRecord {
                    date: day.date,
                    destinations: day.destinations.clone(),
                })
                .collect(),
            budget: saved.itinerary.budget(),
            total_cost: saved.total_cost,
            created_at: saved.created_at,
        }
    }
}

impl SavedItineraryRecord {
    pub fn validate_and_into_saved(self) -> anyhow::Result<SavedItinerary> {
        let id = self.id.trim().to_string();
        ensure!(!id.is_empty(), "saved itinerary id must be non-empty");
        ensure!(
            self.total_cost.is_finite() && self.total_cost >= 0.0,
            "totalCost must be >= 0 (got {})",
            self.total_cost
        );

        let [start, end] = self.date_range;
        let range = DateRange::new(start, end)?;
        let days = self
            .days
            .into_iter()
            .map(|day| ItineraryDay {
                date: day.date,
                destinations: day.destinations,
            })
            .collect();
        let itinerary = Itinerary::from_parts(range, days, self.budget)?;

        Ok(SavedItinerary {
            id,
            name: self.name,
            itinerary,
            total_cost: self.total_cost,
            created_at: self.created_at,
        })
    }
}

/// Decodes the whole blob. Any bad record or a repeated id makes the entire
/// blob malformed.
pub fn decode_all(text: &str) -> Result<Vec<SavedItinerary>, PlanError> {
    let records = serde_json::from_str::<Vec<SavedItineraryRecord>>(text)
        .map_err(|err| PlanError::MalformedStorage(err.to_string()))?;

    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let saved = record
            .validate_and_into_saved()
            .map_err(|err| PlanError::MalformedStorage(format!("{err:#}")))?;
        if !seen.insert(saved.id.clone()) {
            return Err(PlanError::MalformedStorage(format!(
                "duplicate id {}",
                saved.id
            )));
        }
        out.push(saved);
    }
    Ok(out)
}

/// Refuses non-finite amounts: JSON would write them as `null`, and the next
/// `decode_all` would then reject the whole blob.
pub fn encode_all(saved: &[SavedItinerary]) -> anyhow::Result<String> {
    for s in saved {
        ensure!(
            s.total_cost.is_finite() && s.itinerary.budget().is_finite(),
            "saved itinerary {} has a non-finite amount (totalCost {}, budget {})",
            s.id,
            s.total_cost,
            s.itinerary.budget()
        );
    }
    let records: Vec<SavedItineraryRecord> = saved.iter().map(Into::into).collect();
    Ok(serde_json::to_string(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_blob() -> serde_json::Value {
        json!([
            {
                "id": "3f0c",
                "name": "Mien Bac",
                "dateRange": ["2024-06-01", "2024-06-02"],
                "days": [
                    {
                        "date": "2024-06-01",
                        "destinations": [
                            {
                                "id": "hl",
                                "name": "Ha Long",
                                "location": "Quang Ninh",
                                "imageUrl": "",
                                "price": 500000
                            }
                        ]
                    },
                    {"date": "2024-06-02", "destinations": []}
                ],
                "budget": 700000,
                "totalCost": 500000,
                "createdAt": "2024-05-20T09:00:00Z"
            }
        ])
    }

    #[test]
    fn decodes_camel_case_layout() {
        let saved = decode_all(&valid_blob().to_string()).unwrap();
        assert_eq!(saved.len(), 1);
        let s = &saved[0];
        assert_eq!(s.id, "3f0c");
        assert_eq!(s.itinerary.days().len(), 2);
        assert_eq!(s.itinerary.days()[0].destinations[0].id, "hl");
        assert_eq!(s.itinerary.budget(), 700_000.0);
        assert_eq!(s.total_cost, 500_000.0);
    }

    #[test]
    fn encode_writes_iso_dates_and_camel_case_keys() {
        let saved = decode_all(&valid_blob().to_string()).unwrap();
        let text = encode_all(&saved).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v[0]["dateRange"], json!(["2024-06-01", "2024-06-02"]));
        assert_eq!(v[0]["totalCost"], json!(500000.0));
        assert_eq!(v[0]["days"][0]["destinations"][0]["imageUrl"], json!(""));
        assert!(v[0]["createdAt"].as_str().unwrap().starts_with("2024-05-20T09:00:00"));
    }

    #[test]
    fn rejects_day_count_not_matching_range() {
        let mut v = valid_blob();
        v[0]["dateRange"][1] = json!("2024-06-05");
        assert!(matches!(
            decode_all(&v.to_string()),
            Err(PlanError::MalformedStorage(_))
        ));
    }

    #[test]
    fn rejects_inverted_range_and_negative_budget() {
        let mut v = valid_blob();
        v[0]["dateRange"] = json!(["2024-06-02", "2024-06-01"]);
        assert!(decode_all(&v.to_string()).is_err());

        let mut v = valid_blob();
        v[0]["budget"] = json!(-1);
        assert!(decode_all(&v.to_string()).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let one = valid_blob()[0].clone();
        let v = json!([one.clone(), one]);
        assert!(decode_all(&v.to_string()).is_err());
    }

    #[test]
    fn encode_refuses_infinite_total_cost() {
        let mut saved = decode_all(&valid_blob().to_string()).unwrap();
        saved[0].total_cost = f64::INFINITY;
        let err = encode_all(&saved).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn rejects_non_array_and_garbage() {
        assert!(decode_all("{}").is_err());
        assert!(decode_all("not json").is_err());
        assert_eq!(decode_all("[]").unwrap(), Vec::new());
    }
}
