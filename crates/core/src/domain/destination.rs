use crate::error::{validate_amount, PlanError};
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A place that can be visited. Reference data owned by the catalog; the
/// itinerary holds copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

impl Destination {
    pub(crate) fn validate(&self) -> Result<(), PlanError> {
        validate_amount(self.price)?;
        Ok(())
    }
}

/// Selectable destinations. Read-only from the planner's point of view.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>) -> Result<Self, PlanError> {
        for dest in &destinations {
            dest.validate()?;
        }
        Ok(Self { destinations })
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let destinations = serde_json::from_str::<Vec<Destination>>(text)
            .context("catalog is not a JSON array of destinations")?;
        let catalog = Self::new(destinations)?;
        tracing::debug!(len = catalog.len(), "loaded destination catalog");
        Ok(catalog)
    }

    pub fn find(&self, id: &str) -> Result<&Destination, PlanError> {
        self.destinations
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| PlanError::UnknownDestination(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_camel_case_catalog() {
        let text = json!([
            {
                "id": "hl",
                "name": "Ha Long Bay",
                "location": "Quang Ninh",
                "imageUrl": "https://img.example/hl.jpg",
                "price": 500000,
                "coordinates": {"lat": 20.91, "lon": 107.18}
            },
            {
                "id": "hoi-an",
                "name": "Hoi An",
                "location": "Quang Nam",
                "price": 300000
            }
        ])
        .to_string();

        let catalog = Catalog::from_json(&text).unwrap();
        assert_eq!(catalog.len(), 2);

        let hl = catalog.find("hl").unwrap();
        assert_eq!(hl.image_url, "https://img.example/hl.jpg");
        assert_eq!(hl.price, 500_000.0);
        assert!(hl.coordinates.is_some());

        let hoi_an = catalog.find("hoi-an").unwrap();
        assert_eq!(hoi_an.image_url, "");
        assert!(hoi_an.coordinates.is_none());
    }

    #[test]
    fn unknown_id_is_reported() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.find("nowhere").unwrap_err(),
            PlanError::UnknownDestination("nowhere".to_string())
        );
    }

    #[test]
    fn rejects_negative_price() {
        let text = json!([
            {"id": "x", "name": "X", "location": "Y", "price": -5}
        ])
        .to_string();
        assert!(Catalog::from_json(&text).is_err());
    }
}
