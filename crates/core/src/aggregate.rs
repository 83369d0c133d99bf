//! Derived totals over an itinerary snapshot. Nothing here is stored.
//!
//! Travel time is a display heuristic: [`MINUTES_PER_KM`] minutes for every
//! kilometre of straight-line (great-circle) distance. Distance and travel
//! time are both derived from [`distance_km`] so the two displays agree.

use crate::domain::destination::{Destination, GeoPoint};
use crate::domain::itinerary::{Itinerary, ItineraryDay};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const MINUTES_PER_KM: f64 = 2.0;

const EARTH_RADIUS_KM: f64 = 6372.8;

pub fn day_cost(day: &ItineraryDay) -> f64 {
    day.destinations.iter().map(|d| d.price).sum()
}

pub fn trip_cost(itinerary: &Itinerary) -> f64 {
    itinerary.days().iter().map(day_cost).sum()
}

/// Strictly greater: spending exactly the budget is fine.
pub fn is_over_budget(itinerary: &Itinerary) -> bool {
    trip_cost(itinerary) > itinerary.budget()
}

/// Warning banner rule: a zero budget means "not set" and never warns.
pub fn shows_budget_warning(itinerary: &Itinerary) -> bool {
    itinerary.budget() > 0.0 && is_over_budget(itinerary)
}

pub fn budget_remaining(itinerary: &Itinerary) -> f64 {
    itinerary.budget() - trip_cost(itinerary)
}

pub fn total_destinations(itinerary: &Itinerary) -> usize {
    itinerary.days().iter().map(|d| d.destinations.len()).sum()
}

/// Great-circle distance between two stops. Stops without coordinates are
/// treated as co-located (0 km).
pub fn distance_km(a: &Destination, b: &Destination) -> f64 {
    match (a.coordinates, b.coordinates) {
        (Some(p1), Some(p2)) => haversine_km(p1, p2),
        _ => 0.0,
    }
}

pub fn travel_time(a: &Destination, b: &Destination) -> Duration {
    travel_time_for_km(distance_km(a, b))
}

pub fn travel_time_for_km(km: f64) -> Duration {
    Duration::seconds((km * MINUTES_PER_KM * 60.0).round() as i64)
}

/// One hop between consecutive stops of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from_id: String,
    pub to_id: String,
    pub distance_km: f64,
    #[serde(serialize_with = "serialize_minutes")]
    pub travel_time: Duration,
}

/// Legs in visit order; empty when the day has fewer than two stops.
pub fn legs(day: &ItineraryDay) -> Vec<Leg> {
    day.destinations
        .windows(2)
        .map(|pair| {
            let km = distance_km(&pair[0], &pair[1]);
            Leg {
                from_id: pair[0].id.clone(),
                to_id: pair[1].id.clone(),
                distance_km: km,
                travel_time: travel_time_for_km(km),
            }
        })
        .collect()
}

pub fn day_distance_km(day: &ItineraryDay) -> f64 {
    legs(day).iter().map(|l| l.distance_km).sum()
}

pub fn day_travel_time(day: &ItineraryDay) -> Duration {
    legs(day)
        .iter()
        .fold(Duration::zero(), |acc, l| acc + l.travel_time)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub cost: f64,
    pub stops: usize,
    pub distance_km: f64,
    #[serde(serialize_with = "serialize_minutes")]
    pub travel_time: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub days: Vec<DaySummary>,
    pub trip_cost: f64,
    pub budget: f64,
    pub over_budget: bool,
    pub total_destinations: usize,
}

pub fn summary(itinerary: &Itinerary) -> TripSummary {
    let days = itinerary
        .days()
        .iter()
        .map(|day| DaySummary {
            date: day.date,
            cost: day_cost(day),
            stops: day.destinations.len(),
            distance_km: day_distance_km(day),
            travel_time: day_travel_time(day),
        })
        .collect();

    TripSummary {
        days,
        trip_cost: trip_cost(itinerary),
        budget: itinerary.budget(),
        over_budget: is_over_budget(itinerary),
        total_destinations: total_destinations(itinerary),
    }
}

fn haversine_km(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let d_lat = (p2.lat - p1.lat).to_radians();
    let d_lon = (p2.lon - p1.lon).to_radians();
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();

    let a = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);
    let c = 2. * f64::asin(f64::sqrt(a));

    EARTH_RADIUS_KM * c
}

fn serialize_minutes<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_minutes())
}
