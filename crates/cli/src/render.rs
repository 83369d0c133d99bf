use tripplan_core::aggregate::{budget_remaining, legs, shows_budget_warning, summary};
use tripplan_core::domain::itinerary::Itinerary;
use tripplan_core::domain::saved::SavedItinerary;
use tripplan_core::format::{format_km, format_price, format_travel_time};
use tripplan_core::time::format_date;

pub fn saved_list(saved: &[SavedItinerary]) -> String {
    if saved.is_empty() {
        return "No saved itineraries.\n".to_string();
    }

    let mut lines = Vec::with_capacity(saved.len() * 2);
    for s in saved {
        let range = s.itinerary.date_range();
        lines.push(format!("{}  {}", s.id, s.name));
        lines.push(format!(
            "    {} - {} ({} days)  total {}  budget {}  created {}",
            format_date(range.start()),
            format_date(range.end()),
            s.itinerary.days().len(),
            format_price(s.total_cost),
            format_price(s.itinerary.budget()),
            s.created_at.format("%d/%m/%Y %H:%M"),
        ));
    }
    join_lines(lines)
}

/// Day-by-day overview. `current_day` is highlighted when given.
pub fn overview(itinerary: &Itinerary, current_day: Option<usize>) -> String {
    let s = summary(itinerary);
    let mut lines = vec![format!(
        "{} days, {} destinations, total {}",
        s.days.len(),
        s.total_destinations,
        format_price(s.trip_cost)
    )];

    for (i, (day, day_sum)) in itinerary.days().iter().zip(&s.days).enumerate() {
        let marker = if current_day == Some(i) { " (current)" } else { "" };
        lines.push(format!(
            "Day {} - {}{}: {} stops, {}, travel {}",
            i + 1,
            format_date(day.date),
            marker,
            day_sum.stops,
            format_price(day_sum.cost),
            format_travel_time(day_sum.travel_time),
        ));

        let day_legs = legs(day);
        for (j, dest) in day.destinations.iter().enumerate() {
            let mut line = format!(
                "  {}. {} ({}) {}",
                j + 1,
                dest.name,
                dest.location,
                format_price(dest.price)
            );
            if let Some(leg) = j.checked_sub(1).and_then(|k| day_legs.get(k)) {
                line.push_str(&format!(
                    "  +{} / {}",
                    format_km(leg.distance_km),
                    format_travel_time(leg.travel_time)
                ));
            }
            lines.push(line);
        }
    }

    if s.budget > 0.0 {
        lines.push(format!(
            "Budget {}, remaining {}",
            format_price(s.budget),
            format_price(budget_remaining(itinerary))
        ));
    }
    if shows_budget_warning(itinerary) {
        lines.push(format!(
            "WARNING: cost {} exceeds budget {}",
            format_price(s.trip_cost),
            format_price(s.budget)
        ));
    }
    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
