pub mod date_range;

pub use date_range::{format_date, parse_date, DateRange, MAX_TRIP_DAYS};
