use chrono::Duration;

/// `500000 -> "500.000đ"`. Amounts are rounded to whole dong.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}đ")
}

/// `"1h 5m"` from an hour up, `"45m"` below.
pub fn format_travel_time(duration: Duration) -> String {
    let total_minutes = (duration.num_seconds() as f64 / 60.0).round() as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn format_km(km: f64) -> String {
    format!("{km:.1} km")
}
