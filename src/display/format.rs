//! Number formatting shared by the console tables and the chart labels.

pub const CURRENCY: &str = "₹";

/// Groups the integer part in thousands: `1234567.891, 2` -> `1,234,567.89`.
pub fn thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }

    // "-0.00" reads as noise in a budget table.
    let is_zero = grouped.chars().all(|c| matches!(c, '0' | ',' | '.'));
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn currency(value: f64) -> String {
    let body = thousands(value, 2);
    match body.strip_prefix('-') {
        Some(abs) => format!("-{}{}", CURRENCY, abs),
        None => format!("{}{}", CURRENCY, body),
    }
}

pub fn count(value: u64) -> String {
    thousands(value as f64, 0)
}

/// `None` is an unbounded runway.
pub fn runway(months: Option<f64>) -> String {
    match months {
        Some(m) => format!("{:.2}", m),
        None => "∞".to_string(),
    }
}

pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{:.2}%", p),
        None => "n/a".to_string(),
    }
}

/// Short form in lakh (1L = 100,000), one decimal: `₹12.3L`.
pub fn lakh(value: f64) -> String {
    format!("{}{:.1}L", CURRENCY, value / 100_000.0)
}

/// Axis tick label: lakh for large magnitudes, thousands otherwise.
pub fn axis_label(value: f64) -> String {
    if value.abs() >= 100_000.0 {
        format!("{}{:.1}L", CURRENCY, value / 100_000.0)
    } else {
        format!("{}{:.0}K", CURRENCY, value / 1_000.0)
    }
}
