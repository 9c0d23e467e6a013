//! Formatting helpers for presenting metrics.

use time::{macros::format_description, OffsetDateTime};

/// Plain number the way the cards show it: `61500`, `20.5`, `0.089`.
pub fn format_metric(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "—".to_string()
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "—".to_string()
    }
}

pub fn format_clock(at: OffsetDateTime) -> String {
    at.format(&format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn metric_drops_trailing_zero_fraction() {
        assert_eq!(format_metric(61500.0), "61500");
        assert_eq!(format_metric(20.5), "20.5");
        assert_eq!(format_metric(0.089), "0.089");
        assert_eq!(format_metric(f64::NAN), "—");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(format_number(27675.0, 2), "27675.00");
        assert_eq!(format_number(2.666, 2), "2.67");
        assert_eq!(format_number(f64::INFINITY, 1), "—");
    }

    #[test]
    fn clock_is_hours_and_minutes() {
        assert_eq!(format_clock(datetime!(2026-10-18 09:05:33 UTC)), "09:05");
    }
}
