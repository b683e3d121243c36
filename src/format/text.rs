//! Plain text formatting of timings and percentages.

/// Nanoseconds per microsecond.
const NS_PER_US: f64 = 1_000.0;
/// Nanoseconds per millisecond.
const NS_PER_MS: f64 = 1_000_000.0;
/// Nanoseconds per second.
const NS_PER_S: f64 = 1_000_000_000.0;

/// Format a nanosecond timing in a human-scaled unit.
///
/// `500` -> `500ns`, `1500` -> `1.50us`, `2_500_000` -> `2.50ms`,
/// `3_000_000_000` -> `3.00s`.
#[must_use]
pub fn format_ns(ns: f64) -> String {
    if ns >= NS_PER_S {
        format!("{:.2}s", ns / NS_PER_S)
    } else if ns >= NS_PER_MS {
        format!("{:.2}ms", ns / NS_PER_MS)
    } else if ns >= NS_PER_US {
        format!("{:.2}us", ns / NS_PER_US)
    } else {
        format!("{ns:.0}ns")
    }
}

/// Format an optional timing, `-` when absent.
#[must_use]
pub fn format_ns_or_dash(ns: Option<f64>) -> String {
    ns.map_or_else(|| "-".to_string(), format_ns)
}

/// Shortest round-trip form, always with a fractional part for integral
/// values: `5.0`, `6.0`, `12.35`, `-0.5`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Format a percentage change with an explicit `+` for positive values.
#[must_use]
pub fn format_pct(pct: f64) -> String {
    let sign = if pct > 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_number(pct))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_ns_scales_units() {
        assert_eq!(format_ns(500.0), "500ns");
        assert_eq!(format_ns(1_500.0), "1.50us");
        assert_eq!(format_ns(2_500_000.0), "2.50ms");
        assert_eq!(format_ns(3_000_000_000.0), "3.00s");
    }

    #[test]
    fn format_ns_boundaries() {
        assert_eq!(format_ns(999.0), "999ns");
        assert_eq!(format_ns(1_000.0), "1.00us");
        assert_eq!(format_ns(999_999.0), "1000.00us");
        assert_eq!(format_ns(1_000_000.0), "1.00ms");
        assert_eq!(format_ns(1_000_000_000.0), "1.00s");
        assert_eq!(format_ns(0.0), "0ns");
    }

    #[test]
    fn format_ns_or_dash_handles_absent() {
        assert_eq!(format_ns_or_dash(None), "-");
        assert_eq!(format_ns_or_dash(Some(42.0)), "42ns");
    }

    #[test]
    fn format_number_keeps_one_decimal_for_integers() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(12.35), "12.35");
        assert_eq!(format_number(-6.0), "-6.0");
        assert_eq!(format_number(0.0), "0.0");
    }

    #[test]
    fn format_pct_signs() {
        assert_eq!(format_pct(6.0), "+6.0%");
        assert_eq!(format_pct(-6.0), "-6.0%");
        assert_eq!(format_pct(0.0), "0.0%");
        assert_eq!(format_pct(12.35), "+12.35%");
    }
}
