use std::time::SystemTime;

/// Formats a result for the shells.
///
/// Whole numbers drop the decimal point; very large or very small
/// magnitudes switch to scientific notation.
pub fn format_result(x: f64) -> String {
    let magnitude = x.abs();
    if magnitude >= 1e15 || (magnitude < 1e-6 && x != 0.0) {
        format!("{:e}", x)
    } else if x.fract() == 0.0 {
        // -0 prints as "-0" otherwise
        format!("{:.0}", x + 0.0)
    } else {
        format!("{}", x)
    }
}

pub fn format_age(timestamp: SystemTime) -> String {
    let secs = timestamp.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    match secs {
        0 => "just now".to_string(),
        1..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn integral_results_have_no_decimal_point() {
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(-8.0), "-8");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(123456789012345.0), "123456789012345");
    }

    #[test]
    fn fractions_round_trip() {
        assert_eq!(format_result(6.28), "6.28");
        assert_eq!(format_result(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_result(-2.5), "-2.5");
    }

    #[test]
    fn extremes_use_scientific_notation() {
        assert_eq!(format_result(1e15), "1e15");
        assert_eq!(format_result(-2.5e20), "-2.5e20");
        assert_eq!(format_result(1.5e-7), "1.5e-7");
    }

    #[test]
    fn overflow_prints_as_inf() {
        let product = 1e200_f64 * 1e200;
        assert_eq!(format_result(product), "inf");
        assert_eq!(format_result(-product), "-inf");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn ages() {
        let now = SystemTime::now();
        assert_eq!(format_age(now + Duration::from_secs(5)), "just now");
        assert_eq!(format_age(now - Duration::from_secs(30)), "30s ago");
        assert_eq!(format_age(now - Duration::from_secs(150)), "2m ago");
        assert_eq!(format_age(now - Duration::from_secs(7300)), "2h ago");
    }
}
