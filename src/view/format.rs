//! Cell formatters matching the dashboard's display conventions.
//!
//! Zero-valued percentages and P/FCF read as "N/A": the service reports an
//! unknown metric as either null or zero.

pub const NOT_AVAILABLE: &str = "N/A";

/// Colour tone of the insider activity cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

impl Tone {
    /// Plain-text marker appended to a toned cell.
    pub fn marker(self) -> &'static str {
        match self {
            Tone::Good => " ▲",
            Tone::Bad => " ▼",
            Tone::Neutral => "",
        }
    }
}

/// `$150.00`.
pub fn price(value: Option<f64>) -> String {
    value
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Score with one decimal; absent reads as `0.0`.
pub fn score(value: Option<f64>) -> String {
    format!("{:.1}", value.unwrap_or(0.0))
}

/// One decimal, zero or absent reads as N/A.
pub fn p_fcf(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{v:.1}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Two decimals.
pub fn ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Fraction as a percentage with one decimal.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.1}%", v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// IV rank as a whole percentage.
pub fn iv_rank(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:.0}%", v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Net insider shares with `k`/`M` suffixes.
pub fn insider(value: Option<f64>) -> String {
    let Some(n) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n.abs() >= 1_000.0 {
        format!("{:.0}k", n / 1_000.0)
    } else {
        format!("{n:.0}")
    }
}

/// Net buying is good, net selling is bad.
pub fn insider_tone(value: Option<f64>) -> Tone {
    match value {
        Some(n) if n > 0.0 => Tone::Good,
        Some(n) if n < 0.0 => Tone::Bad,
        _ => Tone::Neutral,
    }
}

/// Whole-dollar price target.
pub fn target(value: Option<f64>) -> String {
    value
        .map(|v| format!("${v:.0}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `$mean ($low • $high)`.
pub fn target_range(low: Option<f64>, mean: Option<f64>, high: Option<f64>) -> String {
    format!("{} ({} • {})", target(mean), target(low), target(high))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price() {
        assert_eq!(price(Some(150.0)), "$150.00");
        assert_eq!(price(None), "N/A");
    }

    #[test]
    fn test_score_defaults_to_zero() {
        assert_eq!(score(Some(82.26)), "82.3");
        assert_eq!(score(None), "0.0");
    }

    #[test]
    fn test_zero_metrics_are_not_available() {
        assert_eq!(p_fcf(Some(0.0)), "N/A");
        assert_eq!(percent(Some(0.0)), "N/A");
        assert_eq!(iv_rank(Some(0.0)), "N/A");
        assert_eq!(p_fcf(Some(14.26)), "14.3");
        assert_eq!(percent(Some(0.153)), "15.3%");
        assert_eq!(iv_rank(Some(0.42)), "42%");
    }

    #[test]
    fn test_ratio_keeps_zero() {
        assert_eq!(ratio(Some(0.0)), "0.00");
        assert_eq!(ratio(Some(1.234)), "1.23");
        assert_eq!(ratio(None), "N/A");
    }

    #[test]
    fn test_insider() {
        assert_eq!(insider(None), "N/A");
        assert_eq!(insider(Some(0.0)), "0");
        assert_eq!(insider(Some(2_500_000.0)), "2.5M");
        assert_eq!(insider(Some(-1_200_000.0)), "-1.2M");
        assert_eq!(insider(Some(45_000.0)), "45k");
        assert_eq!(insider(Some(-800.0)), "-800");
    }

    #[test]
    fn test_insider_tone() {
        assert_eq!(insider_tone(Some(10.0)), Tone::Good);
        assert_eq!(insider_tone(Some(-10.0)), Tone::Bad);
        assert_eq!(insider_tone(Some(0.0)), Tone::Neutral);
        assert_eq!(insider_tone(None), Tone::Neutral);
        assert_eq!(Tone::Good.marker(), " ▲");
        assert_eq!(Tone::Neutral.marker(), "");
    }

    #[test]
    fn test_target_range() {
        assert_eq!(
            target_range(Some(120.0), Some(160.0), None),
            "$160 ($120 • N/A)"
        );
    }
}
