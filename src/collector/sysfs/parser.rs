//! Parser for the free-text port `rate` capability string.
//!
//! The kernel exposes values such as `400 Gb/sec (4X NDR)` or
//! `2.5 Gb/sec (1X SDR)`: a numeric magnitude, the unit, and an optional
//! width/generation descriptor.

use crate::fmt::FmtStyle;

/// Unit text written by the kernel.
const KERNEL_UNIT: &str = "Gb/sec";

/// Error type for capability parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RateParseError {
    /// Fewer than two tokens, or a magnitude that is not a finite non-negative number.
    MalformedRate(String),
}

impl std::fmt::Display for RateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateParseError::MalformedRate(text) => write!(f, "malformed rate string: {:?}", text),
        }
    }
}

impl std::error::Error for RateParseError {}

/// Parses the maximum bandwidth in Gbps out of a capability string.
///
/// The display label comes from [`compact_label`].
///
/// # Examples
///
/// ```
/// use ibmon::collector::sysfs::{compact_label, parse_capability};
/// use ibmon::fmt::FmtStyle;
///
/// assert_eq!(parse_capability("400 Gb/sec (4X NDR)").unwrap(), 400.0);
/// assert_eq!(compact_label("400 Gb/sec (4X NDR)", FmtStyle::Full), "400 Gbps (4X NDR)");
/// ```
pub fn parse_capability(text: &str) -> Result<f64, RateParseError> {
    let mut fields = text.split_whitespace();
    let (Some(magnitude), Some(_unit)) = (fields.next(), fields.next()) else {
        return Err(RateParseError::MalformedRate(text.to_string()));
    };

    magnitude
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| RateParseError::MalformedRate(text.to_string()))
}

/// Rewrites every `Gb/sec` in `text` to the style's compact unit.
pub fn compact_label(text: &str, style: FmtStyle) -> String {
    text.trim().replace(KERNEL_UNIT, style.gbps_unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ndr_rate() {
        assert_eq!(parse_capability("400 Gb/sec (4X NDR)").unwrap(), 400.0);
        let label = compact_label("400 Gb/sec (4X NDR)", FmtStyle::Full);
        assert!(!label.contains("Gb/sec"));
        assert!(label.contains("Gbps"));
    }

    #[test]
    fn compact_style_uses_short_unit() {
        assert_eq!(parse_capability("100 Gb/sec (4X EDR)").unwrap(), 100.0);
        assert_eq!(
            compact_label("100 Gb/sec (4X EDR)", FmtStyle::Compact),
            "100 G (4X EDR)"
        );
    }

    #[test]
    fn fractional_rates() {
        assert_eq!(parse_capability("2.5 Gb/sec (1X SDR)").unwrap(), 2.5);
    }

    #[test]
    fn rewrite_does_not_touch_value() {
        let text = "  56 Gb/sec (4X FDR)\n";
        assert_eq!(parse_capability(text).unwrap(), 56.0);
        assert_eq!(compact_label(text, FmtStyle::Full), "56 Gbps (4X FDR)");
    }

    #[test]
    fn single_token_is_malformed() {
        assert_eq!(
            parse_capability("garbage"),
            Err(RateParseError::MalformedRate("garbage".to_string()))
        );
        assert!(parse_capability("").is_err());
    }

    #[test]
    fn non_numeric_magnitude_is_malformed() {
        assert!(parse_capability("fast Gb/sec").is_err());
        assert!(parse_capability("NaN Gb/sec").is_err());
        assert!(parse_capability("-100 Gb/sec").is_err());
    }
}
