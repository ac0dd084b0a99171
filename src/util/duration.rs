//! Duration parser for CLI arguments.
//!
//! Supports:
//! - Bare seconds: `1`, `0.5`
//! - With unit: `500ms`, `1s`, `1.5s`, `2m`, `1h`
//!
//! Negative values parse successfully so callers can report them precisely.

/// Error type for duration parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse duration '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for DurationParseError {}

/// Parse a duration string into (possibly negative) seconds.
///
/// # Examples
///
/// ```
/// use ibmon::util::parse_seconds;
///
/// assert_eq!(parse_seconds("500ms").unwrap(), 0.5);
/// assert_eq!(parse_seconds("2m").unwrap(), 120.0);
/// assert_eq!(parse_seconds("3").unwrap(), 3.0);
/// ```
pub fn parse_seconds(input: &str) -> Result<f64, DurationParseError> {
    let trimmed = input.trim();
    let error = |message: &str| DurationParseError {
        input: trimmed.to_string(),
        message: message.to_string(),
    };

    if trimmed.is_empty() {
        return Err(error("empty duration"));
    }

    // "ms" must be checked before "s" and "m".
    let (number, multiplier) = if let Some(n) = trimmed.strip_suffix("ms") {
        (n, 0.001)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1.0)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 60.0)
    } else if let Some(n) = trimmed.strip_suffix('h') {
        (n, 3600.0)
    } else {
        (trimmed, 1.0)
    };

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| error("expected a number with optional unit (ms, s, m, h)"))?;
    if !value.is_finite() {
        return Err(error("duration must be finite"));
    }

    Ok(value * multiplier)
}
