//! Shared formatting helpers for both output surfaces.
//!
//! Functions that differ between the full-screen rows and the compact stream
//! columns are parameterized via [`FmtStyle`].

/// Controls full (full-screen rows) vs compact (stream columns) output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    /// Full: `"400 Gbps (4X NDR)"`, `"N/A"`
    Full,
    /// Compact: `"400 G (4X NDR)"`, `"?"`
    Compact,
}

impl FmtStyle {
    /// Unit text that replaces the kernel's `Gb/sec`.
    pub fn gbps_unit(self) -> &'static str {
        match self {
            FmtStyle::Full => "Gbps",
            FmtStyle::Compact => "G",
        }
    }

    /// Label shown when a port has no readable capability.
    pub fn unknown_rate(self) -> &'static str {
        match self {
            FmtStyle::Full => "N/A",
            FmtStyle::Compact => "?",
        }
    }
}

/// Width of the percentage field produced by [`format_pct`].
pub const PCT_FIELD_WIDTH: usize = 5;

/// Width of the rate field produced by [`format_gbps`] in full style.
pub const RATE_FIELD_WIDTH: usize = 12;

/// Format a utilization fraction (`0.0..=1.0`) as a right-aligned percentage.
///
/// `"   0%"`, `"  42%"`, `" 100%"`. Fractions are truncated, not rounded.
pub fn format_pct(fraction: f64) -> String {
    let pct = (fraction.clamp(0.0, 1.0) * 100.0) as u32;
    format!("{:>4}%", pct)
}

/// Format a throughput in Gbps.
///
/// Full:    `"00012.5 Gbps"` (zero padded, 12 chars up to 99999.9)
/// Compact: `"12.5"`
pub fn format_gbps(gbps: f64, style: FmtStyle) -> String {
    match style {
        FmtStyle::Full => format!("{:07.1} {}", gbps, style.gbps_unit()),
        FmtStyle::Compact => format!("{:.1}", gbps),
    }
}

/// Format the polling interval for headers: `"1s"`, `"500ms"`, `"1.5s"`.
pub fn format_interval(secs: f64) -> String {
    if secs < 1.0 {
        format!("{}ms", (secs * 1000.0).round() as u64)
    } else if secs.fract() == 0.0 {
        format!("{}s", secs as u64)
    } else {
        format!("{:.1}s", secs)
    }
}
