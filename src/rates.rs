//! Throughput computation from cumulative byte counters.
//!
//! Rates are derived from the configured polling interval rather than the
//! measured time between reads, so a tick delayed by scheduling reports a
//! slightly inflated delta over an unchanged interval.

/// Bits per byte.
const BITS_PER_BYTE: f64 = 8.0;

/// Bits per gigabit (decimal, as link rates are quoted).
const BITS_PER_GBIT: f64 = 1e9;

/// Compute i64 delta, returning `None` on counter regression (reset or wrap).
pub fn counter_delta(curr: i64, prev: i64) -> Option<i64> {
    (curr >= prev).then_some(curr - prev)
}

/// Throughput in Gbps between two counter readings `interval_secs` apart.
///
/// A negative delta yields a negative rate; callers decide how to treat it.
///
/// # Panics
/// If `interval_secs` is not strictly positive. The polling interval is
/// validated at startup, so this indicates a programming error.
pub fn sample(prev: i64, curr: i64, interval_secs: f64) -> f64 {
    assert!(
        interval_secs > 0.0,
        "sampling interval must be positive, got {interval_secs}"
    );
    curr.saturating_sub(prev) as f64 * BITS_PER_BYTE / BITS_PER_GBIT / interval_secs
}

/// Fraction of capacity in use, clamped to `[0, 1]`.
///
/// Returns `0.0` when the capacity is unknown (`max_gbps <= 0`).
pub fn utilization(rate_gbps: f64, max_gbps: f64) -> f64 {
    if max_gbps > 0.0 {
        (rate_gbps / max_gbps).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
