//! Port identity, discovery descriptors and per-port sampling state.

use std::cmp::Ordering;
use std::path::PathBuf;

use crate::collector::sysfs::compact_label;
use crate::fmt::FmtStyle;
use crate::rates::{counter_delta, sample, utilization};

/// Adaptor + port composite identifier, displayed as `mlx5_0:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortId {
    pub adaptor: String,
    pub port: String,
}

impl PortId {
    pub fn new(adaptor: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            adaptor: adaptor.into(),
            port: port.into(),
        }
    }
}

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.adaptor, self.port)
    }
}

/// Adaptor name first, then port number numerically (`2` before `10`).
impl Ord for PortId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.adaptor
            .cmp(&other.adaptor)
            .then_with(|| match (self.port.parse::<u32>(), other.port.parse::<u32>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => self.port.cmp(&other.port),
            })
    }
}

impl PartialOrd for PortId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A discovered port and where to read it from.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDescriptor {
    pub id: PortId,
    pub rx_path: PathBuf,
    pub tx_path: PathBuf,
    /// Capability-source handle: the port's `rate` file. Read once during
    /// discovery into `max_gbps` and `capability`.
    pub rate_path: PathBuf,
    /// Maximum bandwidth in Gbps; `0.0` when unknown.
    pub max_gbps: f64,
    /// Raw capability text, `None` when the rate file could not be read.
    pub capability: Option<String>,
}

impl InterfaceDescriptor {
    /// Capability label for display, or the style's unknown marker.
    pub fn label(&self, style: FmtStyle) -> String {
        match &self.capability {
            Some(text) => compact_label(text, style),
            None => style.unknown_rate().to_string(),
        }
    }
}

/// Result of the most recent sampling tick for one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOutcome {
    /// Seeded, no tick applied yet.
    #[default]
    Pending,
    /// Rates computed from a non-negative delta.
    Fresh,
    /// A counter went backwards; previous counters were re-based and rates zeroed.
    CounterReset,
}

/// Mutable per-port record owned by the monitor.
///
/// Previous counters and rates only change together through
/// [`InterfaceState::apply_sample`].
#[derive(Debug, Clone)]
pub struct InterfaceState {
    descriptor: InterfaceDescriptor,
    prev_rx: i64,
    prev_tx: i64,
    rx_rate: f64,
    tx_rate: f64,
    outcome: SampleOutcome,
}

impl InterfaceState {
    /// Creates a state seeded with the initial counter values.
    pub fn new(descriptor: InterfaceDescriptor, rx: i64, tx: i64) -> Self {
        Self {
            descriptor,
            prev_rx: rx,
            prev_tx: tx,
            rx_rate: 0.0,
            tx_rate: 0.0,
            outcome: SampleOutcome::Pending,
        }
    }

    /// Consumes one pair of fresh counter readings.
    ///
    /// A decrease in either direction is treated as a discontinuity: both
    /// previous counters are re-based and both rates become `0.0`.
    pub fn apply_sample(&mut self, curr_rx: i64, curr_tx: i64, interval_secs: f64) -> SampleOutcome {
        let regressed = counter_delta(curr_rx, self.prev_rx).is_none()
            || counter_delta(curr_tx, self.prev_tx).is_none();

        let (rx_rate, tx_rate, outcome) = if regressed {
            (0.0, 0.0, SampleOutcome::CounterReset)
        } else {
            (
                sample(self.prev_rx, curr_rx, interval_secs),
                sample(self.prev_tx, curr_tx, interval_secs),
                SampleOutcome::Fresh,
            )
        };

        self.prev_rx = curr_rx;
        self.prev_tx = curr_tx;
        self.rx_rate = rx_rate;
        self.tx_rate = tx_rate;
        self.outcome = outcome;
        outcome
    }

    pub fn descriptor(&self) -> &InterfaceDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &PortId {
        &self.descriptor.id
    }

    pub fn max_gbps(&self) -> f64 {
        self.descriptor.max_gbps
    }

    pub fn prev_counters(&self) -> (i64, i64) {
        (self.prev_rx, self.prev_tx)
    }

    /// Receive throughput in Gbps.
    pub fn rx_rate(&self) -> f64 {
        self.rx_rate
    }

    /// Transmit throughput in Gbps.
    pub fn tx_rate(&self) -> f64 {
        self.tx_rate
    }

    pub fn outcome(&self) -> SampleOutcome {
        self.outcome
    }

    pub fn rx_utilization(&self) -> f64 {
        utilization(self.rx_rate, self.descriptor.max_gbps)
    }

    pub fn tx_utilization(&self) -> f64 {
        utilization(self.tx_rate, self.descriptor.max_gbps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(max_gbps: f64) -> InterfaceDescriptor {
        InterfaceDescriptor {
            id: PortId::new("mlx5_0", "1"),
            rx_path: PathBuf::from("/rx"),
            tx_path: PathBuf::from("/tx"),
            rate_path: PathBuf::from("/rate"),
            max_gbps,
            capability: Some("100 Gb/sec (4X EDR)".to_string()),
        }
    }

    #[test]
    fn port_ids_sort_numerically_within_adaptor() {
        let mut ids = vec![
            PortId::new("mlx5_1", "1"),
            PortId::new("mlx5_0", "10"),
            PortId::new("mlx5_0", "2"),
        ];
        ids.sort();
        let shown: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["mlx5_0:2", "mlx5_0:10", "mlx5_1:1"]);
    }

    #[test]
    fn label_falls_back_to_unknown_marker() {
        let mut d = descriptor(0.0);
        assert_eq!(d.label(FmtStyle::Full), "100 Gbps (4X EDR)");
        d.capability = None;
        assert_eq!(d.label(FmtStyle::Full), "N/A");
        assert_eq!(d.label(FmtStyle::Compact), "?");
    }

    #[test]
    fn apply_sample_advances_counters_with_rates() {
        let mut state = InterfaceState::new(descriptor(100.0), 0, 0);
        assert_eq!(state.outcome(), SampleOutcome::Pending);

        let outcome = state.apply_sample(12_500_000_000, 1_250_000_000, 1.0);
        assert_eq!(outcome, SampleOutcome::Fresh);
        assert_eq!(state.rx_rate(), 100.0);
        assert_eq!(state.tx_rate(), 10.0);
        assert_eq!(state.prev_counters(), (12_500_000_000, 1_250_000_000));
        assert_eq!(state.rx_utilization(), 1.0);
        assert_eq!(state.tx_utilization(), 0.1);
    }

    #[test]
    fn counter_regression_rebases_and_zeroes() {
        let mut state = InterfaceState::new(descriptor(100.0), 5_000, 5_000);
        state.apply_sample(10_000, 10_000, 1.0);

        let outcome = state.apply_sample(100, 20_000, 1.0);
        assert_eq!(outcome, SampleOutcome::CounterReset);
        assert_eq!(state.rx_rate(), 0.0);
        assert_eq!(state.tx_rate(), 0.0);
        assert_eq!(state.prev_counters(), (100, 20_000));

        // Next tick measures from the re-based counters.
        state.apply_sample(125_000_100, 20_000, 1.0);
        assert_eq!(state.outcome(), SampleOutcome::Fresh);
        assert_eq!(state.rx_rate(), 1.0);
    }

    #[test]
    fn unknown_capacity_reports_zero_utilization() {
        let mut state = InterfaceState::new(descriptor(0.0), 0, 0);
        state.apply_sample(1_000_000_000_000, 0, 1.0);
        assert!(state.rx_rate() > 0.0);
        assert_eq!(state.rx_utilization(), 0.0);
    }
}
