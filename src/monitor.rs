//! Sampling engine: owns every monitored port and applies one tick at a time.

use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::collector::sysfs::{CollectError, discover_interfaces, read_counter};
use crate::collector::traits::FileSystem;
use crate::config::{IgnoreSet, PollInterval};
use crate::model::{InterfaceDescriptor, InterfaceState, SampleOutcome};

/// Fatal startup errors.
#[derive(Debug)]
pub enum MonitorError {
    /// The discovery root could not be listed.
    Discovery(CollectError),
    /// Nothing left to monitor after discovery and filtering.
    NoInterfaces,
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::Discovery(e) => write!(f, "interface discovery failed: {}", e),
            MonitorError::NoInterfaces => write!(f, "no interfaces found"),
        }
    }
}

impl std::error::Error for MonitorError {}

impl From<CollectError> for MonitorError {
    fn from(e: CollectError) -> Self {
        MonitorError::Discovery(e)
    }
}

/// Summary of one sampling tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Ports whose rates were recomputed.
    pub sampled: usize,
    /// Ports left untouched because a counter read failed.
    pub failed: usize,
    /// Ports whose counters went backwards.
    pub resets: usize,
}

/// Sole owner of the per-port state list.
pub struct Monitor<F: FileSystem> {
    fs: F,
    interval: PollInterval,
    interfaces: Vec<InterfaceState>,
}

impl<F: FileSystem> Monitor<F> {
    /// Discovers ports under `root` and seeds their counters.
    pub fn discover(
        fs: F,
        root: impl AsRef<Path>,
        ignore: &IgnoreSet,
        interval: PollInterval,
    ) -> Result<Self, MonitorError> {
        let descriptors = discover_interfaces(&fs, root, ignore)?;
        Self::from_descriptors(fs, descriptors, interval)
    }

    /// Seeds each descriptor with its current counters.
    ///
    /// Ports whose counters cannot be read now are dropped; an empty result is
    /// an error.
    pub fn from_descriptors(
        fs: F,
        descriptors: Vec<InterfaceDescriptor>,
        interval: PollInterval,
    ) -> Result<Self, MonitorError> {
        let mut interfaces = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            match read_pair(&fs, &descriptor) {
                Ok((rx, tx)) => interfaces.push(InterfaceState::new(descriptor, rx, tx)),
                Err(e) => {
                    warn!(port = %descriptor.id, error = %e, "initial counter read failed, excluding port");
                }
            }
        }

        if interfaces.is_empty() {
            return Err(MonitorError::NoInterfaces);
        }
        info!(ports = interfaces.len(), "monitoring started");
        Ok(Self {
            fs,
            interval,
            interfaces,
        })
    }

    /// Reads every port once and updates the ones whose reads succeeded.
    ///
    /// A failed read leaves that port's previous counters and rates as they
    /// were; other ports are unaffected.
    pub fn tick(&mut self) -> TickReport {
        let interval_secs = self.interval.as_secs_f64();
        let mut report = TickReport::default();

        for state in &mut self.interfaces {
            let (rx, tx) = match read_pair(&self.fs, state.descriptor()) {
                Ok(pair) => pair,
                Err(e) => {
                    debug!(port = %state.id(), error = %e, "counter read failed, keeping previous sample");
                    report.failed += 1;
                    continue;
                }
            };

            report.sampled += 1;
            if state.apply_sample(rx, tx, interval_secs) == SampleOutcome::CounterReset {
                info!(port = %state.id(), "counter went backwards, re-basing");
                report.resets += 1;
            }
        }

        trace!(
            sampled = report.sampled,
            failed = report.failed,
            resets = report.resets,
            "tick"
        );
        report
    }

    pub fn interfaces(&self) -> &[InterfaceState] {
        &self.interfaces
    }

    pub fn interval(&self) -> PollInterval {
        self.interval
    }

    /// Mutable access to the filesystem, used to stage counter changes in tests.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }
}

fn read_pair<F: FileSystem>(
    fs: &F,
    descriptor: &InterfaceDescriptor,
) -> Result<(i64, i64), CollectError> {
    let rx = read_counter(fs, &descriptor.rx_path)?;
    let tx = read_counter(fs, &descriptor.tx_path)?;
    Ok((rx, tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockFs, SCENARIO_ROOT};

    fn monitor(fs: MockFs) -> Monitor<MockFs> {
        Monitor::discover(fs, SCENARIO_ROOT, &IgnoreSet::default(), PollInterval::DEFAULT).unwrap()
    }

    #[test]
    fn seeds_previous_counters() {
        let m = monitor(MockFs::infiniband_host());
        let prev: Vec<(i64, i64)> = m.interfaces().iter().map(|s| s.prev_counters()).collect();
        assert_eq!(prev, [(0, 0), (1_000, 2_000), (3_000, 4_000)]);
        assert!(
            m.interfaces()
                .iter()
                .all(|s| s.outcome() == SampleOutcome::Pending)
        );
    }

    #[test]
    fn saturated_edr_ports_after_one_tick() {
        let mut m = monitor(MockFs::twin_edr_ports());
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_0", "1", 12_500_000_000, 0);
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_1", "1", 12_500_000_000, 0);

        let report = m.tick();
        assert_eq!(report, TickReport { sampled: 2, failed: 0, resets: 0 });
        for state in m.interfaces() {
            assert_eq!(state.rx_rate(), 100.0);
            assert_eq!(state.rx_utilization(), 1.0);
            assert_eq!(state.tx_rate(), 0.0);
        }
    }

    #[test]
    fn failed_read_keeps_stale_values_and_spares_siblings() {
        let mut m = monitor(MockFs::twin_edr_ports());
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_0", "1", 1_250_000_000, 625_000_000);
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_1", "1", 2_500_000_000, 0);
        m.tick();
        let before = m.interfaces()[0].clone();
        assert_eq!(before.rx_rate(), 10.0);
        assert_eq!(before.tx_rate(), 5.0);

        // Tick N: mlx5_0 loses its transmit counter, mlx5_1 keeps moving.
        m.fs_mut().remove_file(
            Path::new(SCENARIO_ROOT).join("mlx5_0/ports/1/counters/port_xmit_data"),
        );
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_1", "1", 3_750_000_000, 0);
        let report = m.tick();
        assert_eq!(report.failed, 1);
        assert_eq!(report.sampled, 1);

        let after = &m.interfaces()[0];
        assert_eq!(after.rx_rate(), before.rx_rate());
        assert_eq!(after.tx_rate(), before.tx_rate());
        assert_eq!(after.prev_counters(), before.prev_counters());
        assert_eq!(m.interfaces()[1].rx_rate(), 10.0);
    }

    #[test]
    fn counter_reset_is_reported() {
        let mut m = monitor(MockFs::infiniband_host());
        m.fs_mut().set_counters(SCENARIO_ROOT, "mlx5_1", "2", 0, 5_000);
        let report = m.tick();
        assert_eq!(report.resets, 1);
        assert_eq!(m.interfaces()[2].outcome(), SampleOutcome::CounterReset);
        assert_eq!(m.interfaces()[1].outcome(), SampleOutcome::Fresh);
    }

    #[test]
    fn unreadable_initial_counters_exclude_port() {
        let mut fs = MockFs::twin_edr_ports();
        fs.add_file(
            format!("{SCENARIO_ROOT}/mlx5_1/ports/1/counters/port_rcv_data"),
            "not a number",
        );
        let m = monitor(fs);
        assert_eq!(m.interfaces().len(), 1);
        assert_eq!(m.interfaces()[0].id().to_string(), "mlx5_0:1");
    }

    #[test]
    fn nothing_left_after_filtering_is_fatal() {
        let result = Monitor::discover(
            MockFs::twin_edr_ports(),
            SCENARIO_ROOT,
            &IgnoreSet::parse("mlx5_0,mlx5_1"),
            PollInterval::DEFAULT,
        );
        assert!(matches!(result, Err(MonitorError::NoInterfaces)));
    }

    #[test]
    fn missing_root_is_fatal() {
        let result = Monitor::discover(
            MockFs::new(),
            SCENARIO_ROOT,
            &IgnoreSet::default(),
            PollInterval::DEFAULT,
        );
        assert!(matches!(result, Err(MonitorError::Discovery(_))));
    }

    #[test]
    fn rates_use_configured_interval() {
        let interval: PollInterval = "2s".parse().unwrap();
        let mut m = Monitor::discover(
            MockFs::twin_edr_ports(),
            SCENARIO_ROOT,
            &IgnoreSet::default(),
            interval,
        )
        .unwrap();
        m.fs_mut()
            .set_counters(SCENARIO_ROOT, "mlx5_0", "1", 12_500_000_000, 0);
        m.tick();
        assert_eq!(m.interfaces()[0].rx_rate(), 50.0);
    }
}
