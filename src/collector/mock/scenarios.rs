//! Pre-built mock sysfs scenarios for testing.

use super::filesystem::MockFs;

/// Discovery root used by every scenario.
pub const SCENARIO_ROOT: &str = "/sys/class/infiniband";

impl MockFs {
    /// A host with two HCAs: `mlx5_0` (one NDR port) and `mlx5_1` (two EDR ports).
    ///
    /// Also contains entries discovery must skip: a stray file at the root,
    /// an adaptor without a `ports` directory, and a port missing its
    /// transmit counter.
    pub fn infiniband_host() -> Self {
        let mut fs = Self::new();
        fs.add_port(SCENARIO_ROOT, "mlx5_0", "1", 0, 0, Some("400 Gb/sec (4X NDR)"));
        fs.add_port(SCENARIO_ROOT, "mlx5_1", "1", 1_000, 2_000, Some("100 Gb/sec (4X EDR)"));
        fs.add_port(SCENARIO_ROOT, "mlx5_1", "2", 3_000, 4_000, Some("100 Gb/sec (4X EDR)"));

        fs.add_file(format!("{SCENARIO_ROOT}/README"), "not an adaptor\n");
        fs.add_dir(format!("{SCENARIO_ROOT}/mlx5_bond"));
        fs.add_file(
            format!("{SCENARIO_ROOT}/mlx5_2/ports/1/counters/port_rcv_data"),
            "0\n",
        );
        fs
    }

    /// Two identical 100 Gb/sec ports starting from zero counters.
    pub fn twin_edr_ports() -> Self {
        let mut fs = Self::new();
        fs.add_port(SCENARIO_ROOT, "mlx5_0", "1", 0, 0, Some("100 Gb/sec (4X EDR)"));
        fs.add_port(SCENARIO_ROOT, "mlx5_1", "1", 0, 0, Some("100 Gb/sec (4X EDR)"));
        fs
    }

    /// A single port whose `rate` file is missing.
    pub fn port_without_rate() -> Self {
        let mut fs = Self::new();
        fs.add_port(SCENARIO_ROOT, "qib0", "1", 0, 0, None);
        fs
    }
}
