//! Port discovery under the InfiniBand sysfs class directory.

use std::path::Path;

use tracing::debug;

use super::{CollectError, parse_capability, read_rate};
use crate::collector::traits::FileSystem;
use crate::config::IgnoreSet;
use crate::model::{InterfaceDescriptor, PortId};

/// Default discovery root.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/infiniband";

const RX_COUNTER: &str = "port_rcv_data";
const TX_COUNTER: &str = "port_xmit_data";

/// Enumerates every port of every adaptor under `root`.
///
/// Only an unreadable `root` is an error. Entries that are not directories,
/// adaptors without a `ports` directory, ports missing either counter file,
/// and anything matched by `ignore` are skipped. The result is sorted by
/// adaptor name, then port number.
pub fn discover_interfaces<F: FileSystem>(
    fs: &F,
    root: impl AsRef<Path>,
    ignore: &IgnoreSet,
) -> Result<Vec<InterfaceDescriptor>, CollectError> {
    let root = root.as_ref();
    let mut found = Vec::new();

    for adaptor_path in fs.read_dir(root)? {
        let Some(adaptor) = entry_name(&adaptor_path) else {
            continue;
        };
        if ignore.is_adaptor_ignored(&adaptor) {
            debug!(adaptor = %adaptor, "adaptor ignored");
            continue;
        }
        if !fs.is_dir(&adaptor_path) {
            debug!(path = %adaptor_path.display(), "not an adaptor directory, skipping");
            continue;
        }

        let ports_dir = adaptor_path.join("ports");
        let port_paths = match fs.read_dir(&ports_dir) {
            Ok(paths) => paths,
            Err(e) => {
                debug!(adaptor = %adaptor, error = %e, "no readable ports directory, skipping");
                continue;
            }
        };

        for port_path in port_paths {
            if !fs.is_dir(&port_path) {
                continue;
            }
            let Some(port) = entry_name(&port_path) else {
                continue;
            };
            let id = PortId::new(adaptor.clone(), port);
            if ignore.is_port_ignored(&id) {
                debug!(port = %id, "port ignored");
                continue;
            }
            if let Some(descriptor) = describe_port(fs, id, &port_path) {
                found.push(descriptor);
            }
        }
    }

    found.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(found)
}

fn describe_port<F: FileSystem>(fs: &F, id: PortId, port_path: &Path) -> Option<InterfaceDescriptor> {
    let counters = port_path.join("counters");
    let rx_path = counters.join(RX_COUNTER);
    let tx_path = counters.join(TX_COUNTER);
    if !fs.exists(&rx_path) || !fs.exists(&tx_path) {
        debug!(port = %id, "missing data counters, skipping");
        return None;
    }

    let rate_path = port_path.join("rate");
    let capability = match read_rate(fs, &rate_path) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(port = %id, error = %e, "rate unreadable, capacity unknown");
            None
        }
    };
    let max_gbps = match capability.as_deref().map(parse_capability) {
        Some(Ok(gbps)) => gbps,
        Some(Err(e)) => {
            debug!(port = %id, error = %e, "capacity unknown");
            0.0
        }
        None => 0.0,
    };

    Some(InterfaceDescriptor {
        id,
        rx_path,
        tx_path,
        rate_path,
        max_gbps,
        capability,
    })
}

fn entry_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}
