//! In-memory mock filesystem for testing collectors without a real sysfs.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// adaptor trees and counter changes between ticks.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Removes a file. Returns `true` if it existed.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> bool {
        self.files.remove(path.as_ref()).is_some()
    }

    /// Adds one port of an adaptor with its counters and optional rate file.
    ///
    /// Layout matches the kernel: `<root>/<adaptor>/ports/<port>/counters/port_{rcv,xmit}_data`
    /// and `<root>/<adaptor>/ports/<port>/rate`.
    pub fn add_port(
        &mut self,
        root: impl AsRef<Path>,
        adaptor: &str,
        port: &str,
        rx: i64,
        tx: i64,
        rate: Option<&str>,
    ) {
        let base = port_dir(root.as_ref(), adaptor, port);
        self.add_dir(&base);
        self.add_file(base.join("counters").join("port_rcv_data"), format!("{rx}\n"));
        self.add_file(base.join("counters").join("port_xmit_data"), format!("{tx}\n"));
        if let Some(rate) = rate {
            self.add_file(base.join("rate"), format!("{rate}\n"));
        }
    }

    /// Overwrites both counters of a port added with [`MockFs::add_port`].
    pub fn set_counters(
        &mut self,
        root: impl AsRef<Path>,
        adaptor: &str,
        port: &str,
        rx: i64,
        tx: i64,
    ) {
        let counters = port_dir(root.as_ref(), adaptor, port).join("counters");
        self.add_file(counters.join("port_rcv_data"), format!("{rx}\n"));
        self.add_file(counters.join("port_xmit_data"), format!("{tx}\n"));
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

fn port_dir(root: &Path, adaptor: &str, port: &str) -> PathBuf {
    root.join(adaptor).join("ports").join(port)
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();

        // Find all files and directories that are direct children
        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/sys/class/infiniband/mlx5_0/ports/1/rate", "100 Gb/sec\n");

        assert!(fs.exists(Path::new("/sys/class/infiniband/mlx5_0/ports/1/rate")));
        assert!(fs.is_dir(Path::new("/sys/class/infiniband/mlx5_0")));
        assert!(!fs.is_dir(Path::new("/sys/class/infiniband/mlx5_0/ports/1/rate")));
    }

    #[test]
    fn test_mock_fs_add_port_layout() {
        let mut fs = MockFs::new();
        fs.add_port("/ib", "mlx5_0", "1", 10, 20, Some("100 Gb/sec (4X EDR)"));

        let rx = fs
            .read_to_string(Path::new("/ib/mlx5_0/ports/1/counters/port_rcv_data"))
            .unwrap();
        assert_eq!(rx, "10\n");
        let ports = fs.read_dir(Path::new("/ib/mlx5_0/ports")).unwrap();
        assert_eq!(ports, vec![PathBuf::from("/ib/mlx5_0/ports/1")]);
    }

    #[test]
    fn test_mock_fs_set_counters_and_remove() {
        let mut fs = MockFs::new();
        fs.add_port("/ib", "mlx5_0", "1", 10, 20, None);
        fs.set_counters("/ib", "mlx5_0", "1", 30, 40);

        let tx_path = Path::new("/ib/mlx5_0/ports/1/counters/port_xmit_data");
        assert_eq!(fs.read_to_string(tx_path).unwrap(), "40\n");
        assert!(fs.remove_file(tx_path));
        assert!(!fs.remove_file(tx_path));
        assert_eq!(
            fs.read_to_string(tx_path).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_mock_fs_read_dir_missing() {
        let fs = MockFs::new();
        assert!(fs.read_dir(Path::new("/nonexistent")).is_err());
    }
}
