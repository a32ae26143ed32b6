pub mod diskstats;
pub mod filesystem;

use crate::config::DevicesConfig;
use crate::models::snapshot::Snapshot;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Source of snapshots for the monitor loop.
///
/// `read` never fails as a whole: anything that cannot be read is left out
/// of the returned snapshot.
pub trait SnapshotReader {
    fn read(&mut self) -> Snapshot;
}

/// Reads counters from /proc/diskstats and capacities from /proc/mounts
/// plus statvfs.
#[derive(Debug, Clone)]
pub struct ProcReader {
    diskstats_path:  PathBuf,
    mounts_path:     PathBuf,
    include_network: bool,
    devices:         DevicesConfig,
}

impl ProcReader {
    pub fn new(include_network: bool, devices: DevicesConfig) -> Self {
        Self {
            diskstats_path: PathBuf::from("/proc/diskstats"),
            mounts_path:    PathBuf::from("/proc/mounts"),
            include_network,
            devices,
        }
    }

    /// Point the reader at alternative diskstats and mounts files.
    #[cfg(test)]
    pub fn with_paths(mut self, diskstats: impl Into<PathBuf>, mounts: impl Into<PathBuf>) -> Self {
        self.diskstats_path = diskstats.into();
        self.mounts_path    = mounts.into();
        self
    }
}

impl SnapshotReader for ProcReader {
    fn read(&mut self) -> Snapshot {
        let devices = diskstats::read_diskstats(&self.diskstats_path, |name| self.devices.is_excluded(name))
            .unwrap_or_else(|e| {
                warn!("no I/O counters this cycle: {}", e);
                Vec::new()
            });
        let capacities = filesystem::read_filesystems(&self.mounts_path, self.include_network)
            .unwrap_or_else(|e| {
                warn!("no filesystem capacities this cycle: {}", e);
                Vec::new()
            });

        let snapshot = Snapshot::new(devices, capacities);
        debug!(
            devices = snapshot.devices.len(),
            mounts = snapshot.capacities.len(),
            "snapshot taken"
        );
        snapshot
    }
}
