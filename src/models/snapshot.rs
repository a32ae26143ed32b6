use crate::models::device::DeviceReading;
use crate::models::filesystem::CapacityReading;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Everything one poll observed. Immutable once built; the next poll
/// produces a new one instead of updating this.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Device name → raw counters.
    pub devices:    BTreeMap<String, DeviceReading>,
    /// Mount point → capacity figures.
    pub capacities: BTreeMap<String, CapacityReading>,
    /// Wall-clock time for display only; rate math uses `DeviceReading::captured_at`.
    pub taken_at:   DateTime<Local>,
}

impl Snapshot {
    pub fn new(
        devices: impl IntoIterator<Item = DeviceReading>,
        capacities: impl IntoIterator<Item = CapacityReading>,
    ) -> Self {
        Self {
            devices:    devices.into_iter().map(|d| (d.device.clone(), d)).collect(),
            capacities: capacities.into_iter().map(|c| (c.mount_point.clone(), c)).collect(),
            taken_at:   Local::now(),
        }
    }

    pub fn device(&self, name: &str) -> Option<&DeviceReading> {
        self.devices.get(name)
    }
}
