/// Space figures of one mounted filesystem at one instant.
///
/// `used_bytes + available_bytes` can be smaller than `total_bytes`: blocks
/// reserved for root count as neither.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReading {
    pub device:          String,
    pub mount_point:     String,
    pub fs_type:         String,
    /// Key of the matching entry in the snapshot's device map ("sda1", "dm-0").
    pub io_device:       String,
    pub total_bytes:     u64,
    pub used_bytes:      u64,
    pub available_bytes: u64,
}

impl CapacityReading {
    pub fn usage_percent(&self) -> f64 {
        if self.total_bytes == 0 { return 0.0; }
        self.used_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}
