use std::time::Instant;

/// Raw, monotonically increasing I/O counters of one block device at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReading {
    pub device:      String,
    pub read_ops:    u64,
    pub write_ops:   u64,
    pub read_bytes:  u64,
    pub write_bytes: u64,
    pub captured_at: Instant,
}
