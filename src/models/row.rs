use crate::models::filesystem::CapacityReading;
use crate::models::rates::IORates;
use crate::util::human::format_bytes;
use serde::Serialize;

/// One output line: capacity of a mount point plus the I/O rates of the
/// device backing it, if known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub device:        String,
    pub mount_point:   String,
    pub fs_type:       String,
    pub used:          String,
    pub available:     String,
    pub total:         String,
    pub usage_percent: f64,
    pub rates:         Option<IORates>,
}

impl Row {
    pub fn new(cap: &CapacityReading, rates: Option<IORates>) -> Self {
        Self {
            device:        cap.device.clone(),
            mount_point:   cap.mount_point.clone(),
            fs_type:       cap.fs_type.clone(),
            used:          format_bytes(cap.used_bytes),
            available:     format_bytes(cap.available_bytes),
            total:         format_bytes(cap.total_bytes),
            usage_percent: cap.usage_percent(),
            rates,
        }
    }

    /// Read ops/s, write ops/s, read KB/s, write KB/s; `None` = not yet available.
    pub fn rate_values(&self) -> [Option<f64>; 4] {
        match &self.rates {
            Some(r) => [r.read_ops_per_sec, r.write_ops_per_sec, r.read_kb_per_sec, r.write_kb_per_sec],
            None    => [None; 4],
        }
    }
}
