use crate::models::device::DeviceReading;
use crate::models::rates::IORates;

/// Compute per-second rates between two readings of the same device.
///
/// Returns `None` when there is no previous reading or `elapsed_sec` is not
/// positive. A counter that went backwards (reset, re-enumeration, wrap)
/// yields `None` for that field only; it is never clamped to zero. The
/// caller keeps `curr` as the next previous reading, which re-baselines the
/// counter for the following interval.
pub fn compute(
    prev: Option<&DeviceReading>,
    curr: &DeviceReading,
    elapsed_sec: f64,
) -> Option<IORates> {
    let prev = prev?;
    if elapsed_sec.is_nan() || elapsed_sec <= 0.0 {
        return None;
    }

    let per_sec = |p: u64, c: u64| c.checked_sub(p).map(|d| d as f64 / elapsed_sec);
    let kb_per_sec = |p: u64, c: u64| per_sec(p, c).map(|r| r / 1024.0);

    let rates = IORates {
        device:            curr.device.clone(),
        read_ops_per_sec:  per_sec(prev.read_ops, curr.read_ops),
        write_ops_per_sec: per_sec(prev.write_ops, curr.write_ops),
        read_kb_per_sec:   kb_per_sec(prev.read_bytes, curr.read_bytes),
        write_kb_per_sec:  kb_per_sec(prev.write_bytes, curr.write_bytes),
    };
    if !rates.is_complete() {
        tracing::debug!(device = %curr.device, "counter went backwards, re-baselining");
    }
    Some(rates)
}

/// Like [`compute`], with the interval taken from the readings' own
/// timestamps rather than the configured refresh period.
pub fn compute_between(prev: Option<&DeviceReading>, curr: &DeviceReading) -> Option<IORates> {
    let elapsed = match prev {
        Some(p) => curr.captured_at.checked_duration_since(p.captured_at)?.as_secs_f64(),
        None    => 0.0,
    };
    compute(prev, curr, elapsed)
}
