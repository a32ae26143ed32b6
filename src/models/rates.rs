use serde::Serialize;

/// Per-second rates for one device over one interval.
///
/// Each field is `None` when that counter went backwards since the previous
/// reading (reset or wraparound). A missing `IORates` altogether means the
/// device had no previous reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IORates {
    pub device:            String,
    pub read_ops_per_sec:  Option<f64>,
    pub write_ops_per_sec: Option<f64>,
    pub read_kb_per_sec:   Option<f64>,
    pub write_kb_per_sec:  Option<f64>,
}

impl IORates {
    pub fn is_complete(&self) -> bool {
        self.read_ops_per_sec.is_some()
            && self.write_ops_per_sec.is_some()
            && self.read_kb_per_sec.is_some()
            && self.write_kb_per_sec.is_some()
    }
}
