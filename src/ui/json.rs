use crate::monitor::{RowSet, RowSink};
use anyhow::Result;
use serde_json::{json, Value};
use std::io::Write;

/// One JSON object per cycle, one per line. Unavailable rates are `null`.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn to_value(set: &RowSet) -> Value {
    json!({
        "timestamp":     set.taken_at.to_rfc3339(),
        "cycle":         set.cycle,
        "interval_secs": set.interval.as_secs_f64(),
        "rows":          set.rows,
    })
}

impl<W: Write> RowSink for JsonSink<W> {
    fn emit(&mut self, set: &RowSet) -> Result<()> {
        serde_json::to_writer(&mut self.out, &to_value(set))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
