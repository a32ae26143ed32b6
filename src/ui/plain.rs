use crate::monitor::{RowSet, RowSink};
use crate::models::row::Row;
use crate::util::human::{fmt_pct, fmt_rate};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Line-oriented table, redrawn from the top of the screen every cycle.
pub struct PlainSink<W: Write> {
    out:   W,
    clear: bool,
}

impl<W: Write> PlainSink<W> {
    /// `clear` = wipe the screen before each table (off when piping).
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowSink for PlainSink<W> {
    fn emit(&mut self, set: &RowSet) -> Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(
            self.out,
            "diskmon  {}  (every {:.1}s, cycle {})",
            set.taken_at.format("%Y-%m-%d %H:%M:%S"),
            set.interval.as_secs_f64(),
            set.cycle,
        )?;
        let header = header_line();
        writeln!(self.out, "{}", header)?;
        writeln!(self.out, "{}", "-".repeat(header.chars().count()))?;
        for row in &set.rows {
            writeln!(self.out, "{}", format_row(row))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

pub fn header_line() -> String {
    format!(
        "{:<15} {:<20} {:<10} {:<10} {:<10} {:<8} {:<12} {:<13} {:<12} {:<12}",
        "Device", "Mount Point", "Used", "Available", "Total", "Usage %",
        "Read Ops/s", "Write Ops/s", "Read KB/s", "Write KB/s",
    )
    .trim_end()
    .to_string()
}

pub fn format_row(row: &Row) -> String {
    let [r_ops, w_ops, r_kb, w_kb] = row.rate_values().map(fmt_rate);
    format!(
        "{:<15} {:<20} {:<10} {:<10} {:<10} {:<8} {:<12} {:<13} {:<12} {:<12}",
        truncate(&row.device, 14),
        truncate(&row.mount_point, 19),
        row.used,
        row.available,
        row.total,
        fmt_pct(row.usage_percent),
        r_ops, w_ops, r_kb, w_kb,
    )
    .trim_end()
    .to_string()
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filesystem::CapacityReading;
    use crate::models::rates::IORates;
    use std::time::Duration;

    fn row(rates: Option<IORates>) -> Row {
        Row::new(
            &CapacityReading {
                device:          "/dev/mapper/very-long-volume-name".into(),
                mount_point:     "/".into(),
                fs_type:         "xfs".into(),
                io_device:       "dm-0".into(),
                total_bytes:     0,
                used_bytes:      0,
                available_bytes: 0,
            },
            rates,
        )
    }

    fn set(rows: Vec<Row>) -> RowSet {
        RowSet { rows, taken_at: chrono::Local::now(), cycle: 1, interval: Duration::from_millis(2500) }
    }

    #[test]
    fn unavailable_rates_print_as_marker_not_zero() {
        let line = format_row(&row(None));
        assert!(line.starts_with("/dev/mapper/ve "), "{line}");
        assert_eq!(line.matches("N/A").count(), 4);
        assert!(line.contains("0 B"));
        assert!(line.contains("0.0%"));
    }

    #[test]
    fn present_rates_print_with_one_decimal() {
        let rates = IORates {
            device:            "dm-0".into(),
            read_ops_per_sec:  Some(6.5),
            write_ops_per_sec: Some(0.0),
            read_kb_per_sec:   None,
            write_kb_per_sec:  Some(1234.56),
        };
        let line = format_row(&row(Some(rates)));
        assert!(line.contains("6.5 "));
        assert!(line.contains("0.0 "));
        assert!(line.ends_with("1234.6"), "{line}");
        assert_eq!(line.matches("N/A").count(), 1);
    }

    #[test]
    fn emit_writes_header_separator_and_rows() {
        let mut sink = PlainSink::new(Vec::new(), false);
        sink.emit(&set(vec![row(None), row(None)])).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("every 2.5s, cycle 1"));
        assert!(lines[1].starts_with("Device"));
        assert!(lines[1].ends_with("Write KB/s"));
        assert!(lines[2].chars().all(|c| c == '-'));
        assert_eq!(lines[2].len(), lines[1].len());
    }

    #[test]
    fn emit_clears_screen_when_asked() {
        let mut sink = PlainSink::new(Vec::new(), true);
        sink.emit(&set(vec![])).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("\u{1b}[2J"), "{out:?}");
    }
}
