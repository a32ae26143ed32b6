use crate::error::CollectError;
use crate::models::device::DeviceReading;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// /proc/diskstats counts sectors in 512-byte units regardless of the
/// device's real sector size.
const SECTOR_BYTES: u64 = 512;

/// Read a diskstats file and return one reading per device line.
///
/// All readings share one `captured_at` taken right after the file was read.
/// Lines that do not parse are dropped individually; `skip` filters device
/// names out before parsing.
pub fn read_diskstats(
    path: &Path,
    skip: impl Fn(&str) -> bool,
) -> Result<Vec<DeviceReading>, CollectError> {
    let content = std::fs::read_to_string(path).map_err(|e| CollectError::read(path, e))?;
    let captured_at = Instant::now();
    Ok(parse_diskstats(&content, captured_at, skip))
}

pub fn parse_diskstats(
    content: &str,
    captured_at: Instant,
    skip: impl Fn(&str) -> bool,
) -> Vec<DeviceReading> {
    let mut out: Vec<DeviceReading> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() { continue; }
        match parse_line(line, captured_at) {
            Ok(reading) => {
                if skip(&reading.device) { continue; }
                if out.iter().any(|r| r.device == reading.device) {
                    debug!(device = %reading.device, "duplicate diskstats entry ignored");
                    continue;
                }
                out.push(reading);
            }
            Err(e) => debug!("{}", e),
        }
    }
    out
}

/// Parse one /proc/diskstats line.
///
/// Layout: major minor name reads_completed reads_merged sectors_read
/// ms_reading writes_completed writes_merged sectors_written ...
pub fn parse_line(line: &str, captured_at: Instant) -> Result<DeviceReading, CollectError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 14 {
        return Err(CollectError::MalformedLine(line.to_string()));
    }
    let num = |i: usize| -> Result<u64, CollectError> {
        fields[i].parse().map_err(|_| CollectError::MalformedLine(line.to_string()))
    };

    Ok(DeviceReading {
        device:      fields[2].to_string(),
        read_ops:    num(3)?,
        write_ops:   num(7)?,
        read_bytes:  num(5)?.saturating_mul(SECTOR_BYTES),
        write_bytes: num(9)?.saturating_mul(SECTOR_BYTES),
        captured_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
   8       0 sda 1200 30 204800 900 600 20 102400 700 0 1500 1600 0 0 0 0
   8       1 sda1 1100 28 200000 850 590 19 100000 690 0 1400 1540 0 0 0 0
   7       0 loop0 40 0 640 2 0 0 0 0 0 4 2 0 0 0 0
 259       0 nvme0n1 55 0 4400 10 66 0 8800 20 0 30 30
 253       0 dm-0 9 0 72 1 3 0 24 1 0 2 2 0 0 0 0
";

    #[test]
    fn parses_counters_and_converts_sectors() {
        let at = Instant::now();
        let devs = parse_diskstats(SAMPLE, at, |_| false);
        let names: Vec<&str> = devs.iter().map(|d| d.device.as_str()).collect();
        assert_eq!(names, ["sda", "sda1", "loop0", "nvme0n1", "dm-0"]);

        let sda = &devs[0];
        assert_eq!(sda.read_ops, 1200);
        assert_eq!(sda.write_ops, 600);
        assert_eq!(sda.read_bytes, 204_800 * 512);
        assert_eq!(sda.write_bytes, 102_400 * 512);
        assert!(devs.iter().all(|d| d.captured_at == at));
    }

    #[test]
    fn skip_filter_applies_by_name() {
        let devs = parse_diskstats(SAMPLE, Instant::now(), |n| n.starts_with("loop"));
        assert!(devs.iter().all(|d| d.device != "loop0"));
        assert_eq!(devs.len(), 4);
    }

    #[test]
    fn bad_lines_are_dropped_individually() {
        let content = "\
   8 0 sda 1 0 8 0 1 0 8 0 0 0 0
   8 16 sdb 1 0 8
   8 32 sdc x 0 8 0 1 0 8 0 0 0 0
   8 48 sdd 2 0 16 0 2 0 16 0 0 0 0
";
        let devs = parse_diskstats(content, Instant::now(), |_| false);
        let names: Vec<&str> = devs.iter().map(|d| d.device.as_str()).collect();
        assert_eq!(names, ["sda", "sdd"]);
        assert!(matches!(
            parse_line("8 16 sdb 1 0 8", Instant::now()),
            Err(CollectError::MalformedLine(_))
        ));
    }

    #[test]
    fn duplicate_names_keep_the_first_entry() {
        let content = "\
   8 0 sda 1 0 8 0 1 0 8 0 0 0 0
   8 0 sda 9 0 8 0 9 0 8 0 0 0 0
";
        let devs = parse_diskstats(content, Instant::now(), |_| false);
        assert_eq!(devs.len(), 1);
        assert_eq!(devs[0].read_ops, 1);
    }

    #[test]
    fn reads_from_file_and_reports_missing_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let devs = read_diskstats(f.path(), |_| false).unwrap();
        assert_eq!(devs.len(), 5);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("diskstats");
        assert!(matches!(
            read_diskstats(&missing, |_| false),
            Err(CollectError::Read { .. })
        ));
    }
}
