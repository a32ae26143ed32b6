/// Marker shown wherever a rate has no data yet. Never rendered as zero.
pub const UNAVAILABLE: &str = "N/A";

const KB: u64 = 1_024;
const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Format a raw byte count into a human-readable string: "114.3 GB"
///
/// The unit is the largest binary unit not exceeding `bytes` (capped at TB)
/// and the value is truncated, not rounded, to one decimal. The printed
/// figure times its unit therefore never leaves the unit's bucket:
/// 1 048 575 bytes is "1023.9 KB", not "1024.0 KB".
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KB {
        return format!("{} B", bytes);
    }
    let mut factor = KB;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes / factor >= KB {
        factor *= KB;
        unit += 1;
    }
    let tenths = (bytes as u128 * 10) / factor as u128;
    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}

/// Format a per-second rate with one decimal, or the unavailable marker.
pub fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}", r),
        None    => UNAVAILABLE.to_string(),
    }
}

/// Format a percentage with one decimal: "84.5%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_factor(unit: &str) -> u64 {
        match unit {
            "B"  => 1,
            "KB" => KB,
            "MB" => KB.pow(2),
            "GB" => KB.pow(3),
            "TB" => KB.pow(4),
            other => panic!("unexpected unit {other}"),
        }
    }

    /// The shown number times its unit lies inside that unit's bucket, and
    /// the bucket is the one `n` falls into.
    fn assert_in_bucket(n: u64) {
        let s = format_bytes(n);
        let (num, unit) = s.split_once(' ').expect("value and unit");
        let factor = unit_factor(unit) as u128;
        // Compare in tenths of a unit to stay exact for values above 2^53.
        let tenths: u128 = if unit == "B" {
            num.parse::<u128>().expect("whole bytes") * 10
        } else {
            assert_eq!(num.split('.').nth(1).map(str::len), Some(1), "{s} precision");
            num.replace('.', "").parse().expect("numeric part")
        };
        let scaled_x10 = tenths * factor;
        let n_x10 = n as u128 * 10;

        assert!(scaled_x10 <= n_x10, "{s} overshoots {n}");
        assert!(n_x10 - scaled_x10 < factor, "{s} is too far below {n}");
        if unit != "B" {
            assert!(n as u128 >= factor, "{n} too small for {unit}");
            assert!(scaled_x10 >= factor * 10, "{s} below its unit");
        }
        if unit != "TB" {
            assert!((n as u128) < factor * 1024, "{n} should have used a larger unit than {unit}");
            assert!(scaled_x10 < factor * 1024 * 10, "{s} leaves its bucket");
        }
    }

    #[test]
    fn bytes_below_one_kb_are_whole_numbers() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(KB.pow(2) - 1), "1023.9 KB");
        assert_eq!(format_bytes(KB.pow(2)), "1.0 MB");
        assert_eq!(format_bytes(KB.pow(3)), "1.0 GB");
        assert_eq!(format_bytes(KB.pow(4)), "1.0 TB");
    }

    #[test]
    fn gigabyte_example() {
        assert_eq!(format_bytes(122_797_260_800), "114.3 GB");
    }

    #[test]
    fn huge_values_stay_in_terabytes() {
        assert_eq!(format_bytes(KB.pow(4) * 5000), "5000.0 TB");
        let s = format_bytes(u64::MAX);
        assert!(s.ends_with(" TB"), "{s}");
        assert_eq!(s, "16777215.9 TB");
    }

    #[test]
    fn every_value_lands_in_its_bucket() {
        let mut samples = vec![0, 1, 512, 1023, u64::MAX, u64::MAX - 1];
        for p in 1..=4u32 {
            let f = KB.pow(p);
            samples.extend([f - 1, f, f + 1, f * 3 / 2, f * 1023, f * KB - 1]);
        }
        // A cheap deterministic spread across the whole range.
        let mut x: u64 = 0x9E37_79B9_7F4A_7C15;
        for _ in 0..2_000 {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            samples.push(x >> (x % 60));
        }
        for n in samples {
            assert_in_bucket(n);
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        assert_eq!(format_bytes(987_654_321), format_bytes(987_654_321));
    }

    #[test]
    fn rates_and_percentages() {
        assert_eq!(fmt_rate(Some(6.5)), "6.5");
        assert_eq!(fmt_rate(Some(0.0)), "0.0");
        assert_eq!(fmt_rate(None), "N/A");
        assert_eq!(fmt_pct(84.46), "84.5%");
        assert_eq!(fmt_pct(0.0), "0.0%");
    }
}
