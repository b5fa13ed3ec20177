//! Human-readable approximate size formatting.
//!
//! Policy: exact byte counts below 1024, then one-decimal binary units
//! (`KiB`, `MiB`, ...). Used for the parenthesized size suffix after file
//! links, so approximation beats precision here.

/// Binary unit suffixes, smallest to largest.
const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Format a byte count as an approximate human-readable size.
///
/// # Examples
///
/// - `approximate_size(0)` -> `"0 bytes"`
/// - `approximate_size(1)` -> `"1 byte"`
/// - `approximate_size(1023)` -> `"1023 bytes"`
/// - `approximate_size(4300)` -> `"4.2 KiB"`
pub fn approximate_size(len: u64) -> String {
    if len == 1 {
        return "1 byte".to_string();
    }
    if len < 1024 {
        return format!("{len} bytes");
    }

    let mut value = len as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_boundary() {
        assert_eq!(approximate_size(0), "0 bytes");
        assert_eq!(approximate_size(1), "1 byte");
        assert_eq!(approximate_size(1023), "1023 bytes");
        assert_eq!(approximate_size(1024), "1.0 KiB");
    }

    #[test]
    fn test_kib() {
        assert_eq!(approximate_size(4300), "4.2 KiB");
        assert_eq!(approximate_size(1536), "1.5 KiB");
    }

    #[test]
    fn test_larger_units() {
        assert_eq!(approximate_size(1024 * 1024), "1.0 MiB");
        assert_eq!(approximate_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn test_saturates_at_largest_unit() {
        assert_eq!(approximate_size(u64::MAX), "16.0 EiB");
    }
}
