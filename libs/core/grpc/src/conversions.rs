//! Protobuf ↔ domain conversions for timestamps
//!
//! Timestamps travel as `int64` seconds since the Unix epoch.

use chrono::{DateTime, Utc};

/// Convert a DateTime to Unix seconds
///
/// # Example
/// ```ignore
/// let ts = datetime_to_timestamp(Utc::now());
/// ```
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
  dt.timestamp()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_datetime_to_timestamp() {
    let dt = Utc.with_ymd_and_hms(2023, 1, 1, 12, 30, 0).unwrap();
    assert_eq!(datetime_to_timestamp(dt), 1_672_576_200);
  }

  #[test]
  fn test_timestamp_drops_subseconds() {
    let dt = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
    assert_eq!(datetime_to_timestamp(dt), 1_700_000_000);
  }
}
