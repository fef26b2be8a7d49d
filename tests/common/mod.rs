//! Common test utilities

use chrono::{DateTime, TimeZone, Utc};
use tagrise::models::PostRecord;

/// Create an untimed record with the given tags
pub fn record(id: &str, tags: &[&str]) -> PostRecord {
    PostRecord::new(id, None, tags.iter().map(|t| (*t).to_string()).collect())
}

/// Create a timed record with the given tags
#[allow(dead_code)]
pub fn timed_record(id: &str, timestamp: DateTime<Utc>, tags: &[&str]) -> PostRecord {
    PostRecord::new(
        id,
        Some(timestamp),
        tags.iter().map(|t| (*t).to_string()).collect(),
    )
}

/// Fixed reference time used as the newest record in window tests
#[allow(dead_code)]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
}
