//! Test fixtures for integration tests
//!
//! Provides sample JSONL data and helper functions for testing

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// Clean records with mixed timestamp presence
pub const SAMPLE_RECORDS_JSONL: &str = r#"{"item_id":"p1","time":"2024-03-30T10:00:00Z","tags":["ai","tools"]}
{"item_id":"p2","time":"2024-03-30T12:00:00Z","tags":["ai","tools","rust"]}
{"item_id":"p3","time":"2024-03-29T08:15:00Z","tags":["rust","web"]}
{"item_id":"p4","tags":["ai"]}
{"item_id":"p5","time":"2024-03-28","tags":["tools","web"]}
"#;

/// A second input file to exercise multi-file loads
pub const SECOND_FILE_JSONL: &str = r#"{"item_id":"q1","time":"2024-03-30T15:00:00Z","tags":["ai","infra"]}
{"item_id":"q2","time":"2024-03-27T09:00:00Z","tags":["infra","tools"]}
"#;

/// Valid records interleaved with undeserializable lines
pub const MIXED_VALIDITY_JSONL: &str = r#"{"item_id":"ok1","tags":["a","b"]}
this line is not json
{"item_id":"ok2","tags":["a","c"]}
{"unclosed": [
{"item_id":"ok3","tags":["b","c"]}
"#;

/// Records whose time fields are present but unparsable
pub const MALFORMED_TIMESTAMPS_JSONL: &str = r#"{"item_id":"m1","time":"whenever","tags":["x","y"]}
{"item_id":"m2","time":"2024-99-99","tags":["x","y"]}
{"item_id":"m3","time":"2024-03-30T10:00:00Z","tags":["x","z"]}
"#;

/// Records with no tags at all
pub const TAGLESS_JSONL: &str = r#"{"item_id":"t1","time":"2024-03-30T10:00:00Z","tags":[]}
{"item_id":"t2","tags":[]}
{"item_id":"t3","time":"2024-03-29T10:00:00Z"}
"#;

/// Anchor timestamp used by the generated ramp data
pub fn ramp_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()
}

/// Generate JSONL with a pair accelerating into the recent window.
///
/// Ten historical records (two carrying the rising pair) and eight recent
/// records (all carrying it), anchored at [`ramp_anchor`].
pub fn rising_ramp_jsonl() -> String {
    let anchor = ramp_anchor();
    let mut lines = Vec::new();

    for i in 0..10i64 {
        let ts = anchor - Duration::days(12) - Duration::hours(i);
        let tags = if i < 2 {
            r#"["agents","rust"]"#
        } else {
            r#"["rust","web"]"#
        };
        lines.push(format!(
            r#"{{"item_id":"h{i}","time":"{}","tags":{tags}}}"#,
            ts.to_rfc3339()
        ));
    }

    for i in 0..8i64 {
        let ts = anchor - Duration::hours(i * 3);
        lines.push(format!(
            r#"{{"item_id":"r{i}","time":"{}","tags":["agents","rust"]}}"#,
            ts.to_rfc3339()
        ));
    }

    lines.join("\n")
}

/// Write content to a named file inside the given temp directory
pub fn write_jsonl(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}
