// Core data structures for the tagrise analytics engine

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw record as written by the upstream cleaning pipeline (one JSON line).
///
/// Only the fields the analytics core reads are listed; anything else on the
/// line (title, desc, images, ...) is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawRecord {
    /// Source item identifier
    #[serde(default)]
    pub item_id: String,

    /// Publication time, ISO-8601 string or absent
    #[serde(default)]
    pub time: Option<String>,

    /// Free-text tags attached to the post
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Cleaned post record consumed by the graph builder and trend detector
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostRecord {
    /// Source item identifier
    pub id: String,

    /// Publication time; `None` when absent or unparsable upstream
    pub timestamp: Option<DateTime<Utc>>,

    /// Trimmed, case-insensitively deduplicated tags (first casing wins)
    pub tags: Vec<String>,
}

impl PostRecord {
    /// Create a record, normalizing the tag list
    pub fn new(
        id: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            tags: normalize_tags(&tags),
        }
    }

    /// Convert a wire record, reporting whether its `time` field was present
    /// but unparsable. A malformed timestamp degrades to `None` instead of
    /// failing the record (record-level tolerance, not run-level).
    pub fn from_raw(raw: RawRecord) -> (Self, bool) {
        let (timestamp, malformed) = match raw.time.as_deref() {
            Some(value) if !value.trim().is_empty() => match parse_timestamp(value) {
                Some(ts) => (Some(ts), false),
                None => (None, true),
            },
            _ => (None, false),
        };

        let record = Self {
            id: raw.item_id,
            timestamp,
            tags: normalize_tags(&raw.tags),
        };

        (record, malformed)
    }

    /// Number of tags after normalization
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// True when the record can contribute at least one co-occurrence edge
    #[must_use]
    pub fn has_pairs(&self) -> bool {
        self.tags.len() >= 2
    }
}

/// Normalize a tag list: trim whitespace, drop empties, deduplicate
/// case-insensitively keeping the first occurrence's casing.
///
/// The upstream cleaner already applies the same rule; this is the defensive
/// re-application the core performs on every input path.
#[must_use]
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tags.len());
    let mut cleaned = Vec::with_capacity(tags.len());

    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            cleaned.push(trimmed.to_string());
        }
    }

    cleaned
}

/// Parse an ISO-8601-ish timestamp the way the upstream pipeline emits them.
///
/// Accepted shapes: RFC 3339 (`2024-03-01T09:30:00Z`, offset variants),
/// naive date-times with `T` or space separators (assumed UTC), and bare
/// dates (midnight UTC). Anything else is `None`.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let normalized = value.trim().replace(' ', "T");
    if normalized.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Counters accumulated while loading records from JSONL input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Input files read
    pub files_read: usize,

    /// Records successfully deserialized
    pub record_count: usize,

    /// Lines skipped because they were not valid JSON records
    pub skipped_lines: usize,

    /// Records whose `time` field was present but unparsable
    pub malformed_timestamps: usize,

    /// Records with no usable timestamp (absent or malformed)
    pub untimed_records: usize,

    /// Sum of per-record tag counts after normalization
    pub total_tags: usize,
}

impl IngestStats {
    /// Fold one parsed record into the counters
    pub fn record(&mut self, record: &PostRecord, malformed_timestamp: bool) {
        self.record_count += 1;
        self.total_tags += record.tag_count();
        if malformed_timestamp {
            self.malformed_timestamps += 1;
        }
        if record.timestamp.is_none() {
            self.untimed_records += 1;
        }
    }

    /// Record a line that failed to deserialize
    pub fn record_skipped(&mut self) {
        self.skipped_lines += 1;
    }

    /// Average number of tags per record
    #[must_use]
    pub fn avg_tags_per_record(&self) -> f64 {
        if self.record_count == 0 {
            0.0
        } else {
            self.total_tags as f64 / self.record_count as f64
        }
    }

    /// Merge counters from another ingest pass (multi-file loads)
    pub fn merge(&mut self, other: &IngestStats) {
        self.files_read += other.files_read;
        self.record_count += other.record_count;
        self.skipped_lines += other.skipped_lines;
        self.malformed_timestamps += other.malformed_timestamps;
        self.untimed_records += other.untimed_records;
        self.total_tags += other.total_tags;
    }
}
