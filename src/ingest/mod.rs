//! JSONL record ingestion
//!
//! Reads cleaned post records from JSON-lines files. Loading is tolerant at
//! the line level: a line that fails to deserialize is skipped and counted,
//! never aborting the run. Only an unreadable file is an error.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{IngestStats, PostRecord, RawRecord};

/// Parse JSONL content into records, folding counters into `stats`.
///
/// Blank lines are ignored. Invalid lines are logged, counted as skipped
/// and dropped.
pub fn parse_jsonl(content: &str, stats: &mut IngestStats) -> Vec<PostRecord> {
    let mut records = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<RawRecord>(line) {
            Ok(raw) => {
                let (record, malformed) = PostRecord::from_raw(raw);
                stats.record(&record, malformed);
                records.push(record);
            }
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Skipping invalid JSON line");
                stats.record_skipped();
            }
        }
    }

    records
}

/// Read and parse a single JSONL file (blocking).
pub fn load_file(path: &Path) -> Result<(Vec<PostRecord>, IngestStats)> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut stats = IngestStats {
        files_read: 1,
        ..IngestStats::default()
    };
    let records = parse_jsonl(&content, &mut stats);

    debug!(
        path = %path.display(),
        records = records.len(),
        skipped = stats.skipped_lines,
        "Parsed input file"
    );

    Ok((records, stats))
}

/// Load several JSONL files, parsing on blocking threads.
///
/// Records are concatenated in argument order regardless of which file
/// finishes first.
pub async fn load_files(paths: &[PathBuf]) -> Result<(Vec<PostRecord>, IngestStats)> {
    let concurrency = num_cpus().min(8);

    let results: Vec<_> = stream::iter(paths.to_vec())
        .map(|path| tokio::task::spawn_blocking(move || load_file(&path)))
        .buffered(concurrency)
        .collect()
        .await;

    let mut records = Vec::new();
    let mut stats = IngestStats::default();
    for result in results {
        let (file_records, file_stats) =
            result.map_err(|e| Error::other(format!("File load task failed: {e}")))??;
        records.extend(file_records);
        stats.merge(&file_stats);
    }

    Ok((records, stats))
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
