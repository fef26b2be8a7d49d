//! Error scenario integration tests
//!
//! Covers the failure and degradation paths:
//! - Missing input files surface as storage errors
//! - The empty collection is the only hard input error
//! - Undeserializable lines are skipped and counted
//! - Malformed timestamps degrade records instead of rejecting them
//! - Tagless collections still produce a valid report

use tempfile::TempDir;

use tagrise::analytics::{compute_pagerank, detect, RankParams, Report, TrendMode, TrendParams};
use tagrise::error::{Error, ErrorCategory};
use tagrise::graph::{GraphError, TagGraph};
use tagrise::ingest;

use super::fixtures::{
    write_jsonl, MALFORMED_TIMESTAMPS_JSONL, MIXED_VALIDITY_JSONL, TAGLESS_JSONL,
};

// ============================================================================
// File Access Errors
// ============================================================================

#[tokio::test]
async fn test_missing_file_reports_path() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.jsonl");

    // Act
    let err = ingest::load_files(&[path]).await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::FileRead { .. }));
    assert_eq!(err.category(), ErrorCategory::Storage);
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("does_not_exist.jsonl"));
}

#[tokio::test]
async fn test_one_missing_file_fails_the_whole_load() {
    let dir = TempDir::new().unwrap();
    let good = write_jsonl(&dir, "good.jsonl", r#"{"item_id":"1","tags":["a","b"]}"#);
    let bad = dir.path().join("missing.jsonl");

    let result = ingest::load_files(&[good, bad]).await;

    assert!(matches!(result, Err(Error::FileRead { .. })));
}

// ============================================================================
// Empty Input
// ============================================================================

#[tokio::test]
async fn test_empty_file_leads_to_empty_input_error() {
    // Arrange: a zero-byte file loads fine but yields no records
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "empty.jsonl", "");

    let (records, stats) = ingest::load_files(&[path]).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(stats.files_read, 1);
    assert_eq!(stats.record_count, 0);

    // Act + Assert: downstream stages refuse the empty collection
    let graph_err = TagGraph::build(&records).unwrap_err();
    assert!(matches!(graph_err, GraphError::EmptyInput));

    let trend_err = detect(&records, &TrendParams::default()).unwrap_err();
    assert_eq!(trend_err.to_string(), "record collection is empty");

    let unified: Error = graph_err.into();
    assert_eq!(unified.category(), ErrorCategory::Input);
    assert!(!unified.is_recoverable());
}

#[tokio::test]
async fn test_whitespace_only_file_is_empty_not_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "blank.jsonl", "\n   \n\t\n");

    let (records, stats) = ingest::load_files(&[path]).await.unwrap();

    // Blank lines are not records and not errors
    assert!(records.is_empty());
    assert_eq!(stats.skipped_lines, 0);
}

// ============================================================================
// Degraded Input
// ============================================================================

#[tokio::test]
async fn test_invalid_lines_skipped_and_counted() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "mixed.jsonl", MIXED_VALIDITY_JSONL);

    // Act
    let (records, stats) = ingest::load_files(&[path]).await.unwrap();

    // Assert: three good records survive two broken lines
    assert_eq!(stats.record_count, 3);
    assert_eq!(stats.skipped_lines, 2);

    let graph = TagGraph::build(&records).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.weight("a", "b"), Some(1));
    assert_eq!(graph.weight("a", "c"), Some(1));
    assert_eq!(graph.weight("b", "c"), Some(1));
}

#[tokio::test]
async fn test_malformed_timestamps_degrade_to_untimed() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "times.jsonl", MALFORMED_TIMESTAMPS_JSONL);

    // Act
    let (records, stats) = ingest::load_files(&[path]).await.unwrap();

    // Assert: no record is lost over a bad time field
    assert_eq!(stats.record_count, 3);
    assert_eq!(stats.skipped_lines, 0);
    assert_eq!(stats.malformed_timestamps, 2);
    assert_eq!(stats.untimed_records, 2);

    // Tags from degraded records still feed the graph
    let graph = TagGraph::build(&records).unwrap();
    assert_eq!(graph.occurrence("x"), Some(3));
    assert_eq!(graph.weight("x", "y"), Some(2));

    // Only one record carries a usable time, so trends fall back
    let analysis = detect(&records, &TrendParams::default()).unwrap();
    assert_eq!(analysis.diagnostics.mode, TrendMode::Fallback);
    assert_eq!(analysis.diagnostics.timestamped_count, 1);
    assert_eq!(analysis.entries[0].recent_weight, 2);
}

#[tokio::test]
async fn test_tagless_collection_yields_valid_empty_report() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "tagless.jsonl", TAGLESS_JSONL);

    // Act: the full chain runs without an error anywhere
    let (records, stats) = ingest::load_files(&[path]).await.unwrap();
    let graph = TagGraph::build(&records).unwrap();
    let ranking = compute_pagerank(&graph, &RankParams::default());
    let trends = detect(&records, &TrendParams::default()).unwrap();
    let report = Report::assemble(&graph, &ranking, trends, stats, 15);

    // Assert: everything is empty but nothing is missing
    assert_eq!(report.ingest.record_count, 3);
    assert_eq!(report.ingest.total_tags, 0);
    assert_eq!(report.graph.stats.node_count, 0);
    assert!(report.ranked_tags.is_empty());
    assert!(report.converged);
    assert!(report.trends.is_empty());
    assert_eq!(report.diagnostics.mode, TrendMode::Fallback);
    assert_eq!(report.diagnostics.total_count, 3);
    assert_eq!(report.diagnostics.timestamped_count, 2);

    assert!(report.to_json_pretty().is_ok());
}

// ============================================================================
// Stats Merging Under Degradation
// ============================================================================

#[tokio::test]
async fn test_degraded_counters_merge_across_files() {
    let dir = TempDir::new().unwrap();
    let mixed = write_jsonl(&dir, "mixed.jsonl", MIXED_VALIDITY_JSONL);
    let times = write_jsonl(&dir, "times.jsonl", MALFORMED_TIMESTAMPS_JSONL);

    let (records, stats) = ingest::load_files(&[mixed, times]).await.unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(stats.files_read, 2);
    assert_eq!(stats.record_count, 6);
    assert_eq!(stats.skipped_lines, 2);
    assert_eq!(stats.malformed_timestamps, 2);
    assert_eq!(stats.untimed_records, 5);
    assert_eq!(stats.total_tags, 12);
}
