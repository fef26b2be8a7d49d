//! End-to-end pipeline integration tests
//!
//! Tests the complete workflow:
//! 1. JSONL loading from disk
//! 2. Graph construction
//! 3. Importance ranking
//! 4. Trend detection
//! 5. Report assembly and serialization

use std::path::PathBuf;
use tempfile::TempDir;

use tagrise::analytics::{compute_pagerank, detect, RankParams, Report, TrendMode, TrendParams};
use tagrise::graph::TagGraph;
use tagrise::ingest;

use super::fixtures::{
    ramp_anchor, rising_ramp_jsonl, write_jsonl, SAMPLE_RECORDS_JSONL, SECOND_FILE_JSONL,
};

/// Run the whole analysis chain the way the analyze command does
async fn run_pipeline(paths: &[PathBuf]) -> Report {
    let (records, stats) = ingest::load_files(paths).await.unwrap();
    let graph = TagGraph::build(&records).unwrap();
    let ranking = compute_pagerank(&graph, &RankParams::default());
    let trends = detect(&records, &TrendParams::default()).unwrap();
    Report::assemble(&graph, &ranking, trends, stats, 15)
}

// ============================================================================
// Complete Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_pipeline_single_file() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "records.jsonl", SAMPLE_RECORDS_JSONL);

    // Act
    let report = run_pipeline(&[path]).await;

    // Assert: ingest counters
    assert_eq!(report.ingest.files_read, 1);
    assert_eq!(report.ingest.record_count, 5);
    assert_eq!(report.ingest.skipped_lines, 0);
    assert_eq!(report.ingest.untimed_records, 1);

    // Assert: graph structure (ai, tools, rust, web)
    assert_eq!(report.graph.stats.node_count, 4);
    assert_eq!(report.graph.stats.edge_count, 5);
    assert_eq!(report.graph.stats.total_weight, 6);

    // Assert: ranking converged and covers every tag
    assert!(report.converged);
    assert_eq!(report.ranked_tags.len(), 4);

    // Assert: five records in three days cannot populate a history
    assert_eq!(report.diagnostics.mode, TrendMode::Fallback);
    assert!(!report.trends.is_empty());
    let top = &report.trends[0];
    assert_eq!((top.tag_a.as_str(), top.tag_b.as_str()), ("ai", "tools"));
    assert_eq!(top.recent_weight, 2);
}

#[tokio::test]
async fn test_pipeline_multiple_files_merge_in_order() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let first = write_jsonl(&dir, "first.jsonl", SAMPLE_RECORDS_JSONL);
    let second = write_jsonl(&dir, "second.jsonl", SECOND_FILE_JSONL);

    // Act
    let (records, stats) = ingest::load_files(&[first, second]).await.unwrap();

    // Assert: stats merged, order preserved
    assert_eq!(stats.files_read, 2);
    assert_eq!(stats.record_count, 7);
    assert_eq!(records[0].id, "p1");
    assert_eq!(records[5].id, "q1");

    let graph = TagGraph::build(&records).unwrap();
    assert_eq!(graph.node_count(), 5); // infra joins the party
    assert_eq!(graph.occurrence("infra"), Some(2));
}

#[tokio::test]
async fn test_pipeline_detects_rising_pair() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "ramp.jsonl", &rising_ramp_jsonl());

    // Act
    let report = run_pipeline(&[path]).await;

    // Assert
    assert_eq!(report.diagnostics.mode, TrendMode::Rising);
    assert_eq!(report.diagnostics.anchor, Some(ramp_anchor()));
    assert_eq!(report.diagnostics.recent_count, 8);
    assert_eq!(report.diagnostics.historical_count, 10);

    let top = &report.trends[0];
    assert_eq!((top.tag_a.as_str(), top.tag_b.as_str()), ("agents", "rust"));
    assert_eq!(top.recent_weight, 8);
    assert_eq!(top.historical_weight, 2);
    assert!((top.growth_score - 2.0).abs() < f64::EPSILON);
}

// ============================================================================
// Report Serialization Tests
// ============================================================================

#[tokio::test]
async fn test_report_json_has_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "records.jsonl", SAMPLE_RECORDS_JSONL);

    let report = run_pipeline(&[path]).await;
    let json = report.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for key in [
        "run_id",
        "generated_at",
        "ranked_tags",
        "converged",
        "iterations",
        "trends",
        "diagnostics",
        "graph",
        "ingest",
    ] {
        assert!(value.get(key).is_some(), "report must contain {key}");
    }
}

#[tokio::test]
async fn test_report_idempotent_modulo_identity() {
    // Two full runs over the same files must agree on everything except
    // the run id and generation time
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "records.jsonl", SAMPLE_RECORDS_JSONL);
    let paths = vec![path];

    let strip = |report: &Report| -> serde_json::Value {
        let mut value = serde_json::to_value(report).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("run_id");
        obj.remove("generated_at");
        value
    };

    let first = strip(&run_pipeline(&paths).await);
    let second = strip(&run_pipeline(&paths).await);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_detailed_report_mentions_top_entries() {
    let dir = TempDir::new().unwrap();
    let path = write_jsonl(&dir, "ramp.jsonl", &rising_ramp_jsonl());

    let report = run_pipeline(&[path]).await;
    let text = report.detailed_report();

    assert!(text.contains("Tag Analysis Report"));
    assert!(text.contains("agents"));
    assert!(text.contains("rising"));
}
