//! tagrise - Tag Co-occurrence Analytics
//!
//! An analytics engine that turns collections of tagged, timestamped posts
//! into a weighted co-occurrence graph, an importance ranking and a set of
//! rising tag pairs.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`ingest`] - JSONL record loading with line-level tolerance
//! - [`graph`] - Weighted undirected co-occurrence graph
//! - [`analytics`] - PageRank importance, trend detection and reports
//! - [`error`] - Unified error type and categories
//!
//! # Example
//!
//! ```no_run
//! use tagrise::analytics::{compute_pagerank, detect, RankParams, Report, TrendParams};
//! use tagrise::graph::TagGraph;
//! use tagrise::models::{IngestStats, PostRecord};
//!
//! fn main() -> anyhow::Result<()> {
//!     let records = vec![PostRecord::new(
//!         "post_1",
//!         None,
//!         vec!["ai".to_string(), "tools".to_string()],
//!     )];
//!
//!     let graph = TagGraph::build(&records)?;
//!     let ranking = compute_pagerank(&graph, &RankParams::default());
//!     let trends = detect(&records, &TrendParams::default())?;
//!     let report = Report::assemble(&graph, &ranking, trends, IngestStats::default(), 15);
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        compute_pagerank, detect, RankParams, RankedTag, Ranking, Report, TrendAnalysis,
        TrendEntry, TrendMode, TrendParams,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::graph::{GraphStats, TagGraph};
    pub use crate::models::{IngestStats, PostRecord, RawRecord};
}

// Direct re-exports for convenience
pub use analytics::Report;
pub use graph::TagGraph;
pub use models::PostRecord;
