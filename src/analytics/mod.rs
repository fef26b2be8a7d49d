//! Analytics module for tag importance ranking and trend detection

pub mod rank;
pub mod report;
pub mod trends;

pub use rank::{compute_pagerank, ranked_tags, RankParams, RankedTag, Ranking};
pub use report::{GraphEdge, GraphExport, GraphNode, Report};
pub use trends::{
    detect, TrendAnalysis, TrendEntry, TrendError, TrendMode, TrendParams, WindowDiagnostics,
};
