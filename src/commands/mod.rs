pub mod analyze;
pub mod graph;

// Re-export command functions for convenience
pub use analyze::analyze;
pub use graph::graph;
