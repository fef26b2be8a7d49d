use anyhow::{Context, Result};
use std::path::PathBuf;

use tagrise::analytics::GraphExport;
use tagrise::graph::TagGraph;
use tagrise::ingest;

/// Build the co-occurrence graph and print or export it, skipping the
/// ranking and trend stages.
pub async fn graph(inputs: Vec<PathBuf>, output: Option<PathBuf>, top: usize) -> Result<()> {
    let (records, stats) = ingest::load_files(&inputs).await?;
    tracing::info!(
        files = stats.files_read,
        records = stats.record_count,
        "Loaded input records"
    );

    let graph = tokio::task::spawn_blocking(move || TagGraph::build(&records)).await??;
    let graph_stats = graph.stats();

    println!(
        "Graph: {} tags, {} pairs, total weight {} ({} records)",
        graph_stats.node_count, graph_stats.edge_count, graph_stats.total_weight, stats.record_count
    );

    println!("\nTop tags:");
    for (i, (tag, count)) in graph.top_nodes(top).iter().enumerate() {
        println!("  {:>2}. {tag} ({count})", i + 1);
    }

    println!("\nTop pairs:");
    for (i, (a, b, weight)) in graph.top_edges(top).iter().enumerate() {
        println!("  {:>2}. {a} + {b} ({weight})", i + 1);
    }

    if let Some(path) = output {
        let export = GraphExport::from_graph(&graph, None);
        let json = serde_json::to_string_pretty(&export).context("Failed to serialize graph")?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write graph export to {}", path.display()))?;
        println!("\nGraph export written to {}", path.display());
    }

    Ok(())
}
