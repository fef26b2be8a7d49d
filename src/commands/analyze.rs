use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use tagrise::analytics::{compute_pagerank, detect, Report};
use tagrise::config::Config;
use tagrise::graph::TagGraph;
use tagrise::ingest;

/// Run the full analysis pipeline: load, build, rank, detect, assemble.
pub async fn analyze(inputs: Vec<PathBuf>, output: Option<PathBuf>, config: Config) -> Result<()> {
    let (records, stats) = ingest::load_files(&inputs).await?;
    tracing::info!(
        files = stats.files_read,
        records = stats.record_count,
        skipped = stats.skipped_lines,
        "Loaded input records"
    );

    let rank_params = config.rank_params();
    let trend_params = config.trend_params();
    let top_k_ranking = config.analysis.top_k_ranking;

    // Ranking and trend detection only share the immutable records, so the
    // two CPU-bound stages run on separate blocking threads.
    let records = Arc::new(records);

    let rank_task = {
        let records = Arc::clone(&records);
        tokio::task::spawn_blocking(move || -> Result<_> {
            let graph = TagGraph::build(&records)?;
            let ranking = compute_pagerank(&graph, &rank_params);
            Ok((graph, ranking))
        })
    };

    let trend_task = {
        let records = Arc::clone(&records);
        tokio::task::spawn_blocking(move || -> Result<_> {
            Ok(detect(&records, &trend_params)?)
        })
    };

    let (rank_result, trend_result) = tokio::try_join!(rank_task, trend_task)?;
    let (graph, ranking) = rank_result?;
    let trends = trend_result?;

    if !ranking.converged {
        tracing::warn!(
            iterations = ranking.iterations,
            "Ranking hit its iteration cap before converging"
        );
    }

    let report = Report::assemble(&graph, &ranking, trends, stats, top_k_ranking);
    tracing::info!(run_id = %report.run_id, "Assembled analysis report");

    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &json)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("{}", report.detailed_report());
            println!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
