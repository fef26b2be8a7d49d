//! Configuration management for tagrise
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analytics::rank::RankParams;
use crate::analytics::trends::TrendParams;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis configuration
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of the recent window in days
    pub recent_span_days: i64,

    /// Length of the historical window in days
    pub historical_span_days: i64,

    /// Number of ranked tags to keep in reports
    pub top_k_ranking: usize,

    /// Number of trend entries to keep in reports
    pub top_k_trend: usize,

    /// PageRank damping factor
    pub damping: f64,

    /// PageRank convergence tolerance (L1 norm)
    pub tolerance: f64,

    /// PageRank iteration cap
    pub max_iterations: usize,

    /// Minimum records required in each window for rising-edge mode
    pub min_window_records: usize,

    /// Minimum recent co-occurrence weight for a rising candidate
    pub min_recent_weight: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let recent_span_days = std::env::var("TAGRISE_RECENT_SPAN_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7);

        let historical_span_days = std::env::var("TAGRISE_HISTORICAL_SPAN_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30);

        let top_k_ranking = std::env::var("TAGRISE_TOP_K_RANKING")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(15);

        let top_k_trend = std::env::var("TAGRISE_TOP_K_TREND")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let damping = std::env::var("TAGRISE_DAMPING")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.85);

        let tolerance = std::env::var("TAGRISE_TOLERANCE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(1e-6);

        let max_iterations = std::env::var("TAGRISE_MAX_ITERATIONS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(100);

        let min_window_records = std::env::var("TAGRISE_MIN_WINDOW_RECORDS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(5);

        let min_recent_weight = std::env::var("TAGRISE_MIN_RECENT_WEIGHT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2);

        let log_level = std::env::var("TAGRISE_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("TAGRISE_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            analysis: AnalysisConfig {
                recent_span_days,
                historical_span_days,
                top_k_ranking,
                top_k_trend,
                damping,
                tolerance,
                max_iterations,
                min_window_records,
                min_recent_weight,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from an optional file path, falling back to the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.recent_span_days <= 0 {
            anyhow::bail!("recent_span_days must be positive");
        }

        if self.analysis.historical_span_days <= 0 {
            anyhow::bail!("historical_span_days must be positive");
        }

        if self.analysis.damping <= 0.0 || self.analysis.damping >= 1.0 {
            anyhow::bail!("damping must be strictly between 0 and 1");
        }

        if self.analysis.tolerance <= 0.0 {
            anyhow::bail!("tolerance must be positive");
        }

        if self.analysis.max_iterations == 0 {
            anyhow::bail!("max_iterations must be greater than 0");
        }

        if self.analysis.top_k_ranking == 0 {
            anyhow::bail!("top_k_ranking must be greater than 0");
        }

        if self.analysis.top_k_trend == 0 {
            anyhow::bail!("top_k_trend must be greater than 0");
        }

        Ok(())
    }

    /// Get PageRank parameters derived from this configuration
    #[must_use]
    pub fn rank_params(&self) -> RankParams {
        RankParams {
            damping: self.analysis.damping,
            tolerance: self.analysis.tolerance,
            max_iterations: self.analysis.max_iterations,
        }
    }

    /// Get trend detection parameters derived from this configuration
    #[must_use]
    pub fn trend_params(&self) -> TrendParams {
        TrendParams {
            recent_days: self.analysis.recent_span_days,
            historical_days: self.analysis.historical_span_days,
            top_k: self.analysis.top_k_trend,
            min_window_records: self.analysis.min_window_records,
            min_recent_weight: self.analysis.min_recent_weight,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recent_span_days: 7,
            historical_span_days: 30,
            top_k_ranking: 15,
            top_k_trend: 10,
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
            min_window_records: 5,
            min_recent_weight: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
