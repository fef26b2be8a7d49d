//! Integration tests module
//!
//! This module provides end-to-end integration tests for the tagrise
//! analytics engine, including:
//! - Complete load -> build -> rank -> detect -> assemble pipeline
//! - Error handling and degradation scenarios

pub mod pipeline_test;
pub mod error_scenarios;
pub mod fixtures;
