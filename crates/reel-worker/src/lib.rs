//! Narrated vertical-short rendering pipeline.
//!
//! This crate provides:
//! - The strictly linear pipeline orchestrator
//!   (synthesize, acquire, caption, render, publish)
//! - Worker configuration from the environment
//! - The pipeline error taxonomy with stage attribution
//! - Structured job logging

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::WorkerConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::JobLogger;
pub use pipeline::{Pipeline, Stage};
