//! Covenant Batch
//!
//! Turns a directory tree of policy documents into category manifests.
//!
//! # Overview
//!
//! The batch layer is responsible for:
//! - **Discovery**: Walking the category directories under the input root
//! - **Scheduling**: Running the per-document pipeline on a bounded worker pool
//! - **Isolation**: Recording a failed document without touching the others
//! - **Checkpoints**: Periodic, non-transactional snapshots of finished drafts
//! - **Catalog**: Numbering records and writing the manifests
//!
//! # Architecture
//!
//! ```text
//! root → discover → BatchOrchestrator → ResultArena → Catalog → *.json
//!                       │ (N workers)
//!                       └─ PolicyPipeline per document
//! ```
//!
//! Nothing is retried. A document fails at most once and is counted once.
//!
//! # Usage
//!
//! ```no_run
//! use covenant_batch::{BatchConfig, BatchOrchestrator, Catalog, RunMetrics};
//! use covenant_extractor::{PipelineConfig, PipelineContext};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = PipelineContext::from_config(PipelineConfig::default())?;
//!     let config = BatchConfig::default();
//!     let orchestrator = BatchOrchestrator::new(context, config.clone())?;
//!
//!     let outcome = orchestrator.run_root(Path::new("policies")).await?;
//!     let catalog = Catalog::assemble(outcome.drafts.clone());
//!     catalog.write(&config)?;
//!
//!     println!("{}", RunMetrics::collect(&outcome, &catalog).summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod error;
pub mod arena;
pub mod catalog;
pub mod checkpoint;
pub mod config;
pub mod discovery;
pub mod metrics;
pub mod orchestrator;


pub use arena::{ArenaEntry, DocumentFailure, ResultArena};
pub use catalog::{Catalog, CategoryManifest, CategoryStats, WrittenFiles};
pub use checkpoint::CheckpointWriter;
pub use config::BatchConfig;
pub use discovery::discover;
pub use error::BatchError;
pub use metrics::RunMetrics;
pub use orchestrator::{BatchJob, BatchOrchestrator, BatchOutcome};
