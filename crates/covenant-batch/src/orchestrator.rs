//! Batch Orchestrator
//!
//! A bounded pool of tokio tasks, one per document. Each task owns its
//! document end to end; the only shared state is the [`ResultArena`].

use crate::arena::{ArenaEntry, DocumentFailure, ResultArena};
use crate::checkpoint::CheckpointWriter;
use crate::config::BatchConfig;
use crate::discovery::discover;
use crate::error::BatchError;
use covenant_domain::{Document, DocumentSource, PolicyDraft};
use covenant_extractor::{PipelineContext, PolicyPipeline};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

/// The documents of one run and how to schedule them
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Documents to process
    pub sources: Vec<DocumentSource>,

    /// Concurrent workers
    pub workers: usize,

    /// Completions between snapshots (0 disables snapshots)
    pub checkpoint_interval: usize,
}

impl BatchJob {
    /// Job over `sources` scheduled per `config`
    pub fn new(sources: Vec<DocumentSource>, config: &BatchConfig) -> Self {
        Self {
            sources,
            workers: config.workers,
            checkpoint_interval: config.checkpoint_interval,
        }
    }
}

/// Result of a batch run
///
/// `drafts` are in completion order, which varies between runs; only their
/// membership is stable.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Validated drafts
    pub drafts: Vec<PolicyDraft>,

    /// Documents that produced no record
    pub failures: Vec<DocumentFailure>,

    /// Documents that produced a record
    pub processed: usize,

    /// Documents that did not
    pub failed: usize,

    /// Documents attempted
    pub total: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Runs the per-document pipeline over a batch
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    context: Arc<PipelineContext>,
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Create an orchestrator
    pub fn new(context: Arc<PipelineContext>, config: BatchConfig) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        Ok(Self { context, config })
    }

    /// Batch configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Discover documents under `root` and process them
    ///
    /// A missing root is the only error; it is reported before any worker
    /// starts.
    pub async fn run_root(&self, root: &Path) -> Result<BatchOutcome, BatchError> {
        let sources = discover(root, &self.config)?;
        Ok(self.run(BatchJob::new(sources, &self.config)).await)
    }

    /// Process every document of `job`
    pub async fn run(&self, job: BatchJob) -> BatchOutcome {
        let started = Instant::now();
        let total = job.sources.len();
        let workers = job.workers.max(1);
        info!(total, workers, checkpoint_interval = job.checkpoint_interval, "Starting batch");

        let arena = Arc::new(ResultArena::new(job.checkpoint_interval));
        let checkpoints = CheckpointWriter::new(self.config.checkpoint_path());
        let semaphore = Arc::new(Semaphore::new(workers));
        let pipeline = PolicyPipeline::new(self.context.clone());
        let mut tasks = JoinSet::new();

        for source in job.sources {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let pipeline = pipeline.clone();
            let arena = arena.clone();
            let checkpoints = checkpoints.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let entry = run_isolated(pipeline, source).await;
                let completion = arena.push(entry);
                if let Some(snapshot) = completion.snapshot {
                    checkpoints.write_logged(completion.index, &snapshot).await;
                }
                if completion.index % 10 == 0 || completion.index == total {
                    info!(completed = completion.index, total, "Batch progress");
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Worker task ended abnormally");
            }
        }

        let mut drafts = Vec::new();
        let mut failures = Vec::new();
        for entry in arena.take() {
            match entry {
                ArenaEntry::Draft(draft) => drafts.push(*draft),
                ArenaEntry::Failure(failure) => failures.push(failure),
            }
        }

        let processed = drafts.len();
        let outcome = BatchOutcome {
            drafts,
            failures,
            processed,
            failed: total - processed,
            total,
            elapsed: started.elapsed(),
        };
        info!(
            processed = outcome.processed,
            failed = outcome.failed,
            total = outcome.total,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Batch complete"
        );
        outcome
    }
}

/// Process one document behind its own task boundary
///
/// Read errors, pipeline errors and panics all become a failure entry.
async fn run_isolated(pipeline: PolicyPipeline, source: DocumentSource) -> ArenaEntry {
    let task_source = source.clone();
    let result = tokio::spawn(async move { process_document(&pipeline, task_source).await }).await;

    let failure = match result {
        Ok(Ok(draft)) => {
            info!(source = %source.identifier, category = source.category.label, "Processed document");
            return ArenaEntry::Draft(Box::new(draft));
        }
        Ok(Err(reason)) => reason,
        Err(join) if join.is_panic() => "worker panicked".to_string(),
        Err(join) => format!("worker cancelled: {}", join),
    };

    error!(source = %source.identifier, category = source.category.label, reason = %failure, "Document failed");
    ArenaEntry::Failure(DocumentFailure::new(&source, failure))
}

async fn process_document(pipeline: &PolicyPipeline, source: DocumentSource) -> Result<PolicyDraft, String> {
    let content = tokio::fs::read(&source.path)
        .await
        .map_err(|e| format!("read failed: {}", e))?;
    let document = Document::new(source, content);
    pipeline.process(&document).await.map_err(|e| e.to_string())
}
