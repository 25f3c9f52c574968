//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use covenant_batch::{BatchOrchestrator, Catalog, RunMetrics};
use covenant_extractor::PipelineContext;

/// Execute the run command.
///
/// Per-document failures are reported, not returned; only a batch-level
/// failure (bad configuration, missing root, unwritable output) is an error.
pub async fn execute_run(args: RunArgs, mut config: Config, formatter: &Formatter) -> Result<()> {
    apply_overrides(&args, &mut config);
    config.validate()?;

    let root = config.settings.input_root.clone();
    let context = PipelineContext::from_config(config.pipeline.clone())?;
    let orchestrator = BatchOrchestrator::new(context, config.batch.clone())?;

    eprintln!("{}", formatter.info(&format!("Processing documents under {}", root.display())));
    let mut outcome = orchestrator.run_root(&root).await?;

    let catalog = Catalog::assemble(std::mem::take(&mut outcome.drafts));
    let written = catalog.write(orchestrator.config())?;
    let metrics = RunMetrics::collect(&outcome, &catalog);

    println!("{}", formatter.format_run(&metrics, &outcome.failures)?);
    eprintln!(
        "{}",
        formatter.success(&format!(
            "Wrote {} record(s) to {} and {}",
            catalog.total(),
            written.master.display(),
            written.catalog.display()
        ))
    );
    Ok(())
}

/// Apply command-line flags on top of the loaded configuration.
pub fn apply_overrides(args: &RunArgs, config: &mut Config) {
    if let Some(root) = &args.root {
        config.settings.input_root = root.clone();
    }
    if let Some(output) = &args.output {
        config.batch.output_dir = output.clone();
    }
    if let Some(workers) = args.workers {
        config.batch.workers = workers;
    }
    if let Some(interval) = args.checkpoint_interval {
        config.batch.checkpoint_interval = interval;
    }
    args.pipeline.apply(&mut config.pipeline);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PipelineArgs;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use covenant_batch::BatchError;
    use covenant_extractor::ExtractorSetKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(root: PathBuf, output: PathBuf) -> RunArgs {
        RunArgs {
            root: Some(root),
            output: Some(output),
            workers: Some(2),
            checkpoint_interval: Some(0),
            pipeline: PipelineArgs::default(),
        }
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = Config::default();
        config.batch.workers = 16;
        let run = RunArgs {
            workers: Some(3),
            pipeline: PipelineArgs {
                extended: true,
                ..Default::default()
            },
            ..args(PathBuf::from("in"), PathBuf::from("out"))
        };

        apply_overrides(&run, &mut config);
        assert_eq!(config.batch.workers, 3);
        assert_eq!(config.batch.checkpoint_interval, 0);
        assert_eq!(config.batch.output_dir, PathBuf::from("out"));
        assert_eq!(config.settings.input_root, PathBuf::from("in"));
        assert_eq!(config.pipeline.extractor_set, ExtractorSetKind::Extended);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let mut config = Config::default();
        config.batch.checkpoint_interval = 7;
        let run = RunArgs {
            root: None,
            output: None,
            workers: None,
            checkpoint_interval: None,
            pipeline: PipelineArgs::default(),
        };
        apply_overrides(&run, &mut config);
        assert_eq!(config.batch.checkpoint_interval, 7);
        assert_eq!(config.settings.input_root, PathBuf::from("policies"));
    }

    #[tokio::test]
    async fn test_run_writes_manifests() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let dir = input.path().join("Savings_Plans");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("plan.pdf"), b"Entry age 18 to 60 years").unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        execute_run(
            args(input.path().to_path_buf(), output.path().to_path_buf()),
            Config::default(),
            &formatter,
        )
        .await
        .unwrap();

        assert!(output.path().join("Savings_Plans.json").is_file());
        assert!(output.path().join("policies_complete.json").is_file());
        assert!(output.path().join("catalog.json").is_file());
    }

    #[tokio::test]
    async fn test_missing_root_fails_the_run() {
        let output = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_run(
            args(output.path().join("absent"), output.path().to_path_buf()),
            Config::default(),
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Batch(BatchError::InputRootMissing(_)))));
    }

    #[tokio::test]
    async fn test_zero_workers_rejected_before_work() {
        let output = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let run = RunArgs {
            workers: Some(0),
            ..args(output.path().to_path_buf(), output.path().to_path_buf())
        };
        let result = execute_run(run, Config::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
