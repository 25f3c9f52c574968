//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use covenant_domain::{Category, Document, DocumentSource, PolicyRecord};
use covenant_extractor::{PipelineContext, PolicyPipeline};
use std::path::Path;

/// Execute the extract command.
///
/// The record is numbered as if it were the only one in its category.
pub async fn execute_extract(args: ExtractArgs, config: Config, formatter: &Formatter) -> Result<()> {
    let record = extract_record(&args, config).await?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

async fn extract_record(args: &ExtractArgs, config: Config) -> Result<PolicyRecord> {
    let category = resolve_category(&args.file, args.category.as_deref())?;
    let mut pipeline_config = config.pipeline;
    args.pipeline.apply(&mut pipeline_config);

    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", args.file.display())))?;
    let content = tokio::fs::read(&args.file).await?;

    let identifier = format!("{}/{}", category.dir_name, file_name);
    let document = Document::new(DocumentSource::new(&args.file, identifier, category), content);

    let context = PipelineContext::from_config(pipeline_config)?;
    let draft = PolicyPipeline::new(context).process(&document).await?;
    Ok(PolicyRecord::number(draft, 1))
}

/// Category from `--category` (directory name or key), else the parent directory.
pub fn resolve_category(file: &Path, explicit: Option<&str>) -> Result<Category> {
    let name = match explicit {
        Some(name) => name.to_string(),
        None => file
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    Category::from_dir_name(&name)
        .or_else(|| Category::from_key(&name))
        .ok_or_else(|| {
            let known: Vec<String> = Category::all().iter().map(|c| format!("{:?}", c.dir_name)).collect();
            CliError::InvalidInput(format!(
                "Unknown category '{}' (pass --category, one of {})",
                name,
                known.join(", ")
            ))
        })
}
