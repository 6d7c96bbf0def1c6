//! Command handlers.

use crate::cli::Commands;
use cicd_component::{Error, PipelineDefinition, check_files, write_files};
use std::path::Path;

/// Run a parsed command.
pub fn run(command: Commands) -> miette::Result<()> {
    match command {
        Commands::Compile {
            config,
            output,
            dry_run,
        } => compile(&config, &output, dry_run),
        Commands::Check { config, output } => check(&config, &output),
        Commands::Validate { config } => validate(&config),
    }
}

fn compile(config: &Path, output: &Path, dry_run: bool) -> miette::Result<()> {
    let files = PipelineDefinition::load(config)?.synthesize()?;
    let results = write_files(output, &files, dry_run)?;

    for result in &results {
        println!("{}: {}", result.status, result.path.display());
    }
    if results.is_empty() {
        println!("No workflows have jobs, nothing to write");
    }

    tracing::info!(files = results.len(), dry_run, "Compile finished");
    Ok(())
}

fn check(config: &Path, output: &Path) -> miette::Result<()> {
    let files = PipelineDefinition::load(config)?.synthesize()?;
    let stale = check_files(output, &files)?;

    if stale.is_empty() {
        println!("{} generated file(s) up to date", files.len());
        return Ok(());
    }

    for path in &stale {
        println!("Out of date: {}", path.display());
    }
    Err(Error::Stale { paths: stale }.into())
}

fn validate(config: &Path) -> miette::Result<()> {
    let definition = PipelineDefinition::load(config)?;
    let files = definition.synthesize()?;
    println!(
        "{} is valid ({} file(s) would be generated)",
        config.display(),
        files.len()
    );
    Ok(())
}
