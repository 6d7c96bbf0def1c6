//! Workflow compiler trait
//!
//! Each provider implements [`WorkflowCompiler`] for its own document type.
//! The provided [`WorkflowCompiler::render`] is the single finalize step:
//! validate, compile, serialize.

use crate::error::{CompileError, Result};
use crate::model::Provider;
use crate::workflow::Workflow;
use serde::Serialize;
use std::path::PathBuf;

/// Header prepended to every generated document.
pub const GENERATED_HEADER: &str =
    "# Generated by cicd - do not edit manually\n# Regenerate with: cicd compile\n\n";

/// A compiled document ready to be handed to the file writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Repository-relative path
    pub path: PathBuf,
    /// YAML content, header included
    pub content: String,
}

impl RenderedFile {
    /// Pair a path with its content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Translates a [`Workflow`] into a provider document.
///
/// # Example
///
/// ```ignore
/// use cicd_pipeline::{WorkflowCompiler, Workflow};
///
/// let compiler = GitHubCompiler::new(options);
/// if let Some(file) = compiler.render(&workflow)? {
///     std::fs::write(&file.path, &file.content)?;
/// }
/// ```
pub trait WorkflowCompiler {
    /// Serializable provider document
    type Document: Serialize;

    /// Provider this compiler targets
    fn provider(&self) -> Provider;

    /// Translate the workflow's jobs.
    ///
    /// Returns `None` when the workflow has no jobs. Expects a workflow that
    /// already passed [`Workflow::validate`].
    ///
    /// # Errors
    ///
    /// Implementations return [`CompileError`] for models they cannot express.
    fn compile(&self, workflow: &Workflow) -> Result<Option<Self::Document>>;

    /// Validate, compile and serialize a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::ProviderMismatch`] if the workflow belongs to
    /// another provider, [`CompileError::Validation`] for an invalid model and
    /// [`CompileError::Serialization`] if YAML output fails.
    fn render(&self, workflow: &Workflow) -> Result<Option<RenderedFile>> {
        if workflow.provider() != self.provider() {
            return Err(CompileError::ProviderMismatch {
                workflow: workflow.name().to_string(),
                expected: self.provider(),
                found: workflow.provider(),
            });
        }

        workflow.validate()?;

        let Some(document) = self.compile(workflow)? else {
            tracing::info!(
                workflow = %workflow.name(),
                provider = %self.provider(),
                "Workflow has no jobs, skipping"
            );
            return Ok(None);
        };

        let content = serialize_document(&document)?;
        tracing::info!(
            workflow = %workflow.name(),
            path = %workflow.file_path().display(),
            jobs = workflow.jobs().len(),
            "Compiled workflow"
        );

        Ok(Some(RenderedFile::new(workflow.file_path(), content)))
    }
}

/// Serialize a document to YAML with the generation header.
///
/// # Errors
///
/// Returns [`CompileError::Serialization`] if YAML output fails.
pub fn serialize_document<T: Serialize>(document: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(document)?;
    Ok(format!("{GENERATED_HEADER}{yaml}"))
}
