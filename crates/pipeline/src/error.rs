//! Error types for pipeline validation and compilation.

use crate::model::Provider;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for compilation operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// A single structural problem found while validating a workflow.
///
/// Validation collects every violation of a workflow before reporting, so
/// these are usually seen grouped inside [`CompileError::Validation`].
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Two jobs in the same workflow share a name.
    #[error("DuplicateJobError: job \"{job}\" is registered more than once in workflow \"{workflow}\"")]
    #[diagnostic(
        code(cicd::pipeline::duplicate_job),
        help("Job names are used as provider job keys and must be unique within a workflow")
    )]
    DuplicateJob {
        /// Workflow display name
        workflow: String,
        /// The duplicated job name
        job: String,
    },

    /// A workflow name would place its file outside the provider's
    /// workflow directory.
    #[error("workflow name \"{workflow}\" contains a path separator")]
    #[diagnostic(
        code(cicd::pipeline::invalid_workflow_name),
        help("Workflow files must sit directly in the workflows directory; drop '/' and '\\' from the name")
    )]
    InvalidWorkflowName {
        /// Workflow display name
        workflow: String,
    },

    /// A step declares no commands.
    #[error("EmptyStepError: step {step} of job \"{job}\" has no commands")]
    #[diagnostic(
        code(cicd::pipeline::empty_step),
        help("Every step needs at least one shell command")
    )]
    EmptyStep {
        /// Owning job name
        job: String,
        /// Step label, or `#<index>` for unnamed steps
        step: String,
    },

    /// A job declares no steps.
    #[error("job \"{job}\" has no steps")]
    #[diagnostic(code(cicd::pipeline::job_without_steps))]
    JobWithoutSteps {
        /// The empty job
        job: String,
    },

    /// A dependency names a job that is not part of the workflow.
    #[error("DependencyError: job \"{dependency}\" referenced by \"{job}\" does not exist")]
    #[diagnostic(
        code(cicd::pipeline::missing_dependency),
        help("Dependencies are resolved by job name within the same workflow")
    )]
    MissingDependency {
        /// The job declaring the dependency
        job: String,
        /// The name that could not be resolved
        dependency: String,
    },

    /// The dependency graph of a workflow contains a cycle.
    #[error("dependency cycle in workflow \"{workflow}\" between jobs: {}", .jobs.join(", "))]
    #[diagnostic(
        code(cicd::pipeline::cyclic_dependency),
        help("Remove one of the job or artifact dependencies so the jobs can be ordered")
    )]
    CyclicDependency {
        /// Workflow display name
        workflow: String,
        /// Jobs taking part in the cycle, in registration order
        jobs: Vec<String>,
    },
}

/// Errors raised at finalize time, before any document is produced.
#[derive(Error, Debug, Diagnostic)]
pub enum CompileError {
    /// The workflow model is structurally invalid.
    #[error("workflow \"{workflow}\" is invalid ({} problem(s) found)", .errors.len())]
    #[diagnostic(code(cicd::pipeline::invalid_workflow))]
    Validation {
        /// Workflow display name
        workflow: String,
        /// Every violation found in the workflow
        #[related]
        errors: Vec<ValidationError>,
    },

    /// The workflow was handed to the compiler of another provider.
    #[error("workflow \"{workflow}\" targets {found} but was given to the {expected} compiler")]
    #[diagnostic(code(cicd::pipeline::provider_mismatch))]
    ProviderMismatch {
        /// Workflow display name
        workflow: String,
        /// Provider of the compiler
        expected: Provider,
        /// Provider of the workflow
        found: Provider,
    },

    /// YAML serialization of a compiled document failed.
    #[error("Serialization failed: {0}")]
    #[diagnostic(code(cicd::pipeline::serialization))]
    Serialization(String),
}

impl CompileError {
    /// Validation problems carried by this error, empty for other variants.
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation { errors, .. } => errors,
            Self::ProviderMismatch { .. } | Self::Serialization(_) => &[],
        }
    }
}

impl From<serde_yaml::Error> for CompileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
