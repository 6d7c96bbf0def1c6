//! Workflow base shared by every provider.

use crate::error::{CompileError, Result};
use crate::model::{Job, Provider, Trigger};
use crate::naming::slugify;
use crate::validation::WorkflowValidator;
use std::path::PathBuf;

/// The ordered jobs started by one trigger on one provider.
///
/// Jobs are only ever appended. A workflow without jobs is never
/// materialized as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    name: String,
    trigger: Trigger,
    provider: Provider,
    jobs: Vec<Job>,
}

impl Workflow {
    /// Create an empty workflow.
    pub fn new(name: impl Into<String>, trigger: Trigger, provider: Provider) -> Self {
        Self {
            name: name.into(),
            trigger,
            provider,
            jobs: Vec::new(),
        }
    }

    /// Register a job.
    pub fn add_job(&mut self, job: Job) {
        tracing::debug!(
            workflow = %self.name,
            provider = %self.provider,
            job = %job.name,
            "Registered job"
        );
        self.jobs.push(job);
    }

    /// Register several jobs, keeping their order.
    pub fn add_jobs(&mut self, jobs: impl IntoIterator<Item = Job>) {
        for job in jobs {
            self.add_job(job);
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The trigger this workflow runs on
    #[must_use]
    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// The provider this workflow is compiled for
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Registered jobs in registration order
    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Whether any job has been registered.
    #[must_use]
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// File name stem derived from the display name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Repository-relative output path, e.g. `.github/workflows/pull-request.yml`.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(self.provider.root_dir())
            .join("workflows")
            .join(format!("{}.yml", self.slug()))
    }

    /// Validate the registered jobs.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Validation`] carrying every problem found.
    pub fn validate(&self) -> Result<()> {
        WorkflowValidator::new(&self.name, &self.jobs)
            .validate()
            .map_err(|errors| CompileError::Validation {
                workflow: self.name.clone(),
                errors,
            })
    }
}
