//! Provider-agnostic pipeline vocabulary.
//!
//! A [`Job`] is an ordered list of [`Step`]s. Steps carry the commands to
//! run plus the artifacts they produce and consume; dependencies between jobs
//! are plain name references that the compilers turn into provider-native
//! `needs` declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The event kind that starts a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// A pull request (GitHub) or merge request (GitLab) targeting the main branch
    CodeChangeRequest,
    /// A push to the main branch
    Push,
}

impl Trigger {
    /// Both triggers, in the order workflows are built and included.
    pub const ALL: [Self; 2] = [Self::CodeChangeRequest, Self::Push];

    /// Stable identifier used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CodeChangeRequest => "code_change_request",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The CI system a workflow is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// GitHub Actions
    GitHub,
    /// GitLab CI
    GitLab,
}

impl Provider {
    /// Repository-relative directory holding the provider's configuration.
    #[must_use]
    pub const fn root_dir(self) -> &'static str {
        match self {
            Self::GitHub => ".github",
            Self::GitLab => ".gitlab",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("github"),
            Self::GitLab => f.write_str("gitlab"),
        }
    }
}

/// A reference to the artifact bundle produced by another job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactDependency {
    /// Display name of the producing job
    pub job_name: String,
}

impl ArtifactDependency {
    /// Reference the artifacts of the named job.
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
        }
    }
}

/// One unit of work inside a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Optional label shown by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Shell commands, run in order
    pub commands: Vec<String>,

    /// Extra variables exported for this step
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,

    /// Output paths this step produces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifact_directories: Vec<String>,

    /// Artifact bundles of other jobs this step consumes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifact_dependencies: Vec<ArtifactDependency>,

    /// Jobs that must finish first (ordering only, no artifact transfer)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_dependencies: Vec<String>,
}

impl Step {
    /// Create a step running the given commands.
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the step label
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment_variables.insert(key.into(), value.into());
        self
    }

    /// Declare an output path
    #[must_use]
    pub fn with_artifact_directory(mut self, path: impl Into<String>) -> Self {
        self.artifact_directories.push(path.into());
        self
    }

    /// Consume the artifacts of another job
    #[must_use]
    pub fn with_artifact_dependency(mut self, job_name: impl Into<String>) -> Self {
        self.artifact_dependencies
            .push(ArtifactDependency::new(job_name));
        self
    }

    /// Run after another job
    #[must_use]
    pub fn with_job_dependency(mut self, job_name: impl Into<String>) -> Self {
        self.job_dependencies.push(job_name.into());
        self
    }
}

/// A named unit of pipeline work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Display name, unique within its workflow
    pub name: String,

    /// Steps, executed sequentially
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Deployment environment label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Opaque mutual-exclusion token passed through to the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_group: Option<String>,
}

impl Job {
    /// Create a job from its name and steps.
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
            environment: None,
            concurrency_group: None,
        }
    }

    /// Append a step
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Set the environment label
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the concurrency group
    #[must_use]
    pub fn with_concurrency_group(mut self, group: impl Into<String>) -> Self {
        self.concurrency_group = Some(group.into());
        self
    }

    /// Every command of every step, flattened in order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|step| step.commands.iter().map(String::as_str))
    }

    /// Union of the artifact directories declared by all steps.
    #[must_use]
    pub fn artifact_directories(&self) -> Vec<&str> {
        unique(
            self.steps
                .iter()
                .flat_map(|step| step.artifact_directories.iter().map(String::as_str)),
        )
    }

    /// Names of the jobs whose artifacts this job consumes.
    #[must_use]
    pub fn artifact_dependencies(&self) -> Vec<&str> {
        unique(self.steps.iter().flat_map(|step| {
            step.artifact_dependencies
                .iter()
                .map(|dep| dep.job_name.as_str())
        }))
    }

    /// Names of the jobs this job is ordered after.
    #[must_use]
    pub fn job_dependencies(&self) -> Vec<&str> {
        unique(
            self.steps
                .iter()
                .flat_map(|step| step.job_dependencies.iter().map(String::as_str)),
        )
    }

    /// All referenced job names: plain dependencies first, then artifact ones.
    #[must_use]
    pub fn dependency_names(&self) -> Vec<&str> {
        let plain = self.job_dependencies();
        let artifacts = self.artifact_dependencies();
        unique(plain.into_iter().chain(artifacts))
    }

    /// Environment variables of all steps merged; later steps win on collision.
    #[must_use]
    pub fn merged_environment_variables(&self) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        for step in &self.steps {
            for (key, value) in &step.environment_variables {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Deduplicate while keeping first-appearance order.
fn unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
