//! GitLab CI Schema Types
//!
//! Defines the data structures for `.gitlab-ci.yml` and the included
//! workflow files.
//! See: <https://docs.gitlab.com/ee/ci/yaml/>

use crate::rules::Rule;
use indexmap::IndexMap;
use serde::Serialize;

/// Jobs of one workflow sub-file, keyed by job name.
pub type JobMap = IndexMap<String, Job>;

/// The top-level `.gitlab-ci.yml` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pipeline {
    /// Service images started for every job
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    /// Commands run before every job's script
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub before_script: Vec<String>,

    /// Rule-guarded workflow sub-files
    pub include: Vec<Include>,

    /// Jobs defined directly in the top-level file
    #[serde(flatten)]
    pub jobs: JobMap,
}

/// An `include:` entry pointing at a file in the same repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    /// Repository-relative path of the included file
    pub local: String,

    /// Conditions under which the file is included
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// A GitLab CI job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Job {
    /// Commands, one per entry
    pub script: Vec<String>,

    /// Job variables
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, String>,

    /// Runner tags (always emitted)
    pub tags: Vec<String>,

    /// Files kept after the job finishes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Artifacts>,

    /// Jobs that must finish first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<Need>,

    /// Scheduling keyword (`manual` for hand-started jobs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,

    /// Mutual-exclusion token passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    /// Job-level rules
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// Job artifacts configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    /// Paths to upload
    pub paths: Vec<String>,
    /// Upload condition
    pub when: String,
    /// Retention period
    pub expire_in: String,
}

/// A `needs:` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Need {
    /// Upstream job name
    pub job: String,

    /// Whether the upstream job's artifacts are downloaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<bool>,
}

impl Need {
    /// Ordering-only dependency.
    pub fn job(name: impl Into<String>) -> Self {
        Self {
            job: name.into(),
            artifacts: None,
        }
    }

    /// Dependency that also fetches the upstream artifacts.
    pub fn with_artifacts(name: impl Into<String>) -> Self {
        Self {
            job: name.into(),
            artifacts: Some(true),
        }
    }
}
