//! Declarative pipeline definition.
//!
//! A definition file describes the jobs of each provider's two workflows
//! together with that provider's options:
//!
//! ```yaml
//! github:
//!   default_runner: ubuntu-latest
//!   code_change_request_jobs:
//!     - name: Build
//!       steps:
//!         - commands: [npm ci, npm run build]
//!           artifact_directories: [lib/]
//! gitlab:
//!   default_tags: [docker]
//!   push_jobs:
//!     - name: Release
//!       steps:
//!         - commands: [npm publish]
//! ```

use crate::error::{Error, Result};
use crate::github::GitHubPipelineComponent;
use crate::gitlab::GitLabPipelineComponent;
use cicd_github::GitHubOptions;
use cicd_gitlab::GitLabOptions;
use cicd_pipeline::{CompileError, Job, RenderedFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default definition file name.
pub const DEFAULT_DEFINITION_FILE: &str = "cicd.yaml";

/// The pipelines of one repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// GitHub Actions pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubPipeline>,

    /// GitLab CI pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<GitLabPipeline>,
}

/// GitHub options plus the jobs of both workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubPipeline {
    /// Provider options
    #[serde(flatten)]
    pub options: GitHubOptions,
    /// Jobs of the pull request workflow
    #[serde(default)]
    pub code_change_request_jobs: Vec<Job>,
    /// Jobs of the push-to-main workflow
    #[serde(default)]
    pub push_jobs: Vec<Job>,
}

/// GitLab options plus the jobs of both workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitLabPipeline {
    /// Provider options
    #[serde(flatten)]
    pub options: GitLabOptions,
    /// Jobs of the merge request workflow
    #[serde(default)]
    pub code_change_request_jobs: Vec<Job>,
    /// Jobs of the push-to-main workflow
    #[serde(default)]
    pub push_jobs: Vec<Job>,
}

impl GitHubPipeline {
    /// Build the component for this pipeline.
    #[must_use]
    pub fn component(&self) -> GitHubPipelineComponent {
        GitHubPipelineComponent::new(
            self.options.clone(),
            self.code_change_request_jobs.iter().cloned(),
            self.push_jobs.iter().cloned(),
        )
    }
}

impl GitLabPipeline {
    /// Build the component for this pipeline.
    #[must_use]
    pub fn component(&self) -> GitLabPipelineComponent {
        GitLabPipelineComponent::new(
            self.options.clone(),
            self.code_change_request_jobs.iter().cloned(),
            self.push_jobs.iter().cloned(),
        )
    }
}

impl PipelineDefinition {
    /// Load a definition, choosing the format by file extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::UnsupportedFormat`] for an unknown extension and
    /// [`Error::Definition`] if parsing fails.
    pub fn load(path: &Path) -> Result<Self> {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Format::Yaml,
            Some("toml") => Format::Toml,
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let parsed = match format {
            Format::Yaml => serde_yaml::from_str(&source).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(&source).map_err(|e| e.to_string()),
        };

        let definition: Self = parsed.map_err(|message| Error::Definition {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            path = %path.display(),
            github = definition.github.is_some(),
            gitlab = definition.gitlab.is_some(),
            "Loaded pipeline definition"
        );
        Ok(definition)
    }

    /// Parse a YAML definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Definition`] if parsing fails.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::Definition {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Validate and render every configured provider.
    ///
    /// Errors of all providers are collected; nothing is returned unless
    /// every document rendered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compile`] with every failing workflow.
    pub fn synthesize(&self) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::new();
        let mut errors: Vec<CompileError> = Vec::new();

        let results = [
            self.github.as_ref().map(|github| github.component().synthesize()),
            self.gitlab.as_ref().map(|gitlab| gitlab.component().synthesize()),
        ];

        for result in results.into_iter().flatten() {
            match result {
                Ok(rendered) => files.extend(rendered),
                Err(Error::Compile { errors: failed }) => errors.extend(failed),
                Err(other) => return Err(other),
            }
        }

        if errors.is_empty() {
            if files.is_empty() {
                tracing::warn!("Pipeline definition produced no files");
            }
            Ok(files)
        } else {
            Err(Error::Compile { errors })
        }
    }
}

enum Format {
    Yaml,
    Toml,
}
