//! GitLab compiler configuration.

use crate::rules::TriggerRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Options shared by both GitLab workflows of a pipeline component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitLabOptions {
    /// Display name of the merge request workflow
    pub code_change_request_workflow_name: String,
    /// Display name of the push-to-main workflow
    pub push_workflow_name: String,
    /// Top-level `services:` images
    pub services: Vec<String>,
    /// Top-level `before_script:` commands
    pub before_script: Vec<String>,
    /// Runner tags added to every job
    pub default_tags: Vec<String>,
    /// Retention of uploaded artifacts (GitLab `expire_in` syntax)
    pub artifact_expiry: String,
    /// Job names that only run when started by hand
    pub manual_jobs: BTreeSet<String>,
    /// Include rules per trigger
    pub rules: TriggerRules,
    /// Add a never-scheduled job to the top-level pipeline file
    pub placeholder_job: bool,
}

impl Default for GitLabOptions {
    fn default() -> Self {
        Self {
            code_change_request_workflow_name: "Merge Request".to_string(),
            push_workflow_name: "Push to Main".to_string(),
            services: Vec::new(),
            before_script: Vec::new(),
            default_tags: Vec::new(),
            artifact_expiry: "30 days".to_string(),
            manual_jobs: BTreeSet::new(),
            rules: TriggerRules::default(),
            placeholder_job: false,
        }
    }
}
