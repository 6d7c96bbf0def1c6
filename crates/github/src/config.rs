//! GitHub compiler configuration.

use serde::{Deserialize, Serialize};

/// Options shared by both GitHub workflows of a pipeline component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubOptions {
    /// Display name of the pull request workflow
    pub code_change_request_workflow_name: String,
    /// Display name of the push-to-main workflow
    pub push_workflow_name: String,
    /// Runner label used by every job
    pub default_runner: String,
    /// Branches the triggers are filtered on
    pub branches: Vec<String>,
}

impl Default for GitHubOptions {
    fn default() -> Self {
        Self {
            code_change_request_workflow_name: "Pull Request".to_string(),
            push_workflow_name: "Push to Main".to_string(),
            default_runner: "ubuntu-latest".to_string(),
            branches: vec!["main".to_string()],
        }
    }
}
