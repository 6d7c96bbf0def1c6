//! Trigger rule sets for GitLab includes.
//!
//! GitLab evaluates a `rules:` list top to bottom and applies the first entry
//! that matches. Each default rule set is a list of conditions that must all
//! hold, so it is rendered as a single `&&`-joined expression.

use cicd_pipeline::Trigger;
use serde::{Deserialize, Serialize};

/// Conditions selecting the merge request workflow.
pub const MERGE_REQUEST_CONDITIONS: [&str; 2] = [
    "$CI_PIPELINE_SOURCE == \"merge_request_event\"",
    "$CI_MERGE_REQUEST_TARGET_BRANCH_NAME == $CI_DEFAULT_BRANCH",
];

/// Conditions selecting the push-to-default-branch workflow.
pub const PUSH_CONDITIONS: [&str; 2] = [
    "$CI_PIPELINE_SOURCE == \"push\"",
    "$CI_COMMIT_BRANCH == $CI_DEFAULT_BRANCH",
];

/// Rule expressions per trigger.
///
/// Every entry becomes its own `{if: ...}` rule; a configured list replaces
/// the default verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerRules {
    /// Rules guarding the code-change-request include
    pub code_change_request: Vec<String>,
    /// Rules guarding the push include
    pub push: Vec<String>,
}

impl Default for TriggerRules {
    fn default() -> Self {
        Self {
            code_change_request: vec![MERGE_REQUEST_CONDITIONS.join(" && ")],
            push: vec![PUSH_CONDITIONS.join(" && ")],
        }
    }
}

impl TriggerRules {
    /// Rule expressions for a trigger.
    #[must_use]
    pub fn for_trigger(&self, trigger: Trigger) -> &[String] {
        match trigger {
            Trigger::CodeChangeRequest => &self.code_change_request,
            Trigger::Push => &self.push,
        }
    }

    /// Rendered `rules:` entries for a trigger.
    #[must_use]
    pub fn rules(&self, trigger: Trigger) -> Vec<Rule> {
        self.for_trigger(trigger)
            .iter()
            .map(|expression| Rule::when_if(expression.clone()))
            .collect()
    }
}

/// A single entry of a GitLab `rules:` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Condition expression
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Job scheduling keyword (`never`, `manual`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

impl Rule {
    /// Rule that matches when `expression` holds.
    pub fn when_if(expression: impl Into<String>) -> Self {
        Self {
            condition: Some(expression.into()),
            when: None,
        }
    }

    /// Rule that never schedules the job.
    #[must_use]
    pub fn never() -> Self {
        Self {
            condition: None,
            when: Some("never".to_string()),
        }
    }
}
