//! GitLab CI pipeline compiler for cicd.
//!
//! This crate provides:
//! - [`GitLabCompiler`], which renders one sub-file per workflow under
//!   `.gitlab/workflows/`
//! - [`build_pipeline_file`], which assembles the top-level `.gitlab-ci.yml`
//!   that includes each non-empty sub-file behind its trigger rules
//! - [`TriggerRules`], the default and overridable rule expressions
//!
//! # Example
//!
//! ```
//! use cicd_gitlab::GitLabCompiler;
//! use cicd_pipeline::{Job, Provider, Step, Trigger, Workflow, WorkflowCompiler};
//!
//! let mut workflow = Workflow::new("Merge Request", Trigger::CodeChangeRequest, Provider::GitLab);
//! workflow.add_job(Job::new(
//!     "Build",
//!     vec![Step::new(["npm ci", "npm run build"]).with_artifact_directory("lib/")],
//! ));
//!
//! let file = GitLabCompiler::new().render(&workflow).unwrap().unwrap();
//! assert!(file.content.contains("Build:\n  script:\n  - npm ci\n  - npm run build\n"));
//! ```

#![warn(missing_docs)]

pub mod compiler;
pub mod config;
pub mod pipeline;
pub mod rules;
pub mod schema;

pub use compiler::GitLabCompiler;
pub use config::GitLabOptions;
pub use pipeline::{PIPELINE_FILE, PLACEHOLDER_JOB, build_pipeline, build_pipeline_file};
pub use rules::TriggerRules;
