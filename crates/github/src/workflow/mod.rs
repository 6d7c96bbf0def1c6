//! GitHub Actions Workflow Generator
//!
//! Generates static GitHub Actions workflow files. GitHub discovers every
//! file in `.github/workflows/`, so each non-empty workflow is written on its
//! own and nothing aggregates them.
//!
//! # Example
//!
//! ```
//! use cicd_github::workflow::GitHubCompiler;
//! use cicd_pipeline::{Job, Provider, Step, Trigger, Workflow, WorkflowCompiler};
//!
//! let mut workflow = Workflow::new("Push to Main", Trigger::Push, Provider::GitHub);
//! workflow.add_job(Job::new("Build", vec![Step::new(["cargo build"])]));
//!
//! let compiler = GitHubCompiler::new().with_runner("ubuntu-latest");
//! let file = compiler.render(&workflow).unwrap().unwrap();
//! assert!(file.content.contains("runs-on: ubuntu-latest"));
//! ```

pub mod compiler;
pub mod schema;

pub use compiler::GitHubCompiler;
pub use schema::*;
