//! Provider-agnostic pipeline model for cicd.
//!
//! This crate holds everything the provider compilers share:
//! - the [`Job`]/[`Step`] vocabulary and the [`Trigger`] kinds
//! - [`slugify`], which derives job keys and file names from display names
//! - the [`Workflow`] base with its append-only job registry
//! - [`WorkflowValidator`], the finalize-time validation pass
//! - the [`WorkflowCompiler`] trait implemented by `cicd-github` and `cicd-gitlab`
//!
//! # Example
//!
//! ```
//! use cicd_pipeline::{Job, Provider, Step, Trigger, Workflow};
//!
//! let mut workflow = Workflow::new("Pull Request", Trigger::CodeChangeRequest, Provider::GitHub);
//! workflow.add_job(Job::new(
//!     "Build",
//!     vec![Step::new(["npm ci", "npm run build"]).with_artifact_directory("lib/")],
//! ));
//!
//! assert!(workflow.validate().is_ok());
//! assert_eq!(workflow.file_path().to_str(), Some(".github/workflows/pull-request.yml"));
//! ```

#![warn(missing_docs)]

pub mod compiler;
pub mod error;
pub mod model;
pub mod naming;
pub mod validation;
pub mod workflow;

pub use compiler::{GENERATED_HEADER, RenderedFile, WorkflowCompiler, serialize_document};
pub use error::{CompileError, Result, ValidationError};
pub use model::{ArtifactDependency, Job, Provider, Step, Trigger};
pub use naming::slugify;
pub use validation::WorkflowValidator;
pub use workflow::Workflow;
