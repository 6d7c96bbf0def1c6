//! Pipeline components for cicd.
//!
//! A component owns the two workflows of one provider (code change request
//! and push to main), renders them in a single finalize pass and hands the
//! resulting files to [`write_files`].
//!
//! # Example
//!
//! ```no_run
//! use cicd_component::{PipelineDefinition, write_files};
//! use std::path::Path;
//!
//! let definition = PipelineDefinition::load(Path::new("cicd.yaml"))?;
//! let files = definition.synthesize()?;
//! for result in write_files(Path::new("."), &files, false)? {
//!     tracing::info!(path = %result.path.display(), status = %result.status, "written");
//! }
//! # Ok::<(), cicd_component::Error>(())
//! ```

#![warn(missing_docs)]

pub mod definition;
pub mod error;
pub mod github;
pub mod gitlab;
mod render;
pub mod writer;

pub use definition::{DEFAULT_DEFINITION_FILE, GitHubPipeline, GitLabPipeline, PipelineDefinition};
pub use error::{Error, Result};
pub use github::GitHubPipelineComponent;
pub use gitlab::GitLabPipelineComponent;
pub use writer::{FileResult, FileStatus, check_files, write_files};
