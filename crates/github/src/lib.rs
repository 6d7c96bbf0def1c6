//! GitHub provider implementation for cicd.
//!
//! This crate provides:
//! - [`GitHubCompiler`] translating a pipeline workflow into a GitHub Actions
//!   workflow document
//! - [`GitHubOptions`], the pipeline-wide settings (runner, branch filter,
//!   workflow names)

#![warn(missing_docs)]

pub mod config;
pub mod workflow;

// Re-exports for convenience
pub use config::GitHubOptions;
pub use workflow::GitHubCompiler;
