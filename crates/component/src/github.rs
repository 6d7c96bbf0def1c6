//! GitHub pipeline component.

use crate::error::Result;
use crate::render::render_workflows;
use cicd_github::{GitHubCompiler, GitHubOptions};
use cicd_pipeline::{Job, Provider, RenderedFile, Trigger, Workflow};

/// The pull request and push-to-main workflows of a GitHub repository.
///
/// GitHub discovers every file under `.github/workflows/`, so each
/// non-empty workflow becomes its own file and nothing is aggregated.
#[derive(Debug, Clone)]
pub struct GitHubPipelineComponent {
    options: GitHubOptions,
    compiler: GitHubCompiler,
    code_change_request: Workflow,
    push: Workflow,
}

impl GitHubPipelineComponent {
    /// Create both workflows and register the given jobs.
    pub fn new(
        options: GitHubOptions,
        code_change_request_jobs: impl IntoIterator<Item = Job>,
        push_jobs: impl IntoIterator<Item = Job>,
    ) -> Self {
        let mut code_change_request = Workflow::new(
            &options.code_change_request_workflow_name,
            Trigger::CodeChangeRequest,
            Provider::GitHub,
        );
        code_change_request.add_jobs(code_change_request_jobs);

        let mut push = Workflow::new(&options.push_workflow_name, Trigger::Push, Provider::GitHub);
        push.add_jobs(push_jobs);

        Self {
            compiler: GitHubCompiler::from_options(&options),
            options,
            code_change_request,
            push,
        }
    }

    /// Options the component was built with
    #[must_use]
    pub const fn options(&self) -> &GitHubOptions {
        &self.options
    }

    /// The pull request workflow
    #[must_use]
    pub const fn code_change_request_workflow(&self) -> &Workflow {
        &self.code_change_request
    }

    /// The push-to-main workflow
    #[must_use]
    pub const fn push_workflow(&self) -> &Workflow {
        &self.push
    }

    /// Validate and render both workflows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Compile`] with the errors of every failing workflow.
    pub fn synthesize(&self) -> Result<Vec<RenderedFile>> {
        render_workflows(&self.compiler, &[&self.code_change_request, &self.push])
    }
}
