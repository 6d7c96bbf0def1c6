//! GitLab pipeline component.

use crate::error::Result;
use crate::render::render_workflows;
use cicd_gitlab::{GitLabCompiler, GitLabOptions, build_pipeline_file};
use cicd_pipeline::{Job, Provider, RenderedFile, Trigger, Workflow};

/// The merge request and push-to-main workflows of a GitLab project.
///
/// Each non-empty workflow becomes a sub-file under `.gitlab/workflows/`,
/// and `.gitlab-ci.yml` includes it behind the trigger's rules.
#[derive(Debug, Clone)]
pub struct GitLabPipelineComponent {
    options: GitLabOptions,
    compiler: GitLabCompiler,
    code_change_request: Workflow,
    push: Workflow,
}

impl GitLabPipelineComponent {
    /// Create both workflows and register the given jobs.
    pub fn new(
        options: GitLabOptions,
        code_change_request_jobs: impl IntoIterator<Item = Job>,
        push_jobs: impl IntoIterator<Item = Job>,
    ) -> Self {
        let mut code_change_request = Workflow::new(
            &options.code_change_request_workflow_name,
            Trigger::CodeChangeRequest,
            Provider::GitLab,
        );
        code_change_request.add_jobs(code_change_request_jobs);

        let mut push = Workflow::new(&options.push_workflow_name, Trigger::Push, Provider::GitLab);
        push.add_jobs(push_jobs);

        Self {
            compiler: GitLabCompiler::from_options(&options),
            options,
            code_change_request,
            push,
        }
    }

    /// Options the component was built with
    #[must_use]
    pub const fn options(&self) -> &GitLabOptions {
        &self.options
    }

    /// The merge request workflow
    #[must_use]
    pub const fn code_change_request_workflow(&self) -> &Workflow {
        &self.code_change_request
    }

    /// The push-to-main workflow
    #[must_use]
    pub const fn push_workflow(&self) -> &Workflow {
        &self.push
    }

    /// Validate and render the sub-files and the top-level pipeline file.
    ///
    /// The top-level file comes first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Compile`] with the errors of every failing workflow.
    pub fn synthesize(&self) -> Result<Vec<RenderedFile>> {
        let workflows = [&self.code_change_request, &self.push];
        let sub_files = render_workflows(&self.compiler, &workflows)?;

        let mut files = Vec::with_capacity(sub_files.len() + 1);
        if let Some(pipeline) = build_pipeline_file(&self.options, &workflows)? {
            files.push(pipeline);
        }
        files.extend(sub_files);
        Ok(files)
    }
}
