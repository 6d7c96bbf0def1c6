//! GitHub Actions Workflow Compiler
//!
//! Transforms a cicd [`Workflow`](PipelineWorkflow) into a GitHub Actions
//! workflow document.

use crate::config::GitHubOptions;
use crate::workflow::schema::{BranchFilter, Concurrency, Job, Step, Workflow, WorkflowTriggers};
use cicd_pipeline::{
    Job as PipelineJob, Provider, Result, Step as PipelineStep, Trigger, Workflow as PipelineWorkflow,
    WorkflowCompiler, slugify,
};
use indexmap::IndexMap;

/// Action used to check out the repository in every job.
pub const CHECKOUT_ACTION: &str = "actions/checkout@v4";
/// Action used to publish a job's artifact directories.
pub const UPLOAD_ARTIFACT_ACTION: &str = "actions/upload-artifact@v4";
/// Action used to fetch artifacts of upstream jobs.
pub const DOWNLOAD_ARTIFACT_ACTION: &str = "actions/download-artifact@v4";

/// GitHub Actions workflow compiler
///
/// # Model to GitHub Actions Mapping
///
/// | Model | GitHub Actions |
/// |-------|----------------|
/// | workflow name | Workflow `name:` |
/// | workflow trigger | `on.pull_request.branches` / `on.push.branches` |
/// | `job.name` (slugified) | Job key |
/// | `job.environment` | Job `env.ENVIRONMENT` |
/// | `job.concurrency_group` | Job-level `concurrency.group` |
/// | `step.commands` | Step `run:` (newline-joined) |
/// | `step.environment_variables` | Step `env:` |
/// | `step.artifact_directories` | one `actions/upload-artifact` step |
/// | `step.artifact_dependencies` | `needs:` + one `actions/download-artifact` step |
/// | `step.job_dependencies` | `needs:` |
#[derive(Debug, Clone)]
pub struct GitHubCompiler {
    /// Runner used by every job
    pub runner: String,
    /// Branches the trigger is filtered on
    pub branches: Vec<String>,
}

impl Default for GitHubCompiler {
    fn default() -> Self {
        Self::from_options(&GitHubOptions::default())
    }
}

impl GitHubCompiler {
    /// Create a compiler with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler from pipeline-wide options.
    #[must_use]
    pub fn from_options(options: &GitHubOptions) -> Self {
        Self {
            runner: options.default_runner.clone(),
            branches: options.branches.clone(),
        }
    }

    /// Set the runner for jobs
    #[must_use]
    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = runner.into();
        self
    }

    /// Set the trigger branch filter
    #[must_use]
    pub fn with_branches(mut self, branches: Vec<String>) -> Self {
        self.branches = branches;
        self
    }

    /// Map the abstract trigger onto the GitHub event.
    #[must_use]
    pub fn build_triggers(&self, trigger: Trigger) -> WorkflowTriggers {
        let filter = BranchFilter {
            branches: self.branches.clone(),
        };

        match trigger {
            Trigger::CodeChangeRequest => WorkflowTriggers {
                pull_request: Some(filter),
                ..Default::default()
            },
            Trigger::Push => WorkflowTriggers {
                push: Some(filter),
                ..Default::default()
            },
        }
    }

    /// Build jobs keyed by slug, in registration order.
    ///
    /// Two names collapsing to the same slug keep the later job.
    #[must_use]
    pub fn build_jobs(&self, jobs: &[PipelineJob]) -> IndexMap<String, Job> {
        let mut built = IndexMap::new();

        for job in jobs {
            let key = slugify(&job.name);
            if built.contains_key(&key) {
                tracing::warn!(
                    job = %job.name,
                    key = %key,
                    "Job slug collides with an earlier job, the later job wins"
                );
            }
            built.insert(key, self.build_job(job));
        }

        built
    }

    /// Build a single job.
    ///
    /// Steps are, in order: checkout, one step per model step, then an
    /// upload step if any artifact directories were declared and a download
    /// step if any artifact dependencies were declared.
    #[must_use]
    pub fn build_job(&self, job: &PipelineJob) -> Job {
        let mut steps = vec![checkout_step()];
        steps.extend(job.steps.iter().map(build_step));

        let directories = job.artifact_directories();
        if !directories.is_empty() {
            steps.push(upload_artifacts_step(&slugify(&job.name), &directories));
        }

        let upstream = slugs(job.artifact_dependencies());
        if !upstream.is_empty() {
            steps.push(download_artifacts_step(&upstream));
        }

        let mut env = IndexMap::new();
        if let Some(environment) = &job.environment {
            env.insert("ENVIRONMENT".to_string(), environment.clone());
        }

        tracing::debug!(
            job = %job.name,
            steps = steps.len(),
            needs = job.dependency_names().len(),
            "Built GitHub job"
        );

        Job {
            name: job.name.clone(),
            needs: slugs(job.dependency_names()),
            concurrency: job.concurrency_group.as_ref().map(|group| Concurrency {
                group: group.clone(),
                cancel_in_progress: None,
            }),
            runs_on: self.runner.clone(),
            env,
            steps,
        }
    }
}

impl WorkflowCompiler for GitHubCompiler {
    type Document = Workflow;

    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    fn compile(&self, workflow: &PipelineWorkflow) -> Result<Option<Workflow>> {
        if !workflow.has_jobs() {
            return Ok(None);
        }

        Ok(Some(Workflow {
            name: workflow.name().to_string(),
            on: self.build_triggers(workflow.trigger()),
            jobs: self.build_jobs(workflow.jobs()),
        }))
    }
}

/// Full-history checkout so tagging and release steps can see every tag.
fn checkout_step() -> Step {
    Step::uses(CHECKOUT_ACTION)
        .with_name("Checkout Repository")
        .with_input("fetch-depth", 0)
        .with_input("fetch-tags", true)
}

/// Render a model step as one `run:` script.
fn build_step(step: &PipelineStep) -> Step {
    let mut rendered = Step::run(step.commands.join("\n"));
    rendered.name.clone_from(&step.name);
    for (key, value) in &step.environment_variables {
        rendered = rendered.with_env(key.clone(), value.clone());
    }
    rendered
}

fn upload_artifacts_step(job_slug: &str, directories: &[&str]) -> Step {
    Step::uses(UPLOAD_ARTIFACT_ACTION)
        .with_name("Upload Artifacts")
        .with_input("name", job_slug)
        .with_input("path", directories.join("\n"))
}

/// A single bundle is fetched by name; several are matched by a brace
/// pattern and merged into the workspace.
fn download_artifacts_step(bundles: &[String]) -> Step {
    let step = Step::uses(DOWNLOAD_ARTIFACT_ACTION).with_name("Download Artifacts");

    match bundles {
        [bundle] => step.with_input("name", bundle.as_str()),
        _ => step
            .with_input("pattern", format!("{{{}}}", bundles.join(",")))
            .with_input("merge-multiple", true),
    }
}

/// Slugify job names, dropping names that collapse onto an earlier slug.
fn slugs(names: Vec<&str>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let slug = slugify(name);
        if !result.contains(&slug) {
            result.push(slug);
        }
    }
    result
}
