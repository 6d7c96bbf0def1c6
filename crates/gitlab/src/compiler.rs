//! GitLab CI Workflow Compiler
//!
//! Transforms a cicd [`Workflow`](PipelineWorkflow) into the job map of a
//! GitLab sub-file. Trigger rules are not part of the sub-file; they guard
//! its include in the top-level pipeline (see [`crate::pipeline`]).

use crate::config::GitLabOptions;
use crate::schema::{Artifacts, Job, JobMap, Need};
use cicd_pipeline::{Job as PipelineJob, Provider, Result, Workflow as PipelineWorkflow, WorkflowCompiler};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// GitLab CI job compiler
///
/// # Model to GitLab CI Mapping
///
/// | Model | GitLab CI |
/// |-------|-----------|
/// | `job.name` | Job key (verbatim) |
/// | `step.commands` | `script:` entries, flattened in step order |
/// | `job.environment` | `variables.ENVIRONMENT` and an extra tag |
/// | `step.environment_variables` | `variables:` (later steps win) |
/// | `step.artifact_directories` | `artifacts.paths` |
/// | `step.job_dependencies` | `needs: [{job}]` |
/// | `step.artifact_dependencies` | `needs: [{job, artifacts: true}]` |
/// | `job.concurrency_group` | `resource_group:` |
/// | manual job set | `when: manual` |
#[derive(Debug, Clone)]
pub struct GitLabCompiler {
    /// Tags added to every job
    pub default_tags: Vec<String>,
    /// `expire_in` applied to artifacts
    pub artifact_expiry: String,
    /// Job names gated behind `when: manual`
    pub manual_jobs: BTreeSet<String>,
}

impl Default for GitLabCompiler {
    fn default() -> Self {
        Self::from_options(&GitLabOptions::default())
    }
}

impl GitLabCompiler {
    /// Create a compiler with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler from pipeline-wide options.
    #[must_use]
    pub fn from_options(options: &GitLabOptions) -> Self {
        Self {
            default_tags: options.default_tags.clone(),
            artifact_expiry: options.artifact_expiry.clone(),
            manual_jobs: options.manual_jobs.clone(),
        }
    }

    /// Set the default runner tags
    #[must_use]
    pub fn with_default_tags(mut self, tags: Vec<String>) -> Self {
        self.default_tags = tags;
        self
    }

    /// Set the artifact retention period
    #[must_use]
    pub fn with_artifact_expiry(mut self, expiry: impl Into<String>) -> Self {
        self.artifact_expiry = expiry.into();
        self
    }

    /// Require a job to be started by hand
    #[must_use]
    pub fn with_manual_job(mut self, name: impl Into<String>) -> Self {
        self.manual_jobs.insert(name.into());
        self
    }

    /// Build jobs keyed by name, in registration order.
    #[must_use]
    pub fn build_jobs(&self, jobs: &[PipelineJob]) -> JobMap {
        jobs.iter()
            .map(|job| (job.name.clone(), self.build_job(job)))
            .collect()
    }

    /// Build a single job.
    #[must_use]
    pub fn build_job(&self, job: &PipelineJob) -> Job {
        let mut variables = IndexMap::new();
        if let Some(environment) = &job.environment {
            variables.insert("ENVIRONMENT".to_string(), environment.clone());
        }
        variables.extend(job.merged_environment_variables());

        let mut tags = self.default_tags.clone();
        tags.extend(job.environment.iter().cloned());

        let manual = self.manual_jobs.contains(&job.name);

        tracing::debug!(
            job = %job.name,
            manual,
            needs = job.dependency_names().len(),
            "Built GitLab job"
        );

        Job {
            script: job.commands().map(str::to_string).collect(),
            variables,
            tags,
            artifacts: self.build_artifacts(job),
            needs: build_needs(job),
            when: manual.then(|| "manual".to_string()),
            resource_group: job.concurrency_group.clone(),
            rules: Vec::new(),
        }
    }

    fn build_artifacts(&self, job: &PipelineJob) -> Option<Artifacts> {
        let paths = job.artifact_directories();
        if paths.is_empty() {
            return None;
        }

        Some(Artifacts {
            paths: paths.into_iter().map(str::to_string).collect(),
            when: "on_success".to_string(),
            expire_in: self.artifact_expiry.clone(),
        })
    }
}

/// Plain dependencies first, then artifact dependencies; a job named by both
/// gets a single entry that fetches artifacts.
fn build_needs(job: &PipelineJob) -> Vec<Need> {
    let with_artifacts = job.artifact_dependencies();

    job.dependency_names()
        .into_iter()
        .map(|name| {
            if with_artifacts.contains(&name) {
                Need::with_artifacts(name)
            } else {
                Need::job(name)
            }
        })
        .collect()
}

impl WorkflowCompiler for GitLabCompiler {
    type Document = JobMap;

    fn provider(&self) -> Provider {
        Provider::GitLab
    }

    fn compile(&self, workflow: &PipelineWorkflow) -> Result<Option<JobMap>> {
        if !workflow.has_jobs() {
            return Ok(None);
        }

        Ok(Some(self.build_jobs(workflow.jobs())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicd_pipeline::{Step as PipelineStep, Trigger};

    fn make_job(name: &str, commands: &[&str]) -> PipelineJob {
        PipelineJob::new(name, vec![PipelineStep::new(commands.iter().copied())])
    }

    #[test]
    fn test_empty_workflow_compiles_to_nothing() {
        let workflow = PipelineWorkflow::new("Merge Request", Trigger::CodeChangeRequest, Provider::GitLab);
        assert!(GitLabCompiler::new().compile(&workflow).unwrap().is_none());
    }

    #[test]
    fn test_script_is_flattened_in_order() {
        let model = PipelineJob::new(
            "Build",
            vec![PipelineStep::new(["a"]), PipelineStep::new(["b", "c"])],
        );
        let job = GitLabCompiler::new().build_job(&model);
        assert_eq!(job.script, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_minimal_job_has_empty_tags_and_nothing_else() {
        let job = GitLabCompiler::new().build_job(&make_job("Lint", &["make lint"]));

        assert!(job.tags.is_empty());
        assert!(job.variables.is_empty());
        assert!(job.artifacts.is_none());
        assert!(job.needs.is_empty());
        assert!(job.when.is_none());
        assert!(job.resource_group.is_none());
    }

    #[test]
    fn test_environment_sets_variable_and_tag() {
        let model = make_job("Deploy", &["./deploy.sh"]).with_environment("production");
        let job = GitLabCompiler::new()
            .with_default_tags(vec!["docker".to_string()])
            .build_job(&model);

        assert_eq!(job.tags, vec!["docker", "production"]);
        assert_eq!(
            job.variables.get("ENVIRONMENT").map(String::as_str),
            Some("production")
        );
    }

    #[test]
    fn test_step_variables_merge_with_later_steps_winning() {
        let model = PipelineJob::new(
            "Test",
            vec![
                PipelineStep::new(["one"]).with_env("MODE", "fast").with_env("A", "1"),
                PipelineStep::new(["two"]).with_env("MODE", "full"),
            ],
        )
        .with_environment("staging");
        let job = GitLabCompiler::new().build_job(&model);

        let keys: Vec<_> = job.variables.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ENVIRONMENT", "A", "MODE"]);
        assert_eq!(job.variables["MODE"], "full");
    }

    #[test]
    fn test_artifacts_union_with_expiry() {
        let model = PipelineJob::new(
            "Build",
            vec![
                PipelineStep::new(["make"]).with_artifact_directory("dist/"),
                PipelineStep::new(["make docs"])
                    .with_artifact_directory("docs/")
                    .with_artifact_directory("dist/"),
            ],
        );
        let job = GitLabCompiler::new()
            .with_artifact_expiry("1 week")
            .build_job(&model);

        let artifacts = job.artifacts.unwrap();
        assert_eq!(artifacts.paths, vec!["dist/", "docs/"]);
        assert_eq!(artifacts.when, "on_success");
        assert_eq!(artifacts.expire_in, "1 week");
    }

    #[test]
    fn test_needs_flag_artifact_dependencies() {
        let model = PipelineJob::new(
            "Release",
            vec![
                PipelineStep::new(["./release.sh"])
                    .with_job_dependency("Lint")
                    .with_artifact_dependency("Build"),
            ],
        );
        let job = GitLabCompiler::new().build_job(&model);

        assert_eq!(job.needs, vec![Need::job("Lint"), Need::with_artifacts("Build")]);
    }

    #[test]
    fn test_dependency_named_twice_fetches_artifacts_once() {
        let model = PipelineJob::new(
            "Deploy",
            vec![
                PipelineStep::new(["./deploy.sh"])
                    .with_job_dependency("Build")
                    .with_artifact_dependency("Build"),
            ],
        );
        let job = GitLabCompiler::new().build_job(&model);
        assert_eq!(job.needs, vec![Need::with_artifacts("Build")]);
    }

    #[test]
    fn test_manual_jobs_and_resource_group() {
        let compiler = GitLabCompiler::new().with_manual_job("Deploy");

        let deploy = compiler.build_job(
            &make_job("Deploy", &["./deploy.sh"]).with_concurrency_group("production"),
        );
        assert_eq!(deploy.when.as_deref(), Some("manual"));
        assert_eq!(deploy.resource_group.as_deref(), Some("production"));

        let build = compiler.build_job(&make_job("Build", &["make"]));
        assert!(build.when.is_none());
    }

    #[test]
    fn test_jobs_keyed_by_raw_name_in_registration_order() {
        let jobs = vec![make_job("Unit Tests", &["true"]), make_job("Build", &["true"])];
        let map = GitLabCompiler::new().build_jobs(&jobs);

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Unit Tests", "Build"]);
    }
}
