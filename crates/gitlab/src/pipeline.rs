//! Top-level `.gitlab-ci.yml` assembly.
//!
//! The top-level file only declares shared settings and includes each
//! workflow sub-file behind the rules of that workflow's trigger.

use crate::config::GitLabOptions;
use crate::rules::Rule;
use crate::schema::{Include, Job, Pipeline};
use cicd_pipeline::{RenderedFile, Result, Workflow, serialize_document};

/// Path of the top-level pipeline file.
pub const PIPELINE_FILE: &str = ".gitlab-ci.yml";

/// Key of the never-scheduled job added with `placeholder_job`.
pub const PLACEHOLDER_JOB: &str = "pipeline-placeholder";

/// Build the top-level pipeline document.
///
/// Workflows without jobs get no include. Returns `None` when no workflow
/// has jobs.
#[must_use]
pub fn build_pipeline(options: &GitLabOptions, workflows: &[&Workflow]) -> Option<Pipeline> {
    let include: Vec<Include> = workflows
        .iter()
        .filter(|workflow| workflow.has_jobs())
        .map(|workflow| Include {
            local: include_path(workflow),
            rules: options.rules.rules(workflow.trigger()),
        })
        .collect();

    if include.is_empty() {
        return None;
    }

    let mut pipeline = Pipeline {
        services: options.services.clone(),
        before_script: options.before_script.clone(),
        include,
        ..Default::default()
    };

    if options.placeholder_job {
        pipeline.jobs.insert(PLACEHOLDER_JOB.to_string(), placeholder_job());
    }

    Some(pipeline)
}

/// Build and serialize the top-level pipeline file.
///
/// # Errors
///
/// Returns [`cicd_pipeline::CompileError::Serialization`] if YAML output fails.
pub fn build_pipeline_file(
    options: &GitLabOptions,
    workflows: &[&Workflow],
) -> Result<Option<RenderedFile>> {
    let Some(pipeline) = build_pipeline(options, workflows) else {
        tracing::info!("No GitLab workflow has jobs, skipping {PIPELINE_FILE}");
        return Ok(None);
    };

    let content = serialize_document(&pipeline)?;
    tracing::info!(
        includes = pipeline.include.len(),
        path = PIPELINE_FILE,
        "Compiled GitLab pipeline"
    );

    Ok(Some(RenderedFile::new(PIPELINE_FILE, content)))
}

/// Forward-slash path regardless of host platform.
fn include_path(workflow: &Workflow) -> String {
    format!(
        "{}/workflows/{}.yml",
        workflow.provider().root_dir(),
        workflow.slug()
    )
}

fn placeholder_job() -> Job {
    Job {
        script: vec!["echo \"No jobs for this pipeline\"".to_string()],
        rules: vec![Rule::never()],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cicd_pipeline::{Job as PipelineJob, Provider, Step, Trigger};

    fn workflows(with_cc_jobs: bool, with_push_jobs: bool) -> (Workflow, Workflow) {
        let mut cc = Workflow::new("Merge Request", Trigger::CodeChangeRequest, Provider::GitLab);
        let mut push = Workflow::new("Push to Main", Trigger::Push, Provider::GitLab);
        if with_cc_jobs {
            cc.add_job(PipelineJob::new("Test", vec![Step::new(["make test"])]));
        }
        if with_push_jobs {
            push.add_job(PipelineJob::new("Release", vec![Step::new(["make release"])]));
        }
        (cc, push)
    }

    #[test]
    fn test_no_jobs_no_pipeline_file() {
        let (cc, push) = workflows(false, false);
        let file = build_pipeline_file(&GitLabOptions::default(), &[&cc, &push]).unwrap();
        assert!(file.is_none());
    }

    #[test]
    fn test_only_non_empty_workflows_are_included() {
        let (cc, push) = workflows(false, true);
        let pipeline = build_pipeline(&GitLabOptions::default(), &[&cc, &push]).unwrap();

        assert_eq!(pipeline.include.len(), 1);
        assert_eq!(pipeline.include[0].local, ".gitlab/workflows/push-to-main.yml");
        assert!(pipeline.include[0].rules[0]
            .condition
            .as_deref()
            .is_some_and(|rule| rule.contains("\"push\"")));
    }

    #[test]
    fn test_includes_keep_workflow_order() {
        let (cc, push) = workflows(true, true);
        let pipeline = build_pipeline(&GitLabOptions::default(), &[&cc, &push]).unwrap();

        let locals: Vec<_> = pipeline.include.iter().map(|i| i.local.as_str()).collect();
        assert_eq!(
            locals,
            vec![".gitlab/workflows/merge-request.yml", ".gitlab/workflows/push-to-main.yml"]
        );
    }

    #[test]
    fn test_shared_settings_and_placeholder() {
        let options = GitLabOptions {
            services: vec!["docker:dind".to_string()],
            before_script: vec!["npm ci".to_string()],
            placeholder_job: true,
            ..Default::default()
        };
        let (cc, push) = workflows(true, false);

        let file = build_pipeline_file(&options, &[&cc, &push]).unwrap().unwrap();
        assert_eq!(file.path.to_str(), Some(PIPELINE_FILE));

        let doc: serde_yaml::Value = serde_yaml::from_str(&file.content).unwrap();
        assert_eq!(doc["services"][0], serde_yaml::Value::from("docker:dind"));
        assert_eq!(doc["before_script"][0], serde_yaml::Value::from("npm ci"));
        assert_eq!(
            doc[PLACEHOLDER_JOB]["rules"][0]["when"],
            serde_yaml::Value::from("never")
        );
    }

    #[test]
    fn test_overridden_rules_replace_defaults() {
        let mut options = GitLabOptions::default();
        options.rules.code_change_request = vec!["$CI_MERGE_REQUEST_ID".to_string()];
        let (cc, push) = workflows(true, false);

        let pipeline = build_pipeline(&options, &[&cc, &push]).unwrap();
        assert_eq!(pipeline.include[0].rules, vec![Rule::when_if("$CI_MERGE_REQUEST_ID")]);
    }
}
