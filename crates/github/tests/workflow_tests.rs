//! Integration tests for GitHub Actions workflow rendering.
//!
//! These render complete workflows to YAML and read the result back as a
//! generic YAML value, checking the document the way GitHub would see it.

use cicd_github::{GitHubCompiler, GitHubOptions};
use cicd_pipeline::{Job, Provider, Step, Trigger, Workflow, WorkflowCompiler};
use serde_yaml::Value;

fn render(workflow: &Workflow) -> (String, Value) {
    let file = GitHubCompiler::new()
        .render(workflow)
        .expect("workflow should render")
        .expect("workflow has jobs");
    let value = serde_yaml::from_str(&file.content).expect("output is valid YAML");
    (file.content, value)
}

fn build_workflow() -> Workflow {
    let mut workflow = Workflow::new("Pull Request", Trigger::CodeChangeRequest, Provider::GitHub);
    workflow.add_job(Job::new(
        "Build",
        vec![Step::new(["npm ci", "npm run build"]).with_artifact_directory("lib/")],
    ));
    workflow
}

/// The scenario from the pipeline definition guide: one build job that
/// uploads `lib/`.
#[test]
fn end_to_end_build_job() {
    let (content, doc) = render(&build_workflow());

    assert!(content.starts_with("# Generated by cicd"));
    assert_eq!(doc["name"], Value::from("Pull Request"));
    assert_eq!(doc["on"]["pull_request"]["branches"][0], Value::from("main"));

    let job = &doc["jobs"]["build"];
    assert_eq!(job["name"], Value::from("Build"));
    assert_eq!(job["runs-on"], Value::from("ubuntu-latest"));

    let steps = job["steps"].as_sequence().expect("steps list");
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["uses"], Value::from("actions/checkout@v4"));
    assert_eq!(steps[1]["run"], Value::from("npm ci\nnpm run build"));
    assert_eq!(steps[2]["uses"], Value::from("actions/upload-artifact@v4"));
    assert_eq!(steps[2]["with"]["name"], Value::from("build"));
    assert_eq!(steps[2]["with"]["path"], Value::from("lib/"));

    assert!(job.get("needs").is_none());
    assert!(job.get("concurrency").is_none());
}

#[test]
fn push_workflow_uses_push_event() {
    let mut workflow = Workflow::new("Push to Main", Trigger::Push, Provider::GitHub);
    workflow.add_job(Job::new("Release", vec![Step::new(["./release.sh"])]));

    let (_, doc) = render(&workflow);
    assert!(doc["on"].get("pull_request").is_none());
    assert_eq!(doc["on"]["push"]["branches"][0], Value::from("main"));
}

#[test]
fn dependent_jobs_are_linked() {
    let mut workflow = build_workflow();
    workflow.add_job(
        Job::new(
            "Deploy Docs",
            vec![
                Step::new(["./deploy.sh"])
                    .with_job_dependency("Build")
                    .with_artifact_dependency("Build"),
            ],
        )
        .with_concurrency_group("docs-site"),
    );

    let (_, doc) = render(&workflow);
    let deploy = &doc["jobs"]["deploy-docs"];

    assert_eq!(deploy["needs"], serde_yaml::from_str::<Value>("[build]").unwrap());
    assert_eq!(deploy["concurrency"]["group"], Value::from("docs-site"));

    let last = deploy["steps"]
        .as_sequence()
        .and_then(|steps| steps.last())
        .expect("download step");
    assert_eq!(last["uses"], Value::from("actions/download-artifact@v4"));
    assert_eq!(last["with"]["name"], Value::from("build"));
}

#[test]
fn every_job_present_exactly_once() {
    let mut workflow = Workflow::new("Pull Request", Trigger::CodeChangeRequest, Provider::GitHub);
    for name in ["Lint", "Unit Tests", "Integration Tests", "Build"] {
        workflow.add_job(Job::new(name, vec![Step::new(["true"])]));
    }

    let (_, doc) = render(&workflow);
    let jobs = doc["jobs"].as_mapping().expect("jobs map");
    assert_eq!(jobs.len(), 4);
    for key in ["lint", "unit-tests", "integration-tests", "build"] {
        assert!(jobs.contains_key(key), "missing job {key}");
    }
}

#[test]
fn rendering_is_byte_identical() {
    let mut workflow = build_workflow();
    workflow.add_job(Job::new(
        "Test",
        vec![
            Step::new(["npm test"])
                .with_env("CI", "true")
                .with_env("A_FIRST", "1")
                .with_job_dependency("Build"),
        ],
    ));

    let (first, _) = render(&workflow);
    let (second, _) = render(&workflow);
    assert_eq!(first, second);
}

#[test]
fn options_configure_runner_and_branches() {
    let options = GitHubOptions {
        default_runner: "macos-14".to_string(),
        branches: vec!["main".to_string(), "next".to_string()],
        ..Default::default()
    };
    let compiler = GitHubCompiler::from_options(&options);

    let file = compiler.render(&build_workflow()).unwrap().unwrap();
    let doc: Value = serde_yaml::from_str(&file.content).unwrap();

    assert_eq!(doc["jobs"]["build"]["runs-on"], Value::from("macos-14"));
    assert_eq!(doc["on"]["pull_request"]["branches"][1], Value::from("next"));
}

#[test]
fn empty_workflow_produces_no_file() {
    let workflow = Workflow::new("Pull Request", Trigger::CodeChangeRequest, Provider::GitHub);
    assert!(GitHubCompiler::new().render(&workflow).unwrap().is_none());
}

#[test]
fn invalid_workflow_is_rejected_before_rendering() {
    let mut workflow = build_workflow();
    workflow.add_job(Job::new(
        "Deploy",
        vec![Step::new(["./deploy.sh"]).with_artifact_dependency("Package")],
    ));

    let err = GitHubCompiler::new().render(&workflow).unwrap_err();
    assert!(err.to_string().contains("Pull Request"));
    assert_eq!(err.validation_errors().len(), 1);
}
