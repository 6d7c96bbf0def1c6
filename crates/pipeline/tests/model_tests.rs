//! Integration tests for the pipeline model and finalize-time validation.

use cicd_pipeline::{
    ArtifactDependency, CompileError, Job, Provider, Step, Trigger, ValidationError, Workflow,
};

#[test]
fn jobs_deserialize_with_defaults() {
    let jobs: Vec<Job> = serde_yaml::from_str(
        r"
- name: Build
  steps:
    - commands: [npm ci, npm run build]
      artifact_directories: [lib/]
- name: Deploy
  environment: production
  concurrency_group: deploy-prod
  steps:
    - name: Ship it
      commands: [./deploy.sh]
      environment_variables:
        TARGET: prod
      artifact_dependencies:
        - job_name: Build
",
    )
    .unwrap();

    assert_eq!(jobs[0].artifact_directories(), vec!["lib/"]);
    assert!(jobs[0].environment.is_none());

    let deploy = &jobs[1];
    assert_eq!(deploy.concurrency_group.as_deref(), Some("deploy-prod"));
    assert_eq!(
        deploy.steps[0].artifact_dependencies,
        vec![ArtifactDependency::new("Build")]
    );
    assert_eq!(deploy.merged_environment_variables()["TARGET"], "prod");
}

#[test]
fn validation_reports_every_problem_at_once() {
    let mut workflow = Workflow::new("Push to Main", Trigger::Push, Provider::GitLab);
    workflow.add_jobs([
        Job::new("Build", vec![Step::new(Vec::<String>::new())]),
        Job::new("Build", vec![Step::new(["make"])]),
        Job::new(
            "Publish",
            vec![Step::new(["./publish.sh"]).with_artifact_dependency("Package")],
        ),
    ]);

    let err = workflow.validate().unwrap_err();
    assert!(matches!(err, CompileError::Validation { .. }));

    let errors = err.validation_errors();
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], ValidationError::EmptyStep { .. }));
    assert!(matches!(errors[1], ValidationError::DuplicateJob { .. }));
    assert_eq!(
        errors[2].to_string(),
        "DependencyError: job \"Package\" referenced by \"Publish\" does not exist"
    );
}

#[test]
fn dependencies_do_not_cross_workflows() {
    let mut pull_request = Workflow::new("Pull Request", Trigger::CodeChangeRequest, Provider::GitHub);
    pull_request.add_job(Job::new("Build", vec![Step::new(["make"])]));

    let mut push = Workflow::new("Push to Main", Trigger::Push, Provider::GitHub);
    push.add_job(Job::new(
        "Release",
        vec![Step::new(["make release"]).with_job_dependency("Build")],
    ));

    assert!(pull_request.validate().is_ok());
    assert_eq!(push.validate().unwrap_err().validation_errors().len(), 1);
}
