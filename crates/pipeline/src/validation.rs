//! Workflow validation
//!
//! Runs once per workflow at finalize time and collects every structural
//! problem instead of stopping at the first one.

use crate::error::ValidationError;
use crate::model::Job;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Validator for the jobs of one workflow.
pub struct WorkflowValidator<'a> {
    workflow: &'a str,
    jobs: &'a [Job],
}

impl<'a> WorkflowValidator<'a> {
    /// Create a validator for the named workflow's jobs.
    #[must_use]
    pub const fn new(workflow: &'a str, jobs: &'a [Job]) -> Self {
        Self { workflow, jobs }
    }

    /// Validate the workflow.
    ///
    /// Checks the workflow name, duplicate job names, jobs without steps,
    /// steps without commands, dependencies on jobs outside the workflow and
    /// dependency cycles. Unresolved dependencies do not take part in the
    /// cycle check.
    ///
    /// # Errors
    ///
    /// Returns every violation found, in job registration order.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.workflow.contains(['/', '\\']) {
            errors.push(ValidationError::InvalidWorkflowName {
                workflow: self.workflow.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for job in self.jobs {
            if !seen.insert(job.name.as_str()) {
                errors.push(ValidationError::DuplicateJob {
                    workflow: self.workflow.to_string(),
                    job: job.name.clone(),
                });
            }
            errors.extend(Self::validate_steps(job));
        }

        for job in self.jobs {
            for dependency in job.dependency_names() {
                if !seen.contains(dependency) {
                    errors.push(ValidationError::MissingDependency {
                        job: job.name.clone(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        errors.extend(self.validate_no_cycles());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_steps(job: &Job) -> Vec<ValidationError> {
        if job.steps.is_empty() {
            return vec![ValidationError::JobWithoutSteps {
                job: job.name.clone(),
            }];
        }

        job.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.commands.is_empty())
            .map(|(index, step)| ValidationError::EmptyStep {
                job: job.name.clone(),
                step: step
                    .name
                    .clone()
                    .map_or_else(|| format!("#{}", index + 1), |name| format!("\"{name}\"")),
            })
            .collect()
    }

    /// Build the dependency graph and report each strongly connected
    /// component that prevents a topological order.
    fn validate_no_cycles(&self) -> Vec<ValidationError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for job in self.jobs {
            index
                .entry(job.name.as_str())
                .or_insert_with(|| graph.add_node(job.name.as_str()));
        }

        for job in self.jobs {
            let Some(&to) = index.get(job.name.as_str()) else {
                continue;
            };
            for dependency in job.dependency_names() {
                if let Some(&from) = index.get(dependency) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        if toposort(&graph, None).is_ok() {
            return Vec::new();
        }

        let order: HashMap<&str, usize> = self
            .jobs
            .iter()
            .enumerate()
            .map(|(position, job)| (job.name.as_str(), position))
            .rev()
            .collect();

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut names: Vec<&str> = component.iter().map(|node| graph[*node]).collect();
                names.sort_by_key(|name| order.get(name).copied().unwrap_or(usize::MAX));
                names.into_iter().map(str::to_string).collect()
            })
            .collect();
        cycles.sort_by_key(|jobs| jobs.first().and_then(|name| order.get(name.as_str()).copied()));

        cycles
            .into_iter()
            .map(|jobs| ValidationError::CyclicDependency {
                workflow: self.workflow.to_string(),
                jobs,
            })
            .collect()
    }
}
