//! Shared finalize pass over a component's workflows.

use crate::error::{Error, Result};
use cicd_pipeline::{RenderedFile, Workflow, WorkflowCompiler};

/// Render every workflow, collecting all failures.
///
/// Either every document renders or none is returned.
pub(crate) fn render_workflows<C: WorkflowCompiler>(
    compiler: &C,
    workflows: &[&Workflow],
) -> Result<Vec<RenderedFile>> {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for workflow in workflows {
        match compiler.render(workflow) {
            Ok(Some(file)) => files.push(file),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(workflow = %workflow.name(), error = %err, "Workflow failed to compile");
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(files)
    } else {
        Err(Error::Compile { errors })
    }
}
