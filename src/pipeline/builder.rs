//! Pipeline construction for transform runs
//!
//! [`build_pipeline`] is a pure transformation: it never mutates the
//! supplied template, and given the same inputs it always produces the
//! same pipeline. The first task is forced onto the currently edited
//! resource; whatever source a saved template declared is superseded by
//! the live editor state.

use crate::descriptor::Descriptor;
use crate::error::{DataEditError, Result};
use crate::pipeline::types::{Pipeline, PipelineTask, Step};
use crate::settings;
use serde_json::Value;
use tracing::debug;

/// Build a transform pipeline from an optional template and the active
/// resource.
///
/// Without a template a default pipeline is synthesized: one `resource`
/// task over the active resource with a single
/// [`table-normalize`](settings::DEFAULT_STEP_CODE) step. With a template
/// the result is a deep clone whose first task is re-pointed at the active
/// resource and whose step-level JSON overrides are merged onto the steps.
///
/// Fails with [`DataEditError::StepOverride`] when a step's `descriptor`
/// string is not a JSON object; the template is left untouched either way.
pub fn build_pipeline(template: Option<&Pipeline>, resource: &Descriptor) -> Result<Pipeline> {
    let Some(template) = template else {
        debug!(resource = resource.name(), "synthesizing default pipeline");
        return Ok(default_pipeline(resource));
    };

    let mut pipeline = template.clone();
    if pipeline.tasks.is_empty() {
        pipeline.tasks.push(default_task(resource));
        return Ok(pipeline);
    }

    let task = &mut pipeline.tasks[0];
    task.kind = Some(settings::RESOURCE_TASK_TYPE.to_string());
    task.source = Some(resource.clone());

    for (step_index, step) in task.steps.iter_mut().enumerate() {
        let Some(text) = &step.descriptor else {
            continue;
        };
        let overrides = parse_overrides(text, step_index)?;
        for (key, value) in overrides {
            match (key.as_str(), &value) {
                ("code", Value::String(code)) => step.code = code.clone(),
                ("descriptor", Value::String(descriptor)) => {
                    step.descriptor = Some(descriptor.clone());
                }
                _ => {
                    step.extra.insert(key, value);
                }
            }
        }
    }

    debug!(
        resource = resource.name(),
        tasks = pipeline.tasks.len(),
        "built pipeline from template"
    );
    Ok(pipeline)
}

fn default_pipeline(resource: &Descriptor) -> Pipeline {
    Pipeline {
        tasks: vec![default_task(resource)],
    }
}

fn default_task(resource: &Descriptor) -> PipelineTask {
    PipelineTask {
        kind: Some(settings::RESOURCE_TASK_TYPE.to_string()),
        source: Some(resource.clone()),
        steps: vec![Step::new(settings::DEFAULT_STEP_CODE)],
    }
}

fn parse_overrides(
    text: &str,
    step: usize,
) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(text).map_err(|e| DataEditError::StepOverride {
        task: 0,
        step,
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DataEditError::StepOverride {
            task: 0,
            step,
            message: format!("override is not an object: {other}"),
        }),
    }
}
