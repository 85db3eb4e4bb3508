//! Pipeline, task and step shapes.

use crate::descriptor::Descriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A declarative processing pipeline: ordered tasks of ordered steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,
}

impl Pipeline {
    /// The first task, which the builder guarantees to exist and to
    /// address the live resource
    pub fn head(&self) -> Option<&PipelineTask> {
        self.tasks.first()
    }
}

/// One unit of work within a pipeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineTask {
    /// Task type on the wire (`"resource"` for resource-driven tasks)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The resource descriptor this task operates on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Descriptor>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// An ordered sub-operation of a task.
///
/// Beyond the typed `code` and `descriptor` fields a step carries an open
/// bag of extra fields (`extra`, flattened on the wire). Templates express
/// step-local configuration as an opaque JSON string in `descriptor`; the
/// builder merges it into the bag, so the step shape stays extensible
/// without widening this type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    pub code: String,

    /// JSON-encoded override bag, merged onto the step at build time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Step {
    /// Create a step with the given code and no overrides
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            descriptor: None,
            extra: Map::new(),
        }
    }

    /// Attach a JSON-encoded override bag
    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }
}
