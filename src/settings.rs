//! Shared constants for the editing core
//!
//! Mirrors the conventions of the processing engine the editor talks to:
//! default endpoint, default export format, and the templates' fixed values.

/// Base URL of the remote table-processing engine
pub const SERVER_URL: &str = "http://localhost:7070/api";

/// Step code applied when a transform pipeline is synthesized from scratch
pub const DEFAULT_STEP_CODE: &str = "table-normalize";

/// Task type marking a pipeline task as driven by a resource descriptor
pub const RESOURCE_TASK_TYPE: &str = "resource";

/// Default resource type for newly added resources
pub const DEFAULT_RESOURCE_TYPE: &str = "table";

/// Default path for newly added resources
pub const DEFAULT_RESOURCE_PATH: &str = "table.csv";

/// License name used for newly added licenses
pub const DEFAULT_LICENSE_NAME: &str = "MIT";

/// Default detector buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: u64 = 10_000;

/// Default detector sample size in rows
pub const DEFAULT_SAMPLE_SIZE: u64 = 100;

/// Default detector field confidence threshold
pub const DEFAULT_FIELD_CONFIDENCE: f64 = 0.9;
