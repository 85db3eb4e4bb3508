//! Declarative processing pipelines.
//!
//! A pipeline is an ordered list of tasks, each an ordered list of steps,
//! dispatched to the remote table-processing engine for transform runs.
//! The editor treats "what resource is loaded" as authoritative over what
//! a saved template says: [`build_pipeline`] always re-points the first
//! task at the currently edited resource.
//!
//! # Design
//!
//! - **Typed core, open edges** — `Step` has typed `code`/`descriptor`
//!   fields plus a flattened bag of extra fields.
//! - **Templates are immutable** — building clones; callers may reuse a
//!   template across runs.
//! - **Overrides are opaque JSON** — step configuration travels as an
//!   encoded string until build time, keeping the step shape extensible.

pub mod builder;
pub mod types;

pub use builder::build_pipeline;
pub use types::{Pipeline, PipelineTask, Step};
