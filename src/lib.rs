//! # dataedit-rs: Descriptor Editing & Pipeline Orchestration
//!
//! The editing core of a tabular-data-package editor. It holds a mutable
//! working copy of a structured descriptor (package, resource, detector)
//! with transactional semantics, manages ordered sub-collections with
//! selection and filtering, builds declarative processing pipelines, and
//! dispatches describe/extract/validate/transform operations to a remote
//! table-processing engine.
//!
//! ## Architecture
//!
//! - **Store**: one descriptor per edit session with checkpoint, patch,
//!   commit and revert
//! - **Sections**: selection + filter state over a descriptor's array
//!   fields (resources, licenses), mutating through the store
//! - **Pipeline**: pure construction of transform pipelines from optional
//!   templates, always re-pointed at the live resource
//! - **Client**: stateless multipart HTTP access to the processing engine
//!   with a typed result/error contract
//!
//! Everything except the client is synchronous; the client's operations
//! and file-payload reads are the only suspension points. The core takes
//! no locks: one logical session mutates one descriptor at a time.
//!
//! ## Example
//!
//! ```ignore
//! use dataedit_rs::{
//!     build_pipeline, Descriptor, FilePayload, PackageEditor, ProcessingClient,
//! };
//!
//! async fn transform_active_resource() -> dataedit_rs::Result<()> {
//!     let mut editor = PackageEditor::new(None);
//!     editor.add_resource();
//!     editor.select_resource(Some(0));
//!
//!     let resource = editor.resource_descriptor().expect("selected above");
//!     let pipeline = build_pipeline(None, &resource)?;
//!
//!     let client = ProcessingClient::default();
//!     let file = FilePayload::read("table.csv").await?;
//!     let transformation = client.transform(&file, &pipeline).await?;
//!     println!("valid: {}", transformation.status.valid);
//!
//!     editor.commit();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod descriptor;
pub mod editor;
pub mod error;
pub mod pipeline;
pub mod section;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use client::{FilePayload, ProcessingClient, Report, Row, TransformStatus, Transformation};
pub use descriptor::{Descriptor, ExportFormat};
pub use editor::{DetectorEditor, PackageEditor};
pub use error::{DataEditError, Result};
pub use pipeline::{build_pipeline, Pipeline, PipelineTask, Step};
pub use section::{Section, SectionKind, SectionState};
pub use store::DescriptorStore;
