//! Detector edit sessions
//!
//! The detector configuration controls how the processing engine infers
//! schemas (buffer/sample sizes, field types, confidence). Its editor is a
//! plain descriptor session with import/export and a format-preview
//! toggle on top.

use crate::descriptor::{Descriptor, ExportFormat};
use crate::error::Result;
use crate::store::DescriptorStore;

/// Edit session over a detector descriptor
#[derive(Debug)]
pub struct DetectorEditor {
    store: DescriptorStore,
    export_format: ExportFormat,
    is_preview: bool,
}

impl DetectorEditor {
    /// Open a session on `descriptor`, or on the built-in detector
    /// template when none is supplied
    pub fn new(descriptor: Option<Descriptor>) -> Self {
        let initial = descriptor.unwrap_or_else(Descriptor::initial_detector);
        Self::with_store(DescriptorStore::new(initial))
    }

    /// Open a session over a pre-configured store
    pub fn with_store(store: DescriptorStore) -> Self {
        Self {
            store,
            export_format: ExportFormat::default(),
            is_preview: false,
        }
    }

    /// The underlying descriptor store
    pub fn store(&self) -> &DescriptorStore {
        &self.store
    }

    /// The current working descriptor
    pub fn descriptor(&self) -> &Descriptor {
        self.store.descriptor()
    }

    /// True iff the session has uncommitted edits
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// The format the next export or preview will render
    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    /// Whether the session is showing a serialized preview
    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    /// Shallow-merge fields onto the detector descriptor
    pub fn update(&mut self, patch: Descriptor) {
        self.store.patch(patch);
    }

    /// Checkpoint the working descriptor
    pub fn commit(&mut self) {
        self.store.commit();
    }

    /// Restore the working descriptor from the checkpoint
    pub fn revert(&mut self) {
        self.store.revert();
    }

    /// Toggle the serialized preview for `format`.
    ///
    /// Requesting the format already shown closes the preview and resets
    /// the export format; requesting another format switches the open
    /// preview over to it.
    pub fn preview(&mut self, format: ExportFormat) {
        self.is_preview = !self.is_preview || self.export_format != format;
        self.export_format = if self.is_preview {
            format
        } else {
            ExportFormat::default()
        };
    }

    /// Render the preview text for the current state
    pub fn preview_text(&self) -> Result<String> {
        self.descriptor().to_text(self.export_format)
    }

    /// Render the working descriptor for export and reset the preview
    /// state; writing the result anywhere is the caller's job
    pub fn export_text(&mut self) -> Result<String> {
        let text = self.descriptor().to_text(self.export_format)?;
        self.export_format = ExportFormat::default();
        self.is_preview = false;
        Ok(text)
    }

    /// Replace the working descriptor from imported JSON or YAML text.
    ///
    /// Decode failures surface as [`crate::DataEditError::ImportDecode`];
    /// the working descriptor is untouched in that case.
    pub fn import_text(&mut self, text: &str) -> Result<()> {
        let descriptor = Descriptor::from_text(text)?;
        self.store.replace(descriptor);
        Ok(())
    }
}

impl Default for DetectorEditor {
    fn default() -> Self {
        Self::new(None)
    }
}
