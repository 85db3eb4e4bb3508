//! Package edit sessions
//!
//! A package editor owns the descriptor store for one data package plus
//! the two managed sub-collections (resources, licenses). UI fragments
//! share the session through this handle instead of any ambient global.

use crate::descriptor::Descriptor;
use crate::section::{Section, SectionKind, SectionState};
use crate::store::DescriptorStore;
use serde_json::Value;

/// Edit session over a data package descriptor
#[derive(Debug)]
pub struct PackageEditor {
    store: DescriptorStore,
    resources: Section,
    licenses: Section,
}

impl PackageEditor {
    /// Open a session on `descriptor`, or on the built-in package
    /// template when none is supplied
    pub fn new(descriptor: Option<Descriptor>) -> Self {
        let initial = descriptor.unwrap_or_else(Descriptor::initial_package);
        Self::with_store(DescriptorStore::new(initial))
    }

    /// Open a session over a pre-configured store (e.g. one carrying
    /// lifecycle callbacks)
    pub fn with_store(store: DescriptorStore) -> Self {
        Self {
            store,
            resources: Section::new(SectionKind::Resources),
            licenses: Section::new(SectionKind::Licenses),
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

    /// Shallow-merge top-level fields onto the package descriptor
    pub fn patch(&mut self, fields: Descriptor) {
        self.store.patch(fields);
    }

    /// Checkpoint the working descriptor
    pub fn commit(&mut self) {
        self.store.commit();
    }

    /// Restore the working descriptor from the checkpoint
    pub fn revert(&mut self) {
        self.store.revert();
    }

    // ── Resources ──

    /// Selection and filter state of the resources section
    pub fn resource_state(&self) -> &SectionState {
        self.resources.state()
    }

    /// Select a resource by unfiltered position
    pub fn select_resource(&mut self, index: Option<usize>) {
        self.resources.select(index);
    }

    /// Set or clear the resource name filter
    pub fn search_resources(&mut self, query: Option<String>) {
        self.resources.set_query(query);
    }

    /// `(unfiltered index, resource)` pairs matching the current filter
    pub fn resource_items(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.resources.items(&self.store)
    }

    /// The selected resource, if the selection addresses one
    pub fn resource(&self) -> Option<&Value> {
        self.resources.active(&self.store)
    }

    /// The selected resource as a descriptor for dispatch to the engine
    pub fn resource_descriptor(&self) -> Option<Descriptor> {
        self.resource()
            .cloned()
            .and_then(Descriptor::from_value)
    }

    /// Names of all resources, in collection order
    pub fn resource_names(&self) -> Vec<String> {
        self.resources
            .collection(&self.store)
            .iter()
            .map(|item| {
                item.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string()
            })
            .collect()
    }

    /// First resource with the given name; duplicates resolve to the
    /// first match
    pub fn resource_by_name(&self, name: &str) -> Option<&Value> {
        self.resources.find_by_name(&self.store, name)
    }

    /// Merge `patch` onto the selected resource; `false` when none is
    /// selected
    pub fn update_resource(&mut self, patch: Descriptor) -> bool {
        self.resources.update_active(&mut self.store, patch)
    }

    /// Remove the resource at `index`
    pub fn remove_resource(&mut self, index: usize) {
        self.resources.remove_at(&mut self.store, index);
    }

    /// Append a default resource without selecting it
    pub fn add_resource(&mut self) {
        self.resources.add_default(&mut self.store);
    }

    // ── Licenses ──

    /// Selection and filter state of the licenses section
    pub fn license_state(&self) -> &SectionState {
        self.licenses.state()
    }

    /// Select a license by unfiltered position
    pub fn select_license(&mut self, index: Option<usize>) {
        self.licenses.select(index);
    }

    /// Set or clear the license name filter
    pub fn search_licenses(&mut self, query: Option<String>) {
        self.licenses.set_query(query);
    }

    /// `(unfiltered index, license)` pairs matching the current filter
    pub fn license_items(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.licenses.items(&self.store)
    }

    /// The selected license, if the selection addresses one
    pub fn license(&self) -> Option<&Value> {
        self.licenses.active(&self.store)
    }

    /// Merge `patch` onto the selected license; `false` when none is
    /// selected
    pub fn update_license(&mut self, patch: Descriptor) -> bool {
        self.licenses.update_active(&mut self.store, patch)
    }

    /// Remove the license at `index`
    pub fn remove_license(&mut self, index: usize) {
        self.licenses.remove_at(&mut self.store, index);
    }

    /// Append a default license without selecting it
    pub fn add_license(&mut self) {
        self.licenses.add_default(&mut self.store);
    }
}

impl Default for PackageEditor {
    fn default() -> Self {
        Self::new(None)
    }
}
