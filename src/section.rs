//! Collection sections: selection and filtering over descriptor arrays
//!
//! A section makes one array-valued field of a descriptor (`resources`,
//! `licenses`) independently addressable and filterable. Sections hold
//! selection and query state only; every mutation is delegated to the
//! [`DescriptorStore`] by writing the whole collection back through
//! `patch`, since the store merges top-level keys wholesale.

use crate::descriptor::Descriptor;
use crate::store::DescriptorStore;
use serde_json::Value;
use tracing::debug;

/// The descriptor sub-collections a section can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The `resources` array of a data package
    Resources,
    /// The `licenses` array of a data package
    Licenses,
}

impl SectionKind {
    /// The descriptor field holding the collection
    pub fn field_name(&self) -> &'static str {
        match self {
            SectionKind::Resources => "resources",
            SectionKind::Licenses => "licenses",
        }
    }

    /// The template appended by `add_default`; `count` is the current
    /// collection size (seeds generated resource names).
    pub fn default_item(&self, count: usize) -> Descriptor {
        match self {
            SectionKind::Resources => Descriptor::initial_resource(count),
            SectionKind::Licenses => Descriptor::initial_license(),
        }
    }
}

/// Selection and filter state for one managed collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionState {
    /// Case-insensitive substring filter over item names
    pub query: Option<String>,
    /// Selected position within the unfiltered collection
    pub index: Option<usize>,
    /// Whether the section is displayed as a grid
    pub is_grid: bool,
    /// Whether the extras panel is open for the selected item
    pub is_extras: bool,
}

/// Manager for one named, array-valued descriptor field
#[derive(Debug)]
pub struct Section {
    kind: SectionKind,
    state: SectionState,
}

impl Section {
    /// Create a section over the given collection kind
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            state: SectionState::default(),
        }
    }

    /// The managed collection kind
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Current selection and filter state
    pub fn state(&self) -> &SectionState {
        &self.state
    }

    /// Select an item by unfiltered position, or clear the selection.
    ///
    /// No bounds validation happens here; dereferencing an out-of-range
    /// index through [`Section::active`] yields `None`.
    pub fn select(&mut self, index: Option<usize>) {
        self.state.index = index;
    }

    /// Set or clear the name filter; the selection is left untouched
    pub fn set_query(&mut self, query: Option<String>) {
        self.state.query = query;
    }

    /// Toggle grid display state
    pub fn set_grid(&mut self, is_grid: bool) {
        self.state.is_grid = is_grid;
    }

    /// Toggle the extras panel state
    pub fn set_extras(&mut self, is_extras: bool) {
        self.state.is_extras = is_extras;
    }

    /// The collection as currently stored, empty when the field is absent
    /// or not an array
    pub fn collection<'a>(&self, store: &'a DescriptorStore) -> &'a [Value] {
        store
            .descriptor()
            .get(self.kind.field_name())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate `(unfiltered index, item)` pairs matching the query.
    ///
    /// With no query (or an empty one) every item is yielded. Indices
    /// always refer to positions in the unfiltered collection, so a
    /// filtered result can still be selected correctly.
    pub fn items<'a>(
        &'a self,
        store: &'a DescriptorStore,
    ) -> impl Iterator<Item = (usize, &'a Value)> + 'a {
        let query = self
            .state
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.collection(store)
            .iter()
            .enumerate()
            .filter(move |(_, item)| match &query {
                Some(query) => item_name(item).to_lowercase().contains(query),
                None => true,
            })
    }

    /// The selected item, or `None` when the selection is unset or out of
    /// range (absence, not an error)
    pub fn active<'a>(&self, store: &'a DescriptorStore) -> Option<&'a Value> {
        self.collection(store).get(self.state.index?)
    }

    /// First item whose name matches exactly.
    ///
    /// Name uniqueness is not enforced anywhere, so with duplicates the
    /// first match wins.
    pub fn find_by_name<'a>(&self, store: &'a DescriptorStore, name: &str) -> Option<&'a Value> {
        self.collection(store)
            .iter()
            .find(|item| item_name(item) == name)
    }

    /// Shallow-merge `patch` onto the selected item and write the whole
    /// collection back through the store.
    ///
    /// Returns `false` without touching the store when there is no active
    /// item or the item is not an object.
    pub fn update_active(&self, store: &mut DescriptorStore, patch: Descriptor) -> bool {
        let Some(index) = self.state.index else {
            return false;
        };
        let mut items = self.collection(store).to_vec();
        let Some(Value::Object(item)) = items.get_mut(index) else {
            return false;
        };

        for (key, value) in patch.into_map() {
            item.insert(key, value);
        }
        self.write_back(store, items);
        true
    }

    /// Remove the item at `index` and write the collection back.
    ///
    /// Removing the selected position clears the selection and closes the
    /// extras panel; there is no silent fallback to a neighboring item.
    /// Removing any other position leaves the selection untouched, so an
    /// index above the removed position now addresses a different logical
    /// element. That drift is long-standing observed behavior the UI's
    /// selectors rely on; callers wanting stability must re-select.
    pub fn remove_at(&mut self, store: &mut DescriptorStore, index: usize) {
        let mut items = self.collection(store).to_vec();
        if index < items.len() {
            items.remove(index);
        }
        debug!(
            section = self.kind.field_name(),
            index, "removed collection item"
        );
        if self.state.index == Some(index) {
            self.state.index = None;
            self.state.is_extras = false;
        }
        self.write_back(store, items);
    }

    /// Remove the selected item, if any
    pub fn remove_active(&mut self, store: &mut DescriptorStore) {
        if let Some(index) = self.state.index {
            self.remove_at(store, index);
        }
    }

    /// Append the section's default template without selecting it
    pub fn add_default(&self, store: &mut DescriptorStore) {
        let mut items = self.collection(store).to_vec();
        items.push(self.kind.default_item(items.len()).into_value());
        debug!(
            section = self.kind.field_name(),
            count = items.len(),
            "added default collection item"
        );
        self.write_back(store, items);
    }

    fn write_back(&self, store: &mut DescriptorStore, items: Vec<Value>) {
        let mut patch = Descriptor::new();
        patch.set(self.kind.field_name(), Value::Array(items));
        store.patch(patch);
    }
}

fn item_name(item: &Value) -> &str {
    item.get("name").and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn package_store() -> DescriptorStore {
        DescriptorStore::new(
            Descriptor::from_value(json!({
                "name": "pkg",
                "resources": [
                    {"name": "cities", "path": "cities.csv"},
                    {"name": "countries", "path": "countries.csv"},
                    {"name": "capitals", "path": "capitals.csv"},
                ],
                "licenses": [],
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_items_unfiltered() {
        let store = package_store();
        let section = Section::new(SectionKind::Resources);

        let items: Vec<_> = section.items(&store).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, 0);
        assert_eq!(items[2].0, 2);
    }

    #[test]
    fn test_items_filtered_keep_unfiltered_indices() {
        let store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.set_query(Some("CAP".to_string()));

        let items: Vec<_> = section.items(&store).collect();
        assert_eq!(items.len(), 1);
        // "capitals" sits at position 2 of the unfiltered collection
        assert_eq!(items[0].0, 2);
        assert_eq!(items[0].1.get("name"), Some(&json!("capitals")));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.set_query(Some(String::new()));

        assert_eq!(section.items(&store).count(), 3);
    }

    #[test]
    fn test_query_does_not_touch_selection() {
        let store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.select(Some(1));
        section.set_query(Some("cities".to_string()));

        assert_eq!(section.state().index, Some(1));
        assert_eq!(section.active(&store).unwrap().get("name"), Some(&json!("countries")));
    }

    #[test]
    fn test_active_out_of_range_is_none() {
        let store = package_store();
        let mut section = Section::new(SectionKind::Resources);

        assert!(section.active(&store).is_none());
        section.select(Some(17));
        assert!(section.active(&store).is_none());
    }

    #[test]
    fn test_update_active_writes_collection_back() {
        let mut store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.select(Some(0));

        let applied = section.update_active(
            &mut store,
            Descriptor::from_value(json!({"title": "Cities of the world"})).unwrap(),
        );

        assert!(applied);
        assert!(store.is_dirty());
        let item = section.active(&store).unwrap();
        assert_eq!(item.get("title"), Some(&json!("Cities of the world")));
        // Untouched fields survive
        assert_eq!(item.get("path"), Some(&json!("cities.csv")));
    }

    #[test]
    fn test_update_active_without_selection_is_a_no_op() {
        let mut store = package_store();
        let section = Section::new(SectionKind::Resources);

        let applied = section.update_active(
            &mut store,
            Descriptor::from_value(json!({"title": "x"})).unwrap(),
        );

        assert!(!applied);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_remove_at_clears_selection_and_extras() {
        let mut store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.select(Some(1));
        section.set_extras(true);

        section.remove_at(&mut store, 1);

        assert_eq!(section.state().index, None);
        assert!(!section.state().is_extras);
        assert_eq!(section.collection(&store).len(), 2);
        assert!(section.active(&store).is_none());
    }

    #[test]
    fn test_remove_below_selection_leaves_index_drifting() {
        let mut store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.select(Some(2)); // "capitals"

        section.remove_at(&mut store, 0);

        // Selection index survives removal of an earlier element and now
        // addresses a different logical item
        assert_eq!(section.state().index, Some(2));
        assert!(section.active(&store).is_none());

        section.select(Some(1));
        assert_eq!(
            section.active(&store).unwrap().get("name"),
            Some(&json!("capitals"))
        );
    }

    #[test]
    fn test_remove_above_selection_keeps_selected_item() {
        let mut store = package_store();
        let mut section = Section::new(SectionKind::Resources);
        section.select(Some(0));

        section.remove_at(&mut store, 2);

        assert_eq!(section.state().index, Some(0));
        assert_eq!(
            section.active(&store).unwrap().get("name"),
            Some(&json!("cities"))
        );
    }

    #[test]
    fn test_add_default_appends_without_selecting() {
        let mut store = package_store();
        let section = Section::new(SectionKind::Resources);

        section.add_default(&mut store);

        let items = section.collection(&store);
        assert_eq!(items.len(), 4);
        assert_eq!(items[3].get("name"), Some(&json!("resource3")));
        assert_eq!(section.state().index, None);
    }

    #[test]
    fn test_add_default_license() {
        let mut store = package_store();
        let section = Section::new(SectionKind::Licenses);

        section.add_default(&mut store);

        assert_eq!(
            section.collection(&store).to_vec(),
            vec![json!({"name": "MIT"})]
        );
    }

    #[test]
    fn test_add_default_creates_missing_collection() {
        let mut store = DescriptorStore::new(
            Descriptor::from_value(json!({"name": "bare"})).unwrap(),
        );
        let section = Section::new(SectionKind::Resources);

        section.add_default(&mut store);

        assert_eq!(section.collection(&store).len(), 1);
    }

    #[test]
    fn test_find_by_name_first_match_wins() {
        let store = DescriptorStore::new(
            Descriptor::from_value(json!({
                "resources": [
                    {"name": "dup", "path": "first.csv"},
                    {"name": "dup", "path": "second.csv"},
                ],
            }))
            .unwrap(),
        );
        let section = Section::new(SectionKind::Resources);

        let found = section.find_by_name(&store, "dup").unwrap();
        assert_eq!(found.get("path"), Some(&json!("first.csv")));
    }
}
