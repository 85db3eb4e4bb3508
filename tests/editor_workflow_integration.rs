//! Integration tests for complete edit-session workflows
//!
//! These tests drive the public session API the way the editor surface
//! does: import a descriptor, edit its collections, build a pipeline for
//! the active resource, commit or revert.

mod common;

use common::builders::{PackageBuilder, ResourceBuilder};
use dataedit_rs::{
    build_pipeline, DataEditError, Descriptor, DescriptorStore, DetectorEditor, ExportFormat,
    PackageEditor, Pipeline, PipelineTask, Step,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_import_add_default_commit_revert_round_trip() {
    common::init_tracing();

    // Import a JSON descriptor and open a session on it
    let descriptor = Descriptor::from_text(r#"{"name": "pkg", "resources": []}"#).unwrap();
    let mut editor = PackageEditor::new(Some(descriptor));

    editor.add_resource();
    assert_eq!(
        editor.descriptor().get("resources"),
        Some(&json!([{"name": "resource0", "type": "table", "path": "table.csv"}]))
    );

    editor.commit();
    let committed = editor.descriptor().clone();

    // Immediately after a commit, revert must be a no-op
    editor.revert();
    assert_eq!(editor.descriptor(), &committed);
    assert!(!editor.is_dirty());
}

#[test]
fn test_selection_drift_regression_after_removal() {
    let mut editor = PackageEditor::new(Some(
        PackageBuilder::new("pkg")
            .resource("first", "first.csv")
            .resource("second", "second.csv")
            .resource("third", "third.csv")
            .build(),
    ));

    // Select "third", then remove an element at a lower position
    editor.select_resource(Some(2));
    editor.remove_resource(0);

    // The index survives unchanged and now addresses past-the-end;
    // the stale selection yields absence, not an error or a neighbor
    assert_eq!(editor.resource_state().index, Some(2));
    assert!(editor.resource().is_none());

    // Removing the selected position clears the selection entirely
    editor.select_resource(Some(0));
    editor.remove_resource(0);
    assert_eq!(editor.resource_state().index, None);
}

#[test]
fn test_filtered_items_select_the_underlying_element() {
    let mut editor = PackageEditor::new(Some(
        PackageBuilder::new("pkg")
            .resource("cities", "cities.csv")
            .resource("countries", "countries.csv")
            .build(),
    ));

    editor.search_resources(Some("countr".to_string()));
    let filtered: Vec<usize> = editor.resource_items().map(|(i, _)| i).collect();
    assert_eq!(filtered, vec![1]);

    // Selecting the filtered result addresses the unfiltered position
    editor.select_resource(Some(filtered[0]));
    assert_eq!(
        editor.resource().unwrap().get("name"),
        Some(&json!("countries"))
    );
}

#[test]
fn test_session_callbacks_fire_through_editor_operations() {
    let changes = Rc::new(RefCell::new(0));
    let commits = Rc::new(RefCell::new(0));
    let change_sink = Rc::clone(&changes);
    let commit_sink = Rc::clone(&commits);

    let store = DescriptorStore::new(PackageBuilder::new("pkg").build())
        .with_on_change(move |_| *change_sink.borrow_mut() += 1)
        .with_on_commit(move |_| *commit_sink.borrow_mut() += 1);
    let mut editor = PackageEditor::with_store(store);

    editor.add_resource(); // one patch
    editor.select_resource(Some(0));
    editor.update_resource(Descriptor::from_value(json!({"title": "T"})).unwrap()); // another
    editor.commit();

    assert_eq!(*changes.borrow(), 2);
    assert_eq!(*commits.borrow(), 1);
}

#[test]
fn test_pipeline_for_the_edited_resource() {
    let mut editor = PackageEditor::new(Some(
        PackageBuilder::new("pkg")
            .resource("cities", "cities.csv")
            .build(),
    ));
    editor.select_resource(Some(0));
    editor
        .update_resource(Descriptor::from_value(json!({"path": "cities-v2.csv"})).unwrap());

    // A template saved before the edit still carries the old source
    let template = Pipeline {
        tasks: vec![PipelineTask {
            kind: None,
            source: Some(ResourceBuilder::new("cities").build()),
            steps: vec![Step::new("cell-set").with_descriptor(r#"{"fieldName": "id"}"#)],
        }],
    };

    let resource = editor.resource_descriptor().unwrap();
    let pipeline = build_pipeline(Some(&template), &resource).unwrap();

    // The live editor state supersedes the template's declared source
    let source = pipeline.tasks[0].source.as_ref().unwrap();
    assert_eq!(source.get("path"), Some(&json!("cities-v2.csv")));
    assert_eq!(
        pipeline.tasks[0].steps[0].extra.get("fieldName"),
        Some(&json!("id"))
    );
}

#[test]
fn test_detector_import_export_session() {
    let mut editor = DetectorEditor::new(None);

    editor.update(Descriptor::from_value(json!({"fieldType": "string"})).unwrap());
    editor.commit();

    editor.preview(ExportFormat::Yaml);
    let yaml = editor.preview_text().unwrap();
    assert!(yaml.contains("fieldType: string"));

    // Round-trip the export through import
    let exported = editor.export_text().unwrap();
    editor.import_text(&exported).unwrap();
    assert_eq!(editor.descriptor().get("fieldType"), Some(&json!("string")));

    // A bad import surfaces a decode error instead of silently doing nothing
    let err = editor.import_text("{oops").unwrap_err();
    assert!(matches!(err, DataEditError::ImportDecode(_)));
}

#[test]
fn test_unknown_descriptor_fields_survive_a_full_session() {
    let mut editor = PackageEditor::new(Some(
        Descriptor::from_text(
            r#"{"name": "pkg", "resources": [], "customMeta": {"origin": "survey", "wave": 3}}"#,
        )
        .unwrap(),
    ));

    editor.add_resource();
    editor.select_resource(Some(0));
    editor.update_resource(Descriptor::from_value(json!({"title": "T"})).unwrap());
    editor.commit();
    editor.revert();

    assert_eq!(
        editor.descriptor().get("customMeta"),
        Some(&json!({"origin": "survey", "wave": 3}))
    );
}
