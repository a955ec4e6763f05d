//! WASM-specific integration tests
//!
//! These tests run in a headless browser environment using wasm-bindgen-test.
//! Run with: `wasm-pack test --headless --chrome crates/draftmark-wasm`

use draftmark_editor::KeyValueStore;
use draftmark_wasm::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear(key: &str) {
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.remove_item(key).unwrap();
}

#[wasm_bindgen_test]
fn test_triggers_from_page_events() {
    clear("test-triggers");
    let mut editor = DraftEditor::with_storage_key("test-triggers");

    assert_eq!(editor.handle_before_input("#"), "not-handled");
    editor.insert_text("#");
    assert_eq!(editor.handle_before_input(" "), "handled");
    editor.insert_text("Title");
    assert_eq!(editor.block_types(), vec!["header-one".to_string()]);

    assert_eq!(editor.handle_return(), "handled");
    editor.type_text("*** under");
    assert_eq!(
        editor.get_html(),
        "<h1>Title</h1><p><span style=\"text-decoration: underline\">under</span></p>"
    );
}

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    clear("test-round-trip");
    let mut editor = DraftEditor::with_storage_key("test-round-trip");
    editor.type_text("# Saved heading");
    editor.handle_return();
    editor.type_text("** body");

    let mut storage = LocalStorage::open();
    assert!(storage.is_available());
    assert_eq!(
        editor.save_to(&mut storage),
        draftmark_editor::Notice::Saved
    );

    let restored = DraftEditor::with_storage_key("test-round-trip");
    assert_eq!(restored.get_text(), "Saved heading\nbody");
    assert_eq!(
        restored.block_types(),
        vec!["header-one".to_string(), "unstyled".to_string()]
    );
}

#[wasm_bindgen_test]
fn test_malformed_storage_falls_back_to_empty() {
    let mut storage = LocalStorage::open();
    storage.set_item("test-malformed", "{not json").unwrap();

    let editor = DraftEditor::with_storage_key("test-malformed");
    assert_eq!(editor.get_text(), "");
    assert_eq!(editor.block_count(), 1);
    assert!(editor.placeholder().is_some());
}

#[wasm_bindgen_test]
fn test_snapshot_object_round_trip() {
    clear("test-snapshot");
    let mut editor = DraftEditor::with_storage_key("test-snapshot");
    editor.type_text("* bold words");
    let snapshot = editor.snapshot().expect("snapshot should serialize");

    let mut other = DraftEditor::with_storage_key("test-snapshot");
    other.load_snapshot(snapshot).expect("snapshot should load");
    assert_eq!(other.get_text(), "bold words");
    assert_eq!(other.get_html(), editor.get_html());
}

#[wasm_bindgen_test]
fn test_load_snapshot_rejects_garbage() {
    clear("test-garbage");
    let mut editor = DraftEditor::with_storage_key("test-garbage");
    editor.type_text("keep me");
    assert!(editor.load_snapshot(wasm_bindgen::JsValue::from_str("nope")).is_err());
    assert_eq!(editor.get_text(), "keep me");
}
