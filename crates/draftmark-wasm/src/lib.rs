//! # Draftmark WebAssembly Bindings
//!
//! This crate exposes the Draftmark editor to web pages. The page renders
//! the editable surface and forwards input events; the editor decides how
//! each event changes the document.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { DraftEditor } from 'draftmark-wasm';
//!
//! await init();
//!
//! const editor = new DraftEditor();          // restores from localStorage
//! editor.handle_before_input('#');           // "not-handled": insert it
//! editor.insert_text('#');
//! editor.handle_before_input(' ');           // "handled": now a heading
//! editor.insert_text('Title');
//!
//! console.log(editor.get_html());            // "<h1>Title</h1>"
//! editor.save();                             // alerts "Content saved!"
//! ```

use draftmark_editor::{
    snapshot, EditorConfig, EditorConfigBuilder, EditorError, EditorSurface, KeyValueStore,
    Notice, Snapshot,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ============================================================================
// LocalStorage
// ============================================================================

/// `window.localStorage` as a key-value store.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Open the page's local storage; unavailable when there is no window
    /// or storage is disabled.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn get_item(&self, key: &str) -> draftmark_editor::Result<Option<String>> {
        let storage = self.storage.as_ref().ok_or(EditorError::StoreUnavailable)?;
        storage
            .get_item(key)
            .map_err(|_| EditorError::StoreUnavailable)
    }

    fn set_item(&mut self, key: &str, value: &str) -> draftmark_editor::Result<()> {
        let storage = self.storage.as_ref().ok_or(EditorError::StoreUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| EditorError::SaveFailure(format!("{:?}", e)))
    }
}

// ============================================================================
// DraftEditor
// ============================================================================

/// A block as seen from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockInfo {
    key: String,
    text: String,
    block_type: String,
}

/// The editor handle driven by the page.
#[wasm_bindgen]
pub struct DraftEditor {
    surface: EditorSurface,
}

#[wasm_bindgen]
impl DraftEditor {
    /// Create an editor, restoring saved content from local storage.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::restore(EditorConfig::default())
    }

    /// Create an editor that saves under a custom storage key.
    #[wasm_bindgen]
    pub fn with_storage_key(key: &str) -> DraftEditor {
        Self::restore(EditorConfigBuilder::new().storage_key(key).build())
    }

    /// Offer typed characters to the editor.
    ///
    /// Returns `"handled"` when the editor consumed them (the page must not
    /// insert them) and `"not-handled"` otherwise.
    #[wasm_bindgen]
    pub fn handle_before_input(&mut self, chars: &str) -> String {
        self.surface.handle_before_input(chars).to_string()
    }

    /// Split the current block. Always `"handled"`.
    #[wasm_bindgen]
    pub fn handle_return(&mut self) -> String {
        self.surface.handle_return().to_string()
    }

    /// Insert text at the selection without trigger handling.
    #[wasm_bindgen]
    pub fn insert_text(&mut self, text: &str) {
        let next = self.surface.state().insert_characters(text);
        self.surface.on_change(next);
    }

    /// Type text, firing triggers like keyboard input would.
    #[wasm_bindgen]
    pub fn type_text(&mut self, text: &str) {
        self.surface.type_text(text);
    }

    #[wasm_bindgen]
    pub fn backspace(&mut self) {
        self.surface.backspace();
    }

    #[wasm_bindgen]
    pub fn undo(&mut self) {
        self.surface.undo();
    }

    #[wasm_bindgen]
    pub fn redo(&mut self) {
        self.surface.redo();
    }

    #[wasm_bindgen]
    pub fn can_undo(&self) -> bool {
        self.surface.state().can_undo()
    }

    /// Place the caret in block `block_index` at character `offset`.
    #[wasm_bindgen]
    pub fn set_caret(&mut self, block_index: usize, offset: usize) {
        self.surface.set_caret(block_index, offset);
    }

    /// Plain text, blocks separated by newlines.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.surface.content().plain_text()
    }

    /// HTML rendering with the inline style map applied.
    #[wasm_bindgen]
    pub fn get_html(&self) -> String {
        self.surface.html()
    }

    #[wasm_bindgen]
    pub fn block_count(&self) -> usize {
        self.surface.content().block_count()
    }

    /// Block type tags in document order.
    #[wasm_bindgen]
    pub fn block_types(&self) -> Vec<String> {
        self.surface
            .content()
            .blocks()
            .map(|block| block.block_type().to_string())
            .collect()
    }

    /// Blocks as `{ key, text, block_type }` objects.
    #[wasm_bindgen]
    pub fn blocks(&self) -> Result<JsValue, JsValue> {
        let blocks: Vec<BlockInfo> = self
            .surface
            .content()
            .blocks()
            .map(|block| BlockInfo {
                key: block.key().to_string(),
                text: block.text().to_string(),
                block_type: block.block_type().to_string(),
            })
            .collect();
        serde_wasm_bindgen::to_value(&blocks).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The current content as a raw snapshot object.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = snapshot::serialize(self.surface.content())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the document with a raw snapshot object.
    #[wasm_bindgen]
    pub fn load_snapshot(&mut self, snapshot_js: JsValue) -> Result<(), JsValue> {
        let raw: Snapshot = serde_wasm_bindgen::from_value(snapshot_js)
            .map_err(|e| JsValue::from_str(&format!("Malformed snapshot: {}", e)))?;
        let content = snapshot::deserialize(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.surface = EditorSurface::with_content(self.surface.config().clone(), content);
        Ok(())
    }

    /// Save to local storage, alert the outcome and return its message.
    #[wasm_bindgen]
    pub fn save(&self) -> String {
        let notice = self.save_to(&mut LocalStorage::open());
        alert(notice.message());
        notice.message().to_string()
    }

    /// Placeholder to show while the document is empty.
    #[wasm_bindgen]
    pub fn placeholder(&self) -> Option<String> {
        self.surface.placeholder().map(str::to_string)
    }

    #[wasm_bindgen]
    pub fn title(&self) -> String {
        self.surface.config().title.clone()
    }

    #[wasm_bindgen]
    pub fn storage_key(&self) -> String {
        self.surface.config().storage_key.clone()
    }
}

impl DraftEditor {
    fn restore(config: EditorConfig) -> Self {
        Self {
            surface: EditorSurface::restore(config, &LocalStorage::open()),
        }
    }

    /// Wrap an existing surface.
    pub fn from_surface(surface: EditorSurface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    /// Save into any store, logging failures to the console.
    pub fn save_to<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Notice {
        let notice = self.surface.save(store);
        if notice.is_failure() {
            console_error(&format!("Error saving content: {}", notice.message()));
        }
        notice
    }
}

impl Default for DraftEditor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Show a blocking alert, if there is a window.
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Log a message to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn console_error(message: &str) {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::error_1(&JsValue::from_str(message));
    }
}

// ============================================================================
// Tests
// ============================================================================
