//! Input event interface and the editor surface that owns the current state.
//!
//! The rendering layer calls `handle_before_input` for every character and
//! `handle_return` for every paragraph break. Anything not handled falls
//! back to the default edit, delivered through `on_change`.

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::persistence::{self, KeyValueStore};
use crate::render::{render_html, StyleMap};
use crate::split::on_split;
use crate::trigger::{evaluate, Evaluation};
use draftmark_model::{ContentState, EditorState, SelectionState};
use std::fmt;
use tracing::{error, info, warn};

/// Whether an input handler consumed the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

impl HandleResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleResult::Handled => "handled",
            HandleResult::NotHandled => "not-handled",
        }
    }
}

impl fmt::Display for HandleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offer typed input to the trigger engine.
///
/// Only single characters can complete a trigger; longer input (paste,
/// composition) is never handled.
pub fn handle_before_input(input: &str, state: &EditorState) -> (HandleResult, Option<EditorState>) {
    let mut chars = input.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return (HandleResult::NotHandled, None);
    };
    match evaluate(ch, state) {
        Evaluation::Handled(next) => (HandleResult::Handled, Some(next)),
        Evaluation::NotHandled => (HandleResult::NotHandled, None),
    }
}

/// Replace the default paragraph break with the normalized split.
pub fn handle_return(state: &EditorState) -> (HandleResult, EditorState) {
    (HandleResult::Handled, on_split(state))
}

/// A user-visible message after a save attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Saved,
    StoreUnavailable,
    SaveFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Saved => "Content saved!",
            Notice::StoreUnavailable => "Local storage is not available.",
            Notice::SaveFailed => "Save failed! Check the console.",
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Saved)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The editing surface: the single place the current state is assigned.
#[derive(Clone, Debug)]
pub struct EditorSurface {
    config: EditorConfig,
    style_map: StyleMap,
    state: EditorState,
}

impl EditorSurface {
    /// A surface over an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_content(config, ContentState::new_empty())
    }

    pub fn with_content(config: EditorConfig, content: ContentState) -> Self {
        let state = EditorState::create_with_content(content).with_max_history(config.max_history);
        Self {
            config,
            style_map: StyleMap::default(),
            state,
        }
    }

    /// Open a surface from the saved snapshot, or empty if there is none or
    /// it cannot be read.
    pub fn restore<S: KeyValueStore + ?Sized>(config: EditorConfig, store: &S) -> Self {
        match persistence::load(store, &config.storage_key) {
            Ok(Some(content)) => {
                info!(key = %config.storage_key, blocks = content.block_count(), "restored saved content");
                Self::with_content(config, content)
            }
            Ok(None) => Self::new(config),
            Err(err) => {
                warn!(key = %config.storage_key, error = %err, "could not restore saved content");
                Self::new(config)
            }
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn content(&self) -> &ContentState {
        self.state.current_content()
    }

    pub fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    pub fn set_style_map(&mut self, style_map: StyleMap) {
        self.style_map = style_map;
    }

    /// Placeholder to show, or `None` once the document has text.
    pub fn placeholder(&self) -> Option<&str> {
        if self.content().has_text() {
            None
        } else {
            Some(self.config.placeholder.as_str())
        }
    }

    // === Input events ===

    pub fn handle_before_input(&mut self, input: &str) -> HandleResult {
        let (result, next) = handle_before_input(input, &self.state);
        if let Some(next) = next {
            self.state = next;
        }
        result
    }

    pub fn handle_return(&mut self) -> HandleResult {
        let (result, next) = handle_return(&self.state);
        self.state = next;
        result
    }

    /// Accept a state produced by a default edit.
    pub fn on_change(&mut self, state: EditorState) {
        self.state = state;
    }

    // === Default editing, as the rendering layer performs it ===

    /// Type text one character at a time, inserting whatever the handler
    /// does not consume.
    pub fn type_text(&mut self, text: &str) {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let input: &str = ch.encode_utf8(&mut buf);
            if self.handle_before_input(input) == HandleResult::NotHandled {
                let next = self.state.insert_characters(input);
                self.on_change(next);
            }
        }
    }

    pub fn press_return(&mut self) {
        self.handle_return();
    }

    pub fn backspace(&mut self) {
        let next = self.state.backspace();
        self.on_change(next);
    }

    pub fn undo(&mut self) {
        let next = self.state.undo();
        self.on_change(next);
    }

    pub fn redo(&mut self) {
        let next = self.state.redo();
        self.on_change(next);
    }

    pub fn select(&mut self, selection: SelectionState) {
        let next = self.state.force_selection(selection);
        self.on_change(next);
    }

    /// Place the caret in block `index` at `offset` (both clamped).
    pub fn set_caret(&mut self, index: usize, offset: usize) {
        let content = self.content();
        let block = content
            .block_at(index)
            .unwrap_or_else(|| content.last_block());
        let caret = SelectionState::collapsed(block.key().clone(), offset.min(block.len()));
        self.select(caret);
    }

    // === Output ===

    pub fn html(&self) -> String {
        render_html(self.content(), &self.style_map)
    }

    /// Save the current content. The in-memory state is never changed.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Notice {
        match persistence::save(store, &self.config.storage_key, self.content()) {
            Ok(()) => {
                info!(key = %self.config.storage_key, "content saved");
                Notice::Saved
            }
            Err(EditorError::StoreUnavailable) => {
                warn!("save requested but storage is not available");
                Notice::StoreUnavailable
            }
            Err(err) => {
                error!(error = %err, "error saving content");
                Notice::SaveFailed
            }
        }
    }
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
