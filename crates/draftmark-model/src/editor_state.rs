//! Editor state: content plus selection, history and pending inline style.
//!
//! Like `ContentState`, an `EditorState` is never mutated in place. Each
//! operation returns a new state; previous states stay valid and can be
//! kept by the caller.

use crate::block::BlockType;
use crate::content::ContentState;
use crate::selection::SelectionState;
use crate::style::{InlineStyle, StyleSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Default bound on the number of undo entries.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// The kind of edit that produced a content state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
}

impl ChangeType {
    pub fn tag(&self) -> &'static str {
        match self {
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::BackspaceCharacter => "backspace-character",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::SplitBlock => "split-block",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
        }
    }

    /// Consecutive changes of these kinds share one undo entry.
    fn coalesces(&self) -> bool {
        matches!(
            self,
            ChangeType::InsertCharacters | ChangeType::BackspaceCharacter
        )
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The whole editor state at a point in time.
#[derive(Clone, Debug)]
pub struct EditorState {
    content: Arc<ContentState>,
    selection: SelectionState,
    undo_stack: VecDeque<Arc<ContentState>>,
    redo_stack: Vec<Arc<ContentState>>,
    last_change_type: Option<ChangeType>,
    inline_style_override: Option<StyleSet>,
    max_history: usize,
}

impl EditorState {
    /// A state over an empty document.
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::new_empty())
    }

    /// A state over existing content, caret at the start of the first block.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            content: Arc::new(content),
            selection,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            last_change_type: None,
            inline_style_override: None,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    /// Set the maximum number of undo entries.
    pub fn with_max_history(&self, max: usize) -> Self {
        let mut state = self.clone();
        state.max_history = max;
        state.trim_history();
        state
    }

    pub fn current_content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn inline_style_override(&self) -> Option<StyleSet> {
        self.inline_style_override
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Record new content as the current state.
    ///
    /// The selection moves to `content.selection_after()`, the redo stack
    /// and the inline style override are cleared.
    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let mut state = self.clone();
        let boundary = !(change_type.coalesces() && self.last_change_type == Some(change_type));
        if boundary {
            state.undo_stack.push_back(Arc::clone(&self.content));
            state.trim_history();
        }
        state.redo_stack.clear();
        state.selection = content.selection_after().clone();
        state.content = Arc::new(content);
        state.last_change_type = Some(change_type);
        state.inline_style_override = None;
        state
    }

    /// Restore the content before the last undo boundary.
    pub fn undo(&self) -> Self {
        let mut state = self.clone();
        let Some(previous) = state.undo_stack.pop_back() else {
            return state;
        };
        state.redo_stack.push(Arc::clone(&self.content));
        state.selection = self.content.selection_before().clone();
        state.content = previous;
        state.last_change_type = None;
        state.inline_style_override = None;
        state.repair_selection();
        state
    }

    /// Re-apply the last undone content.
    pub fn redo(&self) -> Self {
        let mut state = self.clone();
        let Some(next) = state.redo_stack.pop() else {
            return state;
        };
        state.undo_stack.push_back(Arc::clone(&self.content));
        state.trim_history();
        state.selection = next.selection_after().clone();
        state.content = next;
        state.last_change_type = None;
        state.inline_style_override = None;
        state.repair_selection();
        state
    }

    /// Move the selection without touching content.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        let mut state = self.clone();
        state.selection = selection;
        state.inline_style_override = None;
        state.last_change_type = None;
        state
    }

    pub fn set_inline_style_override(&self, styles: StyleSet) -> Self {
        let mut state = self.clone();
        state.inline_style_override = Some(styles);
        state
    }

    /// The style the next typed character will carry.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(styles) = self.inline_style_override {
            return styles;
        }
        let content = self.current_content();
        let position = &self.selection.anchor;
        let Some(block) = content.block_for_key(&position.key) else {
            return StyleSet::empty();
        };
        let offset = position.offset.min(block.len());
        if offset > 0 {
            return block.style_at(offset - 1).unwrap_or_default();
        }
        if !block.is_empty() {
            return block.style_at(0).unwrap_or_default();
        }
        // Look upward for the nearest block with text.
        let Some(index) = content.block_index(block.key()) else {
            return StyleSet::empty();
        };
        (0..index)
            .rev()
            .filter_map(|i| content.block_at(i))
            .find(|b| !b.is_empty())
            .and_then(|b| b.style_at(b.len() - 1))
            .unwrap_or_default()
    }

    // === Rich text commands ===

    /// Toggle an inline style.
    ///
    /// On a caret only the pending style changes. On a range the style is
    /// removed if every selected character has it and applied otherwise.
    pub fn toggle_inline_style(&self, style: InlineStyle) -> Self {
        if self.selection.is_collapsed() {
            return self.set_inline_style_override(self.current_inline_style().toggled(style));
        }
        let content = self.current_content();
        let next = if content.range_has_style(&self.selection, style) {
            content.remove_inline_style(&self.selection, style)
        } else {
            content.apply_inline_style(&self.selection, style)
        };
        self.push(next, ChangeType::ChangeInlineStyle)
    }

    /// Set `block_type` on the selected blocks, or reset them to unstyled
    /// when the first selected block already has it.
    pub fn toggle_block_type(&self, block_type: BlockType) -> Self {
        let content = self.current_content();
        let current = content
            .block_for_key(&self.selection.anchor.key)
            .map(|block| block.block_type());
        let target = if current == Some(block_type) {
            BlockType::Unstyled
        } else {
            block_type
        };
        let next = content.set_block_type(&self.selection, target);
        self.push(next, ChangeType::ChangeBlockType)
    }

    // === Default editing ===

    /// Insert text at the selection using the current inline style.
    pub fn insert_characters(&self, text: &str) -> Self {
        let style = self.current_inline_style();
        let next = self
            .current_content()
            .replace_text(&self.selection, text, style);
        self.push(next, ChangeType::InsertCharacters)
    }

    /// Delete backwards from the selection.
    ///
    /// At the start of a styled block the block type is reset first; at
    /// the start of an unstyled block it merges into the previous block.
    pub fn backspace(&self) -> Self {
        let content = self.current_content();
        if !self.selection.is_collapsed() {
            return self.push(content.remove_range(&self.selection), ChangeType::RemoveRange);
        }
        let position = &self.selection.anchor;
        let Some(block) = content.block_for_key(&position.key) else {
            return self.clone();
        };
        let offset = position.offset.min(block.len());
        if offset > 0 {
            let range = SelectionState::range(position.key.clone(), offset - 1, offset);
            return self.push(content.remove_range(&range), ChangeType::BackspaceCharacter);
        }
        if block.block_type() != BlockType::Unstyled {
            let next = content
                .set_block_type(&self.selection, BlockType::Unstyled)
                .with_selection_after(self.selection.clone());
            return self.push(next, ChangeType::ChangeBlockType);
        }
        if content.block_before(&position.key).is_none() {
            return self.clone();
        }
        self.push(
            content.merge_with_previous(&position.key),
            ChangeType::BackspaceCharacter,
        )
    }

    fn trim_history(&mut self) {
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
    }

    /// Fall back to a caret at the document start if the selection points
    /// at a block the content no longer has.
    fn repair_selection(&mut self) {
        let content = &self.content;
        let valid = content.block_for_key(&self.selection.anchor.key).is_some()
            && content.block_for_key(&self.selection.focus.key).is_some();
        if !valid {
            self.selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
