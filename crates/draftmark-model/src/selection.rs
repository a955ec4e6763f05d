//! Selections: anchor and focus positions within a document.

use crate::block::BlockKey;
use serde::{Deserialize, Serialize};

/// A position inside a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub key: BlockKey,
    pub offset: usize,
}

impl Position {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// The region an operation targets.
///
/// When anchor equals focus the selection is a caret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub anchor: Position,
    pub focus: Position,
    /// Whether the editing surface currently has focus.
    pub has_focus: bool,
}

impl SelectionState {
    /// A caret in `key` at `offset`.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor: Position::new(key.clone(), offset),
            focus: Position::new(key, offset),
            has_focus: true,
        }
    }

    /// A forward range inside a single block.
    pub fn range(key: BlockKey, start: usize, end: usize) -> Self {
        Self {
            anchor: Position::new(key.clone(), start),
            focus: Position::new(key, end),
            has_focus: true,
        }
    }

    /// A range between two arbitrary positions.
    pub fn between(anchor: Position, focus: Position) -> Self {
        Self {
            anchor,
            focus,
            has_focus: true,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The selection moved to a caret at its focus.
    pub fn collapse_to_focus(&self) -> Self {
        Self {
            anchor: self.focus.clone(),
            focus: self.focus.clone(),
            has_focus: self.has_focus,
        }
    }
}
