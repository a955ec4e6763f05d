//! Immutable document content.
//!
//! A `ContentState` is an ordered, never-empty list of blocks plus the
//! selections before and after the edit that produced it. Every operation
//! returns a new value; blocks the operation does not touch are shared
//! between the old and the new value.

use crate::block::{Block, BlockKey, BlockType};
use crate::selection::{Position, SelectionState};
use crate::style::{InlineStyle, StyleSet};
use std::sync::Arc;

/// The ordered, clamped bounds of a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    start_index: usize,
    start_offset: usize,
    end_index: usize,
    end_offset: usize,
}

/// Document content at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentState {
    blocks: Vec<Arc<Block>>,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

impl ContentState {
    /// A document holding one empty unstyled block.
    pub fn new_empty() -> Self {
        Self::from_blocks(vec![Block::empty()])
    }

    /// Build content from blocks. An empty list yields one empty block.
    ///
    /// Keys are expected to be unique.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let blocks: Vec<Arc<Block>> = if blocks.is_empty() {
            vec![Arc::new(Block::empty())]
        } else {
            blocks.into_iter().map(Arc::new).collect()
        };
        let caret = SelectionState::collapsed(blocks[0].key().clone(), 0);
        Self {
            blocks,
            selection_before: caret.clone(),
            selection_after: caret,
        }
    }

    // === Queries ===

    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().map(|block| block.as_ref())
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index).map(|block| block.as_ref())
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.key() == key)
            .map(|block| block.as_ref())
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    /// The block immediately before `key`, if any.
    pub fn block_before(&self, key: &BlockKey) -> Option<&Block> {
        let index = self.block_index(key)?;
        index.checked_sub(1).and_then(|i| self.block_at(i))
    }

    /// All block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    pub fn with_selection_after(&self, selection: SelectionState) -> Self {
        let mut content = self.clone();
        content.selection_after = selection;
        content
    }

    /// Whether two contents share the same storage for block `index`.
    pub fn shares_block_with(&self, other: &ContentState, index: usize) -> bool {
        match (self.blocks.get(index), other.blocks.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    // === Text operations ===

    /// Remove the text covered by `range`.
    ///
    /// A range spanning several blocks merges the first and the last block;
    /// the merged block keeps the first block's key and type.
    pub fn remove_range(&self, range: &SelectionState) -> Self {
        let Some(bounds) = self.bounds(range) else {
            return self.clone();
        };
        let first = &self.blocks[bounds.start_index];
        let caret = SelectionState::collapsed(first.key().clone(), bounds.start_offset);

        let merged = if bounds.start_index == bounds.end_index {
            first.splice(bounds.start_offset, bounds.end_offset, "", StyleSet::empty())
        } else {
            let last = &self.blocks[bounds.end_index];
            let head = first.splice(bounds.start_offset, first.len(), "", StyleSet::empty());
            let tail = last.splice(0, bounds.end_offset, "", StyleSet::empty());
            head.join(&tail)
        };

        Self {
            blocks: self.replace_blocks(bounds.start_index, bounds.end_index, vec![merged]),
            selection_before: range.clone(),
            selection_after: caret,
        }
    }

    /// Insert `text` styled as `style` at `at`, removing the range first if
    /// `at` is not a caret.
    pub fn insert_text(&self, at: &SelectionState, text: &str, style: StyleSet) -> Self {
        let base = if at.is_collapsed() {
            self.clone()
        } else {
            self.remove_range(at)
        };
        let caret = if at.is_collapsed() {
            at.clone()
        } else {
            base.selection_after.clone()
        };
        let Some(bounds) = base.bounds(&caret) else {
            return self.clone();
        };

        let block = &base.blocks[bounds.start_index];
        let inserted = block.splice(bounds.start_offset, bounds.start_offset, text, style);
        let offset = bounds.start_offset + text.chars().count();
        let key = block.key().clone();

        Self {
            blocks: base.replace_blocks(bounds.start_index, bounds.start_index, vec![inserted]),
            selection_before: at.clone(),
            selection_after: SelectionState::collapsed(key, offset),
        }
    }

    /// Replace the text covered by `range` with `text` styled as `style`.
    pub fn replace_text(&self, range: &SelectionState, text: &str, style: StyleSet) -> Self {
        let removed = self.remove_range(range);
        let caret = removed.selection_after.clone();
        let mut content = removed.insert_text(&caret, text, style);
        content.selection_before = range.clone();
        content
    }

    // === Style operations ===

    /// Remove `style` from every character in `range`.
    pub fn remove_inline_style(&self, range: &SelectionState, style: InlineStyle) -> Self {
        self.restyle_range(range, |set| set.without(style))
    }

    /// Add `style` to every character in `range`.
    pub fn apply_inline_style(&self, range: &SelectionState, style: InlineStyle) -> Self {
        self.restyle_range(range, |set| set.with(style))
    }

    /// Whether every character in `range` carries `style`.
    ///
    /// An empty range never does.
    pub fn range_has_style(&self, range: &SelectionState, style: InlineStyle) -> bool {
        let Some(bounds) = self.bounds(range) else {
            return false;
        };
        let mut seen = false;
        for index in bounds.start_index..=bounds.end_index {
            let block = &self.blocks[index];
            let (start, end) = bounds.span_in(index, block.len());
            for set in &block.styles()[start..end] {
                if !set.contains(style) {
                    return false;
                }
                seen = true;
            }
        }
        seen
    }

    /// Set the type of every block touched by `range`.
    pub fn set_block_type(&self, range: &SelectionState, block_type: BlockType) -> Self {
        let Some(bounds) = self.bounds(range) else {
            return self.clone();
        };
        let updated = self.blocks[bounds.start_index..=bounds.end_index]
            .iter()
            .map(|block| block.with_type(block_type))
            .collect();

        Self {
            blocks: self.replace_blocks(bounds.start_index, bounds.end_index, updated),
            selection_before: range.clone(),
            selection_after: range.clone(),
        }
    }

    // === Structure operations ===

    /// Split the block at the selection.
    ///
    /// A non-collapsed selection is removed first. The left part keeps the
    /// block key; the right part becomes a new block with a fresh key and
    /// the same block type. The caret ends at the start of the new block.
    pub fn split_block(&self, selection: &SelectionState) -> Self {
        let base = if selection.is_collapsed() {
            self.clone()
        } else {
            self.remove_range(selection)
        };
        let caret = if selection.is_collapsed() {
            selection.clone()
        } else {
            base.selection_after.clone()
        };
        let Some(bounds) = base.bounds(&caret) else {
            return self.clone();
        };

        let block = &base.blocks[bounds.start_index];
        let (left, right) = block.split_at(bounds.start_offset, BlockKey::new());
        let right_key = right.key().clone();

        Self {
            blocks: base.replace_blocks(bounds.start_index, bounds.start_index, vec![left, right]),
            selection_before: selection.clone(),
            selection_after: SelectionState::collapsed(right_key, 0),
        }
    }

    /// Merge the block `key` into the block before it.
    ///
    /// Returns the content unchanged when there is no previous block.
    pub fn merge_with_previous(&self, key: &BlockKey) -> Self {
        let Some(index) = self.block_index(key) else {
            return self.clone();
        };
        if index == 0 {
            return self.clone();
        }
        let previous = &self.blocks[index - 1];
        let caret = SelectionState::collapsed(previous.key().clone(), previous.len());
        let merged = previous.join(&self.blocks[index]);

        Self {
            blocks: self.replace_blocks(index - 1, index, vec![merged]),
            selection_before: SelectionState::collapsed(key.clone(), 0),
            selection_after: caret,
        }
    }

    // === Internal helpers ===

    fn restyle_range(&self, range: &SelectionState, f: impl Fn(StyleSet) -> StyleSet) -> Self {
        let Some(bounds) = self.bounds(range) else {
            return self.clone();
        };
        let updated = (bounds.start_index..=bounds.end_index)
            .map(|index| {
                let block = &self.blocks[index];
                let (start, end) = bounds.span_in(index, block.len());
                block.restyle(start, end, &f)
            })
            .collect();

        Self {
            blocks: self.replace_blocks(bounds.start_index, bounds.end_index, updated),
            selection_before: range.clone(),
            selection_after: range.clone(),
        }
    }

    fn bounds(&self, selection: &SelectionState) -> Option<Bounds> {
        let anchor = self.locate(&selection.anchor)?;
        let focus = self.locate(&selection.focus)?;
        let (start, end) = if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        };
        Some(Bounds {
            start_index: start.0,
            start_offset: start.1,
            end_index: end.0,
            end_offset: end.1,
        })
    }

    fn locate(&self, position: &Position) -> Option<(usize, usize)> {
        let index = self.block_index(&position.key)?;
        Some((index, position.offset.min(self.blocks[index].len())))
    }

    fn replace_blocks(&self, first: usize, last: usize, with: Vec<Block>) -> Vec<Arc<Block>> {
        let mut blocks = Vec::with_capacity(self.blocks.len() + with.len());
        blocks.extend(self.blocks[..first].iter().cloned());
        blocks.extend(with.into_iter().map(Arc::new));
        blocks.extend(self.blocks[last + 1..].iter().cloned());
        blocks
    }
}

impl Bounds {
    /// The offsets of block `index` covered by these bounds.
    fn span_in(&self, index: usize, len: usize) -> (usize, usize) {
        let start = if index == self.start_index {
            self.start_offset
        } else {
            0
        };
        let end = if index == self.end_index {
            self.end_offset
        } else {
            len
        };
        (start.min(len), end.clamp(start.min(len), len))
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new_empty()
    }
}
