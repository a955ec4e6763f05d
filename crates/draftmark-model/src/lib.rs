//! # draftmark-model
//!
//! Immutable document model for the Draftmark editor.
//!
//! This crate provides:
//! - Blocks with a type tag and per-character inline styles
//! - Selections (carets and ranges)
//! - `ContentState`: an immutable, structurally shared list of blocks with
//!   the editing primitives (replace text, style ranges, set block type,
//!   split blocks)
//! - `EditorState`: content plus selection, bounded undo/redo history and
//!   the pending inline style for the next typed character
//!
//! ## Example
//!
//! ```rust
//! use draftmark_model::{BlockType, EditorState, InlineStyle};
//!
//! let state = EditorState::create_empty()
//!     .insert_characters("Title")
//!     .toggle_block_type(BlockType::HeaderOne)
//!     .toggle_inline_style(InlineStyle::Bold);
//!
//! assert_eq!(state.current_content().first_block().text(), "Title");
//! assert_eq!(state.current_content().first_block().block_type(), BlockType::HeaderOne);
//! assert!(state.current_inline_style().contains(InlineStyle::Bold));
//! ```

pub mod block;
pub mod content;
pub mod editor_state;
pub mod selection;
pub mod style;

pub use block::{Block, BlockKey, BlockType};
pub use content::ContentState;
pub use editor_state::{ChangeType, EditorState, DEFAULT_MAX_HISTORY};
pub use selection::{Position, SelectionState};
pub use style::{InlineStyle, StyleSet, EXCLUSIVE_STYLES};
