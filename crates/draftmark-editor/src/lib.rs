//! # draftmark-editor
//!
//! Inline markup editing on top of the Draftmark document model.
//!
//! This crate provides:
//! - The trigger engine: `#`, `*`, `**` and `***` followed by a space at
//!   the start of a block become a heading, bold, red or underlined text
//! - Block-split normalization: a paragraph break never carries the block
//!   type into the new block
//! - The input event interface (`handle_before_input`, `handle_return`)
//!   and an `EditorSurface` that owns the current state
//! - Snapshot serialization and persistence in a key-value store
//! - A style rendering map and HTML export
//!
//! ## Example
//!
//! ```rust
//! use draftmark_editor::{EditorSurface, MemoryStore, Notice};
//! use draftmark_model::{BlockType, InlineStyle};
//!
//! let mut editor = EditorSurface::default();
//! editor.type_text("# Notes");
//! editor.press_return();
//! editor.type_text("* important");
//!
//! let content = editor.content();
//! assert_eq!(content.first_block().block_type(), BlockType::HeaderOne);
//! assert_eq!(content.last_block().block_type(), BlockType::Unstyled);
//! assert!(content.last_block().has_style_at(0, InlineStyle::Bold));
//!
//! let mut store = MemoryStore::new();
//! assert_eq!(editor.save(&mut store), Notice::Saved);
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod render;
pub mod snapshot;
pub mod split;
pub mod surface;
pub mod trigger;

pub use config::{EditorConfig, EditorConfigBuilder, DEFAULT_STORAGE_KEY};
pub use error::{EditorError, Result};
pub use persistence::{KeyValueStore, MemoryStore};
pub use render::{render_html, StyleMap};
pub use snapshot::{RawBlock, RawStyleRange, Snapshot, SNAPSHOT_VERSION};
pub use split::on_split;
pub use surface::{handle_before_input, handle_return, EditorSurface, HandleResult, Notice};
pub use trigger::{evaluate, match_trigger, Evaluation, Trigger, TriggerAction, TRIGGERS};
