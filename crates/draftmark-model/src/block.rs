//! Blocks: the structural units of a document.

use crate::style::{InlineStyle, StyleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Unique key of a block within a content state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    /// Generate a fresh key.
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockKey {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The structural type of a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    /// Plain paragraph.
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
}

impl BlockType {
    pub fn tag(&self) -> &'static str {
        match self {
            BlockType::Unstyled => "unstyled",
            BlockType::HeaderOne => "header-one",
            BlockType::HeaderTwo => "header-two",
            BlockType::HeaderThree => "header-three",
            BlockType::Blockquote => "blockquote",
            BlockType::UnorderedListItem => "unordered-list-item",
            BlockType::OrderedListItem => "ordered-list-item",
            BlockType::CodeBlock => "code-block",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A block of text with a type and one style set per character.
///
/// Offsets are character offsets, never byte offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: Vec<StyleSet>,
}

impl Block {
    /// Create an empty unstyled block with a fresh key.
    pub fn empty() -> Self {
        Self::new(BlockKey::new(), BlockType::Unstyled, "")
    }

    /// Create an unstyled-text block.
    pub fn new(key: BlockKey, block_type: BlockType, text: &str) -> Self {
        let styles = vec![StyleSet::empty(); text.chars().count()];
        Self {
            key,
            block_type,
            text: text.to_string(),
            styles,
        }
    }

    /// Create a block from text and a matching style list.
    ///
    /// Returns `None` when the style list length differs from the text length.
    pub fn with_styles(
        key: BlockKey,
        block_type: BlockType,
        text: &str,
        styles: Vec<StyleSet>,
    ) -> Option<Self> {
        if text.chars().count() != styles.len() {
            return None;
        }
        Some(Self {
            key,
            block_type,
            text: text.to_string(),
            styles,
        })
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Text from the start of the block up to `offset` (clamped).
    pub fn text_before(&self, offset: usize) -> &str {
        &self.text[..self.byte_offset(offset)]
    }

    /// Style of the character at `offset`, if any.
    pub fn style_at(&self, offset: usize) -> Option<StyleSet> {
        self.styles.get(offset).copied()
    }

    pub fn has_style_at(&self, offset: usize, style: InlineStyle) -> bool {
        self.style_at(offset).is_some_and(|set| set.contains(style))
    }

    pub(crate) fn with_type(&self, block_type: BlockType) -> Self {
        let mut block = self.clone();
        block.block_type = block_type;
        block
    }

    /// Replace characters `[start, end)` with `text` styled as `style`.
    pub(crate) fn splice(&self, start: usize, end: usize, text: &str, style: StyleSet) -> Self {
        let start = start.min(self.len());
        let end = end.clamp(start, self.len());
        let (start_byte, end_byte) = (self.byte_offset(start), self.byte_offset(end));

        let mut new_text = String::with_capacity(self.text.len() + text.len());
        new_text.push_str(&self.text[..start_byte]);
        new_text.push_str(text);
        new_text.push_str(&self.text[end_byte..]);

        let mut styles = Vec::with_capacity(self.len() + text.len());
        styles.extend_from_slice(&self.styles[..start]);
        styles.extend(std::iter::repeat(style).take(text.chars().count()));
        styles.extend_from_slice(&self.styles[end..]);

        Self {
            key: self.key.clone(),
            block_type: self.block_type,
            text: new_text,
            styles,
        }
    }

    /// Map the style sets of characters `[start, end)` (clamped).
    pub(crate) fn restyle(&self, start: usize, end: usize, f: impl Fn(StyleSet) -> StyleSet) -> Self {
        let start = start.min(self.len());
        let end = end.clamp(start, self.len());
        let mut block = self.clone();
        for set in &mut block.styles[start..end] {
            *set = f(*set);
        }
        block
    }

    /// Split at `offset`: the left part keeps this key, the right part takes `right_key`.
    pub(crate) fn split_at(&self, offset: usize, right_key: BlockKey) -> (Self, Self) {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);
        let left = Self {
            key: self.key.clone(),
            block_type: self.block_type,
            text: self.text[..byte].to_string(),
            styles: self.styles[..offset].to_vec(),
        };
        let right = Self {
            key: right_key,
            block_type: self.block_type,
            text: self.text[byte..].to_string(),
            styles: self.styles[offset..].to_vec(),
        };
        (left, right)
    }

    /// Append another block's text and styles, keeping this block's key and type.
    pub(crate) fn join(&self, other: &Block) -> Self {
        let mut block = self.clone();
        block.text.push_str(&other.text);
        block.styles.extend_from_slice(&other.styles);
        block
    }

    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_counts_characters() {
        let block = Block::new("a".into(), BlockType::Unstyled, "héllo");
        let spliced = block.splice(1, 2, "e", StyleSet::from(InlineStyle::Bold));
        assert_eq!(spliced.text(), "hello");
        assert_eq!(spliced.len(), 5);
        assert!(spliced.has_style_at(1, InlineStyle::Bold));
        assert!(!spliced.has_style_at(0, InlineStyle::Bold));
    }

    #[test]
    fn test_text_before_clamps() {
        let block = Block::new("a".into(), BlockType::Unstyled, "**x");
        assert_eq!(block.text_before(2), "**");
        assert_eq!(block.text_before(99), "**x");
    }

    #[test]
    fn test_split_copies_type() {
        let block = Block::new("a".into(), BlockType::HeaderOne, "Title");
        let (left, right) = block.split_at(2, "b".into());
        assert_eq!(left.text(), "Ti");
        assert_eq!(right.text(), "tle");
        assert_eq!(right.block_type(), BlockType::HeaderOne);
        assert_eq!(left.key().as_str(), "a");
        assert_eq!(right.key().as_str(), "b");
    }

    #[test]
    fn test_with_styles_rejects_length_mismatch() {
        assert!(Block::with_styles("a".into(), BlockType::Unstyled, "ab", vec![]).is_none());
    }

    #[test]
    fn test_block_type_tags() {
        let json = serde_json::to_string(&BlockType::HeaderOne).unwrap();
        assert_eq!(json, "\"header-one\"");
        assert_eq!(BlockType::UnorderedListItem.tag(), "unordered-list-item");
    }
}
