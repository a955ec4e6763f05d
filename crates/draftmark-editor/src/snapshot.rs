//! Snapshot codec: content state to and from a serializable structure.
//!
//! The stored JSON follows the raw block layout:
//!
//! ```json
//! {
//!   "version": 1,
//!   "blocks": [{
//!     "key": "01H...", "text": "Hello", "type": "header-one", "depth": 0,
//!     "inlineStyleRanges": [{ "offset": 0, "length": 5, "style": "BOLD" }],
//!     "entityRanges": [], "data": {}
//!   }],
//!   "entityMap": {}
//! }
//! ```
//!
//! Snapshots written before the `version` field existed are read as version 1.
//! Style range offsets and lengths count UTF-16 code units, as the browser
//! editor writes them; a range that splits a surrogate pair is malformed.

use crate::error::{EditorError, Result};
use draftmark_model::{Block, BlockKey, BlockType, ContentState, InlineStyle, StyleSet, EXCLUSIVE_STYLES};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

fn legacy_version() -> u32 {
    1
}

/// A contiguous run of one inline style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// A block in snapshot form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u32,
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Serializable document snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

/// Convert content into a snapshot.
pub fn serialize(content: &ContentState) -> Result<Snapshot> {
    let mut keys = HashSet::new();
    let mut blocks = Vec::with_capacity(content.block_count());

    for block in content.blocks() {
        if !keys.insert(block.key().as_str()) {
            return Err(EditorError::InvalidState(format!(
                "duplicate block key {}",
                block.key()
            )));
        }
        if block.text().chars().count() != block.styles().len() {
            return Err(EditorError::InvalidState(format!(
                "style list of block {} does not match its text",
                block.key()
            )));
        }
        blocks.push(RawBlock {
            key: block.key().to_string(),
            text: block.text().to_string(),
            block_type: block.block_type(),
            depth: 0,
            inline_style_ranges: encode_style_ranges(block.text(), block.styles()),
            entity_ranges: Vec::new(),
            data: Map::new(),
        });
    }

    Ok(Snapshot {
        version: SNAPSHOT_VERSION,
        blocks,
        entity_map: Map::new(),
    })
}

/// Rebuild content from a snapshot.
pub fn deserialize(snapshot: &Snapshot) -> Result<ContentState> {
    if snapshot.version == 0 || snapshot.version > SNAPSHOT_VERSION {
        return Err(EditorError::MalformedSnapshot(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }

    let mut keys = HashSet::new();
    let mut blocks = Vec::with_capacity(snapshot.blocks.len());

    for raw in &snapshot.blocks {
        let key = if raw.key.is_empty() {
            BlockKey::new()
        } else {
            BlockKey::from(raw.key.as_str())
        };
        if !keys.insert(key.clone()) {
            return Err(EditorError::MalformedSnapshot(format!(
                "duplicate block key {}",
                key
            )));
        }

        let styles = decode_style_ranges(raw)?;
        let block = Block::with_styles(key, raw.block_type, &raw.text, styles).ok_or_else(|| {
            EditorError::MalformedSnapshot(format!("block {} has inconsistent styles", raw.key))
        })?;
        blocks.push(block);
    }

    Ok(ContentState::from_blocks(blocks))
}

/// Serialize content straight to a JSON string.
pub fn to_json(content: &ContentState) -> Result<String> {
    let snapshot = serialize(content)?;
    serde_json::to_string(&snapshot)
        .map_err(|e| EditorError::InvalidState(format!("snapshot encoding failed: {}", e)))
}

/// Parse a JSON string and rebuild content from it.
pub fn from_json(json: &str) -> Result<ContentState> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    deserialize(&snapshot)
}

/// UTF-16 offset of every char boundary in `text`, end included.
fn utf16_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(text.len() + 1);
    let mut unit = 0;
    boundaries.push(unit);
    for ch in text.chars() {
        unit += ch.len_utf16();
        boundaries.push(unit);
    }
    boundaries
}

/// Maximal runs of each style, ordered by offset then style.
fn encode_style_ranges(text: &str, styles: &[StyleSet]) -> Vec<RawStyleRange> {
    let boundaries = utf16_boundaries(text);
    let mut ranges = Vec::new();
    for style in EXCLUSIVE_STYLES {
        let mut run_start: Option<usize> = None;
        for (offset, set) in styles.iter().enumerate() {
            match (set.contains(style), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    ranges.push(RawStyleRange {
                        offset: boundaries[start],
                        length: boundaries[offset] - boundaries[start],
                        style,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(RawStyleRange {
                offset: boundaries[start],
                length: boundaries[styles.len()] - boundaries[start],
                style,
            });
        }
    }
    ranges.sort_by(|a, b| a.offset.cmp(&b.offset).then(a.style.cmp(&b.style)));
    ranges
}

fn decode_style_ranges(raw: &RawBlock) -> Result<Vec<StyleSet>> {
    let boundaries = utf16_boundaries(&raw.text);
    let mut styles = vec![StyleSet::empty(); boundaries.len() - 1];

    for range in &raw.inline_style_ranges {
        let start = boundaries.binary_search(&range.offset).ok();
        let end = range
            .offset
            .checked_add(range.length)
            .and_then(|end| boundaries.binary_search(&end).ok());
        match (start, end) {
            (Some(start), Some(end)) if start < end => {
                for set in &mut styles[start..end] {
                    *set = set.with(range.style);
                }
            }
            _ => {
                return Err(EditorError::MalformedSnapshot(format!(
                    "style range {}+{} does not fit block {} of {} UTF-16 units",
                    range.offset,
                    range.length,
                    raw.key,
                    boundaries[boundaries.len() - 1]
                )))
            }
        }
    }
    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftmark_model::SelectionState;

    fn styled_content() -> ContentState {
        let content = ContentState::from_blocks(vec![
            Block::new("a".into(), BlockType::HeaderOne, "Title"),
            Block::new("b".into(), BlockType::Unstyled, "Hello World"),
        ]);
        content
            .apply_inline_style(&SelectionState::range("b".into(), 0, 5), InlineStyle::Bold)
            .apply_inline_style(&SelectionState::range("b".into(), 6, 11), InlineStyle::Red)
            .apply_inline_style(&SelectionState::range("b".into(), 3, 8), InlineStyle::Underline)
    }

    #[test]
    fn test_serialize_emits_maximal_runs() {
        let snapshot = serialize(&styled_content()).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.blocks.len(), 2);
        assert!(snapshot.blocks[0].inline_style_ranges.is_empty());
        assert_eq!(
            snapshot.blocks[1].inline_style_ranges,
            vec![
                RawStyleRange { offset: 0, length: 5, style: InlineStyle::Bold },
                RawStyleRange { offset: 3, length: 5, style: InlineStyle::Underline },
                RawStyleRange { offset: 6, length: 5, style: InlineStyle::Red },
            ]
        );
    }

    #[test]
    fn test_json_uses_raw_field_names() {
        let json = to_json(&styled_content()).unwrap();
        assert!(json.contains("\"inlineStyleRanges\""));
        assert!(json.contains("\"entityMap\""));
        assert!(json.contains("\"type\":\"header-one\""));
        assert!(json.contains("\"style\":\"BOLD\""));
    }

    #[test]
    fn test_round_trip() {
        let content = styled_content();
        let restored = from_json(&to_json(&content).unwrap()).unwrap();
        assert_eq!(restored.block_count(), content.block_count());
        for (a, b) in content.blocks().zip(restored.blocks()) {
            assert_eq!(a.text(), b.text());
            assert_eq!(a.block_type(), b.block_type());
            assert_eq!(a.styles(), b.styles());
        }
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        let content = ContentState::from_blocks(vec![Block::new("e".into(), BlockType::Unstyled, "😀 hi")])
            .apply_inline_style(&SelectionState::range("e".into(), 2, 4), InlineStyle::Bold);
        let snapshot = serialize(&content).unwrap();
        assert_eq!(
            snapshot.blocks[0].inline_style_ranges,
            vec![RawStyleRange { offset: 3, length: 2, style: InlineStyle::Bold }]
        );
    }

    #[test]
    fn test_browser_snapshot_with_astral_text_loads() {
        let json = r#"{"blocks":[{"key":"e","text":"😀 hi","type":"unstyled",
            "inlineStyleRanges":[{"offset":0,"length":2,"style":"RED"},{"offset":3,"length":2,"style":"BOLD"}]}]}"#;
        let block = from_json(json).unwrap().first_block().clone();
        assert!(block.has_style_at(0, InlineStyle::Red));
        assert!(!block.has_style_at(1, InlineStyle::Bold));
        assert!(block.has_style_at(2, InlineStyle::Bold));
        assert!(block.has_style_at(3, InlineStyle::Bold));
    }

    #[test]
    fn test_legacy_snapshot_without_version() {
        let json = r#"{"blocks":[{"key":"k1","text":"Hi","type":"unstyled","depth":0,
            "inlineStyleRanges":[{"offset":0,"length":2,"style":"RED"}],
            "entityRanges":[],"data":{}}],"entityMap":{}}"#;
        let content = from_json(json).unwrap();
        assert!(content.first_block().has_style_at(1, InlineStyle::Red));
    }

    #[test]
    fn test_empty_block_list_gives_one_block() {
        let content = from_json(r#"{"version":1,"blocks":[]}"#).unwrap();
        assert_eq!(content.block_count(), 1);
        assert!(content.first_block().is_empty());
    }

    #[test]
    fn test_empty_keys_are_regenerated() {
        let json = r#"{"blocks":[
            {"key":"","text":"a","type":"unstyled","inlineStyleRanges":[]},
            {"key":"","text":"b","type":"unstyled","inlineStyleRanges":[]}]}"#;
        let content = from_json(json).unwrap();
        assert_eq!(content.block_count(), 2);
        assert_ne!(content.first_block().key(), content.last_block().key());
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "not json",
            r#"{"version":1}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled"}]}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"paragraph","inlineStyleRanges":[]}]}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","inlineStyleRanges":[{"offset":0,"length":2,"style":"BOLD"}]}]}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","inlineStyleRanges":[{"offset":0,"length":0,"style":"BOLD"}]}]}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","inlineStyleRanges":[{"offset":0,"length":1,"style":"ITALIC"}]}]}"#,
            r#"{"blocks":[{"key":"a","text":"x","type":"unstyled","inlineStyleRanges":[]},{"key":"a","text":"y","type":"unstyled","inlineStyleRanges":[]}]}"#,
            r#"{"version":2,"blocks":[]}"#,
            r#"{"blocks":[{"key":"a","text":"😀","type":"unstyled","inlineStyleRanges":[{"offset":1,"length":1,"style":"BOLD"}]}]}"#,
        ];
        for json in cases {
            match from_json(json) {
                Err(EditorError::MalformedSnapshot(_)) => {}
                other => panic!("expected MalformedSnapshot for {json}, got {other:?}"),
            }
        }
    }
}
