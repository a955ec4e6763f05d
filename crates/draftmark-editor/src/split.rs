//! Paragraph-break handling.
//!
//! Splitting a block normally copies its type into the new block, so a
//! heading would spill into every following paragraph. The new block is
//! always reset to `unstyled` here.

use draftmark_model::{BlockType, ChangeType, EditorState};

/// Split the block at the selection and force the new block to `unstyled`.
///
/// A selection naming a block that is not in the document leaves the state
/// untouched and records no history.
pub fn on_split(state: &EditorState) -> EditorState {
    let current = state.current_content();
    let selection = state.selection();
    if current.block_for_key(&selection.anchor.key).is_none()
        || current.block_for_key(&selection.focus.key).is_none()
    {
        return state.clone();
    }

    let content = current.split_block(selection);
    let caret = content.selection_after().clone();
    let content = content
        .set_block_type(&caret, BlockType::Unstyled)
        .with_selection_after(caret);
    state.push(content, ChangeType::SplitBlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftmark_model::SelectionState;

    fn heading(text: &str) -> EditorState {
        EditorState::create_empty()
            .insert_characters(text)
            .toggle_block_type(BlockType::HeaderOne)
    }

    #[test]
    fn test_split_heading_mid_text() {
        let state = heading("Heading");
        let key = state.current_content().first_block().key().clone();
        let state = on_split(&state.force_selection(SelectionState::collapsed(key.clone(), 4)));
        let content = state.current_content();

        assert_eq!(content.block_count(), 2);
        assert_eq!(content.first_block().key(), &key);
        assert_eq!(content.first_block().text(), "Head");
        assert_eq!(content.first_block().block_type(), BlockType::HeaderOne);
        assert_eq!(content.last_block().text(), "ing");
        assert_eq!(content.last_block().block_type(), BlockType::Unstyled);
        assert_eq!(state.last_change_type(), Some(ChangeType::SplitBlock));
    }

    #[test]
    fn test_caret_lands_in_new_block() {
        let state = on_split(&heading("Title"));
        let content = state.current_content();
        assert_eq!(&state.selection().anchor.key, content.last_block().key());
        assert_eq!(state.selection().anchor.offset, 0);
    }

    #[test]
    fn test_split_range_selection_removes_it() {
        let state = EditorState::create_empty().insert_characters("abcdef");
        let key = state.current_content().first_block().key().clone();
        let state = on_split(&state.force_selection(SelectionState::range(key, 2, 4)));
        let content = state.current_content();

        assert_eq!(content.first_block().text(), "ab");
        assert_eq!(content.last_block().text(), "ef");
    }

    #[test]
    fn test_missing_block_leaves_document_alone() {
        let stale = heading("Title").force_selection(SelectionState::collapsed("gone".into(), 0));
        let depth = stale.undo_depth();
        let state = on_split(&stale);
        let content = state.current_content();

        assert_eq!(content.block_count(), 1);
        assert_eq!(content.first_block().text(), "Title");
        assert_eq!(content.first_block().block_type(), BlockType::HeaderOne);
        assert_eq!(state.undo_depth(), depth);
        assert_eq!(state.selection(), stale.selection());
    }
}
