//! Property-based tests for the document model
//!
//! These check the invariants every reachable state must satisfy:
//!  - every block carries exactly one style set per character
//!  - block keys are unique
//!  - the document is never empty
//!  - operations never modify the state they were called on

use draftmark_model::{BlockType, EditorState, InlineStyle, SelectionState};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
enum Edit {
    Type(String),
    Backspace,
    Split,
    ToggleStyle(InlineStyle),
    ToggleBlock(BlockType),
    SelectInBlock(usize, usize),
    Undo,
    Redo,
}

fn style_strategy() -> impl Strategy<Value = InlineStyle> {
    prop_oneof![
        Just(InlineStyle::Bold),
        Just(InlineStyle::Red),
        Just(InlineStyle::Underline),
    ]
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => "[a-z #*é]{1,4}".prop_map(Edit::Type),
        2 => Just(Edit::Backspace),
        1 => Just(Edit::Split),
        1 => style_strategy().prop_map(Edit::ToggleStyle),
        1 => prop_oneof![Just(BlockType::HeaderOne), Just(BlockType::Blockquote)].prop_map(Edit::ToggleBlock),
        1 => (0usize..8, 0usize..8).prop_map(|(a, b)| Edit::SelectInBlock(a, b)),
        1 => Just(Edit::Undo),
        1 => Just(Edit::Redo),
    ]
}

fn apply(state: &EditorState, edit: &Edit) -> EditorState {
    match edit {
        Edit::Type(text) => state.insert_characters(text),
        Edit::Backspace => state.backspace(),
        Edit::Split => {
            let content = state.current_content().split_block(state.selection());
            state.push(content, draftmark_model::ChangeType::SplitBlock)
        }
        Edit::ToggleStyle(style) => state.toggle_inline_style(*style),
        Edit::ToggleBlock(block_type) => state.toggle_block_type(*block_type),
        Edit::SelectInBlock(a, b) => {
            let key = state.selection().focus.key.clone();
            state.force_selection(SelectionState::range(key, *a, *b))
        }
        Edit::Undo => state.undo(),
        Edit::Redo => state.redo(),
    }
}

fn assert_well_formed(state: &EditorState) {
    let content = state.current_content();
    assert!(content.block_count() >= 1);

    let mut keys = HashSet::new();
    for block in content.blocks() {
        assert_eq!(block.text().chars().count(), block.styles().len());
        assert!(keys.insert(block.key().clone()), "duplicate key {}", block.key());
    }
}

proptest! {
    #[test]
    fn reachable_states_are_well_formed(edits in prop::collection::vec(edit_strategy(), 0..40)) {
        let mut state = EditorState::create_empty();
        for edit in &edits {
            state = apply(&state, edit);
            assert_well_formed(&state);
        }
    }

    #[test]
    fn operations_leave_the_previous_state_untouched(
        edits in prop::collection::vec(edit_strategy(), 1..20),
        last in edit_strategy()
    ) {
        let mut state = EditorState::create_empty();
        for edit in &edits {
            state = apply(&state, edit);
        }
        let before = state.current_content().clone();
        let _after = apply(&state, &last);
        prop_assert_eq!(state.current_content(), &before);
    }

    #[test]
    fn undo_after_push_restores_content(text in "[a-z]{1,10}") {
        let state = EditorState::create_empty().insert_characters("base");
        let before = state.current_content().clone();
        let changed = state.toggle_block_type(BlockType::HeaderOne).insert_characters(&text);
        let restored = changed.undo().undo();
        prop_assert_eq!(restored.current_content().plain_text(), before.plain_text());
        prop_assert_eq!(restored.current_content().first_block().block_type(), BlockType::Unstyled);
    }
}
