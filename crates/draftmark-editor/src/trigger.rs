//! Inline markup triggers.
//!
//! When a space is typed and the text between the start of the block and
//! the caret is exactly one of the trigger patterns, the pattern is removed,
//! every exclusive inline style is cleared from the whole block, and the
//! pattern's action is applied:
//!
//! | pattern | action |
//! |---|---|
//! | `***` | toggle `UNDERLINE` |
//! | `**`  | toggle `RED` |
//! | `#`   | block type `header-one` |
//! | `*`   | toggle `BOLD` |
//!
//! Text before the pattern (e.g. `"x#"`) never matches.

use draftmark_model::{
    BlockType, ChangeType, ContentState, EditorState, InlineStyle, SelectionState, StyleSet,
    EXCLUSIVE_STYLES,
};
use tracing::debug;

/// The character that completes every trigger.
pub const TRIGGER_TERMINATOR: char = ' ';

/// What a trigger does once its pattern is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    /// Sets the type outright: `#` on a block that is already `header-one`
    /// keeps it a heading instead of toggling back to `unstyled`.
    SetBlockType(BlockType),
    ToggleInlineStyle(InlineStyle),
}

impl TriggerAction {
    pub fn change_type(&self) -> ChangeType {
        match self {
            TriggerAction::SetBlockType(_) => ChangeType::ChangeBlockType,
            TriggerAction::ToggleInlineStyle(_) => ChangeType::ChangeInlineStyle,
        }
    }
}

/// A literal pattern and its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub pattern: &'static str,
    pub action: TriggerAction,
}

impl Trigger {
    /// Number of characters the pattern consumes.
    pub fn consumed(&self) -> usize {
        self.pattern.chars().count()
    }
}

/// The trigger table, longest pattern first.
pub const TRIGGERS: [Trigger; 4] = [
    Trigger {
        pattern: "***",
        action: TriggerAction::ToggleInlineStyle(InlineStyle::Underline),
    },
    Trigger {
        pattern: "**",
        action: TriggerAction::ToggleInlineStyle(InlineStyle::Red),
    },
    Trigger {
        pattern: "#",
        action: TriggerAction::SetBlockType(BlockType::HeaderOne),
    },
    Trigger {
        pattern: "*",
        action: TriggerAction::ToggleInlineStyle(InlineStyle::Bold),
    },
];

/// Outcome of offering a character to the trigger engine.
#[derive(Clone, Debug)]
pub enum Evaluation {
    /// The character completed a trigger; this is the new state.
    Handled(EditorState),
    /// Insert the character normally.
    NotHandled,
}

impl Evaluation {
    pub fn is_handled(&self) -> bool {
        matches!(self, Evaluation::Handled(_))
    }

    pub fn into_state(self) -> Option<EditorState> {
        match self {
            Evaluation::Handled(state) => Some(state),
            Evaluation::NotHandled => None,
        }
    }
}

/// Find the trigger whose pattern equals `text_before` exactly.
pub fn match_trigger(text_before: &str) -> Option<&'static Trigger> {
    TRIGGERS.iter().find(|trigger| trigger.pattern == text_before)
}

/// Decide whether `input` completes a trigger at the caret.
pub fn evaluate(input: char, state: &EditorState) -> Evaluation {
    if input != TRIGGER_TERMINATOR {
        return Evaluation::NotHandled;
    }
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Evaluation::NotHandled;
    }
    let content = state.current_content();
    let key = &selection.anchor.key;
    let Some(block) = content.block_for_key(key) else {
        return Evaluation::NotHandled;
    };
    if block.is_empty() || selection.anchor.offset > block.len() {
        return Evaluation::NotHandled;
    }
    let Some(trigger) = match_trigger(block.text_before(selection.anchor.offset)) else {
        return Evaluation::NotHandled;
    };

    debug!(pattern = trigger.pattern, block = %key, "markup trigger fired");

    let full_len = block.len();
    let content = consume_pattern(content, trigger, &SelectionState::range(key.clone(), 0, full_len));
    let next = match trigger.action {
        TriggerAction::SetBlockType(block_type) => {
            let caret = content.selection_after().clone();
            let content = content
                .set_block_type(&caret, block_type)
                .with_selection_after(caret);
            let pushed = state.push(content, trigger.action.change_type());
            let pending = pushed.current_inline_style().without_exclusive();
            pushed.set_inline_style_override(pending)
        }
        TriggerAction::ToggleInlineStyle(style) => {
            let pushed = state.push(content, trigger.action.change_type());
            let pending = pushed.current_inline_style().without_exclusive();
            pushed
                .set_inline_style_override(pending)
                .toggle_inline_style(style)
        }
    };
    Evaluation::Handled(next)
}

/// Remove the pattern from the start of the block and clear every
/// exclusive style across `whole_block` (the pre-removal span).
fn consume_pattern(
    content: &ContentState,
    trigger: &Trigger,
    whole_block: &SelectionState,
) -> ContentState {
    let key = whole_block.anchor.key.clone();
    let pattern = SelectionState::range(key, 0, trigger.consumed());
    let removed = content.replace_text(&pattern, "", StyleSet::empty());
    let caret = removed.selection_after().clone();

    EXCLUSIVE_STYLES
        .iter()
        .fold(removed, |content, style| {
            content.remove_inline_style(whole_block, *style)
        })
        .with_selection_after(caret)
}
