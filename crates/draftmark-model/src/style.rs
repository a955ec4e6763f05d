//! Inline styles and per-character style sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inline (character-range) style tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InlineStyle {
    /// Bold weight.
    Bold,
    /// Red foreground color.
    Red,
    /// Underline decoration.
    Underline,
}

/// The styles that are mutually exclusive on a character run.
pub const EXCLUSIVE_STYLES: [InlineStyle; 3] =
    [InlineStyle::Bold, InlineStyle::Red, InlineStyle::Underline];

impl InlineStyle {
    /// The tag used in snapshots and style maps.
    pub fn tag(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Red => "RED",
            InlineStyle::Underline => "UNDERLINE",
        }
    }

    fn bit(self) -> u8 {
        match self {
            InlineStyle::Bold => 0b001,
            InlineStyle::Red => 0b010,
            InlineStyle::Underline => 0b100,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A set of inline styles carried by a single character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(u8);

impl StyleSet {
    /// The empty style set.
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    pub fn with(self, style: InlineStyle) -> Self {
        Self(self.0 | style.bit())
    }

    pub fn without(self, style: InlineStyle) -> Self {
        Self(self.0 & !style.bit())
    }

    /// Toggle a style: remove it if present, add it otherwise.
    pub fn toggled(self, style: InlineStyle) -> Self {
        if self.contains(style) {
            self.without(style)
        } else {
            self.with(style)
        }
    }

    /// Drop every style in `EXCLUSIVE_STYLES`.
    pub fn without_exclusive(self) -> Self {
        EXCLUSIVE_STYLES
            .iter()
            .fold(self, |set, style| set.without(*style))
    }

    /// Iterate the styles in tag order.
    pub fn iter(&self) -> impl Iterator<Item = InlineStyle> + '_ {
        EXCLUSIVE_STYLES
            .iter()
            .copied()
            .filter(move |style| self.contains(*style))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(StyleSet::empty(), StyleSet::with)
    }
}

impl From<InlineStyle> for StyleSet {
    fn from(style: InlineStyle) -> Self {
        StyleSet::empty().with(style)
    }
}
