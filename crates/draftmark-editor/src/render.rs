//! Style rendering map and HTML export.

use draftmark_model::{Block, BlockType, ContentState, InlineStyle, StyleSet};
use std::collections::HashMap;

/// Maps each inline style to a CSS declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleMap {
    rules: HashMap<InlineStyle, String>,
}

impl StyleMap {
    /// The CSS declaration for `style`.
    pub fn css(&self, style: InlineStyle) -> Option<&str> {
        self.rules.get(&style).map(String::as_str)
    }

    /// Override the rule for one style.
    pub fn with_rule(mut self, style: InlineStyle, css: impl Into<String>) -> Self {
        self.rules.insert(style, css.into());
        self
    }

    /// Combined declarations for a style set, in tag order.
    pub fn css_for(&self, styles: StyleSet) -> String {
        styles
            .iter()
            .filter_map(|style| self.css(style))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        let rules = HashMap::from([
            (InlineStyle::Bold, "font-weight: bold".to_string()),
            (InlineStyle::Red, "color: red".to_string()),
            (InlineStyle::Underline, "text-decoration: underline".to_string()),
        ]);
        Self { rules }
    }
}

/// Render content as HTML, one element per block.
pub fn render_html(content: &ContentState, style_map: &StyleMap) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in content.blocks() {
        let list = list_tag(block.block_type());
        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        let tag = block_tag(block.block_type());
        html.push_str(&format!("<{}>", tag));
        render_runs(block, style_map, &mut html);
        html.push_str(&format!("</{}>", tag));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }
    html
}

fn block_tag(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Unstyled => "p",
        BlockType::HeaderOne => "h1",
        BlockType::HeaderTwo => "h2",
        BlockType::HeaderThree => "h3",
        BlockType::Blockquote => "blockquote",
        BlockType::UnorderedListItem | BlockType::OrderedListItem => "li",
        BlockType::CodeBlock => "pre",
    }
}

fn list_tag(block_type: BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::UnorderedListItem => Some("ul"),
        BlockType::OrderedListItem => Some("ol"),
        _ => None,
    }
}

/// Emit the block text, wrapping runs of equal style in spans.
fn render_runs(block: &Block, style_map: &StyleMap, html: &mut String) {
    let mut run = String::new();
    let mut run_style = StyleSet::empty();

    for (ch, style) in block.text().chars().zip(block.styles().iter().copied()) {
        if style != run_style && !run.is_empty() {
            flush_run(&run, run_style, style_map, html);
            run.clear();
        }
        run_style = style;
        push_escaped(&mut run, ch);
    }
    if !run.is_empty() {
        flush_run(&run, run_style, style_map, html);
    }
}

fn flush_run(run: &str, style: StyleSet, style_map: &StyleMap, html: &mut String) {
    let css = style_map.css_for(style);
    if css.is_empty() {
        html.push_str(run);
    } else {
        html.push_str(&format!("<span style=\"{}\">{}</span>", css, run));
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftmark_model::SelectionState;

    #[test]
    fn test_default_style_map() {
        let map = StyleMap::default();
        assert_eq!(map.css(InlineStyle::Bold), Some("font-weight: bold"));
        assert_eq!(map.css(InlineStyle::Red), Some("color: red"));
        assert_eq!(map.css(InlineStyle::Underline), Some("text-decoration: underline"));
    }

    #[test]
    fn test_html_rendering() {
        let content = ContentState::from_blocks(vec![
            Block::new("a".into(), BlockType::HeaderOne, "Title"),
            Block::new("b".into(), BlockType::Unstyled, "Hello World"),
        ])
        .apply_inline_style(&SelectionState::range("b".into(), 0, 5), InlineStyle::Bold);

        let html = render_html(&content, &StyleMap::default());
        assert_eq!(
            html,
            "<h1>Title</h1><p><span style=\"font-weight: bold\">Hello</span> World</p>"
        );
    }

    #[test]
    fn test_list_items_are_grouped_and_text_escaped() {
        let content = ContentState::from_blocks(vec![
            Block::new("a".into(), BlockType::UnorderedListItem, "a<b"),
            Block::new("b".into(), BlockType::UnorderedListItem, "c&d"),
            Block::new("c".into(), BlockType::Unstyled, "end"),
        ]);
        let html = render_html(&content, &StyleMap::default());
        assert_eq!(html, "<ul><li>a&lt;b</li><li>c&amp;d</li></ul><p>end</p>");
    }

    #[test]
    fn test_custom_rule() {
        let map = StyleMap::default().with_rule(InlineStyle::Red, "color: crimson");
        assert_eq!(map.css_for(StyleSet::from(InlineStyle::Red)), "color: crimson");
    }
}
