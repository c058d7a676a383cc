//! Markdown parsing into MDAST via markdown-rs.

use markdown::mdast::Node;
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Parse raw HTML into `Html` nodes instead of text.
    pub raw_html: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl MarkdownOptions {
    /// Defaults used for wiki migration: GFM plus raw HTML passthrough.
    pub const fn wiki() -> Self {
        Self {
            gfm: true,
            raw_html: true,
            code_indented: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self::wiki()
    }
}

/// markdown-rs rejected the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Markdown parse error at {line}:{column}: {message}")]
pub struct MarkdownParseError {
    /// Parser message
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Parse markdown into an MDAST tree.
pub fn parse_mdast(input: &str, options: &MarkdownOptions) -> Result<Node, MarkdownParseError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        let (line, column) = message_location(&err);
        MarkdownParseError {
            message: err.reason.clone(),
            line,
            column,
        }
    })
}

fn message_location(message: &Message) -> (usize, usize) {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => (point.line, point.column),
            Place::Position(position) => (position.start.line, position.start.column),
        },
        None => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiki_defaults_enable_tables_and_html() {
        let options = MarkdownOptions::default().to_markdown();
        assert!(options.constructs.gfm_table);
        assert!(options.constructs.gfm_strikethrough);
        assert!(options.constructs.html_flow);
        assert!(!options.constructs.mdx_jsx_flow);
    }

    #[test]
    fn parses_gfm_table() {
        let root = parse_mdast("| a | b |\n|---|:-:|\n| 1 | 2 |", &MarkdownOptions::default())
            .unwrap();
        let children = root.children().unwrap();
        assert!(matches!(children[0], Node::Table(_)));
    }

    #[test]
    fn html_is_text_when_disabled() {
        let options = MarkdownOptions {
            raw_html: false,
            ..MarkdownOptions::default()
        };
        let root = parse_mdast("<div>x</div>", &options).unwrap();
        let children = root.children().unwrap();
        assert!(matches!(children[0], Node::Paragraph(_)));
    }
}
