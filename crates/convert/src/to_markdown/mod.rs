//! Mycomarkup to Markdown conversion over the Mycomarkup block tree.
//!
//! Constructs Markdown has no syntax for fall back to inline HTML
//! (tables, galleries, launchpads, superscript and friends). Transclusions
//! have no fallback at all: they become a comment and raise a warning.

mod context;
mod render;

pub use context::Context;
pub use render::TRANSCLUSION_PLACEHOLDER;

use crate::{Conversion, ConvertOptions};
use mycomd_core::LinkResolver;
use mycomd_core::myco::{Block, parse_blocks};
use render::render_block;

/// Default spaces per list nesting level.
pub const DEFAULT_LIST_INDENT: usize = 4;

/// Convert a Mycomarkup block tree to Markdown.
///
/// Top-level blocks are separated by one blank line.
pub fn myco_to_markdown(blocks: &[Block], resolver: &dyn LinkResolver) -> Conversion {
    myco_to_markdown_with_indent(blocks, resolver, DEFAULT_LIST_INDENT)
}

/// Like [`myco_to_markdown`], with a custom list indentation width.
pub fn myco_to_markdown_with_indent(
    blocks: &[Block],
    resolver: &dyn LinkResolver,
    list_indent: usize,
) -> Conversion {
    let mut ctx = Context::new(resolver, list_indent);
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            ctx.push_raw("\n");
        }
        render_block(block, &mut ctx, 0);
    }
    ctx.finish()
}

/// Parse Mycomarkup text and convert it to Markdown.
pub fn convert_source(content: &str, options: &ConvertOptions) -> Conversion {
    log::trace!("converting {} bytes of Mycomarkup", content.len());
    let blocks = parse_blocks(content);
    let resolver = options.resolver();
    myco_to_markdown_with_indent(&blocks, &resolver, options.list_indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycomd_core::WikiLinkResolver;
    use mycomd_core::myco::UnknownBlock;

    fn markdown(myco: &str) -> String {
        convert_source(myco, &ConvertOptions::default()).text
    }

    #[test]
    fn headings() {
        assert_eq!(markdown("= Heading 1"), "# Heading 1\n");
        assert_eq!(
            markdown("= Heading 1\n== Heading 2\n=== Heading 3"),
            "# Heading 1\n\n## Heading 2\n\n### Heading 3\n"
        );
    }

    #[test]
    fn paragraph_with_link() {
        assert_eq!(
            markdown("Check out [[Page]] for more info."),
            "Check out [Page](Page) for more info.\n"
        );
    }

    #[test]
    fn paragraph_lines_stay_separate() {
        assert_eq!(markdown("one\ntwo"), "one\ntwo\n");
    }

    #[test]
    fn lists() {
        assert_eq!(
            markdown("* Item 1\n* Item 2\n* Item 3"),
            "- Item 1\n- Item 2\n- Item 3\n"
        );
        assert_eq!(
            markdown("*. First\n*. Second\n*. Third"),
            "1. First\n1. Second\n1. Third\n"
        );
    }

    #[test]
    fn list_indent_is_configurable() {
        let options = ConvertOptions {
            list_indent: 2,
            ..ConvertOptions::default()
        };
        assert_eq!(
            convert_source("* a\n\t* b", &options).text,
            "- a\n  - b\n"
        );
    }

    #[test]
    fn thematic_break() {
        assert_eq!(markdown("----"), "---\n");
    }

    #[test]
    fn unknown_block_becomes_comment() {
        let blocks = vec![Block::Unknown(UnknownBlock {
            kind: "poll".into(),
        })];
        let conversion = myco_to_markdown(&blocks, &WikiLinkResolver::new());
        assert_eq!(conversion.text, "<!-- Unknown block type: poll -->\n");
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn transclusion_in_document() {
        let conversion = convert_source("before\n<= Other page\nafter", &ConvertOptions::default());
        assert_eq!(
            conversion.text,
            format!("before\n\n{}\nafter\n", TRANSCLUSION_PLACEHOLDER)
        );
        assert_eq!(conversion.warnings.len(), 1);
    }

    #[test]
    fn empty_input() {
        let conversion = convert_source("", &ConvertOptions::default());
        assert_eq!(conversion.text, "");
        assert!(conversion.warnings.is_empty());
    }
}
