//! Markdown to Mycomarkup conversion over the markdown-rs AST (MDAST).
//!
//! # Module Structure
//!
//! - `context` - Output buffer and scope stack used during traversal
//! - `render` - Node rendering functions

mod context;
mod render;

pub use context::{Context, Definition, Scope};

use crate::{Conversion, ConvertOptions};
use markdown::mdast::Node;
use mycomd_core::{Warnings, parse_mdast};
use render::{collect_definitions, render_node};

/// Convert a parsed Markdown tree to Mycomarkup.
///
/// `root` is normally a `Node::Root`; any other node is converted as if it
/// were the only top-level block of a document.
pub fn markdown_to_myco(root: &Node) -> Conversion {
    let mut ctx = Context::new();
    collect_definitions(root, &mut ctx);
    if !matches!(root, Node::Root(_)) {
        ctx.start_block();
    }
    render_node(root, &mut ctx);
    ctx.finish()
}

/// Parse Markdown text and convert it to Mycomarkup.
///
/// If markdown-rs rejects the input, the text is returned unchanged with a
/// single warning.
pub fn convert_source(content: &str, options: &ConvertOptions) -> Conversion {
    log::trace!("converting {} bytes of Markdown", content.len());
    match parse_mdast(content, &options.markdown) {
        Ok(root) => markdown_to_myco(&root),
        Err(err) => {
            log::warn!("Markdown rejected, returning it unconverted: {}", err);
            let mut warnings = Warnings::new();
            warnings.push(format!("{err}; content was not converted"));
            Conversion::new(content.to_string(), warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::{Paragraph, Text};

    fn myco(markdown: &str) -> String {
        convert_source(markdown, &ConvertOptions::default()).text
    }

    #[test]
    fn headings_keep_their_depth() {
        assert_eq!(myco("# Title"), "= Title\n");
        assert_eq!(myco("### Deeper"), "=== Deeper\n");
    }

    #[test]
    fn top_level_blocks_are_separated_by_blank_lines() {
        insta::assert_snapshot!(myco("# One\n\nSome text.\n\n---\n\n## Two"), @r"
        = One

        Some text.

        ----

        == Two
        ");
    }

    #[test]
    fn emphasis_and_strong() {
        assert_eq!(myco("_italic_"), "//italic//\n");
        assert_eq!(myco("**bold**"), "**bold**\n");
        assert_eq!(myco("***both***"), "**//both//**\n");
        assert_eq!(myco("~~gone~~"), "~~gone~~\n");
        assert_eq!(myco("use `cargo`"), "use `cargo`\n");
    }

    #[test]
    fn links_drop_redundant_text() {
        assert_eq!(myco("[Page](Page)"), "[[Page]]\n");
        assert_eq!(
            myco("[Google](https://google.com)"),
            "[[https://google.com | Google]]\n"
        );
    }

    #[test]
    fn images_become_img_blocks() {
        assert_eq!(myco("![Alt text](image.png)"), "img { image.png | Alt text }\n");
        assert_eq!(myco("![](image.png)"), "img { image.png }\n");
        assert_eq!(
            myco(r#"![alt](a.png "Title")"#),
            "img { a.png | Title }\n"
        );
    }

    #[test]
    fn reference_links_and_images_use_their_definitions() {
        assert_eq!(
            myco("[Google][g]\n\n[g]: https://google.com"),
            "[[https://google.com | Google]]\n"
        );
        assert_eq!(myco("![Alt][i]\n\n[i]: image.png"), "img { image.png | Alt }\n");
        assert_eq!(
            myco("See [docs] and ![logo][].\n\n[Docs]: /docs\n[logo]: logo.png \"The logo\""),
            "See [[/docs | docs]] and img { logo.png | The logo }.\n"
        );
    }

    #[test]
    fn definitions_inside_quotes_are_found() {
        assert!(
            myco("[site][s]\n\n> [s]: https://site.example")
                .starts_with("[[https://site.example | site]]\n")
        );
    }

    #[test]
    fn code_blocks_keep_language() {
        assert_eq!(
            myco("```rust\nfn main() {}\n```"),
            "```rust\nfn main() {}\n```\n"
        );
        assert_eq!(myco("```\n```"), "```\n```\n");
    }

    #[test]
    fn lists_nest_with_tabs() {
        assert_eq!(myco("- a\n  - b\n    - c\n- d"), "* a\n\t* b\n\t\t* c\n* d\n");
        assert_eq!(myco("1. First\n2. Second"), "*. First\n*. Second\n");
    }

    #[test]
    fn task_items_use_todo_markers() {
        assert_eq!(myco("- [x] done\n- [ ] open"), "*v done\n*x open\n");
    }

    #[test]
    fn blockquote_prefixes_each_child() {
        assert_eq!(myco("> quoted\n>\n> again"), "> quoted\n> again\n");
        assert_eq!(myco("> # Head"), "> = Head\n");
    }

    #[test]
    fn tables_use_header_marker_for_aligned_columns() {
        insta::assert_snapshot!(myco("| a | b |\n|:--|---|\n| 1 | 2 |"), @r"
        table {
        ! a | b
        ! 1 | 2
        }
        ");
    }

    #[test]
    fn raw_html_passes_through() {
        assert_eq!(myco("<div>hi</div>"), "<div>hi</div>\n");
        assert_eq!(myco("a <b>b</b> c"), "a <b>b</b> c\n");
    }

    #[test]
    fn non_root_nodes_convert_as_a_document() {
        let paragraph = Node::Paragraph(Paragraph {
            children: vec![Node::Text(Text {
                value: "alone".into(),
                position: None,
            })],
            position: None,
        });
        assert_eq!(markdown_to_myco(&paragraph).text, "alone\n");
    }

    #[test]
    fn empty_document_is_empty() {
        let conversion = convert_source("", &ConvertOptions::default());
        assert_eq!(conversion.text, "");
        assert!(conversion.warnings.is_empty());
    }
}
