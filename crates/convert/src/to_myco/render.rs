//! MDAST node rendering to Mycomarkup text.

use super::context::{Context, Definition, Scope};
use markdown::mdast::{self, AlignKind, Node, ReferenceKind};

/// Records every link reference definition under `node`, so references
/// resolve wherever their definition appears.
pub fn collect_definitions(node: &Node, ctx: &mut Context) {
    if let Node::Definition(definition) = node {
        ctx.define(
            &definition.identifier,
            Definition {
                url: definition.url.clone(),
                title: definition.title.clone(),
            },
        );
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, ctx);
        }
    }
}

/// Recursively renders an AST node to Mycomarkup, updating the context state.
pub fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                let rendered = ctx.capture(|ctx| render_node(child, ctx));
                if !rendered.is_empty() {
                    ctx.start_block();
                    ctx.push_raw(&rendered);
                }
            }
        }
        Node::Heading(heading) => render_heading(heading, ctx),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Code(code) => render_code(code, ctx),
        Node::ThematicBreak(_) => ctx.push_raw("----\n"),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Blockquote(quote) => render_blockquote(quote, ctx),
        Node::Table(table) => render_table(table, ctx),
        Node::Html(html) => {
            ctx.push_raw(&html.value);
            ctx.push_raw("\n");
        }
        _ => {
            log::debug!("Skipping markdown node without a block rendering: {:?}", node);
        }
    }
}

fn render_heading(heading: &mdast::Heading, ctx: &mut Context) {
    ctx.push_raw(&"=".repeat(usize::from(heading.depth)));
    ctx.push_raw(" ");
    render_inline_children(&heading.children, ctx);
    ctx.push_raw("\n");
}

/// Only top-level paragraphs are rendered here; list items and blockquotes
/// inline their paragraphs themselves.
fn render_paragraph(para: &mdast::Paragraph, ctx: &mut Context) {
    if !ctx.is_top_level() {
        return;
    }
    render_inline_children(&para.children, ctx);
    ctx.push_raw("\n");
}

fn render_code(code: &mdast::Code, ctx: &mut Context) {
    ctx.push_raw("```");
    if let Some(lang) = &code.lang {
        ctx.push_raw(lang);
    }
    ctx.push_raw("\n");
    if !code.value.is_empty() {
        ctx.push_raw(&code.value);
        ctx.push_raw("\n");
    }
    ctx.push_raw("```\n");
}

fn render_list(list: &mdast::List, ctx: &mut Context) {
    ctx.enter(Scope::List {
        ordered: list.ordered,
    });
    for child in &list.children {
        render_node(child, ctx);
    }
    ctx.exit();
}

/// Renders one item line: tabs for nesting, the marker, then every
/// paragraph of the item joined by a space. Nested lists follow on their
/// own lines, directly after the item with no blank line in between.
fn render_list_item(item: &mdast::ListItem, ctx: &mut Context) {
    let depth = ctx.list_depth().saturating_sub(1);
    let marker = match item.checked {
        Some(true) => "*v",
        Some(false) => "*x",
        None if ctx.in_ordered_list() => "*.",
        None => "*",
    };

    ctx.push_raw(&"\t".repeat(depth));
    ctx.push_raw(marker);
    ctx.push_raw(" ");

    let mut first = true;
    for child in &item.children {
        if let Node::Paragraph(para) = child {
            if !first {
                ctx.push_raw(" ");
            }
            render_inline_children(&para.children, ctx);
            first = false;
        }
    }
    ctx.push_raw("\n");

    ctx.enter(Scope::ListItem);
    for child in &item.children {
        render_node(child, ctx);
    }
    ctx.exit();
}

/// Prefixes every child block with `> `. Only the first line of a
/// multi-line child carries the prefix.
fn render_blockquote(quote: &mdast::Blockquote, ctx: &mut Context) {
    ctx.enter(Scope::Blockquote);
    for child in &quote.children {
        ctx.push_raw("> ");
        match child {
            Node::Paragraph(para) => render_inline_children(&para.children, ctx),
            other => {
                let rendered = ctx.capture(|ctx| render_node(other, ctx));
                ctx.push_raw(rendered.trim_end_matches('\n'));
            }
        }
        ctx.push_raw("\n");
    }
    ctx.exit();
}

/// Cells of aligned columns are written as header cells (`!`), the rest
/// as plain cells (`|`).
fn render_table(table: &mdast::Table, ctx: &mut Context) {
    ctx.push_raw("table {\n");
    for row in &table.children {
        let Node::TableRow(row) = row else { continue };
        let mut line = String::new();
        for (i, cell) in row.children.iter().enumerate() {
            let Node::TableCell(cell) = cell else { continue };
            let aligned = table
                .align
                .get(i)
                .is_some_and(|align| *align != AlignKind::None);
            let contents = ctx.capture(|ctx| render_inline_children(&cell.children, ctx));
            line.push(if aligned { '!' } else { '|' });
            line.push(' ');
            line.push_str(&escape_cell(contents.trim()));
            line.push(' ');
        }
        ctx.push_raw(line.trim_end());
        ctx.push_raw("\n");
    }
    ctx.push_raw("}\n");
}

/// Escapes `|` and word-initial `!` outside `[[…]]` so cell text cannot
/// start a new cell.
fn escape_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut in_link = false;
    let mut prev: Option<char> = None;
    for (i, c) in text.char_indices() {
        if text[i..].starts_with("[[") {
            in_link = true;
        } else if text[i..].starts_with("]]") {
            in_link = false;
        }
        let delimiter = c == '|' || (c == '!' && prev.is_none_or(char::is_whitespace));
        if delimiter && !in_link {
            escaped.push('\\');
        }
        escaped.push(c);
        prev = Some(c);
    }
    escaped
}

fn render_inline_children(children: &[Node], ctx: &mut Context) {
    for child in children {
        render_inline(child, ctx);
    }
}

/// Renders phrasing content. Nodes without a Mycomarkup form keep their
/// children's text.
fn render_inline(node: &Node, ctx: &mut Context) {
    match node {
        Node::Text(text) => ctx.push_raw(&text.value),
        Node::Break(_) => ctx.push_raw("\n"),
        Node::InlineCode(code) => {
            ctx.push_raw("`");
            ctx.push_raw(&code.value);
            ctx.push_raw("`");
        }
        Node::Emphasis(emphasis) => match emphasis.children.as_slice() {
            [Node::Strong(strong)] => wrap_inline("**//", "//**", &strong.children, ctx),
            children => wrap_inline("//", "//", children, ctx),
        },
        Node::Strong(strong) => wrap_inline("**", "**", &strong.children, ctx),
        Node::Delete(delete) => wrap_inline("~~", "~~", &delete.children, ctx),
        Node::Link(link) => render_link(&link.url, &link.children, ctx),
        Node::Image(image) => {
            render_image(&image.url, image.title.as_deref(), &image.alt, ctx)
        }
        Node::LinkReference(reference) => render_link_reference(reference, ctx),
        Node::ImageReference(reference) => render_image_reference(reference, ctx),
        Node::Html(html) => ctx.push_raw(&html.value),
        other => match other.children() {
            Some(children) => render_inline_children(children, ctx),
            None => log::debug!("Skipping markdown inline node: {:?}", other),
        },
    }
}

fn wrap_inline(open: &str, close: &str, children: &[Node], ctx: &mut Context) {
    ctx.push_raw(open);
    render_inline_children(children, ctx);
    ctx.push_raw(close);
}

/// `[[url | text]]`, or `[[url]]` when the text adds nothing.
fn render_link(url: &str, children: &[Node], ctx: &mut Context) {
    let text = ctx.capture(|ctx| render_inline_children(children, ctx));
    ctx.push_raw("[[");
    ctx.push_raw(url);
    if !text.is_empty() && text != url {
        ctx.push_raw(" | ");
        ctx.push_raw(&text);
    }
    ctx.push_raw("]]");
}

/// `img { url | description }`, preferring the title over the alt text.
fn render_image(url: &str, title: Option<&str>, alt: &str, ctx: &mut Context) {
    ctx.push_raw("img { ");
    ctx.push_raw(url);
    let description = title
        .filter(|title| !title.is_empty())
        .or(Some(alt).filter(|alt| !alt.is_empty()));
    if let Some(description) = description {
        ctx.push_raw(" | ");
        ctx.push_raw(description);
    }
    ctx.push_raw(" }");
}

/// `[text][label]` through its definition. Without one the reference is
/// written back as source text.
fn render_link_reference(reference: &mdast::LinkReference, ctx: &mut Context) {
    match ctx.definition(&reference.identifier).cloned() {
        Some(definition) => render_link(&definition.url, &reference.children, ctx),
        None => {
            log::debug!("No definition for link reference: {}", reference.identifier);
            ctx.push_raw("[");
            render_inline_children(&reference.children, ctx);
            ctx.push_raw("]");
            push_reference_label(
                reference.reference_kind,
                reference.label.as_deref().unwrap_or(&reference.identifier),
                ctx,
            );
        }
    }
}

fn render_image_reference(reference: &mdast::ImageReference, ctx: &mut Context) {
    match ctx.definition(&reference.identifier).cloned() {
        Some(definition) => render_image(
            &definition.url,
            definition.title.as_deref(),
            &reference.alt,
            ctx,
        ),
        None => {
            log::debug!("No definition for image reference: {}", reference.identifier);
            ctx.push_raw("![");
            ctx.push_raw(&reference.alt);
            ctx.push_raw("]");
            push_reference_label(
                reference.reference_kind,
                reference.label.as_deref().unwrap_or(&reference.identifier),
                ctx,
            );
        }
    }
}

fn push_reference_label(kind: ReferenceKind, label: &str, ctx: &mut Context) {
    match kind {
        ReferenceKind::Full => {
            ctx.push_raw("[");
            ctx.push_raw(label);
            ctx.push_raw("]");
        }
        ReferenceKind::Collapsed => ctx.push_raw("[]"),
        ReferenceKind::Shortcut => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycomd_core::{MarkdownOptions, parse_mdast};

    fn render(markdown: &str) -> String {
        let root = parse_mdast(markdown, &MarkdownOptions::default()).unwrap();
        let mut ctx = Context::new();
        collect_definitions(&root, &mut ctx);
        render_node(&root, &mut ctx);
        ctx.finish().text
    }

    #[test]
    fn hard_break_becomes_newline() {
        assert_eq!(render("one  \ntwo"), "one\ntwo\n");
    }

    #[test]
    fn list_item_paragraphs_join_on_one_line() {
        assert_eq!(render("- first\n\n  second\n- next"), "* first second\n* next\n");
    }

    #[test]
    fn autolink_with_same_text_keeps_only_url() {
        assert_eq!(render("<https://example.org>"), "[[https://example.org]]\n");
    }

    #[test]
    fn link_text_keeps_inline_styles() {
        assert_eq!(
            render("[**bold** link](https://a.b)"),
            "[[https://a.b | **bold** link]]\n"
        );
    }

    #[test]
    fn nested_list_inside_quote_keeps_first_line_prefix() {
        assert_eq!(render("> - a\n> - b"), "> * a\n* b\n");
    }

    #[test]
    fn undefined_reference_is_written_back() {
        let mut ctx = Context::new();
        let reference = Node::LinkReference(mdast::LinkReference {
            children: vec![Node::Text(mdast::Text {
                value: "text".into(),
                position: None,
            })],
            position: None,
            reference_kind: ReferenceKind::Full,
            identifier: "missing".into(),
            label: Some("Missing".into()),
        });
        render_inline(&reference, &mut ctx);
        assert_eq!(ctx.finish().text, "[text][Missing]");
    }

    #[test]
    fn pipes_in_cells_are_escaped() {
        assert_eq!(
            render("| x |\n|---|\n| a \\| b |"),
            "table {\n| x\n| a \\| b\n}\n"
        );
        assert_eq!(escape_cell("!note"), "\\!note");
        assert_eq!(escape_cell("wow!"), "wow!");
        assert_eq!(escape_cell("[[https://a.b | site]]"), "[[https://a.b | site]]");
    }

    #[test]
    fn footnote_definitions_are_skipped() {
        assert_eq!(render("text[^1]\n\n[^1]: note\n\nmore"), "text\n\nmore\n");
    }
}
