//! Mycomarkup block and span rendering to Markdown text.

use super::context::Context;
use mycomd_core::myco::{
    Block, Cell, CodeBlock, Formatted, Heading, Image, LaunchPad, Link, List, ListItem,
    ListMarker, Span, StyleKind, StyleState, Table, Transclusion,
};

/// Comment left in place of a transclusion.
pub const TRANSCLUSION_PLACEHOLDER: &str =
    "<!-- Transclusion: transclusion not supported in Markdown -->\n";

/// Renders one block at list nesting `depth`, updating the context state.
pub fn render_block(block: &Block, ctx: &mut Context<'_>, depth: usize) {
    match block {
        Block::Heading(heading) => render_heading(heading, ctx),
        Block::Paragraph(formatted) => {
            render_formatted(formatted, ctx);
            ctx.push_raw("\n");
        }
        Block::CodeBlock(code) => render_code(code, ctx),
        Block::List(list) => render_list(list, ctx, depth),
        Block::ThematicBreak => ctx.push_raw("---\n"),
        Block::Quote(children) => render_quote(children, ctx, depth),
        Block::Table(table) => render_table(table, ctx),
        Block::Image(image) => render_image(image, ctx),
        Block::LaunchPad(launchpad) => render_launchpad(launchpad, ctx),
        Block::Transclusion(transclusion) => render_transclusion(transclusion, ctx),
        Block::Unknown(unknown) => {
            log::debug!("Unknown mycomarkup block kind: {}", unknown.kind);
            ctx.push_raw(&format!("<!-- Unknown block type: {} -->\n", unknown.kind));
        }
    }
}

fn render_heading(heading: &Heading, ctx: &mut Context<'_>) {
    ctx.push_raw(&"#".repeat(usize::from(heading.level)));
    ctx.push_raw(" ");
    render_formatted(&heading.contents, ctx);
    ctx.push_raw("\n");
}

fn render_code(code: &CodeBlock, ctx: &mut Context<'_>) {
    ctx.push_raw("```");
    if let Some(lang) = code.explicit_language() {
        ctx.push_raw(lang);
    }
    ctx.push_raw("\n");
    ctx.push_raw(&code.contents);
    if !code.contents.is_empty() && !code.contents.ends_with('\n') {
        ctx.push_raw("\n");
    }
    ctx.push_raw("```\n");
}

fn render_list(list: &List, ctx: &mut Context<'_>, depth: usize) {
    for item in &list.items {
        render_list_item(item, list.marker, ctx, depth);
    }
}

fn render_list_item(item: &ListItem, marker: ListMarker, ctx: &mut Context<'_>, depth: usize) {
    let marker = match marker {
        ListMarker::Unordered => "- ",
        ListMarker::Ordered => "1. ",
        ListMarker::Todo => "- [ ] ",
        ListMarker::TodoDone => "- [x] ",
    };
    ctx.push_raw(&ctx.list_indent(depth));
    ctx.push_raw(marker);

    let mut line_open = true;
    for block in &item.contents {
        match block {
            Block::List(_) => {
                if line_open {
                    ctx.push_raw("\n");
                    line_open = false;
                }
                render_block(block, ctx, depth + 1);
            }
            _ => {
                render_block(block, ctx, depth);
                line_open = false;
            }
        }
    }
    if line_open {
        ctx.push_raw("\n");
    }
}

/// Each child becomes one `> ` line; continuation lines of a multi-line
/// child are not prefixed.
fn render_quote(children: &[Block], ctx: &mut Context<'_>, depth: usize) {
    for child in children {
        let rendered = ctx.capture(|ctx| render_block(child, ctx, depth));
        ctx.push_raw("> ");
        ctx.push_raw(rendered.trim_end_matches('\n'));
        ctx.push_raw("\n");
    }
}

fn render_table(table: &Table, ctx: &mut Context<'_>) {
    ctx.push_raw("<table>\n");
    if let Some(caption) = &table.caption {
        ctx.push_raw("<caption>");
        ctx.push_html_text(caption);
        ctx.push_raw("</caption>\n");
    }

    let (head, body) = match table.rows.split_first() {
        Some((first, rest)) if first.looks_like_thead() => (Some(first), rest),
        _ => (None, table.rows.as_slice()),
    };

    if let Some(row) = head {
        ctx.push_raw("<thead>\n<tr>");
        for cell in &row.cells {
            render_cell(cell, ctx);
        }
        ctx.push_raw("</tr>\n</thead>\n");
    }
    if !body.is_empty() {
        ctx.push_raw("<tbody>\n");
        for row in body {
            ctx.push_raw("<tr>");
            for cell in &row.cells {
                render_cell(cell, ctx);
            }
            ctx.push_raw("</tr>\n");
        }
        ctx.push_raw("</tbody>\n");
    }
    ctx.push_raw("</table>\n");
}

fn render_cell(cell: &Cell, ctx: &mut Context<'_>) {
    let tag = if cell.is_header { "th" } else { "td" };
    ctx.push_raw("<");
    ctx.push_raw(tag);
    if cell.colspan > 1 {
        ctx.push_raw(&format!(" colspan=\"{}\"", cell.colspan));
    }
    ctx.push_raw(">");
    let contents = render_blocks_inline(&cell.contents, ctx);
    ctx.push_raw(&contents);
    ctx.push_raw("</");
    ctx.push_raw(tag);
    ctx.push_raw(">");
}

/// Renders nested blocks to a single trimmed string.
fn render_blocks_inline(blocks: &[Block], ctx: &mut Context<'_>) -> String {
    let rendered = ctx.capture(|ctx| {
        for block in blocks {
            render_block(block, ctx, 0);
        }
    });
    rendered.trim().to_string()
}

/// A single image becomes `![alt](src)`, a gallery an HTML `<div>`.
fn render_image(image: &Image, ctx: &mut Context<'_>) {
    let resolver = ctx.resolver();
    if let Some(entry) = image.entries.first().filter(|_| image.has_one_image()) {
        let alt = render_blocks_inline(&entry.description, ctx);
        let src = resolver.image_source(&entry.target);
        ctx.push_raw(&format!("![{}]({})\n", alt, src));
        return;
    }

    ctx.push_raw("<div class=\"img-gallery\">\n");
    for entry in &image.entries {
        let src = resolver.image_source(&entry.target);
        ctx.push_raw("<img src=\"");
        ctx.push_attr_value(&src);
        ctx.push_raw("\"");
        if let Some(width) = &entry.width {
            ctx.push_raw(" width=\"");
            ctx.push_attr_value(width);
            ctx.push_raw("\"");
        }
        if let Some(height) = &entry.height {
            ctx.push_raw(" height=\"");
            ctx.push_attr_value(height);
            ctx.push_raw("\"");
        }
        let alt = render_blocks_inline(&entry.description, ctx);
        if !alt.is_empty() {
            ctx.push_raw(" alt=\"");
            ctx.push_attr_value(&alt);
            ctx.push_raw("\"");
        }
        ctx.push_raw(">\n");
    }
    ctx.push_raw("</div>\n");
}

fn render_launchpad(launchpad: &LaunchPad, ctx: &mut Context<'_>) {
    let resolver = ctx.resolver();
    ctx.push_raw("<div class=\"launchpad\">\n");
    for rocket in launchpad.rockets.iter().filter(|rocket| !rocket.is_empty) {
        let resolved = resolver.resolve(&rocket.link.address);
        ctx.push_raw("<a href=\"");
        ctx.push_attr_value(&resolved.href);
        ctx.push_raw("\">");
        ctx.push_html_text(rocket.link.displayed_text());
        ctx.push_raw("</a><br>\n");
    }
    ctx.push_raw("</div>\n");
}

fn render_transclusion(transclusion: &Transclusion, ctx: &mut Context<'_>) {
    ctx.warn(format!(
        "Transclusion of '{}' is not supported in Markdown and was replaced by a comment",
        transclusion.target
    ));
    ctx.push_raw(TRANSCLUSION_PLACEHOLDER);
}

/// Renders every line of `formatted`, separated by `\n`.
pub fn render_formatted(formatted: &Formatted, ctx: &mut Context<'_>) {
    for (i, line) in formatted.lines.iter().enumerate() {
        if i > 0 {
            ctx.push_raw("\n");
        }
        render_line(line, ctx);
    }
}

/// Renders one line of spans. Style state starts empty on every line and
/// styles still open at the end of the line are dropped.
pub fn render_line(spans: &[Span], ctx: &mut Context<'_>) {
    let mut state = StyleState::new();
    for span in spans {
        match span {
            Span::Toggle(kind) => state.toggle(*kind),
            Span::Text(text) => render_styled_text(text, &state, ctx),
            Span::Link(link) => render_link(link, ctx),
        }
    }
}

/// Wraps `text` in every active style, outermost first in canonical order.
fn render_styled_text(text: &str, state: &StyleState, ctx: &mut Context<'_>) {
    for kind in state.active_in_order() {
        ctx.push_raw(opening(kind));
    }
    ctx.push_raw(text);
    for kind in state.active_in_order().rev() {
        ctx.push_raw(closing(kind));
    }
}

fn opening(kind: StyleKind) -> &'static str {
    match kind {
        StyleKind::Super => "<sup>",
        StyleKind::Sub => "<sub>",
        StyleKind::Underline => "<u>",
        StyleKind::Mark => "<mark>",
        StyleKind::Bold => "**",
        StyleKind::Italic => "*",
        StyleKind::Strike => "~~",
        StyleKind::Mono => "`",
    }
}

fn closing(kind: StyleKind) -> &'static str {
    match kind {
        StyleKind::Super => "</sup>",
        StyleKind::Sub => "</sub>",
        StyleKind::Underline => "</u>",
        StyleKind::Mark => "</mark>",
        other => opening(other),
    }
}

/// `[text](href)`. Hrefs of internal documents lose the document prefix, and an href
/// equal to the text up to case is written as the text.
fn render_link(link: &Link, ctx: &mut Context<'_>) {
    let resolver = ctx.resolver();
    let resolved = resolver.resolve(&link.address);
    let display = link.displayed_text();

    let prefix = resolver.internal_prefix();
    let mut href = match resolved.href.strip_prefix(prefix) {
        Some(stripped) if resolved.is_internal() && !prefix.is_empty() => stripped,
        _ => resolved.href.as_str(),
    };
    if display.to_lowercase() == href.to_lowercase() {
        href = display;
    }
    ctx.push_raw(&format!("[{}]({})", display, href));
}
