//! Line-oriented Mycomarkup block parser.
//!
//! The parser never fails: anything that does not open a known block is
//! paragraph text, and unterminated constructs run to the end of input.

use super::ast::{
    Block, Cell, CodeBlock, Formatted, Heading, Image, ImageEntry, LaunchPad, Link, List,
    ListItem, ListMarker, Rocket, Row, Table, Transclusion,
};
use super::inline::parse_line;

/// Parse a Mycomarkup document into top-level blocks.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let mut parser = BlockParser {
        lines: input.lines().collect(),
        pos: 0,
    };
    parser.blocks()
}

struct BlockParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> BlockParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn blocks(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        while let Some(line) = self.peek() {
            if line.trim().is_empty() {
                self.pos += 1;
                continue;
            }
            blocks.push(self.block(line));
        }
        blocks
    }

    fn block(&mut self, line: &'a str) -> Block {
        if line.starts_with("```") {
            return self.code_block(line);
        }
        if line.starts_with("=>") {
            return self.launchpad();
        }
        if let Some(rest) = line.strip_prefix("<=") {
            self.pos += 1;
            let target = rest.split('|').next().unwrap_or("").trim();
            return Block::Transclusion(Transclusion {
                target: target.to_string(),
            });
        }
        if let Some(heading) = heading(line) {
            self.pos += 1;
            return heading;
        }
        if is_thematic_break(line) {
            self.pos += 1;
            return Block::ThematicBreak;
        }
        if list_line(line).is_some() {
            return Block::List(self.list(0));
        }
        if line.starts_with('>') {
            return self.quote();
        }
        if let Some(caption) = table_opening(line) {
            let body = self.braced_body("");
            return Block::Table(Table {
                caption,
                rows: parse_rows(&body),
            });
        }
        if let Some((layout, after_open)) = img_opening(line) {
            let body = self.braced_body(after_open);
            return Block::Image(Image {
                layout,
                entries: parse_image_entries(&body),
            });
        }
        self.paragraph()
    }

    fn code_block(&mut self, opening: &str) -> Block {
        let language = opening.trim_start_matches('`').trim();
        self.pos += 1;

        let mut contents = String::new();
        while let Some(line) = self.peek() {
            self.pos += 1;
            if line.starts_with("```") {
                break;
            }
            contents.push_str(line);
            contents.push('\n');
        }

        Block::CodeBlock(CodeBlock {
            language: (!language.is_empty()).then(|| language.to_string()),
            contents,
        })
    }

    /// Items at `min_depth` or deeper; deeper runs become nested lists of the
    /// preceding item.
    fn list(&mut self, min_depth: usize) -> List {
        let mut marker: Option<ListMarker> = None;
        let mut own_depth: Option<usize> = None;
        let mut items: Vec<ListItem> = Vec::new();

        while let Some((depth, item_marker, text)) = self.peek().and_then(list_line) {
            if depth < min_depth {
                break;
            }
            match own_depth {
                Some(own) if depth < own => break,
                Some(own) if depth > own => {
                    let nested = self.list(own + 1);
                    if let Some(item) = items.last_mut() {
                        item.contents.push(Block::List(nested));
                    }
                    continue;
                }
                _ => {}
            }
            if marker.is_some_and(|m| m != item_marker) {
                break;
            }

            marker = Some(item_marker);
            own_depth = Some(depth);
            self.pos += 1;

            let mut contents = Vec::new();
            if !text.is_empty() {
                contents.push(Block::Paragraph(Formatted::single(parse_line(text))));
            }
            items.push(ListItem { contents });
        }

        List {
            marker: marker.unwrap_or(ListMarker::Unordered),
            items,
        }
    }

    fn quote(&mut self) -> Block {
        let mut inner = Vec::new();
        while let Some(line) = self.peek() {
            let Some(rest) = line.strip_prefix('>') else {
                break;
            };
            inner.push(rest.strip_prefix(' ').unwrap_or(rest));
            self.pos += 1;
        }
        Block::Quote(parse_blocks(&inner.join("\n")))
    }

    fn launchpad(&mut self) -> Block {
        let mut rockets = Vec::new();
        while let Some(rest) = self.peek().and_then(|line| line.strip_prefix("=>")) {
            self.pos += 1;
            let (address, text) = match rest.split_once('|') {
                Some((address, text)) => (address.trim(), Some(text.trim())),
                None => (rest.trim(), None),
            };
            rockets.push(Rocket {
                link: Link {
                    address: address.to_string(),
                    text: text.filter(|t| !t.is_empty()).map(str::to_string),
                },
                is_empty: address.is_empty(),
            });
        }
        Block::LaunchPad(LaunchPad { rockets })
    }

    fn paragraph(&mut self) -> Block {
        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            if line.trim().is_empty() || (!lines.is_empty() && starts_block(line)) {
                break;
            }
            lines.push(parse_line(line.trim()));
            self.pos += 1;
        }
        Block::Paragraph(Formatted { lines })
    }

    /// Consumes the current line and following ones up to the `}` matching an
    /// already-seen `{`. `after_open` is the current line's text after that `{`.
    fn braced_body(&mut self, after_open: &'a str) -> String {
        let mut depth = 1usize;
        let mut body = String::new();
        let mut current = after_open;
        self.pos += 1;

        loop {
            for (i, c) in current.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            body.push_str(&current[..i]);
                            return body;
                        }
                    }
                    _ => {}
                }
            }
            body.push_str(current);

            match self.peek() {
                Some(line) => {
                    body.push('\n');
                    current = line;
                    self.pos += 1;
                }
                None => return body,
            }
        }
    }
}

fn starts_block(line: &str) -> bool {
    line.starts_with("```")
        || line.starts_with("=>")
        || line.starts_with("<=")
        || line.starts_with('>')
        || heading(line).is_some()
        || is_thematic_break(line)
        || list_line(line).is_some()
        || table_opening(line).is_some()
        || img_opening(line).is_some()
}

fn heading(line: &str) -> Option<Block> {
    let level = line.chars().take_while(|c| *c == '=').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = line[level..].strip_prefix(' ')?;
    Some(Block::Heading(Heading {
        level: level as u8,
        contents: Formatted::single(parse_line(rest.trim())),
    }))
}

fn is_thematic_break(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.len() >= 4 && trimmed.chars().all(|c| c == '-')
}

/// `TABS* MARKER SPACE text` → (depth, marker, text).
fn list_line(line: &str) -> Option<(usize, ListMarker, &str)> {
    let depth = line.chars().take_while(|c| *c == '\t').count();
    let rest = line[depth..].strip_prefix('*')?;
    let (marker, rest) = match rest.chars().next()? {
        ' ' => (ListMarker::Unordered, rest),
        '.' => (ListMarker::Ordered, &rest[1..]),
        'v' => (ListMarker::TodoDone, &rest[1..]),
        'x' => (ListMarker::Todo, &rest[1..]),
        _ => return None,
    };
    let text = rest.strip_prefix(' ')?;
    Some((depth, marker, text.trim()))
}

/// `table {` or `table Caption {` → caption.
fn table_opening(line: &str) -> Option<Option<String>> {
    let rest = line.trim().strip_prefix("table")?;
    let middle = rest.strip_suffix('{')?;
    if !middle.is_empty() && !middle.starts_with(char::is_whitespace) {
        return None;
    }
    let caption = middle.trim();
    Some((!caption.is_empty()).then(|| caption.to_string()))
}

/// `img {` or `img layout {` → (layout, text after `{`).
fn img_opening(line: &str) -> Option<(Option<String>, &str)> {
    let rest = line.trim_start().strip_prefix("img")?;
    if !rest.starts_with(|c: char| c.is_whitespace() || c == '{') {
        return None;
    }
    let (middle, after_open) = rest.split_once('{')?;
    let layout = middle.trim();
    if layout.contains(char::is_whitespace) {
        return None;
    }
    Some(((!layout.is_empty()).then(|| layout.to_string()), after_open))
}

struct RawCell {
    text: String,
    colspan: usize,
    is_header: bool,
}

fn parse_rows(body: &str) -> Vec<Row> {
    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(['|', '!']) {
            rows.push(split_cells(trimmed));
            continue;
        }
        match rows.last_mut().and_then(|cells| cells.last_mut()) {
            Some(cell) => {
                cell.text.push('\n');
                cell.text.push_str(trimmed);
            }
            None => rows.push(vec![RawCell {
                text: trimmed.to_string(),
                colspan: 1,
                is_header: false,
            }]),
        }
    }

    rows.into_iter()
        .map(|cells| Row {
            cells: cells
                .into_iter()
                .map(|cell| Cell {
                    contents: parse_blocks(cell.text.trim()),
                    colspan: cell.colspan,
                    is_header: cell.is_header,
                })
                .collect(),
        })
        .collect()
}

/// Splits a row line on `|` and `!` delimiter runs. `!` only counts at the
/// start of a word, and nothing inside `[[…]]` is a delimiter.
fn split_cells(line: &str) -> Vec<RawCell> {
    let mut cells: Vec<RawCell> = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut in_link = false;
    let mut prev: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        // An escaped character stays in the cell for the inline parser.
        if c == '\\' {
            let escaped = chars.next().map(|(_, next)| next);
            if let Some(cell) = cells.last_mut() {
                cell.text.push(c);
                cell.text.extend(escaped);
            }
            prev = Some(escaped.unwrap_or(c));
            continue;
        }

        let is_delimiter = !in_link
            && (c == '|' || (c == '!' && prev.is_none_or(|p| p.is_whitespace())));
        if is_delimiter {
            let mut colspan = 1;
            while chars.next_if(|&(_, next)| next == c).is_some() {
                colspan += 1;
            }
            cells.push(RawCell {
                text: String::new(),
                colspan,
                is_header: c == '!',
            });
            prev = Some(c);
            continue;
        }

        if line[i..].starts_with("[[") {
            in_link = true;
        } else if line[i..].starts_with("]]") {
            in_link = false;
        }
        if let Some(cell) = cells.last_mut() {
            cell.text.push(c);
        }
        prev = Some(c);
    }

    // A closing delimiter at the end of the line does not open a cell.
    if cells.len() > 1 && cells.last().is_some_and(|cell| cell.text.trim().is_empty()) {
        cells.pop();
    }
    cells
}

fn parse_image_entries(body: &str) -> Vec<ImageEntry> {
    let mut entries = Vec::new();
    let mut head = String::new();
    let mut description: Option<String> = None;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1usize;
                let mut text = String::new();
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    text.push(inner);
                }
                description = Some(text);
            }
            '\n' => {
                entries.extend(image_entry(&head, description.take()));
                head.clear();
            }
            _ => head.push(c),
        }
    }
    entries.extend(image_entry(&head, description));
    entries
}

fn image_entry(head: &str, description: Option<String>) -> Option<ImageEntry> {
    let (target, size) = match head.split_once('|') {
        Some((target, size)) => (target.trim(), size.trim()),
        None => (head.trim(), ""),
    };
    if target.is_empty() {
        return None;
    }

    let mut entry = ImageEntry {
        target: target.to_string(),
        ..ImageEntry::default()
    };
    let mut description = description;
    if !size.is_empty() {
        match parse_dimensions(size) {
            Some((width, height)) => {
                entry.width = Some(width.to_string());
                entry.height = height.map(str::to_string);
            }
            None => {
                description.get_or_insert_with(|| size.to_string());
            }
        }
    }
    if let Some(text) = description {
        entry.description = parse_blocks(text.trim());
    }
    Some(entry)
}

/// `W` or `W * H`, each starting with a digit.
fn parse_dimensions(size: &str) -> Option<(&str, Option<&str>)> {
    let is_dimension = |s: &str| {
        s.starts_with(|c: char| c.is_ascii_digit())
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '%')
    };
    match size.split_once('*') {
        Some((width, height)) => {
            let (width, height) = (width.trim(), height.trim());
            (is_dimension(width) && is_dimension(height)).then_some((width, Some(height)))
        }
        None => is_dimension(size).then_some((size, None)),
    }
}
