//! Inline span parsing for one line of Mycomarkup.

use super::ast::{Link, Span, StyleKind};
use crate::links::has_url_scheme;

/// Splits one line of Mycomarkup into spans.
///
/// Style delimiters become [`Span::Toggle`] markers; they are never matched
/// against a closing delimiter, so an unbalanced toggle simply stays on for
/// the rest of the line.
pub fn parse_line(line: &str) -> Vec<Span> {
    let mut parser = InlineParser {
        src: line,
        pos: 0,
        text: String::new(),
        spans: Vec::new(),
        in_mono: false,
    };
    parser.run();
    parser.spans
}

struct InlineParser<'a> {
    src: &'a str,
    pos: usize,
    text: String,
    spans: Vec<Span>,
    in_mono: bool,
}

impl<'a> InlineParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn run(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            // Inside monospace only the closing backtick means anything.
            if self.in_mono {
                if c == '`' {
                    self.toggle(StyleKind::Mono);
                } else {
                    self.push_char(c);
                }
                continue;
            }

            if c == '\\' {
                self.escape();
                continue;
            }

            if self.rest().starts_with("[[") && self.bracket_link() {
                continue;
            }

            if self.at_word_start() && self.autolink() {
                continue;
            }

            if let Some(kind) = toggle_at(self.rest()) {
                self.toggle(kind);
                continue;
            }

            self.push_char(c);
        }
        self.flush_text();
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.pos += c.len_utf8();
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.spans.push(Span::Text(std::mem::take(&mut self.text)));
        }
    }

    fn toggle(&mut self, kind: StyleKind) {
        self.flush_text();
        self.spans.push(Span::Toggle(kind));
        self.pos += kind.delimiter().len();
        if kind == StyleKind::Mono {
            self.in_mono = !self.in_mono;
        }
    }

    fn escape(&mut self) {
        self.pos += 1;
        match self.rest().chars().next() {
            Some(next) => self.push_char(next),
            None => self.text.push('\\'),
        }
    }

    fn at_word_start(&self) -> bool {
        self.src[..self.pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || c == '(')
    }

    /// `[[address]]` or `[[address | text]]`.
    fn bracket_link(&mut self) -> bool {
        let inner_start = self.pos + 2;
        let Some(len) = self.src[inner_start..].find("]]") else {
            return false;
        };
        let inner = &self.src[inner_start..inner_start + len];
        let (address, text) = match inner.split_once('|') {
            Some((address, text)) => (address.trim(), Some(text.trim())),
            None => (inner.trim(), None),
        };
        if address.is_empty() {
            return false;
        }

        self.flush_text();
        self.spans.push(Span::Link(Link {
            address: address.to_string(),
            text: text.filter(|t| !t.is_empty()).map(str::to_string),
        }));
        self.pos = inner_start + len + 2;
        true
    }

    /// Bare `scheme://…` up to whitespace, minus trailing punctuation.
    fn autolink(&mut self) -> bool {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let url = rest[..end].trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
        if !has_url_scheme(url) || url.ends_with("://") {
            return false;
        }

        self.flush_text();
        self.spans.push(Span::Link(Link {
            address: url.to_string(),
            text: None,
        }));
        self.pos += url.len();
        true
    }
}

fn toggle_at(rest: &str) -> Option<StyleKind> {
    if rest.starts_with('`') {
        return Some(StyleKind::Mono);
    }
    StyleKind::CANONICAL_ORDER
        .into_iter()
        .filter(|kind| *kind != StyleKind::Mono)
        .find(|kind| rest.starts_with(kind.delimiter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(parse_line("This is plain text."), vec![text("This is plain text.")]);
    }

    #[test]
    fn toggles_split_text() {
        assert_eq!(
            parse_line("**bold** and //italic//"),
            vec![
                Span::Toggle(StyleKind::Bold),
                text("bold"),
                Span::Toggle(StyleKind::Bold),
                text(" and "),
                Span::Toggle(StyleKind::Italic),
                text("italic"),
                Span::Toggle(StyleKind::Italic),
            ]
        );
    }

    #[test]
    fn all_delimiters_are_recognised() {
        for kind in StyleKind::CANONICAL_ORDER {
            let line = format!("{0}x{0}", kind.delimiter());
            assert_eq!(
                parse_line(&line),
                vec![Span::Toggle(kind), text("x"), Span::Toggle(kind)],
                "delimiter {}",
                kind.delimiter()
            );
        }
    }

    #[test]
    fn monospace_hides_other_delimiters() {
        assert_eq!(
            parse_line("`a**b//c`"),
            vec![
                Span::Toggle(StyleKind::Mono),
                text("a**b//c"),
                Span::Toggle(StyleKind::Mono),
            ]
        );
    }

    #[test]
    fn bracket_links() {
        assert_eq!(
            parse_line("see [[Page | Custom Text]]!"),
            vec![
                text("see "),
                Span::Link(Link {
                    address: "Page".into(),
                    text: Some("Custom Text".into()),
                }),
                text("!"),
            ]
        );
        assert_eq!(
            parse_line("[[Page]]"),
            vec![Span::Link(Link {
                address: "Page".into(),
                text: None,
            })]
        );
    }

    #[test]
    fn unclosed_link_is_text() {
        assert_eq!(parse_line("[[oops"), vec![text("[[oops")]);
    }

    #[test]
    fn autolinks_do_not_toggle_italic() {
        assert_eq!(
            parse_line("go to https://example.org."),
            vec![
                text("go to "),
                Span::Link(Link {
                    address: "https://example.org".into(),
                    text: None,
                }),
                text("."),
            ]
        );
    }

    #[test]
    fn backslash_escapes_delimiters() {
        assert_eq!(parse_line(r"a \** b"), vec![text("a ** b")]);
    }
}
