//! Rendering context for the Markdown to Mycomarkup converter.

use crate::Conversion;
use mycomd_core::Warnings;
use std::collections::HashMap;

/// Structural scope entered while walking the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Document root.
    Root,
    /// Inside a list.
    List {
        /// Ordered (`1.`) list.
        ordered: bool,
    },
    /// Inside a list item.
    ListItem,
    /// Inside a blockquote.
    Blockquote,
}

/// Target of a link reference definition (`[label]: url "title"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Output buffer plus the scope stack of the node being rendered.
#[derive(Debug)]
pub struct Context {
    out: String,
    stack: Vec<Scope>,
    wrote_block: bool,
    definitions: HashMap<String, Definition>,
}

impl Context {
    /// Empty context positioned at the document root.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            stack: vec![Scope::Root],
            wrote_block: false,
            definitions: HashMap::new(),
        }
    }

    /// Record a link reference definition. The first definition of an
    /// identifier wins.
    pub fn define(&mut self, identifier: &str, definition: Definition) {
        self.definitions
            .entry(definition_key(identifier))
            .or_insert(definition);
    }

    /// Definition referenced by `identifier`, if any.
    pub fn definition(&self, identifier: &str) -> Option<&Definition> {
        self.definitions.get(&definition_key(identifier))
    }

    /// Append text to the output.
    pub fn push_raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Mark the start of a top-level block; blocks after the first are
    /// preceded by a blank line.
    pub fn start_block(&mut self) {
        if self.wrote_block {
            self.out.push('\n');
        }
        self.wrote_block = true;
    }

    /// Returns a reference to the current scope at the top of the stack.
    pub fn current_scope(&self) -> &Scope {
        self.stack.last().unwrap_or(&Scope::Root)
    }

    /// Returns true if the node being rendered is a direct child of the root.
    pub fn is_top_level(&self) -> bool {
        matches!(self.current_scope(), Scope::Root)
    }

    /// Number of enclosing lists.
    pub fn list_depth(&self) -> usize {
        self.stack
            .iter()
            .filter(|scope| matches!(scope, Scope::List { .. }))
            .count()
    }

    /// Returns true if the innermost enclosing list is ordered.
    pub fn in_ordered_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { ordered: true }))
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Run `render` against a scratch buffer and return what it wrote.
    ///
    /// Scopes are shared with the enclosing render.
    pub fn capture(&mut self, render: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.out);
        render(self);
        std::mem::replace(&mut self.out, saved)
    }

    /// Consume the context and return the converted text.
    ///
    /// This direction raises no warnings; unconvertible nodes are skipped.
    pub fn finish(self) -> Conversion {
        Conversion::new(self.out, Warnings::new())
    }
}

/// Labels match case-insensitively with runs of whitespace collapsed.
fn definition_key(identifier: &str) -> String {
    identifier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_depth_counts_nested_lists() {
        let mut ctx = Context::new();
        assert!(ctx.is_top_level());
        ctx.enter(Scope::List { ordered: false });
        ctx.enter(Scope::ListItem);
        ctx.enter(Scope::List { ordered: true });
        assert_eq!(ctx.list_depth(), 2);
        assert!(ctx.in_ordered_list());
        ctx.exit();
        assert!(!ctx.in_ordered_list());
        assert!(!ctx.is_top_level());
    }

    #[test]
    fn capture_restores_the_outer_buffer() {
        let mut ctx = Context::new();
        ctx.push_raw("outer");
        let inner = ctx.capture(|ctx| ctx.push_raw("inner"));
        assert_eq!(inner, "inner");
        assert_eq!(ctx.finish().text, "outer");
    }

    #[test]
    fn first_definition_wins() {
        let mut ctx = Context::new();
        let definition = |url: &str| Definition {
            url: url.to_string(),
            title: None,
        };
        ctx.define("g", definition("https://one.example"));
        ctx.define("G", definition("https://two.example"));
        assert_eq!(ctx.definition("g").map(|d| d.url.as_str()), Some("https://one.example"));
        assert!(ctx.definition("  g ").is_some());
        assert!(ctx.definition("missing").is_none());
    }

    #[test]
    fn blank_line_between_blocks() {
        let mut ctx = Context::new();
        ctx.start_block();
        ctx.push_raw("a\n");
        ctx.start_block();
        ctx.push_raw("b\n");
        assert_eq!(ctx.finish().text, "a\n\nb\n");
    }
}
