//! Rendering context for the Mycomarkup to Markdown converter.

use crate::Conversion;
use mycomd_core::{LinkResolver, Warnings};

/// Output buffer, link resolver and warning log of one conversion.
pub struct Context<'a> {
    out: String,
    resolver: &'a dyn LinkResolver,
    list_indent: usize,
    warnings: Warnings,
}

impl<'a> Context<'a> {
    /// Empty context resolving links through `resolver`.
    pub fn new(resolver: &'a dyn LinkResolver, list_indent: usize) -> Self {
        Self {
            out: String::new(),
            resolver,
            list_indent,
            warnings: Warnings::new(),
        }
    }

    /// Link resolver of this conversion.
    pub fn resolver(&self) -> &'a dyn LinkResolver {
        self.resolver
    }

    /// Append text to the output.
    pub fn push_raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Append text escaped for an HTML text node.
    pub fn push_html_text(&mut self, s: &str) {
        self.out.push_str(&html_escape::encode_text(s));
    }

    /// Append text escaped for a double-quoted HTML attribute value.
    pub fn push_attr_value(&mut self, s: &str) {
        self.out
            .push_str(&html_escape::encode_double_quoted_attribute(s));
    }

    /// Indentation of a list item nested `depth` levels deep.
    pub fn list_indent(&self, depth: usize) -> String {
        " ".repeat(self.list_indent * depth)
    }

    /// Record a lossy-conversion warning.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning);
    }

    /// Run `render` against a scratch buffer and return what it wrote.
    ///
    /// Warnings raised inside are kept.
    pub fn capture(&mut self, render: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.out);
        render(self);
        std::mem::replace(&mut self.out, saved)
    }

    /// Consume the context and return the converted text with its warnings.
    pub fn finish(self) -> Conversion {
        Conversion::new(self.out, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycomd_core::WikiLinkResolver;

    #[test]
    fn attribute_values_are_escaped() {
        let resolver = WikiLinkResolver::new();
        let mut ctx = Context::new(&resolver, 4);
        ctx.push_attr_value(r#"a "b" & c"#);
        assert_eq!(ctx.finish().text, "a &quot;b&quot; &amp; c");
    }

    #[test]
    fn capture_keeps_warnings() {
        let resolver = WikiLinkResolver::new();
        let mut ctx = Context::new(&resolver, 2);
        let inner = ctx.capture(|ctx| {
            ctx.push_raw("x");
            ctx.warn("lost");
        });
        assert_eq!(inner, "x");
        assert_eq!(ctx.list_indent(2), "    ");
        let conversion = ctx.finish();
        assert_eq!(conversion.text, "");
        assert_eq!(conversion.warnings, vec!["lost".to_string()]);
    }
}
