//! Conversion options.

use mycomd_core::links::{DEFAULT_DOCUMENT_PREFIX, DEFAULT_MEDIA_PREFIX};
use mycomd_core::{MarkdownOptions, WikiLinkResolver};
use serde::{Deserialize, Serialize};

/// Options shared by both conversion directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Name of the document being converted; resolves `./` and `../` links.
    #[serde(alias = "documentName")]
    pub document_name: Option<String>,
    /// Href prefix of wiki documents. Stripped from converted Markdown links.
    #[serde(alias = "documentPrefix")]
    pub document_prefix: String,
    /// Href prefix of media documents used as image sources.
    #[serde(alias = "mediaPrefix")]
    pub media_prefix: String,
    /// Spaces per nesting level for Markdown list items.
    #[serde(alias = "listIndent")]
    pub list_indent: usize,
    /// Markdown parser flags.
    pub markdown: MarkdownOptions,
}

impl ConvertOptions {
    /// Link resolver built from the rendering context in these options.
    pub fn resolver(&self) -> WikiLinkResolver {
        let resolver = WikiLinkResolver::new()
            .with_prefixes(self.document_prefix.clone(), self.media_prefix.clone());
        match &self.document_name {
            Some(name) => resolver.with_document_name(name.clone()),
            None => resolver,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            document_name: None,
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            media_prefix: DEFAULT_MEDIA_PREFIX.to_string(),
            list_indent: 4,
            markdown: MarkdownOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{ "documentName": "Fungi", "list_indent": 2 }"#).unwrap();
        assert_eq!(options.document_name.as_deref(), Some("Fungi"));
        assert_eq!(options.list_indent, 2);
        assert_eq!(options.document_prefix, "/hypha/");
        assert!(options.markdown.gfm);
    }

    #[test]
    fn resolver_uses_prefixes_and_document_name() {
        use mycomd_core::LinkResolver;

        let options = ConvertOptions {
            document_name: Some("Fungi".into()),
            document_prefix: "/page/".into(),
            ..ConvertOptions::default()
        };
        let resolver = options.resolver();
        assert_eq!(resolver.resolve("./Cap").href, "/page/fungi/cap");
        assert_eq!(resolver.image_source("a.png"), "/binary/a.png");
    }
}
