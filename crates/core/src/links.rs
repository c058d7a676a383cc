//! Link resolution capability handed to the Mycomarkup → Markdown converter.

/// A link target after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Href to emit.
    pub href: String,
    /// Canonical document name for links into the wiki, `None` for external targets.
    pub canonical: Option<String>,
}

impl ResolvedLink {
    /// A target that is emitted as written.
    pub fn external(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            canonical: None,
        }
    }

    /// Returns true if the link points at a wiki document.
    pub fn is_internal(&self) -> bool {
        self.canonical.is_some()
    }
}

/// Resolves link and image targets written in Mycomarkup.
///
/// Supplied per call by the caller; converters only read through it.
pub trait LinkResolver {
    /// Resolve a link address to its href and canonical name.
    fn resolve(&self, address: &str) -> ResolvedLink;

    /// Source URL for an image target.
    fn image_source(&self, target: &str) -> String {
        self.resolve(target).href
    }

    /// Prefix that marks hrefs pointing at wiki documents.
    fn internal_prefix(&self) -> &str {
        ""
    }
}

/// Default document prefix for wiki links.
pub const DEFAULT_DOCUMENT_PREFIX: &str = "/hypha/";
/// Default prefix for media (image) documents.
pub const DEFAULT_MEDIA_PREFIX: &str = "/binary/";

/// Resolver following the wiki's URL layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLinkResolver {
    document_name: Option<String>,
    document_prefix: String,
    media_prefix: String,
}

impl Default for WikiLinkResolver {
    fn default() -> Self {
        Self {
            document_name: None,
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            media_prefix: DEFAULT_MEDIA_PREFIX.to_string(),
        }
    }
}

impl WikiLinkResolver {
    /// Create a resolver with the default prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the document being converted (for `./` and `../` links).
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(canonical_name(&name.into()));
        self
    }

    /// Override the document and media prefixes.
    pub fn with_prefixes(
        mut self,
        document_prefix: impl Into<String>,
        media_prefix: impl Into<String>,
    ) -> Self {
        self.document_prefix = document_prefix.into();
        self.media_prefix = media_prefix.into();
        self
    }

    fn absolute_name(&self, address: &str) -> String {
        let base = self.document_name.as_deref().unwrap_or("");
        if let Some(rest) = address.strip_prefix("./") {
            if base.is_empty() {
                rest.to_string()
            } else {
                format!("{}/{}", base, rest)
            }
        } else if let Some(rest) = address.strip_prefix("../") {
            match base.rsplit_once('/') {
                Some((parent, _)) => format!("{}/{}", parent, rest),
                None => rest.to_string(),
            }
        } else {
            address.to_string()
        }
    }
}

impl LinkResolver for WikiLinkResolver {
    fn resolve(&self, address: &str) -> ResolvedLink {
        let address = address.trim();
        if is_verbatim_address(address) {
            return ResolvedLink::external(address);
        }

        let (name, anchor) = match address.split_once('#') {
            Some((name, anchor)) => (name, Some(anchor)),
            None => (address, None),
        };
        let canonical = canonical_name(&self.absolute_name(name));
        let mut href = format!("{}{}", self.document_prefix, canonical);
        if let Some(anchor) = anchor {
            href.push('#');
            href.push_str(anchor);
        }

        ResolvedLink {
            href,
            canonical: Some(canonical),
        }
    }

    fn image_source(&self, target: &str) -> String {
        let target = target.trim();
        if is_verbatim_address(target) {
            return target.to_string();
        }
        format!(
            "{}{}",
            self.media_prefix,
            canonical_name(&self.absolute_name(target))
        )
    }

    fn internal_prefix(&self) -> &str {
        &self.document_prefix
    }
}

/// Canonical form of a document name: trimmed, lower-cased, spaces as `_`.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Returns true if `address` starts with a URL scheme such as `https://`.
pub fn has_url_scheme(address: &str) -> bool {
    match address.find("://") {
        Some(pos) if pos > 0 => address[..pos]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

fn is_verbatim_address(address: &str) -> bool {
    has_url_scheme(address)
        || address.starts_with("mailto:")
        || address.starts_with("tel:")
        || address.starts_with('#')
        || address.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_links_are_canonicalised() {
        let resolver = WikiLinkResolver::new();
        let link = resolver.resolve("Some Page");
        assert_eq!(link.href, "/hypha/some_page");
        assert_eq!(link.canonical.as_deref(), Some("some_page"));
        assert!(link.is_internal());
    }

    #[test]
    fn anchors_survive_canonicalisation() {
        let link = WikiLinkResolver::new().resolve("Page#Intro Part");
        assert_eq!(link.href, "/hypha/page#Intro Part");
    }

    #[test]
    fn external_links_pass_through() {
        let resolver = WikiLinkResolver::new();
        for address in [
            "https://example.org/A",
            "gemini://x.y",
            "mailto:me@example.org",
            "#top",
            "/static/file",
        ] {
            let link = resolver.resolve(address);
            assert_eq!(link.href, address);
            assert!(!link.is_internal());
        }
    }

    #[test]
    fn relative_links_use_document_name() {
        let resolver = WikiLinkResolver::new().with_document_name("Fungi/Mycelium");
        assert_eq!(resolver.resolve("./Hypha").href, "/hypha/fungi/mycelium/hypha");
        assert_eq!(resolver.resolve("../Spore").href, "/hypha/fungi/spore");
    }

    #[test]
    fn image_sources_use_media_prefix() {
        let resolver = WikiLinkResolver::new().with_prefixes("/page/", "/media/");
        assert_eq!(resolver.image_source("Test.png"), "/media/test.png");
        assert_eq!(
            resolver.image_source("https://example.org/a.png"),
            "https://example.org/a.png"
        );
        assert_eq!(resolver.internal_prefix(), "/page/");
    }

    #[test]
    fn url_scheme_detection() {
        assert!(has_url_scheme("https://a"));
        assert!(has_url_scheme("svn+ssh://a"));
        assert!(!has_url_scheme("://a"));
        assert!(!has_url_scheme("a b://c"));
        assert!(!has_url_scheme("page"));
    }
}
