//! Grammar tags and file-extension detection.

use crate::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Markup grammar of a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// The wiki's native block/inline markup.
    Mycomarkup,
    /// CommonMark with GFM extensions.
    Markdown,
}

impl Grammar {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Grammar::Mycomarkup => "Mycomarkup",
            Grammar::Markdown => "Markdown",
        }
    }

    /// File extension (with leading dot) used for documents in this grammar.
    pub fn extension(self) -> &'static str {
        match self {
            Grammar::Mycomarkup => ".myco",
            Grammar::Markdown => ".md",
        }
    }

    /// Detect the grammar of a file from its extension.
    ///
    /// Anything that is not `.md` is treated as Mycomarkup, which is what
    /// older wikis stored without an extension convention.
    pub fn detect(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("md") => Grammar::Markdown,
            _ => Grammar::Mycomarkup,
        }
    }

    /// Return `path` with its extension replaced by this grammar's.
    pub fn replace_extension(self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .with_extension(self.extension().trim_start_matches('.'))
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Grammar {
    type Err = ConvertError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Grammar::Markdown),
            "mycomarkup" | "myco" => Ok(Grammar::Mycomarkup),
            _ => Err(ConvertError::UnknownGrammar(tag.to_string())),
        }
    }
}
