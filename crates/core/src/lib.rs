#![deny(missing_docs)]
//! mycomd core: Mycomarkup tree model and parser, Markdown parse options,
//! grammar tags, link resolution, and the shared error and warning types.

/// Core error and warning types.
pub mod error;
/// Grammar tags and extension detection.
pub mod grammar;
/// Link resolution capability.
pub mod links;
/// Mycomarkup tree model and parser.
pub mod myco;
/// Markdown parsing utilities.
pub mod parse;

pub use error::{ConvertError, Warnings};
pub use grammar::Grammar;
pub use links::{LinkResolver, ResolvedLink, WikiLinkResolver, canonical_name};
pub use parse::{MarkdownOptions, MarkdownParseError, parse_mdast};
