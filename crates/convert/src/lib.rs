//! Bidirectional, lossy conversion between Mycomarkup and Markdown.
//!
//! Each direction walks a parsed tree and writes the destination grammar's
//! text, collecting a warning for every construct that has no equivalent.
//!
//! ```
//! use mycomd_convert::{Grammar, convert};
//!
//! let conversion = convert("= Title\n//hi//", Grammar::Mycomarkup, Grammar::Markdown).unwrap();
//! assert_eq!(conversion.text, "# Title\n\n*hi*\n");
//! ```

#![deny(missing_docs)]

mod options;
mod registry;
pub mod to_markdown;
pub mod to_myco;
mod types;

pub use mycomd_core::{ConvertError, Grammar};
pub use options::ConvertOptions;
pub use registry::{ConvertFn, ConverterRegistry};
pub use to_markdown::myco_to_markdown;
pub use to_myco::markdown_to_myco;
pub use types::{Conversion, NO_CONVERSION_NEEDED};

use registry::DEFAULT_REGISTRY;

/// Convert `content` between grammars with default options.
///
/// Fails only when no conversion is defined for the pair; every
/// content-level problem is reported as a warning instead.
pub fn convert(content: &str, from: Grammar, to: Grammar) -> Result<Conversion, ConvertError> {
    convert_with_options(content, from, to, &ConvertOptions::default())
}

/// Convert `content` between grammars.
pub fn convert_with_options(
    content: &str,
    from: Grammar,
    to: Grammar,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    DEFAULT_REGISTRY.convert(content, from, to, options)
}
