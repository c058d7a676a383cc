//! Registry of conversion functions keyed by grammar pair.

use crate::{Conversion, ConvertOptions, to_markdown, to_myco};
use mycomd_core::{ConvertError, Grammar};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A conversion from one grammar's text to another's.
pub type ConvertFn = fn(&str, &ConvertOptions) -> Conversion;

/// Registry used by [`crate::convert`].
pub(crate) static DEFAULT_REGISTRY: Lazy<ConverterRegistry> =
    Lazy::new(ConverterRegistry::with_defaults);

/// Conversion functions keyed by (source, destination) grammar.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: HashMap<(Grammar, Grammar), ConvertFn>,
}

impl ConverterRegistry {
    /// Create a new empty registry
    pub fn empty() -> Self {
        ConverterRegistry {
            converters: HashMap::new(),
        }
    }

    /// Create a registry with both built-in directions
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            Grammar::Mycomarkup,
            Grammar::Markdown,
            to_markdown::convert_source,
        );
        registry.register(
            Grammar::Markdown,
            Grammar::Mycomarkup,
            to_myco::convert_source,
        );
        registry
    }

    /// Register a conversion
    ///
    /// If the pair already has a conversion, it will be replaced.
    pub fn register(&mut self, from: Grammar, to: Grammar, convert: ConvertFn) {
        self.converters.insert((from, to), convert);
    }

    /// Get the conversion for a pair
    pub fn get(&self, from: Grammar, to: Grammar) -> Result<ConvertFn, ConvertError> {
        self.converters
            .get(&(from, to))
            .copied()
            .ok_or_else(|| ConvertError::unsupported(from, to))
    }

    /// Check if a pair has a conversion
    pub fn has(&self, from: Grammar, to: Grammar) -> bool {
        self.converters.contains_key(&(from, to))
    }

    /// List all registered pairs (sorted)
    pub fn pairs(&self) -> Vec<(Grammar, Grammar)> {
        let mut pairs: Vec<_> = self.converters.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// Convert `content` from one grammar to another.
    ///
    /// The same grammar on both sides returns the content unchanged with one
    /// informational warning, whether or not a conversion is registered.
    pub fn convert(
        &self,
        content: &str,
        from: Grammar,
        to: Grammar,
        options: &ConvertOptions,
    ) -> Result<Conversion, ConvertError> {
        if from == to {
            return Ok(Conversion::unchanged(content));
        }
        let convert = self.get(from, to)?;
        let conversion = convert(content, options);
        log::trace!(
            "converted {} to {}: {} bytes, {} warning(s)",
            from,
            to,
            conversion.text.len(),
            conversion.warnings.len()
        );
        Ok(conversion)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
