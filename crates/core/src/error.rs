use crate::Grammar;
use thiserror::Error;

/// Errors that can occur when selecting or running a conversion.
///
/// Content never produces an error: anything lossy or unusual in a document
/// is reported through [`Warnings`] and degraded in the output instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No converter is registered for the declared grammar pair.
    #[error("no conversion defined from {from} to {to}")]
    UnsupportedGrammarPair {
        /// Source grammar
        from: Grammar,
        /// Destination grammar
        to: Grammar,
    },
    /// A grammar tag did not name any known grammar.
    #[error("unknown format: {0} (use 'markdown' or 'mycomarkup')")]
    UnknownGrammar(String),
}

impl ConvertError {
    /// Create an unsupported pair error
    pub fn unsupported(from: Grammar, to: Grammar) -> Self {
        Self::UnsupportedGrammarPair { from, to }
    }
}

/// Ordered, append-only log of lossy-conversion notices.
///
/// One collector is created per conversion call and handed back to the
/// caller together with the converted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    entries: Vec<String>,
}

impl Warnings {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a warning.
    pub fn push(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        log::debug!("conversion warning: {}", warning);
        self.entries.push(warning);
    }

    /// Number of collected warnings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the warnings in the order they were pushed.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Consume the collector, returning the warnings in order.
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_keep_push_order() {
        let mut warnings = Warnings::new();
        assert!(warnings.is_empty());

        warnings.push("first");
        warnings.push(String::from("second"));

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings.iter().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(warnings.into_vec(), vec!["first", "second"]);
    }

    #[test]
    fn unsupported_pair_message_names_both_grammars() {
        let err = ConvertError::unsupported(Grammar::Markdown, Grammar::Mycomarkup);
        assert_eq!(
            err.to_string(),
            "no conversion defined from Markdown to Mycomarkup"
        );
    }
}
