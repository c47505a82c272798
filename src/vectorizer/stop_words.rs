use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::Analyzer;

/// Words too common in rules text to tell cards apart
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "of", "to", "and", "or", "is", "it", "its",
    "that", "this", "as", "at", "be", "by", "for", "from", "in", "into",
    "on", "with", "you", "your", "their", "they", "may", "each", "if", "then",
    "can", "are", "has", "have", "any", "all", "one", "card", "cards", "until",
];

/// Configured stop-word list
///
/// Serialized as a plain list of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWords {
    words: IndexSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).collect() }
    }

    /// No stop words
    pub fn empty() -> Self {
        Self { words: IndexSet::new() }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// The words together with the terms `analyzer` makes of them
    ///
    /// Terms are compared after analysis, so a stop word matches both
    /// itself and its stem.
    pub fn terms_for<A>(&self, analyzer: &A) -> HashSet<String>
    where
        A: Analyzer + ?Sized,
    {
        let mut terms: HashSet<String> = self.words.iter().cloned().collect();
        for word in &self.words {
            terms.extend(analyzer.analyze(word));
        }
        terms
    }
}
