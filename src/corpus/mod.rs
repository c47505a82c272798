pub mod extract;
pub mod filter;
pub mod normalize;

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::{
    corpus::{filter::CardFilter, normalize::normalize},
    repository::CardRepository,
};

/// Order-sensitive hash over a sequence of document texts
///
/// A model fitted on texts with a given fingerprint has one document vector
/// per text, in the same order, for any corpus with the same fingerprint.
#[derive(Debug, Clone, Default)]
pub struct TextFingerprint(DefaultHasher);

impl TextFingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        text.hash(&mut self.0);
    }

    pub fn value(&self) -> u64 {
        self.0.finish()
    }

    pub fn of<T: AsRef<str>>(texts: &[T]) -> u64 {
        let mut fingerprint = Self::new();
        for text in texts {
            fingerprint.push(text.as_ref());
        }
        fingerprint.value()
    }
}

/// Card names and their normalized rules text, index aligned
///
/// `names[i]` owns `texts[i]`. Names are unique and keep the order in which
/// the repository yielded them.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    names: IndexSet<String>,
    texts: Vec<String>,
    fingerprint: TextFingerprint,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document
    ///
    /// # Returns
    /// * `bool` - false if the name was already present (nothing is added)
    pub fn push(&mut self, name: impl Into<String>, text: impl Into<String>) -> bool {
        if !self.names.insert(name.into()) {
            return false;
        }
        let text = text.into();
        self.fingerprint.push(&text);
        self.texts.push(text);
        true
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(String::as_str)
    }

    /// Position of a card in the corpus
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Fingerprint of the texts in corpus order
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint.value()
    }

    /// (name, text) pairs in corpus order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names().zip(self.texts.iter().map(String::as_str))
    }
}

/// Build the corpus from every non-excluded card in repository order
///
/// Each kept card's text is extracted and normalized against its own name.
pub fn build_corpus<R, F>(repository: &R, filter: &F) -> Corpus
where
    R: CardRepository + ?Sized,
    F: CardFilter + ?Sized,
{
    let mut corpus = Corpus::new();
    let mut excluded = 0usize;
    for record in repository.cards() {
        if filter.excludes(record) {
            debug!(card = record.name(), "excluded from corpus");
            excluded += 1;
            continue;
        }
        let text = normalize(&record.joined_text(), record.name());
        if !corpus.push(record.name(), text) {
            warn!(card = record.name(), "duplicate card name skipped");
        }
    }
    info!(documents = corpus.len(), excluded, "built corpus");
    corpus
}
