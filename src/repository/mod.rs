pub mod json;

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use crate::error::{Error, Result};

/// One face of a card as supplied by the card database
///
/// Split and multi-face cards carry several faces under one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFace {
    /// Rules text, absent for vanilla faces
    pub text: Option<String>,
    /// Card types (`Creature`, `Plane`, ...)
    pub types: BTreeSet<String>,
    /// Set codes this face was printed in
    pub printings: BTreeSet<String>,
    /// Format (lowercase) to legality string
    pub legalities: BTreeMap<String, String>,
}

impl CardFace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_printings<I, S>(mut self, printings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.printings.extend(printings.into_iter().map(Into::into));
        self
    }

    pub fn with_legality(mut self, format: &str, legality: impl Into<String>) -> Self {
        self.legalities.insert(format.to_ascii_lowercase(), legality.into());
        self
    }

    /// Legality string for a format, looked up case-insensitively
    pub fn legality(&self, format: &str) -> Option<&str> {
        self.legalities
            .get(&format.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// A card name with its ordered faces
///
/// Always holds at least one face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    name: String,
    faces: Vec<CardFace>,
}

impl CardRecord {
    /// Create a record, rejecting empty names and empty face lists
    pub fn new(name: impl Into<String>, faces: Vec<CardFace>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_card("card name is empty"));
        }
        if faces.is_empty() {
            return Err(Error::invalid_card(format!("card '{name}' has no faces")));
        }
        Ok(Self { name, faces })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    /// First face, the one the exclusion policy looks at
    pub fn primary_face(&self) -> &CardFace {
        &self.faces[0]
    }

    /// Union of printings across all faces
    pub fn printings(&self) -> BTreeSet<&str> {
        self.faces
            .iter()
            .flat_map(|face| face.printings.iter().map(String::as_str))
            .collect()
    }

    /// Face texts joined by a single space, skipping faces without text
    pub fn joined_text(&self) -> String {
        self.faces
            .iter()
            .filter_map(|face| face.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Read-only source of card records
///
/// Iteration order must be stable; the corpus inherits it.
pub trait CardRepository {
    /// Look up a card by its exact name
    fn card(&self, name: &str) -> Option<&CardRecord>;

    /// All cards in repository order
    fn cards(&self) -> Box<dyn Iterator<Item = &CardRecord> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Repository snapshot held in memory, keyed by card name in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    cards: IndexMap<String, CardRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records; a repeated name replaces the earlier record in place
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CardRecord>,
    {
        let mut repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, record: CardRecord) -> Option<CardRecord> {
        self.cards.insert(record.name.clone(), record)
    }

    /// Convenience for single-face cards
    pub fn insert_text(&mut self, name: &str, text: &str) -> Result<()> {
        let record = CardRecord::new(name, vec![CardFace::new().with_text(text)])?;
        self.insert(record);
        Ok(())
    }
}

impl CardRepository for InMemoryRepository {
    fn card(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(name)
    }

    fn cards(&self) -> Box<dyn Iterator<Item = &CardRecord> + '_> {
        Box::new(self.cards.values())
    }

    fn len(&self) -> usize {
        self.cards.len()
    }
}
