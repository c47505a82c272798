use std::collections::BTreeSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::repository::{CardFace, CardRecord};

/// Card types whose text is not gameplay text
pub const DEFAULT_EXCLUDED_TYPES: &[&str] = &["Plane", "Scheme"];

/// Silver-border / joke sets and oversized commander products
pub const DEFAULT_EXCLUDED_SETS: &[&str] = &[
    "UGL", "UNH", "UST", "UND", "UNF", "PCEL", "PUST", "CMB1", "CMB2",
    "OCMD", "OC13", "OC14", "OC15", "OC16", "OC17", "OC18", "OC19", "OC20", "OC21",
    "OCM1", "OE01", "OARC", "OPCA", "OHOP", "OPC2",
];

/// Decides whether a card is kept out of the corpus
pub trait CardFilter {
    /// # Arguments
    /// * `face` - the card's primary face
    /// * `printings` - set codes the card was printed in
    fn is_excluded(&self, face: &CardFace, printings: &BTreeSet<&str>) -> bool;

    fn excludes(&self, record: &CardRecord) -> bool {
        self.is_excluded(record.primary_face(), &record.printings())
    }
}

/// Keeps every card
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl CardFilter for AcceptAll {
    fn is_excluded(&self, _face: &CardFace, _printings: &BTreeSet<&str>) -> bool {
        false
    }
}

/// Exclusion policy, evaluated in order:
/// 1. type in `excluded_types`
/// 2. any printing in `excluded_sets`
/// 3. when `required_format` is set, not `Legal` in that format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    pub excluded_types: IndexSet<String>,
    pub excluded_sets: IndexSet<String>,
    pub required_format: Option<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            excluded_types: DEFAULT_EXCLUDED_TYPES.iter().map(|s| s.to_string()).collect(),
            excluded_sets: DEFAULT_EXCLUDED_SETS.iter().map(|s| s.to_string()).collect(),
            required_format: None,
        }
    }
}

impl ExclusionConfig {
    /// Policy with no exclusions at all
    pub fn none() -> Self {
        Self {
            excluded_types: IndexSet::new(),
            excluded_sets: IndexSet::new(),
            required_format: None,
        }
    }

    pub fn with_required_format(mut self, format: impl Into<String>) -> Self {
        self.required_format = Some(format.into());
        self
    }
}

impl CardFilter for ExclusionConfig {
    fn is_excluded(&self, face: &CardFace, printings: &BTreeSet<&str>) -> bool {
        if face.types.iter().any(|t| self.excluded_types.contains(t)) {
            return true;
        }
        if printings.iter().any(|set| self.excluded_sets.contains(*set)) {
            return true;
        }
        if let Some(format) = &self.required_format {
            let legal = face
                .legality(format)
                .is_some_and(|legality| legality.eq_ignore_ascii_case("legal"));
            if !legal {
                return true;
            }
        }
        false
    }
}
