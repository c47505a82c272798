use std::{collections::BTreeMap, fs, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::Result, repository::{CardFace, CardRecord, InMemoryRepository}};

/// A name maps either to a list of faces or, in the flat layout, to one face object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Faces(Vec<RawFace>),
    Single(RawFace),
}

/// Face as it appears on disk; unknown fields are ignored
#[derive(Debug, Deserialize)]
struct RawFace {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    printings: Vec<String>,
    #[serde(default)]
    legalities: Option<RawLegalities>,
}

/// Legalities come either as `{"commander": "Legal"}` or as
/// `[{"format": "Commander", "legality": "Legal"}]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLegalities {
    ByFormat(BTreeMap<String, String>),
    Listed(Vec<RawLegality>),
}

#[derive(Debug, Deserialize)]
struct RawLegality {
    format: String,
    legality: String,
}

impl From<RawFace> for CardFace {
    fn from(raw: RawFace) -> Self {
        let mut face = CardFace::new()
            .with_types(raw.types)
            .with_printings(raw.printings);
        face.text = raw.text;
        match raw.legalities {
            Some(RawLegalities::ByFormat(map)) => {
                for (format, legality) in map {
                    face = face.with_legality(&format, legality);
                }
            }
            Some(RawLegalities::Listed(list)) => {
                for entry in list {
                    face = face.with_legality(&entry.format, entry.legality);
                }
            }
            None => {}
        }
        face
    }
}

impl InMemoryRepository {
    /// Parse a card database JSON object (card name to face or face list)
    ///
    /// The file's key order becomes the repository iteration order.
    /// A name mapped to an empty face list is rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: IndexMap<String, RawEntry> = serde_json::from_str(json)?;
        let mut repo = InMemoryRepository::new();
        for (name, entry) in raw {
            let faces: Vec<CardFace> = match entry {
                RawEntry::Faces(faces) => faces.into_iter().map(CardFace::from).collect(),
                RawEntry::Single(face) => vec![CardFace::from(face)],
            };
            debug!(card = %name, faces = faces.len(), "loaded card");
            repo.insert(CardRecord::new(name, faces)?);
        }
        Ok(repo)
    }

    /// Read and parse a card database file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let repo = Self::from_json_str(&contents)?;
        info!(path = %path.display(), cards = repo.cards.len(), "loaded card database");
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, repository::CardRepository};

    use super::*;

    #[test]
    fn reads_single_and_multi_face_entries() {
        let json = r#"{
            "Giant Growth": {
                "text": "Target creature gets +3/+3 until end of turn.",
                "types": ["Instant"],
                "printings": ["LEA", "M10"],
                "legalities": {"commander": "Legal"}
            },
            "Fire // Ice": [
                {"text": "Fire deals 2 damage divided as you choose among one or two targets.", "types": ["Instant"], "printings": ["APC"]},
                {"text": "Tap target permanent. Draw a card.", "types": ["Instant"], "printings": ["APC"]}
            ]
        }"#;
        let repo = InMemoryRepository::from_json_str(json).unwrap();
        assert_eq!(repo.len(), 2);

        let growth = repo.card("Giant Growth").unwrap();
        assert_eq!(growth.faces().len(), 1);
        assert!(growth.primary_face().types.contains("Instant"));
        assert_eq!(growth.primary_face().legality("Commander"), Some("Legal"));

        let fire_ice = repo.card("Fire // Ice").unwrap();
        assert_eq!(fire_ice.faces().len(), 2);
    }

    #[test]
    fn preserves_file_order() {
        let json = r#"{"Zephyr Falcon": {"text": "Flying"}, "Abzan Guide": {"text": "Lifelink"}, "Mox Pearl": {}}"#;
        let repo = InMemoryRepository::from_json_str(json).unwrap();
        let names: Vec<&str> = repo.cards().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Zephyr Falcon", "Abzan Guide", "Mox Pearl"]);
        assert_eq!(repo.card("Mox Pearl").unwrap().primary_face().text, None);
    }

    #[test]
    fn accepts_listed_legalities_and_ignores_unknown_fields() {
        let json = r#"{"Lotus Petal": {
            "text": "Sacrifice Lotus Petal: Add one mana of any color.",
            "manaCost": "{0}",
            "legalities": [{"format": "Legacy", "legality": "Legal"}, {"format": "Standard", "legality": "Not Legal"}]
        }}"#;
        let repo = InMemoryRepository::from_json_str(json).unwrap();
        let face = repo.card("Lotus Petal").unwrap().primary_face();
        assert_eq!(face.legality("legacy"), Some("Legal"));
        assert_eq!(face.legality("standard"), Some("Not Legal"));
    }

    #[test]
    fn rejects_empty_face_list() {
        let err = InMemoryRepository::from_json_str(r#"{"Nothing": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidCard(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = InMemoryRepository::from_json_str(r#"["not", "an", "object"]"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
