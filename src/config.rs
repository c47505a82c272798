use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{corpus::filter::ExclusionConfig, error::Result, vectorizer::stop_words::StopWords};

/// Default number of results per query
pub const DEFAULT_TOP_N: usize = 10;

/// Similarity search configuration
///
/// Every field is optional in JSON; missing fields take the built-in
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Which cards are left out of the corpus
    pub exclusion: ExclusionConfig,

    /// Words left out of the vocabulary
    pub stop_words: StopWords,

    /// Result count used when a query does not give one
    pub top_n: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            exclusion: ExclusionConfig::default(),
            stop_words: StopWords::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl SimilarityConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            excluded_sets = config.exclusion.excluded_sets.len(),
            stop_words = config.stop_words.len(),
            "loaded similarity config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SimilarityConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimilarityConfig::default());
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.exclusion.excluded_sets.contains("UGL"));
        assert!(config.stop_words.contains("the"));
    }

    #[test]
    fn partial_override() {
        let config = SimilarityConfig::from_json_str(
            r#"{
                "exclusion": { "excluded_sets": ["UST"], "required_format": "modern" },
                "stop_words": ["target"],
                "top_n": 3
            }"#,
        )
        .unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.exclusion.excluded_sets.len(), 1);
        assert!(config.exclusion.excluded_types.contains("Plane"));
        assert_eq!(config.exclusion.required_format.as_deref(), Some("modern"));
        assert!(config.stop_words.contains("target"));
        assert!(!config.stop_words.contains("the"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(SimilarityConfig::from_json_str("{"), Err(Error::Json(_))));
        assert!(matches!(SimilarityConfig::from_path("/nonexistent/config.json"), Err(Error::Io(_))));
    }
}
