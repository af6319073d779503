//! Verb reference data
//!
//! A `VerbEntry` is one vocabulary item: the source-language verb shown to the
//! player, the target-language label that counts as the correct answer, opaque
//! audio/image handles, and an exception list naming confusable verbs that must
//! never appear as distractors alongside it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::MIN_DATASET_SIZE;

/// Errors raised while loading or validating the bundled datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset has {found} verbs, need at least {MIN_DATASET_SIZE} for a four-option round")]
    TooSmall { found: usize },

    #[error("duplicate source text in dataset: {0}")]
    DuplicateSource(String),
}

/// One vocabulary item, immutable after load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbEntry {
    /// Source-language verb shown as the round prompt
    pub source: String,
    /// Target-language label; matching it is the correct answer
    pub target: String,
    /// Opaque handle for the pronunciation audio
    pub audio: String,
    /// Opaque handle for the option image (neutral until guessed)
    pub image: String,
    /// Source texts of confusable verbs, excluded from this verb's rounds.
    /// The JSON form accepts a single string or an array.
    #[serde(default, deserialize_with = "one_or_many")]
    pub exceptions: Vec<String>,
}

impl VerbEntry {
    /// Does this verb declare `source` as a confusable exception?
    pub fn has_exception(&self, source: &str) -> bool {
        self.exceptions.iter().any(|e| e == source)
    }
}

/// Accept `"exceptions": "ser"` as well as `"exceptions": ["ser", "estar"]`
fn one_or_many<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(de)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// The full verb dataset, validated once at startup
#[derive(Debug, Clone)]
pub struct VerbDataset {
    verbs: Vec<VerbEntry>,
}

impl VerbDataset {
    /// Build a dataset, enforcing the option-generation invariants:
    /// at least four entries, all with distinct source texts.
    pub fn new(verbs: Vec<VerbEntry>) -> Result<Self, DatasetError> {
        if verbs.len() < MIN_DATASET_SIZE {
            return Err(DatasetError::TooSmall { found: verbs.len() });
        }

        let mut seen = HashSet::new();
        for verb in &verbs {
            if !seen.insert(verb.source.as_str()) {
                return Err(DatasetError::DuplicateSource(verb.source.clone()));
            }
        }

        Ok(Self { verbs })
    }

    /// Parse a dataset from a JSON array of verb records
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let verbs: Vec<VerbEntry> = serde_json::from_str(json)?;
        Self::new(verbs)
    }

    /// Load and validate a dataset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All entries, in file order
    pub fn verbs(&self) -> &[VerbEntry] {
        &self.verbs
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Always false for a validated dataset, kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str) -> VerbEntry {
        VerbEntry {
            source: source.to_string(),
            target: format!("to {}", source),
            audio: format!("audio/{}.mp3", source),
            image: format!("images/{}.png", source),
            exceptions: Vec::new(),
        }
    }

    #[test]
    fn test_exceptions_accept_single_string() {
        let json = r#"{
            "source": "beber",
            "target": "to drink",
            "audio": "audio/beber.mp3",
            "image": "images/beber.png",
            "exceptions": "tomar"
        }"#;
        let verb: VerbEntry = serde_json::from_str(json).unwrap();
        assert_eq!(verb.exceptions, vec!["tomar".to_string()]);
    }

    #[test]
    fn test_exceptions_accept_array() {
        let json = r#"{
            "source": "llevar",
            "target": "to carry",
            "audio": "audio/llevar.mp3",
            "image": "images/llevar.png",
            "exceptions": ["traer", "tomar"]
        }"#;
        let verb: VerbEntry = serde_json::from_str(json).unwrap();
        assert_eq!(verb.exceptions.len(), 2);
        assert!(verb.has_exception("traer"));
        assert!(verb.has_exception("tomar"));
    }

    #[test]
    fn test_exceptions_default_empty() {
        let json = r#"{
            "source": "hablar",
            "target": "to speak",
            "audio": "audio/hablar.mp3",
            "image": "images/hablar.png"
        }"#;
        let verb: VerbEntry = serde_json::from_str(json).unwrap();
        assert!(verb.exceptions.is_empty());
    }

    #[test]
    fn test_dataset_rejects_too_small() {
        let verbs = vec![entry("a"), entry("b"), entry("c")];
        match VerbDataset::new(verbs) {
            Err(DatasetError::TooSmall { found }) => assert_eq!(found, 3),
            other => panic!("expected TooSmall, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_dataset_rejects_duplicate_source() {
        let verbs = vec![entry("a"), entry("b"), entry("c"), entry("b")];
        match VerbDataset::new(verbs) {
            Err(DatasetError::DuplicateSource(s)) => assert_eq!(s, "b"),
            other => panic!("expected DuplicateSource, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_dataset_accepts_minimum() {
        let verbs = vec![entry("a"), entry("b"), entry("c"), entry("d")];
        let dataset = VerbDataset::new(verbs).unwrap();
        assert_eq!(dataset.len(), 4);
    }
}
