//! Achievement milestone table

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::DatasetError;

/// One milestone: a score threshold and the banner message it unlocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Score threshold that triggers this milestone
    pub score: u32,
    /// Banner message shown for the display window
    pub message: String,
}

/// Ordered milestone definitions, checked in file order
#[derive(Debug, Clone, Default)]
pub struct AchievementTable {
    achievements: Vec<Achievement>,
}

impl AchievementTable {
    pub fn new(achievements: Vec<Achievement>) -> Self {
        Self { achievements }
    }

    /// Parse a table from a JSON array of `{score, message}` records
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let achievements: Vec<Achievement> = serde_json::from_str(json)?;
        Ok(Self::new(achievements))
    }

    /// Load a table file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All definitions, in file order
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
