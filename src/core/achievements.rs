//! Achievement milestone tracking

use std::collections::BTreeSet;

use crate::types::{Achievement, AchievementTable};

/// Tracks which milestones have fired. The achieved set only grows: a
/// milestone never re-triggers, even if the score later drops below its
/// threshold and climbs back.
#[derive(Debug)]
pub struct AchievementLog {
    table: AchievementTable,
    achieved: BTreeSet<u32>,
}

impl AchievementLog {
    pub fn new(table: AchievementTable) -> Self {
        Self {
            table,
            achieved: BTreeSet::new(),
        }
    }

    /// Check the score against the table, in table order. Returns the newly
    /// crossed milestones and records them as achieved.
    pub fn unlock(&mut self, score: u32) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for achievement in self.table.achievements() {
            if score >= achievement.score && self.achieved.insert(achievement.score) {
                unlocked.push(achievement.clone());
            }
        }
        unlocked
    }

    /// Thresholds already triggered this session
    pub fn achieved(&self) -> &BTreeSet<u32> {
        &self.achieved
    }
}

// =============================================================================
// TESTS
// =============================================================================
