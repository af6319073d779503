//! Round scheduler: cycle traversal, distractor selection, miss requeueing
//!
//! The scheduler owns the shuffled traversal order (one "lap" over the
//! dataset), the round cursor, and the miss queue. Rules:
//! - a missed verb reappears `REAPPEARANCE_DELAY` rounds after the miss,
//!   inserted right behind the cursor; at most one pending entry per verb
//! - distractors exclude the current verb's exceptions in both directions
//! - when the lap is exhausted the cycle is reshuffled from the dataset and
//!   pending misses are rebased onto the new lap

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{VerbDataset, VerbEntry};
use crate::{DISTRACTOR_COUNT, OPTION_COUNT, REAPPEARANCE_DELAY};

/// A missed verb waiting to resurface
#[derive(Debug, Clone, PartialEq)]
pub struct MissEntry {
    pub verb: VerbEntry,
    /// Cycle index at which this verb becomes due (miss index + 4)
    pub reappearance_round: usize,
}

/// Selects which verb appears next and when missed verbs resurface
#[derive(Debug)]
pub struct Scheduler {
    /// Full dataset, cloned into a fresh permutation each lap
    dataset: Vec<VerbEntry>,
    /// Current lap: a permutation of the dataset, grown by reinsertions
    cycle: Vec<VerbEntry>,
    /// Cursor into the cycle, always valid while a round is active
    index: usize,
    /// Pending misses, in miss order
    misses: Vec<MissEntry>,
}

impl Scheduler {
    /// Create a scheduler with a freshly shuffled cycle
    pub fn new(dataset: &VerbDataset, rng: &mut impl Rng) -> Self {
        let mut scheduler = Self {
            dataset: dataset.verbs().to_vec(),
            cycle: Vec::new(),
            index: 0,
            misses: Vec::new(),
        };
        scheduler.reset(rng);
        scheduler
    }

    /// Start over: fresh permutation, cursor at 0, miss queue cleared
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.cycle = self.shuffled_dataset(rng);
        self.index = 0;
        self.misses.clear();
    }

    fn shuffled_dataset(&self, rng: &mut impl Rng) -> Vec<VerbEntry> {
        let mut cycle = self.dataset.clone();
        cycle.shuffle(rng);
        cycle
    }

    /// The verb being asked this round
    pub fn current(&self) -> &VerbEntry {
        &self.cycle[self.index]
    }

    /// Cursor position in the current lap
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current lap, including any reinserted misses
    pub fn cycle(&self) -> &[VerbEntry] {
        &self.cycle
    }

    /// Pending miss entries, in miss order
    pub fn misses(&self) -> &[MissEntry] {
        &self.misses
    }

    /// Build this round's option set: the current verb plus up to three
    /// distractors, in random presentation order.
    ///
    /// Distractors never include the current verb's exceptions, nor any verb
    /// whose own exceptions name a member of the excluded set. A short pool
    /// degrades to fewer options; the current verb is always present.
    pub fn pick_options(&self, rng: &mut impl Rng) -> Vec<VerbEntry> {
        let mut pool = self.eligible_distractors();
        pool.shuffle(rng);

        let mut options: Vec<VerbEntry> = Vec::with_capacity(OPTION_COUNT);
        options.push(self.current().clone());
        options.extend(pool.into_iter().take(DISTRACTOR_COUNT).cloned());
        options.shuffle(rng);
        options
    }

    /// Cycle entries eligible as distractors for the current verb, one per
    /// distinct source (reinserted misses duplicate entries in the cycle)
    fn eligible_distractors(&self) -> Vec<&VerbEntry> {
        let current = self.current();
        let mut excluded: HashSet<&str> = HashSet::new();
        excluded.insert(current.source.as_str());
        for exception in &current.exceptions {
            excluded.insert(exception.as_str());
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut pool = Vec::new();
        for verb in &self.cycle {
            if excluded.contains(verb.source.as_str()) {
                continue;
            }
            // symmetric exclusion: the distractor may not name the current
            // verb (or its exceptions) as confusable either
            if verb.exceptions.iter().any(|e| excluded.contains(e.as_str())) {
                continue;
            }
            if !seen.insert(verb.source.as_str()) {
                continue;
            }
            pool.push(verb);
        }
        pool
    }

    /// Queue the current verb to reappear `REAPPEARANCE_DELAY` rounds from
    /// now. A verb already pending is not queued twice.
    pub fn record_miss(&mut self) {
        let current = self.current().clone();
        if self.misses.iter().any(|m| m.verb.source == current.source) {
            return;
        }
        self.misses.push(MissEntry {
            reappearance_round: self.index + REAPPEARANCE_DELAY,
            verb: current,
        });
    }

    /// Finish the current round: reinsert due misses right behind the cursor
    /// (preserving queue order), then step the cursor or roll the lap over.
    /// Returns true on rollover.
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        let mut inserted = 0;
        let mut i = 0;
        while i < self.misses.len() {
            if self.misses[i].reappearance_round == self.index {
                let entry = self.misses.remove(i);
                self.cycle.insert(self.index + 1 + inserted, entry.verb);
                inserted += 1;
            } else {
                i += 1;
            }
        }

        if self.index + 1 < self.cycle.len() {
            self.index += 1;
            false
        } else {
            // Lap exhausted. Pending misses carry over, rebased onto the new
            // lap; anything due before the old lap ended has already fired,
            // so surviving targets land within the first few rounds.
            let old_len = self.cycle.len();
            for miss in &mut self.misses {
                miss.reappearance_round = miss.reappearance_round.saturating_sub(old_len);
            }
            self.cycle = self.shuffled_dataset(rng);
            self.index = 0;
            true
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
