//! Effect descriptors emitted by the engine
//!
//! The engine never touches platform audio or timers itself; it describes what
//! should happen and the driver interprets. Audio effects are fire-and-forget:
//! a driver that cannot play sound drops them without feeding anything back
//! into game state.

use serde::{Deserialize, Serialize};

use crate::types::Event;

/// Feedback sound played after a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cue {
    /// Right-answer ding
    Correct,
    /// Wrong-answer ding
    Incorrect,
}

/// One side effect requested by a state transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Play the verb pronunciation (rate 1.0 normal, 0.5 slow)
    PlayVerb { audio: String, rate: f32 },
    /// Play a right/wrong feedback cue
    PlayCue(Cue),
    /// Start (or resume) the background music loop
    MusicOn { volume: f32 },
    /// Pause the background music loop
    MusicOff,
    /// Adjust the music volume, 0.0-1.0
    MusicVolume(f32),
    /// Show an achievement banner
    ShowBanner(String),
    /// Hide the achievement banner
    ClearBanner,
    /// Deliver `then` back to the engine after `ms` milliseconds
    Delay { ms: u64, then: Event },
}
