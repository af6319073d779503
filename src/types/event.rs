//! Input events for the game engine
//!
//! Every state transition is driven by one of these, fed to
//! `GameEngine::handle` by the outer driver. Timer events (`AdvanceDue`,
//! `BannerExpired`) come back from `Effect::Delay` descriptors, which keeps
//! the transitions themselves synchronous and testable.

use serde::{Deserialize, Serialize};

use crate::{RATE_NORMAL, RATE_SLOW};

/// Pronunciation replay speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplaySpeed {
    Normal,
    Slow,
}

impl ReplaySpeed {
    /// Playback rate passed to the audio side channel
    pub fn rate(&self) -> f32 {
        match self {
            ReplaySpeed::Normal => RATE_NORMAL,
            ReplaySpeed::Slow => RATE_SLOW,
        }
    }
}

/// A discrete user-interaction or timer-completion event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Start (or restart) the game: fresh cycle, score and miss queue cleared
    Start,
    /// The player clicked the option with this label
    Guess(String),
    /// The 1-second post-correct delay elapsed; move to the next round
    AdvanceDue,
    /// The 5-second achievement banner window elapsed
    BannerExpired,
    /// Replay the current verb's pronunciation
    Replay(ReplaySpeed),
    /// Toggle the background music loop
    ToggleMusic,
    /// Toggle automatic pronunciation at round start
    ToggleAutoplay,
    /// Music volume slider moved, 0-100
    SetVolume(u8),
}
