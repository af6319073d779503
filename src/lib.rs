//! Linguimage: vocabulary quiz round scheduler
//!
//! A verb is shown (and pronounced), the player picks the matching label among
//! four options. Missed verbs resurface four rounds later; milestones pop a
//! banner. All game logic lives in `core::GameEngine`, a single-writer state
//! machine fed `Event`s and emitting `Effect`s for the outer driver.

pub mod core;
pub mod types;

// =============================================================================
// GAME CONSTANTS [C]
// =============================================================================

/// Points awarded for a correct guess
pub const SCORE_CORRECT: u32 = 1;

/// Points deducted for a wrong guess (score floors at 0)
pub const SCORE_PENALTY: u32 = 3;

/// Options presented per round (correct answer + distractors)
pub const OPTION_COUNT: usize = 4;

/// Distractors drawn from the eligible pool each round
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Rounds until a missed verb reappears in the cycle
pub const REAPPEARANCE_DELAY: usize = 4;

/// Pause between a correct guess and the next round (milliseconds)
pub const ADVANCE_DELAY_MS: u64 = 1000;

/// How long an achievement banner stays visible (milliseconds)
pub const BANNER_DISPLAY_MS: u64 = 5000;

/// Smallest dataset that can still fill a four-option round
pub const MIN_DATASET_SIZE: usize = 4;

// =============================================================================
// AUDIO PLAYBACK RATES [C]
// =============================================================================

/// Normal pronunciation playback rate
pub const RATE_NORMAL: f32 = 1.0;

/// Slow ("turtle") pronunciation playback rate
pub const RATE_SLOW: f32 = 0.5;

/// Default background music volume (20%)
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.2;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
