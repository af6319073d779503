//! Core types for Linguimage

mod achievement;
mod effect;
mod event;
mod output;
mod round;
mod verb;

pub use achievement::{Achievement, AchievementTable};
pub use effect::{Cue, Effect};
pub use event::{Event, ReplaySpeed};
pub use output::{OptionView, RoundView};
pub use round::{Marker, RoundOption};
pub use verb::{DatasetError, VerbDataset, VerbEntry};
