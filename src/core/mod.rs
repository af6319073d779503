//! Core modules for Linguimage

pub mod achievements;
pub mod engine;
pub mod scheduler;

pub use achievements::AchievementLog;
pub use engine::GameEngine;
pub use scheduler::{MissEntry, Scheduler};
