//! Per-round option state

use serde::{Deserialize, Serialize};

/// Visual marker on an option: neutral until clicked, then right or wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Marker {
    /// Not guessed yet, shows the verb's own image
    Neutral,
    /// Clicked and correct (green tick)
    Correct,
    /// Clicked and wrong (red cross)
    Incorrect,
}

impl Marker {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Marker::Neutral => "\x1b[0m",
            Marker::Correct => "\x1b[32m",   // Green
            Marker::Incorrect => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get symbol for terminal display
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Neutral => " ",
            Marker::Correct => "✓",
            Marker::Incorrect => "✗",
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Marker::Neutral => "NEUTRAL",
            Marker::Correct => "CORRECT",
            Marker::Incorrect => "INCORRECT",
        };
        write!(f, "{}", name)
    }
}

/// One of the (up to) four options presented in a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOption {
    /// Target-language label shown on the option
    pub label: String,
    /// Opaque image handle, shown while the marker is neutral
    pub image: String,
    /// Current marker state
    pub marker: Marker,
}

impl RoundOption {
    pub fn new(label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            image: image.into(),
            marker: Marker::Neutral,
        }
    }
}
