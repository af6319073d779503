//! Display output structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Marker, RoundOption};

/// One option as presented to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionView {
    pub label: String,
    pub image: String,
    pub marker: Marker,
}

impl From<&RoundOption> for OptionView {
    fn from(option: &RoundOption) -> Self {
        Self {
            label: option.label.clone(),
            image: option.image.clone(),
            marker: option.marker,
        }
    }
}

/// Snapshot of everything visible in the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundView {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Cursor position in the current cycle
    pub round: usize,
    /// Source-language verb being asked
    pub prompt: String,
    /// Up to four options in presentation order
    pub options: Vec<OptionView>,
    /// Current score
    pub score: u32,
    /// Active achievement banner, if any
    pub banner: Option<String>,
}

impl RoundView {
    pub fn new(
        round: usize,
        prompt: impl Into<String>,
        options: &[RoundOption],
        score: u32,
        banner: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            round,
            prompt: prompt.into(),
            options: options.iter().map(OptionView::from).collect(),
            score,
            banner,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mut out = format!("Score: {}\nCurrent verb: \x1b[1m{}\x1b[0m\n", self.score, self.prompt);
        for (i, option) in self.options.iter().enumerate() {
            let color = option.marker.color_code();
            let reset = Marker::color_reset();
            out.push_str(&format!(
                "  {}{}. [{}] {}{}\n",
                color,
                i + 1,
                option.marker.symbol(),
                option.label,
                reset
            ));
        }
        if let Some(ref banner) = self.banner {
            out.push_str(&format!("\x1b[33m★ {}\x1b[0m\n", banner));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| format!("{}[{}]", o.label, o.marker))
            .collect();
        format!(
            "round={} | verb={} | score={} | options={}",
            self.round,
            self.prompt,
            self.score,
            options.join(",")
        )
    }
}
