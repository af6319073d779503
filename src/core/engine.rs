//! Game engine: single-writer state machine over events
//!
//! Owns every piece of mutable game state (score, cycle, cursor, miss queue,
//! option markers, audio preferences). The driver feeds `Event`s through
//! `handle` one at a time and interprets the returned `Effect`s; the engine
//! never sleeps, plays audio, or touches the terminal itself. Timer-driven
//! transitions come back as events from `Effect::Delay`, so every transition
//! here is synchronous and unit-testable.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::{AchievementLog, Scheduler};
use crate::types::{
    AchievementTable, Cue, Effect, Event, Marker, ReplaySpeed, RoundOption, RoundView, VerbDataset,
};
use crate::{
    ADVANCE_DELAY_MS, BANNER_DISPLAY_MS, DEFAULT_MUSIC_VOLUME, RATE_NORMAL, SCORE_CORRECT,
    SCORE_PENALTY,
};

/// The quiz game state machine
#[derive(Debug)]
pub struct GameEngine {
    scheduler: Scheduler,
    achievements: AchievementLog,
    rng: StdRng,
    score: u32,
    options: Vec<RoundOption>,
    clicked: Vec<String>,
    input_locked: bool,
    started: bool,
    banner: Option<String>,
    music_enabled: bool,
    music_volume: f32,
    autoplay: bool,
}

impl GameEngine {
    /// Create an engine seeded from OS entropy
    pub fn new(dataset: &VerbDataset, table: AchievementTable) -> Self {
        Self::with_rng(dataset, table, StdRng::from_os_rng())
    }

    /// Create an engine with a fixed seed, for deterministic runs and tests
    pub fn with_seed(dataset: &VerbDataset, table: AchievementTable, seed: u64) -> Self {
        Self::with_rng(dataset, table, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dataset: &VerbDataset, table: AchievementTable, mut rng: StdRng) -> Self {
        let scheduler = Scheduler::new(dataset, &mut rng);
        Self {
            scheduler,
            achievements: AchievementLog::new(table),
            rng,
            score: 0,
            options: Vec::new(),
            clicked: Vec::new(),
            input_locked: true,
            started: false,
            banner: None,
            music_enabled: true,
            music_volume: DEFAULT_MUSIC_VOLUME,
            autoplay: true,
        }
    }

    /// Process one event, returning the side effects the driver should run
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Start => self.start(),
            Event::Guess(label) => self.guess(&label),
            Event::AdvanceDue => self.advance(),
            Event::BannerExpired => {
                self.banner = None;
                vec![Effect::ClearBanner]
            }
            Event::Replay(speed) => self.replay(speed),
            Event::ToggleMusic => self.toggle_music(),
            Event::ToggleAutoplay => {
                self.autoplay = !self.autoplay;
                Vec::new()
            }
            Event::SetVolume(percent) => self.set_volume(percent),
        }
    }

    /// Start (or restart) the game. Milestones already achieved this session
    /// stay achieved; everything else resets.
    fn start(&mut self) -> Vec<Effect> {
        self.started = true;
        self.score = 0;
        self.scheduler.reset(&mut self.rng);

        let mut effects = Vec::new();
        if self.music_enabled {
            // Music restarts from the top when a game begins
            effects.push(Effect::MusicOn {
                volume: self.music_volume,
            });
        }
        effects.extend(self.setup_round());
        effects
    }

    /// Build the option set for the verb under the cursor and unlock input
    fn setup_round(&mut self) -> Vec<Effect> {
        let picks = self.scheduler.pick_options(&mut self.rng);
        self.options = picks
            .iter()
            .map(|v| RoundOption::new(&v.target, &v.image))
            .collect();
        self.clicked.clear();
        self.input_locked = false;

        if self.autoplay {
            vec![Effect::PlayVerb {
                audio: self.scheduler.current().audio.clone(),
                rate: RATE_NORMAL,
            }]
        } else {
            Vec::new()
        }
    }

    fn guess(&mut self, label: &str) -> Vec<Effect> {
        if !self.started || self.input_locked {
            return Vec::new();
        }
        if self.clicked.iter().any(|c| c == label) {
            return Vec::new();
        }
        let Some(position) = self.options.iter().position(|o| o.label == label) else {
            return Vec::new();
        };
        self.clicked.push(label.to_string());

        if label == self.scheduler.current().target {
            self.correct_guess(position)
        } else {
            self.wrong_guess(position)
        }
    }

    fn correct_guess(&mut self, position: usize) -> Vec<Effect> {
        self.score += SCORE_CORRECT;
        self.options[position].marker = Marker::Correct;
        self.input_locked = true;

        let mut effects = vec![Effect::PlayCue(Cue::Correct)];
        for achievement in self.achievements.unlock(self.score) {
            self.banner = Some(achievement.message.clone());
            effects.push(Effect::ShowBanner(achievement.message));
            effects.push(Effect::Delay {
                ms: BANNER_DISPLAY_MS,
                then: Event::BannerExpired,
            });
        }
        effects.push(Effect::Delay {
            ms: ADVANCE_DELAY_MS,
            then: Event::AdvanceDue,
        });
        effects
    }

    fn wrong_guess(&mut self, position: usize) -> Vec<Effect> {
        self.score = self.score.saturating_sub(SCORE_PENALTY);
        self.options[position].marker = Marker::Incorrect;
        self.scheduler.record_miss();

        // Other options stay live; no advance until the right one is found
        vec![Effect::PlayCue(Cue::Incorrect)]
    }

    /// The 1-second post-correct delay elapsed: step the scheduler and set up
    /// the next round
    fn advance(&mut self) -> Vec<Effect> {
        if !self.started || !self.input_locked {
            return Vec::new();
        }
        self.scheduler.advance(&mut self.rng);
        self.setup_round()
    }

    fn replay(&mut self, speed: ReplaySpeed) -> Vec<Effect> {
        if !self.started {
            return Vec::new();
        }
        vec![Effect::PlayVerb {
            audio: self.scheduler.current().audio.clone(),
            rate: speed.rate(),
        }]
    }

    fn toggle_music(&mut self) -> Vec<Effect> {
        self.music_enabled = !self.music_enabled;
        if self.music_enabled {
            vec![Effect::MusicOn {
                volume: self.music_volume,
            }]
        } else {
            vec![Effect::MusicOff]
        }
    }

    /// Slider position 0-100 mapped to 0.0-1.0
    fn set_volume(&mut self, percent: u8) -> Vec<Effect> {
        let percent = percent.min(100);
        self.music_volume = f32::from(percent) / 100.0;
        vec![Effect::MusicVolume(self.music_volume)]
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Snapshot of the visible round state
    pub fn view(&self) -> RoundView {
        RoundView::new(
            self.scheduler.index(),
            &self.scheduler.current().source,
            &self.options,
            self.score,
            self.banner.clone(),
        )
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn options(&self) -> &[RoundOption] {
        &self.options
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Number of milestones triggered so far this session
    pub fn milestones_achieved(&self) -> usize {
        self.achievements.achieved().len()
    }

    /// The scheduler, for cycle/miss-queue inspection
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VerbEntry;

    fn verb(source: &str) -> VerbEntry {
        VerbEntry {
            source: source.to_string(),
            target: format!("to {}", source),
            audio: format!("audio/{}.mp3", source),
            image: format!("images/{}.png", source),
            exceptions: Vec::new(),
        }
    }

    fn engine_with(sources: &[&str], seed: u64) -> GameEngine {
        let dataset = VerbDataset::new(sources.iter().map(|s| verb(s)).collect()).unwrap();
        GameEngine::with_seed(&dataset, AchievementTable::default(), seed)
    }

    fn started_engine(seed: u64) -> GameEngine {
        let mut engine = engine_with(&["a", "b", "c", "d", "e", "f"], seed);
        engine.handle(Event::Start);
        engine
    }

    fn correct_label(engine: &GameEngine) -> String {
        engine.scheduler().current().target.clone()
    }

    fn wrong_label(engine: &GameEngine) -> String {
        let target = correct_label(engine);
        engine
            .options()
            .iter()
            .map(|o| o.label.clone())
            .find(|l| *l != target)
            .expect("round has at least one distractor")
    }

    #[test]
    fn test_start_builds_four_options() {
        let engine = started_engine(1);
        assert!(engine.started());
        assert!(!engine.input_locked());
        assert_eq!(engine.options().len(), 4);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_guess_before_start_is_noop() {
        let mut engine = engine_with(&["a", "b", "c", "d"], 1);
        let effects = engine.handle(Event::Guess("to a".to_string()));
        assert!(effects.is_empty());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_correct_guess_scores_and_schedules_advance() {
        let mut engine = started_engine(2);
        let label = correct_label(&engine);

        let effects = engine.handle(Event::Guess(label.clone()));
        assert_eq!(engine.score(), 1);
        assert!(engine.input_locked());

        assert!(effects.contains(&Effect::PlayCue(Cue::Correct)));
        assert!(effects.contains(&Effect::Delay {
            ms: ADVANCE_DELAY_MS,
            then: Event::AdvanceDue,
        }));

        let marked = engine.options().iter().find(|o| o.label == label).unwrap();
        assert_eq!(marked.marker, Marker::Correct);
    }

    #[test]
    fn test_wrong_guess_clamps_score_and_queues_miss() {
        let mut engine = started_engine(3);
        let label = wrong_label(&engine);

        let effects = engine.handle(Event::Guess(label.clone()));
        assert_eq!(engine.score(), 0, "0 - 3 clamps to 0");
        assert!(!engine.input_locked(), "other options stay guessable");
        assert_eq!(effects, vec![Effect::PlayCue(Cue::Incorrect)]);
        assert_eq!(engine.scheduler().misses().len(), 1);

        let marked = engine.options().iter().find(|o| o.label == label).unwrap();
        assert_eq!(marked.marker, Marker::Incorrect);
    }

    #[test]
    fn test_score_two_minus_penalty_is_zero() {
        let mut engine = started_engine(4);
        for _ in 0..2 {
            let label = correct_label(&engine);
            engine.handle(Event::Guess(label));
            engine.handle(Event::AdvanceDue);
        }
        assert_eq!(engine.score(), 2);

        let label = wrong_label(&engine);
        engine.handle(Event::Guess(label));
        assert_eq!(engine.score(), 0, "2 - 3 clamps to 0, not -1");
    }

    #[test]
    fn test_repeated_click_ignored() {
        let mut engine = started_engine(5);
        let label = wrong_label(&engine);

        engine.handle(Event::Guess(label.clone()));
        let effects = engine.handle(Event::Guess(label));
        assert!(effects.is_empty(), "second click on same option is a no-op");
        assert_eq!(engine.scheduler().misses().len(), 1);
    }

    #[test]
    fn test_guess_ignored_while_locked() {
        let mut engine = started_engine(6);
        let label = correct_label(&engine);
        engine.handle(Event::Guess(label));

        let other = wrong_label(&engine);
        let effects = engine.handle(Event::Guess(other));
        assert!(effects.is_empty());
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_unknown_label_ignored() {
        let mut engine = started_engine(7);
        let effects = engine.handle(Event::Guess("no such option".to_string()));
        assert!(effects.is_empty());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_advance_sets_up_next_round() {
        let mut engine = started_engine(8);
        let label = correct_label(&engine);
        engine.handle(Event::Guess(label));

        engine.handle(Event::AdvanceDue);
        assert_eq!(engine.scheduler().index(), 1);
        assert!(!engine.input_locked());
        assert_eq!(engine.options().len(), 4);
        assert!(engine
            .options()
            .iter()
            .all(|o| o.marker == Marker::Neutral));
    }

    #[test]
    fn test_spurious_advance_ignored() {
        let mut engine = started_engine(9);
        let effects = engine.handle(Event::AdvanceDue);
        assert!(effects.is_empty());
        assert_eq!(engine.scheduler().index(), 0);
    }

    #[test]
    fn test_replay_speeds() {
        let mut engine = started_engine(10);
        let audio = engine.scheduler().current().audio.clone();

        let normal = engine.handle(Event::Replay(ReplaySpeed::Normal));
        assert_eq!(
            normal,
            vec![Effect::PlayVerb {
                audio: audio.clone(),
                rate: 1.0,
            }]
        );

        let slow = engine.handle(Event::Replay(ReplaySpeed::Slow));
        assert_eq!(slow, vec![Effect::PlayVerb { audio, rate: 0.5 }]);
    }

    #[test]
    fn test_music_toggle_and_volume() {
        let mut engine = started_engine(11);
        assert!(engine.music_enabled());

        let off = engine.handle(Event::ToggleMusic);
        assert_eq!(off, vec![Effect::MusicOff]);

        let effects = engine.handle(Event::SetVolume(45));
        assert_eq!(effects, vec![Effect::MusicVolume(0.45)]);

        let on = engine.handle(Event::ToggleMusic);
        assert_eq!(on, vec![Effect::MusicOn { volume: 0.45 }]);
    }

    #[test]
    fn test_volume_clamped_to_100() {
        let mut engine = started_engine(12);
        engine.handle(Event::SetVolume(200));
        assert_eq!(engine.music_volume(), 1.0);
    }

    #[test]
    fn test_autoplay_toggle_silences_round_start() {
        let mut engine = started_engine(13);
        engine.handle(Event::ToggleAutoplay);

        let label = correct_label(&engine);
        engine.handle(Event::Guess(label));
        let effects = engine.handle(Event::AdvanceDue);
        assert!(
            !effects.iter().any(|e| matches!(e, Effect::PlayVerb { .. })),
            "no pronunciation autoplay when disabled"
        );
    }

    #[test]
    fn test_banner_expiry_clears() {
        let mut engine = started_engine(14);
        // No achievements configured, so force a banner through the view path
        let effects = engine.handle(Event::BannerExpired);
        assert_eq!(effects, vec![Effect::ClearBanner]);
        assert!(engine.banner().is_none());
    }
}
