//! # Game Shell
//!
//! Ties a [`Session`] to its collaborators: the save slot, the audio sink, and
//! the random source, all passed in at construction. The shell also tracks
//! which screen is showing and gates level selection.
//!
//! ## Screens
//! ```text
//! Menu -> LevelSelect -> Playing --level complete--> LevelSelect
//!   ^          |            |
//!   +--back----+            +--leave--> LevelSelect
//! ```

use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::audio::{AudioCues, Cue, GatedAudio};
use crate::catalog::{self, Clef, LEVEL_COUNT};
use crate::config::{GameConfig, Settings};
use crate::error::TrainerError;
use crate::generator::Note;
use crate::judge::Answer;
use crate::keyboard::{self, Key};
use crate::pitch::Pitch;
use crate::progress::ProgressBook;
use crate::save::{SaveData, SaveStore};
use crate::session::{Effect, LevelResult, Phase, PigMood, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Menu,
    LevelSelect,
    Playing,
}

/// One entry on the level select screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelCard {
    pub level: u8,
    pub description: &'static str,
    pub oinks: u8,
    pub unlocked: bool,
}

/// Everything the renderer needs for one frame of play
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub clef: Clef,
    pub note: Option<Note>,
    pub hint: bool,
    pub mood: PigMood,
    pub keys: Vec<Key>,
    pub notes_completed: u32,
    pub notes_in_level: u32,
    pub streak: u32,
    pub pig_coins: u32,
    pub score: u32,
}

pub struct Game<S, A, R> {
    store: S,
    audio: GatedAudio<A>,
    rng: R,
    config: GameConfig,
    save: SaveData,
    clef: Clef,
    screen: Screen,
    session: Session,
    last_result: Option<LevelResult>,
    save_error: Option<TrainerError>,
}

impl<S: SaveStore, A: AudioCues, R: Rng> Game<S, A, R> {
    /// Load the save slot and open on the menu.
    ///
    /// Without a usable save, progress starts empty and settings come from
    /// `config`.
    pub fn new(mut store: S, audio: A, rng: R, config: GameConfig) -> Self {
        let save = store.load().unwrap_or_else(|| SaveData {
            settings: config.settings,
            ..SaveData::default()
        });
        let audio = GatedAudio::new(audio, save.settings);
        let session = Session::new(config.coin_reward);

        Self {
            store,
            audio,
            rng,
            config,
            save,
            clef: Clef::default(),
            screen: Screen::Menu,
            session,
            last_result: None,
            save_error: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn save_data(&self) -> &SaveData {
        &self.save
    }

    pub fn progress(&self) -> &ProgressBook {
        &self.save.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.save.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        self.audio.inner()
    }

    /// Result of the most recently finished level.
    pub fn last_result(&self) -> Option<&LevelResult> {
        self.last_result.as_ref()
    }

    /// Take the error from the last failed save at level completion.
    ///
    /// A failed write does not undo the level; the progress stays in memory
    /// and is written again with the next save.
    pub fn take_save_error(&mut self) -> Option<TrainerError> {
        self.save_error.take()
    }

    pub fn open_level_select(&mut self) {
        self.screen = Screen::LevelSelect;
    }

    pub fn back_to_menu(&mut self) {
        self.abandon();
        self.screen = Screen::Menu;
    }

    /// Switch clef. Any level in progress is abandoned.
    pub fn select_clef(&mut self, clef: Clef) {
        if clef != self.clef {
            log::info!("Switching to {} clef", clef);
            self.abandon();
            if self.screen == Screen::Playing {
                self.screen = Screen::LevelSelect;
            }
        }
        self.clef = clef;
    }

    /// Replace the settings and persist them.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), TrainerError> {
        self.save.settings = settings.sanitized();
        self.audio.update_settings(self.save.settings);
        self.store.save(&self.save)
    }

    pub fn level_cards(&self) -> Vec<LevelCard> {
        (1..=LEVEL_COUNT)
            .map(|level| LevelCard {
                level,
                description: catalog::level_description(level),
                oinks: self.save.progress.oinks(level),
                unlocked: self.save.progress.is_unlocked(level),
            })
            .collect()
    }

    /// Start `level` on the selected clef and draw its first note.
    ///
    /// # Errors
    /// - [`TrainerError::UnknownLevel`] outside `1..=LEVEL_COUNT`
    /// - [`TrainerError::LevelLocked`] until the previous level has oinks
    pub fn start_level(&mut self, level: u8) -> Result<(), TrainerError> {
        if !(1..=LEVEL_COUNT).contains(&level) {
            return Err(TrainerError::UnknownLevel(level));
        }
        if !self.save.progress.is_unlocked(level) {
            return Err(TrainerError::LevelLocked(level));
        }

        self.session.enter(
            self.clef,
            level,
            self.config.notes_in_level,
            self.save.pig_coins,
        );
        self.session.draw_note(&mut self.rng)?;
        self.last_result = None;
        self.screen = Screen::Playing;
        Ok(())
    }

    /// Press a piano key.
    ///
    /// Audio cues are played here; the returned effects let the host animate
    /// the mascot and schedule mood timers. A level that completes but fails
    /// to save still returns its effects; see [`Game::take_save_error`].
    pub fn press_key(&mut self, pitch: Pitch, response_time: Duration) -> Result<Vec<Effect>, TrainerError> {
        let answer = Answer::new(pitch, response_time);
        let effects = self.session.submit(&answer, &self.save.settings)?;

        for effect in &effects {
            match effect {
                Effect::PlayNote(pitch) => self.audio.play(Cue::Note(*pitch)),
                Effect::PlayCorrect => self.audio.play(Cue::Correct),
                Effect::PlayIncorrect => self.audio.play(Cue::Incorrect),
                Effect::PlayLevelComplete => self.audio.play(Cue::LevelComplete),
                Effect::Answered {
                    correct,
                    streak,
                    response_time,
                } => self
                    .save
                    .statistics
                    .record_answer(*correct, *streak, *response_time),
                Effect::LevelComplete(result) => self.finish_level(result.clone())?,
                Effect::Mood { .. } => {}
            }
        }

        self.save.pig_coins = self.session.state().pig_coins;
        if self.session.phase() == Phase::AwaitingNote {
            self.session.draw_note(&mut self.rng)?;
        }
        Ok(effects)
    }

    /// Leave the level without finishing it. Coins earned so far are kept.
    pub fn leave_level(&mut self) {
        self.abandon();
        self.screen = Screen::LevelSelect;
    }

    pub fn mood_timeout(&mut self, generation: u64) -> bool {
        self.session.mood_timeout(generation)
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> StaffView {
        let state = self.session.state();
        let note = self.session.current_note().copied();
        let hint = self.session.hint_armed();
        let highlight = if hint { note.map(|n| n.pitch) } else { None };
        let keys = match self.session.phase() {
            Phase::Idle => Vec::new(),
            _ => keyboard::layout(self.session.pool(), highlight),
        };

        StaffView {
            clef: state.selected_clef,
            note,
            hint,
            mood: self.session.mood(),
            keys,
            notes_completed: state.notes_completed,
            notes_in_level: state.notes_in_level,
            streak: state.streak,
            pig_coins: state.pig_coins,
            score: state.score,
        }
    }

    fn finish_level(&mut self, result: LevelResult) -> Result<(), TrainerError> {
        self.save.pig_coins = self.session.state().pig_coins;
        self.save
            .progress
            .record(result.level, result.oinks, result.score)?;
        self.last_result = Some(result);
        self.screen = Screen::LevelSelect;
        self.save_error = match self.store.save(&self.save) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Could not save progress: {}", e);
                Some(e)
            }
        };
        Ok(())
    }

    fn abandon(&mut self) {
        if matches!(self.session.phase(), Phase::AwaitingNote | Phase::AwaitingAnswer) {
            log::info!(
                "Leaving level {} after {} notes",
                self.session.state().current_level,
                self.session.state().notes_completed
            );
            self.save.pig_coins = self.session.state().pig_coins;
        }
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::progress::LevelProgress;
    use crate::rng::create_rng;
    use crate::save::MemoryStore;
    use rand_pcg::Pcg32;

    type TestGame = Game<MemoryStore, SilentAudio, Pcg32>;

    fn game_with(store: MemoryStore) -> TestGame {
        Game::new(store, SilentAudio, create_rng(21), GameConfig::default())
    }

    fn current_pitch(game: &TestGame) -> Pitch {
        game.session().current_note().unwrap().pitch
    }

    fn answer_correctly(game: &mut TestGame, times: u32) {
        for _ in 0..times {
            let pitch = current_pitch(game);
            game.press_key(pitch, Duration::from_secs(1)).unwrap();
        }
    }

    #[test]
    fn test_starts_on_menu_with_defaults() {
        let game = game_with(MemoryStore::default());
        assert_eq!(game.screen(), Screen::Menu);
        assert_eq!(game.progress(), &ProgressBook::default());
        assert_eq!(game.settings(), &Settings::default());
    }

    #[test]
    fn test_config_settings_used_without_save() {
        let config = GameConfig {
            settings: Settings {
                show_hints: false,
                ..Settings::default()
            },
            ..GameConfig::default()
        };
        let game: TestGame = Game::new(MemoryStore::default(), SilentAudio, create_rng(1), config);
        assert!(!game.settings().show_hints);
    }

    #[test]
    fn test_locked_level_refused() {
        let mut game = game_with(MemoryStore::default());
        assert_eq!(game.start_level(2), Err(TrainerError::LevelLocked(2)));
        assert_eq!(game.start_level(0), Err(TrainerError::UnknownLevel(0)));
        assert_eq!(game.start_level(5), Err(TrainerError::UnknownLevel(5)));
        assert_eq!(game.screen(), Screen::Menu);
    }

    #[test]
    fn test_start_level_draws_first_note() {
        let mut game = game_with(MemoryStore::default());
        game.open_level_select();
        game.start_level(1).unwrap();
        assert_eq!(game.screen(), Screen::Playing);
        assert_eq!(game.session().phase(), Phase::AwaitingAnswer);
        assert!(game.view().note.is_some());
    }

    #[test]
    fn test_note_is_redrawn_after_correct_answer() {
        let mut game = game_with(MemoryStore::default());
        game.start_level(1).unwrap();
        answer_correctly(&mut game, 3);
        assert_eq!(game.session().phase(), Phase::AwaitingAnswer);
        assert!(game.session().current_note().is_some());
        assert_eq!(game.save_data().pig_coins, 30);
        assert_eq!(game.save_data().statistics.correct_notes, 3);
        assert_eq!(game.save_data().statistics.average_response_time, 1000.0);
    }

    #[test]
    fn test_completion_persists_and_unlocks() {
        let mut game = game_with(MemoryStore::default());
        game.start_level(1).unwrap();
        answer_correctly(&mut game, 10);

        assert_eq!(game.screen(), Screen::LevelSelect);
        assert_eq!(game.last_result().unwrap().oinks, 3);
        assert_eq!(game.store().writes(), 1);

        let saved = game.store().data().unwrap();
        assert_eq!(saved.progress.oinks(1), 3);
        assert_eq!(saved.pig_coins, 100);
        assert!(game.level_cards()[1].unlocked);
        assert!(!game.level_cards()[2].unlocked);
    }

    #[test]
    fn test_replay_never_lowers_oinks() {
        let mut data = SaveData::default();
        data.progress = ProgressBook::from_entries(vec![LevelProgress {
            level_number: 1,
            oinks: 3,
            best_score: 9000,
            completed: true,
        }]);
        let mut game = game_with(MemoryStore::with_data(data));
        game.start_level(1).unwrap();

        for _ in 0..10 {
            let pitch = current_pitch(&game);
            let wrong = *game.session().pool().iter().find(|p| **p != pitch).unwrap();
            game.press_key(wrong, Duration::from_secs(1)).unwrap();
            game.press_key(wrong, Duration::from_secs(1)).unwrap();
            game.press_key(pitch, Duration::from_secs(30)).unwrap();
        }

        assert_eq!(game.last_result().unwrap().oinks, 1);
        let saved = game.store().data().unwrap();
        assert_eq!(saved.progress.oinks(1), 3);
        assert_eq!(saved.progress.get(1).unwrap().best_score, 9000);
    }

    #[test]
    fn test_clef_change_abandons_level() {
        let mut game = game_with(MemoryStore::default());
        game.start_level(1).unwrap();
        answer_correctly(&mut game, 2);

        game.select_clef(Clef::Bass);
        assert_eq!(game.screen(), Screen::LevelSelect);
        assert_eq!(game.session().phase(), Phase::Idle);
        assert_eq!(game.save_data().pig_coins, 20);

        game.start_level(1).unwrap();
        let note = game.session().current_note().unwrap();
        assert_eq!(note.clef, Clef::Bass);
        assert!(catalog::pool(Clef::Bass, 1).unwrap().contains(&note.pitch));
        assert_eq!(game.session().state().notes_completed, 0);
    }

    #[test]
    fn test_view_highlights_hint_key() {
        let mut game = game_with(MemoryStore::default());
        game.start_level(1).unwrap();
        let pitch = current_pitch(&game);
        let wrong = *game.session().pool().iter().find(|p| **p != pitch).unwrap();
        game.press_key(wrong, Duration::from_secs(1)).unwrap();

        let view = game.view();
        assert!(view.hint);
        let lit: Vec<_> = view.keys.iter().filter(|k| k.highlighted).collect();
        assert_eq!(lit.len(), 1);
        assert_eq!(lit[0].pitch, pitch);
    }

    #[test]
    fn test_press_after_leaving_is_error() {
        let mut game = game_with(MemoryStore::default());
        game.start_level(1).unwrap();
        game.leave_level();
        let pitch: Pitch = "C4".parse().unwrap();
        assert_eq!(
            game.press_key(pitch, Duration::ZERO),
            Err(TrainerError::NoActiveLevel)
        );
    }

    #[test]
    fn test_update_settings_persists() {
        let mut game = game_with(MemoryStore::default());
        let settings = Settings {
            volume: 2.0,
            sound_effects: false,
            ..Settings::default()
        };
        game.update_settings(settings).unwrap();
        let saved = game.store().data().unwrap();
        assert_eq!(saved.settings.volume, 1.0);
        assert!(!saved.settings.sound_effects);
    }

    struct FailingStore;

    impl SaveStore for FailingStore {
        fn load(&mut self) -> Option<SaveData> {
            None
        }

        fn save(&mut self, _data: &SaveData) -> Result<(), TrainerError> {
            Err(TrainerError::Save("disk full".to_string()))
        }
    }

    #[test]
    fn test_failed_save_keeps_completion_effects() {
        let mut game: Game<FailingStore, SilentAudio, Pcg32> =
            Game::new(FailingStore, SilentAudio, create_rng(8), GameConfig::default());
        game.start_level(1).unwrap();

        let mut effects = Vec::new();
        for _ in 0..10 {
            let pitch = game.session().current_note().unwrap().pitch;
            effects = game.press_key(pitch, Duration::from_secs(1)).unwrap();
        }

        assert!(effects.contains(&Effect::PlayLevelComplete));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::LevelComplete(result) if result.oinks == 3)));
        assert_eq!(game.screen(), Screen::LevelSelect);
        assert_eq!(game.progress().oinks(1), 3);
        assert_eq!(
            game.take_save_error(),
            Some(TrainerError::Save("disk full".to_string()))
        );
        assert_eq!(game.take_save_error(), None);
    }
}
