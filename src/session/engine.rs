//! Session state machine
//!
//! ```text
//!  Idle --enter--> AwaitingNote --draw--> AwaitingAnswer
//!                        ^                    |  |
//!                        +------correct-------+  | incorrect (stays)
//!                                             |
//!                            target reached   v
//!                                       LevelComplete
//! ```
//!
//! Every transition returns the [`Effect`]s it wants performed instead of
//! calling audio or storage itself.

use rand::Rng;

use crate::catalog::{self, Clef};
use crate::config::Settings;
use crate::error::TrainerError;
use crate::generator::{next_note, Note};
use crate::judge::{judge, Answer};
use crate::pitch::Pitch;
use crate::progress::{accuracy, calculate_oinks};

use super::types::{Effect, LevelResult, Phase, PigMood, SessionState};

/// Owner of the [`SessionState`] for one level attempt
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    state: SessionState,
    coin_reward: u32,
    mood: PigMood,
    mood_generation: u64,
}

impl Session {
    pub fn new(coin_reward: u32) -> Self {
        Self {
            phase: Phase::Idle,
            state: SessionState::new(Clef::default(), 0, 0, 0),
            coin_reward,
            mood: PigMood::Idle,
            mood_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mood(&self) -> PigMood {
        self.mood
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.state.current_note.as_ref()
    }

    pub fn hint_armed(&self) -> bool {
        self.state.hint_armed
    }

    /// The pitches the keyboard offers for this level.
    pub fn pool(&self) -> &'static [Pitch] {
        catalog::pool_or_first(self.state.selected_clef, self.state.current_level)
    }

    /// Start a level, resetting every per-level counter.
    ///
    /// Coins carry over from `pig_coins`. Entering again from any phase
    /// abandons the attempt in progress.
    pub fn enter(&mut self, clef: Clef, level: u8, notes_in_level: u32, pig_coins: u32) {
        log::info!("Entering {} clef level {} ({} notes)", clef, level, notes_in_level);
        self.state = SessionState::new(clef, level, notes_in_level, pig_coins);
        self.phase = Phase::AwaitingNote;
        self.mood = PigMood::Idle;
        self.mood_generation += 1;
    }

    /// Leave the level without finishing it.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.state.current_note = None;
        self.state.hint_armed = false;
        self.mood = PigMood::Idle;
        self.mood_generation += 1;
    }

    /// Draw the next note if none is showing.
    ///
    /// Does nothing outside `AwaitingNote`.
    ///
    /// # Errors
    /// Propagates [`TrainerError::CatalogMiss`] from the generator.
    pub fn draw_note<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<&Note>, TrainerError> {
        if self.phase == Phase::AwaitingNote {
            let note = next_note(rng, self.state.selected_clef, self.state.current_level)?;
            self.state.current_note = Some(note);
            self.phase = Phase::AwaitingAnswer;
        }
        Ok(self.state.current_note.as_ref())
    }

    /// Handle a key press.
    ///
    /// Keys outside the level's pool are disabled on the keyboard and
    /// ignored here, as are presses while no note is showing.
    ///
    /// # Errors
    /// - [`TrainerError::NoActiveLevel`] before a level is entered
    /// - [`TrainerError::LevelAlreadyComplete`] after the target is reached
    pub fn submit(&mut self, answer: &Answer, settings: &Settings) -> Result<Vec<Effect>, TrainerError> {
        match self.phase {
            Phase::Idle => return Err(TrainerError::NoActiveLevel),
            Phase::LevelComplete => {
                return Err(TrainerError::LevelAlreadyComplete(self.state.current_level))
            }
            Phase::AwaitingNote | Phase::AwaitingAnswer => {}
        }

        if !self.pool().contains(&answer.pitch) {
            log::debug!("Ignoring press of unavailable key {}", answer.pitch);
            return Ok(Vec::new());
        }

        let Some(verdict) = judge(answer, &self.state, settings, self.coin_reward) else {
            return Ok(Vec::new());
        };

        let mut effects = vec![Effect::PlayNote(answer.pitch)];
        verdict.delta.apply(&mut self.state);

        if verdict.correct {
            effects.push(Effect::PlayCorrect);
            effects.push(self.set_mood(PigMood::Happy));
            self.phase = Phase::AwaitingNote;
        } else {
            effects.push(Effect::PlayIncorrect);
            effects.push(self.set_mood(PigMood::Encouraging));
        }
        effects.push(Effect::Answered {
            correct: verdict.correct,
            streak: self.state.streak,
            response_time: answer.response_time,
        });

        if self.state.is_level_done() {
            effects.extend(self.complete());
        }

        Ok(effects)
    }

    /// Reset a transient mood, unless a newer mood replaced it.
    pub fn mood_timeout(&mut self, generation: u64) -> bool {
        if generation != self.mood_generation || !self.mood.is_transient() {
            return false;
        }
        self.mood = PigMood::Idle;
        true
    }

    fn set_mood(&mut self, mood: PigMood) -> Effect {
        self.mood = mood;
        self.mood_generation += 1;
        Effect::Mood {
            mood,
            generation: self.mood_generation,
        }
    }

    fn complete(&mut self) -> Vec<Effect> {
        let state = &self.state;
        let result = LevelResult {
            level: state.current_level,
            clef: state.selected_clef,
            oinks: calculate_oinks(state.notes_completed, state.level_strikes),
            accuracy: accuracy(state.notes_completed, state.level_strikes),
            score: state.score,
            notes_completed: state.notes_completed,
            strikes: state.level_strikes,
        };
        log::info!(
            "Level {} complete: {} oinks ({:.1}% accuracy, {} points)",
            result.level,
            result.oinks,
            result.accuracy,
            result.score
        );

        self.phase = Phase::LevelComplete;
        self.state.current_note = None;
        self.state.hint_armed = false;

        vec![
            Effect::PlayLevelComplete,
            self.set_mood(PigMood::Celebrating),
            Effect::LevelComplete(result),
        ]
    }
}
