//! Session state, phases, and the side-effect requests transitions emit.

use std::time::Duration;

use serde::Serialize;

use crate::catalog::Clef;
use crate::generator::Note;
use crate::pitch::Pitch;

/// Where a session is in its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No level entered
    Idle,
    /// Level running, next note not drawn yet
    AwaitingNote,
    /// Note on the staff, waiting for a key press
    AwaitingAnswer,
    /// Target reached; the session must be re-entered to play again
    LevelComplete,
}

/// Mascot expression. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PigMood {
    #[default]
    Idle,
    Happy,
    Encouraging,
    Celebrating,
}

impl PigMood {
    /// Whether the host should schedule a reset back to idle.
    pub fn is_transient(self) -> bool {
        matches!(self, PigMood::Happy | PigMood::Encouraging)
    }
}

/// Counters for the level being played
///
/// # Fields
/// - `strikes`: misses since the last correct answer (drives hints)
/// - `level_strikes`: misses over the whole level (drives oinks)
/// - `pig_coins`: carried in from the save data and kept across levels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_level: u8,
    pub selected_clef: Clef,
    pub current_note: Option<Note>,
    pub strikes: u32,
    pub level_strikes: u32,
    pub streak: u32,
    pub notes_completed: u32,
    pub notes_in_level: u32,
    pub pig_coins: u32,
    pub score: u32,
    pub hint_armed: bool,
}

impl SessionState {
    /// Fresh counters for a level. Coins carry over.
    pub fn new(clef: Clef, level: u8, notes_in_level: u32, pig_coins: u32) -> Self {
        Self {
            current_level: level,
            selected_clef: clef,
            current_note: None,
            strikes: 0,
            level_strikes: 0,
            streak: 0,
            notes_completed: 0,
            notes_in_level,
            pig_coins,
            score: 0,
            hint_armed: false,
        }
    }

    pub fn is_level_done(&self) -> bool {
        self.notes_completed >= self.notes_in_level
    }
}

/// Outcome of a finished level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    pub level: u8,
    pub clef: Clef,
    pub oinks: u8,
    pub accuracy: f64,
    pub score: u32,
    pub notes_completed: u32,
    pub strikes: u32,
}

/// Side-effect requests produced by a transition
///
/// The state machine never performs these itself; the owner forwards them to
/// audio, persistence, and the mascot.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PlayNote(Pitch),
    PlayCorrect,
    PlayIncorrect,
    PlayLevelComplete,
    /// Show a mood. Transient moods should be reset later with
    /// `mood_timeout(generation)`.
    Mood { mood: PigMood, generation: u64 },
    /// Record a judged answer in the lifetime statistics.
    Answered {
        correct: bool,
        streak: u32,
        response_time: Duration,
    },
    /// Persist the finished level.
    LevelComplete(LevelResult),
}
