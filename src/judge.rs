//! # Answer Judge
//!
//! Compares a pressed key with the note on the staff. Judging is pure: the
//! verdict carries a [`Delta`] describing how the counters change, and the
//! caller applies it.
//!
//! ## Correct
//! streak + 1, strikes reset, coins and points paid out, one more note
//! completed, the note is cleared so a new one is drawn, any hint is cleared.
//!
//! ## Incorrect
//! strikes + 1, streak reset. The first miss after a correct answer arms a
//! hint when hints are enabled; later misses in the same run leave it alone.

use std::time::Duration;

use crate::config::Settings;
use crate::pitch::Pitch;
use crate::session::SessionState;

/// Base points for a correct answer
pub const BASE_POINTS: u32 = 100;

/// Extra points per note already in the streak
pub const STREAK_BONUS: u32 = 50;

/// Ceiling of the speed bonus, reached by an instant answer
pub const MAX_SPEED_BONUS: u32 = 1000;

/// A key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answer {
    pub pitch: Pitch,
    /// Time since the note appeared
    pub response_time: Duration,
}

impl Answer {
    pub fn new(pitch: Pitch, response_time: Duration) -> Self {
        Self {
            pitch,
            response_time,
        }
    }
}

/// Counter changes for one judged answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Correct { coins: u32, points: u32 },
    Incorrect { arm_hint: bool },
}

impl Delta {
    pub fn apply(&self, state: &mut SessionState) {
        match *self {
            Delta::Correct { coins, points } => {
                state.streak += 1;
                state.strikes = 0;
                state.pig_coins = state.pig_coins.saturating_add(coins);
                state.score = state.score.saturating_add(points);
                state.notes_completed += 1;
                state.current_note = None;
                state.hint_armed = false;
            }
            Delta::Incorrect { arm_hint } => {
                state.strikes += 1;
                state.level_strikes += 1;
                state.streak = 0;
                if arm_hint {
                    state.hint_armed = true;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub delta: Delta,
}

/// Points for a correct answer given the streak before it.
///
/// ```text
/// 100 + max(0, 1000 - ms / 10) + streak * 50
/// ```
pub fn points_for(response_time: Duration, streak: u32) -> u32 {
    let millis = u32::try_from(response_time.as_millis()).unwrap_or(u32::MAX);
    let speed_bonus = MAX_SPEED_BONUS.saturating_sub(millis / 10);
    BASE_POINTS + speed_bonus + streak.saturating_mul(STREAK_BONUS)
}

/// Judge `answer` against the current note.
///
/// Returns `None` when there is no note to answer; the press is ignored.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use pigmusic::{judge, Answer, Clef, Note, SessionState, Settings};
///
/// let mut state = SessionState::new(Clef::Treble, 1, 10, 0);
/// state.current_note = Some(Note::new(Clef::Treble, "D4".parse()?)?);
///
/// let answer = Answer::new("D4".parse()?, Duration::from_secs(1));
/// let verdict = judge(&answer, &state, &Settings::default(), 10).unwrap();
/// assert!(verdict.correct);
///
/// verdict.delta.apply(&mut state);
/// assert_eq!(state.notes_completed, 1);
/// assert!(state.current_note.is_none());
/// # Ok::<(), pigmusic::TrainerError>(())
/// ```
pub fn judge(answer: &Answer, state: &SessionState, settings: &Settings, coin_reward: u32) -> Option<Verdict> {
    let note = state.current_note.as_ref()?;

    let verdict = if answer.pitch == note.pitch {
        Verdict {
            correct: true,
            delta: Delta::Correct {
                coins: coin_reward,
                points: points_for(answer.response_time, state.streak),
            },
        }
    } else {
        Verdict {
            correct: false,
            delta: Delta::Incorrect {
                arm_hint: state.strikes == 0 && settings.show_hints,
            },
        }
    };

    log::debug!(
        "Judged {} against {}: {}",
        answer.pitch,
        note.pitch,
        if verdict.correct { "correct" } else { "incorrect" }
    );
    Some(verdict)
}
