//! # Session Module
//!
//! The per-level state machine: draws notes, feeds key presses to the judge,
//! and decides when the level is over.
//!
//! ## Sub-modules
//! - `types` - SessionState, Phase, Effect, LevelResult, PigMood
//! - `engine` - The [`Session`] state owner and its transitions
//!
//! ## Flow
//! 1. [`Session::enter`] resets the counters and moves to `AwaitingNote`
//! 2. [`Session::draw_note`] puts a note on the staff (`AwaitingAnswer`)
//! 3. [`Session::submit`] judges a key press and returns [`Effect`]s
//! 4. Once `notes_completed` reaches `notes_in_level` the session is
//!    `LevelComplete` and emits [`Effect::LevelComplete`] with the oinks
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pigmusic::session::{Effect, Phase, Session};
//! use pigmusic::{rng, Answer, Clef, Settings};
//!
//! let mut rng = rng::create_rng(7);
//! let mut session = Session::new(10);
//! session.enter(Clef::Treble, 1, 1, 0);
//!
//! let pitch = session.draw_note(&mut rng)?.unwrap().pitch;
//! let effects = session.submit(&Answer::new(pitch, Duration::from_secs(1)), &Settings::default())?;
//!
//! assert_eq!(session.phase(), Phase::LevelComplete);
//! assert!(effects.iter().any(|e| matches!(e, Effect::LevelComplete(r) if r.oinks == 3)));
//! # Ok::<(), pigmusic::TrainerError>(())
//! ```
//!
//! ## Timers
//! Mood changes carry a generation number. A host timer that fires after a
//! newer mood was set passes a stale generation to
//! [`Session::mood_timeout`] and is ignored, so overlapping timers never
//! touch the counters or clobber a newer mood.

mod engine;
mod types;


pub use engine::Session;
pub use types::{Effect, LevelResult, Phase, PigMood, SessionState};
