//! # PigMusic
//!
//! A note-reading trainer. A note appears on a treble or bass staff, the
//! player presses the matching piano key, and the pig keeps score.
//!
//! ## Modules
//! - `catalog` - Pitch pools per clef and level, staff positions
//! - `generator` - Random note draws
//! - `judge` - Answer checking and counter deltas
//! - `progress` - Oinks, best results, level unlocking
//! - `session` - Per-level state machine
//! - `game` - Screens, save slot, audio, and the session together
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pigmusic::{audio::SilentAudio, rng, save::MemoryStore, Game, GameConfig};
//!
//! let mut game = Game::new(MemoryStore::default(), SilentAudio, rng::create_rng(1), GameConfig::default());
//! game.start_level(1)?;
//!
//! while game.last_result().is_none() {
//!     let pitch = game.session().current_note().unwrap().pitch;
//!     game.press_key(pitch, Duration::from_millis(800))?;
//! }
//! assert_eq!(game.last_result().unwrap().oinks, 3);
//! assert!(game.progress().is_unlocked(2));
//! # Ok::<(), pigmusic::TrainerError>(())
//! ```

pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod judge;
pub mod keyboard;
pub mod pitch;
pub mod progress;
pub mod rng;
pub mod save;
pub mod session;
pub mod staff;

pub use catalog::{Clef, StaffPosition, LEVEL_COUNT};
pub use config::{GameConfig, Settings};
pub use error::*;
pub use game::{Game, LevelCard, Screen, StaffView};
pub use generator::{next_note, Accidental, Note};
pub use judge::{judge, Answer, Delta, Verdict};
pub use pitch::{Letter, Pitch};
pub use progress::{calculate_oinks, LevelProgress, ProgressBook};
pub use session::{Effect, LevelResult, Phase, PigMood, Session, SessionState};
pub use staff::render_staff;
