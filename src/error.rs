//! # Error Types
//!
//! This module defines all error types for the trainer.
//!
//! ## Error Types
//! - `CatalogMiss` - A pitch was looked up on a clef that does not list it
//! - `InvalidPitch` - Text that is not a pitch like `C4` or `F#2`
//! - `LevelLocked` / `UnknownLevel` - Level selection refused
//! - `NoActiveLevel` / `LevelAlreadyComplete` - Session driven out of order
//! - `Config` - Invalid YAML configuration
//! - `Save` - Save file could not be written
//!
//! ## Usage
//! ```rust
//! use pigmusic::{Pitch, TrainerError};
//!
//! match "H4".parse::<Pitch>() {
//!     Ok(pitch) => println!("Pressed {}", pitch),
//!     Err(TrainerError::InvalidPitch(text)) => eprintln!("Not a key: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::catalog::Clef;
use crate::pitch::Pitch;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainerError {
    /// A pitch has no staff position on the given clef.
    ///
    /// Notes are only ever drawn from catalog pools, so this indicates a
    /// broken table rather than bad player input.
    ///
    /// # Example
    /// ```
    /// # use pigmusic::{Clef, Pitch, TrainerError};
    /// let err = TrainerError::CatalogMiss {
    ///     clef: Clef::Bass,
    ///     pitch: "F5".parse::<Pitch>().unwrap(),
    /// };
    /// assert_eq!(err.to_string(), "Pitch F5 is not in the bass clef catalog");
    /// ```
    #[error("Pitch {pitch} is not in the {clef} clef catalog")]
    CatalogMiss { clef: Clef, pitch: Pitch },

    /// Text that does not name a pitch.
    ///
    /// # Example
    /// ```
    /// # use pigmusic::TrainerError;
    /// let err = TrainerError::InvalidPitch("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid pitch: H4");
    /// ```
    #[error("Invalid pitch: {0}")]
    InvalidPitch(String),

    /// The previous level has not earned any oinks yet.
    #[error("Level {0} is locked")]
    LevelLocked(u8),

    /// Level number outside the catalog's levels.
    #[error("Unknown level {0}")]
    UnknownLevel(u8),

    #[error("No level is being played")]
    NoActiveLevel,

    #[error("Level {0} is already complete")]
    LevelAlreadyComplete(u8),

    /// Invalid configuration file.
    ///
    /// # Example
    /// ```
    /// # use pigmusic::TrainerError;
    /// let err = TrainerError::Config("notes-in-level must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: notes-in-level must be at least 1");
    /// ```
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Save failed: {0}")]
    Save(String),
}
