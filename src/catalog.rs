//! # Pitch Catalog
//!
//! Static per-clef tables mapping pitches to staff positions, and the pool of
//! pitches each level draws from.
//!
//! ## Staff Positions
//! A position counts lines and spaces upward from the clef's reference:
//! - Position 2 is the bottom staff line, position 10 the top staff line
//! - Even positions sit on a line, odd positions in a space
//! - Anything below 2 or above 10 needs ledger lines once it reaches a line
//!
//! ```text
//!            Treble   Bass
//!  12  --    A5       C4
//!  10  ===   F5       A3     top line
//!   6  ===   B4       D3
//!   2  ===   E4       G2     bottom line
//!   0  --    C4       E2
//!  -2  --    A3       C2
//! ```
//!
//! A sharp shares the position of its natural: `C#4` and `C4` are drawn on the
//! same ledger line, with a sharp glyph in front.
//!
//! ## Levels
//! Pools widen level by level. Level 4 adds ledger-line notes and sharps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;
use crate::pitch::{Letter, Pitch};

use Letter::{A, B, C, D, E, F, G};

/// Number of playable levels per clef
pub const LEVEL_COUNT: u8 = 4;

/// Which staff the notes are drawn on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    #[default]
    #[value(alias = "g")]
    Treble,
    #[value(alias = "f")]
    Bass,
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clef::Treble => write!(f, "treble"),
            Clef::Bass => write!(f, "bass"),
        }
    }
}

/// Line/space offset from the clef's reference position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffPosition(pub i8);

impl StaffPosition {
    pub const BOTTOM_LINE: StaffPosition = StaffPosition(2);
    pub const TOP_LINE: StaffPosition = StaffPosition(10);

    pub fn is_on_line(self) -> bool {
        self.0.rem_euclid(2) == 0
    }

    /// Ledger lines needed to reach this position from the staff.
    ///
    /// # Example
    /// ```
    /// use pigmusic::StaffPosition;
    ///
    /// assert_eq!(StaffPosition(0).ledger_lines(), 1);  // middle C on treble
    /// assert_eq!(StaffPosition(1).ledger_lines(), 0);  // hangs below the staff
    /// assert_eq!(StaffPosition(-2).ledger_lines(), 2);
    /// assert_eq!(StaffPosition(12).ledger_lines(), 1);
    /// ```
    pub fn ledger_lines(self) -> u8 {
        let pos = self.0;
        if pos < Self::BOTTOM_LINE.0 {
            ((Self::BOTTOM_LINE.0 - pos) / 2) as u8
        } else if pos > Self::TOP_LINE.0 {
            ((pos - Self::TOP_LINE.0) / 2) as u8
        } else {
            0
        }
    }
}

const fn n(letter: Letter, octave: u8) -> Pitch {
    Pitch::natural(letter, octave)
}

const fn s(letter: Letter, octave: u8) -> Pitch {
    Pitch::sharp(letter, octave)
}

/// Treble clef naturals, lowest first. Sharps resolve through their natural.
const TREBLE_POSITIONS: &[(Pitch, i8)] = &[
    (n(A, 3), -2),
    (n(B, 3), -1),
    (n(C, 4), 0),  // ledger line below
    (n(D, 4), 1),  // space below staff
    (n(E, 4), 2),  // bottom line
    (n(F, 4), 3),
    (n(G, 4), 4),
    (n(A, 4), 5),
    (n(B, 4), 6),  // middle line
    (n(C, 5), 7),
    (n(D, 5), 8),
    (n(E, 5), 9),
    (n(F, 5), 10), // top line
    (n(G, 5), 11),
    (n(A, 5), 12), // ledger line above
];

/// Bass clef naturals, lowest first.
const BASS_POSITIONS: &[(Pitch, i8)] = &[
    (n(C, 2), -2),
    (n(D, 2), -1),
    (n(E, 2), 0),  // ledger line below
    (n(F, 2), 1),
    (n(G, 2), 2),  // bottom line
    (n(A, 2), 3),
    (n(B, 2), 4),
    (n(C, 3), 5),
    (n(D, 3), 6),  // middle line
    (n(E, 3), 7),
    (n(F, 3), 8),
    (n(G, 3), 9),
    (n(A, 3), 10), // top line
    (n(B, 3), 11),
    (n(C, 4), 12), // middle C, ledger line above
];

const TREBLE_LEVEL_1: &[Pitch] = &[n(C, 4), n(D, 4), n(E, 4)];
const TREBLE_LEVEL_2: &[Pitch] = &[n(C, 4), n(D, 4), n(E, 4), n(F, 4), n(G, 4)];
const TREBLE_LEVEL_3: &[Pitch] = &[
    n(C, 4), n(D, 4), n(E, 4), n(F, 4), n(G, 4), n(A, 4), n(B, 4),
    n(C, 5), n(D, 5), n(E, 5), n(F, 5),
];
const TREBLE_LEVEL_4: &[Pitch] = &[
    n(A, 3), n(B, 3),
    n(C, 4), s(C, 4), n(D, 4), s(D, 4), n(E, 4), n(F, 4), s(F, 4),
    n(G, 4), s(G, 4), n(A, 4), s(A, 4), n(B, 4),
    n(C, 5), s(C, 5), n(D, 5), s(D, 5), n(E, 5), n(F, 5), s(F, 5),
    n(G, 5), n(A, 5),
];

const BASS_LEVEL_1: &[Pitch] = &[n(C, 3), n(D, 3), n(E, 3)];
const BASS_LEVEL_2: &[Pitch] = &[n(C, 3), n(D, 3), n(E, 3), n(F, 3), n(G, 3)];
const BASS_LEVEL_3: &[Pitch] = &[
    n(E, 2), n(F, 2), n(G, 2), n(A, 2), n(B, 2),
    n(C, 3), n(D, 3), n(E, 3), n(F, 3), n(G, 3), n(A, 3), n(B, 3),
    n(C, 4),
];
const BASS_LEVEL_4: &[Pitch] = &[
    n(C, 2), n(D, 2),
    n(E, 2), n(F, 2), s(F, 2), n(G, 2), s(G, 2), n(A, 2), s(A, 2), n(B, 2),
    n(C, 3), s(C, 3), n(D, 3), s(D, 3), n(E, 3), n(F, 3), s(F, 3),
    n(G, 3), s(G, 3), n(A, 3), s(A, 3), n(B, 3),
    n(C, 4),
];

const LEVEL_DESCRIPTIONS: [&str; LEVEL_COUNT as usize] = [
    "Learn C, D, and E notes",
    "Add F and G to your repertoire",
    "Master the full C major scale",
    "Challenge yourself with sharps!",
];

fn positions(clef: Clef) -> &'static [(Pitch, i8)] {
    match clef {
        Clef::Treble => TREBLE_POSITIONS,
        Clef::Bass => BASS_POSITIONS,
    }
}

/// Allowed pitches for `(clef, level)`, or `None` outside `1..=LEVEL_COUNT`.
///
/// Order is fixed (lowest first) so the keyboard layout is stable.
pub fn pool(clef: Clef, level: u8) -> Option<&'static [Pitch]> {
    let pool = match (clef, level) {
        (Clef::Treble, 1) => TREBLE_LEVEL_1,
        (Clef::Treble, 2) => TREBLE_LEVEL_2,
        (Clef::Treble, 3) => TREBLE_LEVEL_3,
        (Clef::Treble, 4) => TREBLE_LEVEL_4,
        (Clef::Bass, 1) => BASS_LEVEL_1,
        (Clef::Bass, 2) => BASS_LEVEL_2,
        (Clef::Bass, 3) => BASS_LEVEL_3,
        (Clef::Bass, 4) => BASS_LEVEL_4,
        _ => return None,
    };
    Some(pool)
}

/// Pool for `level`, falling back to level 1 when the level is out of range.
pub fn pool_or_first(clef: Clef, level: u8) -> &'static [Pitch] {
    match pool(clef, level) {
        Some(pool) => pool,
        None => {
            log::warn!("No {} clef pool for level {}, using level 1", clef, level);
            match clef {
                Clef::Treble => TREBLE_LEVEL_1,
                Clef::Bass => BASS_LEVEL_1,
            }
        }
    }
}

/// Staff position of `pitch` on `clef`.
///
/// # Errors
/// Returns [`TrainerError::CatalogMiss`] if the clef's table doesn't list the
/// pitch (or its natural, for sharps).
pub fn staff_position(clef: Clef, pitch: &Pitch) -> Result<StaffPosition, TrainerError> {
    let natural = pitch.natural_of();
    positions(clef)
        .iter()
        .find(|(p, _)| *p == natural)
        .map(|(_, pos)| StaffPosition(*pos))
        .ok_or(TrainerError::CatalogMiss {
            clef,
            pitch: *pitch,
        })
}

pub fn level_description(level: u8) -> &'static str {
    level
        .checked_sub(1)
        .and_then(|i| LEVEL_DESCRIPTIONS.get(i as usize))
        .copied()
        .unwrap_or("")
}
