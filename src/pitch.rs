//! Pitch identifiers like `C4` and `F#2`.
//!
//! A [`Pitch`] is a key into the catalog tables. Only the letter and octave
//! are ever read back out, to lay out the piano keyboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;

/// Note letters A through G, ordered as they appear on a keyboard octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Whether a black key sits to the right of this letter (no E# or B#).
    pub fn has_sharp(self) -> bool {
        !matches!(self, Letter::E | Letter::B)
    }
}

/// A pitch: letter, optional sharp, octave digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    pub letter: Letter,
    pub sharp: bool,
    pub octave: u8,
}

impl Pitch {
    pub const fn natural(letter: Letter, octave: u8) -> Self {
        Self {
            letter,
            sharp: false,
            octave,
        }
    }

    pub const fn sharp(letter: Letter, octave: u8) -> Self {
        Self {
            letter,
            sharp: true,
            octave,
        }
    }

    /// The natural this pitch shares a staff line or space with.
    pub fn natural_of(&self) -> Self {
        Self::natural(self.letter, self.octave)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        if self.sharp {
            write!(f, "#")?;
        }
        write!(f, "{}", self.octave)
    }
}

impl FromStr for Pitch {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || TrainerError::InvalidPitch(trimmed.to_string());

        let mut chars = trimmed.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (sharp, octave_str) = match rest.strip_prefix('#') {
            Some(octave) => (true, octave),
            None => (false, rest),
        };

        // Single octave digit only: "C10" is not a key on any piano we draw
        if octave_str.len() != 1 {
            return Err(invalid());
        }
        let octave = octave_str
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;

        if sharp && !letter.has_sharp() {
            return Err(invalid());
        }

        Ok(Self {
            letter,
            sharp,
            octave,
        })
    }
}

impl TryFrom<String> for Pitch {
    type Error = TrainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}
