//! Piano keyboard layout for a level.
//!
//! The keyboard starts at C of the lowest octave in the level's pool and stops
//! at the highest pooled pitch. Keys outside the pool are drawn but disabled.

use serde::Serialize;

use crate::pitch::{Letter, Pitch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub pitch: Pitch,
    pub color: KeyColor,
    /// In the level's pool; only available keys can be pressed
    pub available: bool,
    /// The hint target
    pub highlighted: bool,
}

/// Lay out keys for `pool`, left to right.
///
/// Each white key is followed by the black key to its right, if any.
///
/// # Example
/// ```rust
/// use pigmusic::{catalog, keyboard, Clef};
///
/// let pool = catalog::pool(Clef::Treble, 1).unwrap();
/// let keys = keyboard::layout(pool, None);
///
/// // C4 up to E4: 3 white keys and 2 black keys
/// assert_eq!(keys.len(), 5);
/// assert_eq!(keys.iter().filter(|k| k.available).count(), 3);
/// ```
pub fn layout(pool: &[Pitch], highlight: Option<Pitch>) -> Vec<Key> {
    let Some(min_octave) = pool.iter().map(|p| p.octave).min() else {
        return Vec::new();
    };
    let top = pool.iter().map(key_index).max().unwrap_or(0);

    let key = |pitch: Pitch, color| Key {
        pitch,
        color,
        available: pool.contains(&pitch),
        highlighted: highlight == Some(pitch),
    };

    let mut keys = Vec::new();
    let mut octave = min_octave;
    while u16::from(octave) * 12 <= top {
        for letter in Letter::ALL {
            let white = Pitch::natural(letter, octave);
            if key_index(&white) <= top {
                keys.push(key(white, KeyColor::White));
            }
            let black = Pitch::sharp(letter, octave);
            if letter.has_sharp() && key_index(&black) <= top {
                keys.push(key(black, KeyColor::Black));
            }
        }
        octave += 1;
    }
    keys
}

/// Semitones above C0
fn key_index(pitch: &Pitch) -> u16 {
    let step = match pitch.letter {
        Letter::C => 0,
        Letter::D => 2,
        Letter::E => 4,
        Letter::F => 5,
        Letter::G => 7,
        Letter::A => 9,
        Letter::B => 11,
    };
    u16::from(pitch.octave) * 12 + step + u16::from(pitch.sharp)
}
