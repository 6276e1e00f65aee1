//! # Note Generator
//!
//! Draws the next note to show. Each draw picks uniformly from the
//! `(clef, level)` pool and resolves its staff position through the catalog.
//! The generator keeps no state of its own; all randomness comes from the
//! caller's [`Rng`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::catalog::{self, Clef, StaffPosition};
use crate::error::TrainerError;
use crate::pitch::Pitch;

/// Accidental glyph drawn in front of a note head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

/// A note posed to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub pitch: Pitch,
    pub staff_position: StaffPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
    pub clef: Clef,
}

impl Note {
    /// Build a note for a catalog pitch.
    ///
    /// # Errors
    /// Returns [`TrainerError::CatalogMiss`] if `pitch` has no position on `clef`.
    pub fn new(clef: Clef, pitch: Pitch) -> Result<Self, TrainerError> {
        let staff_position = catalog::staff_position(clef, &pitch)?;
        let accidental = if pitch.sharp {
            Some(Accidental::Sharp)
        } else {
            None
        };
        Ok(Self {
            pitch,
            staff_position,
            accidental,
            clef,
        })
    }
}

/// Draw a random note from the `(clef, level)` pool.
///
/// Out-of-range levels draw from the level 1 pool.
///
/// # Example
/// ```rust
/// use pigmusic::{catalog, next_note, rng, Clef};
///
/// let mut rng = rng::create_rng(42);
/// let note = next_note(&mut rng, Clef::Bass, 2)?;
/// assert!(catalog::pool(Clef::Bass, 2).unwrap().contains(&note.pitch));
/// # Ok::<(), pigmusic::TrainerError>(())
/// ```
pub fn next_note<R: Rng + ?Sized>(rng: &mut R, clef: Clef, level: u8) -> Result<Note, TrainerError> {
    let pool = catalog::pool_or_first(clef, level);
    // Catalog pools are never empty
    let pitch = *pool.choose(rng).ok_or(TrainerError::UnknownLevel(level))?;
    let note = Note::new(clef, pitch)?;
    log::debug!(
        "Drew {} on {} clef level {} (position {})",
        note.pitch,
        clef,
        level,
        note.staff_position.0
    );
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LEVEL_COUNT;
    use crate::rng::create_rng;
    use std::collections::HashSet;

    #[test]
    fn test_draws_stay_in_pool() {
        let mut rng = create_rng(1234);
        for clef in [Clef::Treble, Clef::Bass] {
            for level in 1..=LEVEL_COUNT {
                let pool = catalog::pool(clef, level).unwrap();
                for _ in 0..1000 {
                    let note = next_note(&mut rng, clef, level).unwrap();
                    assert!(pool.contains(&note.pitch), "{} not in {} level {}", note.pitch, clef, level);
                    assert_eq!(note.clef, clef);
                }
            }
        }
    }

    #[test]
    fn test_draws_cover_the_pool() {
        let mut rng = create_rng(99);
        let pool = catalog::pool(Clef::Treble, 3).unwrap();
        let seen: HashSet<Pitch> = (0..2000)
            .map(|_| next_note(&mut rng, Clef::Treble, 3).unwrap().pitch)
            .collect();
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let draw = |seed| {
            let mut rng = create_rng(seed);
            (0..20)
                .map(|_| next_note(&mut rng, Clef::Bass, 4).unwrap().pitch)
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(5), draw(5));
    }

    #[test]
    fn test_out_of_range_level_uses_level_one() {
        let mut rng = create_rng(3);
        let first = catalog::pool(Clef::Treble, 1).unwrap();
        for level in [0, 5, 200] {
            for _ in 0..100 {
                let note = next_note(&mut rng, Clef::Treble, level).unwrap();
                assert!(first.contains(&note.pitch));
            }
        }
    }

    #[test]
    fn test_sharps_carry_accidental() {
        let note = Note::new(Clef::Treble, "F#4".parse().unwrap()).unwrap();
        assert_eq!(note.accidental, Some(Accidental::Sharp));
        assert_eq!(note.staff_position, StaffPosition(3));

        let note = Note::new(Clef::Treble, "F4".parse().unwrap()).unwrap();
        assert_eq!(note.accidental, None);
    }
}
