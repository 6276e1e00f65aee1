//! # Level Progression
//!
//! Reward tiers ("oinks") for a finished level, the best-ever record per
//! level, and the unlock rule.
//!
//! ## Oinks
//! Accuracy penalizes each strike as three missed notes:
//!
//! ```text
//! accuracy = notes / (notes + strikes * 3) * 100
//!
//!   >= 90  ->  3 oinks
//!   >= 70  ->  2 oinks
//!   else   ->  1 oink
//! ```
//!
//! A finished level always earns at least one oink.
//!
//! ## Unlocking
//! Level 1 is always open. Level N opens once level N-1 has any oinks.

use serde::{Deserialize, Serialize};

use crate::catalog::LEVEL_COUNT;
use crate::error::TrainerError;

/// Missed opportunities charged per strike
pub const STRIKE_WEIGHT: u32 = 3;

pub const MAX_OINKS: u8 = 3;

/// Strike-penalized accuracy in percent.
pub fn accuracy(notes_completed: u32, strikes: u32) -> f64 {
    let attempts = notes_completed as f64 + (strikes as f64) * STRIKE_WEIGHT as f64;
    if attempts == 0.0 {
        return 0.0;
    }
    notes_completed as f64 * 100.0 / attempts
}

/// Reward tier for a finished level.
///
/// # Example
/// ```rust
/// use pigmusic::calculate_oinks;
///
/// assert_eq!(calculate_oinks(10, 0), 3); // 100%
/// assert_eq!(calculate_oinks(10, 1), 2); // 10/13 = 76.9%
/// assert_eq!(calculate_oinks(10, 5), 1); // 10/25 = 40%
/// ```
pub fn calculate_oinks(notes_completed: u32, strikes: u32) -> u8 {
    let accuracy = accuracy(notes_completed, strikes);
    if accuracy >= 90.0 {
        3
    } else if accuracy >= 70.0 {
        2
    } else {
        1
    }
}

/// Best result recorded for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level_number: u8,
    pub oinks: u8,
    #[serde(default)]
    pub best_score: u32,
    pub completed: bool,
}

impl LevelProgress {
    pub fn new(level_number: u8) -> Self {
        Self {
            level_number,
            oinks: 0,
            best_score: 0,
            completed: false,
        }
    }
}

/// Progress for every level, in level order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LevelProgress>", into = "Vec<LevelProgress>")]
pub struct ProgressBook {
    levels: Vec<LevelProgress>,
}

impl From<Vec<LevelProgress>> for ProgressBook {
    fn from(entries: Vec<LevelProgress>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<ProgressBook> for Vec<LevelProgress> {
    fn from(book: ProgressBook) -> Self {
        book.levels
    }
}

impl Default for ProgressBook {
    fn default() -> Self {
        Self {
            levels: (1..=LEVEL_COUNT).map(LevelProgress::new).collect(),
        }
    }
}

impl ProgressBook {
    /// Rebuild from stored entries, keeping one entry per known level.
    ///
    /// Unknown level numbers are dropped and missing levels start fresh, so a
    /// stale or hand-edited save never changes the level count.
    pub fn from_entries(entries: Vec<LevelProgress>) -> Self {
        let mut book = Self::default();
        for entry in entries {
            match book.slot_mut(entry.level_number) {
                Some(slot) => {
                    slot.oinks = entry.oinks.min(MAX_OINKS);
                    slot.best_score = entry.best_score;
                    slot.completed = entry.completed;
                }
                None => log::warn!("Ignoring progress for unknown level {}", entry.level_number),
            }
        }
        book
    }

    pub fn levels(&self) -> &[LevelProgress] {
        &self.levels
    }

    pub fn get(&self, level: u8) -> Option<&LevelProgress> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
    }

    fn slot_mut(&mut self, level: u8) -> Option<&mut LevelProgress> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get_mut(i as usize))
    }

    pub fn oinks(&self, level: u8) -> u8 {
        self.get(level).map_or(0, |p| p.oinks)
    }

    /// Whether `level` may be started.
    pub fn is_unlocked(&self, level: u8) -> bool {
        match level {
            0 => false,
            1 => self.get(1).is_some(),
            n => self.get(n).is_some() && self.oinks(n - 1) > 0,
        }
    }

    /// Merge a finished run into the record, keeping the best oinks and score.
    ///
    /// # Errors
    /// Returns [`TrainerError::UnknownLevel`] if `level` has no entry.
    pub fn record(&mut self, level: u8, oinks: u8, score: u32) -> Result<&LevelProgress, TrainerError> {
        let slot = self
            .slot_mut(level)
            .ok_or(TrainerError::UnknownLevel(level))?;
        slot.oinks = slot.oinks.max(oinks.min(MAX_OINKS));
        slot.best_score = slot.best_score.max(score);
        slot.completed = true;
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_run_earns_three() {
        assert_eq!(accuracy(10, 0), 100.0);
        assert_eq!(calculate_oinks(10, 0), 3);
    }

    #[test]
    fn test_one_strike_earns_two() {
        let acc = accuracy(10, 1);
        assert!((acc - 76.923).abs() < 0.01, "accuracy was {}", acc);
        assert_eq!(calculate_oinks(10, 1), 2);
    }

    #[test]
    fn test_five_strikes_earn_one() {
        assert_eq!(accuracy(10, 5), 40.0);
        assert_eq!(calculate_oinks(10, 5), 1);
    }

    #[test]
    fn test_tier_boundaries() {
        // 27 / (27 + 3) = 90%
        assert_eq!(calculate_oinks(27, 1), 3);
        // 7 / (7 + 3) = 70%
        assert_eq!(calculate_oinks(7, 1), 2);
        assert_eq!(calculate_oinks(6, 1), 1);
    }

    #[test]
    fn test_oinks_never_zero() {
        assert_eq!(calculate_oinks(1, 1000), 1);
        assert_eq!(calculate_oinks(0, 0), 1);
    }

    #[test]
    fn test_record_is_max_merge() {
        let mut book = ProgressBook::default();
        book.record(2, 3, 5000).unwrap();
        let entry = book.record(2, 1, 900).unwrap();
        assert_eq!(entry.oinks, 3);
        assert_eq!(entry.best_score, 5000);
        assert!(entry.completed);

        let entry = book.record(2, 3, 7000).unwrap();
        assert_eq!(entry.best_score, 7000);
    }

    #[test]
    fn test_record_marks_completed_on_low_tier() {
        let mut book = ProgressBook::default();
        let entry = book.record(1, 1, 0).unwrap();
        assert!(entry.completed);
        assert_eq!(entry.oinks, 1);
    }

    #[test]
    fn test_record_unknown_level() {
        let mut book = ProgressBook::default();
        assert_eq!(book.record(0, 3, 0), Err(TrainerError::UnknownLevel(0)));
        assert_eq!(book.record(5, 3, 0), Err(TrainerError::UnknownLevel(5)));
    }

    #[test]
    fn test_unlock_gating() {
        let mut book = ProgressBook::default();
        assert!(book.is_unlocked(1));
        assert!(!book.is_unlocked(2));
        assert!(!book.is_unlocked(0));
        assert!(!book.is_unlocked(5));

        book.record(1, 1, 0).unwrap();
        assert!(book.is_unlocked(2));
        assert!(!book.is_unlocked(3));
    }

    #[test]
    fn test_from_entries_normalizes() {
        let book = ProgressBook::from_entries(vec![
            LevelProgress {
                level_number: 2,
                oinks: 9,
                best_score: 10,
                completed: true,
            },
            LevelProgress::new(17),
        ]);
        assert_eq!(book.levels().len(), LEVEL_COUNT as usize);
        assert_eq!(book.oinks(2), MAX_OINKS);
        assert_eq!(book.oinks(1), 0);
    }
}
