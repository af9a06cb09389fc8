//! Cross-round progress the caller persists between sessions.
//!
//! The engine reads and updates this state; storing it (and choosing a format)
//! is up to the caller. It derives serde traits so any serde format works.

use serde::{Deserialize, Serialize};

use crate::rng::DailySeed;
use crate::types::MAX_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    /// Highest level the player may start.
    pub max_unlocked_level: u32,
    pub high_score: u32,
    /// Day of the most recent daily challenge win.
    pub last_daily_win: Option<DailySeed>,
}

impl Progress {
    pub fn is_unlocked(&self, level: u32) -> bool {
        level <= self.max_unlocked_level
    }

    pub fn daily_completed(&self, seed: DailySeed) -> bool {
        self.last_daily_win == Some(seed)
    }

    /// Advance the unlock ceiling if `level` was the frontier.
    ///
    /// Returns the new ceiling when it moved.
    pub fn record_level_complete(&mut self, level: u32) -> Option<u32> {
        if level != self.max_unlocked_level || self.max_unlocked_level >= MAX_LEVEL {
            return None;
        }
        self.max_unlocked_level += 1;
        Some(self.max_unlocked_level)
    }

    pub fn record_daily_win(&mut self, seed: DailySeed) {
        self.last_daily_win = Some(seed);
    }

    /// Returns true when `score` beat the stored high score.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            max_unlocked_level: 1,
            high_score: 0,
            last_daily_win: None,
        }
    }
}
