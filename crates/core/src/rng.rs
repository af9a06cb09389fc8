//! RNG module - seedable random sources
//!
//! Shape draws and garbage seeding go through the [`RandomSource`] trait so a
//! round can be driven by any generator. [`SimpleRng`] is the default: a small
//! LCG that is fully deterministic for a given seed.
//!
//! The daily challenge never uses the round's generator for its layout. It
//! builds a fresh [`SimpleRng`] from [`DailySeed::rng_seed`], so every player
//! gets the same garbage on the same calendar day.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Source of uniformly distributed `u32` values
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random value in `[0, max)`. `max` must be non-zero.
    ///
    /// Uses the high bits of `next_u32`; the low bits of an LCG cycle quickly.
    fn next_below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Calendar day identifying a daily challenge
///
/// The generator seed is `year + day_of_year`. Every caller asking for the
/// same day gets the same garbage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailySeed {
    pub year: i32,
    pub day_of_year: u16,
}

impl DailySeed {
    /// `day_of_year` is 1-based and must be within 1..=366
    pub fn new(year: i32, day_of_year: u16) -> Result<Self, EngineError> {
        if !(1..=366).contains(&day_of_year) {
            return Err(EngineError::InvalidDailySeed { day_of_year });
        }
        Ok(Self { year, day_of_year })
    }

    pub fn from_date(date: time::Date) -> Self {
        Self {
            year: date.year(),
            day_of_year: date.ordinal(),
        }
    }

    pub fn rng_seed(&self) -> u32 {
        self.year.wrapping_add(self.day_of_year as i32) as u32
    }

    /// Generator for this day's garbage layout
    pub fn rng(&self) -> SimpleRng {
        SimpleRng::new(self.rng_seed())
    }
}

impl fmt::Display for DailySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.day_of_year)
    }
}
