//! RNG module - injectable randomness for pair colors and garbage columns
//!
//! Everything random in the game goes through [`GameRng`], so tests can drive
//! the simulation with fixed sequences. Two generators ship with the crate:
//!
//! - [`SimpleRng`]: a seeded LCG, the deterministic default
//! - `rand::rngs::StdRng`: for the interactive binary

use rand::rngs::StdRng;
use rand::Rng;

use crate::types::PuyoColor;

/// Source of uniform random numbers for the game.
pub trait GameRng {
    /// Uniform value in `0..bound`.
    ///
    /// Implementations may panic when `bound == 0`; callers never pass it.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Pick one element uniformly.
    ///
    /// # Panics
    ///
    /// Panics on an empty slice: there is nothing to draw from.
    fn pick<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        assert!(!items.is_empty(), "cannot draw from an empty set");
        items[self.next_below(items.len() as u32) as usize]
    }

    /// Shuffle a slice in place using Fisher-Yates
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

/// Draw the two colors of a new pair, independently and uniformly.
pub fn draw_pair<R: GameRng>(rng: &mut R) -> [PuyoColor; 2] {
    [rng.pick(&PuyoColor::ALL), rng.pick(&PuyoColor::ALL)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GameRng for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // The low bits of an LCG cycle with short periods; use the high half.
        (self.next_u32() >> 16) % bound
    }
}

impl GameRng for StdRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}
