//! Piece supply - 7-bag random piece generation
//!
//! Pieces come out of "bags": each bag is a shuffled permutation of all seven
//! shapes, so every shape shows up exactly once per seven draws. The queue is
//! topped up with a fresh bag whenever fewer than two pieces remain, which
//! keeps the piece after the one just drawn available for preview.
//!
//! The shuffle is driven by a small seeded LCG so a game can be replayed from
//! its seed.

use std::collections::VecDeque;

use crate::error::CoreError;
use crate::tetromino::Tetromino;
use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Uniform value in range [0, max).
    ///
    /// Multiply-shift keeps the high (better mixed) LCG bits; samples in the
    /// short low zone are rejected so no value is favored.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let threshold = max.wrapping_neg() % max;
        loop {
            let m = u64::from(self.next_u32()) * u64::from(max);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Upcoming shapes, refilled one bag at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSupply {
    queue: VecDeque<ShapeKind>,
    /// `None` for a scripted supply, which never refills
    rng: Option<SimpleRng>,
}

impl PieceSupply {
    /// Create a bag-backed supply with the given seed
    pub fn new(seed: u32) -> Self {
        let mut supply = Self {
            queue: VecDeque::with_capacity(2 * ShapeKind::ALL.len()),
            rng: Some(SimpleRng::new(seed)),
        };
        supply.refill();
        supply
    }

    /// A supply that hands out exactly `kinds`, in order, and then runs dry.
    pub fn scripted(kinds: impl IntoIterator<Item = ShapeKind>) -> Self {
        Self {
            queue: kinds.into_iter().collect(),
            rng: None,
        }
    }

    /// Append a freshly shuffled bag if fewer than two pieces remain
    fn refill(&mut self) {
        if self.queue.len() >= 2 {
            return;
        }
        if let Some(rng) = self.rng.as_mut() {
            let mut bag = ShapeKind::ALL;
            rng.shuffle(&mut bag);
            self.queue.extend(bag);
        }
    }

    /// Take the next piece, positioned at its spawn origin.
    pub fn draw(&mut self) -> Result<Tetromino, CoreError> {
        self.refill();
        self.queue
            .pop_front()
            .map(Tetromino::spawn)
            .ok_or(CoreError::SupplyUnderrun)
    }

    /// The piece the next `draw` will return, without consuming it.
    pub fn peek(&self) -> Result<Tetromino, CoreError> {
        self.queue
            .front()
            .copied()
            .map(Tetromino::spawn)
            .ok_or(CoreError::SupplyUnderrun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_next_range_covers_every_value() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[rng.next_range(7) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_new_supply_holds_one_bag() {
        let supply = PieceSupply::new(1);
        assert_eq!(supply.queue.len(), 7);
        assert!(supply.rng.is_some());
    }

    #[test]
    fn test_refill_when_fewer_than_two_remain() {
        let mut supply = PieceSupply::new(1);
        for _ in 0..5 {
            supply.draw().unwrap();
        }
        assert_eq!(supply.queue.len(), 2);

        // 2 left: no refill yet
        supply.draw().unwrap();
        assert_eq!(supply.queue.len(), 1);

        // 1 left: refill happens before the draw
        supply.draw().unwrap();
        assert_eq!(supply.queue.len(), 7);
    }

    #[test]
    fn test_peek_matches_next_draw() {
        let mut supply = PieceSupply::new(1);
        for _ in 0..20 {
            let peeked = supply.peek().unwrap();
            let drawn = supply.draw().unwrap();
            assert_eq!(peeked, drawn);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceSupply::new(42);
        let mut b = PieceSupply::new(42);
        for _ in 0..30 {
            assert_eq!(a.draw().unwrap().kind(), b.draw().unwrap().kind());
        }
    }

    #[test]
    fn test_scripted_supply_runs_dry() {
        let mut supply = PieceSupply::scripted([ShapeKind::T, ShapeKind::O]);
        assert!(supply.rng.is_none());
        assert_eq!(supply.draw().unwrap().kind(), ShapeKind::T);
        assert_eq!(supply.peek().unwrap().kind(), ShapeKind::O);
        assert_eq!(supply.draw().unwrap().kind(), ShapeKind::O);
        assert_eq!(supply.peek(), Err(CoreError::SupplyUnderrun));
        assert_eq!(supply.draw(), Err(CoreError::SupplyUnderrun));
    }
}
