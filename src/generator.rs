//! Piece generation
//!
//! The default randomizer draws every piece independently and uniformly, so
//! repeats and droughts happen. The 7-bag randomizer (shuffle all 7 pieces,
//! deal them out, reshuffle) is available as an opt-in alternative.

use crate::piece::Piece;
use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How the next piece type is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Independent uniform draws
    #[default]
    Uniform,
    /// 7-bag: each run of 7 pieces contains every shape once
    Bag,
}

/// Seeded piece source
///
/// Owns its RNG so a game snapshot carries everything needed to reproduce
/// the next piece.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceGenerator {
    randomizer: Randomizer,
    rng: ChaCha8Rng,
    /// Remaining pieces of the current bag (bag mode only)
    bag: Vec<TetrominoType>,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(Randomizer::default())
    }
}

impl PieceGenerator {
    /// Create a generator seeded from the OS entropy source
    pub fn new(randomizer: Randomizer) -> Self {
        Self::with_seed(randomizer, rand::random())
    }

    /// Create a reproducible generator
    pub fn with_seed(randomizer: Randomizer, seed: u64) -> Self {
        Self {
            randomizer,
            rng: ChaCha8Rng::seed_from_u64(seed),
            bag: Vec::with_capacity(7),
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draw the next piece type
    pub fn next_type(&mut self) -> TetrominoType {
        let all = TetrominoType::all();
        match self.randomizer {
            Randomizer::Uniform => all[self.rng.gen_range(0..all.len())],
            Randomizer::Bag => {
                if self.bag.is_empty() {
                    self.refill();
                }
                self.bag.pop().unwrap_or(TetrominoType::I)
            }
        }
    }

    /// Draw a fresh piece at spawn position
    pub fn create_random(&mut self) -> Piece {
        Piece::new(self.next_type())
    }

    /// Refill the bag with a new shuffled set of all 7 types
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::all().to_vec();
        new_bag.shuffle(&mut self.rng);
        self.bag = new_bag;
    }
}
