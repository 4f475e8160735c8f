/*!
This module handles random generation of next-spawn block values.
*/

use rand::{
    self,
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

use crate::BlockValue;

/// The values a freshly spawned block can carry.
pub const SPAWN_VALUES: [BlockValue; 3] = [2, 4, 8];

/// Handles the information of which block values to spawn during a session.
///
/// Exactly one probability model is active per session; models are never
/// mixed. To actually generate values, either call
/// [`SpawnGenerator::generate`] directly or use the
/// [`SpawnGenerator::with_rng`] method to yield a [`WithRng`] that implements
/// [`Iterator`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnGenerator {
    /// Uniformly random choice among [`SPAWN_VALUES`].
    Uniform,
    /// Weighted choice over [`SPAWN_VALUES`].
    ///
    /// `weights[i]` is the relative weight of `SPAWN_VALUES[i]`; for example
    /// `[70, 25, 5]` spawns mostly 2s, some 4s and the occasional 8.
    Weighted {
        /// Relative weight of each spawn value, at least one nonzero.
        weights: [u32; 3],
    },
}

impl SpawnGenerator {
    /// Initialize an instance of the [`SpawnGenerator::Uniform`] variant.
    pub const fn uniform() -> Self {
        Self::Uniform
    }

    /// Initialize an instance of the [`SpawnGenerator::Weighted`] variant.
    ///
    /// This function returns `None` when all weights are zero.
    pub const fn weighted(weights: [u32; 3]) -> Option<Self> {
        if weights[0] == 0 && weights[1] == 0 && weights[2] == 0 {
            None
        } else {
            Some(Self::Weighted { weights })
        }
    }

    /// Generates the next spawn value using the given source of randomness.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> BlockValue {
        match self {
            SpawnGenerator::Uniform => SPAWN_VALUES[rng.random_range(0..SPAWN_VALUES.len())],
            SpawnGenerator::Weighted { weights } => {
                // SAFETY: Struct invariant, at least one weight is nonzero.
                let idx = WeightedIndex::new(weights.iter()).unwrap().sample(rng);
                SPAWN_VALUES[idx]
            }
        }
    }

    /// Method that allows `SpawnGenerator` to be used as [`Iterator`].
    pub fn with_rng<'a, 'b, R: Rng>(&'a mut self, rng: &'b mut R) -> WithRng<'a, 'b, R> {
        WithRng {
            spawn_generator: self,
            rng,
        }
    }
}

impl Default for SpawnGenerator {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Struct produced from [`SpawnGenerator::with_rng`] which implements
/// [`Iterator`].
pub struct WithRng<'a, 'b, R: Rng> {
    /// Selected spawn generator to use as information source.
    pub spawn_generator: &'a mut SpawnGenerator,
    /// Random number generator for the raw source of randomness.
    pub rng: &'b mut R,
}

impl<R: Rng> Iterator for WithRng<'_, '_, R> {
    type Item = BlockValue;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.spawn_generator.generate(self.rng))
    }
}
