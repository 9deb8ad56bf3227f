use alloc::collections::VecDeque;
use rand::prelude::*;

use crate::*;

/// Source of candidate mine positions.
///
/// Callers do the rejection themselves: a sample landing on a cell that cannot take a mine is simply drawn again, so
/// implementations must keep producing coordinates and should cover the whole board eventually.
pub trait MineSampler {
    fn sample(&mut self, size: Coord2) -> Coord2;
}

/// Uniform sampler backed by a seeded [`SmallRng`].
#[derive(Clone, Debug)]
pub struct RandomSampler {
    rng: SmallRng,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSampler for RandomSampler {
    fn sample(&mut self, (rows, columns): Coord2) -> Coord2 {
        (
            self.rng.random_range(0..rows),
            self.rng.random_range(0..columns),
        )
    }
}

/// Replays a fixed list of coordinates, then falls back to uniform sampling.
///
/// Scripted coordinates outside the board are skipped.
#[derive(Clone, Debug)]
pub struct ScriptedSampler {
    script: VecDeque<Coord2>,
    fallback: RandomSampler,
}

impl ScriptedSampler {
    pub fn new(script: impl IntoIterator<Item = Coord2>, seed: u64) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: RandomSampler::new(seed),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MineSampler for ScriptedSampler {
    fn sample(&mut self, size: Coord2) -> Coord2 {
        while let Some(coords) = self.script.pop_front() {
            if coords.0 < size.0 && coords.1 < size.1 {
                return coords;
            }
            log::warn!("Scripted mine position {:?} is outside {:?}, skipped", coords, size);
        }
        self.fallback.sample(size)
    }
}

impl<S: MineSampler + ?Sized> MineSampler for &mut S {
    fn sample(&mut self, size: Coord2) -> Coord2 {
        (**self).sample(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_sampler_stays_in_bounds() {
        let mut sampler = RandomSampler::new(7);
        for _ in 0..1000 {
            let (row, column) = sampler.sample((3, 5));
            assert!(row < 3);
            assert!(column < 5);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomSampler::new(42);
        let mut b = RandomSampler::new(42);
        for _ in 0..32 {
            assert_eq!(a.sample((16, 30)), b.sample((16, 30)));
        }
    }

    #[test]
    fn scripted_sampler_replays_then_falls_back() {
        let mut sampler = ScriptedSampler::new([(0, 0), (9, 9), (1, 2)], 1);

        assert_eq!(sampler.sample((4, 4)), (0, 0));
        // (9, 9) is out of bounds and skipped
        assert_eq!(sampler.sample((4, 4)), (1, 2));
        assert_eq!(sampler.remaining(), 0);

        let (row, column) = sampler.sample((4, 4));
        assert!(row < 4 && column < 4);
    }
}
