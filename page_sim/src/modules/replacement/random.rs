/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};

use crate::mmu::ResidentEntry;

use super::ReplacementModule;

/// Evicts a uniformly chosen resident page.
///
/// Besides frame membership no metadata is needed.
pub struct RandomReplacementModule<R: RngCore = SmallRng> {
    rng: R,
}

impl<R: RngCore> RandomReplacementModule<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + SeedableRng> RandomReplacementModule<R> {
    /// Creates a module whose victim sequence is reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(R::seed_from_u64(seed))
    }
}

impl<R: RngCore + SeedableRng> ReplacementModule for RandomReplacementModule<R> {
    type EntryState = ();

    fn new(_num_frames: usize) -> Self {
        Self::with_rng(R::from_entropy())
    }

    #[inline]
    fn on_load(&mut self, _slot: usize, _frames: &mut [ResidentEntry<()>]) {}

    #[inline]
    fn on_access(&mut self, _slot: usize, _frames: &mut [ResidentEntry<()>]) {}

    fn select_victim(&mut self, frames: &mut [ResidentEntry<()>]) -> Option<usize> {
        if frames.is_empty() {
            return None;
        }

        Some(self.rng.gen_range(0..frames.len()))
    }
}

#[cfg(test)]
mod test {
    use rand_xoshiro::{rand_core::SeedableRng, Xoshiro256PlusPlus};

    use super::{RandomReplacementModule, ReplacementModule};
    use crate::mmu::ResidentEntry;

    fn full_frames(count: usize) -> Vec<ResidentEntry<()>> {
        (0..count)
            .map(|page| ResidentEntry {
                page: page as u64,
                dirty: false,
                state: (),
            })
            .collect()
    }

    #[test]
    fn test_victim_is_resident() {
        let mut module = RandomReplacementModule::<Xoshiro256PlusPlus>::seeded(1);
        let mut frames = full_frames(5);

        for _ in 0..1000 {
            let slot = module.select_victim(&mut frames).unwrap();
            assert!(slot < frames.len());
        }

        assert_eq!(module.select_victim(&mut []), None);
    }

    #[test]
    fn test_same_seed_same_victims() {
        let mut frames = full_frames(8);
        let mut a = RandomReplacementModule::<Xoshiro256PlusPlus>::seeded(4242);
        let mut b = RandomReplacementModule::<Xoshiro256PlusPlus>::seeded(4242);

        for _ in 0..200 {
            assert_eq!(a.select_victim(&mut frames), b.select_victim(&mut frames));
        }
    }

    #[test]
    fn test_uniform_victim_distribution() {
        const FRAMES: usize = 4;
        const SAMPLES: usize = 40_000;

        let mut frames = full_frames(FRAMES);
        let mut counts = [0usize; FRAMES];

        // many independently seeded runs on the same frame table
        for seed in 0..(SAMPLES / 100) as u64 {
            let mut module =
                RandomReplacementModule::with_rng(Xoshiro256PlusPlus::seed_from_u64(seed));
            for _ in 0..100 {
                counts[module.select_victim(&mut frames).unwrap()] += 1;
            }
        }

        // expected 10000 per slot, allow 5% deviation
        let expected = SAMPLES / FRAMES;
        for count in counts {
            assert!(
                count.abs_diff(expected) < expected / 20,
                "victim distribution not uniform: {:?}",
                counts
            );
        }
    }

    #[test]
    fn test_entropy_seeded_module() {
        let mut module = RandomReplacementModule::<rand::rngs::SmallRng>::new(3);
        let mut frames = full_frames(3);
        assert!(module.select_victim(&mut frames).unwrap() < 3);
    }
}
