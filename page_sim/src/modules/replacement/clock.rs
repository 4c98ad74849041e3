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

use log::debug;

use crate::mmu::ResidentEntry;

use super::ReplacementModule;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceBit {
    pub referenced: bool,
}

/// Second chance replacement.
///
/// The frame table is used as the ring of the clock. The hand keeps its
/// position between evictions. A frame whose reference bit is set is skipped
/// once (and its bit is cleared), the first frame with a cleared bit is evicted.
///
/// Loaded pages start with their reference bit set, just like a page that was
/// accessed again. Filling a free frame does not move the hand.
pub struct ClockReplacementModule {
    hand: usize,
}

impl ClockReplacementModule {
    /// Slot that will be inspected first during the next eviction
    #[inline]
    pub fn hand(&self) -> usize {
        self.hand
    }
}

impl ReplacementModule for ClockReplacementModule {
    type EntryState = ReferenceBit;

    fn new(_num_frames: usize) -> Self {
        Self { hand: 0 }
    }

    #[inline]
    fn on_load(&mut self, slot: usize, frames: &mut [ResidentEntry<ReferenceBit>]) {
        frames[slot].state.referenced = true;
    }

    #[inline]
    fn on_access(&mut self, slot: usize, frames: &mut [ResidentEntry<ReferenceBit>]) {
        frames[slot].state.referenced = true;
    }

    fn select_victim(&mut self, frames: &mut [ResidentEntry<ReferenceBit>]) -> Option<usize> {
        let len = frames.len();
        if len == 0 {
            return None;
        }
        if self.hand >= len {
            self.hand %= len;
        }

        // after one round every bit is cleared, so two rounds always suffice
        for _ in 0..2 * len {
            let slot = self.hand;
            self.hand = (self.hand + 1) % len;

            let frame = &mut frames[slot];
            if frame.state.referenced {
                frame.state.referenced = false;
                debug!("SECOND CHANCE: page {}. Reference: 0", frame.page);
            } else {
                return Some(slot);
            }
        }

        None
    }
}
