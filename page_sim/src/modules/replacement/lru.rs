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

use crate::{mmu::ResidentEntry, PageNumber};

use super::ReplacementModule;

/// Links of a frame inside the recency list
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruLinks {
    /// Slot that was used right after this one
    newer: Option<usize>,

    /// Slot that was used right before this one
    older: Option<usize>,
}

/// Evicts the least recently used page.
///
/// The frames form a doubly linked list ordered by their last use,
/// the links are stored inside the frames themselves. Moving a frame to
/// the front and evicting the last frame are both O(1).
pub struct LruReplacementModule {
    most_recent: Option<usize>,
    least_recent: Option<usize>,
}

impl LruReplacementModule {
    fn unlink(&mut self, slot: usize, frames: &mut [ResidentEntry<LruLinks>]) {
        let LruLinks { newer, older } = frames[slot].state;

        match newer {
            Some(newer) => frames[newer].state.older = older,
            None => self.most_recent = older,
        }
        match older {
            Some(older) => frames[older].state.newer = newer,
            None => self.least_recent = newer,
        }

        frames[slot].state = LruLinks::default();
    }

    fn push_most_recent(&mut self, slot: usize, frames: &mut [ResidentEntry<LruLinks>]) {
        frames[slot].state = LruLinks {
            newer: None,
            older: self.most_recent,
        };

        match self.most_recent {
            Some(prev) => frames[prev].state.newer = Some(slot),
            None => self.least_recent = Some(slot),
        }
        self.most_recent = Some(slot);
    }

    /// Resident pages ordered from most to least recently used
    pub fn recency_order(&self, frames: &[ResidentEntry<LruLinks>]) -> Vec<PageNumber> {
        let mut res = Vec::with_capacity(frames.len());
        let mut curr = self.most_recent;

        while let Some(slot) = curr {
            res.push(frames[slot].page);
            curr = frames[slot].state.older;
        }

        res
    }
}

impl ReplacementModule for LruReplacementModule {
    type EntryState = LruLinks;

    fn new(_num_frames: usize) -> Self {
        Self {
            most_recent: None,
            least_recent: None,
        }
    }

    fn on_load(&mut self, slot: usize, frames: &mut [ResidentEntry<LruLinks>]) {
        self.push_most_recent(slot, frames);
    }

    fn on_access(&mut self, slot: usize, frames: &mut [ResidentEntry<LruLinks>]) {
        if self.most_recent == Some(slot) {
            // already at the front
            return;
        }

        self.unlink(slot, frames);
        self.push_most_recent(slot, frames);
    }

    fn select_victim(&mut self, frames: &mut [ResidentEntry<LruLinks>]) -> Option<usize> {
        let victim = self.least_recent?;
        self.unlink(victim, frames);

        Some(victim)
    }
}
