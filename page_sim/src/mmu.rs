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

use std::collections::HashMap;

use log::{debug, trace};
use serde::Serialize;

use crate::{error::SimError, modules::replacement::ReplacementModule, PageNumber};

/// A physical frame that currently holds a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentEntry<S> {
    pub page: PageNumber,

    /// Page was written since it was loaded
    pub dirty: bool,

    /// Metadata of the replacement module
    pub state: S,
}

/// Counters of a single simulation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MmuStats {
    pub page_faults: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub events_processed: u64,
}

/// A page that had to leave its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    pub page: PageNumber,

    /// Victim had to be written back
    pub dirty: bool,

    /// Frame that now holds the new page
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,

    /// The page was loaded, `evicted` is `None` if a free frame was used
    Miss { evicted: Option<Eviction> },
}

impl AccessOutcome {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        !self.is_hit()
    }
}

/// Memory management unit with a fixed pool of physical frames.
///
/// Frames are handed out in order until the pool is full, from then on every
/// miss replaces the page selected by the replacement module `R`. No page is
/// ever resident twice, and the pool never shrinks again once it is full.
pub struct Mmu<R: ReplacementModule> {
    num_frames: usize,

    /// Frame table, `frames.len() <= num_frames`
    frames: Vec<ResidentEntry<R::EntryState>>,

    /// Maps each resident page to its slot in `frames`
    page_index: HashMap<PageNumber, usize>,

    replacement: R,

    stats: MmuStats,
}

impl<R: ReplacementModule> Mmu<R> {
    pub fn new(num_frames: usize) -> Self {
        Self::with_replacement_module(num_frames, R::new(num_frames))
    }

    pub fn with_replacement_module(num_frames: usize, replacement: R) -> Self {
        assert!(num_frames >= 1, "an mmu needs at least one frame");

        Self {
            num_frames,
            frames: Vec::with_capacity(num_frames),
            page_index: HashMap::with_capacity(num_frames),
            replacement,
            stats: MmuStats::default(),
        }
    }

    /// Reads or writes `page`.
    ///
    /// Fails only if the internal bookkeeping got inconsistent,
    /// in that case the counters must not be trusted anymore.
    pub fn access(&mut self, page: PageNumber, is_write: bool) -> Result<AccessOutcome, SimError> {
        self.stats.events_processed += 1;
        trace!("Access page {} (write={})", page, is_write);

        if let Some(&slot) = self.page_index.get(&page) {
            let entry = &mut self.frames[slot];
            debug_assert_eq!(entry.page, page, "page index is out of sync");

            if is_write {
                entry.dirty = true;
            }
            debug!("HIT: page {}. Dirty: {}", page, entry.dirty);

            self.replacement.on_access(slot, &mut self.frames);
            return Ok(AccessOutcome::Hit);
        }

        self.stats.page_faults += 1;
        debug!("FAULT: page {}", page);

        let entry = ResidentEntry {
            page,
            dirty: is_write,
            state: Default::default(),
        };

        if self.frames.len() < self.num_frames {
            // free frame left, no eviction necessary
            let slot = self.frames.len();
            self.frames.push(entry);
            self.finish_load(slot);

            return Ok(AccessOutcome::Miss { evicted: None });
        }

        let slot = self
            .replacement
            .select_victim(&mut self.frames)
            .ok_or_else(|| {
                SimError::InvariantViolation(format!(
                    "no victim found while {} frames are resident",
                    self.frames.len()
                ))
            })?;

        let victim = self.frames.get(slot).ok_or_else(|| {
            SimError::InvariantViolation(format!(
                "victim slot {} is out of range (frames={})",
                slot,
                self.frames.len()
            ))
        })?;
        let eviction = Eviction {
            page: victim.page,
            dirty: victim.dirty,
            slot,
        };

        if self.page_index.remove(&eviction.page) != Some(slot) {
            return Err(SimError::InvariantViolation(format!(
                "victim page {} is not resident in slot {}",
                eviction.page, slot
            )));
        }

        if eviction.dirty {
            // write back
            self.stats.disk_writes += 1;
            debug!("REMOVING: dirty page {}", eviction.page);
        } else {
            debug!("REMOVING: clean page {}", eviction.page);
        }

        self.frames[slot] = entry;
        self.finish_load(slot);

        Ok(AccessOutcome::Miss {
            evicted: Some(eviction),
        })
    }

    #[inline]
    pub fn read(&mut self, page: PageNumber) -> Result<AccessOutcome, SimError> {
        self.access(page, false)
    }

    #[inline]
    pub fn write(&mut self, page: PageNumber) -> Result<AccessOutcome, SimError> {
        self.access(page, true)
    }

    /// Registers the page that was just placed in `slot`
    fn finish_load(&mut self, slot: usize) {
        let page = self.frames[slot].page;
        let previous = self.page_index.insert(page, slot);
        debug_assert!(previous.is_none(), "page {} was already resident", page);

        // load from disk
        self.stats.disk_reads += 1;
        self.replacement.on_load(slot, &mut self.frames);

        debug!(
            "LOADED: page {}. Dirty: {} (slot {})",
            page, self.frames[slot].dirty, slot
        );
    }

    #[inline]
    pub fn stats(&self) -> MmuStats {
        self.stats
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    #[inline]
    pub fn resident_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_resident(&self, page: PageNumber) -> bool {
        self.page_index.contains_key(&page)
    }

    pub fn entry(&self, page: PageNumber) -> Option<&ResidentEntry<R::EntryState>> {
        self.page_index.get(&page).map(|slot| &self.frames[*slot])
    }

    /// Frame table in slot order
    #[inline]
    pub fn frames(&self) -> &[ResidentEntry<R::EntryState>] {
        &self.frames
    }

    #[inline]
    pub fn replacement_module(&self) -> &R {
        &self.replacement
    }
}
