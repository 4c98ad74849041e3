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

use crate::mmu::ResidentEntry;

mod clock;
mod lru;
mod random;

pub use clock::*;
pub use lru::*;
pub use random::*;

/// Decides which resident page has to leave once all frames are occupied.
///
/// The mmu owns the frame table and hands it to the module on every event.
/// Each frame carries `EntryState`, the metadata this module needs per
/// resident page. Slots are indices into the frame table and stay stable:
/// a page is always loaded into the slot that was freed for it.
pub trait ReplacementModule {
    /// Per frame metadata of this module
    type EntryState: Default;

    fn new(num_frames: usize) -> Self;

    /// A page was loaded into `slot`.
    ///
    /// `frames[slot].state` is reset to its default before this is called.
    fn on_load(&mut self, slot: usize, frames: &mut [ResidentEntry<Self::EntryState>]);

    /// The resident page in `slot` was accessed again
    fn on_access(&mut self, slot: usize, frames: &mut [ResidentEntry<Self::EntryState>]);

    /// Selects the slot whose page will be evicted.
    ///
    /// Only called if every frame is occupied. The returned slot will
    /// be overwritten and passed to `on_load` afterwards.
    /// Returns `None` if no victim could be found, which is a logic error.
    fn select_victim(&mut self, frames: &mut [ResidentEntry<Self::EntryState>]) -> Option<usize>;
}
