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

mod address;
mod config;
mod error;
mod mmu;
mod simulation;
mod summary;
mod trace;

#[cfg(test)]
mod test;

pub mod modules;

pub use crate::address::{page_number, page_offset, PageNumber, PAGE_SHIFT, PAGE_SIZE};
pub use crate::config::{parse_frame_count, OutputMode, ReplacementMode, SimConfig};
pub use crate::error::{ConfigError, SimError, TraceError};
pub use crate::mmu::{AccessOutcome, Eviction, Mmu, MmuStats, ResidentEntry};
pub use crate::simulation::{simulate, simulate_file};
pub use crate::summary::{ReportedSummary, SimSummary, SummaryParseError};
pub use crate::trace::{AccessKind, TraceEvent, TraceReader};
