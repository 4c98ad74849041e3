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

use std::{fs::File, io::BufReader, path::Path};

use log::info;
use rand::rngs::SmallRng;

use crate::{
    config::{ReplacementMode, SimConfig},
    error::{SimError, TraceError},
    mmu::Mmu,
    modules::replacement::{
        ClockReplacementModule, LruReplacementModule, RandomReplacementModule, ReplacementModule,
    },
    summary::SimSummary,
    trace::{TraceEvent, TraceReader},
};

/// Replays `events` in order on a fresh mmu configured by `config`.
///
/// Stops at the first malformed event or inconsistency, no partial summary
/// is produced in that case.
pub fn simulate<I>(config: &SimConfig, events: I) -> Result<SimSummary, SimError>
where
    I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
{
    info!(
        "Simulating {} replacement with {} frame(s)",
        config.replacement, config.num_frames
    );

    let summary = match config.replacement {
        ReplacementMode::Random => match config.seed {
            Some(seed) => run(
                Mmu::with_replacement_module(
                    config.num_frames,
                    RandomReplacementModule::<SmallRng>::seeded(seed),
                ),
                events,
            ),
            None => run(
                Mmu::<RandomReplacementModule<SmallRng>>::new(config.num_frames),
                events,
            ),
        },
        ReplacementMode::Lru => run(Mmu::<LruReplacementModule>::new(config.num_frames), events),
        ReplacementMode::Clock => {
            run(Mmu::<ClockReplacementModule>::new(config.num_frames), events)
        }
    }?;

    info!(
        "Finished: {} events, {} page faults",
        summary.events, summary.page_faults
    );

    Ok(summary)
}

/// Same as `simulate` but streams the events from the trace file at `path`
pub fn simulate_file<P: AsRef<Path>>(config: &SimConfig, path: P) -> Result<SimSummary, SimError> {
    let file = File::open(path.as_ref()).map_err(TraceError::Io)?;
    simulate(config, TraceReader::new(BufReader::new(file)))
}

fn run<R: ReplacementModule, I>(mut mmu: Mmu<R>, events: I) -> Result<SimSummary, SimError>
where
    I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
{
    for event in events {
        let event = event?;
        mmu.access(event.page(), event.is_write())?;

        debug_assert!(mmu.resident_count() <= mmu.num_frames());
    }

    Ok(SimSummary::from_stats(mmu.num_frames(), &mmu.stats()))
}
