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

//! memsim - page replacement simulator
//!
//! Usage: memsim <trace_file> <num_frames> <rand|lru|clock> <quiet|debug> [--seed <SEED>]
//!
//! Prints the five line summary of the run on stdout. In debug mode every
//! hit, fault, eviction and load is logged to stderr as well.

use std::{env, path::PathBuf, process::ExitCode};

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use page_sim::{
    parse_frame_count, simulate_file, OutputMode, ReplacementMode, SimConfig, SimError,
};

#[derive(Parser)]
#[command(name = "memsim")]
#[command(version, about = "Simulates page replacement for a trace of memory accesses", long_about = None)]
struct Cli {
    /// Trace with one `0x<hex address> <R|W>` access per line
    #[arg(value_name = "TRACE_FILE")]
    trace_file: PathBuf,

    /// Number of physical frames (at least 1)
    #[arg(value_name = "NUM_FRAMES", value_parser = parse_frame_count)]
    num_frames: usize,

    /// Replacement policy: rand, lru or clock
    #[arg(value_name = "REPLACEMENT_MODE")]
    replacement_mode: ReplacementMode,

    /// Output mode: quiet or debug
    #[arg(value_name = "MODE")]
    mode: OutputMode,

    /// Seed for the rand policy, makes its runs reproducible
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logger(cli.mode, env::var("RUST_LOG").ok().as_deref()).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Logger for the given output mode, `RUST_LOG` directives take precedence
fn logger(mode: OutputMode, rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(match mode {
        OutputMode::Quiet => LevelFilter::Warn,
        OutputMode::Debug => LevelFilter::Debug,
    });
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder.format_module_path(false).format_timestamp(None);
    builder
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let mut config = SimConfig::new(cli.num_frames, cli.replacement_mode)?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let summary = simulate_file(&config, &cli.trace_file)?;
    println!("{}", summary);

    Ok(())
}
