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

//! Experiment runner: sweeps frame counts and replacement policies over a
//! set of traces and writes the resulting statistics as CSV and JSON.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use env_logger::Builder;
use log::{info, warn};
use page_sim::{simulate_file, ReplacementMode, SimConfig, SimError};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "experiment_runner")]
#[command(version, about = "Runs page replacement experiments over several traces", long_about = None)]
struct Cli {
    /// Comma separated trace files
    #[arg(long, value_delimiter = ',', default_value = "swim.trace,bzip.trace,gcc.trace,sixpack.trace")]
    traces: Vec<String>,

    /// Comma separated frame counts
    #[arg(long, value_delimiter = ',', default_value = "4,8,16,32,64,128,256,512", value_parser = page_sim::parse_frame_count)]
    frames: Vec<usize>,

    /// Comma separated policies (rand, lru, clock)
    #[arg(long, value_delimiter = ',', default_value = "lru,clock")]
    algos: Vec<ReplacementMode>,

    /// Directory for results.csv and results.json
    #[arg(long, default_value = "results")]
    outdir: PathBuf,

    /// How often rand is repeated (results are averaged)
    #[arg(long, default_value_t = 3)]
    rand_repeats: usize,

    /// Base seed for rand runs, repetition `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,
}

/// Statistics of one trace/policy/frame count combination
#[derive(Debug, Serialize)]
struct ResultRow {
    trace: String,
    algo: &'static str,
    frames: usize,
    events: u64,
    reads: f64,
    writes: f64,
    rate: f64,
    repeats: usize,
}

fn main() -> ExitCode {
    Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let traces = resolve_traces(&cli.traces);
    if traces.is_empty() {
        return Err("no valid traces found".into());
    }

    fs::create_dir_all(&cli.outdir)?;

    let mut rows = vec![];
    for trace in &traces {
        for algo in &cli.algos {
            for frames in &cli.frames {
                rows.push(run_experiment(cli, trace, *algo, *frames)?);
            }
        }
    }

    let csv_path = cli.outdir.join("results.csv");
    write_csv(&csv_path, &rows)?;
    println!("[OK] Wrote {}", csv_path.display());

    let json_path = cli.outdir.join("results.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&json_path)?), &rows)?;
    println!("[OK] Wrote {}", json_path.display());

    Ok(())
}

/// Keeps all traces that exist, trying `<name>.trace` for missing ones
fn resolve_traces(traces: &[String]) -> Vec<PathBuf> {
    traces
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter_map(|t| {
            let path = PathBuf::from(t);
            if path.exists() {
                return Some(path);
            }

            let with_suffix = PathBuf::from(format!("{}.trace", t));
            if with_suffix.exists() {
                return Some(with_suffix);
            }

            warn!("Trace not found: {} (skipped)", t);
            None
        })
        .collect()
}

/// Runs one configuration, each run uses its own mmu
fn run_experiment(
    cli: &Cli,
    trace: &Path,
    algo: ReplacementMode,
    frames: usize,
) -> Result<ResultRow, SimError> {
    let repeats = if algo.is_deterministic() {
        1
    } else {
        cli.rand_repeats.max(1)
    };

    let mut summaries = Vec::with_capacity(repeats);
    for i in 0..repeats {
        let mut config = SimConfig::new(frames, algo)?;
        if let Some(seed) = cli.seed {
            config = config.with_seed(seed.wrapping_add(i as u64));
        }

        summaries.push(simulate_file(&config, trace)?);
    }

    let count = summaries.len() as f64;
    let row = ResultRow {
        trace: trace
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        algo: algo.name(),
        frames,
        events: summaries[0].events,
        reads: summaries.iter().map(|s| s.disk_reads as f64).sum::<f64>() / count,
        writes: summaries.iter().map(|s| s.disk_writes as f64).sum::<f64>() / count,
        rate: summaries.iter().map(|s| s.page_fault_rate()).sum::<f64>() / count,
        repeats,
    };

    info!(
        "{} {} frames={}: rate={:.4}, writes={}",
        row.trace, row.algo, row.frames, row.rate, row.writes
    );

    Ok(row)
}

fn write_csv(path: &Path, rows: &[ResultRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
