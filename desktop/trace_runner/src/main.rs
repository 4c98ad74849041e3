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

//! Regression runner: replays every `<base>-<N>frames-<mode>` case of a
//! directory and compares the report with its `.ans` baseline.

use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use env_logger::Builder;
use page_sim::{simulate_file, ReportedSummary, SimConfig, SimError, SimSummary};

mod cases;

use cases::{find_cases, Case};

#[derive(Parser)]
#[command(name = "trace_runner")]
#[command(version, about = "Runs all trace cases of a directory against their baselines", long_about = None)]
struct Cli {
    /// Directory containing traces and `.ans` baselines
    #[arg(long, default_value = ".")]
    trace_dir: PathBuf,

    /// Stop at the first failing case
    #[arg(long)]
    fail_fast: bool,

    /// Write (or overwrite) the baselines instead of comparing against them
    #[arg(long)]
    write_ans: bool,

    /// Seed for rand cases
    #[arg(long)]
    seed: Option<u64>,
}

enum CaseResult {
    Passed,
    Failed,
}

fn main() -> ExitCode {
    Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();

    let cases = match find_cases(&cli.trace_dir) {
        Ok(cases) => cases,
        Err(err) => {
            eprintln!("Error: could not read {}: {}", cli.trace_dir.display(), err);
            return ExitCode::FAILURE;
        }
    };

    if cases.is_empty() {
        println!("No valid cases found in {}.", cli.trace_dir.display());
        println!("Expect to see files like 'trace2-6frames-lru.ans' paired with 'trace2' or 'trace2.trace'.");
        return ExitCode::FAILURE;
    }

    let total = cases.len();
    let mut passed = 0;

    for case in &cases {
        match run_case(&cli, case) {
            CaseResult::Passed => passed += 1,
            CaseResult::Failed if cli.fail_fast => return ExitCode::FAILURE,
            CaseResult::Failed => {}
        }
    }

    println!();
    println!(
        "Summary: {}/{} cases OK (including those without .ans or when writing baselines)",
        passed, total
    );

    if passed == total {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn simulate_case(case: &Case, seed: Option<u64>) -> Result<SimSummary, SimError> {
    let mut config = SimConfig::new(case.frames, case.mode)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    simulate_file(&config, &case.input_file)
}

fn run_case(cli: &Cli, case: &Case) -> CaseResult {
    let input_name = case
        .input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "=== Running {} (frames={}, mode={}) ===",
        input_name, case.frames, case.mode
    );

    let summary = match simulate_case(case, cli.seed) {
        Ok(summary) => summary,
        Err(err) => {
            println!("  ERROR: {}", err);
            return CaseResult::Failed;
        }
    };
    println!("  Ran OK.");

    if cli.write_ans {
        let path = cli.trace_dir.join(case.baseline_name());
        return match fs::write(&path, format!("{}\n", summary)) {
            Ok(()) => {
                println!("  Wrote baseline: {}", case.baseline_name());
                CaseResult::Passed
            }
            Err(err) => {
                println!("  ERROR: could not write {}: {}", path.display(), err);
                CaseResult::Failed
            }
        };
    }

    let baseline_file = match &case.baseline_file {
        Some(file) => file,
        // nothing to compare against
        None => return CaseResult::Passed,
    };

    let expected = fs::read(baseline_file)
        .map_err(|err| err.to_string())
        .and_then(|bytes| {
            ReportedSummary::parse(&String::from_utf8_lossy(&bytes)).map_err(|err| err.to_string())
        });

    match expected {
        Ok(expected) => {
            let got = summary.to_reported();
            if got.matches(&expected) {
                println!("  Matches .ans");
                CaseResult::Passed
            } else {
                println!("  Mismatch vs .ans");
                println!("     got:      {:?}", got);
                println!("     expected: {:?}", expected);
                CaseResult::Failed
            }
        }
        Err(err) => {
            println!("  WARN: could not parse stats ({}). Counting as executed.", err);
            CaseResult::Passed
        }
    }
}
