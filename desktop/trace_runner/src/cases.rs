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

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::warn;
use page_sim::{ReplacementMode, TraceEvent};

const REPORT_START: &str = "total memory frames:";

/// Parts of a file name of the form `<base>-<N>frames-<mode>[.ext]`
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CaseName {
    pub(crate) base: String,
    pub(crate) frames: usize,
    pub(crate) mode: ReplacementMode,
    pub(crate) extension: String,
}

impl CaseName {
    pub(crate) fn parse(file_name: &str) -> Option<CaseName> {
        const FRAMES_SEP: &str = "frames-";

        let idx = file_name.rfind(FRAMES_SEP)?;
        let head = &file_name[..idx];
        let tail = &file_name[idx + FRAMES_SEP.len()..];

        let mode_len = tail
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(tail.len());
        let (mode, extension) = tail.split_at(mode_len);
        if mode.is_empty() || !(extension.is_empty() || (extension.len() > 1 && extension.starts_with('.'))) {
            return None;
        }
        let mode: ReplacementMode = mode.to_ascii_lowercase().parse().ok()?;

        let (base, frames) = head.rsplit_once('-')?;
        if base.is_empty() || frames.is_empty() || !frames.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(CaseName {
            base: base.to_string(),
            frames: frames.parse().ok()?,
            mode,
            extension: extension.to_ascii_lowercase(),
        })
    }
}

/// A simulation run together with its expected report
#[derive(Debug)]
pub(crate) struct Case {
    pub(crate) base: String,
    pub(crate) frames: usize,
    pub(crate) mode: ReplacementMode,
    pub(crate) input_file: PathBuf,
    pub(crate) baseline_file: Option<PathBuf>,
}

/// Files found for a case so far
struct CaseFiles {
    input_file: Option<PathBuf>,
    baseline_file: Option<PathBuf>,
}

impl Case {
    pub(crate) fn baseline_name(&self) -> String {
        format!("{}-{}frames-{}.ans", self.base, self.frames, self.mode.name())
    }
}

/// Calls `f` for the first `limit` lines that are neither blank nor comments
fn scan_lines(path: &Path, limit: usize, mut f: impl FnMut(&str) -> Option<bool>) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    for line in BufReader::new(file).lines().take(limit) {
        let line = match line {
            Ok(line) => line,
            // e.g. binary data
            Err(_) => return false,
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        if let Some(res) = f(line) {
            return res;
        }
    }

    false
}

pub(crate) fn looks_like_trace(path: &Path) -> bool {
    scan_lines(path, 50, |line| {
        if TraceEvent::parse(line).is_some() {
            Some(true)
        } else if line.to_ascii_lowercase().starts_with(REPORT_START) {
            Some(false)
        } else {
            None
        }
    })
}

pub(crate) fn looks_like_baseline(path: &Path) -> bool {
    scan_lines(path, 20, |line| {
        if line.to_ascii_lowercase().starts_with(REPORT_START) {
            Some(true)
        } else if TraceEvent::parse(line).is_some() {
            Some(false)
        } else {
            None
        }
    })
}

/// Collects all cases of `dir` that have a trace to run, sorted by base, frames and mode
pub(crate) fn find_cases(dir: &Path) -> io::Result<Vec<Case>> {
    let mut cases: BTreeMap<(String, usize, ReplacementMode), CaseFiles> = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()).and_then(CaseName::parse) {
            Some(name) => name,
            None => continue,
        };

        let files = cases
            .entry((name.base, name.frames, name.mode))
            .or_insert(CaseFiles {
                input_file: None,
                baseline_file: None,
            });

        if name.extension == ".ans" || looks_like_baseline(&path) {
            files.baseline_file = Some(path);
        } else if looks_like_trace(&path) {
            files.input_file = Some(path);
        } else {
            warn!("Could not classify {}, assuming it is a baseline", path.display());
            files.baseline_file = Some(path);
        }
    }

    Ok(cases
        .into_iter()
        .filter_map(|((base, frames, mode), files)| {
            // pair cases without input with "<base>" or "<base>.trace"
            let input_file = files.input_file.or_else(|| {
                [dir.join(&base), dir.join(format!("{}.trace", base))]
                    .into_iter()
                    .find(|candidate| candidate.is_file() && looks_like_trace(candidate))
            })?;

            Some(Case {
                base,
                frames,
                mode,
                input_file,
                baseline_file: files.baseline_file,
            })
        })
        .collect())
}
