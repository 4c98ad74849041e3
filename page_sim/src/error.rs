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

use thiserror::Error;

/// Invalid simulation parameters, detected before any access is simulated
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number of frames: {0} (at least one frame is required)")]
    InvalidFrameCount(usize),

    #[error("invalid number of frames: {0:?}")]
    InvalidFrameValue(String),

    #[error("unknown replacement mode: {0:?} (expected rand, lru or clock)")]
    UnknownReplacementMode(String),

    #[error("unknown mode: {0:?} (expected quiet or debug)")]
    UnknownOutputMode(String),
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("could not read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed trace line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The bookkeeping of the mmu is inconsistent, the run has to be aborted
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
