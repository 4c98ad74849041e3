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

use core::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Page replacement policy used once all frames are occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReplacementMode {
    Random,
    Lru,
    Clock,
}

impl ReplacementMode {
    pub const ALL: [ReplacementMode; 3] = [Self::Random, Self::Lru, Self::Clock];

    /// Name as used on the command line and in baseline file names
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Random => "rand",
            Self::Lru => "lru",
            Self::Clock => "clock",
        }
    }

    /// Whether two runs with the same input always produce the same result
    pub const fn is_deterministic(&self) -> bool {
        !matches!(self, Self::Random)
    }
}

impl FromStr for ReplacementMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rand" => Ok(Self::Random),
            "lru" => Ok(Self::Lru),
            "clock" => Ok(Self::Clock),
            other => Err(ConfigError::UnknownReplacementMode(other.to_string())),
        }
    }
}

impl fmt::Display for ReplacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controls whether per access diagnostics are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,
    Debug,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(Self::Quiet),
            "debug" => Ok(Self::Debug),
            other => Err(ConfigError::UnknownOutputMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Size of the physical frame pool
    pub num_frames: usize,

    pub replacement: ReplacementMode,

    /// Seed for the random policy.
    /// If `None` the random policy is seeded from OS entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(num_frames: usize, replacement: ReplacementMode) -> Result<Self, ConfigError> {
        if num_frames < 1 {
            return Err(ConfigError::InvalidFrameCount(num_frames));
        }

        Ok(Self {
            num_frames,
            replacement,
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Parses a frame count as given on the command line
pub fn parse_frame_count(s: &str) -> Result<usize, ConfigError> {
    let num_frames: usize = s
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidFrameValue(s.to_string()))?;

    if num_frames < 1 {
        return Err(ConfigError::InvalidFrameCount(num_frames));
    }

    Ok(num_frames)
}
