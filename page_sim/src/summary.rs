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

use core::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::mmu::MmuStats;

const FRAMES_LABEL: &str = "total memory frames:";
const EVENTS_LABEL: &str = "events in trace:";
const READS_LABEL: &str = "total disk reads:";
const WRITES_LABEL: &str = "total disk writes:";
const RATE_LABEL: &str = "page fault rate:";

/// Maximum difference of two fault rates that are considered equal
const RATE_TOLERANCE: f64 = 1e-6;

/// Result of a simulation run.
///
/// Its `Display` output is the five line report that downstream tools parse
/// positionally, so neither labels nor order may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimSummary {
    pub num_frames: usize,
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_faults: u64,
}

impl SimSummary {
    pub fn from_stats(num_frames: usize, stats: &MmuStats) -> Self {
        Self {
            num_frames,
            events: stats.events_processed,
            disk_reads: stats.disk_reads,
            disk_writes: stats.disk_writes,
            page_faults: stats.page_faults,
        }
    }

    /// Faults per processed event, `0.0` for an empty trace
    pub fn page_fault_rate(&self) -> f64 {
        if self.events == 0 {
            return 0.0;
        }

        self.page_faults as f64 / self.events as f64
    }

    pub fn to_reported(&self) -> ReportedSummary {
        ReportedSummary {
            num_frames: self.num_frames as u64,
            events: self.events,
            disk_reads: self.disk_reads,
            disk_writes: self.disk_writes,
            page_fault_rate: self.page_fault_rate(),
        }
    }
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", FRAMES_LABEL, self.num_frames)?;
        writeln!(f, "{} {}", EVENTS_LABEL, self.events)?;
        writeln!(f, "{} {}", READS_LABEL, self.disk_reads)?;
        writeln!(f, "{} {}", WRITES_LABEL, self.disk_writes)?;
        write!(f, "{} {:.4}", RATE_LABEL, self.page_fault_rate())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryParseError {
    #[error("report is missing {0:?}")]
    MissingField(&'static str),

    #[error("invalid value in report line {0:?}")]
    InvalidValue(String),
}

/// Summary as read back from a previously printed report (e.g. a baseline)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportedSummary {
    pub num_frames: u64,
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_fault_rate: f64,
}

impl ReportedSummary {
    /// Reads the five report values from `text`.
    ///
    /// Labels are matched case insensitively at the start of a line,
    /// all other lines (e.g. debug output) are ignored.
    pub fn parse(text: &str) -> Result<Self, SummaryParseError> {
        let mut num_frames = None;
        let mut events = None;
        let mut disk_reads = None;
        let mut disk_writes = None;
        let mut page_fault_rate = None;

        for line in text.lines() {
            let lower = line.trim().to_ascii_lowercase();

            if let Some(value) = lower.strip_prefix(FRAMES_LABEL) {
                num_frames = Some(parse_value(value, line)?);
            } else if let Some(value) = lower.strip_prefix(EVENTS_LABEL) {
                events = Some(parse_value(value, line)?);
            } else if let Some(value) = lower.strip_prefix(READS_LABEL) {
                disk_reads = Some(parse_value(value, line)?);
            } else if let Some(value) = lower.strip_prefix(WRITES_LABEL) {
                disk_writes = Some(parse_value(value, line)?);
            } else if let Some(value) = lower.strip_prefix(RATE_LABEL) {
                page_fault_rate = Some(parse_value(value, line)?);
            }
        }

        Ok(Self {
            num_frames: num_frames.ok_or(SummaryParseError::MissingField(FRAMES_LABEL))?,
            events: events.ok_or(SummaryParseError::MissingField(EVENTS_LABEL))?,
            disk_reads: disk_reads.ok_or(SummaryParseError::MissingField(READS_LABEL))?,
            disk_writes: disk_writes.ok_or(SummaryParseError::MissingField(WRITES_LABEL))?,
            page_fault_rate: page_fault_rate
                .ok_or(SummaryParseError::MissingField(RATE_LABEL))?,
        })
    }

    /// Counters have to be equal, rates may differ by rounding
    pub fn matches(&self, other: &ReportedSummary) -> bool {
        self.num_frames == other.num_frames
            && self.events == other.events
            && self.disk_reads == other.disk_reads
            && self.disk_writes == other.disk_writes
            && (self.page_fault_rate - other.page_fault_rate).abs() < RATE_TOLERANCE
    }
}

fn parse_value<T: core::str::FromStr>(value: &str, line: &str) -> Result<T, SummaryParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| SummaryParseError::InvalidValue(line.to_string()))
}

#[cfg(test)]
mod test {
    use super::{ReportedSummary, SimSummary, SummaryParseError};

    fn summary() -> SimSummary {
        SimSummary {
            num_frames: 2,
            events: 4,
            disk_reads: 4,
            disk_writes: 0,
            page_faults: 4,
        }
    }

    #[test]
    fn test_report_format() {
        let expected = "total memory frames: 2\n\
                        events in trace: 4\n\
                        total disk reads: 4\n\
                        total disk writes: 0\n\
                        page fault rate: 1.0000";
        assert_eq!(summary().to_string(), expected);

        let summary = SimSummary {
            num_frames: 64,
            events: 3,
            disk_reads: 1,
            disk_writes: 0,
            page_faults: 1,
        };
        assert!(summary.to_string().ends_with("page fault rate: 0.3333"));
    }

    #[test]
    fn test_empty_trace_rate() {
        let summary = SimSummary {
            num_frames: 8,
            events: 0,
            disk_reads: 0,
            disk_writes: 0,
            page_faults: 0,
        };
        assert_eq!(summary.page_fault_rate(), 0.0);
        assert!(summary.to_string().ends_with("page fault rate: 0.0000"));
    }

    #[test]
    fn test_parse_own_report() {
        let reported = ReportedSummary::parse(&summary().to_string()).unwrap();
        assert!(reported.matches(&summary().to_reported()));
    }

    #[test]
    fn test_parse_ignores_other_lines() {
        let text = "FAULT: page 1\n\
                    Total Memory Frames: 12\n\
                    events in trace: 1000\n\
                    HIT: page 3. Dirty: false\n\
                    total disk reads: 300\n\
                    total disk writes:   15\n\
                    page fault rate: 0.3000\n";
        let reported = ReportedSummary::parse(text).unwrap();

        assert_eq!(reported.num_frames, 12);
        assert_eq!(reported.events, 1000);
        assert_eq!(reported.disk_reads, 300);
        assert_eq!(reported.disk_writes, 15);
        assert!((reported.page_fault_rate - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ReportedSummary::parse("total memory frames: 1\n"),
            Err(SummaryParseError::MissingField("events in trace:"))
        );
        assert_eq!(
            ReportedSummary::parse("total memory frames: lots\n"),
            Err(SummaryParseError::InvalidValue(
                "total memory frames: lots".into()
            ))
        );
    }

    #[test]
    fn test_matches_tolerance() {
        let a = summary().to_reported();
        let mut b = a;
        b.page_fault_rate += 1e-7;
        assert!(a.matches(&b));

        b.page_fault_rate += 1e-3;
        assert!(!a.matches(&b));

        let mut c = a;
        c.disk_writes += 1;
        assert!(!a.matches(&c));
    }
}
