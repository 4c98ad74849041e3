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

use std::io::BufRead;

use crate::{address::page_number, error::TraceError, PageNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// A single memory access of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Logical address
    pub address: u64,
    pub kind: AccessKind,
}

impl TraceEvent {
    #[inline]
    pub fn page(&self) -> PageNumber {
        page_number(self.address)
    }

    #[inline]
    pub fn is_write(&self) -> bool {
        self.kind == AccessKind::Write
    }

    /// Parses a line of the form `0x<hex digits> <R|W>`.
    ///
    /// The `0x` prefix is optional. Returns `None` if the line does not
    /// follow this format.
    pub fn parse(line: &str) -> Option<TraceEvent> {
        let mut tokens = line.split_whitespace();
        let address = tokens.next()?;
        let kind = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }

        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            // from_str_radix would accept a leading '+'
            return None;
        }
        let address = u64::from_str_radix(digits, 16).ok()?;

        let kind = match kind {
            "R" => AccessKind::Read,
            "W" => AccessKind::Write,
            _ => return None,
        };

        Some(TraceEvent { address, kind })
    }
}

/// Streams the events of a trace.
///
/// Blank lines are skipped. The first malformed line is reported as error,
/// as skipping it would silently falsify the statistics of the run.
pub struct TraceReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(TraceError::Io(err)));
                }
            }
            self.line_number += 1;

            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line.trim(),
                Err(_) => {
                    self.failed = true;
                    return Some(Err(TraceError::Malformed {
                        line: self.line_number,
                        content: String::from_utf8_lossy(&self.buffer).trim().to_string(),
                    }));
                }
            };
            if line.is_empty() {
                continue;
            }

            return match TraceEvent::parse(line) {
                Some(event) => Some(Ok(event)),
                None => {
                    self.failed = true;
                    Some(Err(TraceError::Malformed {
                        line: self.line_number,
                        content: line.to_string(),
                    }))
                }
            };
        }
    }
}
