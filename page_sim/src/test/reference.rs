//! Straightforward models of the replacement policies.
//! Slow, but simple enough to be obviously correct.

use std::fmt::Write;

use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro256PlusPlus,
};

use super::simulate_str;
use crate::{
    config::{ReplacementMode, SimConfig},
    mmu::{AccessOutcome, Mmu},
    modules::replacement::{ClockReplacementModule, LruReplacementModule},
};

/// Generates a trace with some locality over `page_count` pages
pub(super) fn generate_trace(seed: u64, len: usize, page_count: u64) -> String {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut trace = String::new();
    let mut page = 0;

    for _ in 0..len {
        if rng.next_u32() % 4 == 0 {
            // jump somewhere else
            page = rng.next_u64() % page_count;
        }
        let offset = rng.next_u64() % 4096;
        let kind = if rng.next_u32() % 3 == 0 { 'W' } else { 'R' };

        writeln!(trace, "0x{:x} {}", page * 4096 + offset, kind).unwrap();
    }

    trace
}

fn parse_trace(trace: &str) -> Vec<(u64, bool)> {
    trace
        .lines()
        .map(|line| {
            let (address, kind) = line.split_once(' ').unwrap();
            let address = u64::from_str_radix(address.trim_start_matches("0x"), 16).unwrap();
            (address >> 12, kind == "W")
        })
        .collect()
}

struct ReferenceFrame {
    page: u64,
    last_used: u64,
    referenced: bool,
}

/// Returns the evicted page (if any) for every access
fn reference_lru(accesses: &[(u64, bool)], num_frames: usize) -> Vec<Option<u64>> {
    let mut frames: Vec<ReferenceFrame> = vec![];
    let mut res = vec![];

    for (time, (page, _)) in accesses.iter().enumerate() {
        let time = time as u64;
        if let Some(frame) = frames.iter_mut().find(|f| f.page == *page) {
            frame.last_used = time;
            res.push(None);
            continue;
        }

        let mut evicted = None;
        if frames.len() == num_frames {
            let (index, _) = frames
                .iter()
                .enumerate()
                .min_by_key(|(_, f)| f.last_used)
                .unwrap();
            evicted = Some(frames.remove(index).page);
        }
        frames.push(ReferenceFrame {
            page: *page,
            last_used: time,
            referenced: true,
        });
        res.push(evicted);
    }

    res
}

fn reference_clock(accesses: &[(u64, bool)], num_frames: usize) -> Vec<Option<u64>> {
    let mut frames: Vec<ReferenceFrame> = vec![];
    let mut hand = 0;
    let mut res = vec![];

    for (page, _) in accesses {
        if let Some(frame) = frames.iter_mut().find(|f| f.page == *page) {
            frame.referenced = true;
            res.push(None);
            continue;
        }

        let new_frame = ReferenceFrame {
            page: *page,
            last_used: 0,
            referenced: true,
        };

        if frames.len() < num_frames {
            frames.push(new_frame);
            res.push(None);
            continue;
        }

        loop {
            if frames[hand].referenced {
                frames[hand].referenced = false;
                hand = (hand + 1) % num_frames;
            } else {
                res.push(Some(frames[hand].page));
                frames[hand] = new_frame;
                hand = (hand + 1) % num_frames;
                break;
            }
        }
    }

    res
}

fn evictions<R: crate::modules::replacement::ReplacementModule>(
    mut mmu: Mmu<R>,
    accesses: &[(u64, bool)],
) -> Vec<Option<u64>> {
    accesses
        .iter()
        .map(|(page, is_write)| match mmu.access(*page, *is_write).unwrap() {
            AccessOutcome::Miss {
                evicted: Some(eviction),
            } => Some(eviction.page),
            _ => None,
        })
        .collect()
}

#[test]
fn test_lru_matches_reference() {
    for (seed, frames) in [(1, 1), (2, 3), (3, 8), (4, 17)] {
        let accesses = parse_trace(&generate_trace(seed, 3_000, 32));
        assert_eq!(
            evictions(Mmu::<LruReplacementModule>::new(frames), &accesses),
            reference_lru(&accesses, frames),
            "seed {}, frames {}",
            seed,
            frames
        );
    }
}

#[test]
fn test_clock_matches_reference() {
    for (seed, frames) in [(5, 1), (6, 3), (7, 8), (8, 17)] {
        let accesses = parse_trace(&generate_trace(seed, 3_000, 32));
        assert_eq!(
            evictions(Mmu::<ClockReplacementModule>::new(frames), &accesses),
            reference_clock(&accesses, frames),
            "seed {}, frames {}",
            seed,
            frames
        );
    }
}

#[test]
fn test_lru_write_backs_match_reference() {
    let trace = generate_trace(21, 5_000, 64);
    let accesses = parse_trace(&trace);

    // count dirty victims of the reference model
    let mut dirty: std::collections::HashMap<u64, bool> = Default::default();
    let mut writes = 0;
    for ((page, is_write), evicted) in accesses.iter().zip(reference_lru(&accesses, 12)) {
        if let Some(victim) = evicted {
            if dirty.remove(&victim).unwrap_or(false) {
                writes += 1;
            }
        }
        let entry = dirty.entry(*page).or_insert(false);
        *entry |= *is_write;
    }

    let config = SimConfig::new(12, ReplacementMode::Lru).unwrap();
    assert_eq!(simulate_str(&trace, &config).disk_writes, writes);
}
