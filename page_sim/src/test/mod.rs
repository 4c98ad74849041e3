use std::io::Cursor;

use crate::{
    config::{ReplacementMode, SimConfig},
    simulation::simulate,
    summary::SimSummary,
    trace::TraceReader,
};

mod reference;

pub(crate) fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub(crate) fn simulate_str(input: &str, config: &SimConfig) -> SimSummary {
    simulate(config, TraceReader::new(Cursor::new(input))).unwrap()
}

const SHORT_TRACE: &str = "0x0000 R\n0x1000 W\n0x2000 R\n0x0000 R\n";

#[test]
fn test_short_trace_lru() {
    init_logger();

    // the first three accesses fill both frames and evict the clean page 0
    let config = SimConfig::new(2, ReplacementMode::Lru).unwrap();
    let summary = simulate_str("0x0000 R\n0x1000 W\n0x2000 R\n", &config);
    assert_eq!(summary.page_faults, 3);
    assert_eq!(summary.disk_reads, 3);
    assert_eq!(summary.disk_writes, 0);

    // page 0 has to be loaded again, now the dirty page 1 is least recently used
    let summary = simulate_str(SHORT_TRACE, &config);
    assert_eq!(
        summary,
        SimSummary {
            num_frames: 2,
            events: 4,
            disk_reads: 4,
            disk_writes: 1,
            page_faults: 4,
        }
    );
    assert_eq!(
        summary.to_string(),
        "total memory frames: 2\n\
         events in trace: 4\n\
         total disk reads: 4\n\
         total disk writes: 1\n\
         page fault rate: 1.0000"
    );
}

#[test]
fn test_short_trace_clock() {
    init_logger();

    // page 0 and 1 lose their reference bits, then page 0 is evicted for page 2.
    // the hand stops at the dirty page 1, which is evicted once page 0 returns
    let config = SimConfig::new(2, ReplacementMode::Clock).unwrap();
    let summary = simulate_str(SHORT_TRACE, &config);
    assert_eq!(summary.page_faults, 4);
    assert_eq!(summary.disk_writes, 1);
}

#[test]
fn test_locality_hits() {
    // addresses inside the same page never fault twice while resident
    let input = "0x1000 R\n0x1004 W\n0x1ff8 R\n0x2000 R\n0x1010 R\n";
    for mode in ReplacementMode::ALL {
        let config = SimConfig::new(2, mode).unwrap().with_seed(3);
        let summary = simulate_str(input, &config);
        assert_eq!(summary.page_faults, 2, "mode {}", mode);
        assert_eq!(summary.disk_writes, 0, "mode {}", mode);
    }
}

#[test]
fn test_deterministic_policies_reproduce_output() {
    let trace = reference::generate_trace(7, 2_000, 40);

    for mode in [ReplacementMode::Lru, ReplacementMode::Clock] {
        let config = SimConfig::new(8, mode).unwrap();
        let first = simulate_str(&trace, &config).to_string();
        let second = simulate_str(&trace, &config).to_string();
        assert_eq!(first, second);
    }
}

#[test]
fn test_seeded_random_reproduces_output() {
    let trace = reference::generate_trace(11, 2_000, 40);
    let config = SimConfig::new(8, ReplacementMode::Random)
        .unwrap()
        .with_seed(12345);

    assert_eq!(
        simulate_str(&trace, &config),
        simulate_str(&trace, &config)
    );
}

#[test]
fn test_more_frames_than_pages() {
    // every page is loaded exactly once, no eviction takes place
    let trace = reference::generate_trace(5, 1_000, 16);
    for mode in ReplacementMode::ALL {
        let config = SimConfig::new(16, mode).unwrap();
        let summary = simulate_str(&trace, &config);
        assert!(summary.page_faults <= 16);
        assert_eq!(summary.disk_writes, 0);
    }
}
