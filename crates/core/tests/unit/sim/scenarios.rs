//! End-to-End Scenarios.
//!
//! Short traces worked out by hand, checked for swap count, resident set, and queue order
//! under each algorithm and mode.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use vmsim_core::config::{Algorithm, SwapMode};
use vmsim_core::sim;

use crate::common::harness::{TestContext, config_with_capacity};

/// One process, 4 pages, capacity 2, FIFO with demand paging.
#[test]
fn fifo_demand_reference_scenario() {
    let mut ctx = TestContext::new(4, 2, Algorithm::Fifo, SwapMode::Demand);
    assert_eq!(ctx.queue(), vec![0, 1]);

    assert!(ctx.access(0).is_hit());
    assert!(ctx.access(1).is_hit());

    assert!(!ctx.access(2).is_hit());
    assert_eq!(ctx.queue(), vec![1, 2]);

    assert!(!ctx.access(3).is_hit());
    assert_eq!(ctx.queue(), vec![2, 3]);

    assert!(ctx.access(2).is_hit());

    assert_eq!(ctx.sim.swaps(), 2);
    assert_eq!(ctx.resident(), vec![2, 3]);
    assert_eq!(ctx.queue(), vec![2, 3]);
}

/// The same access pattern under each policy with demand paging.
#[rstest]
#[case(Algorithm::Fifo, 3, vec![0, 1])]
#[case(Algorithm::Lru, 3, vec![1, 2])]
#[case(Algorithm::Clock, 3, vec![0, 1])]
fn demand_policies_diverge(
    #[case] algorithm: Algorithm,
    #[case] swaps: usize,
    #[case] resident: Vec<usize>,
) {
    let mut ctx = TestContext::new(4, 2, algorithm, SwapMode::Demand);
    assert_eq!(ctx.access_all(&[1, 2, 0, 2, 1]), swaps);
    assert_eq!(ctx.resident(), resident);
}

/// Clock leaves the hand where the last search stopped.
#[test]
fn clock_demand_queue_order() {
    let mut ctx = TestContext::new(4, 2, Algorithm::Clock, SwapMode::Demand);
    let _ = ctx.access_all(&[1, 2, 0, 2, 1]);
    assert_eq!(ctx.queue(), vec![0, 1]);
    let bits: Vec<bool> = ctx.table().queue().iter().map(|e| e.referenced).collect();
    assert_eq!(bits, vec![false, true]);
}

/// Pre-paging pulls in the neighbour, turning the next access into a hit.
#[test]
fn fifo_prepaging_prefetch_saves_swaps() {
    let mut demand = TestContext::new(4, 2, Algorithm::Fifo, SwapMode::Demand);
    let mut prepaging = TestContext::new(4, 2, Algorithm::Fifo, SwapMode::PrePaging);
    let trace = [2, 3, 0, 1];

    assert_eq!(demand.access_all(&trace), 4);
    assert_eq!(prepaging.access_all(&trace), 2);
    assert_eq!(prepaging.queue(), vec![0, 1]);
    assert_eq!(prepaging.sim.stats().prefetches, 2);
    assert_eq!(prepaging.sim.stats().evictions, 4);
}

/// Swap count equals the number of misses, whatever the configuration.
#[rstest]
fn swaps_equal_misses(
    #[values(Algorithm::Fifo, Algorithm::Lru, Algorithm::Clock)] algorithm: Algorithm,
    #[values(SwapMode::Demand, SwapMode::PrePaging)] mode: SwapMode,
) {
    let mut ctx = TestContext::new(8, 3, algorithm, mode);
    let misses = ctx.access_all(&[0, 4, 5, 1, 7, 4, 2, 2, 6, 0, 3, 5, 1]);
    assert_eq!(ctx.sim.swaps(), misses as u64);
    let stats = ctx.sim.stats();
    assert_eq!(stats.hits + stats.swaps, stats.events);
    assert_eq!(stats.events, 13);
}

/// Full run from files, as the command line drives it.
#[test]
fn run_files_reference_scenario() {
    let mut plist = tempfile::NamedTempFile::new().unwrap();
    writeln!(plist, "0 8").unwrap();
    let mut ptrace = tempfile::NamedTempFile::new().unwrap();
    // Frames 0, 1, 2, 3, 2 with 2-byte pages, plus a blank line.
    write!(ptrace, "0 1\n0 3\n\n0 5\n0 7\n0 5\n").unwrap();

    let config = config_with_capacity(2, 1, Algorithm::Fifo, SwapMode::Demand);
    let result = sim::run_files(&config, plist.path(), ptrace.path()).unwrap();
    assert_eq!(result.swaps, 2);
    assert_eq!(result.stats.events, 5);
    assert_eq!(result.final_cycle, 6);
    assert_eq!(result.stats.processes[0].resident, 2);
}

/// A malformed trace line aborts the run with its line number.
#[test]
fn run_files_reports_format_errors() {
    let mut plist = tempfile::NamedTempFile::new().unwrap();
    writeln!(plist, "0 8").unwrap();
    let mut ptrace = tempfile::NamedTempFile::new().unwrap();
    write!(ptrace, "0 1\n0 three\n").unwrap();

    let config = config_with_capacity(2, 1, Algorithm::Lru, SwapMode::Demand);
    let err = sim::run_files(&config, plist.path(), ptrace.path()).unwrap_err();
    assert!(matches!(err, vmsim_core::SimError::Format { line: 2, .. }));
}

/// Trailing fields on a trace line are ignored.
#[test]
fn run_files_ignores_trailing_fields() {
    let mut plist = tempfile::NamedTempFile::new().unwrap();
    writeln!(plist, "0 8").unwrap();
    let mut ptrace = tempfile::NamedTempFile::new().unwrap();
    write!(ptrace, "0 1 9\n0 7 comment\n").unwrap();

    let config = config_with_capacity(2, 1, Algorithm::Fifo, SwapMode::Demand);
    let result = sim::run_files(&config, plist.path(), ptrace.path()).unwrap();
    assert_eq!(result.stats.events, 2);
    assert_eq!(result.swaps, 1);
}

/// A negative process index parses and then fails as a reference on its own cycle.
#[test]
fn run_files_negative_process_is_invalid_reference() {
    let mut plist = tempfile::NamedTempFile::new().unwrap();
    writeln!(plist, "0 8").unwrap();
    let mut ptrace = tempfile::NamedTempFile::new().unwrap();
    write!(ptrace, "0 1\n-1 5\n").unwrap();

    let config = config_with_capacity(2, 1, Algorithm::Fifo, SwapMode::Demand);
    let err = sim::run_files(&config, plist.path(), ptrace.path()).unwrap_err();
    assert!(matches!(
        err,
        vmsim_core::SimError::InvalidReference {
            pid: -1,
            cycle: 2,
            ..
        }
    ));
}

/// Events of several processes interleave on one clock without touching each other's tables.
#[test]
fn processes_have_independent_tables() {
    let config = config_with_capacity(2, 2, Algorithm::Fifo, SwapMode::Demand);
    let processes = [
        sim::ProcessSpec::new("a", 8),
        sim::ProcessSpec::new("b", 8),
    ];
    let events = [
        sim::TraceEvent::new(0, 5),
        sim::TraceEvent::new(1, 1),
        sim::TraceEvent::new(0, 7),
        sim::TraceEvent::new(1, 7),
    ];
    let result = sim::simulate(&config, &processes, events).unwrap();
    assert_eq!(result.swaps, 3);
    assert_eq!(result.stats.processes[0].misses, 2);
    assert_eq!(result.stats.processes[1].misses, 1);
    assert_eq!(result.stats.processes[1].hits, 1);
}
