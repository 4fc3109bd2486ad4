//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p xiangqi_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 4 from the standard positions
//!   cargo flamegraph --example perft_bench -p xiangqi_core
//!
//!   # Custom depth and position
//!   cargo flamegraph --example perft_bench -p xiangqi_core -- 3 "r1bakab1r/9/1cn3nc1/p1p1p3p/6p2/2P6/P3P1P1P/1CN3NC1/9/R1BAKAB1R w"

use std::env;
use std::time::{Duration, Instant};

use xiangqi_core::{GameState, START_FEN, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    ("Starting position", START_FEN),
    (
        "Rotated start",
        "RNBAKABNR/9/1C5C1/P1P1P1P1P/9/9/p1p1p1p1p/1c5c1/9/rnbakabnr w f",
    ),
    (
        "Horses developed",
        "r1bakab1r/9/1cn3nc1/p1p1p3p/6p2/2P6/P3P1P1P/1CN3NC1/9/R1BAKAB1R w",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_single_position(fen, depth),
        None => run_all_positions(depth),
    }
}

fn load(fen: &str) -> GameState {
    match GameState::from_fen(fen) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("bad position '{fen}': {e}");
            std::process::exit(1);
        }
    }
}

fn run_single_position(fen: &str, depth: u8) {
    let mut state = load(fen);
    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&mut state, depth - 2);
    }

    let start = Instant::now();
    let nodes = perft(&mut state, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

/// Every position at every depth up to `depth`, so the growth of the tree
/// and of the cost per node are both visible.
fn run_all_positions(depth: u8) {
    println!("perft 1..={depth} over {} positions", TEST_POSITIONS.len());

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let mut state = load(fen);
        println!();
        println!("{name}");
        for d in 1..=depth {
            let start = Instant::now();
            let nodes = perft(&mut state, d);
            let elapsed = start.elapsed();
            println!(
                "  d{d}: {nodes:>12} nodes  {elapsed:>10.3?}  {:>12.0} nps",
                nps(nodes, elapsed)
            );
            if d == depth {
                total_nodes += nodes;
                total_time += elapsed;
            }
        }
    }

    println!();
    println!(
        "deepest runs: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
