//! Count move-tree leaves from the starting position.
//!
//! Every generated move is a distinct edge, duplicates included. A board
//! with a side eliminated, or a side with no moves, is a leaf.
//!
//! ```text
//! perft [--depth D] [--config FILE] [--divide]
//! ```

use std::env;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use dipole_arena::config::parse_value;
use dipole_arena::ArenaConfig;
use dipole_core::{Board, Color};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut depth: u32 = 4;
    let mut divide = false;
    let mut game = ArenaConfig::default().game;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--depth" => depth = parse_value(&mut iter, flag)?,
            "--divide" => divide = true,
            "--config" => {
                let path: String = parse_value(&mut iter, flag)?;
                game = ArenaConfig::load(Path::new(&path))?.game;
            }
            other => bail!("unknown argument '{}'", other),
        }
    }

    let board = Board::with_config(&game)?;

    println!("Dipole Perft");
    println!("============");
    println!("{}", board);

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = board.perft(Color::White, d);
        let elapsed = start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { nodes as f64 / elapsed } else { 0.0 };
        println!("depth {:>2}: {:>14} nodes  {:>8.3}s  {:>12.0} nodes/sec", d, nodes, elapsed, rate);
    }

    if divide && depth > 0 {
        println!();
        let mut total = 0;
        for (mov, nodes) in board.perft_divide(Color::White, depth) {
            println!("{}: {}", mov, nodes);
            total += nodes;
        }
        println!("Total: {}", total);
    }

    Ok(())
}
