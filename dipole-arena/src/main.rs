//! Dipole Arena
//!
//! Plays a series of bot-versus-bot games and reports the results.
//!
//! ```text
//! arena [--games N] [--seed S] [--max-plies P] [--white greedy|random]
//!       [--black greedy|random] [--config FILE] [--show]
//! ```

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use dipole_arena::{Arena, ArenaArgs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let config = ArenaArgs::parse(&args)?.resolve()?;

    println!("Dipole Arena");
    println!("============");
    println!("White: {}  Black: {}", config.white, config.black);
    println!(
        "Board: {}x{}  Start size: {}",
        config.game.dimension, config.game.dimension, config.game.start_size
    );
    println!("Games: {}  Seed: {}  Ply cap: {}", config.games, config.seed, config.max_plies);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing current game...");
        r.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl-C handler")?;

    let start = Instant::now();
    let mut arena = Arena::new(config);
    let played = arena.run(&running)?;

    println!("\n============");
    if played < arena.config().games {
        println!("Interrupted after {} of {} games", played, arena.config().games);
    } else {
        println!("Match complete!");
    }
    println!("============");
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());
    println!();
    arena.stats.print_summary();

    Ok(())
}
