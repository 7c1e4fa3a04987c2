//! Console solitaire runner (default binary).
//!
//! Reads commands from stdin, one per line, and owns the one-second clock
//! that drives explosive countdowns. Logs go to stderr; `RUST_LOG` filters them.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tile_solitaire::console::{
    board_lines, describe_event, parse_host_args, status_lines, Command, HostConfig, TickClock,
};
use tile_solitaire::core::{GameConfig, GameState};
use tile_solitaire::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let host = parse_host_args(&args)?;
    let config = match &host.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    if host.list {
        let mut out = io::stdout().lock();
        for name in config.layout_names() {
            let layout = config.layout(name)?;
            writeln!(out, "{:<10} {:>4} tiles  {}", name, layout.len(), layout.title())?;
        }
        return Ok(());
    }

    run(&host, &config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(host: &HostConfig, config: &GameConfig) -> Result<()> {
    let seed = host.seed.unwrap_or_else(clock_seed);
    let mut game = GameState::new(config, &host.layout, seed)
        .with_context(|| format!("dealing layout {}", host.layout))?;

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut clock = TickClock::new(Duration::from_millis(TICK_MS as u64), &game, Instant::now());
    let mut out = io::stdout();
    print_lines(&mut out, &status_lines(&game.snapshot()))?;

    loop {
        // Nothing counting: wait for input without a deadline.
        let timeout = clock
            .timeout(Instant::now())
            .unwrap_or(Duration::from_secs(3600));

        match rx.recv_timeout(timeout) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(command) = Command::parse(&line) else {
                    writeln!(out, "unknown command: {}", line.trim())?;
                    continue;
                };
                match command {
                    Command::Quit => break,
                    Command::Show => {
                        let snapshot = game.snapshot();
                        print_lines(&mut out, &status_lines(&snapshot))?;
                        print_lines(&mut out, &board_lines(&snapshot))?;
                    }
                    Command::Json => {
                        writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;
                    }
                    Command::Hint => match game.available_match() {
                        Some([a, b]) => writeln!(out, "try {} and {}", a, b)?,
                        None => writeln!(out, "no pair available, try shuffle")?,
                    },
                    Command::Action(action) => {
                        let event = game.apply_action(action)?;
                        writeln!(out, "{}", describe_event(&event))?;
                        if action == GameAction::Restart {
                            print_lines(&mut out, &status_lines(&game.snapshot()))?;
                        }
                    }
                }
                clock.observe(&game, Instant::now());
            }
            Err(RecvTimeoutError::Timeout) => {
                if game.needs_tick() {
                    let event = game.apply_action(GameAction::Tick)?;
                    writeln!(out, "{}", describe_event(&event))?;
                }
                clock.ticked(&game, Instant::now());
            }
            Err(RecvTimeoutError::Disconnected) => {
                debug!("stdin closed");
                break;
            }
        }

        if game.is_won() {
            info!(moves = game.moves(), "board cleared");
            print_lines(&mut out, &status_lines(&game.snapshot()))?;
            break;
        }
    }

    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
