//! Console host helpers: argument parsing, command parsing, and text output.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use crate::core::{Countdown, GameSnapshot, GameState};
use crate::types::{GameAction, GameEvent, SelectionOutcome, TickOutcome};

pub const DEFAULT_LAYOUT: &str = "fortress";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub config: Option<PathBuf>,
    pub layout: String,
    /// `None` seeds from the clock
    pub seed: Option<u32>,
    pub list: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            config: None,
            layout: DEFAULT_LAYOUT.to_string(),
            seed: None,
            list: false,
        }
    }
}

pub fn parse_host_args(args: &[String]) -> Result<HostConfig> {
    let mut out = HostConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--layout" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --layout"))?;
                out.layout = v.clone();
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--list" => out.list = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}

/// One line typed at the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action(GameAction),
    /// Print a selectable pair, if any
    Hint,
    Show,
    Json,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "hint" | "h" => Some(Command::Hint),
            "show" | "board" => Some(Command::Show),
            "json" => Some(Command::Json),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => GameAction::parse(line).map(Command::Action),
        }
    }
}

pub fn status_lines(s: &GameSnapshot) -> Vec<String> {
    let state = if s.won {
        "WON"
    } else if s.deadlocked {
        "STUCK"
    } else {
        "PLAY"
    };
    let mut lines = vec![
        format!("LAYOUT {} SEED {}", s.layout, s.seed),
        format!("STATE {} PAIRS {} MOVES {}", state, s.remaining_pairs, s.moves),
    ];
    if let Some(id) = s.selection {
        lines.push(format!("SELECTED {}", id));
    }
    if let Some(c) = s.countdown {
        lines.push(format!("FUSE {} {}s", c.tile, c.remaining));
    }
    if s.cutting_charges > 0 {
        lines.push(format!("CUTTING {}", s.cutting_charges));
    }
    if let Some(h) = s.hint {
        lines.push(format!("PARTNER {}", h.tile));
    }
    lines
}

/// Free tiles, one per line, top layer first
pub fn board_lines(s: &GameSnapshot) -> Vec<String> {
    let mut free: Vec<_> = s.accessible_tiles().collect();
    free.sort_by(|a, b| {
        b.position
            .layer
            .cmp(&a.position.layer)
            .then(a.id.cmp(&b.id))
    });
    free.iter()
        .map(|t| match t.special {
            Some(tag) => format!("{:>5} {} [{}] {}", t.id.to_string(), t.kind, tag.as_str(), t.position),
            None => format!("{:>5} {} {}", t.id.to_string(), t.kind, t.position),
        })
        .collect()
}

pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::Selection(outcome) => match outcome {
            SelectionOutcome::Ignored => "ignored".to_string(),
            SelectionOutcome::Blocked { tile } => format!("{} is blocked", tile),
            SelectionOutcome::Selected { tile } => format!("selected {}", tile),
            SelectionOutcome::Deselected { tile } => format!("deselected {}", tile),
            SelectionOutcome::Matched { pair, bonus, won } => {
                let mut text = format!("matched {} and {}", pair[0], pair[1]);
                if !bonus.is_empty() {
                    text.push_str(&format!(", combo took {}", bonus.len()));
                }
                if *won {
                    text.push_str(", board cleared");
                }
                text
            }
            SelectionOutcome::Mismatched { pair } => {
                format!("{} and {} do not match", pair[0], pair[1])
            }
            SelectionOutcome::AbilityTriggered { tile, kind, .. } => {
                format!("selected {} ({})", tile, kind.as_str())
            }
        },
        GameEvent::Tick(outcome) => match outcome {
            TickOutcome::Idle => "nothing to count down".to_string(),
            TickOutcome::Counting { tile, remaining } => format!("{} fuse {}s", tile, remaining),
            TickOutcome::Detonated { tile, removed, won } => {
                let mut text = format!("{} exploded, {} tiles removed", tile, removed.len());
                if *won {
                    text.push_str(", board cleared");
                }
                text
            }
        },
        GameEvent::Reshuffled(r) => format!("reshuffled {} tiles ({} pinned)", r.shuffled, r.pinned),
        GameEvent::Restarted { seed } => format!("new deal, seed {}", seed),
    }
}

/// One-second scheduler state for a session.
///
/// The period restarts when ticking switches on and whenever the countdown
/// changes, so a freshly lit fuse always gets a full first second.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    last: Instant,
    active: bool,
    countdown: Option<Countdown>,
}

impl TickClock {
    pub fn new(period: Duration, game: &GameState, now: Instant) -> Self {
        Self {
            period,
            last: now,
            active: game.needs_tick(),
            countdown: game.countdown(),
        }
    }

    /// Record the session state after a command
    pub fn observe(&mut self, game: &GameState, now: Instant) {
        let active = game.needs_tick();
        let countdown = game.countdown();
        if (active && !self.active) || countdown != self.countdown {
            self.last = now;
        }
        self.active = active;
        self.countdown = countdown;
    }

    /// Record the session state right after a tick
    pub fn ticked(&mut self, game: &GameState, now: Instant) {
        self.last = now;
        self.active = game.needs_tick();
        self.countdown = game.countdown();
    }

    /// Time left until the next tick, `None` while nothing is counting
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.active
            .then(|| self.period.saturating_sub(now.saturating_duration_since(self.last)))
    }
}
