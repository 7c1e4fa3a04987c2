//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine and its hosts.
//! Everything here is plain data: identifiers, positions, special tags, and
//! the outcomes returned by the engine's public operations.
//!
//! # Board Geometry
//!
//! Tiles sit on a grid of `(column, row, layer)` triples. Columns and rows are
//! fractional so staggered layouts can place a tile half a unit off the grid.
//! Higher layers sit above lower ones.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COVER_TOLERANCE` | 1.0 | Max column/row distance for a tile above to cover one below |
//! | `FLANK_ROW_TOLERANCE` | 0.5 | Max row distance for a same-layer tile to count as a side neighbour |
//! | `FLANK_COLUMN_REACH` | 1.0 | Max column distance for a side neighbour |
//! | `EXPLOSION_RADIUS` | 2.0 | Column/row box searched for detonation victims |
//!
//! # Ability Defaults
//!
//! Used when a catalog entry carries a special tag without its parameter:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FUSE_SECONDS` | 10 | Explosive countdown length |
//! | `DEFAULT_COMBO_EXTRA_TILES` | 2 | Extra tiles removed by a combo bonus |
//! | `DEFAULT_CUTTING_CHARGES` | 3 | Pair attempts that ignore blocking |
//! | `HINT_TICKS` | 2 | Lifetime of a pair-hint highlight |
//!
//! # Examples
//!
//! ```
//! use tile_solitaire_types::{GameAction, SpecialTag, TileId};
//!
//! assert_eq!(SpecialTag::from_str("explosive"), Some(SpecialTag::Explosive));
//! assert_eq!(SpecialTag::from_str("combo"), Some(SpecialTag::ComboBonus));
//!
//! let action = GameAction::parse("select 7").unwrap();
//! assert_eq!(action, GameAction::Select(TileId(7)));
//! ```

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Host tick interval in milliseconds (one countdown unit)
pub const TICK_MS: u32 = 1000;

/// Max column/row distance for a covering tile
pub const COVER_TOLERANCE: f32 = 1.0;

/// Max row distance for a same-layer tile to flank
pub const FLANK_ROW_TOLERANCE: f32 = 0.5;

/// Max column distance for a same-layer tile to flank
pub const FLANK_COLUMN_REACH: f32 = 1.0;

/// Column/row box searched for detonation victims
pub const EXPLOSION_RADIUS: f32 = 2.0;

/// Neighbours removed alongside a detonating tile
pub const EXPLOSION_NEIGHBOR_LIMIT: usize = 2;

/// Default explosive countdown in seconds
pub const DEFAULT_FUSE_SECONDS: u32 = 10;

/// Default number of extra tiles removed by a combo bonus
pub const DEFAULT_COMBO_EXTRA_TILES: u32 = 2;

/// Default override charges granted by a cutting tile
pub const DEFAULT_CUTTING_CHARGES: u32 = 3;

/// Ticks a pair-hint highlight stays visible
pub const HINT_TICKS: u32 = 2;

/// Session-unique tile identifier (index into the board's tile list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a tile kind within the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(pub u16);

impl KindId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A slot on the board: fractional column/row plus an integer stacking layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub col: f32,
    pub row: f32,
    pub layer: u8,
}

impl Position {
    pub fn new(col: f32, row: f32, layer: u8) -> Self {
        Self { col, row, layer }
    }

    /// Two positions occupy the same slot
    pub fn coincides(&self, other: &Position) -> bool {
        self.layer == other.layer && self.col == other.col && self.row == other.row
    }

    /// Squared planar distance, ignoring layers
    pub fn distance_sq(&self, other: &Position) -> f32 {
        let dc = self.col - other.col;
        let dr = self.row - other.row;
        dc * dc + dr * dr
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, L{})", self.col, self.row, self.layer)
    }
}

/// Special abilities a tile kind can carry
///
/// - **Explosive**: starts a countdown when selected; detonates at zero
/// - **Sniff**: reveals its unmatched partner for a short time
/// - **Wildcard**: matches any other kind
/// - **Moving**: jumps onto the slot of a matched tile on its layer
/// - **ComboBonus**: removes extra accessible tiles after being matched
/// - **Cutting**: grants charges that ignore blocking for a few attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialTag {
    Explosive,
    Sniff,
    Wildcard,
    Moving,
    #[serde(alias = "combo")]
    ComboBonus,
    Cutting,
}

impl SpecialTag {
    /// Parse special tag from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_solitaire_types::SpecialTag;
    ///
    /// assert_eq!(SpecialTag::from_str("Wildcard"), Some(SpecialTag::Wildcard));
    /// assert_eq!(SpecialTag::from_str("comboBonus"), Some(SpecialTag::ComboBonus));
    /// assert_eq!(SpecialTag::from_str("lava"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "explosive" => Some(SpecialTag::Explosive),
            "sniff" => Some(SpecialTag::Sniff),
            "wildcard" => Some(SpecialTag::Wildcard),
            "moving" => Some(SpecialTag::Moving),
            "combo" | "combobonus" => Some(SpecialTag::ComboBonus),
            "cutting" => Some(SpecialTag::Cutting),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialTag::Explosive => "explosive",
            SpecialTag::Sniff => "sniff",
            SpecialTag::Wildcard => "wildcard",
            SpecialTag::Moving => "moving",
            SpecialTag::ComboBonus => "comboBonus",
            SpecialTag::Cutting => "cutting",
        }
    }
}

/// Actions a host can apply to a session
///
/// These are used by both the interactive host and scripted drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Click a tile
    Select(TileId),
    /// Advance the active countdown by one second
    Tick,
    /// Redistribute kinds among unmatched tiles
    Reshuffle,
    /// Rebuild the same layout with a fresh deal
    Restart,
}

impl GameAction {
    /// Parse an action from a command line such as `select 4` or `tick`
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_solitaire_types::{GameAction, TileId};
    ///
    /// assert_eq!(GameAction::parse("tick"), Some(GameAction::Tick));
    /// assert_eq!(GameAction::parse("S 12"), Some(GameAction::Select(TileId(12))));
    /// assert_eq!(GameAction::parse("select x"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts.next()?.to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }
        match (verb.as_str(), arg) {
            ("select" | "s", Some(id)) => id.parse::<u32>().ok().map(|n| GameAction::Select(TileId(n))),
            ("tick" | "t", None) => Some(GameAction::Tick),
            ("reshuffle" | "shuffle", None) => Some(GameAction::Reshuffle),
            ("restart", None) => Some(GameAction::Restart),
            _ => None,
        }
    }
}

/// Effect produced when a special tile becomes the sole selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AbilityEffect {
    /// Explosive fuse lit; `replaced` is the tile whose fuse was cancelled
    CountdownStarted {
        seconds: u32,
        replaced: Option<TileId>,
    },
    /// Sniff revealed the unmatched partner
    PairRevealed { partner: TileId },
    /// Moving tile jumped to a matched tile's slot
    Relocated { from: Position, to: Position },
    /// Cutting armed with this many override charges
    CuttingArmed { charges: u32 },
}

/// Result of a single `select_tile` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SelectionOutcome {
    /// Unknown id, matched tile, or the game is already won
    Ignored,
    /// Tile is covered or flanked
    Blocked { tile: TileId },
    Selected { tile: TileId },
    Deselected { tile: TileId },
    /// Pair removed; `bonus` lists tiles removed by a combo bonus
    Matched {
        pair: [TileId; 2],
        bonus: Vec<TileId>,
        won: bool,
    },
    Mismatched { pair: [TileId; 2] },
    /// Tile selected and its ability fired
    AbilityTriggered {
        tile: TileId,
        kind: SpecialTag,
        effect: AbilityEffect,
    },
}

impl SelectionOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SelectionOutcome::Matched { .. })
    }
}

/// Result of a single `tick` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TickOutcome {
    /// No countdown running
    Idle,
    Counting { tile: TileId, remaining: u32 },
    /// Fuse reached zero; `removed` starts with the explosive tile itself
    Detonated {
        tile: TileId,
        removed: ArrayVec<TileId, 3>,
        won: bool,
    },
}

/// Result of a `reshuffle` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReshuffleOutcome {
    /// Tiles whose kinds took part in the shuffle
    pub shuffled: u32,
    /// Unmatched tiles held back (selection, lit fuse)
    pub pinned: u32,
}

/// Uniform event returned by `apply_action`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    Selection(SelectionOutcome),
    Tick(TickOutcome),
    Reshuffled(ReshuffleOutcome),
    Restarted { seed: u32 },
}
