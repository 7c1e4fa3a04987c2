//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of layered tile solitaire: dealing a board,
//! deciding which tiles are free, pairing, and the special-tile abilities.
//! It has no UI, timer, or I/O dependencies beyond loading a config file:
//!
//! - **Deterministic**: Same seed produces the same deal, reshuffles, and combo picks
//! - **Host-driven time**: The core never schedules anything; hosts call `tick()`
//! - **Atomic transitions**: Each public call leaves board, counters, and
//!   accessibility consistent
//!
//! # Module Structure
//!
//! - [`rng`]: Seeded LCG with Fisher-Yates shuffling
//! - [`catalog`]: Tile kinds and their resolved abilities
//! - [`layout`]: Board shape templates and the four standard boards
//! - [`board`]: Live tiles, dealing, and the pair counter
//! - [`access`]: Covered/flanked accessibility rules
//! - [`abilities`]: Countdown, hint, relocation, combo, and cutting state
//! - [`game_state`]: Selection state machine, ticks, reshuffle, win
//! - [`config`]: JSON-loadable catalog and layout set
//! - [`snapshot`]: Serializable view for hosts
//!
//! # Game Rules
//!
//! - **Free tiles**: A tile is free unless a tile on the layer above overlaps it,
//!   or tiles sit directly to both its left and its right
//! - **Pairs**: Two free tiles of the same kind (or with a wildcard) are removed
//! - **Explosive**: Selecting starts a fuse; at zero it takes up to two neighbours with it
//! - **Sniff**: Selecting reveals the unmatched partner for two ticks
//! - **Moving**: Selecting moves the tile onto a cleared slot on its layer
//! - **Combo bonus**: Matching removes extra free tiles at random
//! - **Cutting**: Selecting grants attempts that ignore blocking
//!
//! # Example
//!
//! ```
//! use tile_solitaire_core::{GameConfig, GameState};
//!
//! let config = GameConfig::default();
//! let mut game = GameState::new(&config, "fortress", 12345).unwrap();
//! assert_eq!(game.remaining_pairs() * 2, game.board().len() as u32);
//!
//! if let Some([a, b]) = game.available_match() {
//!     game.select_tile(a);
//!     assert!(game.select_tile(b).is_match());
//! }
//! ```

pub mod abilities;
pub mod access;
pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game_state;
pub mod layout;
pub mod rng;
pub mod snapshot;

pub use tile_solitaire_types as types;

// Re-export commonly used types for convenience
pub use abilities::{AbilityState, Countdown, PairHint};
pub use board::{Board, BoardTile};
pub use catalog::{Ability, Catalog, TileKind, TileKindSpec};
pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use game_state::GameState;
pub use layout::{LayoutSpec, LayoutTemplate};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, TileSnapshot};
