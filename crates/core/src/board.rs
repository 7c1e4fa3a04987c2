//! Board module - the live tiles of one session
//!
//! Tiles are never removed from the collection: matching (or blowing up) a tile
//! only flips its `matched` flag, so `TileId(n)` always names `tiles[n]`.

use serde::Serialize;
use tracing::debug;

use crate::access;
use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::layout::LayoutTemplate;
use crate::rng::SimpleRng;
use crate::types::{KindId, Position, TileId};

/// One tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoardTile {
    pub id: TileId,
    pub kind: KindId,
    pub position: Position,
    pub matched: bool,
    /// Cached accessibility; recomputed by [`Board::refresh`]
    pub blocked: bool,
}

impl BoardTile {
    pub fn new(id: TileId, kind: KindId, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            matched: false,
            blocked: false,
        }
    }

    /// Selectable under the geometric rules
    pub fn is_accessible(&self) -> bool {
        !self.matched && !self.blocked
    }
}

/// Ordered tile collection plus the remaining-pairs counter
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    layout: String,
    tiles: Vec<BoardTile>,
    remaining_pairs: u32,
}

impl Board {
    /// Deal a layout: pair up catalog kinds, shuffle them, and lay them out
    pub fn build(layout: &LayoutTemplate, catalog: &Catalog, rng: &mut SimpleRng) -> Result<Self> {
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        if layout.is_empty() {
            return Err(EngineError::invalid_layout(layout.name(), "layout has no positions"));
        }

        let mut positions = layout.positions().to_vec();
        if positions.len() % 2 != 0 {
            // Odd slot counts lose their last slot so every kind can be paired.
            let dropped = positions.pop();
            debug!(layout = layout.name(), ?dropped, "dropped last position of odd layout");
        }
        if positions.len() < 2 {
            return Err(EngineError::invalid_layout(
                layout.name(),
                "fewer than two positions after trimming",
            ));
        }
        check_distinct(layout.name(), &positions)?;

        let num_pairs = positions.len() / 2;
        let mut kinds = Vec::with_capacity(positions.len());
        for i in 0..num_pairs {
            let kind = KindId((i % catalog.len()) as u16);
            kinds.push(kind);
            kinds.push(kind);
        }
        let kinds = rng.shuffled(&kinds);

        let tiles = positions
            .into_iter()
            .zip(kinds)
            .enumerate()
            .map(|(i, (position, kind))| BoardTile::new(TileId(i as u32), kind, position))
            .collect();

        let mut board = Self {
            layout: layout.name().to_string(),
            tiles,
            remaining_pairs: num_pairs as u32,
        };
        board.refresh();
        Ok(board)
    }

    /// Lay out an explicit kind assignment without shuffling
    pub fn from_assignments(layout: &str, assignments: &[(Position, KindId)]) -> Result<Self> {
        if assignments.len() < 2 || assignments.len() % 2 != 0 {
            return Err(EngineError::invalid_layout(
                layout,
                "assignment needs a positive, even number of tiles",
            ));
        }
        let positions: Vec<Position> = assignments.iter().map(|(p, _)| *p).collect();
        check_distinct(layout, &positions)?;

        let tiles = assignments
            .iter()
            .enumerate()
            .map(|(i, &(position, kind))| BoardTile::new(TileId(i as u32), kind, position))
            .collect();

        let mut board = Self {
            layout: layout.to_string(),
            tiles,
            remaining_pairs: (assignments.len() / 2) as u32,
        };
        board.refresh();
        Ok(board)
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn tiles(&self) -> &[BoardTile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&BoardTile> {
        self.tiles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn remaining_pairs(&self) -> u32 {
        self.remaining_pairs
    }

    pub fn unmatched_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.matched).count()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &BoardTile> {
        self.tiles.iter().filter(|t| !t.matched)
    }

    /// Recompute every tile's `blocked` flag
    pub fn refresh(&mut self) {
        access::refresh(&mut self.tiles);
    }

    /// Whether `id` is unmatched and geometrically free
    pub fn is_accessible(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(BoardTile::is_accessible)
    }

    /// Remove a matched pair and refresh
    pub(crate) fn remove_pair(&mut self, a: TileId, b: TileId) {
        self.tiles[a.index()].matched = true;
        self.tiles[b.index()].matched = true;
        self.remaining_pairs = self.remaining_pairs.saturating_sub(1);
        self.refresh();
    }

    /// Remove tiles outside of pairing (detonation, combo bonus) and refresh.
    ///
    /// The counter is resettled to `unmatched / 2` so an odd removal rounds the
    /// orphaned tile away. Returns the pair decrement applied.
    pub(crate) fn remove_tiles(&mut self, ids: &[TileId]) -> u32 {
        for id in ids {
            self.tiles[id.index()].matched = true;
        }
        let settled = (self.unmatched_count() / 2) as u32;
        let decrement = self.remaining_pairs.saturating_sub(settled);
        self.remaining_pairs = settled.min(self.remaining_pairs);
        self.refresh();
        decrement
    }

    pub(crate) fn set_position(&mut self, id: TileId, position: Position) {
        self.tiles[id.index()].position = position;
        self.refresh();
    }

    pub(crate) fn set_kind(&mut self, id: TileId, kind: KindId) {
        self.tiles[id.index()].kind = kind;
    }
}

fn check_distinct(layout: &str, positions: &[Position]) -> Result<()> {
    for (i, a) in positions.iter().enumerate() {
        if let Some(b) = positions[i + 1..].iter().find(|b| a.coincides(b)) {
            return Err(EngineError::invalid_layout(
                layout,
                format!("duplicate position {}", b),
            ));
        }
    }
    Ok(())
}
