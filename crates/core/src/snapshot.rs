use serde::Serialize;

use crate::abilities::{Countdown, PairHint};
use crate::types::{Position, SpecialTag, TileId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialTag>,
    pub position: Position,
    pub matched: bool,
    pub accessible: bool,
}

/// Host-facing view of a session, reusable across frames
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub layout: String,
    pub seed: u32,
    pub moves: u32,
    pub remaining_pairs: u32,
    pub won: bool,
    pub deadlocked: bool,
    pub selection: Option<TileId>,
    pub countdown: Option<Countdown>,
    pub cutting_charges: u32,
    pub hint: Option<PairHint>,
    pub tiles: Vec<TileSnapshot>,
}

impl GameSnapshot {
    pub fn accessible_tiles(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.tiles.iter().filter(|t| t.accessible)
    }
}
