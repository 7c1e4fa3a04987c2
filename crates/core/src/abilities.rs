//! Ability controller - runtime state and effects of special tiles
//!
//! Holds the single explosive countdown, the cutting override budget, and the
//! pair-hint highlight. Board mutations are resolved here but committed by
//! [`GameState`](crate::game_state::GameState), which owns the ordering
//! between selection and ticks.

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::catalog::{Ability, Catalog};
use crate::rng::SimpleRng;
use crate::types::{AbilityEffect, TileId, EXPLOSION_NEIGHBOR_LIMIT, EXPLOSION_RADIUS, HINT_TICKS};

/// A lit fuse on one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub tile: TileId,
    pub remaining: u32,
}

/// Transient highlight on a sniffed partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairHint {
    pub tile: TileId,
    pub remaining: u32,
}

/// What one tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuseStep {
    Idle,
    Counting(Countdown),
    Expired(TileId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityState {
    countdown: Option<Countdown>,
    cutting_charges: u32,
    hint: Option<PairHint>,
}

impl AbilityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    pub fn cutting_charges(&self) -> u32 {
        self.cutting_charges
    }

    pub fn hint(&self) -> Option<PairHint> {
        self.hint
    }

    /// Blocking is ignored while override charges remain
    pub fn overrides_blocking(&self) -> bool {
        self.cutting_charges > 0
    }

    /// Something time-based is pending
    pub fn needs_tick(&self) -> bool {
        self.countdown.is_some() || self.hint.is_some()
    }

    /// On-select dispatch for a tile that just became the sole selection
    pub fn on_select(
        &mut self,
        board: &mut Board,
        catalog: &Catalog,
        tile: TileId,
    ) -> Option<AbilityEffect> {
        let kind = board.tile(tile)?.kind;
        match catalog.ability(kind)? {
            Ability::Explosive { fuse_seconds } => self.light_fuse(tile, fuse_seconds),
            Ability::Sniff => self.sniff(board, tile),
            Ability::Moving => relocate(board, tile),
            Ability::Cutting { charges } => {
                self.cutting_charges = charges;
                info!(%tile, charges, "cutting mode armed");
                Some(AbilityEffect::CuttingArmed { charges })
            }
            Ability::Wildcard | Ability::ComboBonus { .. } => None,
        }
    }

    /// Start a countdown, cancelling and replacing any running one.
    ///
    /// A fuse already burning on `tile` keeps its remaining time.
    fn light_fuse(&mut self, tile: TileId, seconds: u32) -> Option<AbilityEffect> {
        if let Some(running) = self.countdown.filter(|c| c.tile == tile) {
            debug!(%tile, remaining = running.remaining, "fuse already lit");
            return None;
        }
        let replaced = self
            .countdown
            .replace(Countdown {
                tile,
                remaining: seconds,
            })
            .map(|old| old.tile);
        if let Some(old) = replaced {
            debug!(%old, new = %tile, "replacing running countdown");
        }
        info!(%tile, seconds, "fuse lit");
        Some(AbilityEffect::CountdownStarted { seconds, replaced })
    }

    /// Forget the pair hint
    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    fn sniff(&mut self, board: &Board, tile: TileId) -> Option<AbilityEffect> {
        let kind = board.tile(tile)?.kind;
        let partner = board
            .unmatched()
            .find(|t| t.id != tile && t.kind == kind)?
            .id;
        self.hint = Some(PairHint {
            tile: partner,
            remaining: HINT_TICKS,
        });
        debug!(%tile, %partner, "partner revealed");
        Some(AbilityEffect::PairRevealed { partner })
    }

    /// Cancel the countdown if it targets any of `tiles`
    pub fn cancel_countdown_for(&mut self, tiles: &[TileId]) -> Option<TileId> {
        let target = self.countdown?.tile;
        if tiles.contains(&target) {
            self.countdown = None;
            debug!(%target, "countdown cancelled");
            Some(target)
        } else {
            None
        }
    }

    /// Spend one override charge for a resolved pair attempt
    pub fn consume_charge(&mut self) {
        if self.cutting_charges > 0 {
            self.cutting_charges -= 1;
            debug!(remaining = self.cutting_charges, "cutting charge spent");
        }
    }

    /// Advance the fuse and the hint by one second.
    ///
    /// A fuse whose tile was removed by other means is dropped silently.
    pub fn tick(&mut self, board: &Board) -> FuseStep {
        if let Some(hint) = self.hint.as_mut() {
            hint.remaining = hint.remaining.saturating_sub(1);
        }
        if self.hint.is_some_and(|h| h.remaining == 0) {
            self.hint = None;
        }

        let Some(mut countdown) = self.countdown else {
            return FuseStep::Idle;
        };
        if !board.tile(countdown.tile).is_some_and(|t| !t.matched) {
            self.countdown = None;
            return FuseStep::Idle;
        }

        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining == 0 {
            self.countdown = None;
            FuseStep::Expired(countdown.tile)
        } else {
            self.countdown = Some(countdown);
            FuseStep::Counting(countdown)
        }
    }

    /// Drop the hint once its tile is gone
    pub fn clear_stale_hint(&mut self, board: &Board) {
        if let Some(hint) = self.hint {
            if board.tile(hint.tile).map_or(true, |t| t.matched) {
                self.hint = None;
            }
        }
    }
}

/// Tiles destroyed by a detonation: the tile itself, then its nearest
/// unmatched same-layer neighbours inside the blast box.
pub fn blast_radius(board: &Board, tile: TileId) -> ArrayVec<TileId, 3> {
    let mut out = ArrayVec::new();
    let Some(center) = board.tile(tile) else {
        return out;
    };
    out.push(tile);

    let mut near: Vec<(f32, TileId)> = board
        .unmatched()
        .filter(|t| {
            t.id != tile
                && t.position.layer == center.position.layer
                && (t.position.col - center.position.col).abs() <= EXPLOSION_RADIUS
                && (t.position.row - center.position.row).abs() <= EXPLOSION_RADIUS
        })
        .map(|t| (t.position.distance_sq(&center.position), t.id))
        .collect();
    near.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    for (_, id) in near.into_iter().take(EXPLOSION_NEIGHBOR_LIMIT) {
        out.push(id);
    }
    out
}

/// Accessible tiles picked uniformly at random for a combo bonus
pub fn combo_victims(board: &Board, rng: &mut SimpleRng, extra: u32) -> Vec<TileId> {
    let candidates: Vec<TileId> = board
        .tiles()
        .iter()
        .filter(|t| t.is_accessible())
        .map(|t| t.id)
        .collect();
    let mut picked = rng.shuffled(&candidates);
    picked.truncate(extra as usize);
    picked
}

/// Move a tile onto the first free slot of a matched tile on its layer
fn relocate(board: &mut Board, tile: TileId) -> Option<AbilityEffect> {
    let from = board.tile(tile)?.position;
    let to = board
        .tiles()
        .iter()
        .filter(|t| t.matched && t.position.layer == from.layer)
        .map(|t| t.position)
        .find(|slot| !board.unmatched().any(|u| u.position.coincides(slot)))?;

    board.set_position(tile, to);
    info!(%tile, %from, %to, "tile relocated");
    Some(AbilityEffect::Relocated { from, to })
}
