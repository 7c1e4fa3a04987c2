//! Game state module - one solitaire session
//!
//! This module ties together the board, the catalog, the RNG, and the ability
//! controller. It owns the selection state machine (`Idle` → `OneSelected` →
//! `Idle`, with `Won` as the terminal state), the pair counter, and the
//! ordering between player selections and host ticks.
//!
//! Every public mutator runs to completion before returning: board changes,
//! the pair counter, and the accessibility cache are always consistent between
//! calls.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::abilities::{blast_radius, combo_victims, AbilityState, Countdown, FuseStep, PairHint};
use crate::board::Board;
use crate::catalog::{Ability, Catalog};
use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::layout::LayoutTemplate;
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::types::*;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    catalog: Catalog,
    layout: LayoutTemplate,
    board: Board,
    rng: SimpleRng,
    /// Seed the current deal was built from
    seed: u32,
    selection: Option<TileId>,
    abilities: AbilityState,
    moves: u32,
    won: bool,
}

impl GameState {
    /// Build a session for a named layout of `config`
    pub fn new(config: &GameConfig, layout: &str, seed: u32) -> Result<Self> {
        Self::from_parts(config.catalog()?, config.layout(layout)?, seed)
    }

    pub fn from_parts(catalog: Catalog, layout: LayoutTemplate, seed: u32) -> Result<Self> {
        let mut rng = SimpleRng::new(seed);
        let board = Board::build(&layout, &catalog, &mut rng)?;
        info!(
            layout = layout.name(),
            seed,
            tiles = board.len(),
            pairs = board.remaining_pairs(),
            "board dealt"
        );
        Ok(Self::assemble(catalog, layout, board, rng, seed))
    }

    /// Start from a board whose kinds were assigned by hand
    pub fn from_board(catalog: Catalog, board: Board, seed: u32) -> Result<Self> {
        if let Some(bad) = board.tiles().iter().find(|t| catalog.get(t.kind).is_none()) {
            return Err(EngineError::invalid_layout(
                board.layout(),
                format!("tile {} uses unknown kind {}", bad.id, bad.kind.0),
            ));
        }
        let layout = LayoutTemplate::new(
            board.layout(),
            board.tiles().iter().map(|t| t.position).collect(),
        );
        Ok(Self::assemble(catalog, layout, board, SimpleRng::new(seed), seed))
    }

    fn assemble(catalog: Catalog, layout: LayoutTemplate, board: Board, rng: SimpleRng, seed: u32) -> Self {
        Self {
            catalog,
            layout,
            board,
            rng,
            seed,
            selection: None,
            abilities: AbilityState::new(),
            moves: 0,
            won: false,
        }
    }

    /// Deal the same layout again from a seed drawn off the session RNG
    pub fn restart(&mut self) -> Result<u32> {
        let seed = self.rng.next_u32();
        let mut rng = SimpleRng::new(seed);
        let board = Board::build(&self.layout, &self.catalog, &mut rng)?;
        info!(layout = self.layout.name(), seed, "board re-dealt");
        *self = Self::assemble(self.catalog.clone(), self.layout.clone(), board, rng, seed);
        Ok(seed)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &LayoutTemplate {
        &self.layout
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn selection(&self) -> Option<TileId> {
        self.selection
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn remaining_pairs(&self) -> u32 {
        self.board.remaining_pairs()
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.abilities.countdown()
    }

    pub fn cutting_charges(&self) -> u32 {
        self.abilities.cutting_charges()
    }

    pub fn pair_hint(&self) -> Option<PairHint> {
        self.abilities.hint()
    }

    /// The host should call [`tick`](Self::tick) once per second while true
    pub fn needs_tick(&self) -> bool {
        !self.won && self.abilities.needs_tick()
    }

    /// Geometric accessibility of every tile; matched tiles report `false`
    pub fn accessibility(&self) -> BTreeMap<TileId, bool> {
        self.board
            .tiles()
            .iter()
            .map(|t| (t.id, t.is_accessible()))
            .collect()
    }

    /// Can be clicked right now (geometry, or an active cutting override)
    pub fn is_selectable(&self, id: TileId) -> bool {
        match self.board.tile(id) {
            Some(t) if !t.matched => !t.blocked || self.abilities.overrides_blocking(),
            _ => false,
        }
    }

    /// Apply one host action
    pub fn apply_action(&mut self, action: GameAction) -> Result<GameEvent> {
        Ok(match action {
            GameAction::Select(id) => GameEvent::Selection(self.select_tile(id)),
            GameAction::Tick => GameEvent::Tick(self.tick()),
            GameAction::Reshuffle => GameEvent::Reshuffled(self.reshuffle()),
            GameAction::Restart => GameEvent::Restarted {
                seed: self.restart()?,
            },
        })
    }

    /// Click a tile
    pub fn select_tile(&mut self, id: TileId) -> SelectionOutcome {
        if self.won {
            return SelectionOutcome::Ignored;
        }
        let Some(tile) = self.board.tile(id) else {
            warn!(tile = %id, "selection of unknown tile ignored");
            return SelectionOutcome::Ignored;
        };
        if tile.matched {
            return SelectionOutcome::Ignored;
        }

        if !self.is_selectable(id) {
            debug!(tile = %id, "blocked tile rejected");
            return SelectionOutcome::Blocked { tile: id };
        }

        if self.selection == Some(id) {
            self.selection = None;
            debug!(tile = %id, "deselected");
            return SelectionOutcome::Deselected { tile: id };
        }

        match self.selection {
            None => self.select_first(id),
            Some(first) => self.resolve_pair(first, id),
        }
    }

    fn select_first(&mut self, id: TileId) -> SelectionOutcome {
        self.selection = Some(id);
        debug!(tile = %id, "selected");

        match self.abilities.on_select(&mut self.board, &self.catalog, id) {
            Some(effect) => {
                let kind = self.board.tile(id).map(|t| t.kind);
                match kind.and_then(|k| self.catalog.ability(k)) {
                    Some(ability) => SelectionOutcome::AbilityTriggered {
                        tile: id,
                        kind: ability.tag(),
                        effect,
                    },
                    None => SelectionOutcome::Selected { tile: id },
                }
            }
            None => SelectionOutcome::Selected { tile: id },
        }
    }

    /// Second click: count the move, defuse, then match or reject.
    ///
    /// Defusing happens here, inside the same call, so a pending tick can never
    /// detonate a tile that this click rescued.
    fn resolve_pair(&mut self, first: TileId, second: TileId) -> SelectionOutcome {
        self.selection = None;
        self.moves += 1;
        self.abilities.cancel_countdown_for(&[first, second]);
        self.abilities.consume_charge();

        let pair = [first, second];
        let (Some(a), Some(b)) = (self.board.tile(first), self.board.tile(second)) else {
            return SelectionOutcome::Ignored;
        };
        let (a, b) = (a.kind, b.kind);

        if !self.catalog.kinds_match(a, b) {
            debug!(%first, %second, "mismatch");
            return SelectionOutcome::Mismatched { pair };
        }

        self.board.remove_pair(first, second);
        info!(%first, %second, remaining = self.board.remaining_pairs(), "pair matched");

        let bonus = match self.combo_extra(a, b) {
            Some(extra) => self.trigger_combo(extra),
            None => Vec::new(),
        };
        self.abilities.clear_stale_hint(&self.board);

        SelectionOutcome::Matched {
            pair,
            bonus,
            won: self.check_win(),
        }
    }

    /// Extra-tile count of the first combo kind in the pair
    fn combo_extra(&self, a: KindId, b: KindId) -> Option<u32> {
        [a, b].into_iter().find_map(|k| match self.catalog.ability(k) {
            Some(Ability::ComboBonus { extra_tiles }) => Some(extra_tiles),
            _ => None,
        })
    }

    fn trigger_combo(&mut self, extra: u32) -> Vec<TileId> {
        let victims = combo_victims(&self.board, &mut self.rng, extra);
        if victims.is_empty() {
            return victims;
        }
        let decrement = self.board.remove_tiles(&victims);
        self.abilities.cancel_countdown_for(&victims);
        info!(removed = victims.len(), decrement, "combo bonus");
        victims
    }

    /// Advance the active countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.won {
            return TickOutcome::Idle;
        }
        match self.abilities.tick(&self.board) {
            FuseStep::Idle => TickOutcome::Idle,
            FuseStep::Counting(c) => TickOutcome::Counting {
                tile: c.tile,
                remaining: c.remaining,
            },
            FuseStep::Expired(tile) => self.detonate(tile),
        }
    }

    fn detonate(&mut self, tile: TileId) -> TickOutcome {
        let removed = blast_radius(&self.board, tile);
        let decrement = self.board.remove_tiles(&removed);
        self.selection = None;
        self.abilities.clear_stale_hint(&self.board);
        info!(%tile, removed = removed.len(), decrement, "detonation");

        TickOutcome::Detonated {
            tile,
            removed,
            won: self.check_win(),
        }
    }

    fn check_win(&mut self) -> bool {
        if !self.won && self.board.remaining_pairs() == 0 {
            self.won = true;
            self.selection = None;
            self.abilities = AbilityState::new();
            info!(moves = self.moves, "board cleared");
        }
        self.won
    }

    /// Redistribute kinds among unmatched tiles, keeping every position.
    ///
    /// The selected tile and a tile with a lit fuse keep their kinds so the
    /// pending attempt and the countdown stay meaningful.
    pub fn reshuffle(&mut self) -> ReshuffleOutcome {
        if self.won {
            return ReshuffleOutcome {
                shuffled: 0,
                pinned: 0,
            };
        }

        let fuse = self.abilities.countdown().map(|c| c.tile);
        let (pinned, free): (Vec<TileId>, Vec<TileId>) = self
            .board
            .unmatched()
            .map(|t| t.id)
            .partition(|id| Some(*id) == self.selection || Some(*id) == fuse);

        let kinds: Vec<KindId> = free
            .iter()
            .filter_map(|id| self.board.tile(*id).map(|t| t.kind))
            .collect();
        let kinds = self.rng.shuffled(&kinds);
        for (id, kind) in free.iter().zip(kinds) {
            self.board.set_kind(*id, kind);
        }
        self.board.refresh();
        self.abilities.clear_hint();

        info!(shuffled = free.len(), pinned = pinned.len(), "board reshuffled");
        ReshuffleOutcome {
            shuffled: free.len() as u32,
            pinned: pinned.len() as u32,
        }
    }

    /// A pair that could be matched right now, if any
    pub fn available_match(&self) -> Option<[TileId; 2]> {
        let open: Vec<(TileId, KindId)> = self
            .board
            .tiles()
            .iter()
            .filter(|t| self.is_selectable(t.id))
            .map(|t| (t.id, t.kind))
            .collect();

        for (i, &(a, ka)) in open.iter().enumerate() {
            for &(b, kb) in &open[i + 1..] {
                if self.catalog.kinds_match(ka, kb) {
                    return Some([a, b]);
                }
            }
        }
        None
    }

    /// No selectable pair is left and the board is not cleared
    pub fn is_deadlocked(&self) -> bool {
        !self.won && self.available_match().is_none()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.layout.clear();
        out.layout.push_str(self.layout.name());
        out.seed = self.seed;
        out.moves = self.moves;
        out.remaining_pairs = self.board.remaining_pairs();
        out.won = self.won;
        out.deadlocked = self.is_deadlocked();
        out.selection = self.selection;
        out.countdown = self.abilities.countdown();
        out.cutting_charges = self.abilities.cutting_charges();
        out.hint = self.abilities.hint();

        out.tiles.clear();
        out.tiles.extend(self.board.tiles().iter().map(|t| {
            let kind = self.catalog.get(t.kind);
            TileSnapshot {
                id: t.id,
                kind: kind.map(|k| k.id().to_string()).unwrap_or_default(),
                special: kind.and_then(|k| k.special()),
                position: t.position,
                matched: t.matched,
                accessible: t.is_accessible(),
            }
        }));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TileKindSpec;

    /// a, b, plain; boom explodes in 2; joker is wild; tnt removes 1 extra;
    /// blade grants 2 charges; walker moves; nose sniffs
    fn catalog() -> Catalog {
        Catalog::from_specs(&[
            TileKindSpec::plain("a", "A"),
            TileKindSpec::plain("b", "B"),
            TileKindSpec {
                timer_seconds: Some(2),
                ..TileKindSpec::special("boom", "Boom", SpecialTag::Explosive)
            },
            TileKindSpec::special("joker", "Joker", SpecialTag::Wildcard),
            TileKindSpec {
                extra_tiles: Some(1),
                ..TileKindSpec::special("tnt", "TNT", SpecialTag::ComboBonus)
            },
            TileKindSpec {
                charges: Some(2),
                ..TileKindSpec::special("blade", "Blade", SpecialTag::Cutting)
            },
            TileKindSpec::special("walker", "Walker", SpecialTag::Moving),
            TileKindSpec::special("nose", "Nose", SpecialTag::Sniff),
        ])
        .unwrap()
    }

    const A: u16 = 0;
    const B: u16 = 1;
    const BOOM: u16 = 2;
    const JOKER: u16 = 3;
    const TNT: u16 = 4;
    const BLADE: u16 = 5;
    const WALKER: u16 = 6;
    const NOSE: u16 = 7;

    /// Tiles spaced three columns apart: nobody flanks anybody
    fn spaced(kinds: &[u16]) -> GameState {
        let assignments: Vec<(Position, KindId)> = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| (Position::new(i as f32 * 3.0, 0.0, 0), KindId(k)))
            .collect();
        let board = Board::from_assignments("spaced", &assignments).unwrap();
        GameState::from_board(catalog(), board, 7).unwrap()
    }

    /// Tiles packed on one row: only the ends are free
    fn packed(kinds: &[u16]) -> GameState {
        let assignments: Vec<(Position, KindId)> = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| (Position::new(i as f32, 0.0, 0), KindId(k)))
            .collect();
        let board = Board::from_assignments("packed", &assignments).unwrap();
        GameState::from_board(catalog(), board, 7).unwrap()
    }

    #[test]
    fn reclick_deselects_without_a_move() {
        let mut game = spaced(&[A, A, B, B]);
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Selected { tile: TileId(0) });
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Deselected { tile: TileId(0) });
        assert_eq!(game.selection(), None);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn mismatch_counts_a_move_and_returns_to_idle() {
        let mut game = spaced(&[A, A, B, B]);
        game.select_tile(TileId(0));
        assert_eq!(
            game.select_tile(TileId(2)),
            SelectionOutcome::Mismatched {
                pair: [TileId(0), TileId(2)]
            }
        );
        assert_eq!(game.selection(), None);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.remaining_pairs(), 2);
    }

    #[test]
    fn unknown_and_matched_tiles_are_ignored() {
        let mut game = spaced(&[A, A, B, B]);
        assert_eq!(game.select_tile(TileId(99)), SelectionOutcome::Ignored);

        game.select_tile(TileId(0));
        game.select_tile(TileId(1));
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Ignored);
    }

    #[test]
    fn blocked_tile_is_rejected_without_state_change() {
        let mut game = packed(&[A, B, A, B]);
        assert_eq!(game.select_tile(TileId(1)), SelectionOutcome::Blocked { tile: TileId(1) });
        assert_eq!(game.selection(), None);

        game.select_tile(TileId(0));
        assert_eq!(game.select_tile(TileId(2)), SelectionOutcome::Blocked { tile: TileId(2) });
        assert_eq!(game.selection(), Some(TileId(0)));
    }

    #[test]
    fn wildcard_matches_any_kind() {
        let mut game = spaced(&[JOKER, A, A, B]);
        game.select_tile(TileId(0));
        assert!(game.select_tile(TileId(3)).is_match());
        assert_eq!(game.remaining_pairs(), 1);
    }

    #[test]
    fn fuse_detonates_and_clears_selection() {
        // boom at col 0, neighbours at 1 and 2 (packed), far pair at 9/12.
        let assignments = [
            (Position::new(0.0, 0.0, 0), KindId(BOOM)),
            (Position::new(1.0, 0.0, 0), KindId(A)),
            (Position::new(2.0, 0.0, 0), KindId(A)),
            (Position::new(3.0, 0.0, 0), KindId(BOOM)),
            (Position::new(9.0, 0.0, 0), KindId(B)),
            (Position::new(12.0, 0.0, 0), KindId(B)),
        ];
        let board = Board::from_assignments("fuse", &assignments).unwrap();
        let mut game = GameState::from_board(catalog(), board, 1).unwrap();

        assert!(matches!(
            game.select_tile(TileId(0)),
            SelectionOutcome::AbilityTriggered {
                kind: SpecialTag::Explosive,
                ..
            }
        ));
        assert!(game.needs_tick());
        assert_eq!(
            game.tick(),
            TickOutcome::Counting {
                tile: TileId(0),
                remaining: 1
            }
        );

        let TickOutcome::Detonated { tile, removed, won } = game.tick() else {
            panic!("expected detonation");
        };
        assert_eq!(tile, TileId(0));
        assert_eq!(removed.as_slice(), &[TileId(0), TileId(1), TileId(2)]);
        assert!(!won);
        assert_eq!(game.selection(), None);
        // 6 tiles - 3 removed = 3 unmatched, one pair left.
        assert_eq!(game.remaining_pairs(), 1);
        assert!(!game.needs_tick());
    }

    #[test]
    fn matching_the_fuse_tile_defuses_it() {
        let mut game = spaced(&[BOOM, A, BOOM, A]);
        game.select_tile(TileId(0));
        game.tick();
        assert!(game.select_tile(TileId(2)).is_match());
        assert_eq!(game.countdown(), None);
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.board().unmatched_count(), 2);
    }

    #[test]
    fn deselect_leaves_fuse_burning() {
        let mut game = spaced(&[BOOM, A, BOOM, A]);
        game.select_tile(TileId(0));
        game.select_tile(TileId(0));
        assert_eq!(game.countdown().map(|c| c.tile), Some(TileId(0)));

        // A pair attempt not involving the fuse tile leaves it lit.
        game.select_tile(TileId(1));
        game.select_tile(TileId(3));
        assert!(game.countdown().is_some());
    }

    #[test]
    fn combo_removes_extra_accessible_tiles() {
        let mut game = spaced(&[TNT, TNT, A, A, B, B]);
        game.select_tile(TileId(0));
        let SelectionOutcome::Matched { bonus, .. } = game.select_tile(TileId(1)) else {
            panic!("expected match");
        };
        assert_eq!(bonus.len(), 1);
        assert!(bonus[0].0 >= 2);
        // 6 - 2 matched - 1 bonus = 3 unmatched
        assert_eq!(game.board().unmatched_count(), 3);
        assert_eq!(game.remaining_pairs(), 1);
    }

    #[test]
    fn combo_with_nothing_left_removes_nothing() {
        let mut game = spaced(&[TNT, TNT]);
        game.select_tile(TileId(0));
        assert_eq!(
            game.select_tile(TileId(1)),
            SelectionOutcome::Matched {
                pair: [TileId(0), TileId(1)],
                bonus: vec![],
                won: true
            }
        );
    }

    #[test]
    fn cutting_allows_blocked_picks_until_spent() {
        // Packed row: only tiles 0 and 7 are free.
        let mut game = packed(&[BLADE, A, B, B, A, B, B, BLADE]);
        assert!(matches!(
            game.select_tile(TileId(0)),
            SelectionOutcome::AbilityTriggered {
                effect: AbilityEffect::CuttingArmed { charges: 2 },
                ..
            }
        ));
        assert!(game.is_selectable(TileId(4)));

        // Attempt 1: blade + blocked a -> mismatch, one charge spent.
        assert!(matches!(
            game.select_tile(TileId(4)),
            SelectionOutcome::Mismatched { .. }
        ));
        assert_eq!(game.cutting_charges(), 1);

        // Attempt 2: a + a through blocking, last charge spent.
        assert_eq!(game.select_tile(TileId(1)), SelectionOutcome::Selected { tile: TileId(1) });
        assert!(game.select_tile(TileId(4)).is_match());
        assert_eq!(game.cutting_charges(), 0);

        // Tile 6 sits between 5 and 7 again.
        assert_eq!(game.select_tile(TileId(6)), SelectionOutcome::Blocked { tile: TileId(6) });
    }

    #[test]
    fn reshuffle_keeps_pinned_tiles() {
        let mut game = spaced(&[BOOM, A, B, A, B, BOOM]);
        game.select_tile(TileId(0));
        let before = game.board().tile(TileId(0)).unwrap().kind;
        let outcome = game.reshuffle();
        assert_eq!(outcome.pinned, 1);
        assert_eq!(outcome.shuffled, 5);
        assert_eq!(game.board().tile(TileId(0)).unwrap().kind, before);
    }

    #[test]
    fn deadlock_probe_sees_stuck_board() {
        // a b a b packed: ends are a and b, no free pair.
        let game = packed(&[A, B, A, B]);
        assert!(game.is_deadlocked());
        let open = spaced(&[A, B, A, B]);
        assert_eq!(open.available_match(), Some([TileId(0), TileId(2)]));
    }

    #[test]
    fn restart_redeals_same_layout() {
        let mut game = spaced(&[A, A, B, B]);
        game.select_tile(TileId(0));
        game.select_tile(TileId(1));
        let seed = game.restart().unwrap();
        assert_eq!(game.seed(), seed);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.remaining_pairs(), 2);
        assert_eq!(game.board().len(), 4);
    }

    #[test]
    fn from_board_rejects_unknown_kinds() {
        let board = Board::from_assignments(
            "bad",
            &[
                (Position::new(0.0, 0.0, 0), KindId(40)),
                (Position::new(3.0, 0.0, 0), KindId(40)),
            ],
        )
        .unwrap();
        assert!(GameState::from_board(catalog(), board, 1).is_err());
    }

    #[test]
    fn won_game_ignores_everything() {
        let mut game = spaced(&[A, A]);
        game.select_tile(TileId(0));
        assert!(matches!(
            game.select_tile(TileId(1)),
            SelectionOutcome::Matched { won: true, .. }
        ));
        assert!(game.is_won());
        assert!(!game.is_deadlocked());
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Ignored);
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert_eq!(game.reshuffle().shuffled, 0);
    }

    #[test]
    fn reselecting_cannot_stall_a_lit_fuse() {
        let mut game = spaced(&[BOOM, A, A, BOOM]);
        game.select_tile(TileId(0));

        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Deselected { tile: TileId(0) });
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Selected { tile: TileId(0) });
        assert_eq!(
            game.tick(),
            TickOutcome::Counting {
                tile: TileId(0),
                remaining: 1
            }
        );

        game.select_tile(TileId(0));
        game.select_tile(TileId(0));
        let TickOutcome::Detonated { removed, .. } = game.tick() else {
            panic!("fuse was reset by reselecting");
        };
        assert_eq!(removed.as_slice(), &[TileId(0)]);
        assert_eq!(game.countdown(), None);
    }

    #[test]
    fn selected_tile_that_became_blocked_cannot_be_deselected() {
        let board = Board::from_assignments(
            "covered",
            &[
                (Position::new(4.0, 0.0, 0), KindId(A)),
                (Position::new(4.0, 0.0, 1), KindId(B)),
                (Position::new(0.0, 0.0, 0), KindId(BLADE)),
                (Position::new(10.0, 0.0, 0), KindId(BLADE)),
                (Position::new(7.0, 0.0, 0), KindId(A)),
                (Position::new(13.0, 0.0, 0), KindId(WALKER)),
                (Position::new(16.0, 0.0, 0), KindId(WALKER)),
                (Position::new(19.0, 0.0, 0), KindId(B)),
            ],
        )
        .unwrap();
        let mut game = GameState::from_board(catalog(), board, 3).unwrap();

        // Spend both blade charges: one on the blades, one on the covered A.
        game.select_tile(TileId(2));
        assert!(game.select_tile(TileId(3)).is_match());
        assert_eq!(game.select_tile(TileId(0)), SelectionOutcome::Selected { tile: TileId(0) });
        assert!(game.select_tile(TileId(4)).is_match());
        assert_eq!(game.cutting_charges(), 0);

        // The walker lands on the cleared slot under tile 1.
        assert!(matches!(
            game.select_tile(TileId(5)),
            SelectionOutcome::AbilityTriggered {
                kind: SpecialTag::Moving,
                ..
            }
        ));
        assert!(!game.board().is_accessible(TileId(5)));

        assert_eq!(game.select_tile(TileId(5)), SelectionOutcome::Blocked { tile: TileId(5) });
        assert_eq!(game.selection(), Some(TileId(5)));
    }

    #[test]
    fn reshuffle_drops_the_pair_hint() {
        let mut game = spaced(&[NOSE, A, A, NOSE]);
        game.select_tile(TileId(0));
        assert_eq!(game.pair_hint().map(|h| h.tile), Some(TileId(3)));

        game.reshuffle();
        assert_eq!(game.pair_hint(), None);
    }
}
