//! Accessibility evaluator
//!
//! A tile is blocked when an unmatched tile on the layer above overlaps it
//! (`|dc| < 1 && |dr| < 1`), or when unmatched tiles on its own row band sit
//! within one column on *both* its left and its right. Matched tiles never
//! block and are never accessible.

use crate::board::BoardTile;
use crate::types::{COVER_TOLERANCE, FLANK_COLUMN_REACH, FLANK_ROW_TOLERANCE};

/// Some unmatched tile on the next layer overlaps `tile`
pub fn is_covered(tiles: &[BoardTile], tile: &BoardTile) -> bool {
    tiles.iter().any(|t| {
        !t.matched
            && t.id != tile.id
            && tile.position.layer.checked_add(1) == Some(t.position.layer)
            && (t.position.col - tile.position.col).abs() < COVER_TOLERANCE
            && (t.position.row - tile.position.row).abs() < COVER_TOLERANCE
    })
}

/// Unmatched same-layer neighbours sit both left and right of `tile`
pub fn is_flanked(tiles: &[BoardTile], tile: &BoardTile) -> bool {
    let mut left = false;
    let mut right = false;
    let col = tile.position.col;

    for t in tiles {
        if t.matched
            || t.id == tile.id
            || t.position.layer != tile.position.layer
            || (t.position.row - tile.position.row).abs() >= FLANK_ROW_TOLERANCE
        {
            continue;
        }
        let c = t.position.col;
        if c < col && c >= col - FLANK_COLUMN_REACH {
            left = true;
        } else if c > col && c <= col + FLANK_COLUMN_REACH {
            right = true;
        }
        if left && right {
            return true;
        }
    }
    false
}

/// Covered or flanked
pub fn is_blocked(tiles: &[BoardTile], tile: &BoardTile) -> bool {
    is_covered(tiles, tile) || is_flanked(tiles, tile)
}

/// Recompute the `blocked` cache for every tile
pub fn refresh(tiles: &mut [BoardTile]) {
    let blocked: Vec<bool> = tiles
        .iter()
        .map(|t| t.matched || is_blocked(tiles, t))
        .collect();
    for (tile, b) in tiles.iter_mut().zip(blocked) {
        tile.blocked = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KindId, Position, TileId};

    fn tiles(positions: &[(f32, f32, u8)]) -> Vec<BoardTile> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(c, r, l))| BoardTile::new(TileId(i as u32), KindId(0), Position::new(c, r, l)))
            .collect()
    }

    #[test]
    fn lone_tile_is_free() {
        let t = tiles(&[(0.0, 0.0, 0)]);
        assert!(!is_blocked(&t, &t[0]));
    }

    #[test]
    fn tile_above_covers() {
        let t = tiles(&[(0.0, 0.0, 0), (0.0, 0.0, 1)]);
        assert!(is_covered(&t, &t[0]));
        assert!(!is_covered(&t, &t[1]));
    }

    #[test]
    fn half_offset_above_still_covers() {
        let t = tiles(&[(2.0, 2.0, 0), (2.5, 2.5, 1)]);
        assert!(is_covered(&t, &t[0]));
    }

    #[test]
    fn tile_one_unit_away_above_does_not_cover() {
        let t = tiles(&[(2.0, 2.0, 0), (3.0, 2.0, 1)]);
        assert!(!is_covered(&t, &t[0]));
    }

    #[test]
    fn tile_two_layers_up_does_not_cover() {
        let t = tiles(&[(0.0, 0.0, 0), (0.0, 0.0, 2)]);
        assert!(!is_covered(&t, &t[0]));
    }

    #[test]
    fn flanked_needs_both_sides() {
        let t = tiles(&[(0.0, 0.0, 0), (1.0, 0.0, 0), (2.0, 0.0, 0)]);
        assert!(!is_flanked(&t, &t[0]));
        assert!(is_flanked(&t, &t[1]));
        assert!(!is_flanked(&t, &t[2]));
    }

    #[test]
    fn flank_ignores_other_rows_and_layers() {
        let t = tiles(&[
            (0.0, 0.5, 0),
            (1.0, 0.0, 0),
            (2.0, 0.0, 1),
        ]);
        assert!(!is_flanked(&t, &t[1]));
    }

    #[test]
    fn matched_tiles_do_not_block() {
        let mut t = tiles(&[(0.0, 0.0, 0), (1.0, 0.0, 0), (2.0, 0.0, 0), (1.0, 0.0, 1)]);
        assert!(is_blocked(&t, &t[1]));
        t[3].matched = true;
        assert!(is_blocked(&t, &t[1]), "still flanked");
        t[0].matched = true;
        assert!(!is_blocked(&t, &t[1]));
    }

    #[test]
    fn refresh_marks_matched_as_blocked() {
        let mut t = tiles(&[(0.0, 0.0, 0), (1.0, 0.0, 0)]);
        t[0].matched = true;
        refresh(&mut t);
        assert!(t[0].blocked);
        assert!(!t[1].blocked);
        assert!(!t[0].is_accessible());
        assert!(t[1].is_accessible());
    }
}
