//! Board layouts - static tile slot templates
//!
//! A layout is configured as a list of layers, each a list of `[col, row]`
//! pairs, and resolved into a flat [`LayoutTemplate`] in template order
//! (layer 0 first). Builders for rectangles and rows cover the standard shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::Position;

/// Layout as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub title: String,
    pub layers: Vec<Vec<[f32; 2]>>,
}

/// Resolved, immutable list of slots for one board shape
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTemplate {
    name: String,
    title: String,
    positions: Vec<Position>,
}

impl LayoutTemplate {
    pub fn new(name: impl Into<String>, positions: Vec<Position>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            positions,
        }
    }

    /// Flatten a configured layout; the layer index becomes the stacking level
    pub fn from_spec(name: &str, spec: &LayoutSpec) -> Result<Self> {
        if spec.layers.len() > u8::MAX as usize + 1 {
            return Err(EngineError::invalid_layout(name, "more than 256 layers"));
        }

        let mut positions = Vec::new();
        for (layer, slots) in spec.layers.iter().enumerate() {
            for &[col, row] in slots {
                if !col.is_finite() || !row.is_finite() {
                    return Err(EngineError::invalid_layout(name, "non-finite coordinate"));
                }
                positions.push(Position::new(col, row, layer as u8));
            }
        }

        Ok(Self {
            name: name.to_string(),
            title: if spec.title.is_empty() {
                name.to_string()
            } else {
                spec.title.clone()
            },
            positions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Highest layer used by any slot
    pub fn max_layer(&self) -> Option<u8> {
        self.positions.iter().map(|p| p.layer).max()
    }
}

/// Slots of a `width` x `height` rectangle, row-major
pub fn rectangle(start_col: f32, start_row: f32, width: u32, height: u32) -> Vec<[f32; 2]> {
    let mut out = Vec::with_capacity((width * height) as usize);
    for r in 0..height {
        for c in 0..width {
            out.push([start_col + c as f32, start_row + r as f32]);
        }
    }
    out
}

/// `count` consecutive slots on one row
pub fn row(row: f32, start_col: f32, count: u32) -> Vec<[f32; 2]> {
    (0..count).map(|i| [start_col + i as f32, row]).collect()
}

fn rows(parts: &[(f32, f32, u32)]) -> Vec<[f32; 2]> {
    parts
        .iter()
        .flat_map(|&(r, start, count)| row(r, start, count))
        .collect()
}

fn slots(cells: &[(i32, i32)]) -> Vec<[f32; 2]> {
    cells.iter().map(|&(c, r)| [c as f32, r as f32]).collect()
}

/// The four standard board shapes, keyed by name
pub fn standard_layouts() -> BTreeMap<String, LayoutSpec> {
    let mut layouts = BTreeMap::new();

    layouts.insert(
        "fortress".to_string(),
        LayoutSpec {
            title: "Fortress".to_string(),
            layers: vec![
                rectangle(0.0, 0.0, 12, 6),
                rectangle(1.0, 1.0, 10, 4),
                rectangle(3.0, 2.0, 6, 2),
                rectangle(5.0, 2.5, 2, 1),
            ],
        },
    );

    layouts.insert(
        "pyramid".to_string(),
        LayoutSpec {
            title: "Nether Pyramid".to_string(),
            layers: vec![
                rectangle(0.0, 0.0, 10, 5),
                rectangle(1.0, 0.5, 8, 4),
                rectangle(2.0, 1.0, 6, 3),
                rectangle(3.0, 1.5, 4, 2),
                rectangle(4.0, 2.0, 2, 1),
            ],
        },
    );

    layouts.insert(
        "mine".to_string(),
        LayoutSpec {
            title: "Mine Cave".to_string(),
            layers: vec![
                rows(&[
                    (0.0, 2.0, 14),
                    (1.0, 1.0, 14),
                    (2.0, 0.0, 14),
                    (3.0, 0.0, 14),
                    (4.0, 1.0, 14),
                    (5.0, 2.0, 14),
                ]),
                rows(&[(1.0, 3.0, 10), (2.0, 2.0, 10), (3.0, 2.0, 10), (4.0, 3.0, 10)]),
                rows(&[(2.0, 5.0, 4), (3.0, 5.0, 4)]),
            ],
        },
    );

    let mut ring = Vec::new();
    ring.extend(row(0.0, 3.0, 4));
    ring.extend(row(1.0, 1.0, 8));
    ring.extend(row(2.0, 0.0, 10));
    ring.extend(slots(&[(0, 3), (1, 3), (2, 3), (7, 3), (8, 3), (9, 3)]));
    ring.extend(slots(&[(0, 4), (1, 4), (2, 4), (7, 4), (8, 4), (9, 4)]));
    ring.extend(row(5.0, 0.0, 10));
    ring.extend(row(6.0, 1.0, 8));
    ring.extend(row(7.0, 3.0, 4));

    layouts.insert(
        "portal".to_string(),
        LayoutSpec {
            title: "End Portal".to_string(),
            layers: vec![
                ring,
                slots(&[
                    (3, 1),
                    (4, 1),
                    (5, 1),
                    (6, 1),
                    (2, 2),
                    (3, 2),
                    (6, 2),
                    (7, 2),
                    (2, 5),
                    (3, 5),
                    (6, 5),
                    (7, 5),
                    (3, 6),
                    (4, 6),
                    (5, 6),
                    (6, 6),
                ]),
                slots(&[(4, 3), (5, 3), (4, 4), (5, 4)]),
            ],
        },
    );

    layouts
}
