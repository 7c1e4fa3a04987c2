//! Tile catalog - the registry of tile kinds and their abilities
//!
//! Catalog entries come from configuration as [`TileKindSpec`] records and are
//! resolved once into [`TileKind`]s. Resolution is where a special tag missing
//! its parameter gets the documented default.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::types::{
    KindId, SpecialTag, DEFAULT_COMBO_EXTRA_TILES, DEFAULT_CUTTING_CHARGES, DEFAULT_FUSE_SECONDS,
};

/// Raw catalog entry as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileKindSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_tiles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<u32>,
}

impl TileKindSpec {
    pub fn plain(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            special: None,
            timer_seconds: None,
            extra_tiles: None,
            charges: None,
        }
    }

    pub fn special(id: &str, name: &str, tag: SpecialTag) -> Self {
        Self {
            special: Some(tag),
            ..Self::plain(id, name)
        }
    }
}

/// A special tag with its resolved parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Explosive { fuse_seconds: u32 },
    Sniff,
    Wildcard,
    Moving,
    ComboBonus { extra_tiles: u32 },
    Cutting { charges: u32 },
}

impl Ability {
    pub fn tag(&self) -> SpecialTag {
        match self {
            Ability::Explosive { .. } => SpecialTag::Explosive,
            Ability::Sniff => SpecialTag::Sniff,
            Ability::Wildcard => SpecialTag::Wildcard,
            Ability::Moving => SpecialTag::Moving,
            Ability::ComboBonus { .. } => SpecialTag::ComboBonus,
            Ability::Cutting { .. } => SpecialTag::Cutting,
        }
    }

    fn resolve(spec: &TileKindSpec, tag: SpecialTag) -> Self {
        match tag {
            SpecialTag::Explosive => Ability::Explosive {
                fuse_seconds: positive_or_default(spec, "timer_seconds", spec.timer_seconds, DEFAULT_FUSE_SECONDS),
            },
            SpecialTag::Sniff => Ability::Sniff,
            SpecialTag::Wildcard => Ability::Wildcard,
            SpecialTag::Moving => Ability::Moving,
            SpecialTag::ComboBonus => Ability::ComboBonus {
                extra_tiles: spec.extra_tiles.unwrap_or_else(|| {
                    warn!(kind = %spec.id, default = DEFAULT_COMBO_EXTRA_TILES, "combo tile without extra_tiles");
                    DEFAULT_COMBO_EXTRA_TILES
                }),
            },
            SpecialTag::Cutting => Ability::Cutting {
                charges: positive_or_default(spec, "charges", spec.charges, DEFAULT_CUTTING_CHARGES),
            },
        }
    }
}

fn positive_or_default(spec: &TileKindSpec, field: &str, value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => {
            warn!(kind = %spec.id, field, default, "ability parameter missing or zero, using default");
            default
        }
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileKind {
    id: String,
    name: String,
    ability: Option<Ability>,
}

impl TileKind {
    fn resolve(spec: &TileKindSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone().unwrap_or_else(|| spec.id.clone()),
            ability: spec.special.map(|tag| Ability::resolve(spec, tag)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ability(&self) -> Option<Ability> {
        self.ability
    }

    pub fn special(&self) -> Option<SpecialTag> {
        self.ability.map(|a| a.tag())
    }

    pub fn is_wildcard(&self) -> bool {
        self.ability == Some(Ability::Wildcard)
    }
}

/// Ordered registry of tile kinds; `KindId(n)` is the n-th entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kinds: Vec<TileKind>,
}

impl Catalog {
    /// Resolve configuration entries into a catalog
    pub fn from_specs(specs: &[TileKindSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        if specs.len() > u16::MAX as usize {
            return Err(EngineError::CatalogTooLarge {
                max: u16::MAX as usize,
            });
        }

        let mut kinds: Vec<TileKind> = Vec::with_capacity(specs.len());
        for spec in specs {
            if kinds.iter().any(|k| k.id == spec.id) {
                return Err(EngineError::DuplicateKind { id: spec.id.clone() });
            }
            kinds.push(TileKind::resolve(spec));
        }
        Ok(Self { kinds })
    }

    /// The twelve kinds of the standard game
    pub fn standard() -> Self {
        Self {
            kinds: standard_specs().iter().map(TileKind::resolve).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, kind: KindId) -> Option<&TileKind> {
        self.kinds.get(kind.index())
    }

    /// Look up a kind by its string id
    pub fn find(&self, id: &str) -> Option<KindId> {
        self.kinds
            .iter()
            .position(|k| k.id == id)
            .map(|i| KindId(i as u16))
    }

    pub fn ability(&self, kind: KindId) -> Option<Ability> {
        self.get(kind).and_then(TileKind::ability)
    }

    pub fn is_wildcard(&self, kind: KindId) -> bool {
        self.get(kind).is_some_and(TileKind::is_wildcard)
    }

    /// Match predicate: equal kinds, or either side is a wildcard
    pub fn kinds_match(&self, a: KindId, b: KindId) -> bool {
        a == b || self.is_wildcard(a) || self.is_wildcard(b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (KindId, &TileKind)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (KindId(i as u16), k))
    }
}

/// Catalog entries of the standard game
pub fn standard_specs() -> Vec<TileKindSpec> {
    vec![
        TileKindSpec::plain("villager", "Villager"),
        TileKindSpec::plain("alex", "Alex"),
        TileKindSpec::special("pig", "Pig", SpecialTag::Sniff),
        TileKindSpec {
            timer_seconds: Some(10),
            ..TileKindSpec::special("creeper", "Creeper", SpecialTag::Explosive)
        },
        TileKindSpec::special("ender_dragon", "Ender Dragon", SpecialTag::Wildcard),
        TileKindSpec::plain("skeleton", "Skeleton"),
        TileKindSpec::plain("panda", "Panda"),
        TileKindSpec::plain("diamond_pickaxe", "Diamond Pickaxe"),
        TileKindSpec::plain("steve", "Steve"),
        TileKindSpec::special("zombie", "Zombie", SpecialTag::Moving),
        TileKindSpec {
            extra_tiles: Some(2),
            ..TileKindSpec::special("tnt", "TNT", SpecialTag::ComboBonus)
        },
        TileKindSpec {
            charges: Some(3),
            ..TileKindSpec::special("diamond_sword", "Diamond Sword", SpecialTag::Cutting)
        },
    ]
}
