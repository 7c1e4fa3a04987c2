//! Game configuration - tile catalog and named layouts
//!
//! The default configuration is the standard game: twelve tile kinds and the
//! `fortress`, `pyramid`, `mine`, and `portal` boards. Hosts may replace it
//! with a JSON document of the same shape:
//!
//! ```json
//! {
//!   "catalog": [
//!     { "id": "creeper", "name": "Creeper", "special": "explosive", "timer_seconds": 10 }
//!   ],
//!   "layouts": {
//!     "strip": { "title": "Strip", "layers": [[[0, 0], [1, 0], [2, 0], [3, 0]]] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{standard_specs, Catalog, TileKindSpec};
use crate::error::{EngineError, Result};
use crate::layout::{standard_layouts, LayoutSpec, LayoutTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "standard_specs")]
    pub catalog: Vec<TileKindSpec>,
    #[serde(default = "standard_layouts")]
    pub layouts: BTreeMap<String, LayoutSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog: standard_specs(),
            layouts: standard_layouts(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; omitted sections fall back to the standard game
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            kinds = config.catalog.len(),
            layouts = config.layouts.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::from_specs(&self.catalog)
    }

    pub fn layout(&self, name: &str) -> Result<LayoutTemplate> {
        let spec = self
            .layouts
            .get(name)
            .ok_or_else(|| EngineError::UnknownLayout {
                name: name.to_string(),
            })?;
        LayoutTemplate::from_spec(name, spec)
    }

    pub fn layout_names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpecialTag;

    #[test]
    fn default_config_lists_standard_layouts() {
        let config = GameConfig::default();
        let names: Vec<&str> = config.layout_names().collect();
        assert_eq!(names, vec!["fortress", "mine", "portal", "pyramid"]);
        assert_eq!(config.catalog().unwrap().len(), 12);
    }

    #[test]
    fn json_overrides_sections_independently() {
        let config = GameConfig::from_json_str(
            r#"{ "layouts": { "strip": { "layers": [[[0, 0], [1, 0], [2, 0], [3, 0]]] } } }"#,
        )
        .unwrap();

        assert_eq!(config.catalog, standard_specs());
        assert_eq!(config.layout("strip").unwrap().len(), 4);
        assert!(matches!(
            config.layout("fortress"),
            Err(EngineError::UnknownLayout { name }) if name == "fortress"
        ));
    }

    #[test]
    fn json_catalog_accepts_source_tag_names() {
        let config = GameConfig::from_json_str(
            r#"{ "catalog": [
                { "id": "tnt", "special": "combo", "extra_tiles": 4 },
                { "id": "dragon", "special": "wildcard" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(config.catalog[0].special, Some(SpecialTag::ComboBonus));
        assert_eq!(config.catalog[0].extra_tiles, Some(4));
        assert_eq!(config.catalog[1].special, Some(SpecialTag::Wildcard));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            GameConfig::from_json_str("{ nope"),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn default_config_survives_json_round_trip() {
        let config = GameConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json_str(&text).unwrap(), config);
    }
}
