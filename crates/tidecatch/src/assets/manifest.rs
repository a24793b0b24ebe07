use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use crate::api::types::DeviceTier;
use crate::world::species::SpeciesCatalog;

/// Sprite name of the world map tile image.
pub const MAP_SPRITE: &str = "map";
/// Sprite name of the player's walk sheet (2 columns x 4 facing rows).
pub const PLAYER_SPRITE: &str = "player";

/// Asset manifest mapping logical sprite names to image files.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named sprites. Ordered so sprite ids are stable across loads.
    #[serde(default)]
    pub sprites: BTreeMap<String, SpriteDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Relative path to the image (e.g., "assets/sprites/ball_normal.png").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The stock layout: map, player, one image per device tier and one per
    /// species in the catalog.
    pub fn for_catalog(catalog: &SpeciesCatalog) -> Self {
        let mut manifest = Self::default();
        manifest.insert(MAP_SPRITE, "assets/maps/world_map.png");
        manifest.insert(PLAYER_SPRITE, "assets/sprites/player.png");
        for tier in DeviceTier::ALL {
            let name = tier.sprite_name();
            manifest.insert(name, format!("assets/sprites/{}.png", name));
        }
        for species in catalog.iter() {
            let path = format!("assets/sprites/creatures/{}.png", species.sprite);
            manifest.insert(&species.sprite, path);
        }
        manifest
    }

    pub fn insert(&mut self, name: &str, path: impl Into<String>) {
        self.sprites
            .insert(name.to_string(), SpriteDescriptor { path: path.into() });
    }

    /// Names the game draws that the manifest does not declare.
    pub fn missing_for(&self, catalog: &SpeciesCatalog) -> Vec<String> {
        let required = [MAP_SPRITE, PLAYER_SPRITE]
            .into_iter()
            .chain(DeviceTier::ALL.iter().map(|t| t.sprite_name()))
            .chain(catalog.iter().map(|s| s.sprite.as_str()));
        required
            .filter(|name| !self.sprites.contains_key(*name))
            .map(str::to_string)
            .collect()
    }
}
