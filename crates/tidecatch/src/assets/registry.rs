use std::collections::HashMap;

use crate::api::error::GameError;
use crate::assets::manifest::AssetManifest;

/// Numeric sprite id carried in the draw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Load state of one image, as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Ready,
    Failed,
}

struct Entry {
    name: String,
    path: String,
    state: AssetState,
}

/// Registry of named sprites, built from an AssetManifest.
/// Assigns ids and tracks readiness. Sprites that are not ready are simply
/// not drawn.
pub struct AssetRegistry {
    entries: Vec<Entry>,
    by_name: HashMap<String, SpriteId>,
}

impl AssetRegistry {
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut entries = Vec::with_capacity(manifest.sprites.len());
        let mut by_name = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            by_name.insert(name.clone(), SpriteId(entries.len() as u32));
            entries.push(Entry {
                name: name.clone(),
                path: desc.path.clone(),
                state: AssetState::Pending,
            });
        }
        Self { entries, by_name }
    }

    pub fn id(&self, name: &str) -> Option<SpriteId> {
        self.by_name.get(name).copied()
    }

    /// Like `id`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<SpriteId, GameError> {
        self.id(name)
            .ok_or_else(|| GameError::UnknownSprite(name.to_string()))
    }

    pub fn name(&self, id: SpriteId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.name.as_str())
    }

    pub fn path(&self, id: SpriteId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    pub fn state(&self, id: SpriteId) -> Option<AssetState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    pub fn is_ready(&self, id: SpriteId) -> bool {
        self.state(id) == Some(AssetState::Ready)
    }

    /// Resolve a name to an id only if its image is loaded.
    pub fn ready(&self, name: &str) -> Option<SpriteId> {
        self.id(name).filter(|id| self.is_ready(*id))
    }

    pub fn mark_loaded(&mut self, id: SpriteId) -> bool {
        match self.entries.get_mut(id.0 as usize) {
            Some(entry) => {
                entry.state = AssetState::Ready;
                log::debug!("sprite {} loaded", entry.name);
                true
            }
            None => false,
        }
    }

    /// A failed image stays undrawn for the rest of the session.
    pub fn mark_failed(&mut self, id: SpriteId) -> bool {
        match self.entries.get_mut(id.0 as usize) {
            Some(entry) => {
                entry.state = AssetState::Failed;
                log::warn!("failed to load sprite {} from {}", entry.name, entry.path);
                true
            }
            None => false,
        }
    }

    /// Number of images that are no longer pending.
    pub fn settled(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state != AssetState::Pending)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
