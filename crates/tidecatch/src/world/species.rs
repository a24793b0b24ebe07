use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use crate::api::types::Rarity;
use crate::core::rng::Rng;

/// A catchable species. Static configuration, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// Unique name, also the key in the captured collection.
    pub name: String,
    pub rarity: Rarity,
    /// Logical sprite name in the asset manifest.
    pub sprite: String,
}

impl Species {
    pub fn new(name: impl Into<String>, rarity: Rarity, sprite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rarity,
            sprite: sprite.into(),
        }
    }
}

/// Index of a species within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeciesId(pub u16);

/// The fixed set of species that can appear in the wild.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    species: Vec<Species>,
}

impl SpeciesCatalog {
    /// Build a catalog. Rejects empty lists, lists too long for `SpeciesId`,
    /// duplicate names and any rarity without a species.
    pub fn new(species: Vec<Species>) -> Result<Self, GameError> {
        if species.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        if species.len() > usize::from(u16::MAX) + 1 {
            return Err(GameError::CatalogTooLarge(species.len()));
        }
        for rarity in Rarity::ALL {
            if !species.iter().any(|s| s.rarity == rarity) {
                return Err(GameError::EmptyTier(rarity));
            }
        }
        let mut seen = HashSet::with_capacity(species.len());
        for s in &species {
            if !seen.insert(s.name.as_str()) {
                return Err(GameError::DuplicateSpecies(s.name.clone()));
            }
        }
        Ok(Self { species })
    }

    /// Parse a catalog from a JSON array of species.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let species: Vec<Species> = serde_json::from_str(json)?;
        Self::new(species)
    }

    pub fn get(&self, id: SpeciesId) -> Option<&Species> {
        self.species.get(id.0 as usize)
    }

    pub fn find(&self, name: &str) -> Option<SpeciesId> {
        self.species
            .iter()
            .position(|s| s.name == name)
            .map(|i| SpeciesId(i as u16))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    /// Uniformly pick a species of the given rarity.
    /// Returns None when the catalog has no species of that rarity.
    pub fn pick(&self, rarity: Rarity, rng: &mut Rng) -> Option<SpeciesId> {
        let matching: Vec<usize> = self
            .species
            .iter()
            .enumerate()
            .filter(|(_, s)| s.rarity == rarity)
            .map(|(i, _)| i)
            .collect();
        if matching.is_empty() {
            return None;
        }
        let i = matching[rng.below(matching.len() as u32) as usize];
        Some(SpeciesId(i as u16))
    }
}

impl Default for SpeciesCatalog {
    /// The eight shore-dwelling species the game ships with.
    fn default() -> Self {
        let species = vec![
            Species::new("Carpling", Rarity::Common, "carpling"),
            Species::new("Jellydrift", Rarity::Common, "jellydrift"),
            Species::new("Finnet", Rarity::Common, "finnet"),
            Species::new("Starlet", Rarity::Common, "starlet"),
            Species::new("Sealpup", Rarity::Uncommon, "sealpup"),
            Species::new("Seahorn", Rarity::Uncommon, "seahorn"),
            Species::new("Shellvoyager", Rarity::Rare, "shellvoyager"),
            Species::new("Tidewyrm", Rarity::Rare, "tidewyrm"),
        ];
        Self { species }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_shape() {
        let catalog = SpeciesCatalog::default();
        assert_eq!(catalog.len(), 8);
        let count = |r| catalog.iter().filter(|s| s.rarity == r).count();
        assert_eq!(count(Rarity::Common), 4);
        assert_eq!(count(Rarity::Uncommon), 2);
        assert_eq!(count(Rarity::Rare), 2);
        assert!(SpeciesCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn pick_respects_rarity() {
        let catalog = SpeciesCatalog::default();
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            let id = catalog.pick(Rarity::Rare, &mut rng).unwrap();
            assert_eq!(catalog.get(id).unwrap().rarity, Rarity::Rare);
        }
    }

    #[test]
    fn rejects_catalog_with_empty_tier() {
        let only_common = vec![Species::new("Only", Rarity::Common, "only")];
        assert!(matches!(
            SpeciesCatalog::new(only_common),
            Err(GameError::EmptyTier(Rarity::Uncommon))
        ));
        let no_rare = vec![
            Species::new("Carpling", Rarity::Common, "carpling"),
            Species::new("Sealpup", Rarity::Uncommon, "sealpup"),
        ];
        assert!(matches!(SpeciesCatalog::new(no_rare), Err(GameError::EmptyTier(Rarity::Rare))));
    }

    #[test]
    fn rejects_catalog_past_id_range() {
        let rarities = Rarity::ALL.iter().cycle();
        let species: Vec<Species> = (0..=usize::from(u16::MAX) + 1)
            .zip(rarities)
            .map(|(i, &rarity)| Species::new(format!("s{}", i), rarity, "s"))
            .collect();
        assert!(matches!(
            SpeciesCatalog::new(species),
            Err(GameError::CatalogTooLarge(65537))
        ));
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let dup = vec![
            Species::new("Finnet", Rarity::Common, "a"),
            Species::new("Seahorn", Rarity::Uncommon, "b"),
            Species::new("Finnet", Rarity::Rare, "c"),
        ];
        assert!(matches!(
            SpeciesCatalog::new(dup),
            Err(GameError::DuplicateSpecies(name)) if name == "Finnet"
        ));
        assert!(matches!(SpeciesCatalog::new(Vec::new()), Err(GameError::EmptyCatalog)));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[
            { "name": "Carpling", "rarity": 1, "sprite": "carpling" },
            { "name": "Sealpup", "rarity": 2, "sprite": "sealpup" },
            { "name": "Tidewyrm", "rarity": 3, "sprite": "tidewyrm" }
        ]"#;
        let catalog = SpeciesCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("Tidewyrm"), Some(SpeciesId(2)));
        let bad_rarity = r#"[{ "name": "X", "rarity": 7, "sprite": "x" }]"#;
        assert!(SpeciesCatalog::from_json(bad_rarity).is_err());
    }
}
