use crate::api::types::DeviceTier;
use crate::world::species::Species;

/// Capture devices held by the player, per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: [u32; 3],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, tier: DeviceTier) -> u32 {
        self.counts[tier.index()]
    }

    /// Add one device of `tier` (a map pickup).
    pub fn credit(&mut self, tier: DeviceTier) {
        self.counts[tier.index()] += 1;
    }

    /// Remove one device of `tier`. Returns false, leaving the count
    /// untouched, when none are left.
    pub fn debit(&mut self, tier: DeviceTier) -> bool {
        let slot = &mut self.counts[tier.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// Species the player has caught, in first-capture order.
/// A species appears at most once no matter how often it is caught.
#[derive(Debug, Clone, Default)]
pub struct CapturedCollection {
    species: Vec<Species>,
}

impl CapturedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a capture. Returns true if the species was not owned yet.
    pub fn insert(&mut self, species: &Species) -> bool {
        if self.has(&species.name) {
            return false;
        }
        self.species.push(species.clone());
        true
    }

    pub fn has(&self, name: &str) -> bool {
        self.species.iter().any(|s| s.name == name)
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
}
