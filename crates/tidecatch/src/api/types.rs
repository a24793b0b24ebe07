use serde::{Deserialize, Serialize};

use crate::api::error::GameError;

/// Capture-device tier. Map collectibles carry the same tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceTier {
    Normal,
    Super,
    Hyper,
}

impl DeviceTier {
    pub const ALL: [DeviceTier; 3] = [DeviceTier::Normal, DeviceTier::Super, DeviceTier::Hyper];

    /// Draw weights for newly spawned collectibles, in `ALL` order.
    pub const SPAWN_WEIGHTS: [f32; 3] = [0.70, 0.25, 0.05];

    pub fn index(self) -> usize {
        match self {
            DeviceTier::Normal => 0,
            DeviceTier::Super => 1,
            DeviceTier::Hyper => 2,
        }
    }

    /// Convert from the numeric code used across the wasm boundary.
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Multiplier applied to the base capture rate.
    pub fn capture_multiplier(self) -> f32 {
        match self {
            DeviceTier::Normal => 1.0,
            DeviceTier::Super => 1.5,
            DeviceTier::Hyper => 2.5,
        }
    }

    /// Player-facing name.
    pub fn label(self) -> &'static str {
        match self {
            DeviceTier::Normal => "Capture Ball",
            DeviceTier::Super => "Super Ball",
            DeviceTier::Hyper => "Hyper Ball",
        }
    }

    /// Logical sprite name in the asset manifest.
    pub fn sprite_name(self) -> &'static str {
        match self {
            DeviceTier::Normal => "ball_normal",
            DeviceTier::Super => "ball_super",
            DeviceTier::Hyper => "ball_hyper",
        }
    }
}

/// Species rarity. Controls both spawn weight and capture difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rarity {
    Common = 1,
    Uncommon = 2,
    Rare = 3,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    /// Draw weights for wild spawns, in `ALL` order.
    pub const SPAWN_WEIGHTS: [f32; 3] = [0.70, 0.25, 0.05];

    /// Divisor applied to the base capture rate.
    pub fn capture_divisor(self) -> f32 {
        self as u8 as f32
    }
}

impl TryFrom<u8> for Rarity {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rarity::Common),
            2 => Ok(Rarity::Uncommon),
            3 => Ok(Rarity::Rare),
            other => Err(GameError::InvalidRarity(other)),
        }
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> u8 {
        rarity as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_round_trips_through_code() {
        for tier in DeviceTier::ALL {
            assert_eq!(DeviceTier::from_u32(tier.index() as u32), Some(tier));
        }
        assert_eq!(DeviceTier::from_u32(3), None);
    }

    #[test]
    fn weights_sum_to_one() {
        let tiers: f32 = DeviceTier::SPAWN_WEIGHTS.iter().sum();
        let rarities: f32 = Rarity::SPAWN_WEIGHTS.iter().sum();
        assert!((tiers - 1.0).abs() < 1e-6);
        assert!((rarities - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rarity_rejects_out_of_range() {
        assert_eq!(Rarity::try_from(2).ok(), Some(Rarity::Uncommon));
        assert!(Rarity::try_from(0).is_err());
        assert!(Rarity::try_from(4).is_err());
        assert_eq!(Rarity::Rare.capture_divisor(), 3.0);
    }

    #[test]
    fn tier_parses_lowercase() {
        let tier: DeviceTier = serde_json::from_str("\"hyper\"").unwrap();
        assert_eq!(tier, DeviceTier::Hyper);
    }
}
