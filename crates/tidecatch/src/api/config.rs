use glam::Vec2;
use serde::Deserialize;

use crate::api::error::GameError;

/// Tunables for the world simulation.
///
/// Every field has a default matching the shipped game; a JSON override
/// only needs the fields it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in world units. The horizontal axis wraps at this width.
    pub world_width: f32,
    /// World height in world units.
    pub world_height: f32,
    /// Player movement per tick.
    pub player_speed: f32,
    /// Zoom multiplier applied on top of canvas-height / world-height.
    pub zoom: f32,
    /// Fixed simulation step in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for the simulation RNG.
    pub seed: u64,

    /// Maximum collectibles on the map at once.
    pub collectible_cap: usize,
    /// Collectibles scattered when the world is created.
    pub collectible_seed_count: usize,
    /// Per-tick probability of a collectible spawn burst.
    pub collectible_spawn_chance: f32,
    /// Collectibles attempted per burst.
    pub collectible_spawn_burst: usize,
    /// Pickup radius around the player.
    pub pickup_radius: f32,
    /// Bounce phase at which a collectible reverses.
    pub collectible_bounce_limit: f32,

    /// Maximum wild creatures on the map at once.
    pub wild_cap: usize,
    /// Per-tick probability of a wild spawn attempt.
    pub wild_spawn_chance: f32,
    /// Minimum simulated time between two wild spawns.
    pub wild_spawn_interval_ms: u64,
    /// Lifetime of a wild creature from spawn.
    pub wild_lifetime_ms: u64,
    /// Wild creature movement per tick.
    pub wild_speed: f32,
    /// Bounce phase at which a wild creature reverses.
    pub wild_bounce_limit: f32,
    /// Shortest wander interval in ticks.
    pub wild_turn_min_ticks: i32,
    /// Random extra ticks added to the wander interval, exclusive.
    pub wild_turn_jitter_ticks: u32,
    /// Probability that a wander change means standing still.
    pub wild_stop_chance: f32,
    /// Distance at which touching a wild creature starts an encounter.
    pub encounter_radius: f32,

    /// Margin around the visible area for the draw culling pass.
    pub visibility_margin: f32,
    /// Margin around the visible area for per-tick bounce updates.
    pub animation_margin: f32,
    /// Camera travel that invalidates the visible-collectible cache.
    pub visibility_refresh_distance: f32,

    /// Simulated time spent on the loading screen.
    pub loading_grace_ms: u64,
    /// Status text outside an encounter hides after this long.
    pub status_hide_ms: u64,
    /// Capacity of the per-frame draw buffer.
    pub max_draw_instances: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 8192.0,
            world_height: 4096.0,
            player_speed: 6.0,
            zoom: 3.0,
            fixed_dt: 1.0 / 60.0,
            seed: 0x5eed_71de,
            collectible_cap: 300,
            collectible_seed_count: 150,
            collectible_spawn_chance: 0.15,
            collectible_spawn_burst: 3,
            pickup_radius: 60.0,
            collectible_bounce_limit: 3.0,
            wild_cap: 20,
            wild_spawn_chance: 0.08,
            wild_spawn_interval_ms: 750,
            wild_lifetime_ms: 15_000,
            wild_speed: 0.3,
            wild_bounce_limit: 5.0,
            wild_turn_min_ticks: 60,
            wild_turn_jitter_ticks: 120,
            wild_stop_chance: 0.2,
            encounter_radius: 40.0,
            visibility_margin: 50.0,
            animation_margin: 100.0,
            visibility_refresh_distance: 20.0,
            loading_grace_ms: 2000,
            status_hide_ms: 3000,
            max_draw_instances: 1024,
        }
    }
}

impl WorldConfig {
    /// Parse a config override from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            (self.world_width, "world_width must be positive"),
            (self.world_height, "world_height must be positive"),
            (self.zoom, "zoom must be positive"),
            (self.fixed_dt, "fixed_dt must be positive"),
            (self.pickup_radius, "pickup_radius must be positive"),
            (self.encounter_radius, "encounter_radius must be positive"),
        ];
        for (value, message) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(message));
            }
        }

        let non_negative = [
            (self.player_speed, "player_speed must not be negative"),
            (self.wild_speed, "wild_speed must not be negative"),
            (self.collectible_bounce_limit, "collectible_bounce_limit must not be negative"),
            (self.wild_bounce_limit, "wild_bounce_limit must not be negative"),
            (self.visibility_margin, "visibility_margin must not be negative"),
            (self.animation_margin, "animation_margin must not be negative"),
            (self.visibility_refresh_distance, "visibility_refresh_distance must not be negative"),
        ];
        for (value, message) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidConfig(message));
            }
        }

        let chances = [
            (self.collectible_spawn_chance, "collectible_spawn_chance must be in 0..=1"),
            (self.wild_spawn_chance, "wild_spawn_chance must be in 0..=1"),
            (self.wild_stop_chance, "wild_stop_chance must be in 0..=1"),
        ];
        for (value, message) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidConfig(message));
            }
        }

        let counts = [
            (self.collectible_cap, "collectible_cap must be positive"),
            (self.wild_cap, "wild_cap must be positive"),
            (self.max_draw_instances, "max_draw_instances must be positive"),
        ];
        for (value, message) in counts {
            if value == 0 {
                return Err(GameError::InvalidConfig(message));
            }
        }

        if self.wild_turn_min_ticks < 1 {
            return Err(GameError::InvalidConfig("wild_turn_min_ticks must be at least 1"));
        }
        Ok(())
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}
