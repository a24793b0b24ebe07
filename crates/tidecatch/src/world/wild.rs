use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::api::types::Rarity;
use crate::core::rng::Rng;
use crate::core::spatial::wrapped_distance_sq;
use crate::world::species::{SpeciesCatalog, SpeciesId};
use crate::world::Bounce;

/// The four cardinal headings a wandering creature can pick.
const HEADINGS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

/// A creature roaming the map until it expires or is encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct WildCreature {
    pub species: SpeciesId,
    pub pos: Vec2,
    /// Unit cardinal direction, or zero when standing still.
    pub heading: Vec2,
    /// Ticks until the next heading choice.
    pub move_timer: i32,
    /// Simulated time after which the creature leaves.
    pub despawn_at_ms: u64,
    pub bounce: Bounce,
}

pub struct WildField {
    creatures: Vec<WildCreature>,
    last_spawn_ms: Option<u64>,
    cap: usize,
    spawn_chance: f32,
    spawn_interval_ms: u64,
    lifetime_ms: u64,
    speed: f32,
    bounce_limit: f32,
    turn_min_ticks: i32,
    turn_jitter_ticks: u32,
    stop_chance: f32,
}

impl WildField {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            creatures: Vec::with_capacity(config.wild_cap),
            last_spawn_ms: None,
            cap: config.wild_cap,
            spawn_chance: config.wild_spawn_chance,
            spawn_interval_ms: config.wild_spawn_interval_ms,
            lifetime_ms: config.wild_lifetime_ms,
            speed: config.wild_speed,
            bounce_limit: config.wild_bounce_limit,
            turn_min_ticks: config.wild_turn_min_ticks,
            turn_jitter_ticks: config.wild_turn_jitter_ticks,
            stop_chance: config.wild_stop_chance,
        }
    }

    /// Spawn one creature if the field has room and the spawn interval has
    /// passed. The species is drawn by rarity weight, then uniformly
    /// within that rarity.
    pub fn try_spawn(
        &mut self,
        now_ms: u64,
        rng: &mut Rng,
        catalog: &SpeciesCatalog,
        world: Vec2,
    ) -> bool {
        if self.creatures.len() >= self.cap {
            return false;
        }
        if let Some(last) = self.last_spawn_ms {
            if now_ms.saturating_sub(last) < self.spawn_interval_ms {
                return false;
            }
        }

        let rarity = Rarity::ALL[rng.weighted_index(&Rarity::SPAWN_WEIGHTS)];
        let Some(species) = catalog.pick(rarity, rng) else {
            log::debug!("no species of rarity {:?} to spawn", rarity);
            return false;
        };
        let pos = rng.point_in(world);
        let speed = rng.range_f32(0.05, 0.1);
        self.creatures.push(WildCreature {
            species,
            pos,
            heading: Vec2::ZERO,
            move_timer: 0,
            despawn_at_ms: now_ms.saturating_add(self.lifetime_ms),
            bounce: Bounce::new(speed),
        });
        self.last_spawn_ms = Some(now_ms);
        true
    }

    /// Spawn roll, expiry, bounce and wandering for one tick.
    pub fn tick(&mut self, now_ms: u64, rng: &mut Rng, catalog: &SpeciesCatalog, world: Vec2) {
        if rng.chance(self.spawn_chance) {
            self.try_spawn(now_ms, rng, catalog, world);
        }

        self.creatures.retain(|c| now_ms <= c.despawn_at_ms);

        for creature in &mut self.creatures {
            creature.bounce.step(self.bounce_limit);

            creature.move_timer -= 1;
            if creature.move_timer <= 0 {
                let jitter = rng.below(self.turn_jitter_ticks) as i32;
                creature.move_timer = self.turn_min_ticks + jitter;
                creature.heading = if rng.chance(self.stop_chance) {
                    Vec2::ZERO
                } else {
                    HEADINGS[rng.below(HEADINGS.len() as u32) as usize]
                };
            }

            // Clamped on both axes, unlike the player who wraps horizontally.
            creature.pos = (creature.pos + creature.heading * self.speed).clamp(Vec2::ZERO, world);
        }
    }

    /// Remove and return the earliest-spawned creature within `radius` of
    /// the player, if any.
    pub fn take_colliding(
        &mut self,
        player: Vec2,
        world_width: f32,
        radius: f32,
    ) -> Option<WildCreature> {
        let radius_sq = radius * radius;
        let index = self
            .creatures
            .iter()
            .position(|c| wrapped_distance_sq(player, c.pos, world_width) < radius_sq)?;
        Some(self.creatures.remove(index))
    }

    /// Place a creature directly. Respects the cap but not the spawn interval.
    pub fn insert(&mut self, creature: WildCreature) -> bool {
        if self.creatures.len() >= self.cap {
            return false;
        }
        self.creatures.push(creature);
        true
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WildCreature> {
        self.creatures.iter()
    }
}
