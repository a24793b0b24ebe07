use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::api::types::DeviceTier;
use crate::core::rng::Rng;
use crate::core::spatial::wrapped_distance_sq;
use crate::renderer::camera::Camera2D;
use crate::world::Bounce;

/// A capture device lying on the map, waiting to be picked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub tier: DeviceTier,
    pub pos: Vec2,
    pub bounce: Bounce,
}

/// Camera snapshot the visible set was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    center: Vec2,
    canvas: Vec2,
}

/// All collectibles on the map, plus a cache of the ones on screen.
pub struct CollectibleField {
    items: Vec<Collectible>,
    cap: usize,
    spawn_chance: f32,
    spawn_burst: usize,
    bounce_limit: f32,
    animation_margin: f32,
    visibility_margin: f32,
    refresh_distance: f32,
    visible: Vec<usize>,
    cache_key: Option<CacheKey>,
}

impl CollectibleField {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            items: Vec::with_capacity(config.collectible_cap),
            cap: config.collectible_cap,
            spawn_chance: config.collectible_spawn_chance,
            spawn_burst: config.collectible_spawn_burst,
            bounce_limit: config.collectible_bounce_limit,
            animation_margin: config.animation_margin,
            visibility_margin: config.visibility_margin,
            refresh_distance: config.visibility_refresh_distance,
            visible: Vec::new(),
            cache_key: None,
        }
    }

    /// Place one collectible at a uniform random position with a weighted
    /// random tier. Fails only when the field is at capacity.
    pub fn try_spawn_one(&mut self, rng: &mut Rng, world: Vec2) -> bool {
        if self.items.len() >= self.cap {
            return false;
        }
        let pos = rng.point_in(world);
        let tier = DeviceTier::ALL[rng.weighted_index(&DeviceTier::SPAWN_WEIGHTS)];
        let speed = rng.range_f32(0.1, 0.2);
        self.items.push(Collectible {
            tier,
            pos,
            bounce: Bounce::new(speed),
        });
        true
    }

    /// Scatter `count` collectibles (world creation).
    pub fn seed(&mut self, count: usize, rng: &mut Rng, world: Vec2) {
        for _ in 0..count {
            self.try_spawn_one(rng, world);
        }
    }

    /// Per-tick spawning and bounce animation near the camera.
    pub fn tick(&mut self, camera: &Camera2D, rng: &mut Rng) {
        if rng.chance(self.spawn_chance) && self.items.len() < self.cap {
            for _ in 0..self.spawn_burst {
                if !self.try_spawn_one(rng, camera.world) {
                    break;
                }
            }
        }

        for item in &mut self.items {
            if camera.is_near(item.pos, self.animation_margin) {
                item.bounce.step(self.bounce_limit);
            }
        }
    }

    /// Remove every collectible within `radius` of the player and return
    /// their tiers. Call once per tick, after movement.
    pub fn collect_near(&mut self, player: Vec2, world_width: f32, radius: f32) -> Vec<DeviceTier> {
        let radius_sq = radius * radius;
        let hits: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, c)| wrapped_distance_sq(player, c.pos, world_width) < radius_sq)
            .map(|(i, _)| i)
            .collect();

        if hits.is_empty() {
            return Vec::new();
        }

        let tiers = hits.iter().map(|&i| self.items[i].tier).collect();
        // Highest index first so earlier indices stay valid.
        for &i in hits.iter().rev() {
            self.items.remove(i);
        }
        self.invalidate_visible();
        tiers
    }

    /// Collectibles within the visible area plus margin.
    ///
    /// Recomputed only when the camera moved at least the refresh distance
    /// on either axis, the canvas was resized, or the field was invalidated.
    pub fn visible(&mut self, camera: &Camera2D) -> impl Iterator<Item = &Collectible> {
        if self.cache_is_stale(camera) {
            self.visible = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, c)| camera.is_near(c.pos, self.visibility_margin))
                .map(|(i, _)| i)
                .collect();
            self.cache_key = Some(CacheKey {
                center: camera.center,
                canvas: camera.canvas,
            });
        }
        let items = &self.items;
        self.visible.iter().filter_map(move |&i| items.get(i))
    }

    /// Force the next `visible` call to recompute.
    pub fn invalidate_visible(&mut self) {
        self.cache_key = None;
    }

    fn cache_is_stale(&self, camera: &Camera2D) -> bool {
        match self.cache_key {
            None => true,
            Some(key) => {
                let moved = (camera.center - key.center).abs();
                key.canvas != camera.canvas
                    || moved.x >= self.refresh_distance
                    || moved.y >= self.refresh_distance
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.items.iter()
    }

    /// Place a collectible directly. Respects the cap.
    pub fn insert(&mut self, tier: DeviceTier, pos: Vec2) -> bool {
        if self.items.len() >= self.cap {
            return false;
        }
        self.items.push(Collectible {
            tier,
            pos,
            bounce: Bounce::new(0.1),
        });
        true
    }
}
