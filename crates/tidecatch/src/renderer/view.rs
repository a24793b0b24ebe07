//! Frame building: world state to draw instances and text labels.
//!
//! Every layer is drawn from world state plus the camera. A sprite whose
//! image is not loaded yet is skipped for the frame; nothing here waits
//! on assets.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::Serialize;

use crate::api::error::GameError;
use crate::assets::manifest::{MAP_SPRITE, PLAYER_SPRITE};
use crate::assets::registry::AssetRegistry;
use crate::encounter::capture::{CaptureAnimation, CapturePhase};
use crate::encounter::ledger::CapturedCollection;
use crate::encounter::EncounterMachine;
use crate::renderer::camera::Camera2D;
use crate::renderer::instance::{DrawBuffer, DrawInstance};
use crate::renderer::layer::DrawLayer;
use crate::world::collectibles::CollectibleField;
use crate::world::player::Player;
use crate::world::species::SpeciesCatalog;
use crate::world::wild::WildField;

pub const MAP_TILE_SIZE: f32 = 1024.0;
pub const COLLECTIBLE_PX: f32 = 32.0;
pub const WILD_PX: f32 = 56.0;
pub const PLAYER_FRAME_PX: f32 = 32.0;
pub const PLAYER_SCALE: f32 = 2.2;
pub const SIDEBAR_PX: f32 = 80.0;
pub const SIDEBAR_RIGHT_INSET: f32 = 110.0;
pub const SIDEBAR_TOP: f32 = 100.0;
pub const SIDEBAR_SPACING: f32 = 85.0;
/// Sidebar bob phase advance per frame.
pub const SIDEBAR_BOB_STEP: f32 = 0.03;
pub const ENCOUNTER_PX: f32 = 168.0;
pub const DEVICE_PX: f32 = 32.0;
const SPARKLES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// A line of text the canvas renderer draws on top of the sprites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Font size in pixels.
    pub size: f32,
    pub align: TextAlign,
}

/// Everything drawn in one frame.
pub struct Frame {
    pub buffer: DrawBuffer,
    pub labels: Vec<TextLabel>,
    /// Number of registered sprites. Sprite ids at or above it are rejected.
    sprite_limit: Option<u32>,
}

impl Frame {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: DrawBuffer::new(capacity),
            labels: Vec::new(),
            sprite_limit: None,
        }
    }

    pub fn with_sprite_limit(mut self, count: u32) -> Self {
        self.sprite_limit = Some(count);
        self
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.labels.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) -> Result<(), GameError> {
        if let Some(count) = self.sprite_limit {
            // Negative ids are fill and sparkle sentinels.
            if instance.sprite >= 0.0 && instance.sprite as u32 >= count {
                return Err(GameError::SpriteOutOfRange {
                    id: instance.sprite as u32,
                    count,
                });
            }
        }
        self.buffer.push(instance)
    }

    pub fn label(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign) {
        self.labels.push(TextLabel {
            text: text.into(),
            x: pos.x,
            y: pos.y,
            size,
            align,
        });
    }

    /// Labels as a JSON array for the web bridge.
    pub fn labels_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.labels)?)
    }
}

/// Read-only inputs shared by every layer of a running frame.
pub struct SceneView<'a> {
    pub camera: &'a Camera2D,
    pub assets: &'a AssetRegistry,
    pub now_ms: u64,
}

impl<'a> SceneView<'a> {
    /// Map tiles covering the visible area, then the visible collectibles.
    pub fn draw_map(
        &self,
        frame: &mut Frame,
        collectibles: &mut CollectibleField,
    ) -> Result<(), GameError> {
        let cam = self.camera;
        let Some(map) = self.assets.ready(MAP_SPRITE) else {
            return frame.push(DrawInstance::fill(DrawLayer::Map, cam.canvas, 1.0));
        };

        let scale = cam.scale();
        let half = cam.half_extents();
        let start = ((cam.center - half) / MAP_TILE_SIZE).floor();
        let end = ((cam.center + half) / MAP_TILE_SIZE).ceil();
        let tile_px = MAP_TILE_SIZE * scale;

        for ty in start.y as i32..=end.y as i32 {
            for tx in start.x as i32..=end.x as i32 {
                let origin = Vec2::new(tx as f32, ty as f32) * MAP_TILE_SIZE;
                let src = Vec2::new(
                    origin.x.rem_euclid(cam.world.x),
                    origin.y.rem_euclid(cam.world.y),
                );
                let size = Vec2::new(
                    MAP_TILE_SIZE.min(cam.world.x - src.x),
                    MAP_TILE_SIZE.min(cam.world.y - src.y),
                );
                if size.x <= 0.0 || size.y <= 0.0 {
                    continue;
                }
                let top_left = (origin - cam.center) * scale + cam.canvas / 2.0;
                let px = size * scale;
                let center = top_left + px / 2.0;
                if !cam.is_on_screen(center, tile_px) {
                    continue;
                }
                let tile = DrawInstance::sprite(DrawLayer::Map, map, center, px)
                    .with_source(src.x, src.y, size.x, size.y);
                frame.push(tile)?;
            }
        }

        for item in collectibles.visible(cam) {
            let Some(id) = self.assets.ready(item.tier.sprite_name()) else {
                continue;
            };
            let screen = cam.world_to_screen(item.pos) + Vec2::new(0.0, item.bounce.phase);
            if cam.is_on_screen(screen, COLLECTIBLE_PX) {
                frame.push(DrawInstance::sprite(
                    DrawLayer::Map,
                    id,
                    screen,
                    Vec2::splat(COLLECTIBLE_PX),
                ))?;
            }
        }
        Ok(())
    }

    pub fn draw_wild(
        &self,
        frame: &mut Frame,
        wild: &WildField,
        catalog: &SpeciesCatalog,
        margin: f32,
    ) -> Result<(), GameError> {
        let cam = self.camera;
        for creature in wild.iter() {
            if !cam.is_near(creature.pos, margin) {
                continue;
            }
            let Some(id) = catalog
                .get(creature.species)
                .and_then(|s| self.assets.ready(&s.sprite))
            else {
                continue;
            };
            let screen = cam.world_to_screen(creature.pos) + Vec2::new(0.0, creature.bounce.phase);
            if cam.is_on_screen(screen, WILD_PX) {
                let size = Vec2::splat(WILD_PX);
                frame.push(DrawInstance::sprite(DrawLayer::Wild, id, screen, size))?;
            }
        }
        Ok(())
    }

    /// The player always sits at the canvas center.
    pub fn draw_player(&self, frame: &mut Frame, player: &Player) -> Result<(), GameError> {
        let Some(id) = self.assets.ready(PLAYER_SPRITE) else {
            return Ok(());
        };
        let center = self.camera.canvas / 2.0;
        let size = Vec2::splat(PLAYER_FRAME_PX * PLAYER_SCALE);
        let inst = DrawInstance::sprite(DrawLayer::Player, id, center, size)
            .with_source(
                player.frame as f32 * PLAYER_FRAME_PX,
                player.facing.row() as f32 * PLAYER_FRAME_PX,
                PLAYER_FRAME_PX,
                PLAYER_FRAME_PX,
            );
        frame.push(inst)
    }

    /// Captured species down the right edge, each bobbing out of phase,
    /// with a "captured / total" counter underneath.
    pub fn draw_sidebar(
        &self,
        frame: &mut Frame,
        collection: &CapturedCollection,
        total: usize,
        bob_phase: f32,
    ) -> Result<(), GameError> {
        if collection.is_empty() {
            return Ok(());
        }
        let left = self.camera.canvas.x - SIDEBAR_RIGHT_INSET;
        for (i, species) in collection.iter().enumerate() {
            let Some(id) = self.assets.ready(&species.sprite) else {
                continue;
            };
            let bob = (bob_phase + i as f32 * 0.5).sin() * 5.0;
            let top = SIDEBAR_TOP + i as f32 * SIDEBAR_SPACING + bob;
            let center = Vec2::new(left, top) + Vec2::splat(SIDEBAR_PX / 2.0);
            let size = Vec2::splat(SIDEBAR_PX);
            frame.push(DrawInstance::sprite(DrawLayer::Sidebar, id, center, size))?;
        }
        let counter_y = SIDEBAR_TOP + collection.len() as f32 * SIDEBAR_SPACING + 10.0;
        frame.label(
            format!("{} / {}", collection.len(), total),
            Vec2::new(left - 10.0, counter_y),
            18.0,
            TextAlign::Left,
        );
        Ok(())
    }

    /// Dark backdrop, the encountered species and the thrown device.
    pub fn draw_encounter(
        &self,
        frame: &mut Frame,
        encounter: &EncounterMachine,
    ) -> Result<(), GameError> {
        let Some(species) = encounter.species() else {
            return Ok(());
        };
        let canvas = self.camera.canvas;
        frame.push(DrawInstance::fill(DrawLayer::Encounter, canvas, 0.7))?;

        let Some(species_id) = self.assets.ready(&species.sprite) else {
            return Ok(());
        };
        let ms = self.now_ms as f32;
        let top = canvas.y / 2.0 - 100.0;
        let bob = (ms * 0.003).sin() * 5.0;
        let target = Vec2::new(canvas.x / 2.0, top + ENCOUNTER_PX / 2.0);
        let animation = encounter.animation();

        let visible = match animation.map(CaptureAnimation::phase) {
            None | Some(CapturePhase::Throw) => true,
            Some(CapturePhase::Shake) => (self.now_ms / 150) % 2 == 0,
            Some(CapturePhase::Reveal) => false,
        };
        if visible {
            frame.push(DrawInstance::sprite(
                DrawLayer::Encounter,
                species_id,
                target + Vec2::new(0.0, bob),
                Vec2::splat(ENCOUNTER_PX),
            ))?;
        }

        let Some(animation) = animation else {
            return Ok(());
        };
        let Some(device_id) = self.assets.ready(animation.tier.sprite_name()) else {
            return Ok(());
        };
        let size = Vec2::splat(DEVICE_PX);

        if animation.phase() == CapturePhase::Throw {
            let (pos, rotation) = throw_arc(animation.progress, canvas, target);
            let device = DrawInstance::sprite(DrawLayer::Encounter, device_id, pos, size);
            return frame.push(device.with_rotation(rotation));
        }

        let shake = if animation.phase() == CapturePhase::Shake {
            shake_offset(animation)
        } else {
            0.0
        };
        let jitter = (ms * 0.01).sin() * 2.0;
        frame.push(DrawInstance::sprite(
            DrawLayer::Encounter,
            device_id,
            target + Vec2::new(shake, jitter),
            size,
        ))?;

        if animation.phase() == CapturePhase::Reveal && animation.succeeded {
            for i in 0..SPARKLES {
                let angle = i as f32 / SPARKLES as f32 * TAU + ms * 0.003;
                let distance = 20.0 + (ms * 0.01 + i as f32).sin() * 5.0;
                let pos = target + Vec2::from_angle(angle) * distance;
                frame.push(DrawInstance::sparkle(DrawLayer::Encounter, pos, 2.0))?;
            }
        }
        Ok(())
    }
}

/// Device position and spin along the throw arc, for throw progress in
/// [0, 0.25).
pub fn throw_arc(progress: f32, canvas: Vec2, target: Vec2) -> (Vec2, f32) {
    let p = (progress * 4.0).clamp(0.0, 1.0);
    let start = Vec2::new(canvas.x / 2.0 - 150.0, canvas.y - 150.0);
    let along = start.lerp(target, p);
    let pos = Vec2::new(along.x, along.y - 250.0 * (p * PI).sin());
    (pos, p * PI * 4.0)
}

/// Horizontal wobble of the device during the shake phase. Fades as more
/// shakes are revealed.
pub fn shake_offset(animation: &CaptureAnimation) -> f32 {
    let phase = (animation.shake_progress() * 10.0).fract();
    let fade = (1.0 - animation.current_shake as f32 / 3.0).max(0.0);
    (phase * TAU).sin() * 10.0 * fade
}

/// Play timer at the top center.
pub fn draw_hud(frame: &mut Frame, canvas: Vec2, play_time: &str) {
    frame.label(play_time, Vec2::new(canvas.x / 2.0, 30.0), 20.0, TextAlign::Center);
}

/// Loading screen: backdrop, title and a bar filled to `progress`.
pub fn draw_loading(frame: &mut Frame, canvas: Vec2, progress: f32) -> Result<(), GameError> {
    frame.push(DrawInstance::fill(DrawLayer::Hud, canvas, 1.0))?;
    let center = canvas / 2.0;
    frame.label("Loading...", center - Vec2::new(0.0, 30.0), 24.0, TextAlign::Center);
    frame.label(
        format!("{}%", (progress.clamp(0.0, 1.0) * 100.0).round() as u32),
        center + Vec2::new(0.0, 40.0),
        16.0,
        TextAlign::Center,
    );
    Ok(())
}

/// Terminal error screen.
pub fn draw_error(frame: &mut Frame, canvas: Vec2, message: &str) -> Result<(), GameError> {
    frame.push(DrawInstance::fill(DrawLayer::Hud, canvas, 1.0))?;
    let center = canvas / 2.0;
    frame.label("Error!", center - Vec2::new(0.0, 40.0), 28.0, TextAlign::Center);
    frame.label(message, center, 16.0, TextAlign::Center);
    frame.label(
        "Reload the page to try again.",
        center + Vec2::new(0.0, 40.0),
        16.0,
        TextAlign::Center,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::WorldConfig;
    use crate::api::types::{DeviceTier, Rarity};
    use crate::api::ui::UiState;
    use crate::assets::manifest::AssetManifest;
    use crate::assets::registry::SpriteId;
    use crate::core::rng::Rng;
    use crate::encounter::ledger::Inventory;
    use crate::renderer::instance::{FILL_SPRITE, SPARKLE_SPRITE};
    use crate::world::species::Species;

    const WORLD: Vec2 = Vec2::new(8192.0, 4096.0);

    fn camera() -> Camera2D {
        let mut cam = Camera2D::new(WORLD, 3.0);
        cam.resize(1024.0, 768.0);
        cam.look_at(Vec2::new(2000.0, 2000.0));
        cam
    }

    fn loaded_assets() -> AssetRegistry {
        let manifest = AssetManifest::for_catalog(&SpeciesCatalog::default());
        let mut reg = AssetRegistry::from_manifest(&manifest);
        for i in 0..reg.len() as u32 {
            reg.mark_loaded(SpriteId(i));
        }
        reg
    }

    fn layer_of(inst: &DrawInstance) -> Option<DrawLayer> {
        DrawLayer::from_u8(inst.layer as u8)
    }

    #[test]
    fn map_without_image_is_black() {
        let cam = camera();
        let manifest = AssetManifest::for_catalog(&SpeciesCatalog::default());
        let reg = AssetRegistry::from_manifest(&manifest);
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(64);
        let mut field = CollectibleField::new(&WorldConfig::default());
        field.insert(DeviceTier::Normal, cam.center);
        view.draw_map(&mut frame, &mut field).unwrap();
        assert_eq!(frame.buffer.instance_count(), 1);
        assert_eq!(frame.buffer.instances()[0].sprite, FILL_SPRITE);
    }

    #[test]
    fn tiles_cover_canvas_and_wrap_source() {
        let mut cam = camera();
        cam.look_at(Vec2::new(100.0, 2000.0));
        let reg = loaded_assets();
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(64);
        let mut field = CollectibleField::new(&WorldConfig::default());
        view.draw_map(&mut frame, &mut field).unwrap();
        let tiles = frame.buffer.instances();
        assert!(!tiles.is_empty());
        for t in tiles {
            assert!(t.src_x >= 0.0 && t.src_x < WORLD.x);
            assert!(t.src_w > 0.0 && t.src_w <= MAP_TILE_SIZE);
        }
        // Left of the seam the source comes from the far end of the image.
        assert!(tiles.iter().any(|t| t.src_x == WORLD.x - MAP_TILE_SIZE));
    }

    #[test]
    fn unloaded_sprites_are_skipped() {
        let cam = camera();
        let manifest = AssetManifest::for_catalog(&SpeciesCatalog::default());
        let mut reg = AssetRegistry::from_manifest(&manifest);
        if let Some(id) = reg.id("map") {
            reg.mark_loaded(id);
        }
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(64);
        let mut field = CollectibleField::new(&WorldConfig::default());
        field.insert(DeviceTier::Hyper, cam.center + Vec2::new(10.0, 0.0));
        view.draw_map(&mut frame, &mut field).unwrap();
        let hyper = reg.id("ball_hyper").map(|id| id.0 as f32);
        assert!(frame.buffer.instances().iter().all(|i| Some(i.sprite) != hyper));

        view.draw_player(&mut frame, &Player::new(cam.center)).unwrap();
        assert!(frame.buffer.instances().iter().all(|i| layer_of(i) != Some(DrawLayer::Player)));
    }

    #[test]
    fn collectible_drawn_at_wrapped_screen_position() {
        let mut cam = camera();
        cam.look_at(Vec2::new(16.0, 500.0));
        let reg = loaded_assets();
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(256);
        let mut field = CollectibleField::new(&WorldConfig::default());
        field.insert(DeviceTier::Super, Vec2::new(8150.0, 500.0));
        view.draw_map(&mut frame, &mut field).unwrap();
        let sup = reg.id("ball_super").map(|id| id.0 as f32);
        let ball = frame.buffer.instances().iter().find(|i| Some(i.sprite) == sup).copied();
        let ball = ball.expect("collectible should be drawn");
        assert!((ball.x - (512.0 - 58.0 * cam.scale())).abs() < 1e-3);
        assert_eq!(ball.width, COLLECTIBLE_PX);
    }

    #[test]
    fn player_uses_facing_row_and_frame_column() {
        let cam = camera();
        let reg = loaded_assets();
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(8);
        let mut player = Player::new(cam.center);
        player.set_intent(crate::world::player::MoveIntent::Up);
        for _ in 0..16 {
            player.step(6.0, WORLD);
        }
        view.draw_player(&mut frame, &player).unwrap();
        let inst = frame.buffer.instances()[0];
        assert_eq!((inst.x, inst.y), (512.0, 384.0));
        assert_eq!((inst.src_x, inst.src_y), (32.0, 96.0));
        assert!((inst.width - 70.4).abs() < 1e-4);
    }

    #[test]
    fn sidebar_lists_captures_with_counter() {
        let cam = camera();
        let reg = loaded_assets();
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(8);
        let mut collection = CapturedCollection::new();
        collection.insert(&Species::new("Finnet", Rarity::Common, "finnet"));
        collection.insert(&Species::new("Seahorn", Rarity::Uncommon, "seahorn"));
        view.draw_sidebar(&mut frame, &collection, 8, 0.0).unwrap();
        let items = frame.buffer.instances();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].x, 1024.0 - 110.0 + 40.0);
        assert_eq!(items[0].y, 140.0);
        assert_eq!(frame.labels[0].text, "2 / 8");
    }

    #[test]
    fn encounter_overlay_throw_then_sparkles() {
        let cam = camera();
        let reg = loaded_assets();
        let mut ui = UiState::new();
        let mut m = EncounterMachine::new();
        m.activate(Species::new("Tidewyrm", Rarity::Rare, "tidewyrm"), &mut ui);
        let mut inv = Inventory::new();
        inv.credit(DeviceTier::Hyper);
        m.use_device(DeviceTier::Hyper, &mut inv, &mut Rng::new(1), &mut ui);

        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(32);
        view.draw_encounter(&mut frame, &m).unwrap();
        let first = frame.buffer.instances()[0];
        assert_eq!(first.sprite, FILL_SPRITE);
        assert!((first.alpha - 0.7).abs() < 1e-6);
        // Backdrop, species, device at the start of its arc.
        assert_eq!(frame.buffer.instance_count(), 3);
        let device = frame.buffer.instances()[2];
        assert_eq!((device.x, device.y), (512.0 - 150.0, 768.0 - 150.0));

        let mut collection = CapturedCollection::new();
        for _ in 0..150 {
            m.advance(1, &mut collection, &mut ui);
        }
        frame.clear();
        view.draw_encounter(&mut frame, &m).unwrap();
        let sparkles = frame
            .buffer
            .instances()
            .iter()
            .filter(|i| i.sprite == SPARKLE_SPRITE)
            .count();
        assert_eq!(sparkles, 8);
    }

    #[test]
    fn shake_fades_with_revealed_shakes() {
        let mut anim = CaptureAnimation::new(DeviceTier::Normal, 3);
        anim.progress = 0.25 + 0.6 * 0.025;
        anim.current_shake = 3;
        assert_eq!(shake_offset(&anim), 0.0);
        anim.current_shake = 0;
        assert!((shake_offset(&anim) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn throw_arc_endpoints() {
        let canvas = Vec2::new(1024.0, 768.0);
        let target = Vec2::new(512.0, 368.0);
        let (start, rot) = throw_arc(0.0, canvas, target);
        assert_eq!(start, Vec2::new(362.0, 618.0));
        assert_eq!(rot, 0.0);
        let (mid, _) = throw_arc(0.125, canvas, target);
        assert!(mid.y < 368.0);
        let (end, _) = throw_arc(0.25, canvas, target);
        assert!((end - target).length() < 1e-3);
    }

    #[test]
    fn error_screen_has_three_lines() {
        let mut frame = Frame::new(4);
        draw_error(&mut frame, Vec2::new(800.0, 600.0), "boom").unwrap();
        let lines: Vec<&str> = frame.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(lines, vec!["Error!", "boom", "Reload the page to try again."]);
        let json = frame.labels_json().unwrap();
        assert!(json.contains("\"align\":\"center\""));
    }

    #[test]
    fn overflowing_buffer_fails_the_frame() {
        let cam = camera();
        let reg = loaded_assets();
        let view = SceneView { camera: &cam, assets: &reg, now_ms: 0 };
        let mut frame = Frame::new(1);
        let mut field = CollectibleField::new(&WorldConfig::default());
        assert!(matches!(
            view.draw_map(&mut frame, &mut field),
            Err(GameError::DrawBufferFull { capacity: 1 })
        ));
    }

    #[test]
    fn sprite_ids_past_the_registry_fail_the_frame() {
        let mut frame = Frame::new(8).with_sprite_limit(3);
        let size = Vec2::splat(10.0);
        frame.push(DrawInstance::sprite(DrawLayer::Wild, SpriteId(2), Vec2::ZERO, size)).unwrap();
        frame.push(DrawInstance::fill(DrawLayer::Map, size, 1.0)).unwrap();
        frame.push(DrawInstance::sparkle(DrawLayer::Encounter, Vec2::ZERO, 4.0)).unwrap();
        assert!(matches!(
            frame.push(DrawInstance::sprite(DrawLayer::Wild, SpriteId(3), Vec2::ZERO, size)),
            Err(GameError::SpriteOutOfRange { id: 3, count: 3 })
        ));
        assert_eq!(frame.buffer.instance_count(), 3);
    }
}
