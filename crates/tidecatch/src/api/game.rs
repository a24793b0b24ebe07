//! The game driver: owns every component and runs one fixed tick at a time.
//!
//! Tick order: input, player movement, collectible and wild field updates,
//! pickup, then the encounter trigger. While an encounter is in progress
//! only the capture animation advances.

use crate::api::config::WorldConfig;
use crate::api::error::{ErrorLog, GameError};
use crate::api::types::DeviceTier;
use crate::api::ui::{UiSink, UiState};
use crate::assets::manifest::{AssetManifest, MAP_SPRITE, PLAYER_SPRITE};
use crate::assets::registry::AssetRegistry;
use crate::core::rng::Rng;
use crate::core::time::{format_play_time, SimClock};
use crate::encounter::ledger::{CapturedCollection, Inventory};
use crate::encounter::{DeviceOutcome, EncounterMachine, FleeOutcome};
use crate::input::controls::{Controls, KeyAction};
use crate::input::queue::InputEvent;
use crate::renderer::camera::Camera2D;
use crate::renderer::view::{self, Frame, SceneView, SIDEBAR_BOB_STEP};
use crate::world::collectibles::CollectibleField;
use crate::world::player::Player;
use crate::world::species::SpeciesCatalog;
use crate::world::wild::WildField;

/// Loading bar period in milliseconds.
const LOADING_CYCLE_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamePhase {
    Loading,
    Running,
    /// Terminal. Only a page reload recovers.
    Error(String),
}

pub struct TideGame {
    config: WorldConfig,
    catalog: SpeciesCatalog,
    assets: AssetRegistry,
    rng: Rng,
    clock: SimClock,
    camera: Camera2D,
    player: Player,
    controls: Controls,
    collectibles: CollectibleField,
    wild: WildField,
    encounter: EncounterMachine,
    inventory: Inventory,
    collection: CapturedCollection,
    ui: UiState,
    errors: ErrorLog,
    phase: GamePhase,
    status_shown_at_ms: u64,
    sidebar_phase: f32,
    frame: Frame,
}

impl TideGame {
    /// Build a world: seed the collectibles and drop the player at a
    /// random position.
    pub fn new(config: WorldConfig, catalog: SpeciesCatalog, manifest: &AssetManifest) -> Self {
        let world = config.world_size();
        let mut rng = Rng::new(config.seed);
        let mut collectibles = CollectibleField::new(&config);
        collectibles.seed(config.collectible_seed_count, &mut rng, world);
        let player = Player::new(rng.point_in(world));
        let mut camera = Camera2D::new(world, config.zoom);
        camera.look_at(player.pos);

        let missing = manifest.missing_for(&catalog);
        if !missing.is_empty() {
            log::warn!("asset manifest has no entry for: {}", missing.join(", "));
        }

        log::info!(
            "world {}x{} seeded with {} collectibles, {} species",
            world.x,
            world.y,
            collectibles.len(),
            catalog.len()
        );

        let assets = AssetRegistry::from_manifest(manifest);
        let frame = Frame::new(config.max_draw_instances).with_sprite_limit(assets.len() as u32);

        Self {
            wild: WildField::new(&config),
            assets,
            frame,
            catalog,
            rng,
            clock: SimClock::new(),
            camera,
            player,
            controls: Controls::new(),
            collectibles,
            encounter: EncounterMachine::new(),
            inventory: Inventory::new(),
            collection: CapturedCollection::new(),
            ui: UiState::new(),
            errors: ErrorLog::new(),
            phase: GamePhase::Loading,
            status_shown_at_ms: 0,
            sidebar_phase: 0.0,
            config,
        }
    }

    /// Build a game from optional JSON for the config, the species catalog
    /// and the asset manifest. Whatever is missing falls back to the stock
    /// data; a manifest without the map, player or device sprites is
    /// rejected.
    pub fn from_json(
        config_json: Option<&str>,
        catalog_json: Option<&str>,
        manifest_json: Option<&str>,
    ) -> Result<Self, GameError> {
        let config = match config_json {
            Some(json) => WorldConfig::from_json(json)?,
            None => WorldConfig::default(),
        };
        let catalog = match catalog_json {
            Some(json) => SpeciesCatalog::from_json(json)?,
            None => SpeciesCatalog::default(),
        };
        let manifest = match manifest_json {
            Some(json) => AssetManifest::from_json(json)?,
            None => AssetManifest::for_catalog(&catalog),
        };
        let game = Self::new(config, catalog, &manifest);
        game.require_fixed_sprites()?;
        Ok(game)
    }

    fn require_fixed_sprites(&self) -> Result<(), GameError> {
        self.assets.require(MAP_SPRITE)?;
        self.assets.require(PLAYER_SPRITE)?;
        for tier in DeviceTier::ALL {
            self.assets.require(tier.sprite_name())?;
        }
        Ok(())
    }

    /// Apply queued input. Device and flee requests work in any
    /// non-terminal phase; movement keys only update held state.
    pub fn handle_input(&mut self, events: &[InputEvent]) {
        if matches!(self.phase, GamePhase::Error(_)) {
            return;
        }
        for event in events {
            match *event {
                InputEvent::KeyDown { key_code } => self.controls.key_down(key_code),
                InputEvent::KeyUp { key_code } => match self.controls.key_up(key_code) {
                    Some(KeyAction::UseDevice(tier)) => {
                        self.use_device(tier);
                    }
                    Some(KeyAction::Flee) => {
                        self.flee();
                    }
                    None => {}
                },
                InputEvent::UseDevice { tier } => {
                    self.use_device(tier);
                }
                InputEvent::Flee => {
                    self.flee();
                }
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    pub fn use_device(&mut self, tier: DeviceTier) -> DeviceOutcome {
        self.encounter
            .use_device(tier, &mut self.inventory, &mut self.rng, &mut self.ui)
    }

    pub fn flee(&mut self) -> FleeOutcome {
        self.encounter.flee(&mut self.ui)
    }

    /// Run one fixed simulation step.
    pub fn update(&mut self) {
        match self.phase {
            GamePhase::Error(_) => return,
            GamePhase::Loading => {
                self.clock.advance(self.config.fixed_dt);
                if self.clock.now_ms() < self.config.loading_grace_ms {
                    return;
                }
                log::info!(
                    "loading finished, {} of {} sprites settled",
                    self.assets.settled(),
                    self.assets.len()
                );
                self.phase = GamePhase::Running;
            }
            GamePhase::Running => self.clock.advance(self.config.fixed_dt),
        }

        if self.encounter.is_idle() {
            self.step_world();
        } else {
            self.encounter.advance(1, &mut self.collection, &mut self.ui);
        }
        self.expire_status();
    }

    fn step_world(&mut self) {
        let now = self.clock.now_ms();
        let world = self.config.world_size();

        self.player.set_intent(self.controls.intent());
        self.player.step(self.config.player_speed, world);
        self.camera.look_at(self.player.pos);

        self.collectibles.tick(&self.camera, &mut self.rng);
        self.wild.tick(now, &mut self.rng, &self.catalog, world);

        let found = self
            .collectibles
            .collect_near(self.player.pos, world.x, self.config.pickup_radius);
        if !found.is_empty() {
            for tier in found {
                self.inventory.credit(tier);
                self.ui.set_status_text(&format!("You found a {}!", tier.label()));
            }
            self.ui.set_counts(&self.inventory);
        }

        if !self.encounter.is_idle() {
            return;
        }
        if let Some(creature) = self
            .wild
            .take_colliding(self.player.pos, world.x, self.config.encounter_radius)
        {
            match self.catalog.get(creature.species) {
                Some(species) => {
                    self.encounter.activate(species.clone(), &mut self.ui);
                }
                None => log::warn!(
                    "wild creature with unknown species {:?} dropped",
                    creature.species
                ),
            }
        }
    }

    /// Hide the status line a while after it was last set, unless an
    /// encounter is in progress.
    fn expire_status(&mut self) {
        let now = self.clock.now_ms();
        if self.ui.take_status_changed() {
            self.status_shown_at_ms = now;
        }
        if self.ui.status_visible
            && self.encounter.is_idle()
            && now.saturating_sub(self.status_shown_at_ms) >= self.config.status_hide_ms
        {
            self.ui.hide_status_text();
        }
    }

    /// Build this frame's draw data. A failure here ends the session.
    pub fn render(&mut self) {
        self.frame.clear();
        let canvas = self.camera.canvas;
        let result = if let GamePhase::Error(message) = &self.phase {
            view::draw_error(&mut self.frame, canvas, message)
        } else if self.phase == GamePhase::Loading {
            let progress = self.loading_progress();
            view::draw_loading(&mut self.frame, canvas, progress)
        } else {
            self.render_running()
        };
        if let Err(err) = result {
            self.fail(err);
        }
    }

    fn render_running(&mut self) -> Result<(), GameError> {
        self.sidebar_phase += SIDEBAR_BOB_STEP;
        let scene = SceneView {
            camera: &self.camera,
            assets: &self.assets,
            now_ms: self.clock.now_ms(),
        };
        scene.draw_map(&mut self.frame, &mut self.collectibles)?;
        let margin = self.config.visibility_margin;
        scene.draw_wild(&mut self.frame, &self.wild, &self.catalog, margin)?;
        scene.draw_player(&mut self.frame, &self.player)?;
        let total = self.catalog.len();
        scene.draw_sidebar(&mut self.frame, &self.collection, total, self.sidebar_phase)?;
        scene.draw_encounter(&mut self.frame, &self.encounter)?;
        let play_time = self.play_time();
        view::draw_hud(&mut self.frame, self.camera.canvas, &play_time);
        Ok(())
    }

    /// A failure reported by the JS renderer.
    pub fn report_render_failure(&mut self, message: &str) {
        self.fail(GameError::Render(message.to_string()));
    }

    fn fail(&mut self, err: GameError) {
        let message = err.to_string();
        self.errors.report(self.clock.now_ms(), &message);
        if matches!(self.phase, GamePhase::Error(_)) {
            return;
        }
        self.phase = GamePhase::Error(message);
        self.frame.clear();
        if let GamePhase::Error(message) = &self.phase {
            if view::draw_error(&mut self.frame, self.camera.canvas, message).is_err() {
                self.frame.clear();
            }
        }
    }

    /// Loading bar fill, cycling every three seconds.
    pub fn loading_progress(&self) -> f32 {
        (self.clock.now_ms() % LOADING_CYCLE_MS) as f32 / LOADING_CYCLE_MS as f32
    }

    pub fn play_time(&self) -> String {
        format_play_time(self.clock.elapsed_secs())
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn collection(&self) -> &CapturedCollection {
        &self.collection
    }

    pub fn encounter(&self) -> &EncounterMachine {
        &self.encounter
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn collectibles(&self) -> &CollectibleField {
        &self.collectibles
    }

    pub fn wild(&self) -> &WildField {
        &self.wild
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl Default for TideGame {
    fn default() -> Self {
        let catalog = SpeciesCatalog::default();
        let manifest = AssetManifest::for_catalog(&catalog);
        Self::new(WorldConfig::default(), catalog, &manifest)
    }
}
