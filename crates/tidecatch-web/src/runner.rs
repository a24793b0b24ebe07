use tidecatch::api::types::DeviceTier;
use tidecatch::{
    AssetState, FixedTimestep, GameError, GamePhase, InputEvent, InputQueue, SpriteId, TideGame,
};

/// Wires the simulation to the browser frame loop.
///
/// JS pushes input events as they arrive and calls `tick` once per
/// animation frame with the elapsed time. The runner converts that into
/// fixed simulation steps and rebuilds the frame.
pub struct GameRunner {
    game: TideGame,
    input: InputQueue,
    timestep: FixedTimestep,
}

impl GameRunner {
    pub fn new(game: TideGame) -> Self {
        let timestep = FixedTimestep::new(game.config().fixed_dt);
        Self {
            game,
            input: InputQueue::new(),
            timestep,
        }
    }

    /// Build a runner from optional JSON for the config overrides, the
    /// species catalog and the asset manifest.
    pub fn from_json(
        config_json: Option<&str>,
        catalog_json: Option<&str>,
        manifest_json: Option<&str>,
    ) -> Result<Self, GameError> {
        let game = TideGame::from_json(config_json, catalog_json, manifest_json)?;
        Ok(Self::new(game))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed steps, then the frame build.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        // Input is applied once per frame, and only on frames that step.
        if steps > 0 {
            let events = self.input.drain();
            self.game.handle_input(&events);
        }
        for _ in 0..steps {
            self.game.update();
        }
        self.game.render();
    }

    pub fn game(&self) -> &TideGame {
        &self.game
    }

    pub fn asset_loaded(&mut self, id: u32) {
        self.game.assets_mut().mark_loaded(SpriteId(id));
    }

    pub fn asset_failed(&mut self, id: u32) {
        self.game.assets_mut().mark_failed(SpriteId(id));
    }

    pub fn report_render_failure(&mut self, message: &str) {
        self.game.report_render_failure(message);
    }

    // ---- Frame accessors ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.game.frame().buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.game.frame().buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.game.config().max_draw_instances as u32
    }

    pub fn labels_json(&self) -> String {
        match self.game.frame().labels_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("label serialization failed: {}", err);
                "[]".to_string()
            }
        }
    }

    // ---- UI accessors ----

    pub fn status_text(&self) -> String {
        self.game.ui().status_text.clone()
    }

    pub fn status_visible(&self) -> bool {
        self.game.ui().status_visible
    }

    pub fn flee_visible(&self) -> bool {
        self.game.ui().flee_visible
    }

    pub fn device_count(&self, tier: u32) -> u32 {
        DeviceTier::from_u32(tier)
            .map(|t| self.game.ui().counts.count(t))
            .unwrap_or(0)
    }

    pub fn take_celebration(&mut self) -> Option<String> {
        self.game.ui_mut().take_celebration()
    }

    pub fn collection_json(&self) -> String {
        let names: Vec<&str> = self.game.collection().iter().map(|s| s.name.as_str()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn play_time(&self) -> String {
        self.game.play_time()
    }

    // ---- Lifecycle accessors ----

    /// 0 = loading, 1 = running, 2 = error.
    pub fn phase_code(&self) -> u32 {
        match self.game.phase() {
            GamePhase::Loading => 0,
            GamePhase::Running => 1,
            GamePhase::Error(_) => 2,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self.game.phase() {
            GamePhase::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn loading_progress(&self) -> f32 {
        self.game.loading_progress()
    }

    // ---- Asset accessors ----

    pub fn sprite_count(&self) -> u32 {
        self.game.assets().len() as u32
    }

    pub fn sprite_name(&self, id: u32) -> Option<String> {
        self.game.assets().name(SpriteId(id)).map(str::to_string)
    }

    pub fn sprite_path(&self, id: u32) -> Option<String> {
        self.game.assets().path(SpriteId(id)).map(str::to_string)
    }

    pub fn sprite_ready(&self, id: u32) -> bool {
        self.game.assets().state(SpriteId(id)) == Some(AssetState::Ready)
    }
}
