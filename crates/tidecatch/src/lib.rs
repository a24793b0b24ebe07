pub mod api;
pub mod assets;
pub mod core;
pub mod encounter;
pub mod input;
pub mod renderer;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::config::WorldConfig;
pub use api::error::{ErrorLog, GameError};
pub use api::game::{GamePhase, TideGame};
pub use api::types::{DeviceTier, Rarity};
pub use api::ui::{UiSink, UiState};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetRegistry, AssetState, SpriteId};
pub use core::rng::Rng;
pub use core::time::{FixedTimestep, SimClock};
pub use encounter::capture::CaptureAnimation;
pub use encounter::ledger::{CapturedCollection, Inventory};
pub use encounter::{
    CaptureResolution, DeviceOutcome, EncounterMachine, EncounterState, FleeOutcome,
};
pub use input::controls::Controls;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::Camera2D;
pub use renderer::instance::{DrawBuffer, DrawInstance};
pub use renderer::layer::DrawLayer;
pub use renderer::view::{Frame, TextLabel};
pub use world::player::{MoveIntent, Player};
pub use world::species::{Species, SpeciesCatalog, SpeciesId};
