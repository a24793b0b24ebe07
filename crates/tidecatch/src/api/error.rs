use thiserror::Error;

use crate::api::types::Rarity;

/// Failures surfaced by the simulation core.
///
/// Invalid player actions are not errors; they come back as outcome
/// enums. Render failures are fatal for the session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rarity must be 1, 2 or 3, got {0}")]
    InvalidRarity(u8),
    #[error("species catalog is empty")]
    EmptyCatalog,
    #[error("duplicate species name in catalog: {0}")]
    DuplicateSpecies(String),
    #[error("species catalog has no species of rarity {0:?}")]
    EmptyTier(Rarity),
    #[error("species catalog has {0} entries, more than can be indexed")]
    CatalogTooLarge(usize),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("unknown sprite: {0}")]
    UnknownSprite(String),
    #[error("draw buffer full ({capacity} instances)")]
    DrawBufferFull { capacity: usize },
    #[error("sprite id {id} out of range ({count} sprites registered)")]
    SpriteOutOfRange { id: u32, count: u32 },
    #[error("render failed: {0}")]
    Render(String),
}

/// Maximum error lines logged per window.
pub const MAX_ERRORS_PER_WINDOW: u32 = 5;
/// Length of the rate-limit window in milliseconds.
pub const ERROR_WINDOW_MS: u64 = 1000;

/// Rate-limited error logger.
///
/// Logs at most five errors per one-second window, then a single
/// suppression notice, then nothing until the window restarts.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    window_start_ms: u64,
    count: u32,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `message` if the current window allows it.
    /// Returns true when the message itself was written.
    pub fn report(&mut self, now_ms: u64, message: &str) -> bool {
        if now_ms.saturating_sub(self.window_start_ms) > ERROR_WINDOW_MS {
            self.count = 0;
            self.window_start_ms = now_ms;
        }

        if self.count < MAX_ERRORS_PER_WINDOW {
            log::error!("{}", message);
            self.count += 1;
            true
        } else {
            if self.count == MAX_ERRORS_PER_WINDOW {
                log::error!("too many errors, suppressing further messages");
                self.count += 1;
            }
            false
        }
    }
}
