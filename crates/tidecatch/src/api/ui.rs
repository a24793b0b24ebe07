//! Outbound UI notifications.
//!
//! The core never touches the DOM. It reports status text, flee-button
//! visibility and device counts through `UiSink`; the web bridge reads
//! the resulting `UiState` each frame.

use crate::encounter::ledger::Inventory;
use crate::world::species::Species;

/// Receiver for everything the core wants shown outside the canvas.
pub trait UiSink {
    fn set_status_text(&mut self, message: &str);
    fn hide_status_text(&mut self) {}
    fn show_flee_control(&mut self);
    fn hide_flee_control(&mut self);
    fn set_counts(&mut self, inventory: &Inventory);
    /// A species entered the collection for the first time.
    fn celebrate_capture(&mut self, _species: &Species) {}
}

/// Latest UI state, polled by the web bridge.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub status_text: String,
    pub status_visible: bool,
    pub flee_visible: bool,
    pub counts: Inventory,
    /// Name of a freshly captured species awaiting its banner.
    pub celebration: Option<String>,
    status_changed: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the status text changed since the last call.
    pub fn take_status_changed(&mut self) -> bool {
        std::mem::take(&mut self.status_changed)
    }

    pub fn take_celebration(&mut self) -> Option<String> {
        self.celebration.take()
    }
}

impl UiSink for UiState {
    fn set_status_text(&mut self, message: &str) {
        self.status_text.clear();
        self.status_text.push_str(message);
        self.status_visible = true;
        self.status_changed = true;
    }

    fn hide_status_text(&mut self) {
        self.status_visible = false;
    }

    fn show_flee_control(&mut self) {
        self.flee_visible = true;
    }

    fn hide_flee_control(&mut self) {
        self.flee_visible = false;
    }

    fn set_counts(&mut self, inventory: &Inventory) {
        self.counts = *inventory;
    }

    fn celebrate_capture(&mut self, species: &Species) {
        self.celebration = Some(species.name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DeviceTier, Rarity};

    #[test]
    fn status_text_tracks_changes() {
        let mut ui = UiState::new();
        assert!(!ui.take_status_changed());
        ui.set_status_text("hello");
        assert!(ui.status_visible);
        assert!(ui.take_status_changed());
        assert!(!ui.take_status_changed());
        ui.hide_status_text();
        assert!(!ui.status_visible);
        assert_eq!(ui.status_text, "hello");
    }

    #[test]
    fn counts_and_celebration() {
        let mut ui = UiState::new();
        let mut inv = Inventory::new();
        inv.credit(DeviceTier::Hyper);
        ui.set_counts(&inv);
        assert_eq!(ui.counts.count(DeviceTier::Hyper), 1);

        ui.celebrate_capture(&Species::new("Finnet", Rarity::Common, "finnet"));
        assert_eq!(ui.take_celebration().as_deref(), Some("Finnet"));
        assert_eq!(ui.take_celebration(), None);
    }
}
