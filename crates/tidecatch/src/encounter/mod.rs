//! The single active encounter and its capture mini-game.
//!
//! `Idle -> Active -> Capturing -> Idle`. Invalid requests are rejected
//! with a typed outcome and never change state.

pub mod capture;
pub mod ledger;

use crate::api::types::DeviceTier;
use crate::api::ui::UiSink;
use crate::core::rng::Rng;
use crate::encounter::capture::{AnimationCue, CaptureAnimation};
use crate::encounter::ledger::{CapturedCollection, Inventory};
use crate::world::species::Species;

#[derive(Debug, Clone, PartialEq)]
pub enum EncounterState {
    Idle,
    Active { species: Species },
    Capturing { species: Species, animation: CaptureAnimation },
}

/// Result of a device-use request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOutcome {
    Thrown,
    OutOfDevices,
    NoEncounter,
    /// A device is already in flight.
    Busy,
}

/// Result of a flee request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleeOutcome {
    Fled,
    NoEncounter,
    Busy,
}

/// How a capture attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResolution {
    Captured { species: Species, first_time: bool },
    Escaped { species: Species },
}

pub struct EncounterMachine {
    state: EncounterState,
}

impl Default for EncounterMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl EncounterMachine {
    pub fn new() -> Self {
        Self {
            state: EncounterState::Idle,
        }
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EncounterState::Idle)
    }

    pub fn species(&self) -> Option<&Species> {
        match &self.state {
            EncounterState::Idle => None,
            EncounterState::Active { species }
            | EncounterState::Capturing { species, .. } => Some(species),
        }
    }

    pub fn animation(&self) -> Option<&CaptureAnimation> {
        match &self.state {
            EncounterState::Capturing { animation, .. } => Some(animation),
            _ => None,
        }
    }

    /// Present a species. Ignored unless idle.
    pub fn activate(&mut self, species: Species, ui: &mut dyn UiSink) -> bool {
        if !self.is_idle() {
            log::debug!("encounter with {} ignored, one is already running", species.name);
            return false;
        }
        log::info!("encounter started: {}", species.name);
        ui.show_flee_control();
        ui.set_status_text(&format!("A wild {} appears!", species.name));
        self.state = EncounterState::Active { species };
        true
    }

    /// Leave the encounter. Only allowed before a device is thrown.
    pub fn flee(&mut self, ui: &mut dyn UiSink) -> FleeOutcome {
        match &self.state {
            EncounterState::Idle => {
                log::debug!("flee ignored, no encounter");
                ui.set_status_text("There is nothing to flee from.");
                FleeOutcome::NoEncounter
            }
            EncounterState::Capturing { .. } => {
                log::debug!("flee ignored, capture in progress");
                FleeOutcome::Busy
            }
            EncounterState::Active { species } => {
                log::info!("fled from {}", species.name);
                ui.set_status_text("You got away safely!");
                ui.hide_flee_control();
                self.state = EncounterState::Idle;
                FleeOutcome::Fled
            }
        }
    }

    /// Throw a device at the active species. The device is consumed and the
    /// outcome rolled immediately; the animation then plays it back.
    pub fn use_device(
        &mut self,
        tier: DeviceTier,
        inventory: &mut Inventory,
        rng: &mut Rng,
        ui: &mut dyn UiSink,
    ) -> DeviceOutcome {
        let species = match &self.state {
            EncounterState::Idle => {
                ui.set_status_text("There is no wild creature to catch.");
                return DeviceOutcome::NoEncounter;
            }
            EncounterState::Capturing { .. } => {
                log::debug!("{} ignored, capture in progress", tier.label());
                return DeviceOutcome::Busy;
            }
            EncounterState::Active { species } => species.clone(),
        };

        if !inventory.debit(tier) {
            ui.set_status_text(&format!("You have no {}s left!", tier.label()));
            return DeviceOutcome::OutOfDevices;
        }
        ui.set_counts(inventory);

        let animation = CaptureAnimation::launch(tier, species.rarity, rng);
        log::debug!(
            "{} thrown at {}: {} shakes",
            tier.label(),
            species.name,
            animation.shake_count
        );
        self.state = EncounterState::Capturing { species, animation };
        DeviceOutcome::Thrown
    }

    /// Advance the capture animation by `ticks` steps. Returns the
    /// resolution once progress reaches 1.0.
    pub fn advance(
        &mut self,
        ticks: u32,
        collection: &mut CapturedCollection,
        ui: &mut dyn UiSink,
    ) -> Option<CaptureResolution> {
        for _ in 0..ticks {
            let EncounterState::Capturing { animation, .. } = &mut self.state else {
                return None;
            };
            match animation.step() {
                Some(AnimationCue::Throwing) => {
                    let text = format!("Throwing {}...", animation.tier.label());
                    ui.set_status_text(&text);
                }
                Some(AnimationCue::Shake(n)) => ui.set_status_text(&format!("{}...", n)),
                Some(AnimationCue::Finished) => return self.resolve(collection, ui),
                None => {}
            }
        }
        None
    }

    fn resolve(
        &mut self,
        collection: &mut CapturedCollection,
        ui: &mut dyn UiSink,
    ) -> Option<CaptureResolution> {
        let (species, animation) = match std::mem::replace(&mut self.state, EncounterState::Idle) {
            EncounterState::Capturing { species, animation } => (species, animation),
            other => {
                self.state = other;
                return None;
            }
        };
        ui.hide_flee_control();

        if animation.succeeded {
            let first_time = collection.insert(&species);
            if first_time {
                ui.celebrate_capture(&species);
            }
            log::info!("captured {} (new: {})", species.name, first_time);
            ui.set_status_text(&format!("You captured {}!", species.name));
            Some(CaptureResolution::Captured { species, first_time })
        } else {
            log::info!("{} escaped", species.name);
            ui.set_status_text(&format!("{} escaped!", species.name));
            Some(CaptureResolution::Escaped { species })
        }
    }
}
