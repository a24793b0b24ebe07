//! Keyboard bindings.

use crate::api::types::DeviceTier;
use crate::world::player::MoveIntent;

pub const KEY_ESCAPE: u32 = 27;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_DIGIT1: u32 = 49;
pub const KEY_DIGIT2: u32 = 50;
pub const KEY_DIGIT3: u32 = 51;

/// A discrete action fired on key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    UseDevice(DeviceTier),
    Flee,
}

/// Which arrow keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.set(key_code, true);
    }

    /// Release a key. Digits and Escape fire their action on release.
    pub fn key_up(&mut self, key_code: u32) -> Option<KeyAction> {
        self.set(key_code, false);
        match key_code {
            KEY_DIGIT1 => Some(KeyAction::UseDevice(DeviceTier::Normal)),
            KEY_DIGIT2 => Some(KeyAction::UseDevice(DeviceTier::Super)),
            KEY_DIGIT3 => Some(KeyAction::UseDevice(DeviceTier::Hyper)),
            KEY_ESCAPE => Some(KeyAction::Flee),
            _ => None,
        }
    }

    fn set(&mut self, key_code: u32, held: bool) {
        match key_code {
            KEY_LEFT => self.left = held,
            KEY_RIGHT => self.right = held,
            KEY_UP => self.up = held,
            KEY_DOWN => self.down = held,
            _ => {}
        }
    }

    /// Horizontal keys count only while no vertical key is held, and the
    /// other way round. Holding keys on both axes means no movement.
    pub fn intent(&self) -> MoveIntent {
        let vertical = self.up || self.down;
        let horizontal = self.left || self.right;
        if self.left && !vertical {
            MoveIntent::Left
        } else if self.right && !vertical {
            MoveIntent::Right
        } else if self.up && !horizontal {
            MoveIntent::Up
        } else if self.down && !horizontal {
            MoveIntent::Down
        } else {
            MoveIntent::Still
        }
    }
}
