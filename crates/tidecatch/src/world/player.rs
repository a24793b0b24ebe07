use glam::Vec2;

use crate::core::spatial::{normalize_x, reflect_y};

/// Ticks a walk frame is held before toggling.
const WALK_FRAME_TICKS: u32 = 15;

/// Validated movement request. Only one axis can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveIntent {
    #[default]
    Still,
    Left,
    Right,
    Up,
    Down,
}

impl MoveIntent {
    /// Build an intent from raw axis values. Diagonals (both axes set)
    /// collapse to `Still`.
    pub fn from_axes(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (-1, 0) => MoveIntent::Left,
            (1, 0) => MoveIntent::Right,
            (0, -1) => MoveIntent::Up,
            (0, 1) => MoveIntent::Down,
            _ => MoveIntent::Still,
        }
    }

    pub fn direction(self) -> Vec2 {
        match self {
            MoveIntent::Still => Vec2::ZERO,
            MoveIntent::Left => Vec2::new(-1.0, 0.0),
            MoveIntent::Right => Vec2::new(1.0, 0.0),
            MoveIntent::Up => Vec2::new(0.0, -1.0),
            MoveIntent::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Sprite-sheet row the player faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Facing {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
}

impl Facing {
    pub fn row(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// World position; the camera follows it exactly.
    pub pos: Vec2,
    pub intent: MoveIntent,
    pub facing: Facing,
    /// Walk animation column, 0 or 1.
    pub frame: u8,
    anim_timer: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            intent: MoveIntent::Still,
            facing: Facing::Down,
            frame: 0,
            anim_timer: 0,
        }
    }

    pub fn set_intent(&mut self, intent: MoveIntent) {
        self.intent = intent;
    }

    /// Apply the current intent for one tick. X wraps into [0, width);
    /// Y is shifted by 2 * height once it leaves [-height, height].
    pub fn step(&mut self, speed: f32, world: Vec2) {
        self.facing = match self.intent {
            MoveIntent::Still => return,
            MoveIntent::Left => Facing::Left,
            MoveIntent::Right => Facing::Right,
            MoveIntent::Up => Facing::Up,
            MoveIntent::Down => Facing::Down,
        };

        let next = self.pos + self.intent.direction() * speed;
        self.pos = Vec2::new(normalize_x(next.x, world.x), reflect_y(next.y, world.y));

        self.anim_timer += 1;
        if self.anim_timer > WALK_FRAME_TICKS {
            self.anim_timer = 0;
            self.frame ^= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(8192.0, 4096.0);

    #[test]
    fn diagonal_intent_is_still() {
        assert_eq!(MoveIntent::from_axes(1, 1), MoveIntent::Still);
        assert_eq!(MoveIntent::from_axes(-1, 1), MoveIntent::Still);
        assert_eq!(MoveIntent::from_axes(0, 0), MoveIntent::Still);
        assert_eq!(MoveIntent::from_axes(-3, 0), MoveIntent::Left);
        assert_eq!(MoveIntent::from_axes(0, 1), MoveIntent::Down);
    }

    #[test]
    fn moving_left_wraps_past_zero() {
        let mut p = Player::new(Vec2::new(2.0, 100.0));
        p.set_intent(MoveIntent::Left);
        p.step(6.0, WORLD);
        assert_eq!(p.pos, Vec2::new(8188.0, 100.0));
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn moving_right_wraps_past_width() {
        let mut p = Player::new(Vec2::new(8190.0, 0.0));
        p.set_intent(MoveIntent::Right);
        p.step(6.0, WORLD);
        assert_eq!(p.pos.x, 4.0);
    }

    #[test]
    fn vertical_shift_beyond_height() {
        let mut p = Player::new(Vec2::new(0.0, 4094.0));
        p.set_intent(MoveIntent::Down);
        p.step(6.0, WORLD);
        assert_eq!(p.pos.y, 4100.0 - 8192.0);

        // Between -H and 0 the position is kept as is.
        let mut p = Player::new(Vec2::new(0.0, 3.0));
        p.set_intent(MoveIntent::Up);
        p.step(6.0, WORLD);
        assert_eq!(p.pos.y, -3.0);
        assert_eq!(p.facing, Facing::Up);
    }

    #[test]
    fn walk_frame_toggles_after_sixteen_ticks() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        p.set_intent(MoveIntent::Right);
        for _ in 0..15 {
            p.step(6.0, WORLD);
        }
        assert_eq!(p.frame, 0);
        p.step(6.0, WORLD);
        assert_eq!(p.frame, 1);
    }

    #[test]
    fn standing_still_keeps_frame_and_facing() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        p.set_intent(MoveIntent::Left);
        p.step(6.0, WORLD);
        p.set_intent(MoveIntent::Still);
        p.step(6.0, WORLD);
        assert_eq!(p.pos, Vec2::new(94.0, 100.0));
        assert_eq!(p.facing, Facing::Left);
    }
}
