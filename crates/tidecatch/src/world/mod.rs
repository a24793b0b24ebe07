pub mod collectibles;
pub mod player;
pub mod species;
pub mod wild;

/// Vertical bob animation shared by map entities.
/// `phase` swings between roughly -limit and +limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub phase: f32,
    /// +1.0 or -1.0.
    pub direction: f32,
    pub speed: f32,
}

impl Bounce {
    pub fn new(speed: f32) -> Self {
        Self {
            phase: 0.0,
            direction: 1.0,
            speed,
        }
    }

    /// Advance one step, reversing once the phase passes `limit`.
    pub fn step(&mut self, limit: f32) {
        self.phase += self.direction * self.speed;
        if self.phase.abs() > limit {
            self.direction = -self.direction;
        }
    }
}
