//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

use glam::Vec2;

/// Seedable pseudo-random number generator (xorshift64).
///
/// Every random decision in the simulation (spawn positions, tier draws,
/// wander directions, capture rolls) flows through one instance, so a whole
/// session replays identically from its seed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn below(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit exactly in an f32 mantissa.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Bernoulli trial. Probabilities >= 1.0 always succeed.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Uniform point in [0, size.x) x [0, size.y).
    pub fn point_in(&mut self, size: Vec2) -> Vec2 {
        Vec2::new(self.next_f32() * size.x, self.next_f32() * size.y)
    }

    /// Pick an index by cumulative weight. Falls back to the last index
    /// when rounding leaves the roll above the summed weights.
    pub fn weighted_index(&mut self, weights: &[f32]) -> usize {
        let roll = self.next_f32();
        let mut cumulative = 0.0f32;
        for (i, weight) in weights.iter().enumerate() {
            cumulative += *weight;
            if roll < cumulative {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }
}
