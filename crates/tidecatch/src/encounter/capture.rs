//! Capture odds and the precomputed-outcome capture animation.
//!
//! The outcome is decided the instant a device is thrown. The animation
//! only reveals it: a throw, up to `MAX_SHAKES` shakes, then a short
//! final beat before resolution.

use crate::api::types::{DeviceTier, Rarity};
use crate::core::rng::Rng;

pub const BASE_CAPTURE_RATE: f32 = 1.5;
pub const MAX_SHAKES: u8 = 3;

/// Progress at which the throw ends and shaking starts.
pub const THROW_END: f32 = 0.25;
/// Progress at which shaking ends and the final beat starts.
pub const SHAKE_END: f32 = 0.85;

const THROW_STEP: f32 = 0.01;
const SHAKE_STEP: f32 = 0.005;
const REVEAL_STEP: f32 = 0.01;

/// Per-trial success probability. May exceed 1.0, in which case every
/// trial succeeds.
pub fn capture_rate(rarity: Rarity, tier: DeviceTier) -> f32 {
    BASE_CAPTURE_RATE / rarity.capture_divisor() * tier.capture_multiplier()
}

/// Run up to `MAX_SHAKES` Bernoulli trials, stopping at the first failure.
/// Returns the number of successes.
pub fn roll_shakes(rate: f32, rng: &mut Rng) -> u8 {
    let mut shakes = 0;
    while shakes < MAX_SHAKES && rng.chance(rate) {
        shakes += 1;
    }
    shakes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Throw,
    Shake,
    Reveal,
}

/// What a single animation step wants shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    Throwing,
    /// A new shake was revealed (1-based).
    Shake(u8),
    /// Progress reached 1.0.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureAnimation {
    pub tier: DeviceTier,
    /// 0.0 to 1.0.
    pub progress: f32,
    /// Successful trials, decided at throw time.
    pub shake_count: u8,
    /// Shakes revealed so far. Never exceeds `shake_count`.
    pub current_shake: u8,
    pub succeeded: bool,
}

impl CaptureAnimation {
    /// Start an animation whose outcome is already decided.
    pub fn new(tier: DeviceTier, shake_count: u8) -> Self {
        let shake_count = shake_count.min(MAX_SHAKES);
        Self {
            tier,
            progress: 0.0,
            shake_count,
            current_shake: 0,
            succeeded: shake_count == MAX_SHAKES,
        }
    }

    /// Roll the outcome and start the animation.
    pub fn launch(tier: DeviceTier, rarity: Rarity, rng: &mut Rng) -> Self {
        Self::new(tier, roll_shakes(capture_rate(rarity, tier), rng))
    }

    pub fn phase(&self) -> CapturePhase {
        if self.progress < THROW_END {
            CapturePhase::Throw
        } else if self.progress < SHAKE_END {
            CapturePhase::Shake
        } else {
            CapturePhase::Reveal
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Position within the shake phase, 0.0 to 1.0.
    pub fn shake_progress(&self) -> f32 {
        ((self.progress - THROW_END) / (SHAKE_END - THROW_END)).clamp(0.0, 1.0)
    }

    /// Advance one tick.
    ///
    /// The throw phase reports `Throwing` every step. During the shake
    /// phase a new shake is revealed each time the stage index reaches the
    /// revealed count, until the precomputed count is used up.
    pub fn step(&mut self) -> Option<AnimationCue> {
        let mut cue = None;
        match self.phase() {
            CapturePhase::Throw => {
                self.progress += THROW_STEP;
                cue = Some(AnimationCue::Throwing);
            }
            CapturePhase::Shake => {
                if self.current_shake < self.shake_count {
                    let stage = (self.shake_progress() * MAX_SHAKES as f32) as u8;
                    if stage >= self.current_shake {
                        self.current_shake = stage.min(self.shake_count - 1) + 1;
                        cue = Some(AnimationCue::Shake(self.current_shake));
                    }
                }
                self.progress += SHAKE_STEP;
            }
            CapturePhase::Reveal => {
                if self.progress < 1.0 {
                    self.progress += REVEAL_STEP;
                }
            }
        }

        if self.is_finished() {
            return Some(AnimationCue::Finished);
        }
        cue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(anim: &mut CaptureAnimation) -> Vec<AnimationCue> {
        let mut cues = Vec::new();
        for _ in 0..1_000 {
            if let Some(cue) = anim.step() {
                cues.push(cue);
                if cue == AnimationCue::Finished {
                    break;
                }
            }
        }
        cues
    }

    #[test]
    fn rates_follow_rarity_and_tier() {
        assert!((capture_rate(Rarity::Common, DeviceTier::Normal) - 1.5).abs() < 1e-6);
        assert!((capture_rate(Rarity::Uncommon, DeviceTier::Normal) - 0.75).abs() < 1e-6);
        assert!((capture_rate(Rarity::Rare, DeviceTier::Super) - 0.75).abs() < 1e-6);
        assert!((capture_rate(Rarity::Rare, DeviceTier::Hyper) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn rate_above_one_always_captures() {
        let mut rng = Rng::new(99);
        for _ in 0..1_000 {
            assert_eq!(roll_shakes(1.25, &mut rng), 3);
        }
    }

    #[test]
    fn zero_rate_never_shakes() {
        let mut rng = Rng::new(5);
        assert_eq!(roll_shakes(0.0, &mut rng), 0);
    }

    #[test]
    fn success_iff_three_shakes() {
        let mut rng = Rng::new(31);
        for _ in 0..2_000 {
            let anim = CaptureAnimation::launch(DeviceTier::Normal, Rarity::Rare, &mut rng);
            assert_eq!(anim.succeeded, anim.shake_count == 3);
            assert!(anim.shake_count <= 3);
        }
    }

    #[test]
    fn full_capture_reveals_three_shakes() {
        let mut anim = CaptureAnimation::new(DeviceTier::Hyper, 3);
        let cues = run_to_end(&mut anim);
        let shakes: Vec<u8> = cues
            .iter()
            .filter_map(|c| match c {
                AnimationCue::Shake(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(shakes, vec![1, 2, 3]);
        assert_eq!(cues.first(), Some(&AnimationCue::Throwing));
        assert_eq!(cues.last(), Some(&AnimationCue::Finished));
        assert!(anim.succeeded);
    }

    #[test]
    fn escape_after_one_shake_reveals_only_one() {
        let mut anim = CaptureAnimation::new(DeviceTier::Normal, 1);
        let cues = run_to_end(&mut anim);
        let shakes = cues.iter().filter(|c| matches!(c, AnimationCue::Shake(_))).count();
        assert_eq!(shakes, 1);
        assert_eq!(anim.current_shake, 1);
        assert!(!anim.succeeded);
    }

    #[test]
    fn animation_length_matches_phase_rates() {
        let mut anim = CaptureAnimation::new(DeviceTier::Normal, 0);
        let mut ticks = 0;
        while anim.step() != Some(AnimationCue::Finished) {
            ticks += 1;
            assert!(ticks < 1_000);
        }
        // 25 throw + 120 shake + 15 reveal steps, give or take rounding.
        assert!((155..=165).contains(&ticks), "took {} ticks", ticks);
    }
}
