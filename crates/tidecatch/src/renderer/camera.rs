use glam::Vec2;

use crate::core::spatial::{within_extents, wrapped_offset};

/// Camera locked to the player on a horizontally wrapping world.
///
/// The player is always drawn at the canvas center, so the camera center
/// is the player's world position. Scale is `zoom * canvas_height /
/// world_height` pixels per world unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Camera center in world space.
    pub center: Vec2,
    /// Canvas size in pixels.
    pub canvas: Vec2,
    /// World size in world units.
    pub world: Vec2,
    /// Zoom multiplier on top of the fit-to-height scale.
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(world: Vec2, zoom: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            canvas: Vec2::new(800.0, 600.0),
            world,
            zoom,
        }
    }

    /// Resize the canvas (e.g. on window resize).
    pub fn resize(&mut self, canvas_width: f32, canvas_height: f32) {
        self.canvas = Vec2::new(canvas_width.max(0.0), canvas_height.max(0.0));
    }

    /// Move camera center to the target position.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f32 {
        if self.world.y <= 0.0 {
            return 0.0;
        }
        self.zoom * self.canvas.y / self.world.y
    }

    /// Half of the visible area, in world units.
    pub fn half_extents(&self) -> Vec2 {
        let scale = self.scale();
        if scale <= 0.0 {
            return Vec2::ZERO;
        }
        self.canvas / scale / 2.0
    }

    /// Shortest offset from the camera center to `point`.
    pub fn offset_to(&self, point: Vec2) -> Vec2 {
        wrapped_offset(point, self.center, self.world.x)
    }

    /// Whether `point` is within the visible area grown by `margin` world units.
    pub fn is_near(&self, point: Vec2, margin: f32) -> bool {
        within_extents(self.offset_to(point), self.half_extents(), margin)
    }

    /// Canvas pixel position of a world point.
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.offset_to(point) * self.scale() + self.canvas / 2.0
    }

    /// Whether a screen position lies on the canvas grown by `pad` pixels.
    pub fn is_on_screen(&self, screen: Vec2, pad: f32) -> bool {
        screen.x > -pad
            && screen.x < self.canvas.x + pad
            && screen.y > -pad
            && screen.y < self.canvas.y + pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        let mut cam = Camera2D::new(Vec2::new(8192.0, 4096.0), 3.0);
        cam.resize(1024.0, 768.0);
        cam
    }

    #[test]
    fn scale_fits_height_times_zoom() {
        let cam = camera();
        assert!((cam.scale() - 3.0 * 768.0 / 4096.0).abs() < 1e-6);
        let half = cam.half_extents();
        assert!((half.y - 4096.0 / 6.0).abs() < 1e-3);
        assert!((half.x / half.y - 1024.0 / 768.0).abs() < 1e-4);
    }

    #[test]
    fn zero_height_canvas_sees_nothing() {
        let mut cam = camera();
        cam.resize(1024.0, 0.0);
        assert_eq!(cam.half_extents(), Vec2::ZERO);
        assert!(!cam.is_near(Vec2::new(100.0, 0.0), 50.0));
    }

    #[test]
    fn visibility_wraps_across_seam() {
        let mut cam = camera();
        cam.look_at(Vec2::new(10.0, 500.0));
        assert!(cam.is_near(Vec2::new(8180.0, 500.0), 50.0));
        assert!(!cam.is_near(Vec2::new(4000.0, 500.0), 50.0));
    }

    #[test]
    fn player_maps_to_canvas_center() {
        let mut cam = camera();
        cam.look_at(Vec2::new(300.0, 200.0));
        assert_eq!(cam.world_to_screen(Vec2::new(300.0, 200.0)), Vec2::new(512.0, 384.0));
        let right = cam.world_to_screen(Vec2::new(310.0, 200.0));
        assert!((right.x - (512.0 + 10.0 * cam.scale())).abs() < 1e-3);
    }

    #[test]
    fn on_screen_test_uses_padding() {
        let cam = camera();
        assert!(cam.is_on_screen(Vec2::new(-20.0, 10.0), 32.0));
        assert!(!cam.is_on_screen(Vec2::new(-40.0, 10.0), 32.0));
        assert!(!cam.is_on_screen(Vec2::new(10.0, 800.0), 32.0));
    }
}
