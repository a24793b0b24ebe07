//! Toroidal coordinate arithmetic.
//!
//! The world wraps horizontally. Vertically it does not wrap; a position
//! that leaves the band [-H, H] is shifted by 2H instead, so it can sit
//! outside [0, H) for long stretches.

use glam::Vec2;

/// Signed shortest horizontal displacement from `b` to `a` on a world of
/// the given width. The result lies in [-width/2, width/2): two points
/// exactly half a world apart are reported as -width/2, never +width/2.
pub fn wrapped_delta_x(a: f32, b: f32, width: f32) -> f32 {
    let half = width / 2.0;
    (a - b + half).rem_euclid(width) - half
}

/// Reduce `x` into [0, width).
pub fn normalize_x(x: f32, width: f32) -> f32 {
    let r = x.rem_euclid(width);
    // rem_euclid can round up to `width` for tiny negative inputs.
    if r >= width {
        0.0
    } else {
        r
    }
}

/// Shift `y` by 2H when it leaves [-height, height].
pub fn reflect_y(y: f32, height: f32) -> f32 {
    if y < -height {
        y + height * 2.0
    } else if y > height {
        y - height * 2.0
    } else {
        y
    }
}

/// Displacement from `from` to `to` with the horizontal axis wrapped.
pub fn wrapped_offset(to: Vec2, from: Vec2, width: f32) -> Vec2 {
    Vec2::new(wrapped_delta_x(to.x, from.x, width), to.y - from.y)
}

/// Squared distance between two points with the horizontal axis wrapped.
pub fn wrapped_distance_sq(a: Vec2, b: Vec2, width: f32) -> f32 {
    wrapped_offset(a, b, width).length_squared()
}

/// Whether an offset falls inside the given half extents plus a margin.
pub fn within_extents(offset: Vec2, half_extents: Vec2, margin: f32) -> bool {
    offset.x.abs() < half_extents.x + margin && offset.y.abs() < half_extents.y + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 8192.0;
    const H: f32 = 4096.0;

    #[test]
    fn delta_of_same_point_is_zero() {
        for x in [0.0, 1.5, 4096.0, 8191.9, 12000.0, -300.0] {
            assert_eq!(wrapped_delta_x(x, x, W), 0.0);
        }
    }

    #[test]
    fn delta_is_bounded_by_half_width() {
        let mut x = -9000.0;
        while x < 17000.0 {
            let mut y = -9000.0;
            while y < 17000.0 {
                let d = wrapped_delta_x(x, y, W);
                assert!(d.abs() <= W / 2.0, "delta({}, {}) = {}", x, y, d);
                y += 733.0;
            }
            x += 611.0;
        }
    }

    #[test]
    fn delta_crosses_the_seam_both_ways() {
        assert_eq!(wrapped_delta_x(8150.0, 100.0, W), -142.0);
        assert_eq!(wrapped_delta_x(100.0, 8150.0, W), 142.0);
        assert_eq!(wrapped_delta_x(300.0, 100.0, W), 200.0);
    }

    #[test]
    fn half_world_apart_is_negative() {
        assert_eq!(wrapped_delta_x(4096.0, 0.0, W), -W / 2.0);
        assert_eq!(wrapped_delta_x(0.0, 4096.0, W), -W / 2.0);
        assert_eq!(wrapped_delta_x(4095.0, 0.0, W), 4095.0);
    }

    #[test]
    fn normalize_stays_in_range() {
        for x in [0.0, 6.0, 8191.0, 8192.0, 8198.0, 16384.5, 100_000.0] {
            let n = normalize_x(x, W);
            assert!((0.0..W).contains(&n), "normalize({}) = {}", x, n);
        }
        assert_eq!(normalize_x(-6.0, W), 8186.0);
        assert_eq!(normalize_x(-1e-9, W), 0.0);
    }

    #[test]
    fn vertical_shift_is_not_a_wrap() {
        assert_eq!(reflect_y(100.0, H), 100.0);
        assert_eq!(reflect_y(-200.0, H), -200.0);
        assert_eq!(reflect_y(H + 6.0, H), 6.0 - H);
        assert_eq!(reflect_y(-H - 6.0, H), H - 6.0);
    }

    #[test]
    fn wrapped_distance_uses_short_way_round() {
        let a = Vec2::new(16.0, 0.0);
        let b = Vec2::new(8150.0, 0.0);
        assert!((wrapped_distance_sq(a, b, W) - 58.0 * 58.0).abs() < 1e-3);
    }

    #[test]
    fn extents_test_uses_margin() {
        let half = Vec2::new(100.0, 50.0);
        assert!(within_extents(Vec2::new(120.0, 0.0), half, 50.0));
        assert!(!within_extents(Vec2::new(160.0, 0.0), half, 50.0));
        assert!(!within_extents(Vec2::new(0.0, -120.0), half, 50.0));
    }
}
