use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::error::GameError;
use crate::assets::registry::SpriteId;
use crate::renderer::layer::DrawLayer;

/// Sprite id for a solid black rectangle tinted by `alpha`.
pub const FILL_SPRITE: f32 = -1.0;
/// Sprite id for a small yellow sparkle dot.
pub const SPARKLE_SPRITE: f32 = -2.0;

/// Per-instance draw data read by the canvas renderer.
/// Must match the JS reader: 12 floats = 48 bytes stride.
///
/// Positions and sizes are canvas pixels; `x`/`y` is the sprite center.
/// A zero source width or height means the whole image.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Sprite id, or one of the negative fill sentinels.
    pub sprite: f32,
    pub src_x: f32,
    pub src_y: f32,
    pub src_w: f32,
    pub src_h: f32,
    pub alpha: f32,
    pub layer: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// A whole-image sprite of the given size centered at `center`.
    pub fn sprite(layer: DrawLayer, id: SpriteId, center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x,
            y: center.y,
            width: size.x,
            height: size.y,
            sprite: id.0 as f32,
            alpha: 1.0,
            layer: layer.as_u8() as f32,
            ..Self::default()
        }
    }

    /// A solid rectangle covering `size` pixels from the canvas origin.
    pub fn fill(layer: DrawLayer, size: Vec2, alpha: f32) -> Self {
        Self {
            x: size.x / 2.0,
            y: size.y / 2.0,
            width: size.x,
            height: size.y,
            sprite: FILL_SPRITE,
            alpha,
            layer: layer.as_u8() as f32,
            ..Self::default()
        }
    }

    pub fn sparkle(layer: DrawLayer, center: Vec2, radius: f32) -> Self {
        Self {
            x: center.x,
            y: center.y,
            width: radius * 2.0,
            height: radius * 2.0,
            sprite: SPARKLE_SPRITE,
            alpha: 1.0,
            layer: layer.as_u8() as f32,
            ..Self::default()
        }
    }

    /// Restrict drawing to a source rectangle of the image.
    pub fn with_source(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.src_x = x;
        self.src_y = y;
        self.src_w = w;
        self.src_h = h;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Fixed-capacity buffer of draw instances for one frame.
pub struct DrawBuffer {
    instances: Vec<DrawInstance>,
    capacity: usize,
}

impl DrawBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Running out of room is a render failure.
    pub fn push(&mut self, instance: DrawInstance) -> Result<(), GameError> {
        if self.instances.len() >= self.capacity {
            return Err(GameError::DrawBufferFull {
                capacity: self.capacity,
            });
        }
        self.instances.push(instance);
        Ok(())
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    /// The buffer as a flat float slice, `FLOATS` per instance.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), DrawInstance::STRIDE_BYTES);
        assert_eq!(DrawInstance::FLOATS, 12);
    }

    #[test]
    fn flat_layout_matches_field_order() {
        let mut buf = DrawBuffer::new(4);
        let (center, size) = (Vec2::new(10.0, 20.0), Vec2::new(32.0, 48.0));
        let inst = DrawInstance::sprite(DrawLayer::Player, SpriteId(7), center, size)
            .with_source(32.0, 64.0, 32.0, 32.0)
            .with_rotation(0.5);
        buf.push(inst).unwrap();
        assert_eq!(
            buf.as_floats(),
            &[10.0, 20.0, 32.0, 48.0, 0.5, 7.0, 32.0, 64.0, 32.0, 32.0, 1.0, 2.0]
        );
    }

    #[test]
    fn overflow_is_an_error() {
        let mut buf = DrawBuffer::new(2);
        buf.push(DrawInstance::default()).unwrap();
        buf.push(DrawInstance::default()).unwrap();
        assert!(matches!(
            buf.push(DrawInstance::default()),
            Err(GameError::DrawBufferFull { capacity: 2 })
        ));
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert!(buf.push(DrawInstance::default()).is_ok());
    }

    #[test]
    fn fill_covers_canvas() {
        let fill = DrawInstance::fill(DrawLayer::Encounter, Vec2::new(800.0, 600.0), 0.7);
        assert_eq!((fill.x, fill.y, fill.width, fill.height), (400.0, 300.0, 800.0, 600.0));
        assert_eq!(fill.sprite, FILL_SPRITE);
    }
}
