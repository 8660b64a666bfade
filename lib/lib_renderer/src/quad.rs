use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use lib_gpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};
use lib_math::{Color, Rect, UVec2, Vec2, vec2};

/// One instanced, optionally rotated and textured rectangle.
///
/// The vertex shader places corner `c` (in `0..=1`) at
/// `position + rotate(rotation) * (c * size - origin)` and samples
/// `uv_min + c * uv_size`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Quad {
    pub position: Vec2,
    pub size: Vec2,
    pub origin: Vec2,
    /// Radians, clockwise on a y-down target.
    pub rotation: f32,
    pub uv_min: Vec2,
    pub uv_size: Vec2,
    /// Linear RGBA tint.
    pub color: [f32; 4],
}

impl Quad {
    /// A quad covering the whole texture, used with the 1×1 white texture
    /// for flat shapes.
    pub fn solid(rect: Rect, origin: Vec2, rotation: f32, color: Color) -> Self {
        Self {
            position: rect.pos(),
            size: rect.size(),
            origin,
            rotation: rotation.to_radians(),
            uv_min: Vec2::ZERO,
            uv_size: Vec2::ONE,
            color: color.to_linear(),
        }
    }

    pub fn textured(
        texture_size: UVec2,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) -> Self {
        let (uv_min, uv_size) = source_uv(texture_size, source);

        Self {
            position: dest.pos(),
            size: dest.size(),
            origin,
            rotation: rotation.to_radians(),
            uv_min,
            uv_size,
            color: tint.to_linear(),
        }
    }
}

/// Normalized `(uv_min, uv_size)` for a pixel-space source rectangle.
///
/// A negative width or height samples the same pixels mirrored on that axis.
pub fn source_uv(texture_size: UVec2, source: Rect) -> (Vec2, Vec2) {
    let texture_size = texture_size.as_vec2();

    let min = vec2(
        source.x - source.width.min(0.0),
        source.y - source.height.min(0.0),
    );

    (min / texture_size, source.size() / texture_size)
}

pub(crate) const CORNERS: [Vec2; 4] = [
    vec2(0.0, 0.0),
    vec2(1.0, 0.0),
    vec2(1.0, 1.0),
    vec2(0.0, 1.0),
];

pub(crate) const CORNER_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

pub(crate) const CORNER_BUFFER_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: size_of::<Vec2>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &[VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }],
};

pub(crate) const QUAD_BUFFER_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: size_of::<Quad>() as u64,
    step_mode: VertexStepMode::Instance,
    attributes: &[
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Quad, position) as u64,
            shader_location: 1,
        },
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Quad, size) as u64,
            shader_location: 2,
        },
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Quad, origin) as u64,
            shader_location: 3,
        },
        VertexAttribute {
            format: VertexFormat::Float32,
            offset: offset_of!(Quad, rotation) as u64,
            shader_location: 4,
        },
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Quad, uv_min) as u64,
            shader_location: 5,
        },
        VertexAttribute {
            format: VertexFormat::Float32x2,
            offset: offset_of!(Quad, uv_size) as u64,
            shader_location: 6,
        },
        VertexAttribute {
            format: VertexFormat::Float32x4,
            offset: offset_of!(Quad, color) as u64,
            shader_location: 7,
        },
    ],
};

#[cfg(test)]
mod tests {
    use lib_math::uvec2;

    use super::*;

    #[test]
    fn tile_source_maps_to_atlas_fraction() {
        let (min, size) = source_uv(uvec2(256, 256), Rect::new(64.0, 32.0, 32.0, 32.0));

        assert_eq!(min, vec2(0.25, 0.125));
        assert_eq!(size, vec2(0.125, 0.125));
    }

    #[test]
    fn negative_height_flips_vertically() {
        let (min, size) = source_uv(uvec2(160, 144), Rect::new(0.0, 0.0, 160.0, -144.0));

        // top edge samples v = 1, bottom edge samples v = 0
        assert_eq!(min, vec2(0.0, 1.0));
        assert_eq!(min + size, vec2(1.0, 0.0));
    }

    #[test]
    fn negative_width_flips_horizontally() {
        let (min, size) = source_uv(uvec2(100, 100), Rect::new(10.0, 0.0, -20.0, 50.0));

        assert_eq!(min.x, 0.3);
        assert!(((min.x + size.x) - 0.1).abs() < 1e-6);
        assert_eq!(size.y, 0.5);
    }

    #[test]
    fn solid_quad_converts_degrees_and_color() {
        let quad = Quad::solid(
            Rect::new(70.0, 35.0, 20.0, 20.0),
            Vec2::ZERO,
            180.0,
            Color::BLACK,
        );

        assert_eq!(quad.position, vec2(70.0, 35.0));
        assert_eq!(quad.size, vec2(20.0, 20.0));
        assert!((quad.rotation - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(quad.color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn quad_has_no_padding() {
        assert_eq!(size_of::<Quad>(), 15 * size_of::<f32>());
    }
}
