use std::num::NonZeroU64;

use lib_gpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, Buffer, BufferBinding,
    BufferDescriptor, BufferUsages, BindingResource,
};
use lib_math::{Mat4, UVec2, Vec2, vec3};

use crate::RendererContext;

/// A 2D camera with raylib `Camera2D` semantics.
///
/// A world point `p` lands on the target at
/// `offset + rotate(rotation) * zoom * (p - target)`, so `target` appears at
/// `offset` and `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2d {
    pub offset: Vec2,
    pub target: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            target: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera2d {
    pub fn with_zoom(zoom: f32) -> Self {
        Self {
            zoom,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset.extend(0.0))
            * Mat4::from_rotation_z(self.rotation.to_radians())
            * Mat4::from_scale(vec3(self.zoom, self.zoom, 1.0))
            * Mat4::from_translation((-self.target).extend(0.0))
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.matrix().transform_point3(point.extend(0.0)).truncate()
    }
}

/// Orthographic projection from target pixels to clip space, origin at the
/// top-left.
///
/// With `bottom_up` the image is stored with its first row at the bottom of
/// the texture, the way render targets are kept.
pub fn pixel_projection(size: UVec2, bottom_up: bool) -> Mat4 {
    let width = size.x as f32;
    let height = size.y as f32;

    if bottom_up {
        Mat4::orthographic_rh(0.0, width, 0.0, height, -1.0, 1.0)
    } else {
        Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
    }
}

/// One view-projection matrix per camera switch, addressed with dynamic
/// offsets.
#[derive(Debug)]
pub(crate) struct CameraBuffer {
    buf: Buffer,
    bind_group: BindGroup,
    stride: u64,
    cap: usize,
}

impl CameraBuffer {
    pub fn new(cap: usize, layout: &BindGroupLayout, ctx: RendererContext<'_>) -> Self {
        let stride = (ctx.device.limits().min_uniform_buffer_offset_alignment as u64)
            .max(size_of::<Mat4>() as u64);

        let buf = ctx.device.create_buffer(&BufferDescriptor {
            label: Some("renderer camera buffer"),
            size: stride * cap as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("renderer camera bind group"),
            layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer(BufferBinding {
                    buffer: &buf,
                    offset: 0,
                    size: NonZeroU64::new(size_of::<Mat4>() as u64),
                }),
            }],
        });

        Self {
            buf,
            bind_group,
            stride,
            cap,
        }
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    pub fn offset_of(&self, index: u32) -> u32 {
        (index as u64 * self.stride) as u32
    }

    pub fn write(&mut self, matrices: &[Mat4], layout: &BindGroupLayout, ctx: RendererContext<'_>) {
        if matrices.len() > self.cap {
            *self = Self::new(matrices.len().next_power_of_two(), layout, ctx);
        }

        let mut bytes = vec![0u8; self.stride as usize * matrices.len()];

        for (chunk, matrix) in bytes.chunks_exact_mut(self.stride as usize).zip(matrices) {
            chunk[..size_of::<Mat4>()].copy_from_slice(bytemuck::bytes_of(matrix));
        }

        if !bytes.is_empty() {
            ctx.queue.write_buffer(&self.buf, 0, &bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use lib_math::{uvec2, vec2};

    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn default_camera_is_identity() {
        assert_eq!(Camera2d::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn zoomed_camera_maps_target_to_offset() {
        let camera = Camera2d {
            offset: vec2(5.0, 6.0),
            target: vec2(10.0, 4.0),
            rotation: 0.0,
            zoom: 0.5,
        };

        assert_close(camera.world_to_screen(vec2(10.0, 4.0)), vec2(5.0, 6.0));
        assert_close(camera.world_to_screen(vec2(30.0, 14.0)), vec2(15.0, 11.0));
    }

    #[test]
    fn rotation_turns_about_offset() {
        let camera = Camera2d {
            rotation: 90.0,
            ..Camera2d::default()
        };

        assert_close(camera.world_to_screen(vec2(1.0, 0.0)), vec2(0.0, 1.0));
    }

    #[test]
    fn screen_projection_puts_origin_top_left() {
        let proj = pixel_projection(uvec2(600, 540), false);

        let top_left = proj.transform_point3(vec3(0.0, 0.0, 0.0));
        let bottom_right = proj.transform_point3(vec3(600.0, 540.0, 0.0));

        assert_close(top_left.truncate(), vec2(-1.0, 1.0));
        assert_close(bottom_right.truncate(), vec2(1.0, -1.0));
        assert!((0.0..=1.0).contains(&top_left.z));
    }

    #[test]
    fn bottom_up_projection_stores_first_row_last() {
        let proj = pixel_projection(uvec2(160, 144), true);

        let top_left = proj.transform_point3(vec3(0.0, 0.0, 0.0));

        assert_close(top_left.truncate(), vec2(-1.0, -1.0));
    }
}
