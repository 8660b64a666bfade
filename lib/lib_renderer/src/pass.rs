use std::ops::Range;

use lib_gpu::{
    CommandEncoderDescriptor, IndexFormat, LoadOp, Operations, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureView,
};
use lib_math::{Color, Mat4, Rect, UVec2, Vec2};

use crate::{
    Camera2d, Font, Quad, RenderTarget, Renderer, RendererContext, Texture, font, pixel_projection,
};

/// Where a [`RenderPass`] draws.
#[derive(Debug, Clone, Copy)]
pub enum PassTarget<'a> {
    Texture(&'a RenderTarget),
    Surface { view: &'a TextureView, size: UVec2 },
}

/// Collects draw calls for one target and submits them when dropped.
///
/// Draws are issued in call order. Consecutive draws that share a texture and
/// a camera end up in the same instanced draw call.
pub struct RenderPass<'a> {
    renderer: &'a mut Renderer,
    ctx: RendererContext<'a>,
    target: PassTarget<'a>,
    clear_color: Color,
    projection: Mat4,
    camera: u32,
    cameras: Vec<Mat4>,
    quads: Vec<Quad>,
    batches: Vec<Batch<BatchTexture<'a>>>,
}

#[derive(Debug, Clone, Copy)]
enum BatchTexture<'a> {
    White,
    Texture(&'a Texture),
}

#[derive(Debug, Clone, PartialEq)]
struct Batch<K> {
    key: K,
    camera: u32,
    quads: Range<u32>,
}

impl PassTarget<'_> {
    pub fn size(&self) -> UVec2 {
        match self {
            Self::Texture(target) => target.size(),
            Self::Surface { size, .. } => *size,
        }
    }

    fn view(&self) -> &TextureView {
        match self {
            Self::Texture(target) => target.view(),
            Self::Surface { view, .. } => view,
        }
    }

    fn is_bottom_up(&self) -> bool {
        matches!(self, Self::Texture(_))
    }
}

impl Renderer {
    /// Starts a pass that clears `target` to `clear_color`.
    pub fn begin_pass<'a>(
        &'a mut self,
        target: PassTarget<'a>,
        clear_color: Color,
        ctx: RendererContext<'a>,
    ) -> RenderPass<'a> {
        let projection = pixel_projection(target.size(), target.is_bottom_up());

        let mut cameras = std::mem::take(&mut self.camera_vec);
        cameras.push(projection);

        RenderPass {
            quads: std::mem::take(&mut self.quad_vec),
            renderer: self,
            ctx,
            target,
            clear_color,
            projection,
            camera: 0,
            cameras,
            batches: Vec::new(),
        }
    }
}

impl<'a> RenderPass<'a> {
    /// Draws everything after this call through `camera`, or straight in
    /// target pixels with `None`.
    pub fn set_camera(&mut self, camera: Option<&Camera2d>) {
        let matrix = match camera {
            Some(camera) => self.projection * camera.matrix(),
            None => self.projection,
        };

        if self.cameras.last() != Some(&matrix) {
            self.cameras.push(matrix);
        }

        self.camera = (self.cameras.len() - 1) as u32;
    }

    /// Draws the `source` part of `texture` into `dest`, rotated by
    /// `rotation` degrees about `origin` (relative to `dest`'s top-left).
    pub fn draw_texture_pro(
        &mut self,
        texture: &'a Texture,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) {
        self.push(
            BatchTexture::Texture(texture),
            Quad::textured(texture.size(), source, dest, origin, rotation, tint),
        );
    }

    /// Draws the `source` part of `texture` unscaled with its top-left at
    /// `position`.
    pub fn draw_texture_rec(
        &mut self,
        texture: &'a Texture,
        source: Rect,
        position: Vec2,
        tint: Color,
    ) {
        let dest = Rect::from_pos_size(position, source.size().abs());

        self.draw_texture_pro(texture, source, dest, Vec2::ZERO, 0.0, tint);
    }

    pub fn draw_rectangle_pro(&mut self, rect: Rect, origin: Vec2, rotation: f32, color: Color) {
        self.push(BatchTexture::White, Quad::solid(rect, origin, rotation, color));
    }

    pub fn draw_text(
        &mut self,
        font: &'a Font,
        text: &str,
        position: Vec2,
        size: f32,
        color: Color,
    ) {
        for (source, dest) in font::layout_text(text, position, size) {
            self.draw_texture_pro(font.texture(), source, dest, Vec2::ZERO, 0.0, color);
        }
    }

    fn push(&mut self, texture: BatchTexture<'a>, quad: Quad) {
        let index = self.quads.len() as u32;
        self.quads.push(quad);

        extend_batches(&mut self.batches, texture, self.camera, index);
    }
}

impl Drop for RenderPass<'_> {
    fn drop(&mut self) {
        let ctx = self.ctx;
        let renderer = &mut *self.renderer;

        renderer
            .camera_buf
            .write(&self.cameras, &renderer.camera_layout, ctx);
        renderer.quad_buf.write(&self.quads, ctx);

        let mut encoder = ctx
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("renderer pass encoder"),
            });

        let [r, g, b, a] = self.clear_color.to_linear();

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("renderer pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: self.target.view(),
                depth_slice: None,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(lib_gpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if !self.quads.is_empty() {
            pass.set_pipeline(match self.target {
                PassTarget::Texture(_) => &renderer.target_pipeline,
                PassTarget::Surface { .. } => &renderer.surface_pipeline,
            });
            pass.set_vertex_buffer(0, renderer.vertex_buf.slice(..));
            pass.set_vertex_buffer(1, renderer.quad_buf.slice(self.quads.len()));
            pass.set_index_buffer(renderer.index_buf.slice(..), IndexFormat::Uint16);

            for batch in &self.batches {
                let bind_group = match batch.key {
                    BatchTexture::White => renderer.white.bind_group(),
                    BatchTexture::Texture(texture) => texture.bind_group(),
                };

                pass.set_bind_group(
                    0,
                    renderer.camera_buf.bind_group(),
                    &[renderer.camera_buf.offset_of(batch.camera)],
                );
                pass.set_bind_group(1, bind_group, &[]);
                pass.draw_indexed(0..6, 0, batch.quads.clone());
            }
        }

        drop(pass);

        ctx.queue.submit([encoder.finish()]);

        self.quads.clear();
        self.cameras.clear();
        renderer.quad_vec = std::mem::take(&mut self.quads);
        renderer.camera_vec = std::mem::take(&mut self.cameras);
    }
}

impl PartialEq for BatchTexture<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::White, Self::White) => true,
            (Self::Texture(a), Self::Texture(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

/// Appends quad `index` to the last batch if it shares `key` and `camera`,
/// otherwise opens a new batch.
fn extend_batches<K: PartialEq>(batches: &mut Vec<Batch<K>>, key: K, camera: u32, index: u32) {
    if let Some(last) = batches.last_mut()
        && last.key == key
        && last.camera == camera
        && last.quads.end == index
    {
        last.quads.end += 1;
        return;
    }

    batches.push(Batch {
        key,
        camera,
        quads: index..index + 1,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batches_of(draws: &[(char, u32)]) -> Vec<Batch<char>> {
        let mut batches = Vec::new();

        for (index, &(key, camera)) in draws.iter().enumerate() {
            extend_batches(&mut batches, key, camera, index as u32);
        }

        batches
    }

    #[test]
    fn same_texture_and_camera_share_a_batch() {
        assert_eq!(
            batches_of(&[('a', 0), ('a', 0), ('a', 0)]),
            [Batch {
                key: 'a',
                camera: 0,
                quads: 0..3,
            }]
        );
    }

    #[test]
    fn switches_split_batches_in_draw_order() {
        let batches = batches_of(&[('a', 0), ('b', 0), ('b', 1), ('a', 1), ('a', 1)]);

        assert_eq!(
            batches
                .iter()
                .map(|batch| (batch.key, batch.camera, batch.quads.clone()))
                .collect::<Vec<_>>(),
            [('a', 0, 0..1), ('b', 0, 1..2), ('b', 1, 2..3), ('a', 1, 3..5)]
        );
    }

    #[test]
    fn returning_to_an_earlier_texture_keeps_order() {
        let batches = batches_of(&[('a', 0), ('b', 0), ('a', 0)]);

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].quads, 2..3);
    }
}
