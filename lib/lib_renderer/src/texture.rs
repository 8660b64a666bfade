use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use image::{EncodableLayout, RgbaImage};
use lib_gpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindingResource, Extent3d,
    Origin3d, Sampler, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture as GpuTexture,
    TextureAspect, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView, TextureViewDescriptor,
};
use lib_math::{UVec2, uvec2};
use thiserror::Error;

use crate::{Renderer, RendererContext};

/// Format of every texture and render target the renderer creates.
pub const TEXTURE_FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture size {width}x{height} exceeds the device limit of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("texture size must be non-zero, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

/// A sampled GPU texture with its own bind group.
#[derive(Debug)]
pub struct Texture {
    id: u64,
    raw: GpuTexture,
    view: TextureView,
    bind_group: BindGroup,
    size: UVec2,
}

/// A texture that passes can draw into.
///
/// Its rows are stored bottom-up: draw it with a source rectangle of negated
/// height to see it the right way round.
#[derive(Debug)]
pub struct RenderTarget {
    texture: Texture,
}

impl Texture {
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }
}

impl RenderTarget {
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn size(&self) -> UVec2 {
        self.texture.size
    }

    pub(crate) fn view(&self) -> &TextureView {
        &self.texture.view
    }
}

impl Renderer {
    pub fn create_texture(
        &self,
        image: &RgbaImage,
        ctx: RendererContext<'_>,
    ) -> Result<Texture, TextureError> {
        check_size(
            uvec2(image.width(), image.height()),
            ctx.device.limits().max_texture_dimension_2d,
        )?;

        Ok(upload_image(image, &self.texture_layout, &self.sampler, ctx))
    }

    pub fn load_texture(
        &self,
        path: impl AsRef<Path>,
        ctx: RendererContext<'_>,
    ) -> Result<Texture, TextureError> {
        let path = path.as_ref();

        let image = image::open(path)
            .map_err(|source| TextureError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let texture = self.create_texture(&image, ctx)?;

        tracing::info!(
            ?path,
            width = texture.width(),
            height = texture.height(),
            "loaded texture"
        );

        Ok(texture)
    }

    /// Like [`Renderer::load_texture`], but falls back to a 1×1 transparent
    /// texture so a missing asset only leaves a hole in the frame.
    pub fn load_texture_or_placeholder(
        &self,
        path: impl AsRef<Path>,
        ctx: RendererContext<'_>,
    ) -> Texture {
        match self.load_texture(&path, ctx) {
            Ok(texture) => texture,
            Err(error) => {
                tracing::warn!(
                    error = &error as &dyn std::error::Error,
                    "using placeholder texture"
                );

                self.placeholder_texture(ctx)
            }
        }
    }

    pub fn create_render_target(
        &self,
        size: UVec2,
        ctx: RendererContext<'_>,
    ) -> Result<RenderTarget, TextureError> {
        check_size(size, ctx.device.limits().max_texture_dimension_2d)?;

        let texture = create_texture_raw(
            size,
            TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
            "renderer render target",
            &self.texture_layout,
            &self.sampler,
            ctx,
        );

        Ok(RenderTarget { texture })
    }

    fn placeholder_texture(&self, ctx: RendererContext<'_>) -> Texture {
        solid_texture([0, 0, 0, 0], &self.texture_layout, &self.sampler, ctx)
    }
}

pub(crate) fn solid_texture(
    rgba: [u8; 4],
    layout: &BindGroupLayout,
    sampler: &Sampler,
    ctx: RendererContext<'_>,
) -> Texture {
    upload_image(
        &RgbaImage::from_pixel(1, 1, image::Rgba(rgba)),
        layout,
        sampler,
        ctx,
    )
}

fn upload_image(
    image: &RgbaImage,
    layout: &BindGroupLayout,
    sampler: &Sampler,
    ctx: RendererContext<'_>,
) -> Texture {
    let texture = create_texture_raw(
        uvec2(image.width(), image.height()),
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        "renderer texture",
        layout,
        sampler,
        ctx,
    );

    ctx.queue.write_texture(
        TexelCopyTextureInfo {
            texture: &texture.raw,
            aspect: TextureAspect::All,
            mip_level: 0,
            origin: Origin3d::ZERO,
        },
        image.as_bytes(),
        TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.width() * 4),
            rows_per_image: Some(image.height()),
        },
        texture.raw.size(),
    );

    texture
}

fn create_texture_raw(
    size: UVec2,
    usage: TextureUsages,
    label: &str,
    layout: &BindGroupLayout,
    sampler: &Sampler,
    ctx: RendererContext<'_>,
) -> Texture {
    let raw = ctx.device.create_texture(&TextureDescriptor {
        label: Some(label),
        size: Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage,
        view_formats: &[],
    });

    let view = raw.create_view(&TextureViewDescriptor::default());

    let bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            BindGroupEntry {
                binding: 0,
                resource: BindingResource::TextureView(&view),
            },
            BindGroupEntry {
                binding: 1,
                resource: BindingResource::Sampler(sampler),
            },
        ],
    });

    Texture {
        id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
        raw,
        view,
        bind_group,
        size,
    }
}

fn check_size(size: UVec2, max: u32) -> Result<(), TextureError> {
    if size.x == 0 || size.y == 0 {
        return Err(TextureError::Empty {
            width: size.x,
            height: size.y,
        });
    }

    if size.x > max || size.y > max {
        return Err(TextureError::TooLarge {
            width: size.x,
            height: size.y,
            max,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_the_path() {
        let error = TextureError::Load {
            path: PathBuf::from("assets/missing.png"),
            source: image::ImageError::IoError(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            )),
        };

        assert!(error.to_string().contains("assets/missing.png"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn size_checks_reject_empty_and_oversized() {
        assert!(check_size(uvec2(256, 256), 8192).is_ok());
        assert!(matches!(
            check_size(uvec2(0, 4), 8192),
            Err(TextureError::Empty { width: 0, height: 4 })
        ));
        assert!(matches!(
            check_size(uvec2(9000, 16), 8192),
            Err(TextureError::TooLarge { max: 8192, .. })
        ));
    }

    #[test]
    fn too_large_error_reports_limit() {
        let error = TextureError::TooLarge {
            width: 9000,
            height: 16,
            max: 8192,
        };

        assert_eq!(
            error.to_string(),
            "texture size 9000x16 exceeds the device limit of 8192"
        );
    }
}
