pub use wgpu::*;
pub use wgpu::util::{BufferInitDescriptor, DeviceExt};

/// Picks the first sRGB format a surface supports, falling back to its
/// preferred format.
///
/// Colors are uploaded in linear space, so an sRGB surface is what makes
/// them come out right on screen.
pub fn preferred_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_format_wins() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];

        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];

        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(preferred_surface_format(&[]), None);
    }
}
