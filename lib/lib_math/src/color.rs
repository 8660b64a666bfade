use bytemuck::{Pod, Zeroable};

/// An 8-bit sRGB color with straight alpha.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const BLANK: Self = Self::rgba(0, 0, 0, 0);
    pub const RED: Self = Self::rgb(230, 41, 55);
    pub const ORANGE: Self = Self::rgb(255, 161, 0);
    pub const LIME: Self = Self::rgb(0, 158, 47);
    pub const BLUE: Self = Self::rgb(0, 121, 241);
    pub const DARKBLUE: Self = Self::rgb(0, 82, 172);
    pub const DARKGREEN: Self = Self::rgb(0, 117, 44);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear-light RGBA in `0.0..=1.0`, alpha left untouched.
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a as f32 / 255.0,
        ]
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;

    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
