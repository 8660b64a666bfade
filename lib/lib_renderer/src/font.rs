use image::{Rgba, RgbaImage};
use lib_math::{Rect, UVec2, Vec2, uvec2, vec2};

use crate::{Renderer, RendererContext, Texture, TextureError};

const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'~';
const ATLAS_COLUMNS: u32 = 16;

/// Atlas cell: a 5×7 glyph plus one column and one row of spacing.
pub const CELL_SIZE: UVec2 = uvec2(6, 8);

/// `draw_text` size that draws cells at their native pixel size.
pub const BASE_SIZE: f32 = 10.0;

/// Printable ASCII in 5×7, one byte per column, least significant bit on top.
#[rustfmt::skip]
const GLYPHS: [[u8; 5]; (LAST_CHAR - FIRST_CHAR + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], // ' ' '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], [0x14, 0x7F, 0x14, 0x7F, 0x14], // '"' '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62], // '$' '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], // '&' '''
    [0x00, 0x1C, 0x22, 0x41, 0x00], [0x00, 0x41, 0x22, 0x1C, 0x00], // '(' ')'
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], [0x08, 0x08, 0x3E, 0x08, 0x08], // '*' '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], // ',' '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], [0x20, 0x10, 0x08, 0x04, 0x02], // '.' '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00], // '0' '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4B, 0x31], // '2' '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], [0x27, 0x45, 0x45, 0x45, 0x39], // '4' '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03], // '6' '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1E], // '8' '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], [0x00, 0x56, 0x36, 0x00, 0x00], // ':' ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14], // '<' '='
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], // '>' '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], [0x7E, 0x11, 0x11, 0x11, 0x7E], // '@' 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22], // 'B' 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], [0x7F, 0x49, 0x49, 0x49, 0x41], // 'D' 'E'
    [0x7F, 0x09, 0x09, 0x01, 0x01], [0x3E, 0x41, 0x41, 0x51, 0x32], // 'F' 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00], // 'H' 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], // 'J' 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], [0x7F, 0x02, 0x04, 0x02, 0x7F], // 'L' 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'N' 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'P' 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], [0x46, 0x49, 0x49, 0x49, 0x31], // 'R' 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'T' 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x7F, 0x20, 0x18, 0x20, 0x7F], // 'V' 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], [0x03, 0x04, 0x78, 0x04, 0x03], // 'X' 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x00], // 'Z' '['
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7F, 0x00], // '\' ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], [0x40, 0x40, 0x40, 0x40, 0x40], // '^' '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78], // '`' 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], // 'b' 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], [0x38, 0x54, 0x54, 0x54, 0x18], // 'd' 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'f' 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], // 'h' 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], [0x7F, 0x10, 0x28, 0x44, 0x00], // 'j' 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x18, 0x04, 0x78], // 'l' 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], // 'n' 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], [0x08, 0x14, 0x14, 0x18, 0x7C], // 'p' 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20], // 'r' 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], [0x3C, 0x40, 0x40, 0x20, 0x7C], // 't' 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'v' 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'x' 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], // 'z' '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], [0x00, 0x41, 0x36, 0x08, 0x00], // '|' '}'
    [0x08, 0x04, 0x08, 0x10, 0x08],                                 // '~'
];

/// A bitmap font uploaded as a single atlas texture.
#[derive(Debug)]
pub struct Font {
    texture: Texture,
}

impl Font {
    pub fn builtin(renderer: &Renderer, ctx: RendererContext<'_>) -> Result<Self, TextureError> {
        Ok(Self {
            texture: renderer.create_texture(&rasterize_atlas(), ctx)?,
        })
    }

    pub(crate) fn texture(&self) -> &Texture {
        &self.texture
    }
}

/// Atlas cell of `c`, or `None` for characters the font does not cover.
pub fn glyph_source(c: char) -> Option<Rect> {
    let index = glyph_index(c)?;

    Some(Rect::from_pos_size(
        (uvec2(index % ATLAS_COLUMNS, index / ATLAS_COLUMNS) * CELL_SIZE).as_vec2(),
        CELL_SIZE.as_vec2(),
    ))
}

/// Destination rectangles of every drawn glyph in `text`, in order.
pub fn layout_text(text: &str, position: Vec2, size: f32) -> impl Iterator<Item = (Rect, Rect)> {
    let scale = size / BASE_SIZE;
    let advance = CELL_SIZE.x as f32 * scale;

    text.chars().enumerate().filter_map(move |(i, c)| {
        let source = glyph_source(c)?;
        let dest = Rect::from_pos_size(
            position + vec2(i as f32 * advance, 0.0),
            CELL_SIZE.as_vec2() * scale,
        );

        Some((source, dest))
    })
}

/// Width in pixels of `text` drawn at `size`.
pub fn measure_text(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * CELL_SIZE.x as f32 * size / BASE_SIZE
}

fn glyph_index(c: char) -> Option<u32> {
    let byte = u8::try_from(c).ok()?;

    (FIRST_CHAR..=LAST_CHAR)
        .contains(&byte)
        .then(|| (byte - FIRST_CHAR) as u32)
}

pub(crate) fn rasterize_atlas() -> RgbaImage {
    let rows = (GLYPHS.len() as u32).div_ceil(ATLAS_COLUMNS);
    let mut atlas = RgbaImage::new(ATLAS_COLUMNS * CELL_SIZE.x, rows * CELL_SIZE.y);

    for (index, columns) in GLYPHS.iter().enumerate() {
        let index = index as u32;
        let cell = uvec2(index % ATLAS_COLUMNS, index / ATLAS_COLUMNS) * CELL_SIZE;

        for (x, bits) in columns.iter().enumerate() {
            for y in 0..7 {
                if bits >> y & 1 == 1 {
                    atlas.put_pixel(cell.x + x as u32, cell.y + y, Rgba([255, 255, 255, 255]));
                }
            }
        }
    }

    atlas
}
