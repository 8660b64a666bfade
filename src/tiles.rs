use lib_math::{Color, Rect, Vec2, vec2};
use lib_renderer::{RenderPass, Texture};

use crate::config::{TILE_GRID, TILE_SIZE};

/// Source rectangle and world position of tile `(i, j)`.
pub fn tile(i: u32, j: u32) -> (Rect, Vec2) {
    let pos = vec2(i as f32, j as f32) * TILE_SIZE;

    (Rect::from_pos_size(pos, Vec2::splat(TILE_SIZE)), pos)
}

/// Every tile of the grid, column by column.
pub fn tileset_layout() -> impl Iterator<Item = (Rect, Vec2)> {
    (0..TILE_GRID).flat_map(|i| (0..TILE_GRID).map(move |j| tile(i, j)))
}

/// Copies the atlas one tile at a time onto the same spot in the world.
pub fn draw_tileset<'a>(pass: &mut RenderPass<'a>, tileset: &'a Texture) {
    for (source, position) in tileset_layout() {
        pass.draw_texture_rec(tileset, source, position, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_sixty_four_tiles() {
        assert_eq!(tileset_layout().count(), 64);
    }

    #[test]
    fn tiles_sample_where_they_are_drawn() {
        for (source, position) in tileset_layout() {
            assert_eq!(source.pos(), position);
            assert_eq!(source.size(), vec2(32.0, 32.0));
        }
    }

    #[test]
    fn grid_covers_a_256_pixel_square() {
        let (first, _) = tile(0, 0);
        let (last, last_pos) = tile(7, 7);

        assert_eq!(first, Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(last_pos, vec2(224.0, 224.0));
        assert_eq!(last.x + last.width, 256.0);
    }

    #[test]
    fn tiles_iterate_column_major() {
        let positions = tileset_layout()
            .take(3)
            .map(|(_, position)| position)
            .collect::<Vec<_>>();

        assert_eq!(
            positions,
            [vec2(0.0, 0.0), vec2(0.0, 32.0), vec2(0.0, 64.0)]
        );
    }
}
