use lib_math::{Color, Rect, UVec2, Vec2, uvec2, vec2};

pub const SCREEN_SIZE: UVec2 = uvec2(600, 540);
pub const VIRTUAL_SIZE: UVec2 = uvec2(160, 144);

/// Real pixels per virtual pixel, horizontally.
pub const VIRTUAL_RATIO: f32 = SCREEN_SIZE.x as f32 / VIRTUAL_SIZE.x as f32;

pub const WORLD_ZOOM: f32 = 0.5;
pub const SCREEN_ZOOM: f32 = 1.0;

/// Player movement per processed frame, in world units.
pub const PLAYER_STEP: f32 = 2.0;

/// Degrees per second.
pub const ROTATION_SPEED: f32 = 60.0;

pub const WORLD_CLEAR: Color = Color::rgb(31, 16, 42);
pub const SCREEN_CLEAR: Color = Color::RED;

pub const TILE_SIZE: f32 = 32.0;
pub const TILE_GRID: u32 = 8;

pub const GRASS_TILESET: &str = crate::asset_path!("tileset/TX Tileset Grass.png");
pub const WALL_TILESET: &str = crate::asset_path!("tileset/TX Tileset Wall.png");

/// The decorative rectangles, with how their rotation follows the scene's.
pub const SHAPES: [ShapeConfig; 3] = [
    ShapeConfig {
        rect: Rect::new(70.0, 35.0, 20.0, 20.0),
        spin: 1.0,
        phase: 0.0,
        color: Color::BLACK,
    },
    ShapeConfig {
        rect: Rect::new(90.0, 55.0, 30.0, 10.0),
        spin: -1.0,
        phase: 0.0,
        color: Color::RED,
    },
    ShapeConfig {
        rect: Rect::new(80.0, 65.0, 15.0, 25.0),
        spin: 1.0,
        phase: 45.0,
        color: Color::BLUE,
    },
];

pub const TEXT_SIZE: f32 = 20.0;
pub const SCREEN_LABEL_POS: Vec2 = vec2(10.0, 10.0);
pub const WORLD_LABEL_POS: Vec2 = vec2(10.0, 40.0);
pub const SCREEN_LABEL_COLOR: Color = Color::DARKBLUE;
pub const WORLD_LABEL_COLOR: Color = Color::DARKGREEN;

/// FPS counter offset from the top-right corner of the window.
pub const FPS_MARGIN: Vec2 = vec2(95.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
    pub rect: Rect,
    /// Multiplier applied to the shared rotation.
    pub spin: f32,
    /// Degrees added after `spin`.
    pub phase: f32,
    pub color: Color,
}
