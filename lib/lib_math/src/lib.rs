pub use glam::{Mat4, UVec2, Vec2, Vec3, Vec4, uvec2, vec2, vec3};

mod color;
mod rect;
pub use color::*;
pub use rect::*;
