use glam::{Vec2, vec2};

/// An axis-aligned rectangle given by its top-left corner and its size.
///
/// Width and height may be negative. Renderers treat a negative extent on a
/// source rectangle as a flip along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        vec2(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    pub fn flip_y(&self) -> Self {
        Self::new(self.x, self.y, self.width, -self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_grows_every_side() {
        let rect = Rect::new(0.0, 0.0, 600.0, 540.0).expand(3.75);

        assert_eq!(rect, Rect::new(-3.75, -3.75, 607.5, 547.5));
    }

    #[test]
    fn flip_y_negates_height_only() {
        let rect = Rect::new(1.0, 2.0, 160.0, 144.0).flip_y();

        assert_eq!(rect.pos(), vec2(1.0, 2.0));
        assert_eq!(rect.size(), vec2(160.0, -144.0));
    }
}
