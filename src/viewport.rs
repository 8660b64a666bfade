use lib_math::{Rect, UVec2, Vec2};

/// The whole virtual-resolution target, read upright.
///
/// Render targets keep their rows bottom-up, so the height is negated.
pub fn upscale_source(virtual_size: UVec2) -> Rect {
    Rect::from_pos_size(Vec2::ZERO, virtual_size.as_vec2()).flip_y()
}

/// Where the virtual-resolution target lands on the window.
///
/// The destination spills one ratio unit past every window edge, so the
/// sub-pixel screen camera offset never uncovers the clear color.
pub fn upscale_dest(screen_size: UVec2, ratio: f32) -> Rect {
    Rect::from_pos_size(Vec2::ZERO, screen_size.as_vec2()).expand(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SCREEN_SIZE, VIRTUAL_RATIO, VIRTUAL_SIZE};

    #[test]
    fn ratio_is_horizontal_scale() {
        assert_eq!(VIRTUAL_RATIO, 3.75);
    }

    #[test]
    fn source_negates_target_height() {
        assert_eq!(
            upscale_source(VIRTUAL_SIZE),
            Rect::new(0.0, 0.0, 160.0, -144.0)
        );
    }

    #[test]
    fn dest_extends_one_ratio_unit_past_each_edge() {
        let dest = upscale_dest(SCREEN_SIZE, VIRTUAL_RATIO);

        assert_eq!(dest, Rect::new(-3.75, -3.75, 607.5, 547.5));
        assert_eq!(dest.x + dest.width, 600.0 + 3.75);
        assert_eq!(dest.y + dest.height, 540.0 + 3.75);
    }
}
