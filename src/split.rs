use lib_math::Vec2;

/// A continuous camera target split across the two cameras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitTarget {
    /// Whole virtual pixels, for the world camera.
    pub world: Vec2,
    /// The leftover fraction in real pixels, for the screen camera.
    pub screen: Vec2,
}

/// Truncates `target` toward zero for the world camera and hands the
/// remainder, scaled by `ratio`, to the screen camera.
pub fn split_target(target: Vec2, ratio: f32) -> SplitTarget {
    let world = target.trunc();

    SplitTarget {
        world,
        screen: (target - world) * ratio,
    }
}

#[cfg(test)]
mod tests {
    use lib_math::vec2;

    use super::*;
    use crate::config::VIRTUAL_RATIO;

    fn reconstruct(split: SplitTarget, ratio: f32) -> Vec2 {
        split.world + split.screen / ratio
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).abs().max_element() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn positive_target_splits_into_floor_and_scaled_fraction() {
        let split = split_target(vec2(10.4, 3.75), VIRTUAL_RATIO);

        assert_eq!(split.world, vec2(10.0, 3.0));
        assert_close(split.screen, vec2(0.4 * 3.75, 0.75 * 3.75));
    }

    #[test]
    fn negative_target_truncates_toward_zero() {
        let split = split_target(vec2(-2.5, -0.25), VIRTUAL_RATIO);

        assert_eq!(split.world, vec2(-2.0, 0.0));
        assert_close(split.screen, vec2(-0.5 * 3.75, -0.25 * 3.75));
    }

    #[test]
    fn whole_targets_leave_no_remainder() {
        let split = split_target(vec2(20.0, -6.0), VIRTUAL_RATIO);

        assert_eq!(split.world, vec2(20.0, -6.0));
        assert_eq!(split.screen, Vec2::ZERO);
    }

    #[test]
    fn reconstruct_recovers_the_target() {
        let targets = [
            vec2(0.0, 0.0),
            vec2(0.1, 0.9),
            vec2(123.456, -78.9),
            vec2(-0.001, 1999.999),
            vec2(-4321.5, 17.25),
        ];

        for target in targets {
            for ratio in [1.0, VIRTUAL_RATIO, 4.0, 0.5] {
                assert_close(reconstruct(split_target(target, ratio), ratio), target);
            }
        }
    }
}
