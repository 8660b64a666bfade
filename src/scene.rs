use lib_math::{Color, Rect, Vec2, vec2};

use crate::{
    config::{PLAYER_STEP, ROTATION_SPEED, SHAPES},
    input::Input,
};

/// Everything the demo simulates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scene {
    /// Degrees, unbounded.
    pub rotation: f32,
    /// Unbounded, y grows downward.
    pub player: Vec2,
}

/// A rectangle ready to draw, rotated about its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub rect: Rect,
    pub rotation: f32,
    pub color: Color,
}

impl Scene {
    /// Advances one frame: spins the shapes by `delta_time` seconds and moves
    /// the player by one step per held direction.
    pub fn advance(&mut self, input: &Input, delta_time: f32) {
        self.rotation += ROTATION_SPEED * delta_time;
        self.step(input);
    }

    pub fn step(&mut self, input: &Input) {
        let dir = vec2(input.x.value() as f32, input.y.value() as f32);

        self.player += dir * PLAYER_STEP;
    }

    pub fn shapes(&self) -> [Shape; SHAPES.len()] {
        SHAPES.map(|shape| Shape {
            rect: shape.rect,
            rotation: self.rotation * shape.spin + shape.phase,
            color: shape.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use lib_input::{Axis, Button};

    use super::*;
    use crate::{config::VIRTUAL_RATIO, split::split_target};

    fn held(is_held: bool) -> Button {
        Button {
            is_held,
            ..Button::default()
        }
    }

    fn input(right: bool, left: bool, down: bool, up: bool) -> Input {
        Input {
            x: Axis {
                positive: held(right),
                negative: held(left),
            },
            y: Axis {
                positive: held(down),
                negative: held(up),
            },
            quit: Button::default(),
        }
    }

    #[test]
    fn rotation_follows_elapsed_time() {
        let mut scene = Scene::default();
        let dt = 1.0 / 60.0;

        for _ in 0..(60 * 3) {
            scene.advance(&Input::default(), dt);
        }

        assert!((scene.rotation - 180.0).abs() < 1e-2, "{}", scene.rotation);
        assert_eq!(scene.player, Vec2::ZERO);
    }

    #[test]
    fn each_direction_moves_one_step() {
        let cases = [
            (input(true, false, false, false), vec2(2.0, 0.0)),
            (input(false, true, false, false), vec2(-2.0, 0.0)),
            (input(false, false, true, false), vec2(0.0, 2.0)),
            (input(false, false, false, true), vec2(0.0, -2.0)),
            (input(true, false, false, true), vec2(2.0, -2.0)),
        ];

        for (input, expected) in cases {
            let mut scene = Scene::default();
            scene.step(&input);

            assert_eq!(scene.player, expected);
        }
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut scene = Scene::default();

        scene.step(&input(true, true, true, true));

        assert_eq!(scene.player, Vec2::ZERO);
    }

    #[test]
    fn holding_right_for_ten_frames() {
        let mut scene = Scene::default();

        for _ in 0..10 {
            scene.advance(&input(true, false, false, false), 1.0 / 60.0);

            let split = split_target(scene.player, VIRTUAL_RATIO);
            assert_eq!(split.world.x, scene.player.x.trunc());
            assert_eq!(split.world.y, 0.0);
        }

        assert_eq!(scene.player, vec2(20.0, 0.0));
    }

    #[test]
    fn shapes_spin_at_their_own_rates() {
        let scene = Scene {
            rotation: 30.0,
            player: Vec2::ZERO,
        };

        let [first, second, third] = scene.shapes();

        assert_eq!(first.rotation, 30.0);
        assert_eq!(second.rotation, -30.0);
        assert_eq!(third.rotation, 75.0);
        assert_eq!(first.rect, Rect::new(70.0, 35.0, 20.0, 20.0));
        assert_eq!(second.color, Color::RED);
        assert_eq!(third.color, Color::BLUE);
    }
}
