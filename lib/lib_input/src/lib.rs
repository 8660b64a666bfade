use std::fmt::Debug;

use lib_math::{Vec2, vec2};
use lib_window::ButtonCode;

mod axis;
mod button;
pub use axis::*;
pub use button::*;

pub use lib_input_proc_macros::InputMapped;
pub use lib_window::{ButtonEvent, DeviceEvent, KeyInput};

/// A value that can be produced from raw device events once per frame.
///
/// Implemented by the building blocks ([`Button`], [`Axis`]) and derived
/// for structs of them with `#[derive(InputMapped)]`.
pub trait InputMapped: Debug + Clone + Copy + PartialEq + Default {
    type Bindings: Debug + Clone + PartialEq;
    type MapperState: Debug + Clone;

    fn new_mapper(bindings: &Self::Bindings) -> Self::MapperState;

    fn mapper_event(state: &mut Self::MapperState, event: DeviceEvent, ctx: &MapperContext);

    fn map(state: &mut Self::MapperState) -> Self;
}

/// Feeds device events into an [`InputMapped`] value and samples it.
#[derive(Debug, Clone)]
pub struct Mapper<T: InputMapped> {
    state: T::MapperState,
    left_stick: Stick,
    right_stick: Stick,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MapperContext {
    pub left_stick_dir: Vec2,
    pub right_stick_dir: Vec2,
}

#[derive(Debug, Clone, Copy, Default)]
struct Stick {
    right: f32,
    left: f32,
    up: f32,
    down: f32,
}

impl<T: InputMapped> Mapper<T> {
    pub fn new(bindings: &T::Bindings) -> Self {
        Self {
            state: T::new_mapper(bindings),
            left_stick: Stick::default(),
            right_stick: Stick::default(),
        }
    }

    pub fn event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Button(ButtonEvent { button, value }) => match button {
                ButtonCode::LeftStickRight => self.left_stick.right = value,
                ButtonCode::LeftStickLeft => self.left_stick.left = value,
                ButtonCode::LeftStickUp => self.left_stick.up = value,
                ButtonCode::LeftStickDown => self.left_stick.down = value,
                ButtonCode::RightStickRight => self.right_stick.right = value,
                ButtonCode::RightStickLeft => self.right_stick.left = value,
                ButtonCode::RightStickUp => self.right_stick.up = value,
                ButtonCode::RightStickDown => self.right_stick.down = value,
                _ => {}
            },
            DeviceEvent::Disconnected => {
                self.left_stick = Stick::default();
                self.right_stick = Stick::default();
            }
            _ => {}
        }

        T::mapper_event(
            &mut self.state,
            event,
            &MapperContext {
                left_stick_dir: self.left_stick.dir(),
                right_stick_dir: self.right_stick.dir(),
            },
        );
    }

    /// Samples the current state. Edge flags (`is_pressed`, `is_released`)
    /// are reset by this call, so sample exactly once per frame.
    pub fn map(&mut self) -> T {
        T::map(&mut self.state)
    }
}

impl Stick {
    /// Normalized direction with y pointing up, or zero at rest.
    fn dir(&self) -> Vec2 {
        vec2(self.right - self.left, self.up - self.down).normalize_or_zero()
    }
}
