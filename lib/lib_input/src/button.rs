use std::collections::{HashMap, HashSet};

use lib_math::Vec2;
use lib_window::{ButtonCode, KeyCode};

use crate::{ButtonEvent, DeviceEvent, InputMapped, KeyInput, MapperContext};

/// Analog values at or above this count as held.
const HELD_THRESHOLD: f32 = 0.5;

/// A stick half-button only counts while the stick points within 67.5° of
/// that half's direction (cos 67.5° ≈ 0.3827).
const STICK_MIN_DOT: f32 = 0.3827;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Button {
    pub is_held: bool,
    pub is_pressed: bool,
    pub is_released: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonBindings {
    pub keys: HashSet<KeyCode>,
    pub buttons: HashSet<ButtonCode>,
}

#[macro_export]
macro_rules! button_bindings {
    ($($e:expr),* $(,)*) => {{
        let mut result = $crate::ButtonBindings::default();
        $(
            result.extend(std::iter::once($e));
        )*
        result
    }};
}

#[derive(Debug, Clone)]
pub struct ButtonMapperState {
    bit_of_key: HashMap<KeyCode, u32>,
    bit_of_button: HashMap<ButtonCode, u32>,
    held_bits: u32,
    was_held: bool,
    pressed_since_map: bool,
}

impl InputMapped for Button {
    type Bindings = ButtonBindings;
    type MapperState = ButtonMapperState;

    fn new_mapper(bindings: &Self::Bindings) -> Self::MapperState {
        let key_count = bindings.keys.len();

        assert!(
            key_count + bindings.buttons.len() <= u32::BITS as usize,
            "a button supports at most 32 bindings"
        );

        ButtonMapperState {
            bit_of_key: bindings
                .keys
                .iter()
                .enumerate()
                .map(|(i, &key)| (key, i as u32))
                .collect(),
            bit_of_button: bindings
                .buttons
                .iter()
                .enumerate()
                .map(|(i, &button)| (button, (key_count + i) as u32))
                .collect(),
            held_bits: 0,
            was_held: false,
            pressed_since_map: false,
        }
    }

    fn mapper_event(state: &mut Self::MapperState, event: DeviceEvent, ctx: &MapperContext) {
        let (bit, is_held) = match event {
            DeviceEvent::Disconnected => {
                state.held_bits = 0;
                return;
            }

            DeviceEvent::Key(KeyInput { code, is_held, .. }) => {
                let Some(&bit) = state.bit_of_key.get(&code) else {
                    return;
                };

                (bit, is_held)
            }

            DeviceEvent::Button(ButtonEvent { button, value }) => {
                let Some(&bit) = state.bit_of_button.get(&button) else {
                    return;
                };

                (bit, button_is_held(button, value, ctx))
            }

            _ => return,
        };

        let mask = 1 << bit;

        if is_held && state.held_bits & mask == 0 {
            state.pressed_since_map = true;
        }

        if is_held {
            state.held_bits |= mask;
        } else {
            state.held_bits &= !mask;
        }
    }

    fn map(state: &mut Self::MapperState) -> Self {
        let is_held = state.held_bits != 0;

        let result = Self {
            is_held,
            is_pressed: state.pressed_since_map,
            is_released: state.was_held && !is_held,
        };

        state.was_held = is_held;
        state.pressed_since_map = false;

        result
    }
}

fn button_is_held(button: ButtonCode, value: f32, ctx: &MapperContext) -> bool {
    if value < HELD_THRESHOLD {
        return false;
    }

    let (stick_dir, half_dir) = match button {
        ButtonCode::LeftStickRight => (ctx.left_stick_dir, Vec2::X),
        ButtonCode::LeftStickLeft => (ctx.left_stick_dir, Vec2::NEG_X),
        ButtonCode::LeftStickUp => (ctx.left_stick_dir, Vec2::Y),
        ButtonCode::LeftStickDown => (ctx.left_stick_dir, Vec2::NEG_Y),
        ButtonCode::RightStickRight => (ctx.right_stick_dir, Vec2::X),
        ButtonCode::RightStickLeft => (ctx.right_stick_dir, Vec2::NEG_X),
        ButtonCode::RightStickUp => (ctx.right_stick_dir, Vec2::Y),
        ButtonCode::RightStickDown => (ctx.right_stick_dir, Vec2::NEG_Y),
        _ => return true,
    };

    stick_dir.dot(half_dir) >= STICK_MIN_DOT
}

impl Extend<KeyCode> for ButtonBindings {
    fn extend<T: IntoIterator<Item = KeyCode>>(&mut self, iter: T) {
        self.keys.extend(iter);
    }
}

impl Extend<ButtonCode> for ButtonBindings {
    fn extend<T: IntoIterator<Item = ButtonCode>>(&mut self, iter: T) {
        self.buttons.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapper;

    fn key(code: KeyCode, is_held: bool) -> DeviceEvent {
        DeviceEvent::Key(KeyInput {
            code,
            is_held,
            repeat: false,
        })
    }

    fn button(button: ButtonCode, value: f32) -> DeviceEvent {
        DeviceEvent::Button(ButtonEvent { button, value })
    }

    #[test]
    fn press_hold_release_edges() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(KeyCode::Space));

        mapper.event(key(KeyCode::Space, true));
        let first = mapper.map();
        assert!(first.is_held && first.is_pressed && !first.is_released);

        let second = mapper.map();
        assert!(second.is_held && !second.is_pressed);

        mapper.event(key(KeyCode::Space, false));
        let third = mapper.map();
        assert!(!third.is_held && third.is_released);

        assert_eq!(mapper.map(), Button::default());
    }

    #[test]
    fn tap_between_samples_still_registers_press() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(KeyCode::Escape));

        mapper.event(key(KeyCode::Escape, true));
        mapper.event(key(KeyCode::Escape, false));

        let state = mapper.map();
        assert!(state.is_pressed);
        assert!(!state.is_held);
    }

    #[test]
    fn any_binding_keeps_button_held() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(
            KeyCode::ArrowRight,
            ButtonCode::DPadRight,
        ));

        mapper.event(key(KeyCode::ArrowRight, true));
        mapper.event(button(ButtonCode::DPadRight, 1.0));
        mapper.event(key(KeyCode::ArrowRight, false));
        assert!(mapper.map().is_held);

        mapper.event(button(ButtonCode::DPadRight, 0.0));
        assert!(!mapper.map().is_held);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(KeyCode::ArrowUp));

        mapper.event(key(KeyCode::ArrowDown, true));

        assert_eq!(mapper.map(), Button::default());
    }

    #[test]
    fn stick_half_needs_threshold_and_direction() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(ButtonCode::LeftStickRight));

        mapper.event(button(ButtonCode::LeftStickRight, 0.4));
        assert!(!mapper.map().is_held);

        // net direction points left
        mapper.event(button(ButtonCode::LeftStickLeft, 1.0));
        mapper.event(button(ButtonCode::LeftStickRight, 0.6));
        assert!(!mapper.map().is_held);

        mapper.event(button(ButtonCode::LeftStickLeft, 0.0));
        mapper.event(button(ButtonCode::LeftStickRight, 0.9));
        assert!(mapper.map().is_held);
    }

    #[test]
    fn disconnect_releases_everything() {
        let mut mapper = Mapper::<Button>::new(&button_bindings!(ButtonCode::Select));

        mapper.event(button(ButtonCode::Select, 1.0));
        assert!(mapper.map().is_held);

        mapper.event(DeviceEvent::Disconnected);
        assert!(!mapper.map().is_held);
    }
}
