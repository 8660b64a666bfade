use lib_input::{Axis, Button, InputMapped, button_bindings};
use lib_window::{ButtonCode, KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Default, InputMapped)]
pub struct Input {
    /// Right is positive.
    pub x: Axis<Button>,
    /// Down is positive, matching screen coordinates.
    pub y: Axis<Button>,
    pub quit: Button,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            x: (
                button_bindings!(
                    KeyCode::ArrowRight,
                    ButtonCode::DPadRight,
                    ButtonCode::LeftStickRight,
                ),
                button_bindings!(
                    KeyCode::ArrowLeft,
                    ButtonCode::DPadLeft,
                    ButtonCode::LeftStickLeft,
                ),
            ),
            y: (
                button_bindings!(
                    KeyCode::ArrowDown,
                    ButtonCode::DPadDown,
                    ButtonCode::LeftStickDown,
                ),
                button_bindings!(
                    KeyCode::ArrowUp,
                    ButtonCode::DPadUp,
                    ButtonCode::LeftStickUp,
                ),
            ),
            quit: button_bindings!(KeyCode::Escape, ButtonCode::Select),
        }
    }
}

#[cfg(test)]
mod tests {
    use lib_input::{ButtonEvent, DeviceEvent, KeyInput, Mapper};

    use super::*;

    fn key(code: KeyCode, is_held: bool) -> DeviceEvent {
        DeviceEvent::Key(KeyInput {
            code,
            is_held,
            repeat: false,
        })
    }

    #[test]
    fn arrow_keys_drive_both_axes() {
        let mut mapper = Mapper::<Input>::new(&InputBindings::default());

        mapper.event(key(KeyCode::ArrowLeft, true));
        mapper.event(key(KeyCode::ArrowUp, true));

        let input = mapper.map();
        assert_eq!(input.x.value(), -1);
        assert_eq!(input.y.value(), -1);

        mapper.event(key(KeyCode::ArrowLeft, false));
        mapper.event(key(KeyCode::ArrowUp, false));
        mapper.event(key(KeyCode::ArrowDown, true));

        let input = mapper.map();
        assert_eq!(input.x.value(), 0);
        assert_eq!(input.y.value(), 1);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut mapper = Mapper::<Input>::new(&InputBindings::default());

        mapper.event(key(KeyCode::ArrowLeft, true));
        mapper.event(key(KeyCode::ArrowRight, true));

        assert_eq!(mapper.map().x.value(), 0);
    }

    #[test]
    fn escape_and_select_quit() {
        let mut mapper = Mapper::<Input>::new(&InputBindings::default());

        mapper.event(key(KeyCode::Escape, true));
        assert!(mapper.map().quit.is_pressed);

        mapper.event(key(KeyCode::Escape, false));
        mapper.map();

        mapper.event(DeviceEvent::Button(ButtonEvent {
            button: ButtonCode::Select,
            value: 1.0,
        }));
        assert!(mapper.map().quit.is_pressed);
    }

    #[test]
    fn gamepad_dpad_moves_player() {
        let mut mapper = Mapper::<Input>::new(&InputBindings::default());

        mapper.event(DeviceEvent::Button(ButtonEvent {
            button: ButtonCode::DPadRight,
            value: 1.0,
        }));

        assert_eq!(mapper.map().x.value(), 1);
    }
}
