use winit::{
    event::KeyEvent,
    keyboard::{KeyCode, PhysicalKey},
};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceId {
    Winit(winit::event::DeviceId),
    Gilrs(gilrs::GamepadId),
}

/// An input event from a keyboard or a gamepad, already stripped of
/// platform details so that it can be built by hand.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    Connected,
    Disconnected,
    Key(KeyInput),
    Button(ButtonEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub is_held: bool,
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub button: ButtonCode,
    pub value: f32,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonCode {
    LeftStickRight,
    LeftStickLeft,
    LeftStickUp,
    LeftStickDown,
    RightStickRight,
    RightStickLeft,
    RightStickUp,
    RightStickDown,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    South,
    East,
    North,
    West,
    LeftTrigger,
    LeftTrigger2,
    RightTrigger,
    RightTrigger2,
    Start,
    Select,
    LeftThumb,
    RightThumb,
    C,
    Z,
    Mode,
    Unknown,
}

impl KeyInput {
    /// Returns `None` for keys winit could not identify.
    pub fn from_winit(event: &KeyEvent) -> Option<Self> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        Some(Self {
            code,
            is_held: event.state.is_pressed(),
            repeat: event.repeat,
        })
    }
}

impl ButtonCode {
    pub fn is_stick(self) -> bool {
        matches!(
            self,
            Self::LeftStickRight
                | Self::LeftStickLeft
                | Self::LeftStickUp
                | Self::LeftStickDown
                | Self::RightStickRight
                | Self::RightStickLeft
                | Self::RightStickUp
                | Self::RightStickDown
        )
    }

    /// Splits a stick axis into its `(positive, negative)` half-buttons.
    ///
    /// D-pad and trigger axes return `None`; gilrs reports those as button
    /// changes as well.
    pub fn stick_halves(axis: gilrs::Axis) -> Option<(Self, Self)> {
        match axis {
            gilrs::Axis::LeftStickX => Some((Self::LeftStickRight, Self::LeftStickLeft)),
            gilrs::Axis::LeftStickY => Some((Self::LeftStickUp, Self::LeftStickDown)),
            gilrs::Axis::RightStickX => Some((Self::RightStickRight, Self::RightStickLeft)),
            gilrs::Axis::RightStickY => Some((Self::RightStickUp, Self::RightStickDown)),
            gilrs::Axis::Unknown => Some((Self::Unknown, Self::Unknown)),
            _ => None,
        }
    }
}

impl From<gilrs::Button> for ButtonCode {
    fn from(value: gilrs::Button) -> Self {
        match value {
            gilrs::Button::South => Self::South,
            gilrs::Button::East => Self::East,
            gilrs::Button::North => Self::North,
            gilrs::Button::West => Self::West,
            gilrs::Button::C => Self::C,
            gilrs::Button::Z => Self::Z,
            gilrs::Button::LeftTrigger => Self::LeftTrigger,
            gilrs::Button::RightTrigger => Self::RightTrigger,
            gilrs::Button::LeftTrigger2 => Self::LeftTrigger2,
            gilrs::Button::RightTrigger2 => Self::RightTrigger2,
            gilrs::Button::Select => Self::Select,
            gilrs::Button::Start => Self::Start,
            gilrs::Button::Mode => Self::Mode,
            gilrs::Button::LeftThumb => Self::LeftThumb,
            gilrs::Button::RightThumb => Self::RightThumb,
            gilrs::Button::DPadUp => Self::DPadUp,
            gilrs::Button::DPadDown => Self::DPadDown,
            gilrs::Button::DPadLeft => Self::DPadLeft,
            gilrs::Button::DPadRight => Self::DPadRight,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_axes_split_into_halves() {
        assert_eq!(
            ButtonCode::stick_halves(gilrs::Axis::LeftStickX),
            Some((ButtonCode::LeftStickRight, ButtonCode::LeftStickLeft))
        );
        assert_eq!(
            ButtonCode::stick_halves(gilrs::Axis::RightStickY),
            Some((ButtonCode::RightStickUp, ButtonCode::RightStickDown))
        );
        assert_eq!(ButtonCode::stick_halves(gilrs::Axis::DPadX), None);
        assert_eq!(ButtonCode::stick_halves(gilrs::Axis::LeftZ), None);
    }

    #[test]
    fn gilrs_buttons_convert() {
        assert_eq!(ButtonCode::from(gilrs::Button::DPadLeft), ButtonCode::DPadLeft);
        assert_eq!(ButtonCode::from(gilrs::Button::Select), ButtonCode::Select);
        assert_eq!(ButtonCode::from(gilrs::Button::Unknown), ButtonCode::Unknown);
        assert!(!ButtonCode::DPadLeft.is_stick());
        assert!(ButtonCode::RightStickDown.is_stick());
    }
}
