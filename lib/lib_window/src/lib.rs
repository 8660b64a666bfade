pub use winit::*;

pub use winit::{
    dpi::PhysicalSize,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

mod input;
pub use input::*;
