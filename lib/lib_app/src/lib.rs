use std::time::Duration;

use lib_gpu::{Device, PresentMode, Queue, TextureFormat, TextureView};
use lib_window::{DeviceEvent, DeviceId, PhysicalSize, Window, WindowAttributes};

mod runner;

/// An application driven by [`app_main!`].
///
/// Each frame the runner calls [`update`](AppHandler::update) once, then
/// [`draw`](AppHandler::draw) once with the surface texture. Events arrive in
/// between through [`event`](AppHandler::event).
pub trait AppHandler: Sized {
    const TITLE: &str = "Untitled App";
    const PRESENT_MODE: PresentMode = PresentMode::AutoVsync;
    const LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

    fn window_attributes() -> WindowAttributes {
        WindowAttributes::default().with_title(Self::TITLE)
    }

    fn new(ctx: AppContext<'_>) -> anyhow::Result<Self>;

    fn update(&mut self, _delta_time: Duration, _ctx: AppContext<'_>) -> AppFlow {
        AppFlow::Continue
    }

    fn event(&mut self, event: AppEvent<'_>, _ctx: AppContext<'_>) -> AppFlow {
        match event {
            AppEvent::CloseRequested => AppFlow::Exit,
            _ => AppFlow::Continue,
        }
    }

    fn draw(&mut self, output: &TextureView, ctx: AppContext<'_>);
}

#[derive(Debug, Clone, Copy)]
pub struct AppContext<'a> {
    pub window: &'a Window,
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
    pub surface_size: PhysicalSize<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub enum AppEvent<'a> {
    CloseRequested,
    Device {
        device: DeviceId,
        event: DeviceEvent,
    },
    UnhandledWindowEvent(&'a lib_window::event::WindowEvent),
}

#[macro_export]
macro_rules! app_main {
    ($App:ty) => {
        fn main() -> $crate::hidden::anyhow::Result<()> {
            $crate::hidden::run_app::<$App>()
        }
    };
}

#[doc(hidden)]
pub mod hidden {
    pub use crate::runner::run_app;
    pub use anyhow;
}
