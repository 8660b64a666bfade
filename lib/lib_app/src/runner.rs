use std::{sync::Arc, time::Instant};

use anyhow::Context;
use gilrs::Gilrs;
use lib_gpu::{
    Device, DeviceDescriptor, Instance, PollType, Queue, RequestAdapterOptions, Surface,
    SurfaceConfiguration, SurfaceError, TextureViewDescriptor,
};
use lib_window::{
    ButtonCode, ButtonEvent, DeviceEvent, KeyInput,
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};
use tracing_subscriber::EnvFilter;

use crate::{AppContext, AppEvent, AppFlow, AppHandler, DeviceId};

pub fn run_app<T: AppHandler>() -> anyhow::Result<()> {
    // a subscriber installed by the host process wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(T::LOG_FILTER))
        .try_init();

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = GameRunner::<T>::Uninitialized;

    event_loop
        .run_app(&mut runner)
        .context("Event loop terminated with an error")?;

    match runner {
        GameRunner::Failed(error) => Err(error),
        _ => Ok(()),
    }
}

enum GameRunner<T: AppHandler> {
    Uninitialized,
    Initialized(Box<InitializedGameRunner<T>>),
    Failed(anyhow::Error),
    Exited,
}

// `game` is declared first so it is dropped before the GPU objects it uses.
struct InitializedGameRunner<T: AppHandler> {
    game: T,
    gpu: Gpu,
    gilrs: Option<Gilrs>,
    last_instant: Instant,
}

struct Gpu {
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    device: Device,
    queue: Queue,
    window: Arc<Window>,
}

impl<T: AppHandler> ApplicationHandler for GameRunner<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let GameRunner::Uninitialized = self else {
            return;
        };

        match InitializedGameRunner::new(event_loop) {
            Ok(init_self) => *self = GameRunner::Initialized(Box::new(init_self)),
            Err(error) => {
                tracing::error!("{error:#}");

                *self = GameRunner::Failed(error);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let GameRunner::Initialized(init_self) = self else {
            return;
        };

        init_self.poll_gilrs_events(event_loop);

        let now = Instant::now();
        let delta_time = now.duration_since(init_self.last_instant);
        init_self.last_instant = now;

        handle_gameflow!(
            event_loop,
            init_self.game.update(delta_time, init_self.gpu.ctx())
        );

        init_self.gpu.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Self::Initialized(init_self) = self else {
            return;
        };

        let game_event = match &event {
            WindowEvent::CloseRequested => AppEvent::CloseRequested,
            WindowEvent::KeyboardInput {
                device_id,
                event: key_event,
                is_synthetic: _,
            } => match KeyInput::from_winit(key_event) {
                Some(input) => AppEvent::Device {
                    device: DeviceId::Winit(*device_id),
                    event: DeviceEvent::Key(input),
                },
                None => AppEvent::UnhandledWindowEvent(&event),
            },
            _ => AppEvent::UnhandledWindowEvent(&event),
        };

        handle_gameflow!(
            event_loop,
            init_self.game.event(game_event, init_self.gpu.ctx())
        );

        match &event {
            WindowEvent::RedrawRequested => {
                if let Err(error) = init_self.redraw() {
                    tracing::error!("{error:#}");

                    *self = GameRunner::Failed(error);
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => init_self.gpu.resize(size.width, size.height),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let GameRunner::Initialized(_) = self {
            tracing::info!("shutting down");

            *self = GameRunner::Exited;
        }
    }
}

impl<T: AppHandler> InitializedGameRunner<T> {
    fn new(event_loop: &ActiveEventLoop) -> anyhow::Result<Self> {
        let window = Arc::new(
            event_loop
                .create_window(T::window_attributes())
                .context("Failed to create main window")?,
        );

        let instance = Instance::default();

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..RequestAdapterOptions::default()
        }))
        .context("Failed to find a suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        tracing::info!(
            name = %adapter_info.name,
            backend = ?adapter_info.backend,
            "using GPU adapter"
        );

        let (device, queue) =
            pollster::block_on(adapter.request_device(&DeviceDescriptor::default()))
                .context("Failed to create GPU device")?;

        let size = window.inner_size();

        let mut surface_config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .context("Surface is not supported by the adapter")?;

        let capabilities = surface.get_capabilities(&adapter);

        if let Some(format) = lib_gpu::preferred_surface_format(&capabilities.formats) {
            surface_config.format = format;
        }

        if capabilities.present_modes.contains(&T::PRESENT_MODE)
            || matches!(
                T::PRESENT_MODE,
                lib_gpu::PresentMode::AutoVsync | lib_gpu::PresentMode::AutoNoVsync
            )
        {
            surface_config.present_mode = T::PRESENT_MODE;
        } else {
            tracing::warn!(
                requested = ?T::PRESENT_MODE,
                fallback = ?surface_config.present_mode,
                "present mode not supported"
            );
        }

        surface.configure(&device, &surface_config);

        tracing::info!(
            format = ?surface_config.format,
            present_mode = ?surface_config.present_mode,
            width = surface_config.width,
            height = surface_config.height,
            "configured surface"
        );

        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(error) => {
                tracing::warn!("gamepad support unavailable: {error}");
                None
            }
        };

        let gpu = Gpu {
            surface,
            surface_config,
            device,
            queue,
            window,
        };

        let game = T::new(gpu.ctx()).context("Failed to initialize the application")?;

        Ok(Self {
            game,
            gpu,
            gilrs,
            last_instant: Instant::now(),
        })
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");

                self.gpu.reconfigure();
                return Ok(());
            }
            Err(SurfaceError::Timeout) => {
                tracing::debug!("timed out acquiring surface texture");
                return Ok(());
            }
            Err(error) => {
                return Err(error).context("Failed to acquire surface texture");
            }
        };

        self.game.draw(
            &texture
                .texture
                .create_view(&TextureViewDescriptor::default()),
            self.gpu.ctx(),
        );

        self.gpu.window.pre_present_notify();
        texture.present();

        if let Err(error) = self.gpu.device.poll(PollType::Poll) {
            tracing::warn!("device poll failed: {error}");
        }

        Ok(())
    }

    fn poll_gilrs_events(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gilrs) = &mut self.gilrs else {
            return;
        };

        while let Some(event) = gilrs.next_event() {
            let device = DeviceId::Gilrs(event.id);

            let device_events = match event.event {
                gilrs::EventType::Connected => {
                    tracing::info!(name = gilrs.gamepad(event.id).name(), "gamepad connected");

                    [Some(DeviceEvent::Connected), None]
                }
                gilrs::EventType::Disconnected => {
                    tracing::info!("gamepad disconnected");

                    [Some(DeviceEvent::Disconnected), None]
                }
                gilrs::EventType::AxisChanged(axis, value, _) => {
                    let Some((positive, negative)) = ButtonCode::stick_halves(axis) else {
                        continue;
                    };

                    [
                        Some(DeviceEvent::Button(ButtonEvent {
                            button: positive,
                            value: value.max(0.0),
                        })),
                        Some(DeviceEvent::Button(ButtonEvent {
                            button: negative,
                            value: (-value).max(0.0),
                        })),
                    ]
                }
                gilrs::EventType::ButtonChanged(button, value, _) => [
                    Some(DeviceEvent::Button(ButtonEvent {
                        button: button.into(),
                        value,
                    })),
                    None,
                ],
                _ => continue,
            };

            for event in device_events.into_iter().flatten() {
                handle_gameflow!(
                    event_loop,
                    self.game
                        .event(AppEvent::Device { device, event }, self.gpu.ctx())
                );
            }
        }
    }
}

impl Gpu {
    fn ctx(&self) -> AppContext<'_> {
        AppContext {
            window: &self.window,
            device: &self.device,
            queue: &self.queue,
            surface_format: self.surface_config.format,
            surface_size: lib_window::PhysicalSize::new(
                self.surface_config.width,
                self.surface_config.height,
            ),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }
}

macro_rules! handle_gameflow {
    ($event_loop:expr, $flow:expr) => {
        match $flow {
            AppFlow::Continue => {}
            AppFlow::Exit => {
                $event_loop.exit();
                return;
            }
        }
    };
}

use handle_gameflow;
