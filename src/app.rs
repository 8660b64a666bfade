use std::time::Duration;

use anyhow::Context;
use lib_app::{AppContext, AppEvent, AppFlow, AppHandler};
use lib_gpu::{PresentMode, TextureView};
use lib_input::Mapper;
use lib_math::{Color, Vec2, uvec2, vec2};
use lib_renderer::{Camera2d, Font, PassTarget, RenderTarget, Renderer, Texture};
use lib_window::{PhysicalSize, WindowAttributes};

use crate::{
    config::{
        FPS_MARGIN, GRASS_TILESET, SCREEN_CLEAR, SCREEN_LABEL_COLOR, SCREEN_LABEL_POS,
        SCREEN_SIZE, SCREEN_ZOOM, TEXT_SIZE, VIRTUAL_RATIO, VIRTUAL_SIZE, WALL_TILESET,
        WORLD_CLEAR, WORLD_LABEL_COLOR, WORLD_LABEL_POS, WORLD_ZOOM,
    },
    fps::FpsCounter,
    input::{Input, InputBindings},
    scene::Scene,
    split::split_target,
    tiles::draw_tileset,
    viewport::{upscale_dest, upscale_source},
};

#[derive(Debug)]
pub struct Demo {
    renderer: Renderer,
    world_target: RenderTarget,
    grass: Texture,
    wall: Texture,
    font: Font,
    mapper: Mapper<Input>,
    scene: Scene,
    world_camera: Camera2d,
    screen_camera: Camera2d,
    fps: FpsCounter,
}

impl AppHandler for Demo {
    const TITLE: &str = "pixel camera - smooth pixel-perfect camera";
    const PRESENT_MODE: PresentMode = PresentMode::AutoNoVsync;

    fn window_attributes() -> WindowAttributes {
        WindowAttributes::default()
            .with_title(Self::TITLE)
            .with_inner_size(PhysicalSize::new(SCREEN_SIZE.x, SCREEN_SIZE.y))
            .with_resizable(false)
    }

    fn new(ctx: AppContext<'_>) -> anyhow::Result<Self> {
        let renderer = Renderer::new(ctx.into());

        let world_target = renderer
            .create_render_target(VIRTUAL_SIZE, ctx.into())
            .context("Failed to create the world render target")?;

        let grass = renderer.load_texture_or_placeholder(GRASS_TILESET, ctx.into());
        let wall = renderer.load_texture_or_placeholder(WALL_TILESET, ctx.into());

        let font = Font::builtin(&renderer, ctx.into()).context("Failed to create the font")?;

        tracing::info!(
            screen = %SCREEN_SIZE,
            world = %VIRTUAL_SIZE,
            ratio = VIRTUAL_RATIO,
            "demo ready"
        );

        Ok(Self {
            renderer,
            world_target,
            grass,
            wall,
            font,
            mapper: Mapper::new(&InputBindings::default()),
            scene: Scene::default(),
            world_camera: Camera2d::with_zoom(WORLD_ZOOM),
            screen_camera: Camera2d::with_zoom(SCREEN_ZOOM),
            fps: FpsCounter::default(),
        })
    }

    fn update(&mut self, delta_time: Duration, _ctx: AppContext<'_>) -> AppFlow {
        let input = self.mapper.map();

        if input.quit.is_pressed {
            return AppFlow::Exit;
        }

        self.scene.advance(&input, delta_time.as_secs_f32());

        let split = split_target(self.scene.player, VIRTUAL_RATIO);
        self.world_camera.target = split.world;
        self.screen_camera.target = split.screen;

        self.fps.tick(delta_time);

        AppFlow::Continue
    }

    fn event(&mut self, event: AppEvent<'_>, _ctx: AppContext<'_>) -> AppFlow {
        match event {
            AppEvent::Device { device: _, event } => self.mapper.event(event),
            AppEvent::CloseRequested => return AppFlow::Exit,
            _ => {}
        }

        AppFlow::Continue
    }

    fn draw(&mut self, output: &TextureView, ctx: AppContext<'_>) {
        {
            let mut pass = self.renderer.begin_pass(
                PassTarget::Texture(&self.world_target),
                WORLD_CLEAR,
                ctx.into(),
            );

            pass.set_camera(Some(&self.world_camera));

            draw_tileset(&mut pass, &self.grass);
            draw_tileset(&mut pass, &self.wall);

            for shape in self.scene.shapes() {
                pass.draw_rectangle_pro(shape.rect, Vec2::ZERO, shape.rotation, shape.color);
            }
        }

        let screen_size = uvec2(ctx.surface_size.width, ctx.surface_size.height);

        let mut pass = self.renderer.begin_pass(
            PassTarget::Surface {
                view: output,
                size: screen_size,
            },
            SCREEN_CLEAR,
            ctx.into(),
        );

        pass.set_camera(Some(&self.screen_camera));
        pass.draw_texture_pro(
            self.world_target.texture(),
            upscale_source(VIRTUAL_SIZE),
            upscale_dest(SCREEN_SIZE, VIRTUAL_RATIO),
            Vec2::ZERO,
            0.0,
            Color::WHITE,
        );

        pass.set_camera(None);
        pass.draw_text(
            &self.font,
            &format!("Screen resolution: {}x{}", SCREEN_SIZE.x, SCREEN_SIZE.y),
            SCREEN_LABEL_POS,
            TEXT_SIZE,
            SCREEN_LABEL_COLOR,
        );
        pass.draw_text(
            &self.font,
            &format!("World resolution: {}x{}", VIRTUAL_SIZE.x, VIRTUAL_SIZE.y),
            WORLD_LABEL_POS,
            TEXT_SIZE,
            WORLD_LABEL_COLOR,
        );
        pass.draw_text(
            &self.font,
            &self.fps.text(),
            vec2(screen_size.x as f32 - FPS_MARGIN.x, FPS_MARGIN.y),
            TEXT_SIZE,
            self.fps.color(),
        );
    }
}
