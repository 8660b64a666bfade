mod app;
mod assets;
mod config;
mod fps;
mod input;
mod scene;
mod split;
mod tiles;
mod viewport;

lib_app::app_main!(app::Demo);
