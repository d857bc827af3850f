pub mod camera;
pub mod display_config;
pub mod draw_behaviour;
pub mod draw_list;
pub mod drawer_error;
pub mod frame_clock;
pub mod frame_targets;
pub mod gui;
pub mod line_drawer_app;
pub mod renderable;
pub mod scene;
pub mod wire_cube;

#[cfg(windows)]
pub mod create_window;
#[cfg(windows)]
pub mod d3d11_base;
#[cfg(windows)]
pub mod d3d11_runner;
#[cfg(windows)]
pub mod line_renderer;
#[cfg(windows)]
pub mod text_renderer;
#[cfg(windows)]
pub mod window_class;
#[cfg(windows)]
pub mod window_class_atom;
