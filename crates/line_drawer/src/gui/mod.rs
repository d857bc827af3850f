pub mod gui_button;
pub mod gui_control;
pub mod gui_layer;
pub mod text_format;
