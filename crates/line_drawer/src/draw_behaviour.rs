use crate::camera::FrameTransform;
use crate::draw_list::DrawList;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use bevy_math::Vec2;

/// Per-application hooks called by the frame loop.
///
/// Each frame the loop calls [`on_update`](Self::on_update), clears the
/// views, calls [`on_render`](Self::on_render) and then presents whatever
/// was recorded into the draw list.
pub trait DrawBehaviour {
    fn on_update(&mut self, _time: &FrameTime) {}

    /// Records the frame into `draw_list`. The world batch is drawn with
    /// `transform` as it is when this returns.
    fn on_render(&mut self, draw_list: &mut DrawList, transform: &mut FrameTransform)
    -> MyResult<()>;

    /// Cursor position in client pixels.
    fn on_mouse_move(&mut self, _point: Vec2) {}
    fn on_mouse_down(&mut self, _point: Vec2) {}
    fn on_mouse_up(&mut self, _point: Vec2) {}
    fn on_mouse_leave(&mut self) {}

    /// Virtual-key code of the key pressed.
    fn on_key_down(&mut self, _key: u8) {}
    fn on_key_up(&mut self, _key: u8) {}

    /// Polled after every frame; `true` closes the window.
    fn should_close(&self) -> bool {
        false
    }
}
