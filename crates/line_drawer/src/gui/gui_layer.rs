use crate::draw_list::Canvas;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use crate::gui::gui_control::GuiControl;
use crate::renderable::RenderableItem;
use crate::renderable::UpdatableItem;
use bevy_math::Mat4;
use bevy_math::Vec2;
use tracing::debug;

/// Routes mouse input to controls and draws them, hovered ones with
/// [`GuiControl::draw_hover`].
///
/// Controls added later sit on top of earlier ones.
#[derive(Default)]
pub struct GuiLayer {
    controls: Vec<Box<dyn GuiControl>>,
    hovered: Option<usize>,
    pressed: Option<usize>,
}

impl GuiLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, control: impl GuiControl + 'static) -> usize {
        self.controls.push(Box::new(control));
        self.controls.len() - 1
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, index: usize) -> Option<&dyn GuiControl> {
        self.controls.get(index).map(|control| control.as_ref())
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    /// Topmost control under `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.controls.iter().rposition(|control| control.contains(point))
    }

    pub fn on_mouse_move(&mut self, point: Vec2) {
        self.hovered = self.hit_test(point);
    }

    /// Returns whether a control took the press.
    pub fn on_mouse_down(&mut self, point: Vec2) -> bool {
        self.hovered = self.hit_test(point);
        self.pressed = self.hovered;
        self.pressed.is_some()
    }

    /// Clicks the control if the release lands on the one that was pressed.
    /// Returns the clicked control's index.
    pub fn on_mouse_up(&mut self, point: Vec2) -> Option<usize> {
        self.hovered = self.hit_test(point);
        let pressed = self.pressed.take()?;
        if self.hovered != Some(pressed) {
            return None;
        }
        let control = &mut self.controls[pressed];
        debug!("Clicked {:?}", control.base().text);
        control.click();
        Some(pressed)
    }

    /// Forgets the hover, e.g. when the cursor leaves the window.
    pub fn on_mouse_leave(&mut self) {
        self.hovered = None;
    }

    pub fn update(&mut self, time: &FrameTime) {
        for control in &mut self.controls {
            control.update(time);
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, world_view: &Mat4) -> MyResult<()> {
        for (index, control) in self.controls.iter().enumerate() {
            if self.hovered == Some(index) {
                control.draw_hover(canvas, world_view)?;
            } else {
                control.render(canvas, world_view)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::DrawList;
    use crate::gui::gui_button::GuiButton;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_button(x: i32, y: i32, clicks: &Rc<Cell<u32>>) -> GuiButton {
        let counter = clicks.clone();
        GuiButton::new(x, y, 100, 40, "Button", move || counter.set(counter.get() + 1))
    }

    #[test]
    fn hit_test_prefers_the_topmost_control() {
        let clicks = Rc::new(Cell::new(0));
        let mut layer = GuiLayer::new();
        let bottom = layer.add(counting_button(0, 0, &clicks));
        let top = layer.add(counting_button(50, 20, &clicks));

        assert_eq!(layer.hit_test(Vec2::new(10.0, 10.0)), Some(bottom));
        assert_eq!(layer.hit_test(Vec2::new(60.0, 30.0)), Some(top));
        assert_eq!(layer.hit_test(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn press_and_release_on_same_control_clicks_it() {
        let clicks = Rc::new(Cell::new(0));
        let mut layer = GuiLayer::new();
        let index = layer.add(counting_button(0, 0, &clicks));

        assert!(layer.on_mouse_down(Vec2::new(5.0, 5.0)));
        assert_eq!(layer.pressed(), Some(index));
        assert_eq!(layer.on_mouse_up(Vec2::new(90.0, 35.0)), Some(index));
        assert_eq!(clicks.get(), 1);
        assert_eq!(layer.pressed(), None);
    }

    #[test]
    fn release_elsewhere_cancels_the_click() {
        let clicks = Rc::new(Cell::new(0));
        let mut layer = GuiLayer::new();
        layer.add(counting_button(0, 0, &clicks));
        layer.add(counting_button(200, 0, &clicks));

        layer.on_mouse_down(Vec2::new(5.0, 5.0));
        assert_eq!(layer.on_mouse_up(Vec2::new(205.0, 5.0)), None);
        layer.on_mouse_down(Vec2::new(5.0, 5.0));
        assert_eq!(layer.on_mouse_up(Vec2::new(400.0, 5.0)), None);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn release_without_press_does_nothing() {
        let clicks = Rc::new(Cell::new(0));
        let mut layer = GuiLayer::new();
        layer.add(counting_button(0, 0, &clicks));
        assert!(!layer.on_mouse_down(Vec2::new(300.0, 300.0)));
        assert_eq!(layer.on_mouse_up(Vec2::new(5.0, 5.0)), None);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn hovered_control_renders_with_hover_look() {
        let clicks = Rc::new(Cell::new(0));
        let mut layer = GuiLayer::new();
        layer.add(counting_button(0, 0, &clicks));
        layer.add(counting_button(200, 0, &clicks));
        layer.on_mouse_move(Vec2::new(210.0, 10.0));
        assert_eq!(layer.hovered(), Some(1));

        let mut list = DrawList::new();
        layer.render(&mut list, &Mat4::IDENTITY).unwrap();
        let colors = layer.control(1).unwrap().base().colors;
        // each square button is 6 fill vertices
        assert_eq!(list.screen.triangles[0].color, colors.background.to_array());
        assert_eq!(list.screen.triangles[6].color, colors.background_hover.to_array());

        layer.on_mouse_leave();
        assert_eq!(layer.hovered(), None);
    }
}
