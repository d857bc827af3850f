use crate::draw_list::Canvas;
use crate::draw_list::Color;
use crate::draw_list::colors;
use crate::drawer_error::MyResult;
use crate::gui::text_format::TextFormat;
use crate::gui::text_format::TextLayout;
use crate::renderable::RenderableItem;
use crate::renderable::UpdatableItem;
use bevy_math::Mat4;
use bevy_math::Rect;
use bevy_math::Vec2;

pub type ClickHandler = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlColors {
    pub background: Color,
    pub background_hover: Color,
    pub background_pressed: Color,
    pub border: Color,
    pub border_hover: Color,
    pub text: Color,
}

impl Default for ControlColors {
    fn default() -> Self {
        Self {
            background: colors::DARK_SLATE_GRAY,
            background_hover: colors::STEEL_BLUE,
            background_pressed: colors::ORANGE,
            border: colors::DIM_GRAY,
            border_hover: colors::LIGHT_GRAY,
            text: colors::WHITE,
        }
    }
}

/// Layout and label state shared by every control.
pub struct ControlBase {
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub text: String,
    pub text_format: TextFormat,
    pub text_layout: TextLayout,
    pub colors: ControlColors,
    on_click: Option<ClickHandler>,
}

impl ControlBase {
    pub fn new(x: i32, y: i32, width: i32, height: i32, text: impl Into<String>) -> Self {
        let text = text.into();
        let text_format = TextFormat::default();
        let text_layout = TextLayout::new(
            text.clone(),
            text_format.clone(),
            width as f32,
            height as f32,
        );
        Self {
            position_x: x,
            position_y: y,
            width,
            height,
            text,
            text_format,
            text_layout,
            colors: ControlColors::default(),
            on_click: None,
        }
    }

    pub fn with_on_click(mut self, on_click: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    pub fn set_on_click(&mut self, on_click: Option<ClickHandler>) {
        self.on_click = on_click;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.text_layout = TextLayout::new(
            self.text.clone(),
            self.text_format.clone(),
            self.width as f32,
            self.height as f32,
        );
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position_x as f32,
            self.position_y as f32,
            (self.position_x + self.width) as f32,
            (self.position_y + self.height) as f32,
        )
    }

    pub fn origin(&self) -> Vec2 {
        self.bounds().min
    }

    /// Runs the click handler, returning whether one was set.
    pub fn invoke_on_click(&mut self) -> bool {
        match self.on_click.as_mut() {
            Some(on_click) => {
                on_click();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ControlBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlBase")
            .field("position_x", &self.position_x)
            .field("position_y", &self.position_y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("text", &self.text)
            .field("has_on_click", &self.on_click.is_some())
            .finish()
    }
}

/// A widget the [`GuiLayer`](crate::gui::gui_layer::GuiLayer) can hit-test,
/// hover, click, update and draw.
pub trait GuiControl: RenderableItem + UpdatableItem {
    fn base(&self) -> &ControlBase;
    fn base_mut(&mut self) -> &mut ControlBase;

    /// Same as [`RenderableItem::render`] but with the hover look.
    fn draw_hover(&self, canvas: &mut dyn Canvas, world_view: &Mat4) -> MyResult<()>;

    fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    /// Pixel coordinates, edges inclusive.
    fn contains(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    fn click(&mut self) {
        self.base_mut().invoke_on_click();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn bounds_follow_position_and_size() {
        let base = ControlBase::new(10, 20, 100, 40, "OK");
        assert_eq!(base.bounds(), Rect::new(10.0, 20.0, 110.0, 60.0));
        assert_eq!(base.origin(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn layout_uses_control_size_and_tracks_text() {
        let mut base = ControlBase::new(0, 0, 120, 30, "Draw");
        assert_eq!(base.text_layout.max_width, 120.0);
        assert_eq!(base.text_layout.max_height, 30.0);
        assert_eq!(base.text_layout.format.font_family, "Calibri");
        base.set_text("Erase");
        assert_eq!(base.text_layout.text, "Erase");
    }

    #[test]
    fn click_handler_runs_when_present() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut base =
            ControlBase::new(0, 0, 10, 10, "x").with_on_click(move || counter.set(counter.get() + 1));
        assert!(base.invoke_on_click());
        assert!(base.invoke_on_click());
        assert_eq!(clicks.get(), 2);

        base.set_on_click(None);
        assert!(!base.invoke_on_click());
        assert_eq!(clicks.get(), 2);
    }
}
