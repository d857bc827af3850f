use crate::draw_list::Canvas;
use crate::draw_list::Color;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use crate::gui::gui_control::ControlBase;
use crate::gui::gui_control::GuiControl;
use crate::renderable::RenderableItem;
use crate::renderable::UpdatableItem;
use bevy_math::Mat4;

/// How long the pressed color stays up after a click.
pub const CLICK_FLASH_SECONDS: f32 = 0.15;

pub const ROUNDED_CORNER_RADIUS: f32 = 6.0;

#[derive(Debug)]
pub struct GuiButton {
    base: ControlBase,
    pub rounded_button: bool,
    click_flash_remaining: f32,
}

impl GuiButton {
    pub fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        text: impl Into<String>,
        on_click: impl FnMut() + 'static,
    ) -> Self {
        Self {
            base: ControlBase::new(x, y, width, height, text).with_on_click(on_click),
            rounded_button: false,
            click_flash_remaining: 0.0,
        }
    }

    pub fn rounded(mut self) -> Self {
        self.rounded_button = true;
        self
    }

    pub fn is_flashing(&self) -> bool {
        self.click_flash_remaining > 0.0
    }

    fn draw(&self, canvas: &mut dyn Canvas, background: Color, border: Color) {
        let rect = self.base.bounds();
        let background = if self.is_flashing() {
            self.base.colors.background_pressed
        } else {
            background
        };
        if self.rounded_button {
            canvas.fill_rounded_rect(rect, ROUNDED_CORNER_RADIUS, background);
            canvas.rounded_border_box(rect, ROUNDED_CORNER_RADIUS, border);
        } else {
            canvas.fill_rect(rect, background);
            canvas.border_box(rect, border);
        }
        canvas.text(self.base.origin(), &self.base.text_layout, self.base.colors.text);
    }
}

impl UpdatableItem for GuiButton {
    fn update(&mut self, time: &FrameTime) {
        if self.is_flashing() {
            self.click_flash_remaining = (self.click_flash_remaining - time.delta_seconds()).max(0.0);
        }
    }
}

impl RenderableItem for GuiButton {
    fn render(&self, canvas: &mut dyn Canvas, _world_view: &Mat4) -> MyResult<()> {
        let colors = self.base.colors;
        self.draw(canvas, colors.background, colors.border);
        Ok(())
    }
}

impl GuiControl for GuiButton {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn draw_hover(&self, canvas: &mut dyn Canvas, _world_view: &Mat4) -> MyResult<()> {
        let colors = self.base.colors;
        self.draw(canvas, colors.background_hover, colors.border_hover);
        Ok(())
    }

    fn click(&mut self) {
        self.click_flash_remaining = CLICK_FLASH_SECONDS;
        self.base.invoke_on_click();
    }
}
