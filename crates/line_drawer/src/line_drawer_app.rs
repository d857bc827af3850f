use crate::camera::FrameTransform;
use crate::display_config::DisplayWindowConfiguration;
use crate::draw_behaviour::DrawBehaviour;
use crate::draw_list::DrawList;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use crate::gui::gui_button::GuiButton;
use crate::gui::gui_layer::GuiLayer;
use crate::scene::Scene;
use crate::wire_cube::WireCube;
use bevy_math::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

pub const VK_ESCAPE: u8 = 0x1B;

const BUTTON_WIDTH: i32 = 120;
const BUTTON_HEIGHT: i32 = 36;
const BUTTON_MARGIN: i32 = 12;

/// The LineDrawer application: a spinning wire cube and a row of buttons.
pub struct LineDrawerApp {
    scene: Scene,
    gui: GuiLayer,
    paused: Rc<Cell<bool>>,
    close_requested: Rc<Cell<bool>>,
    frozen_transform: Option<FrameTransform>,
}

impl LineDrawerApp {
    pub fn new(config: &DisplayWindowConfiguration) -> Self {
        let mut scene = Scene::new();
        scene.push(WireCube::default());

        let paused = Rc::new(Cell::new(false));
        let close_requested = Rc::new(Cell::new(false));

        let mut gui = GuiLayer::new();
        let top = config.height as i32 - BUTTON_HEIGHT - BUTTON_MARGIN;

        let toggle = paused.clone();
        gui.add(
            GuiButton::new(BUTTON_MARGIN, top, BUTTON_WIDTH, BUTTON_HEIGHT, "Pause", move || {
                toggle.set(!toggle.get());
                info!(paused = toggle.get(), "Toggled rotation");
            })
            .rounded(),
        );

        let close = close_requested.clone();
        gui.add(GuiButton::new(
            2 * BUTTON_MARGIN + BUTTON_WIDTH,
            top,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
            "Quit",
            move || close.set(true),
        ));

        Self {
            scene,
            gui,
            paused,
            close_requested,
            frozen_transform: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn gui(&self) -> &GuiLayer {
        &self.gui
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl DrawBehaviour for LineDrawerApp {
    fn on_update(&mut self, time: &FrameTime) {
        if !self.is_paused() {
            self.scene.update(time);
        }
        self.gui.update(time);
    }

    fn on_render(&mut self, draw_list: &mut DrawList, transform: &mut FrameTransform) -> MyResult<()> {
        if self.is_paused() {
            *transform = *self.frozen_transform.get_or_insert(*transform);
        } else {
            self.frozen_transform = None;
        }
        self.scene.render(draw_list, &transform.world_view)?;
        self.gui.render(draw_list, &transform.world_view)?;
        Ok(())
    }

    fn on_mouse_move(&mut self, point: Vec2) {
        self.gui.on_mouse_move(point);
    }

    fn on_mouse_down(&mut self, point: Vec2) {
        self.gui.on_mouse_down(point);
    }

    fn on_mouse_up(&mut self, point: Vec2) {
        self.gui.on_mouse_up(point);
    }

    fn on_mouse_leave(&mut self) {
        self.gui.on_mouse_leave();
    }

    fn on_key_down(&mut self, key: u8) {
        info!("Key down: {}", key);
        if key == VK_ESCAPE {
            self.close_requested.set(true);
        }
    }

    fn on_key_up(&mut self, key: u8) {
        info!("Key up: {}", key);
    }

    fn should_close(&self) -> bool {
        self.close_requested.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::gui::gui_control::GuiControl;

    fn app() -> LineDrawerApp {
        LineDrawerApp::new(&DisplayWindowConfiguration::default())
    }

    fn center_of(app: &LineDrawerApp, index: usize) -> Vec2 {
        app.gui().control(index).unwrap().bounds().center()
    }

    fn click(app: &mut LineDrawerApp, point: Vec2) {
        app.on_mouse_move(point);
        app.on_mouse_down(point);
        app.on_mouse_up(point);
    }

    #[test]
    fn buttons_sit_along_the_bottom_edge() {
        let app = app();
        assert_eq!(app.gui().len(), 2);
        assert_eq!(app.scene().len(), 1);
        for index in 0..2 {
            let bounds = app.gui().control(index).unwrap().bounds();
            assert_eq!(bounds.max.y, (600 - BUTTON_MARGIN) as f32);
        }
    }

    #[test]
    fn largest_window_keeps_buttons_on_screen() {
        let config = DisplayWindowConfiguration::from_args(["-width", "16384", "-height", "16384"])
            .unwrap();
        let app = LineDrawerApp::new(&config);
        let bounds = app.gui().control(0).unwrap().bounds();
        assert_eq!(bounds.min.y, (16384 - BUTTON_MARGIN - BUTTON_HEIGHT) as f32);
        assert_eq!(bounds.max.y, (16384 - BUTTON_MARGIN) as f32);
    }

    #[test]
    fn renders_cube_and_buttons() {
        let mut app = app();
        let mut list = DrawList::new();
        let mut transform = Camera::default().frame_transform(0.0);
        app.on_render(&mut list, &mut transform).unwrap();
        assert_eq!(list.world.lines.len(), 24);
        assert_eq!(list.text.len(), 2);
        assert!(!list.screen.triangles.is_empty());
    }

    #[test]
    fn pause_button_freezes_the_transform() {
        let mut app = app();
        let camera = Camera::default();
        let pause = center_of(&app, 0);
        click(&mut app, pause);
        assert!(app.is_paused());

        let mut list = DrawList::new();
        let frozen = camera.frame_transform(1.0);
        let mut transform = frozen;
        app.on_render(&mut list, &mut transform).unwrap();
        assert_eq!(transform, frozen);

        let mut transform = camera.frame_transform(2.0);
        app.on_render(&mut list, &mut transform).unwrap();
        assert_eq!(transform, frozen);

        click(&mut app, pause);
        assert!(!app.is_paused());
        let resumed = camera.frame_transform(3.0);
        let mut transform = resumed;
        app.on_render(&mut list, &mut transform).unwrap();
        assert_eq!(transform, resumed);
    }

    #[test]
    fn quit_button_and_escape_request_close() {
        let mut app = app();
        assert!(!app.should_close());
        let quit = center_of(&app, 1);
        click(&mut app, quit);
        assert!(app.should_close());

        let mut app = self::app();
        app.on_key_down(b'A');
        assert!(!app.should_close());
        app.on_key_down(VK_ESCAPE);
        assert!(app.should_close());
    }
}
