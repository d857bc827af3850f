use crate::draw_list::Canvas;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use crate::renderable::RenderableItem;
use crate::renderable::UpdatableItem;
use bevy_math::Mat4;

pub trait SceneItem: RenderableItem + UpdatableItem {}
impl<T: RenderableItem + UpdatableItem> SceneItem for T {}

/// Items updated then rendered, in insertion order, every frame.
#[derive(Default)]
pub struct Scene {
    items: Vec<Box<dyn SceneItem>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl SceneItem + 'static) {
        self.items.push(Box::new(item));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn update(&mut self, time: &FrameTime) {
        for item in &mut self.items {
            item.update(time);
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, world_view: &Mat4) -> MyResult<()> {
        for item in &self.items {
            item.render(canvas, world_view)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::DrawList;
    use crate::draw_list::colors;
    use bevy_math::Vec3;

    struct Ticker {
        ticks: u32,
    }

    impl UpdatableItem for Ticker {
        fn update(&mut self, _time: &FrameTime) {
            self.ticks += 1;
        }
    }

    impl RenderableItem for Ticker {
        fn render(&self, canvas: &mut dyn Canvas, _world_view: &Mat4) -> MyResult<()> {
            for i in 0..self.ticks {
                canvas.line_3d(Vec3::ZERO, Vec3::splat(i as f32), colors::WHITE);
            }
            Ok(())
        }
    }

    struct Broken;

    impl UpdatableItem for Broken {
        fn update(&mut self, _time: &FrameTime) {}
    }

    impl RenderableItem for Broken {
        fn render(&self, _canvas: &mut dyn Canvas, _world_view: &Mat4) -> MyResult<()> {
            Err(eyre::eyre!("no vertex buffer").into())
        }
    }

    #[test]
    fn updates_reach_every_item_before_render() {
        let mut scene = Scene::new();
        scene.push(Ticker { ticks: 0 });
        scene.push(Ticker { ticks: 1 });
        scene.update(&FrameTime::ZERO);
        scene.update(&FrameTime::ZERO);

        let mut list = DrawList::new();
        scene.render(&mut list, &Mat4::IDENTITY).unwrap();
        // 2 + 3 lines
        assert_eq!(list.world.lines.len(), 10);
    }

    #[test]
    fn render_errors_stop_the_frame() {
        let mut scene = Scene::new();
        scene.push(Broken);
        scene.push(Ticker { ticks: 3 });
        let mut list = DrawList::new();
        let err = scene.render(&mut list, &Mat4::IDENTITY).unwrap_err();
        assert!(err.to_string().contains("no vertex buffer"));
        assert!(list.is_empty());
    }
}
