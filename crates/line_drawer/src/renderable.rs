use crate::draw_list::Canvas;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use bevy_math::Mat4;

/// Something that knows how to draw itself (lines, rectangles, text...).
pub trait RenderableItem {
    fn render(&self, canvas: &mut dyn Canvas, world_view: &Mat4) -> MyResult<()>;
}

pub use self::RenderableItem as Renderable;

/// Anything that moves or has to change state before being rendered.
pub trait UpdatableItem {
    fn update(&mut self, time: &FrameTime);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::DrawList;
    use crate::draw_list::colors;
    use bevy_math::Vec3;

    struct Axis;

    impl Renderable for Axis {
        fn render(&self, canvas: &mut dyn Canvas, world_view: &Mat4) -> MyResult<()> {
            let tip = world_view.transform_point3(Vec3::X);
            canvas.line_3d(Vec3::ZERO, tip, colors::WHITE);
            Ok(())
        }
    }

    #[test]
    fn renderable_and_renderable_item_are_one_contract() {
        fn draw(item: &dyn RenderableItem, list: &mut DrawList) {
            item.render(list, &Mat4::from_scale(Vec3::splat(2.0))).unwrap();
        }
        let mut list = DrawList::new();
        draw(&Axis, &mut list);
        assert_eq!(list.world.lines[1].position, [2.0, 0.0, 0.0]);
    }
}
