use crate::draw_list::Canvas;
use crate::draw_list::Color;
use crate::draw_list::colors;
use crate::drawer_error::MyResult;
use crate::frame_clock::FrameTime;
use crate::renderable::RenderableItem;
use crate::renderable::UpdatableItem;
use bevy_math::Mat4;
use bevy_math::Vec3;

/// Pairs of corner indices; corner `i` has x, y, z set from bits 0, 1, 2.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Cube outline in world space. The frame's world-view matrix spins it.
#[derive(Debug, Clone, PartialEq)]
pub struct WireCube {
    pub half_extent: f32,
    pub color: Color,
    pulse: f32,
}

impl WireCube {
    pub fn new(half_extent: f32, color: Color) -> Self {
        Self {
            half_extent,
            color,
            pulse: 1.0,
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            let pick = |bit: usize| {
                if i & (1 << bit) == 0 {
                    -self.half_extent
                } else {
                    self.half_extent
                }
            };
            Vec3::new(pick(0), pick(1), pick(2))
        })
    }

    fn current_color(&self) -> Color {
        (self.color.truncate() * self.pulse).extend(self.color.w)
    }
}

impl Default for WireCube {
    fn default() -> Self {
        Self::new(1.0, colors::ORANGE)
    }
}

impl UpdatableItem for WireCube {
    fn update(&mut self, time: &FrameTime) {
        // brightness between 0.6 and 1.0, one cycle every two seconds
        self.pulse = 0.8 + 0.2 * (time.total_seconds() * std::f32::consts::PI).cos();
    }
}

impl RenderableItem for WireCube {
    fn render(&self, canvas: &mut dyn Canvas, _world_view: &Mat4) -> MyResult<()> {
        let corners = self.corners();
        let color = self.current_color();
        for (from, to) in EDGES {
            canvas.line_3d(corners[from], corners[to], color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::DrawList;
    use chrono::TimeDelta;

    #[test]
    fn every_edge_is_axis_aligned_and_full_length() {
        let cube = WireCube::new(0.5, colors::WHITE);
        let corners = cube.corners();
        for (from, to) in EDGES {
            let delta = (corners[to] - corners[from]).abs();
            assert_eq!(delta.max_element(), 1.0);
            assert_eq!(delta.element_sum(), 1.0);
        }
    }

    #[test]
    fn renders_twelve_world_lines() {
        let cube = WireCube::default();
        let mut list = DrawList::new();
        cube.render(&mut list, &Mat4::IDENTITY).unwrap();
        assert_eq!(list.world.lines.len(), 24);
        assert!(list.screen.is_empty());
    }

    #[test]
    fn pulse_dims_the_color_but_keeps_alpha() {
        let mut cube = WireCube::new(1.0, colors::WHITE);
        cube.update(&FrameTime {
            total: TimeDelta::seconds(1),
            ..FrameTime::ZERO
        });
        let mut list = DrawList::new();
        cube.render(&mut list, &Mat4::IDENTITY).unwrap();
        let [r, g, b, a] = list.world.lines[0].color;
        assert!((r - 0.6).abs() < 1e-5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 1.0);
    }
}
