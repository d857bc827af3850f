//! CPU-side recording of the primitives items draw each frame.
//!
//! Items never touch the device directly; they record into a [`Canvas`] and
//! the renderer uploads the batches once per frame.

use crate::gui::text_format::TextLayout;
use bevy_math::Rect;
use bevy_math::Vec2;
use bevy_math::Vec3;
use bevy_math::Vec4;

/// Straight RGBA in `0.0..=1.0`.
pub type Color = Vec4;

pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const DIM_GRAY: Color = Color::new(0.41, 0.41, 0.41, 1.0);
    pub const DARK_SLATE_GRAY: Color = Color::new(0.18, 0.31, 0.31, 1.0);
    pub const LIGHT_GRAY: Color = Color::new(0.83, 0.83, 0.83, 1.0);
    pub const STEEL_BLUE: Color = Color::new(0.27, 0.51, 0.71, 1.0);
    pub const ORANGE: Color = Color::new(1.0, 0.65, 0.0, 1.0);
}

/// Number of segments used for each quarter circle of a rounded rectangle.
pub const CORNER_SEGMENTS: usize = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// Vertices for one coordinate space, split by topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Line list: every two vertices form a segment.
    pub lines: Vec<Vertex>,
    /// Triangle list.
    pub triangles: Vec<Vertex>,
}

impl Batch {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Top-left corner of the layout box in pixels.
    pub origin: Vec2,
    pub layout: TextLayout,
    pub color: Color,
}

impl TextRun {
    /// The box the label is aligned inside, in window pixels.
    pub fn layout_rect(&self) -> Rect {
        Rect::from_corners(
            self.origin,
            self.origin + Vec2::new(self.layout.max_width, self.layout.max_height),
        )
    }
}

/// Drawing operations available to renderable items.
///
/// 2D operations take window pixel coordinates with the origin at the top
/// left. 3D lines are in world space and go through the frame's world-view
/// matrix.
pub trait Canvas {
    fn line_3d(&mut self, from: Vec3, to: Vec3, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn border_box(&mut self, rect: Rect, color: Color);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);
    fn rounded_border_box(&mut self, rect: Rect, radius: f32, color: Color);
    fn text(&mut self, origin: Vec2, layout: &TextLayout, color: Color);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    /// Transformed by the world-view matrix.
    pub world: Batch,
    /// Positioned in window pixels.
    pub screen: Batch,
    pub text: Vec<TextRun>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.screen.clear();
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty() && self.screen.is_empty() && self.text.is_empty()
    }

    fn push_screen_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        for corner in [a, b, c] {
            self.screen.triangles.push(Vertex::new(corner.extend(0.0), color));
        }
    }

    fn push_closed_outline(&mut self, points: &[Vec2], color: Color) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(from, to, color);
        }
    }
}

impl Canvas for DrawList {
    fn line_3d(&mut self, from: Vec3, to: Vec3, color: Color) {
        self.world.lines.push(Vertex::new(from, color));
        self.world.lines.push(Vertex::new(to, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.screen.lines.push(Vertex::new(from.extend(0.0), color));
        self.screen.lines.push(Vertex::new(to.extend(0.0), color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let [top_left, top_right, bottom_right, bottom_left] = rect_corners(rect);
        self.push_screen_triangle(top_left, top_right, bottom_right, color);
        self.push_screen_triangle(top_left, bottom_right, bottom_left, color);
    }

    fn border_box(&mut self, rect: Rect, color: Color) {
        self.push_closed_outline(&rect_corners(rect), color);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        if clamp_radius(rect, radius) == 0.0 {
            return self.fill_rect(rect, color);
        }
        let outline = rounded_outline(rect, radius);
        let center = rect.center();
        for (i, &from) in outline.iter().enumerate() {
            let to = outline[(i + 1) % outline.len()];
            self.push_screen_triangle(center, from, to, color);
        }
    }

    fn rounded_border_box(&mut self, rect: Rect, radius: f32, color: Color) {
        if clamp_radius(rect, radius) == 0.0 {
            return self.border_box(rect, color);
        }
        self.push_closed_outline(&rounded_outline(rect, radius), color);
    }

    fn text(&mut self, origin: Vec2, layout: &TextLayout, color: Color) {
        self.text.push(TextRun {
            origin,
            layout: layout.clone(),
            color,
        });
    }
}

/// Top left, top right, bottom right, bottom left.
fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
    ]
}

pub fn clamp_radius(rect: Rect, radius: f32) -> f32 {
    let limit = rect.width().min(rect.height()) / 2.0;
    radius.clamp(0.0, limit.max(0.0))
}

/// Clockwise outline (in y-down pixel space) of a rectangle with rounded
/// corners, starting at the left end of the top-left arc.
pub fn rounded_outline(rect: Rect, radius: f32) -> Vec<Vec2> {
    let radius = clamp_radius(rect, radius);
    let inset = Rect::from_corners(rect.min + radius, rect.max - radius);
    let corner_centers = rect_corners(inset);

    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (corner, center) in corner_centers.into_iter().enumerate() {
        let start = std::f32::consts::PI + corner as f32 * std::f32::consts::FRAC_PI_2;
        for step in 0..=CORNER_SEGMENTS {
            let angle = start + step as f32 / CORNER_SEGMENTS as f32 * std::f32::consts::FRAC_PI_2;
            points.push(center + radius * Vec2::new(angle.cos(), angle.sin()));
        }
    }
    points
}
