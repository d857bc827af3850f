use crate::display_config::DisplayWindowConfiguration;

/// Back buffer color at the start of every frame.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Depth written by the per-frame clear; the far plane.
pub const CLEAR_DEPTH: f32 = 1.0;
pub const CLEAR_STENCIL: u8 = 0;

/// Viewport rectangle in pixels plus its depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportExtent {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl ViewportExtent {
    /// Covers the whole configured client area.
    pub fn for_config(config: &DisplayWindowConfiguration) -> Self {
        Self {
            top_left_x: 0.0,
            top_left_y: 0.0,
            width: config.width as f32,
            height: config.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Vertical blanks `Present` waits for.
pub fn sync_interval(config: &DisplayWindowConfiguration) -> u32 {
    if config.wait_vertical_blanking { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_to_black_at_the_far_plane() {
        assert_eq!(CLEAR_COLOR, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(CLEAR_DEPTH, 1.0);
        assert_eq!(CLEAR_STENCIL, 0);
    }

    #[test]
    fn viewport_matches_configured_size() {
        let config = DisplayWindowConfiguration::from_args(["-width", "1024", "-height", "768"])
            .unwrap();
        let viewport = ViewportExtent::for_config(&config);
        assert_eq!((viewport.top_left_x, viewport.top_left_y), (0.0, 0.0));
        assert_eq!((viewport.width, viewport.height), (1024.0, 768.0));
        assert_eq!((viewport.min_depth, viewport.max_depth), (0.0, 1.0));
    }

    #[test]
    fn vsync_flag_picks_sync_interval() {
        let config = DisplayWindowConfiguration::default();
        assert_eq!(sync_interval(&config), 1);

        let config = DisplayWindowConfiguration::from_args(["-novsync"]).unwrap();
        assert_eq!(sync_interval(&config), 0);
    }
}
