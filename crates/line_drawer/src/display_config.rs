use crate::drawer_error::MyResult;
use eyre::WrapErr;
use eyre::eyre;

/// Largest 2D texture edge Direct3D11 guarantees
/// (`D3D11_REQ_TEXTURE2D_U_OR_V_DIMENSION`). Sizes above it cannot back a
/// swap chain or depth buffer.
pub const MAX_DIMENSION: u32 = 16384;

/// Window and presentation settings for the LineDrawer window.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWindowConfiguration {
    pub title: String,
    /// Client area width in pixels.
    pub width: u32,
    /// Client area height in pixels.
    pub height: u32,
    /// Present with a sync interval of 1 instead of 0.
    pub wait_vertical_blanking: bool,
    pub use_warp_device: bool,
}

impl Default for DisplayWindowConfiguration {
    fn default() -> Self {
        Self {
            title: "LineDrawer".to_string(),
            width: 800,
            height: 600,
            wait_vertical_blanking: true,
            use_warp_device: false,
        }
    }
}

impl DisplayWindowConfiguration {
    pub fn from_env_args() -> MyResult<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    /// Builds a configuration from command line arguments.
    ///
    /// Flags accept either a `-` or a `/` prefix and are matched without case:
    /// `-warp`, `-novsync`, `-width <px>`, `-height <px>`, `-title <text>`.
    pub fn from_args<I, S>(args: I) -> MyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let Some(flag) = arg.strip_prefix('-').or_else(|| arg.strip_prefix('/')) else {
                return Err(eyre!("unexpected argument {arg:?}").into());
            };
            match flag.to_ascii_lowercase().as_str() {
                "warp" => config.use_warp_device = true,
                "novsync" => config.wait_vertical_blanking = false,
                "width" => config.width = parse_size(&arg, args.next())?,
                "height" => config.height = parse_size(&arg, args.next())?,
                "title" => {
                    let Some(title) = args.next() else {
                        return Err(eyre!("{arg} expects a value").into());
                    };
                    config.title = title;
                }
                _ => return Err(eyre!("unknown flag {arg:?}").into()),
            }
        }

        Ok(config)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn parse_size(flag: &str, value: Option<String>) -> MyResult<u32> {
    let Some(value) = value else {
        return Err(eyre!("{flag} expects a value").into());
    };
    let size = value
        .parse::<u32>()
        .wrap_err_with(|| format!("{flag} expects a pixel count, got {value:?}"))?;
    if size == 0 {
        return Err(eyre!("{flag} must be greater than zero").into());
    }
    if size > MAX_DIMENSION {
        return Err(eyre!("{flag} must be at most {MAX_DIMENSION}, got {size}").into());
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let config = DisplayWindowConfiguration::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, DisplayWindowConfiguration::default());
        assert!(config.wait_vertical_blanking);
        assert!(!config.use_warp_device);
    }

    #[test]
    fn flags_accept_slash_and_any_case() {
        let config =
            DisplayWindowConfiguration::from_args(["/WARP", "-NoVsync", "/width", "1280"]).unwrap();
        assert!(config.use_warp_device);
        assert!(!config.wait_vertical_blanking);
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn title_takes_the_next_argument() {
        let config = DisplayWindowConfiguration::from_args(["-title", "Cube"]).unwrap();
        assert_eq!(config.title, "Cube");
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(DisplayWindowConfiguration::from_args(["-height", "0"]).is_err());
        assert!(DisplayWindowConfiguration::from_args(["-height", "tall"]).is_err());
        assert!(DisplayWindowConfiguration::from_args(["-width"]).is_err());
    }

    #[test]
    fn rejects_sizes_beyond_the_texture_limit() {
        let err = DisplayWindowConfiguration::from_args(["-width", "3000000000", "-height", "600"])
            .unwrap_err();
        assert!(err.to_string().contains("16384"));
        assert!(DisplayWindowConfiguration::from_args(["-height", "16385"]).is_err());

        let config = DisplayWindowConfiguration::from_args(["-width", "16384", "-height", "16384"])
            .unwrap();
        assert_eq!(config.width, MAX_DIMENSION);
        assert_eq!(config.height as i32, 16384);
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(DisplayWindowConfiguration::from_args(["-fullscreen"]).is_err());
        assert!(DisplayWindowConfiguration::from_args(["cube.obj"]).is_err());
    }

    #[test]
    fn aspect_ratio_uses_client_size() {
        let config = DisplayWindowConfiguration::from_args(["-width", "1280", "-height", "720"])
            .unwrap();
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }
}
