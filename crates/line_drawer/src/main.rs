use line_drawer::display_config::DisplayWindowConfiguration;
use line_drawer::drawer_error::MyResult;
use tracing::info;

pub fn main() -> MyResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();
    info!("Ahoy, LineDrawer!");

    let config = DisplayWindowConfiguration::from_env_args()?;
    info!(?config, "Starting");
    run(config)
}

#[cfg(windows)]
fn run(config: DisplayWindowConfiguration) -> MyResult<()> {
    use line_drawer::line_drawer_app::LineDrawerApp;

    let app = LineDrawerApp::new(&config);
    line_drawer::d3d11_runner::run(config, app)
}

#[cfg(not(windows))]
fn run(_config: DisplayWindowConfiguration) -> MyResult<()> {
    Err(eyre::eyre!("LineDrawer draws through Direct3D11 and only runs on Windows").into())
}
