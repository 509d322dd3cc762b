//! Starts the window manager on the display named by `DISPLAY`.

use anyhow::{Context, Result};
use plainwm_core::display_servers::XlibDisplayServer;
use plainwm_core::Manager;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    setup_logging();
    tracing::info!("plainwm booting...");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("couldn't init the tokio runtime")?;
    let _rt_guard = rt.enter();

    let config = plainwm::load();
    let manager = Manager::<plainwm::Config, XlibDisplayServer>::new(config)
        .context("couldn't take over the display")?;
    manager.register_child_hook();
    manager.register_terminate_hook();

    rt.block_on(manager.event_loop());

    tracing::info!("plainwm exiting");
    Ok(())
}

/// Honours `RUST_LOG`; defaults to `info` when it is unset.
fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
