use tracing_core::{Level, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::filter_fn, registry};

/// Install the application logger on stderr.
///
/// Records emitted through the `log` facade are forwarded to the subscriber.
/// Calling this more than once is harmless; only the first call installs it.
pub fn install() {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::INFO)
        .with_filter(filter_fn(|m| {
            if let Some(path) = m.module_path() {
                // The wgpu crates are very chatty at the info level.
                let noisy = path.starts_with("wgpu") || path.starts_with("naga");
                if noisy && *m.level() >= Level::INFO {
                    return false;
                }
            }
            true
        }));

    if registry().with(layer).try_init().is_err() {
        log::debug!("Application logger already installed");
    }
}
