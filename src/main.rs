#![cfg_attr(feature = "windowed", windows_subsystem = "windows")]
#![deny(missing_docs)]

//! The `clearloop` binary.
//!
//! Takes no arguments. Exits with 0 when the user quits and 1 when setup or rendering fails.

use std::process::ExitCode;

use clearloop::client::config::AppConfig;
use clearloop::client::core::graphics::WgpuBackend;
use clearloop::client::ApplicationState;
use clearloop::common::trace::init_tracing;
use tracing::{error, info};

/// The main entry point for the application.
///
/// Initializes tracing, opens the window and runs the loop until it ends.
fn main() -> ExitCode {
    let _trace_guard = init_tracing();

    /// Value containing the cargo `version` metadata
    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");
    info!("Starting clearloop version {}", VERSION.unwrap_or("unknown"));

    let result =
        ApplicationState::<WgpuBackend>::initialize(&AppConfig::default()).and_then(|app| {
            info!("Application running. Press ESC to exit.");
            app.run()
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
