//! Startup configuration of the application.

use crate::client::animation::Animation;
use crate::client::core::window::components::WindowConfig;

/// Everything the application needs to know before it starts.
///
/// There are no config files or command line flags, this is built in code
/// (usually with [`AppConfig::default`]) and handed to
/// [`ApplicationState::initialize`](crate::client::ApplicationState::initialize).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
    /// The window that is opened at startup
    pub window: WindowConfig,
    /// How the clear color is animated
    pub animation: Animation,
}
