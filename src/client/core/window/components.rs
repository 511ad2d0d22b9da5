//! Description of the window opened by the backend

use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::WindowAttributes;

/// Component description of the window
///
/// This contains various parameters of the window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// The title of the window
    pub title: String,
    /// Logical width of the window when it opens
    pub width: u32,
    /// Logical height of the window when it opens
    pub height: u32,
    /// Whether vsync is enabled
    pub vsync: bool,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "clearloop".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            resizable: true,
        }
    }
}

impl WindowConfig {
    /// A smaller 800x600 window with otherwise default settings.
    pub fn compact() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            ..Default::default()
        }
    }

    /// Returns the logical size of the window
    pub fn size(&self) -> LogicalSize<u32> {
        LogicalSize::new(self.width, self.height)
    }

    /// The size used before the window reports its real one.
    ///
    /// Assumes a scale factor of 1, the backend replaces it on the first frame.
    pub fn initial_physical_size(&self) -> PhysicalSize<u32> {
        self.size().to_physical(1.0)
    }

    /// Builds the winit attributes for this window
    pub fn attributes(&self) -> WindowAttributes {
        winit::window::Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(self.size())
            .with_resizable(self.resizable)
    }
}

#[cfg(test)]
mod tests {
    use assert2::assert;
    use winit::dpi::PhysicalSize;

    use super::WindowConfig;

    #[test]
    fn default_window_is_vsynced_720p() {
        let config = WindowConfig::default();

        assert!(config.width == 1280);
        assert!(config.height == 720);
        assert!(config.vsync);
        assert!(config.initial_physical_size() == PhysicalSize::new(1280, 720));
    }

    #[test]
    fn compact_window_only_changes_size() {
        let compact = WindowConfig::compact();
        let default = WindowConfig::default();

        assert!(compact.size() == winit::dpi::LogicalSize::new(800, 600));
        assert!(compact.title == default.title);
        assert!(compact.vsync == default.vsync);
        assert!(compact.resizable == default.resizable);
    }
}
