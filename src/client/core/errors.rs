//! Errors raised by the presentation backend

use snafu::Snafu;

/// Error raised while opening the window or setting up the GPU.
///
/// None of these are recoverable, the application exits when it sees one.
#[derive(Snafu, Debug)]
#[snafu(context(suffix(Ctx)), visibility(pub(crate)))]
pub enum SetupError {
    /// The windowing system could not be initialized.
    #[snafu(display("Failed to create the event loop: {source}"))]
    EventLoop {
        /// The error reported by winit
        source: winit::error::EventLoopError,
    },
    /// The OS refused to create the window.
    #[snafu(display("Failed to create window: {source}"))]
    WindowCreation {
        /// The error reported by winit
        source: winit::error::OsError,
    },
    /// The event loop never asked us to create a window.
    #[snafu(display("The event loop did not resume after {pumps} pumps, no window was created!"))]
    NoWindow {
        /// How many times the event loop was pumped
        pumps: u32,
    },
    /// The event loop exited while the window was being set up.
    #[snafu(display("The event loop exited with code {code} during setup!"))]
    EventLoopExited {
        /// Exit code passed by the platform
        code: i32,
    },
    /// wgpu could not create a surface for the window.
    #[snafu(display("Failed to create surface: {source}"))]
    CreateSurface {
        /// The error reported by wgpu
        source: wgpu::CreateSurfaceError,
    },
    /// No adapter can present to the window.
    #[snafu(display("No GPU adapter is able to present to the window!"))]
    NoAdapter,
    /// The chosen adapter reports no formats the surface can be configured with.
    #[snafu(display("The surface does not support any color format on the selected adapter!"))]
    NoSurfaceFormat,
    /// The adapter refused to hand out a device.
    #[snafu(display("Failed to request device: {source}"))]
    RequestDevice {
        /// The error reported by wgpu
        source: wgpu::RequestDeviceError,
    },
}

/// Error raised while rendering a frame.
///
/// Surface hiccups such as a lost or outdated swapchain are handled inside the backend and
/// never show up here.
#[derive(Snafu, Debug)]
#[snafu(context(suffix(Ctx)), visibility(pub(crate)))]
pub enum FrameError {
    /// The GPU ran out of memory while acquiring the next frame.
    #[snafu(display("Out of memory while acquiring frame {frame}!"))]
    OutOfMemory {
        /// The frame that failed
        frame: u64,
    },
}
