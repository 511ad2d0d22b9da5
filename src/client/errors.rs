//! Errors that end the application

use snafu::Snafu;

use crate::client::core::errors::{FrameError, SetupError};

/// Anything that stops the application other than the user quitting.
#[derive(Snafu, Debug)]
#[snafu(context(suffix(Ctx)), visibility(pub(crate)))]
pub enum AppError {
    /// The window or the GPU could not be set up.
    #[snafu(display("Setup failed: {source}"))]
    Setup {
        /// The underlying setup error
        source: SetupError,
    },
    /// A frame could not be rendered.
    #[snafu(display("Rendering failed: {source}"))]
    Frame {
        /// The underlying frame error
        source: FrameError,
    },
}

/// Shorthand type for [`Result<T, AppError>`]
pub type AppResult<T> = Result<T, AppError>;
