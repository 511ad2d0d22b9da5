//! Core functionality of the application.
//!
//! This module contains the [`PresentationBackend`] the application loop talks to, and the
//! winit + wgpu implementation of it in [`graphics`] and [`window`].

pub mod errors;
pub mod graphics;
pub mod window;

use winit::dpi::PhysicalSize;
use winit::keyboard::Key;

use crate::client::animation::AnimatedColor;
use crate::client::config::AppConfig;
use crate::client::core::errors::{FrameError, SetupError};

/// The windowing + GPU service the application loop runs on.
///
/// All calls are synchronous. The loop owns the backend for its whole lifetime and is the only
/// thing calling into it.
pub trait PresentationBackend: Sized {
    /// Opens the window and sets up the rendering context.
    ///
    /// Either everything is created or nothing is: on error, whatever was already created is
    /// released before returning.
    fn setup(config: &AppConfig) -> Result<Self, SetupError>;

    /// Moves every pending input event into `events` without blocking.
    fn poll_events(&mut self, events: &mut Vec<InputEvent>);

    /// Like [`poll_events`](PresentationBackend::poll_events), but sleeps until input arrives
    /// or a short timeout passes. Used while there is nothing to draw.
    fn wait_events(&mut self, events: &mut Vec<InputEvent>);

    /// The current size of the drawable area in physical pixels.
    fn viewport_size(&self) -> PhysicalSize<u32>;

    /// Clears the frame to a color and presents it.
    fn clear_and_present(&mut self, pass: &ClearPass) -> Result<FrameOutcome, FrameError>;

    /// Releases everything created in [`setup`](PresentationBackend::setup), in reverse
    /// order of creation.
    fn shutdown(self);
}

/// Input the application loop reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window
    QuitRequested,
    /// A key went down (logical key, repeats included)
    KeyPressed(Key),
}

/// Everything needed to record a clear-only render pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearPass {
    /// The color the frame is cleared to
    pub color: AnimatedColor,
    /// The size of the frame
    pub size: PhysicalSize<u32>,
    /// The number of the frame being rendered
    pub frame: u64,
}

/// What happened to a frame handed to [`PresentationBackend::clear_and_present`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame is on its way to the screen
    Presented,
    /// Nothing was shown this time around (minimized window, surface being recreated, ...)
    Skipped,
}
