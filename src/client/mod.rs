//! The application loop.
//!
//! [`ApplicationState`] owns the [`PresentationBackend`] and drives it through
//! `poll events -> advance -> render` until the user quits, then tears it down.

use snafu::ResultExt;
use tracing::{debug, info, info_span};
use winit::dpi::PhysicalSize;
use winit::keyboard::{Key, NamedKey};

use crate::client::animation::{AnimatedColor, Animation};
use crate::client::config::AppConfig;
use crate::client::core::{ClearPass, FrameOutcome, InputEvent, PresentationBackend};
use crate::client::errors::{AppResult, FrameCtx, SetupCtx};

pub mod animation;
pub mod config;
pub mod core;
pub mod errors;

/// Where the application is in its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Set up and rendering frames
    Running,
    /// A quit was requested, the next step is [`ApplicationState::shutdown`]
    Terminated,
}

/// The state of the running application.
///
/// Created by [`initialize`](ApplicationState::initialize) and consumed by
/// [`shutdown`](ApplicationState::shutdown). The backend inside owns both the window and the
/// rendering context, so they exist exactly as long as this value does.
pub struct ApplicationState<B: PresentationBackend> {
    /// Window, rendering context and swapchain
    backend: B,
    /// Width of the viewport in physical pixels
    width: u32,
    /// Height of the viewport in physical pixels
    height: u32,
    /// The color the next frame is cleared to
    clear_color: AnimatedColor,
    /// Number of frames presented so far
    frame_count: u64,
    /// Cleared once a quit is requested, never set again
    running: bool,
    /// Set while the viewport has no area, the next poll waits for input instead of spinning
    idle: bool,
    /// Parameters of the clear color animation
    animation: Animation,
    /// Events drained from the backend, reused across frames
    event_buffer: Vec<InputEvent>,
}

impl<B: PresentationBackend> ApplicationState<B> {
    /// Sets up the backend and the initial state.
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        let backend = B::setup(config).context(SetupCtx)?;
        let state = Self::with_backend(backend, config);

        info!("Application initialized");
        Ok(state)
    }

    /// Builds the initial state around a backend that is already set up.
    pub fn with_backend(backend: B, config: &AppConfig) -> Self {
        let PhysicalSize { width, height } = config.window.initial_physical_size();

        ApplicationState {
            backend,
            width,
            height,
            clear_color: config.animation.color_at(0),
            frame_count: 0,
            running: true,
            idle: false,
            animation: config.animation.clone(),
            event_buffer: Vec::new(),
        }
    }

    /// Drains pending input.
    ///
    /// A quit request or an Escape press stops the application. Space logs a short report
    /// about the current frame. After a frame was skipped for a zero sized viewport, this
    /// waits for input instead of returning right away.
    pub fn poll_events(&mut self) {
        let mut events = std::mem::take(&mut self.event_buffer);
        if self.idle {
            self.backend.wait_events(&mut events);
        } else {
            self.backend.poll_events(&mut events);
        }

        for event in events.drain(..) {
            match event {
                InputEvent::QuitRequested => {
                    info!("Quit requested, exiting...");
                    self.running = false;
                }
                InputEvent::KeyPressed(Key::Named(NamedKey::Escape)) => {
                    info!("Escape pressed, exiting...");
                    self.running = false;
                }
                InputEvent::KeyPressed(Key::Named(NamedKey::Space)) => {
                    info!(
                        "Frame {}, Size: {}x{}, Color: ({:.2}, {:.2}, {:.2})",
                        self.frame_count,
                        self.width,
                        self.height,
                        self.clear_color.r(),
                        self.clear_color.g(),
                        self.clear_color.b()
                    );
                }
                InputEvent::KeyPressed(_) => {}
            }
        }

        self.event_buffer = events;
    }

    /// Picks up the current viewport size and recomputes the clear color.
    pub fn advance(&mut self) {
        let size = self.backend.viewport_size();
        self.width = size.width;
        self.height = size.height;

        self.clear_color = self.animation.color_at(self.frame_count);
    }

    /// Clears the screen to the current color and presents it.
    ///
    /// The frame counter only moves when the frame actually reached the screen.
    pub fn render_frame(&mut self) -> AppResult<FrameOutcome> {
        let pass = ClearPass {
            color: self.clear_color,
            size: PhysicalSize::new(self.width, self.height),
            frame: self.frame_count,
        };

        let outcome = self.backend.clear_and_present(&pass).context(FrameCtx)?;
        if outcome == FrameOutcome::Presented {
            self.frame_count += 1;
        }

        let minimized = self.width == 0 || self.height == 0;
        let idle = outcome == FrameOutcome::Skipped && minimized;
        if idle != self.idle {
            debug!("Viewport is {}x{}, idle: {idle}", self.width, self.height);
            self.idle = idle;
        }

        Ok(outcome)
    }

    /// Runs the loop until a quit is requested, then shuts down.
    ///
    /// Shutdown also happens when a frame fails; the error is returned afterwards.
    pub fn run(mut self) -> AppResult<()> {
        info!("Entered main loop");

        let mut result = Ok(());
        while self.running {
            let _span = info_span!("frame", frame = self.frame_count).entered();

            self.poll_events();
            if !self.running {
                break;
            }

            self.advance();
            if let Err(error) = self.render_frame() {
                result = Err(error);
                break;
            }
        }

        debug!("Left main loop after {} frames", self.frame_count);
        self.shutdown();
        result
    }

    /// Tears down the backend.
    pub fn shutdown(self) {
        self.backend.shutdown();
        info!("Cleanup complete");
    }

    /// Where the application currently is in its lifetime
    pub fn lifecycle(&self) -> Lifecycle {
        if self.running {
            Lifecycle::Running
        } else {
            Lifecycle::Terminated
        }
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of frames presented so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The current viewport size in physical pixels
    pub fn viewport(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }

    /// The color the next frame is cleared to
    pub fn clear_color(&self) -> AnimatedColor {
        self.clear_color
    }

    /// The backend this state runs on
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
