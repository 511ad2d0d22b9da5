//! Windowing with winit.
//!
//! The event loop is never handed control. Instead it is pumped, with a zero timeout while
//! opening the window ([`WinitWindows::open`]) and once per frame afterwards
//! ([`WinitWindows::pump`]).

pub mod components;
pub mod events;

use std::sync::Arc;
use std::time::Duration;

use snafu::ResultExt;
use tracing::{debug, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::client::core::errors::{EventLoopExitedCtx, NoWindowCtx, SetupError, WindowCreationCtx};
use crate::client::core::window::components::WindowConfig;
use crate::client::core::window::events::translate_window_event;
use crate::client::core::InputEvent;

/// How often the event loop is pumped while waiting for it to let us create the window.
///
/// Desktop platforms resume on the very first pump, this only guards against looping forever.
const MAX_SETUP_PUMPS: u32 = 64;

/// Owns the primary window and collects its input between pumps.
pub struct WinitWindows {
    /// The primary window. Shared with the wgpu surface, which needs to keep it alive.
    window: Arc<Window>,
    /// Events received since the last [`WinitWindows::drain`]
    pending: Vec<InputEvent>,
}

impl WinitWindows {
    /// Pumps the event loop until it resumes and creates the window described by `config`.
    pub fn open(event_loop: &mut EventLoop<()>, config: &WindowConfig) -> Result<Self, SetupError> {
        info!("Opening window {}", config.title);

        let mut opener = WindowOpener::new(config);

        for pump in 1..=MAX_SETUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut opener)
            {
                return EventLoopExitedCtx { code }.fail();
            }

            if let Some(created) = opener.created.take() {
                let window = created.context(WindowCreationCtx)?;
                debug!("Window {:?} created after {pump} pump(s)", window.id());

                return Ok(WinitWindows {
                    window: Arc::new(window),
                    pending: opener.pending,
                });
            }
        }

        NoWindowCtx {
            pumps: MAX_SETUP_PUMPS,
        }
        .fail()
    }

    /// Processes everything winit has queued up, waiting at most `timeout` for new events.
    ///
    /// If the platform shuts the event loop down, a [`InputEvent::QuitRequested`] is queued.
    pub fn pump(&mut self, event_loop: &mut EventLoop<()>, timeout: Option<Duration>) {
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(timeout, self) {
            info!("Event loop exited with code {code}");
            self.pending.push(InputEvent::QuitRequested);
        }
    }

    /// Moves the collected input into `events`
    pub fn drain(&mut self, events: &mut Vec<InputEvent>) {
        events.append(&mut self.pending);
    }

    /// The primary window
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl ApplicationHandler for WinitWindows {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // The window outlives suspension on desktop, nothing to recreate.
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window.id() {
            return;
        }

        if let Some(input) = translate_window_event(&event) {
            self.pending.push(input);
        }
    }
}

/// Handler used while waiting for the event loop to resume for the first time.
struct WindowOpener<'a> {
    /// What to create once resumed
    config: &'a WindowConfig,
    /// The result of the creation attempt, taken by [`WinitWindows::open`]
    created: Option<Result<Window, winit::error::OsError>>,
    /// Id of the created window, set as soon as it exists
    window_id: Option<WindowId>,
    /// Input the new window received in the pump that created it
    pending: Vec<InputEvent>,
}

impl<'a> WindowOpener<'a> {
    /// Handler that creates a window from `config` on the first resume
    fn new(config: &'a WindowConfig) -> Self {
        WindowOpener {
            config,
            created: None,
            window_id: None,
            pending: Vec::new(),
        }
    }

    /// Keeps input addressed to the created window so it is not lost before the first frame.
    fn record(&mut self, window_id: WindowId, event: &WindowEvent) {
        if self.window_id != Some(window_id) {
            return;
        }

        if let Some(input) = translate_window_event(event) {
            self.pending.push(input);
        }
    }
}

impl ApplicationHandler for WindowOpener<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_id.is_some() || self.created.is_some() {
            return;
        }

        let created = event_loop.create_window(self.config.attributes());
        self.window_id = created.as_ref().ok().map(Window::id);
        self.created = Some(created);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        self.record(window_id, &event);
    }
}
