//! Rendering code for the application.
//!
//! This module contains the [`WgpuBackend`], the [`PresentationBackend`] that opens a winit
//! window and clears it with [`wgpu`](https://docs.rs/wgpu/latest/wgpu/index.html).

use std::time::Duration;

use tracing::{debug, info, warn};
use wgpu::{CommandEncoderDescriptor, SurfaceError, TextureFormat};
use winit::dpi::PhysicalSize;
use winit::event_loop::{ControlFlow, EventLoop};

use snafu::ResultExt;

use crate::client::config::AppConfig;
use crate::client::core::errors::{EventLoopCtx, FrameError, OutOfMemoryCtx, SetupError};
use crate::client::core::graphics::rendering::record_clear_pass;
use crate::client::core::graphics::resources::{GraphicsState, RenderContext};
use crate::client::core::window::WinitWindows;
use crate::client::core::{ClearPass, FrameOutcome, InputEvent, PresentationBackend};

mod adapter_selection_utils;
mod rendering;
pub mod resources;

/// Format of the depth/stencil buffer cleared alongside the swapchain
pub const DEPTH_STENCIL_FORMAT: TextureFormat = TextureFormat::Depth24PlusStencil8;

/// Every attachment is single sampled
pub const SAMPLE_COUNT: u32 = 1;

/// Longest the event loop sleeps while the window has nothing to draw
const IDLE_WAIT_TIMEOUT: Duration = Duration::from_millis(100);

/// Presentation backend built on winit and wgpu.
///
/// Resources are acquired in field order from the bottom up (event loop, window, surface,
/// device) and released in the opposite order by [`PresentationBackend::shutdown`].
///
/// The fields are declared in release order, so a plain drop (a failed setup, a panic) tears
/// things down in the same order as `shutdown`. Keep the two in sync.
pub struct WgpuBackend {
    /// Adapter, device, queue and swapchain configuration
    graphics: GraphicsState,
    /// Instance and window surface
    context: RenderContext,
    /// The primary window and its pending input
    windows: WinitWindows,
    /// The windowing subsystem
    event_loop: EventLoop<()>,
}

impl PresentationBackend for WgpuBackend {
    fn setup(config: &AppConfig) -> Result<Self, SetupError> {
        let mut event_loop = EventLoop::new().context(EventLoopCtx)?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let windows = WinitWindows::open(&mut event_loop, &config.window)?;
        let window = windows.window().clone();

        let context = RenderContext::new(window.clone())?;
        info!("Surface created for window {:?}", window.id());

        // Anything created above is dropped in reverse order if this fails
        let graphics = pollster::block_on(GraphicsState::new(
            &context,
            window.inner_size(),
            config.window.vsync,
        ))?;

        Ok(WgpuBackend {
            graphics,
            context,
            windows,
            event_loop,
        })
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        self.windows.pump(&mut self.event_loop, Some(Duration::ZERO));
        self.windows.drain(events);
    }

    fn wait_events(&mut self, events: &mut Vec<InputEvent>) {
        self.windows.pump(&mut self.event_loop, Some(IDLE_WAIT_TIMEOUT));
        self.windows.drain(events);
    }

    fn viewport_size(&self) -> PhysicalSize<u32> {
        self.windows.window().inner_size()
    }

    fn clear_and_present(&mut self, pass: &ClearPass) -> Result<FrameOutcome, FrameError> {
        // Minimized
        if pass.size.width == 0 || pass.size.height == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let surface = &self.context.surface;
        if self.graphics.surface_size() != pass.size {
            debug!("Resizing surface to {}x{}", pass.size.width, pass.size.height);
            self.graphics.resize(surface, pass.size);
        }

        let output = match surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.graphics.reconfigure(surface);
                return Ok(FrameOutcome::Skipped);
            }
            Err(SurfaceError::OutOfMemory) => {
                return OutOfMemoryCtx { frame: pass.frame }.fail();
            }
            Err(e) => {
                warn!("Surface error! {}", e);
                return Ok(FrameOutcome::Skipped);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut command_encoder =
            self.graphics
                .device
                .create_command_encoder(&CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        record_clear_pass(
            &mut command_encoder,
            &view,
            &self.graphics.depth_stencil.view,
            pass.color.into(),
        );

        self.graphics
            .queue
            .submit(std::iter::once(command_encoder.finish()));
        self.windows.window().pre_present_notify();
        output.present();

        Ok(FrameOutcome::Presented)
    }

    fn shutdown(self) {
        let WgpuBackend {
            graphics,
            context,
            windows,
            event_loop,
        } = self;

        drop(graphics);
        debug!("Released device");
        drop(context);
        debug!("Released surface");
        drop(windows);
        debug!("Closed window");
        drop(event_loop);
        debug!("Closed event loop");
    }
}
