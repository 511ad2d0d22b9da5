//! GPU objects owned by the backend.
//!
//! [`RenderContext`] is the instance and the window surface, [`GraphicsState`] is everything
//! that hangs off the adapter. They are separate so that they can be released in reverse order
//! of creation.

use std::sync::Arc;

use snafu::{OptionExt, ResultExt};
use tracing::info;
use wgpu::{
    Backends, CompositeAlphaMode, PresentMode, SurfaceConfiguration, TextureFormat, TextureUsages,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::client::core::errors::{
    CreateSurfaceCtx, NoAdapterCtx, NoSurfaceFormatCtx, RequestDeviceCtx, SetupError,
};
use crate::client::core::graphics::adapter_selection_utils::get_best_adapter;
use crate::client::core::graphics::rendering::resources::DepthStencilTarget;

/// Color formats the swapchain uses when the surface offers them.
///
/// Linear formats come first so the clear values are shown as written.
const PREFERRED_COLOR_FORMATS: [TextureFormat; 2] =
    [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];

/// Frames that may be queued ahead of the one on screen (double buffering)
const MAX_FRAME_LATENCY: u32 = 2;

/// The wgpu instance and the surface of the window.
pub struct RenderContext {
    /// The wgpu instance everything else is created from
    pub instance: wgpu::Instance,
    /// The surface of the primary window. Holds on to the window.
    pub surface: wgpu::Surface<'static>,
}

impl RenderContext {
    /// Creates an instance and a surface for `window`
    pub fn new(window: Arc<Window>) -> Result<Self, SetupError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window).context(CreateSurfaceCtx)?;

        Ok(RenderContext { instance, surface })
    }
}

/// The adapter, device and swapchain state.
pub struct GraphicsState {
    /// The adapter the device was requested from
    pub adapter: wgpu::Adapter,
    /// Logical device
    pub device: wgpu::Device,
    /// Queue command buffers are submitted to
    pub queue: wgpu::Queue,
    /// How the surface is currently configured
    pub config: SurfaceConfiguration,
    /// Depth/stencil buffer matching the surface size
    pub depth_stencil: DepthStencilTarget,
}

impl GraphicsState {
    /// Picks an adapter for the surface, requests a device and configures the surface.
    pub async fn new(
        context: &RenderContext,
        size: PhysicalSize<u32>,
        vsync: bool,
    ) -> Result<Self, SetupError> {
        let adapters = context.instance.enumerate_adapters(Backends::all());
        let adapter = get_best_adapter(adapters, &context.surface).context(NoAdapterCtx)?;

        info!("Selected Adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: Some("Device"),
                },
                None,
            )
            .await
            .context(RequestDeviceCtx)?;

        let surface_caps = context.surface.get_capabilities(&adapter);
        let format = surface_format(&surface_caps.formats)?;
        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            // The surface cannot be configured with a zero size
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(vsync),
            desired_maximum_frame_latency: MAX_FRAME_LATENCY,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        context.surface.configure(&device, &config);

        info!(
            "Surface configured: {:?}, {:?}, {}x{}",
            config.format, config.present_mode, config.width, config.height
        );

        let depth_stencil = DepthStencilTarget::new(&device, &config);

        Ok(GraphicsState {
            adapter,
            device,
            queue,
            config,
            depth_stencil,
        })
    }

    /// The size the surface is currently configured with
    pub fn surface_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Reconfigures the surface and depth/stencil target for a new size.
    ///
    /// Zero sized requests are ignored.
    pub fn resize(&mut self, surface: &wgpu::Surface, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.reconfigure(surface);
        }
    }

    /// Applies the current configuration again, e.g. after the surface was lost.
    pub fn reconfigure(&mut self, surface: &wgpu::Surface) {
        surface.configure(&self.device, &self.config);
        self.depth_stencil = DepthStencilTarget::new(&self.device, &self.config);
    }
}

/// Present mode for the vsync setting
fn present_mode(vsync: bool) -> PresentMode {
    if vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    }
}

/// Chooses the swapchain color format out of the ones the surface supports.
///
/// Prefers [`PREFERRED_COLOR_FORMATS`], then any non-sRGB format, then whatever comes first.
pub fn select_color_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    PREFERRED_COLOR_FORMATS
        .iter()
        .copied()
        .find(|format| formats.contains(format))
        .or_else(|| formats.iter().copied().find(|format| !format.is_srgb()))
        .or_else(|| formats.first().copied())
}

/// [`select_color_format`], failing setup when the surface supports nothing at all
fn surface_format(formats: &[TextureFormat]) -> Result<TextureFormat, SetupError> {
    select_color_format(formats).context(NoSurfaceFormatCtx)
}
