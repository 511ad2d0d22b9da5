//! Resources for rendering

use wgpu::{Device, Extent3d, SurfaceConfiguration, TextureDescriptor, TextureDimension, TextureUsages};

use crate::client::core::graphics::{DEPTH_STENCIL_FORMAT, SAMPLE_COUNT};

/// The depth/stencil buffer that goes with the swapchain.
///
/// Nothing reads it yet, it is cleared every frame so the frame layout matches a real
/// color + depth/stencil setup. Has to be recreated whenever the surface is resized.
pub struct DepthStencilTarget {
    /// The texture itself, kept so it lives as long as the view
    _texture: wgpu::Texture,
    /// View attached to the render pass
    pub view: wgpu::TextureView,
}

impl DepthStencilTarget {
    /// Creates a target matching the size of the surface configuration
    pub fn new(device: &Device, config: &SurfaceConfiguration) -> Self {
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Depth Stencil Target"),
            size: Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: TextureDimension::D2,
            format: DEPTH_STENCIL_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        DepthStencilTarget {
            _texture: texture,
            view,
        }
    }
}
