//! Contains wgpu code for rendering

pub mod resources;

use wgpu::{CommandEncoder, LoadOp, Operations, StoreOp, TextureView};

/// Records a render pass that clears the frame and draws nothing.
///
/// Color is cleared to `color`, depth to 1.0 and stencil to 0.
pub fn record_clear_pass(
    command_encoder: &mut CommandEncoder,
    color_view: &TextureView,
    depth_stencil_view: &TextureView,
    color: wgpu::Color,
) {
    let _render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Clear Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: Operations {
                load: LoadOp::Clear(color),
                store: StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_stencil_view,
            depth_ops: Some(Operations {
                load: LoadOp::Clear(1.0),
                store: StoreOp::Discard,
            }),
            stencil_ops: Some(Operations {
                load: LoadOp::Clear(0),
                store: StoreOp::Discard,
            }),
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });
}
