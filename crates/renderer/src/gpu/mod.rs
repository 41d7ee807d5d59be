mod context;
mod pipeline;
mod uniforms;

use anyhow::{Context as _, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::trace;
use winit::dpi::PhysicalSize;

use crate::compile::{compile_isf_fragment_shader, compile_vertex_shader};
use crate::runtime::TimeSample;

use self::context::GpuContext;
use self::pipeline::IsfPipeline;

/// Owns the GPU side of the preview: context, linked program, quad, uniforms.
pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: IsfPipeline,
    render_size: (u32, u32),
}

impl GpuState {
    /// Runs the one-time initialisation sequence: surface and device, the
    /// vertex stage, the fragment stage (header + body), then the link and
    /// quad upload. Steps are strictly sequential.
    pub(crate) fn new<T>(
        target: &T,
        buffer_size: PhysicalSize<u32>,
        fragment_body: &str,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, buffer_size)?;
        let vertex_shader = compile_vertex_shader(&context.device);
        let fragment_shader = compile_isf_fragment_shader(&context.device, fragment_body);
        let pipeline = IsfPipeline::link(
            &context.device,
            &vertex_shader,
            &fragment_shader,
            context.surface_format,
            (buffer_size.width, buffer_size.height),
        )
        .context("failed to link shader program")?;

        Ok(Self {
            context,
            pipeline,
            render_size: (buffer_size.width, buffer_size.height),
        })
    }

    /// Draws one frame: clear to opaque black, push the per-frame uniforms,
    /// draw the quad, flush and present.
    pub(crate) fn render(&mut self, sample: TimeSample) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        self.pipeline
            .set_current_time(&self.context.queue, sample.seconds);
        self.pipeline.set_render_size(
            &self.context.queue,
            self.render_size.0 as f32,
            self.render_size.1 as f32,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.pipeline.draw(&mut render_pass);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        trace!(
            time = sample.seconds,
            frame = sample.frame_index,
            "presented frame"
        );
        Ok(())
    }

    /// Reapplies the surface configuration after a lost or outdated surface.
    pub(crate) fn reconfigure(&mut self) {
        self.context.reconfigure();
    }
}
