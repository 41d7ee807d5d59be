use anyhow::{bail, Result};
use wgpu::util::DeviceExt;

use crate::compile::Shader;

use super::uniforms::{IsfUniforms, RENDER_SIZE_OFFSET, TIME_OFFSET};

/// Full-screen quad as a four-vertex fan: top-left, top-right,
/// bottom-right, bottom-left in clip space.
pub(crate) const QUAD_VERTICES: [f32; 8] = [-1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0];

/// Fan triangulation of [`QUAD_VERTICES`]; wgpu has no fan topology, so the
/// same four vertices are drawn as an indexed triangle list.
pub(crate) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// The linked program plus everything resolved at link time: the quad
/// buffers bound to the `position` attribute and the `TIME`/`RENDERSIZE`
/// uniform slots.
pub(crate) struct IsfPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl IsfPipeline {
    /// Links the two compiled stages and uploads the static quad.
    ///
    /// Both stages must hold a compiled module; linking against a failed
    /// stage is refused here rather than handed to the driver.
    pub fn link(
        device: &wgpu::Device,
        vertex: &Shader,
        fragment: &Shader,
        surface_format: wgpu::TextureFormat,
        render_size: (u32, u32),
    ) -> Result<Self> {
        let Some(vertex_module) = vertex.module() else {
            bail!("vertex stage has no compiled module");
        };
        let Some(fragment_module) = fragment.module() else {
            bail!("fragment stage has no compiled module");
        };

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniforms = IsfUniforms::new(render_size.0, render_size.1);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("isf uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("isf uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("isf pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("isf pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: vertex_module,
                entry_point: Some("main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (2 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    /// Pushes the elapsed time in seconds into the TIME slot.
    pub fn set_current_time(&self, queue: &wgpu::Queue, seconds: f32) {
        queue.write_buffer(&self.uniform_buffer, TIME_OFFSET, bytemuck::bytes_of(&seconds));
    }

    /// Pushes the drawing-buffer dimensions into the RENDERSIZE slot.
    pub fn set_render_size(&self, queue: &wgpu::Queue, width: f32, height: f32) {
        queue.write_buffer(
            &self.uniform_buffer,
            RENDER_SIZE_OFFSET,
            bytemuck::bytes_of(&[width, height]),
        );
    }

    /// Binds the program and draws the quad.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_exactly_the_four_fan_vertices() {
        assert_eq!(QUAD_VERTICES, [-1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn fan_triangulation_pivots_on_the_first_vertex() {
        assert_eq!(QUAD_INDICES[0], 0);
        assert_eq!(QUAD_INDICES[3], 0);
        assert!(QUAD_INDICES.iter().all(|&index| index < 4));
        for vertex in 0..4u16 {
            assert!(QUAD_INDICES.contains(&vertex));
        }
    }
}
