//! GPU-backed drawing surface
//!
//! Draw calls are tessellated on the CPU into a single mesh; [`GpuCanvas::present`]
//! uploads it and draws it over the background in one render pass.

use glam::Vec2;
use particle_physics::{Bounds, Rgba};

use crate::surface::DrawingSurface;
use crate::tessellate::Tessellator;
use crate::vertex::CanvasVertex;

const INITIAL_VERTEX_CAPACITY: usize = 4096;
const INITIAL_INDEX_CAPACITY: usize = 8192;

/// Catppuccin Mocha base, converted for an sRGB render target
pub fn background_color() -> wgpu::Color {
    let base = catppuccin::PALETTE.mocha.colors.base.rgb;
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    wgpu::Color {
        r: linear(base.r),
        g: linear(base.g),
        b: linear(base.b),
        a: 1.0,
    }
}

/// The two sizes a canvas tracks.
///
/// `logical` is what the particle field is laid out in and only changes on a
/// (debounced) resize. `target` is the swap-chain size the pixels are
/// projected onto and follows the window right away, so a pending resize
/// never stretches the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub logical: Bounds,
    pub target: Bounds,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        let size = Bounds::new(width, height);
        Self {
            logical: size,
            target: size,
        }
    }

    /// New layout size; the projection follows it
    pub fn resize(&mut self, width: f32, height: f32) {
        *self = Self::new(width, height);
    }

    pub fn set_target(&mut self, width: f32, height: f32) {
        self.target = Bounds::new(width, height);
    }

    /// Whether anything can be drawn at all
    pub fn is_drawable(&self) -> bool {
        self.logical.is_populatable()
            && self.target.is_populatable()
            && self.target.height > 0.0
    }

    /// Shader uniform: projection size padded to 16 bytes
    pub fn globals(&self) -> [f32; 4] {
        [self.target.width, self.target.height, 0.0, 0.0]
    }
}

pub struct GpuCanvas {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_capacity: usize,
    index_capacity: usize,
    tessellator: Tessellator,
    gpu_vertices: Vec<CanvasVertex>,
    size: CanvasSize,
    background: wgpu::Color,
}

impl GpuCanvas {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: f32,
        height: f32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/canvas.wgsl").into()),
        });

        // Surface size, padded to 16 bytes
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Uniform Buffer"),
            size: std::mem::size_of::<[f32; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Canvas Globals Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Globals Bind Group"),
            layout: &globals_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&globals_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[CanvasVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
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
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);
        let index_buffer = Self::create_index_buffer(device, INITIAL_INDEX_CAPACITY);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            index_capacity: INITIAL_INDEX_CAPACITY,
            tessellator: Tessellator::new(),
            gpu_vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            size: CanvasSize::new(width, height),
            background: background_color(),
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Vertex Buffer"),
            size: (capacity * std::mem::size_of::<CanvasVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Index Buffer"),
            size: (capacity * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Follow the swap chain immediately, ahead of any debounced resize
    pub fn set_target_size(&mut self, width: f32, height: f32) {
        self.size.set_target(width, height);
    }

    /// Draw the accumulated shapes into `target`.
    ///
    /// The target is always cleared to the background. Shapes are only drawn
    /// while the canvas has a usable size.
    pub fn present(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, target: &wgpu::TextureView) {
        let mesh = self.tessellator.mesh();
        let drawable = self.size.is_drawable() && !mesh.is_empty();

        if drawable {
            self.gpu_vertices.clear();
            self.gpu_vertices
                .extend(mesh.vertices.iter().copied().map(CanvasVertex::from));

            if self.gpu_vertices.len() > self.vertex_capacity {
                self.vertex_capacity = (self.gpu_vertices.len() * 2).next_power_of_two();
                log::debug!("Growing canvas vertex buffer to {}", self.vertex_capacity);
                self.vertex_buffer = Self::create_vertex_buffer(device, self.vertex_capacity);
            }
            if mesh.indices.len() > self.index_capacity {
                self.index_capacity = (mesh.indices.len() * 2).next_power_of_two();
                log::debug!("Growing canvas index buffer to {}", self.index_capacity);
                self.index_buffer = Self::create_index_buffer(device, self.index_capacity);
            }

            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.gpu_vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));

            let globals = self.size.globals();
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&globals));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Canvas Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if drawable {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

impl DrawingSurface for GpuCanvas {
    fn size(&self) -> Bounds {
        self.size.logical
    }

    fn clear(&mut self) {
        self.tessellator.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.tessellator.circle(center, radius, color);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.tessellator.line(from, to, color, width);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size.resize(width, height);
        self.tessellator.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_follows_window_before_layout() {
        let mut size = CanvasSize::new(1500.0, 800.0);
        size.set_target(900.0, 600.0);

        assert_eq!(size.logical, Bounds::new(1500.0, 800.0));
        assert_eq!(size.globals(), [900.0, 600.0, 0.0, 0.0]);
        assert!(size.is_drawable());
    }

    #[test]
    fn test_layout_resize_resets_target() {
        let mut size = CanvasSize::new(1500.0, 800.0);
        size.set_target(900.0, 600.0);
        size.resize(1024.0, 768.0);

        assert_eq!(size.logical, Bounds::new(1024.0, 768.0));
        assert_eq!(size.target, Bounds::new(1024.0, 768.0));
    }

    #[test]
    fn test_minimised_window_is_not_drawable() {
        let mut size = CanvasSize::new(1500.0, 800.0);
        size.set_target(0.0, 0.0);
        assert!(!size.is_drawable());

        let mut flat = CanvasSize::new(300.0, 0.0);
        assert!(!flat.is_drawable());
        flat.set_target(300.0, 200.0);
        assert!(flat.is_drawable());
    }
}
