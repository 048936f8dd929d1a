use crate::tessellate::Vertex;

/// GPU vertex: position in surface pixels plus a linear-space RGBA8 color
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CanvasVertex {
    pub pos: [f32; 2],
    pub color: [u8; 4],
}

/// sRGB component to linear, so blending on an sRGB target matches the
/// authored color
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn to_unorm8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<Vertex> for CanvasVertex {
    fn from(vertex: Vertex) -> Self {
        let [r, g, b, a] = vertex.color;
        Self {
            pos: vertex.pos,
            color: [
                to_unorm8(srgb_to_linear(r)),
                to_unorm8(srgb_to_linear(g)),
                to_unorm8(srgb_to_linear(b)),
                to_unorm8(a),
            ],
        }
    }
}

impl CanvasVertex {
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Unorm8x4,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CanvasVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRIBUTES,
        }
    }
}
