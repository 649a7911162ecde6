#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

/// Index pattern for one quad whose corners were pushed in `quad_vertices` order.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Corners of an axis-aligned screen rectangle (top-left origin, y down):
/// top-left, top-right, bottom-right, bottom-left.
pub fn quad_vertices(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    uv: [f32; 4],
    color: [f32; 4],
) -> [SpriteVertex; 4] {
    let [u0, v0, u1, v1] = uv;
    [
        SpriteVertex {
            position: [x, y],
            tex_coords: [u0, v0],
            color,
        },
        SpriteVertex {
            position: [x + width, y],
            tex_coords: [u1, v0],
            color,
        },
        SpriteVertex {
            position: [x + width, y + height],
            tex_coords: [u1, v1],
            color,
        },
        SpriteVertex {
            position: [x, y + height],
            tex_coords: [u0, v1],
            color,
        },
    ]
}

impl SpriteVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // tex_coords
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, tex_coords) as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(SpriteVertex, color) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
