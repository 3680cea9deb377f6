use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Vertex and index data before upload, so geometry can be checked on the CPU.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Unit cylinder: radius 1, height 1, centred on the origin, Y up.
    pub fn cylinder(segments: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let half = 0.5;

        for i in 0..=segments {
            let theta = 2.0 * PI * i as f32 / segments as f32;
            let (x, z) = (theta.cos(), theta.sin());
            vertices.push(Vertex::new([x, -half, z], [x, 0.0, z]));
            vertices.push(Vertex::new([x, half, z], [x, 0.0, z]));
        }

        for i in 0..segments {
            let base = i * 2;
            indices.extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
        }

        for (y, normal_y) in [(-half, -1.0), (half, 1.0)] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, normal_y, 0.0]));
            for i in 0..=segments {
                let theta = 2.0 * PI * i as f32 / segments as f32;
                vertices.push(Vertex::new(
                    [theta.cos(), y, theta.sin()],
                    [0.0, normal_y, 0.0],
                ));
            }
            for i in 0..segments {
                if normal_y < 0.0 {
                    indices.extend_from_slice(&[center, center + 2 + i, center + 1 + i]);
                } else {
                    indices.extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Unit cube with side 1, centred on the origin, flat-shaded.
    pub fn cube() -> Self {
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
            ([0.0, -1.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let position = [
                    normal[0] * 0.5 + u[0] * su + v[0] * sv,
                    normal[1] * 0.5 + u[1] * su + v[1] * sv,
                    normal[2] * 0.5 + u[2] * su + v[2] * sv,
                ];
                vertices.push(Vertex::new(position, normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Line list outlining a unit cylinder: two rims and vertical struts.
    pub fn wireframe_cylinder(segments: u32, struts: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for y in [-0.5, 0.5] {
            let base = vertices.len() as u32;
            for i in 0..segments {
                let theta = 2.0 * PI * i as f32 / segments as f32;
                vertices.push(Vertex::new([theta.cos(), y, theta.sin()], [0.0; 3]));
                indices.push(base + i);
                indices.push(base + (i + 1) % segments);
            }
        }

        for i in 0..struts {
            let theta = 2.0 * PI * i as f32 / struts as f32;
            let base = vertices.len() as u32;
            vertices.push(Vertex::new([theta.cos(), -0.5, theta.sin()], [0.0; 3]));
            vertices.push(Vertex::new([theta.cos(), 0.5, theta.sin()], [0.0; 3]));
            indices.extend_from_slice(&[base, base + 1]);
        }

        Self { vertices, indices }
    }

    /// Line list outlining a unit cube.
    pub fn wireframe_cube() -> Self {
        let h = 0.5;
        let vertices = [
            [-h, -h, -h],
            [h, -h, -h],
            [h, h, -h],
            [-h, h, -h],
            [-h, -h, h],
            [h, -h, h],
            [h, h, h],
            [-h, h, h],
        ]
        .into_iter()
        .map(|p| Vertex::new(p, [0.0; 3]))
        .collect();

        let indices = vec![
            0, 1, 1, 2, 2, 3, 3, 0,
            4, 5, 5, 6, 6, 7, 7, 4,
            0, 4, 1, 5, 2, 6, 3, 7,
        ];

        Self { vertices, indices }
    }

    /// Square line grid on the XZ plane, `size` wide with `divisions` cells.
    pub fn grid(size: f32, divisions: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let half = size / 2.0;
        let step = size / divisions as f32;

        for i in 0..=divisions {
            let t = -half + step * i as f32;
            let base = vertices.len() as u32;
            vertices.push(Vertex::new([t, 0.0, -half], [0.0, 1.0, 0.0]));
            vertices.push(Vertex::new([t, 0.0, half], [0.0, 1.0, 0.0]));
            vertices.push(Vertex::new([-half, 0.0, t], [0.0, 1.0, 0.0]));
            vertices.push(Vertex::new([half, 0.0, t], [0.0, 1.0, 0.0]));
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
