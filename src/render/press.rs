use super::camera::Camera;
use super::context::GpuContext;
use super::mesh::{Mesh, MeshData};
use super::pipeline::{RenderPipelines, Uniforms};
use crate::scene::{PressLayout, Shape};
use glam::{Mat4, Vec3};

const MAX_INSTANCES: usize = 32;

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0196,
    g: 0.0196,
    b: 0.0196,
    a: 1.0,
};

const GRID_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// Draws a [`PressLayout`] over a ground grid.
pub struct PressRenderer {
    pipelines: RenderPipelines,
    line_pipeline: wgpu::RenderPipeline,
    cylinder_mesh: Mesh,
    cube_mesh: Mesh,
    wire_cylinder_mesh: Mesh,
    wire_cube_mesh: Mesh,
    grid_mesh: Mesh,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniform_alignment: u32,
}

struct DrawCall {
    shape: Option<Shape>,
    offset: u32,
}

impl PressRenderer {
    pub fn new(context: &GpuContext) -> Self {
        let device = &context.device;
        let pipelines = RenderPipelines::new(context);
        let line_pipeline = pipelines.create_line_pipeline(context);

        let cylinder_mesh = Mesh::upload(device, "Cylinder", &MeshData::cylinder(32));
        let cube_mesh = Mesh::upload(device, "Cube", &MeshData::cube());
        let wire_cylinder_mesh =
            Mesh::upload(device, "Wire Cylinder", &MeshData::wireframe_cylinder(32, 8));
        let wire_cube_mesh = Mesh::upload(device, "Wire Cube", &MeshData::wireframe_cube());
        let grid_mesh = Mesh::upload(device, "Grid", &MeshData::grid(20.0, 20));

        let uniform_alignment = device.limits().min_uniform_buffer_offset_alignment;
        let aligned_size = align_to(std::mem::size_of::<Uniforms>() as u32, uniform_alignment);
        let buffer_size = (aligned_size as usize * MAX_INSTANCES) as u64;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dynamic Uniform Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = pipelines.create_dynamic_bind_group(device, &uniform_buffer);

        Self {
            pipelines,
            line_pipeline,
            cylinder_mesh,
            cube_mesh,
            wire_cylinder_mesh,
            wire_cube_mesh,
            grid_mesh,
            uniform_buffer,
            bind_group,
            uniform_alignment,
        }
    }

    fn mesh_for(&self, shape: Option<Shape>) -> &Mesh {
        match shape {
            Some(Shape::Cylinder) => &self.cylinder_mesh,
            Some(Shape::Cube) => &self.cube_mesh,
            Some(Shape::WireCylinder) => &self.wire_cylinder_mesh,
            Some(Shape::WireCube) => &self.wire_cube_mesh,
            None => &self.grid_mesh,
        }
    }

    /// Records the scene into `view`, clearing it first. `shake` displaces
    /// the camera for the press impact.
    pub fn render(
        &self,
        context: &GpuContext,
        view: &wgpu::TextureView,
        layout: &PressLayout,
        camera: &Camera,
        shake: Vec3,
    ) {
        let view_proj = camera.shaken_view_projection(shake).to_cols_array_2d();
        let aligned_size = align_to(std::mem::size_of::<Uniforms>() as u32, self.uniform_alignment) as usize;

        let mut uniform_data = vec![0u8; aligned_size * MAX_INSTANCES];
        let mut solid_calls = Vec::new();
        let mut line_calls = Vec::new();

        let grid = std::iter::once((None, Mat4::IDENTITY, GRID_COLOR));
        let items = layout
            .draw_order()
            .map(|item| (Some(item.shape), item.transform.to_matrix(), item.color));

        for (index, (shape, model, color)) in grid.chain(items).enumerate() {
            if index >= MAX_INSTANCES {
                log::warn!("press scene exceeds {MAX_INSTANCES} draws, truncating");
                break;
            }

            let uniforms = Uniforms {
                view_proj,
                model: model.to_cols_array_2d(),
                color,
            };

            let offset = index * aligned_size;
            let bytes = bytemuck::bytes_of(&uniforms);
            uniform_data[offset..offset + bytes.len()].copy_from_slice(bytes);

            let call = DrawCall {
                shape,
                offset: offset as u32,
            };
            if shape.is_some_and(|s| !s.is_wireframe()) {
                solid_calls.push(call);
            } else {
                line_calls.push(call);
            }
        }

        context.queue.write_buffer(&self.uniform_buffer, 0, &uniform_data);

        let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Press Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Press Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipelines.pipeline);
            for call in &solid_calls {
                render_pass.set_bind_group(0, &self.bind_group, &[call.offset]);
                self.mesh_for(call.shape).draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.line_pipeline);
            for call in &line_calls {
                render_pass.set_bind_group(0, &self.bind_group, &[call.offset]);
                self.mesh_for(call.shape).draw(&mut render_pass);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn align_to(size: u32, alignment: u32) -> u32 {
    (size + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(144, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
    }

    #[test]
    fn test_uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 144);
    }
}
