//! WebGPU rendering
//!
//! GPU context, orbit camera, unit meshes and the press renderer.

pub mod camera;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod press;

pub use camera::{Camera, OrbitController};
pub use context::GpuContext;
pub use mesh::{Mesh, MeshData};
pub use pipeline::RenderPipelines;
pub use press::PressRenderer;
