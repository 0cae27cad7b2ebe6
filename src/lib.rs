//! face-ngin
//!
//! The rendering core of a real-time face-mesh stimulus presenter. The crate
//! turns deformable face meshes into alpha-blended GPU draws: textures are
//! padded to power-of-two sizes and uploaded with a full mipmap chain, vertex
//! normals are recomputed every frame from the current geometry, and the
//! translucent triangles of each surface are bucketed by projected depth so
//! they can be emitted in approximate back-to-front order without a full sort.
//!
//! The hosting application owns the window, the swapchain and the frame loop.
//! It hands this crate a `wgpu` device/queue at startup and a render pass per
//! frame; everything else (pipelines, materials, lighting and camera uniforms)
//! lives in [`context::Context`].
//!
//! High-level modules
//! - `camera`: view/projection transforms and the camera uniform
//! - `context`: central GPU context that owns device/queue/pipeline resources
//! - `data_structures`: engine data models (meshes, textures, depth bins)
//! - `pipelines`: the alpha-blended face pipeline and lighting resources
//! - `resources`: texture preparation and per-frame normal recomputation
//! - `render`: the face renderer that bins and emits surface geometry
//! - `scene`: the scene-object interface and the host-owned registry
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
