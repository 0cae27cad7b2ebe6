//! GPU-facing vertex and material types for face surfaces.

use crate::data_structures::texture::Texture;

/// Ambient/diffuse color of the textured material mode: white, so the
/// per-object color comes entirely from the texture.
pub const MATERIAL_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Ambient/diffuse color of the untextured fallback mode.
pub const MATERIAL_GREY: [f32; 4] = [0.75, 0.75, 0.75, 1.0];
/// Specular color of both modes.
pub const MATERIAL_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Types that describe their own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One emitted vertex of a face surface: position, UV and the per-frame
/// recomputed normal. Built transiently per draw call, never persisted.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FaceVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for FaceVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<FaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// How a surface resolves its color: from its texture or from a flat grey.
///
/// This is a binary switch, not a blend. A surface goes textured only when
/// it has both a valid texture slot and UV indices for all its primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialMode {
    Textured,
    Flat,
}

/// The material uniform as laid out on the GPU.
///
/// `flags.x` toggles texture sampling in the shader; the remaining flag
/// components are padding to keep 16 byte alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub flags: [f32; 4],
}

impl MaterialUniform {
    pub fn for_mode(mode: MaterialMode) -> Self {
        match mode {
            MaterialMode::Textured => Self {
                ambient: MATERIAL_WHITE,
                diffuse: MATERIAL_WHITE,
                specular: MATERIAL_BLACK,
                flags: [1.0, 0.0, 0.0, 0.0],
            },
            MaterialMode::Flat => Self {
                ambient: MATERIAL_GREY,
                diffuse: MATERIAL_GREY,
                specular: MATERIAL_BLACK,
                flags: [0.0, 0.0, 0.0, 0.0],
            },
        }
    }
}

/// Per-surface material state: the mode uniform plus the bound texture.
///
/// Untextured surfaces bind the context's 1x1 white fallback so the bind
/// group layout stays uniform across modes; the shader ignores the sample
/// when `flags.x` is zero.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub mode: MaterialMode,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        mode: MaterialMode,
        texture: &Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        use wgpu::util::DeviceExt;
        let uniform = MaterialUniform::for_mode(mode);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Material Buffer", name)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let sampler = texture
            .sampler
            .as_ref()
            .expect("material textures are always created with a sampler");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some(&format!("{:?} Material Bind Group", name)),
        });
        Self {
            name: name.to_string(),
            mode,
            buffer,
            bind_group,
        }
    }
}
