//! Scene lighting: an ambient term plus up to four positional lights.
//!
//! The host describes its lighting once per draw through [`Lighting`]; the
//! context packs it into [`LightingUniform`] and writes the uniform buffer
//! before any geometry is emitted.

use wgpu::util::DeviceExt;

/// Maximum number of lights the face shader evaluates.
pub const MAX_LIGHTS: usize = 4;

/// One positional light.
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Host-facing lighting descriptor: ambient color plus up to
/// [`MAX_LIGHTS`] lights. Extra lights are dropped with a warning.
#[derive(Clone, Debug)]
pub struct Lighting {
    pub ambient: [f32; 3],
    pub lights: Vec<Light>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2],
            lights: vec![Light {
                position: [0.0, 0.0, 10.0],
                color: [1.0, 1.0, 1.0],
            }],
        }
    }
}

impl Lighting {
    pub fn to_uniform(&self) -> LightingUniform {
        if self.lights.len() > MAX_LIGHTS {
            log::warn!(
                "lighting describes {} lights but only {} are supported; extra lights are ignored",
                self.lights.len(),
                MAX_LIGHTS
            );
        }
        let mut uniform = LightingUniform {
            ambient: [self.ambient[0], self.ambient[1], self.ambient[2], 1.0],
            lights: [GpuLight::zeroed(); MAX_LIGHTS],
            count: self.lights.len().min(MAX_LIGHTS) as u32,
            _padding: [0; 3],
        };
        for (slot, light) in uniform.lights.iter_mut().zip(&self.lights) {
            *slot = GpuLight {
                position: light.position,
                _padding: 0,
                color: light.color,
                _padding2: 0,
            };
        }
        uniform
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    position: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding2: u32,
}

impl GpuLight {
    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    ambient: [f32; 4],
    lights: [GpuLight; MAX_LIGHTS],
    count: u32,
    _padding: [u32; 3],
}

/// GPU resources backing the lighting uniform.
pub struct LightResources {
    pub uniform: LightingUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, lighting: &Lighting) -> Self {
        let uniform = lighting.to_uniform();
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Repack the descriptor and write the uniform buffer. Called once per
    /// draw, before geometry emission.
    pub fn update(&mut self, queue: &wgpu::Queue, lighting: &Lighting) {
        self.uniform = lighting.to_uniform();
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_buffer(device: &wgpu::Device, uniform: LightingUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lighting Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: None,
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: None,
    })
}
