use wgpu::util::DeviceExt;

use crate::{
    camera::{CameraUniform, ViewTransforms},
    data_structures::texture,
    pipelines::{
        face,
        light::{LightResources, Lighting},
    },
};

/// The camera uniform and its GPU resources, fed from the host's transforms.
#[derive(Debug)]
pub struct CameraResources {
    pub transforms: ViewTransforms,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Central GPU context for the face renderer.
///
/// The host owns window, surface and frame loop; it constructs one `Context`
/// from its device/queue and the color format of the render target it will
/// hand us passes for. The context owns everything the renderer shares
/// across objects: the face pipeline, bind group layouts, camera and
/// lighting uniforms, the fallback texture, and the cached device limit that
/// texture preparation clamps against.
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub camera: CameraResources,
    pub light: LightResources,
    pub face_pipeline: wgpu::RenderPipeline,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
    pub(crate) fallback_texture: texture::Texture,
    /// Largest texture dimension the device supports; texture preparation
    /// skips mip levels above this.
    pub max_texture_dimension: u32,
}

impl Context {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, color_format: wgpu::TextureFormat) -> Self {
        let transforms = ViewTransforms::default();
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&transforms);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
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
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            transforms,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let light = LightResources::new(&device, &Lighting::default());

        let material_bind_group_layout = face::material_layout(&device);
        let face_pipeline = face::mk_face_pipeline(
            &device,
            color_format,
            &material_bind_group_layout,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let fallback_texture = texture::Texture::create_fallback(&device, &queue);
        let max_texture_dimension = device.limits().max_texture_dimension_2d;

        Self {
            device,
            queue,
            camera,
            light,
            face_pipeline,
            material_bind_group_layout,
            fallback_texture,
            max_texture_dimension,
        }
    }

    /// Adopt the host's current modelview and projection transforms and push
    /// them to the GPU. Depth binning reads the same transforms during the
    /// next draw, so both stay consistent within a frame.
    pub fn set_transforms(
        &mut self,
        modelview: cgmath::Matrix4<f32>,
        projection: cgmath::Matrix4<f32>,
    ) {
        self.camera.transforms = ViewTransforms::new(modelview, projection);
        self.camera.uniform.update_view_proj(&self.camera.transforms);
        self.queue.write_buffer(
            &self.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform]),
        );
    }

    /// Apply the scene lighting. Written once per draw, before geometry.
    pub fn set_lighting(&mut self, lighting: &Lighting) {
        self.light.update(&self.queue, lighting);
    }
}
