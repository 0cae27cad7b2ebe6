//! The face renderer: per-surface material state, depth binning, and
//! back-to-front geometry emission.
//!
//! Each draw recomputes the mesh normals, then walks the surfaces: quads are
//! decomposed into triangles, every triangle is bucketed by projected
//! centroid depth, and the bins are emitted far-to-near through a transient
//! vertex buffer with the alpha-blended face pipeline. Nothing is retained
//! across frames except the GPU textures and per-surface materials created
//! at setup.

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        binning::{BIN_COUNT, DepthBins, Tri},
        mesh::{FaceMesh, TriIndices},
        model::{FaceVertex, Material, MaterialMode},
        texture::Texture,
    },
    resources::{mesh::compute_vertex_normals, texture::prepare},
    scene::SceneObject,
};

/// A renderable face mesh with its GPU textures and per-surface materials.
///
/// Created once per scene object; the mesh vertex positions may deform
/// between frames via [`set_vertex_positions`](Self::set_vertex_positions).
/// The renderer exclusively owns its textures and releases them exactly once
/// when dropped.
pub struct FaceRenderer {
    label: String,
    mesh: FaceMesh,
    textures: Vec<Texture>,
    materials: Vec<Material>,
}

impl FaceRenderer {
    /// Prepare and upload all textures, resolve each surface's material
    /// mode, and validate the mesh.
    ///
    /// Any texture preparation or upload failure aborts construction; the
    /// host is expected to drop the object creation rather than render with
    /// an invalid handle. A surface pointing at a texture slot outside
    /// `images` falls back to the flat material with a warning.
    pub fn new(
        ctx: &Context,
        label: &str,
        mesh: FaceMesh,
        images: &[image::DynamicImage],
    ) -> anyhow::Result<Self> {
        mesh.validate()?;

        let mut textures = Vec::with_capacity(images.len());
        for (i, img) in images.iter().enumerate() {
            let prepared = prepare(img, ctx.max_texture_dimension)?;
            let texture = Texture::from_mip_levels(
                &ctx.device,
                &ctx.queue,
                prepared.upload_levels(),
                &format!("{label} texture {i}"),
            )?;
            textures.push(texture);
        }

        let materials = mesh
            .surfaces
            .iter()
            .map(|surface| {
                let resolved = match surface.texture {
                    Some(slot) => match textures.get(slot) {
                        Some(texture) if surface.has_uvs() => Some(texture),
                        Some(_) => None,
                        None => {
                            log::warn!(
                                "surface {} of {label} references texture slot {slot} but only {} textures were provided; rendering flat",
                                surface.name,
                                textures.len()
                            );
                            None
                        }
                    },
                    None => None,
                };
                let (mode, texture) = match resolved {
                    Some(texture) => (MaterialMode::Textured, texture),
                    None => (MaterialMode::Flat, &ctx.fallback_texture),
                };
                Material::new(
                    &ctx.device,
                    &format!("{label}/{}", surface.name),
                    mode,
                    texture,
                    &ctx.material_bind_group_layout,
                )
            })
            .collect();

        Ok(Self {
            label: label.to_string(),
            mesh,
            textures,
            materials,
        })
    }

    pub fn mesh(&self) -> &FaceMesh {
        &self.mesh
    }

    /// Material mode the given surface resolved to at setup.
    pub fn material_mode(&self, surface: usize) -> Option<MaterialMode> {
        self.materials.get(surface).map(|m| m.mode)
    }

    /// Replace the vertex positions of the deformable mesh.
    ///
    /// The count must not change; surface index sets and materials were
    /// validated and baked against it at setup.
    pub fn set_vertex_positions(&mut self, positions: Vec<[f32; 3]>) -> anyhow::Result<()> {
        if positions.len() != self.mesh.vertices.len() {
            anyhow::bail!(
                "{}: vertex count changed from {} to {}",
                self.label,
                self.mesh.vertices.len(),
                positions.len()
            );
        }
        self.mesh.vertices = positions;
        Ok(())
    }

    /// Assemble the emitted triangle for one set of indices.
    fn emit_tri(&self, normals: &[[f32; 3]], indices: TriIndices) -> Tri {
        let mut tri = [FaceVertex {
            position: [0.0; 3],
            tex_coords: [0.0; 2],
            normal: [0.0; 3],
        }; 3];
        for corner in 0..3 {
            let vi = indices.vertices[corner] as usize;
            tri[corner] = FaceVertex {
                position: self.mesh.vertices[vi],
                tex_coords: match indices.uvs {
                    Some(uvs) => self.mesh.uvs[uvs[corner] as usize],
                    None => [0.0, 0.0],
                },
                normal: normals[vi],
            };
        }
        tri
    }
}

impl SceneObject for FaceRenderer {
    fn on_draw(&mut self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) -> anyhow::Result<()> {
        // Normals first: the mesh may have deformed since the last frame.
        let normals = compute_vertex_normals(&self.mesh);
        let clip_from_model = ctx.camera.transforms.clip_from_model();

        render_pass.set_pipeline(&ctx.face_pipeline);
        render_pass.set_bind_group(1, &ctx.camera.bind_group, &[]);
        render_pass.set_bind_group(2, &ctx.light.bind_group, &[]);

        for (surface, material) in self.mesh.surfaces.iter().zip(&self.materials) {
            let tris = surface.triangulated();
            if tris.is_empty() {
                log::warn!(
                    "you attempted to render surface {} of {} with zero primitives",
                    surface.name,
                    self.label
                );
                continue;
            }

            let mut bins = DepthBins::new(BIN_COUNT);
            for indices in tris {
                bins.insert(self.emit_tri(&normals, indices), clip_from_model);
            }
            if bins.dropped() > 0 {
                log::debug!(
                    "surface {} of {}: {} triangles fell outside the depth bin range and were dropped",
                    surface.name,
                    self.label,
                    bins.dropped()
                );
            }
            if bins.is_empty() {
                continue;
            }

            let mut vertices: Vec<FaceVertex> = Vec::with_capacity(bins.len() * 3);
            for tri in bins.into_back_to_front() {
                vertices.extend_from_slice(&tri);
            }

            let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{}/{} Vertex Buffer", self.label, surface.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            render_pass.set_bind_group(0, &material.bind_group, &[]);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            render_pass.draw(0..vertices.len() as u32, 0..1);
        }
        Ok(())
    }

    fn on_update(&mut self, _ctx: &Context, _dt: instant::Duration) {
        // Reserved for host-driven animation; deformation happens through
        // set_vertex_positions.
    }

    fn on_reset(&mut self, _ctx: &Context) {}
}

impl Drop for FaceRenderer {
    fn drop(&mut self) {
        for texture in &self.textures {
            texture.destroy();
        }
    }
}
