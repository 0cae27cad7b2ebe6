//! Face mesh data model.
//!
//! A [`FaceMesh`] is an ordered list of vertex positions and UV coordinates
//! plus the surfaces that index into them. Meshes are owned by the renderable
//! object and may deform between frames; normals are therefore not stored
//! here but recomputed every frame (see [`crate::resources::mesh`]).

/// A deformable mesh: vertex positions, shared UV coordinates and surfaces.
#[derive(Clone, Debug, Default)]
pub struct FaceMesh {
    pub vertices: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub surfaces: Vec<Surface>,
}

impl FaceMesh {
    /// Check that every vertex and UV index of every surface is in bounds.
    ///
    /// The renderer indexes vertex and UV arrays without further checks, so
    /// this runs once at object setup and rejects malformed meshes there.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (idx, surface) in self.surfaces.iter().enumerate() {
            surface
                .validate(self.vertices.len(), self.uvs.len())
                .map_err(|e| anyhow::anyhow!("surface {idx} ({}): {e}", surface.name))?;
        }
        Ok(())
    }
}

/// A subset of a mesh's primitives sharing material and texture state.
///
/// Triangles and quads index into the mesh's vertex list; the optional UV
/// index sets run parallel to them. A surface only renders textured when it
/// has a texture slot *and* UV indices for all of its primitives.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    pub name: String,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
    pub triangle_uvs: Option<Vec<[u32; 3]>>,
    pub quad_uvs: Option<Vec<[u32; 4]>>,
    /// Index into the owning object's texture list.
    pub texture: Option<usize>,
}

impl Surface {
    /// Whether the surface carries UV indices for every primitive it has.
    pub fn has_uvs(&self) -> bool {
        let tris_covered = self.triangles.is_empty()
            || self
                .triangle_uvs
                .as_ref()
                .is_some_and(|uvs| uvs.len() == self.triangles.len());
        let quads_covered = self.quads.is_empty()
            || self
                .quad_uvs
                .as_ref()
                .is_some_and(|uvs| uvs.len() == self.quads.len());
        let any = self.triangle_uvs.is_some() || self.quad_uvs.is_some();
        tris_covered && quads_covered && any
    }

    /// Decompose a quad into two triangles with the fixed diagonal split:
    /// corners (0, 1, 2) and (2, 3, 0).
    pub fn split_quad(quad: [u32; 4]) -> [[u32; 3]; 2] {
        [
            [quad[0], quad[1], quad[2]],
            [quad[2], quad[3], quad[0]],
        ]
    }

    /// All primitives of this surface as triangles, quads decomposed.
    ///
    /// UV index triples are carried along when the surface has them; the quad
    /// UV quadruples split along the same diagonal as the positions.
    pub fn triangulated(&self) -> Vec<TriIndices> {
        let mut tris = Vec::with_capacity(self.triangles.len() + self.quads.len() * 2);
        let with_uvs = self.has_uvs();
        for (i, &tri) in self.triangles.iter().enumerate() {
            tris.push(TriIndices {
                vertices: tri,
                uvs: with_uvs
                    .then(|| self.triangle_uvs.as_ref().map(|uvs| uvs[i]))
                    .flatten(),
            });
        }
        for (i, &quad) in self.quads.iter().enumerate() {
            let split = Self::split_quad(quad);
            let uv_split = with_uvs
                .then(|| self.quad_uvs.as_ref().map(|uvs| Self::split_quad(uvs[i])))
                .flatten();
            for (j, vertices) in split.into_iter().enumerate() {
                tris.push(TriIndices {
                    vertices,
                    uvs: uv_split.map(|s| s[j]),
                });
            }
        }
        tris
    }

    fn validate(&self, vertex_count: usize, uv_count: usize) -> anyhow::Result<()> {
        let check = |indices: &[u32], bound: usize, what: &str| -> anyhow::Result<()> {
            for &i in indices {
                if i as usize >= bound {
                    anyhow::bail!("{what} index {i} out of bounds (len {bound})");
                }
            }
            Ok(())
        };
        for tri in &self.triangles {
            check(tri, vertex_count, "vertex")?;
        }
        for quad in &self.quads {
            check(quad, vertex_count, "vertex")?;
        }
        if let Some(uvs) = &self.triangle_uvs {
            if uvs.len() != self.triangles.len() {
                anyhow::bail!(
                    "triangle UV set length {} does not match triangle count {}",
                    uvs.len(),
                    self.triangles.len()
                );
            }
            for tri in uvs {
                check(tri, uv_count, "UV")?;
            }
        }
        if let Some(uvs) = &self.quad_uvs {
            if uvs.len() != self.quads.len() {
                anyhow::bail!(
                    "quad UV set length {} does not match quad count {}",
                    uvs.len(),
                    self.quads.len()
                );
            }
            for quad in uvs {
                check(quad, uv_count, "UV")?;
            }
        }
        Ok(())
    }
}

/// One triangle's vertex indices and, when the surface is textured, the
/// matching UV indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriIndices {
    pub vertices: [u32; 3],
    pub uvs: Option<[u32; 3]>,
}
