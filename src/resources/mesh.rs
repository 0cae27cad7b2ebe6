//! Per-frame vertex normal recomputation.
//!
//! Face meshes deform between frames, so lighting normals are derived from
//! the current geometry on every draw with no dirty tracking or caching.
//! Each surface's triangles and quads contribute a face normal (computed
//! from counter-clockwise winding) to every vertex they reference; the
//! contributions are then averaged per vertex for a smoothed result.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::mesh::FaceMesh;

/// Recompute one normal per mesh vertex from the current geometry.
///
/// The returned set always has exactly `mesh.vertices.len()` entries.
/// Vertices referenced by no face (or only by degenerate faces) keep a zero
/// normal instead of dividing by a zero contribution count.
pub fn compute_vertex_normals(mesh: &FaceMesh) -> Vec<[f32; 3]> {
    let mut normals = vec![Vector3::new(0.0f32, 0.0, 0.0); mesh.vertices.len()];
    let mut faces_included = vec![0u32; mesh.vertices.len()];

    for surface in &mesh.surfaces {
        for tri in &surface.triangles {
            accumulate_face(&mesh.vertices, tri, &mut normals, &mut faces_included);
        }
        for quad in &surface.quads {
            accumulate_face(&mesh.vertices, quad, &mut normals, &mut faces_included);
        }
    }

    normals
        .into_iter()
        .zip(faces_included)
        .map(|(accumulated, n)| {
            if n == 0 {
                return [0.0, 0.0, 0.0];
            }
            let averaged = accumulated / n as f32;
            if averaged.magnitude2() > 0.0 {
                averaged.normalize().into()
            } else {
                [0.0, 0.0, 0.0]
            }
        })
        .collect()
}

/// Add a face's unit normal to every vertex the face references.
///
/// The face normal comes from the first three corners assuming
/// counter-clockwise winding; for a planar quad this is the quad's normal.
/// Degenerate faces (collinear corners) contribute nothing.
fn accumulate_face(
    vertices: &[[f32; 3]],
    corners: &[u32],
    normals: &mut [Vector3<f32>],
    faces_included: &mut [u32],
) {
    let v0: Vector3<f32> = vertices[corners[0] as usize].into();
    let v1: Vector3<f32> = vertices[corners[1] as usize].into();
    let v2: Vector3<f32> = vertices[corners[2] as usize].into();

    let face_normal = (v1 - v0).cross(v2 - v0);
    if face_normal.magnitude2() == 0.0 {
        return;
    }
    let face_normal = face_normal.normalize();

    for &corner in corners {
        normals[corner as usize] += face_normal;
        faces_included[corner as usize] += 1;
    }
}
