use face_ngin::data_structures::mesh::{FaceMesh, Surface, TriIndices};

#[test]
fn should_split_quads_along_the_fixed_diagonal() {
    // Corners labelled [A, B, C, D] as indices [10, 11, 12, 13].
    let quad = [10, 11, 12, 13];
    let [first, second] = Surface::split_quad(quad);
    // Always corners (0, 1, 2) and (2, 3, 0) of the quad's own index list.
    assert_eq!(first, [10, 11, 12]);
    assert_eq!(second, [12, 13, 10]);
}

#[test]
fn should_triangulate_triangles_unchanged_and_quads_in_two() {
    let surface = Surface {
        name: "mixed".into(),
        triangles: vec![[0, 1, 2]],
        quads: vec![[3, 4, 5, 6]],
        ..Default::default()
    };
    let tris = surface.triangulated();
    assert_eq!(
        tris,
        vec![
            TriIndices {
                vertices: [0, 1, 2],
                uvs: None
            },
            TriIndices {
                vertices: [3, 4, 5],
                uvs: None
            },
            TriIndices {
                vertices: [5, 6, 3],
                uvs: None
            },
        ]
    );
}

#[test]
fn should_split_quad_uv_indices_along_the_same_diagonal() {
    let surface = Surface {
        name: "uv".into(),
        quads: vec![[0, 1, 2, 3]],
        quad_uvs: Some(vec![[7, 8, 9, 6]]),
        ..Default::default()
    };
    let tris = surface.triangulated();
    assert_eq!(tris.len(), 2);
    assert_eq!(tris[0].uvs, Some([7, 8, 9]));
    assert_eq!(tris[1].uvs, Some([9, 6, 7]));
}

#[test]
fn should_only_count_uvs_that_cover_every_primitive() {
    let mut surface = Surface {
        name: "s".into(),
        triangles: vec![[0, 1, 2]],
        quads: vec![[0, 1, 2, 3]],
        triangle_uvs: Some(vec![[0, 1, 2]]),
        quad_uvs: Some(vec![[0, 1, 2, 3]]),
        ..Default::default()
    };
    assert!(surface.has_uvs());

    // Dropping the quad UVs uncovers the quads: the surface renders flat
    // and triangulation carries no UV indices at all.
    surface.quad_uvs = None;
    assert!(!surface.has_uvs());
    assert!(surface.triangulated().iter().all(|tri| tri.uvs.is_none()));

    // No UV sets at all.
    surface.triangle_uvs = None;
    assert!(!surface.has_uvs());

    // A surface with no primitives has nothing to cover.
    let empty = Surface::default();
    assert!(!empty.has_uvs());
}

#[test]
fn should_validate_index_bounds() {
    let mesh = FaceMesh {
        vertices: vec![[0.0; 3]; 3],
        uvs: vec![[0.0; 2]; 2],
        surfaces: vec![Surface {
            name: "ok".into(),
            triangles: vec![[0, 1, 2]],
            triangle_uvs: Some(vec![[0, 1, 1]]),
            ..Default::default()
        }],
    };
    assert!(mesh.validate().is_ok());

    let mut bad_vertex = mesh.clone();
    bad_vertex.surfaces[0].triangles = vec![[0, 1, 3]];
    assert!(bad_vertex.validate().is_err());

    let mut bad_uv = mesh.clone();
    bad_uv.surfaces[0].triangle_uvs = Some(vec![[0, 1, 2]]);
    assert!(bad_uv.validate().is_err());

    let mut mismatched = mesh;
    mismatched.surfaces[0].triangle_uvs = Some(vec![]);
    assert!(mismatched.validate().is_err());
}
