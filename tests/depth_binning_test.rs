use cgmath::{Matrix4, SquareMatrix};
use face_ngin::data_structures::binning::{DepthBins, DepthRange, Tri};
use face_ngin::data_structures::model::FaceVertex;

/// A triangle whose centroid sits at depth `z` under an identity transform.
/// `tag` marks the triangle so emission order can be checked.
fn tri_at(z: f32, tag: f32) -> Tri {
    let vertex = |x: f32, y: f32| FaceVertex {
        position: [x, y, z],
        tex_coords: [0.0, 0.0],
        normal: [0.0, 0.0, 1.0],
    };
    [vertex(tag, 0.0), vertex(tag + 1.0, 0.0), vertex(tag, 1.0)]
}

fn tags(bins: DepthBins) -> Vec<f32> {
    bins.into_back_to_front()
        .map(|tri| tri[0].position[0])
        .collect()
}

#[test]
fn should_map_depths_through_the_documented_convention() {
    // Domain (far = 1, near = -1) onto (0, 10): far depths land in low bins.
    let range = DepthRange::default();
    assert_eq!(range.bin_for(0.9, 10), Some(0));
    assert_eq!(range.bin_for(0.0, 10), Some(5));
    assert_eq!(range.bin_for(-0.9, 10), Some(9));
    // The domain ends are asymmetric: far is inside, near is not.
    assert_eq!(range.bin_for(1.0, 10), Some(0));
    assert_eq!(range.bin_for(-1.0, 10), None);
}

#[test]
fn should_drop_out_of_range_and_non_finite_depths() {
    let range = DepthRange::default();
    assert_eq!(range.bin_for(1.5, 10), None);
    assert_eq!(range.bin_for(-3.0, 10), None);
    assert_eq!(range.bin_for(f32::NAN, 10), None);
    assert_eq!(range.bin_for(f32::INFINITY, 10), None);
}

#[test]
fn should_emit_bins_back_to_front() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut bins = DepthBins::new(10);
    let clip = Matrix4::identity();
    // Insert in front-to-back order; emission must come out far-to-near.
    bins.insert(tri_at(-0.9, 3.0), clip);
    bins.insert(tri_at(0.0, 2.0), clip);
    bins.insert(tri_at(0.9, 1.0), clip);
    assert_eq!(bins.len(), 3);
    assert_eq!(bins.dropped(), 0);
    assert_eq!(tags(bins), vec![1.0, 2.0, 3.0]);
}

#[test]
fn should_assign_bins_independent_of_insertion_order() {
    let clip = Matrix4::identity();
    let depths = [0.7, -0.2, 0.3, -0.8, 0.0];

    let mut forward = DepthBins::new(100);
    for (i, &z) in depths.iter().enumerate() {
        forward.insert(tri_at(z, i as f32), clip);
    }
    let mut reversed = DepthBins::new(100);
    for (i, &z) in depths.iter().enumerate().rev() {
        reversed.insert(tri_at(z, i as f32), clip);
    }

    // Same bins either way: the emitted far-to-near sequence is identical
    // because no two of these depths share a bin.
    assert_eq!(tags(forward), tags(reversed));
}

#[test]
fn should_preserve_insertion_order_within_a_bin() {
    let clip = Matrix4::identity();
    let mut bins = DepthBins::new(10);
    // All three land in the same bin; relative order must be kept as-is.
    bins.insert(tri_at(0.95, 1.0), clip);
    bins.insert(tri_at(0.93, 2.0), clip);
    bins.insert(tri_at(0.91, 3.0), clip);
    assert_eq!(tags(bins), vec![1.0, 2.0, 3.0]);
}

#[test]
fn should_silently_drop_triangles_outside_the_bin_range() {
    let clip = Matrix4::identity();
    let mut bins = DepthBins::new(10);
    bins.insert(tri_at(0.5, 1.0), clip);
    bins.insert(tri_at(2.0, 2.0), clip);
    bins.insert(tri_at(-1.0, 3.0), clip);
    assert_eq!(bins.len(), 1);
    assert_eq!(bins.dropped(), 2);
    assert_eq!(tags(bins), vec![1.0]);
}

#[test]
fn should_drop_triangles_with_a_degenerate_projection() {
    // A transform with a zero w row divides by zero; the result is
    // non-finite and the triangle is dropped instead of crashing.
    #[rustfmt::skip]
    let degenerate = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 0.0,
    );
    let mut bins = DepthBins::new(10);
    bins.insert(tri_at(0.5, 1.0), degenerate);
    assert_eq!(bins.len(), 0);
    assert_eq!(bins.dropped(), 1);
}

#[test]
fn should_divide_depth_by_w_before_binning() {
    // Scaling clip space uniformly by w leaves the divided depth unchanged.
    let clip = Matrix4::identity() * 4.0;
    let mut bins = DepthBins::new(10);
    bins.insert(tri_at(0.9, 1.0), clip);
    bins.insert(tri_at(-0.9, 2.0), clip);
    assert_eq!(bins.dropped(), 0);
    assert_eq!(tags(bins), vec![1.0, 2.0]);
}

#[test]
fn should_use_the_centroid_rather_than_any_single_vertex() {
    let clip = Matrix4::identity();
    // Vertices straddle several bins; only the centroid depth counts.
    let tri = [
        FaceVertex {
            position: [1.0, 0.0, 0.9],
            tex_coords: [0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        FaceVertex {
            position: [2.0, 0.0, -0.9],
            tex_coords: [0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        FaceVertex {
            position: [3.0, 0.0, 0.0],
            tex_coords: [0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
    ];
    let mut bins = DepthBins::new(10);
    bins.insert(tri, clip);
    let drained: Vec<_> = bins.into_back_to_front().collect();
    assert_eq!(drained.len(), 1);

    // Centroid depth 0.0 maps to bin 5 of 10; a triangle at depth -0.1
    // shares that bin and is emitted after it (insertion order).
    let mut bins = DepthBins::new(10);
    bins.insert(tri, clip);
    bins.insert(tri_at(-0.1, 9.0), clip);
    let drained: Vec<_> = bins.into_back_to_front().collect();
    assert_eq!(drained[0][0].position[0], 1.0);
    assert_eq!(drained[1][0].position[0], 9.0);
}
