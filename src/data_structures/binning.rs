//! Approximate depth sorting for translucent geometry.
//!
//! Correct alpha compositing wants triangles drawn back to front, but a full
//! per-frame sort of every triangle is more than the effect is worth. Instead
//! each triangle's centroid is projected through the current transforms and
//! the perspective-divided depth picks one of a fixed number of bins; bins
//! are then emitted in ascending index order. Within one bin, insertion
//! order is kept as-is, which is where the approximation lives.

use cgmath::Vector4;

use crate::data_structures::model::FaceVertex;

/// One transient triangle: three emitted vertices.
pub type Tri = [FaceVertex; 3];

/// Bin count used by the face renderer. Raising this does not materially
/// sharpen the ordering (the sort stays approximate) and grows the per-frame
/// allocation, so treat it as a tunable rather than a quality dial.
pub const BIN_COUNT: usize = 10_000;

/// Affine mapping from perspective-divided depth onto bin indices.
///
/// The default maps the depth domain `(far = 1, near = -1)` onto
/// `(0, count)`: the farthest representable depth lands in bin 0 and depth
/// approaching the near end runs off the top of the range. Bin 0 is thus the
/// farthest bin and draining bins in ascending order yields back-to-front
/// emission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthRange {
    pub far: f32,
    pub near: f32,
}

impl DepthRange {
    /// Map a depth to its bin, or `None` when it falls outside `[0, count)`.
    ///
    /// Out-of-range depths (behind the far plane, at or beyond the near end
    /// of the domain, or non-finite after a degenerate projection) yield
    /// `None`; callers drop those primitives silently. This loss at extreme
    /// depths is an accepted limit of the approximation, not an error.
    pub fn bin_for(&self, depth: f32, count: usize) -> Option<usize> {
        let bin = (self.far - depth) / (self.far - self.near) * count as f32;
        if bin.is_finite() && bin >= 0.0 && bin < count as f32 {
            Some(bin as usize)
        } else {
            None
        }
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            far: 1.0,
            near: -1.0,
        }
    }
}

/// Fixed-count depth buckets of triangles, recreated for every surface draw.
///
/// Bin assignment is a pure function of a triangle's centroid depth, so the
/// result is independent of insertion order across bins; only the relative
/// order of triangles sharing a bin depends on it.
#[derive(Debug)]
pub struct DepthBins {
    bins: Vec<Vec<Tri>>,
    range: DepthRange,
    inserted: usize,
    dropped: usize,
}

impl DepthBins {
    pub fn new(count: usize) -> Self {
        Self::with_range(count, DepthRange::default())
    }

    pub fn with_range(count: usize, range: DepthRange) -> Self {
        let mut bins = Vec::new();
        bins.resize_with(count, Vec::new);
        Self {
            bins,
            range,
            inserted: 0,
            dropped: 0,
        }
    }

    /// Bin a triangle by its centroid depth under the given transform.
    ///
    /// The centroid is the unweighted mean of the three vertex positions,
    /// transformed to a homogeneous clip coordinate and perspective-divided.
    /// Triangles whose bin falls outside the range are dropped and counted.
    pub fn insert(&mut self, tri: Tri, clip_from_model: cgmath::Matrix4<f32>) {
        let centroid = [
            (tri[0].position[0] + tri[1].position[0] + tri[2].position[0]) / 3.0,
            (tri[0].position[1] + tri[1].position[1] + tri[2].position[1]) / 3.0,
            (tri[0].position[2] + tri[1].position[2] + tri[2].position[2]) / 3.0,
        ];
        let clip = clip_from_model * Vector4::new(centroid[0], centroid[1], centroid[2], 1.0);
        let depth = clip.z / clip.w;
        match self.range.bin_for(depth, self.bins.len()) {
            Some(bin) => {
                self.bins[bin].push(tri);
                self.inserted += 1;
            }
            None => self.dropped += 1,
        }
    }

    /// Number of triangles currently held across all bins.
    pub fn len(&self) -> usize {
        self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Number of triangles discarded for falling outside the bin range.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Consume the bins in ascending index order: far to near under the
    /// default [`DepthRange`]. Insertion order is preserved within a bin.
    pub fn into_back_to_front(self) -> impl Iterator<Item = Tri> {
        self.bins.into_iter().flatten()
    }
}
