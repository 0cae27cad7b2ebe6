//! View/projection transforms and the camera uniform.
//!
//! The host owns the camera; each frame it pushes the current modelview and
//! projection matrices into the [`crate::context::Context`], which forwards
//! them to the GPU through [`CameraUniform`]. Depth binning reads the same
//! transforms CPU-side, so both paths stay in sync by construction.

use cgmath::SquareMatrix;

/// wgpu clips z to [0, 1] while cgmath produces GL-style [-1, 1] clip space.
/// This correction is applied on the GPU path only; CPU-side depth binning
/// works in the GL convention.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective projection parameters.
///
/// `calc_matrix` returns a GL-convention projection (z in [-1, 1]); the
/// wgpu correction is applied when the camera uniform is packed.
pub struct Projection {
    pub aspect: f32,
    pub fovy: cgmath::Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<cgmath::Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// The current frame's modelview and projection matrices.
///
/// `modelview` is the combined model and view transform the host's scene
/// traversal has active when it calls into the renderer.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransforms {
    pub modelview: cgmath::Matrix4<f32>,
    pub projection: cgmath::Matrix4<f32>,
}

impl ViewTransforms {
    pub fn new(modelview: cgmath::Matrix4<f32>, projection: cgmath::Matrix4<f32>) -> Self {
        Self {
            modelview,
            projection,
        }
    }

    /// Model space to GL clip space. Depth binning divides this through w to
    /// get a depth in [-1, 1] for anything inside the frustum.
    pub fn clip_from_model(&self) -> cgmath::Matrix4<f32> {
        self.projection * self.modelview
    }

    /// Model space to wgpu clip space, for the vertex shader.
    pub fn wgpu_clip_from_model(&self) -> cgmath::Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection * self.modelview
    }

    /// The eye position in model space, recovered from the modelview
    /// transform. Falls back to the origin if the matrix is singular.
    pub fn eye_position(&self) -> [f32; 3] {
        match self.modelview.invert() {
            Some(inv) => [inv.w.x, inv.w.y, inv.w.z],
            None => [0.0, 0.0, 0.0],
        }
    }
}

impl Default for ViewTransforms {
    fn default() -> Self {
        Self {
            modelview: cgmath::Matrix4::identity(),
            projection: cgmath::Matrix4::identity(),
        }
    }
}

/// GPU-side camera data: eye position (for specular highlights) and the
/// combined clip-from-model matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, transforms: &ViewTransforms) {
        let eye = transforms.eye_position();
        self.view_position = [eye[0], eye[1], eye[2], 1.0];
        self.view_proj = transforms.wgpu_clip_from_model().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
