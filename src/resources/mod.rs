/**
 * This module contains the CPU-side derivation steps that feed the GPU:
 * texture preparation (padding, flipping, mip chains) and per-frame normal
 * recomputation for deformable meshes.
 */
pub mod mesh;
pub mod texture;
