//! Render pipeline definitions.
//!
//! - `face` builds the alpha-blended, lit pipeline all face surfaces draw
//!   with, plus the material bind group layout
//! - `light` holds the lighting descriptor and its GPU uniform resources

pub mod face;
pub mod light;
