//! CPU-side texture preparation.
//!
//! Turns an arbitrary-size RGBA image into an upload-ready mip chain:
//! padded to power-of-two dimensions, vertically flipped for the
//! bottom-to-top row convention of the rendering pipeline, downsampled to a
//! full chain of half-sized levels, and clamped against the device's maximum
//! texture dimension by skipping leading levels instead of re-deriving a
//! smaller level 0.

use anyhow::*;
use image::{DynamicImage, GenericImageView, RgbaImage, imageops};

/// An upload-ready mip chain.
///
/// `levels[0]` is the padded, flipped source image; every following level
/// halves the previous one down to 1x1. `skip` is the number of leading
/// levels whose larger dimension exceeds the device limit; upload starts at
/// `levels[skip]`.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub levels: Vec<RgbaImage>,
    pub skip: usize,
}

impl PreparedImage {
    /// The levels that actually go to the GPU.
    pub fn upload_levels(&self) -> &[RgbaImage] {
        &self.levels[self.skip..]
    }

    /// Dimensions of the padded level 0, before any device-limit skip.
    pub fn padded_dimensions(&self) -> (u32, u32) {
        self.levels[0].dimensions()
    }

    /// Dimensions of the first uploaded level.
    pub fn upload_dimensions(&self) -> (u32, u32) {
        self.levels[self.skip].dimensions()
    }
}

/// Prepare an image for upload.
///
/// A zero-dimension source or a zero device limit is an explicit error; the
/// caller is expected to abort object setup rather than continue with an
/// invalid handle. The chain always reaches 1x1, so any positive
/// `max_dimension` leaves at least one uploadable level.
pub fn prepare(img: &DynamicImage, max_dimension: u32) -> Result<PreparedImage> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        bail!("cannot prepare a texture from a {width}x{height} image");
    }
    if max_dimension == 0 {
        bail!("device reports a maximum texture dimension of 0");
    }
    let rgba = img.to_rgba8();
    let padded = pad_to_power_of_two(&rgba);
    let flipped = imageops::flip_vertical(&padded);
    let levels = build_mip_chain(flipped);
    let skip = levels
        .iter()
        .take_while(|level| {
            let (w, h) = level.dimensions();
            w.max(h) > max_dimension
        })
        .count();
    Ok(PreparedImage { levels, skip })
}

/// Enlarge an image to the smallest power-of-two dimensions that hold it.
///
/// Source pixels sit at the top-left origin; the padding texels keep the
/// allocation default (zero). Already power-of-two images come back as a
/// plain copy.
pub fn pad_to_power_of_two(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    let padded_width = width.next_power_of_two();
    let padded_height = height.next_power_of_two();
    if (padded_width, padded_height) == (width, height) {
        return img.clone();
    }
    let mut padded = RgbaImage::new(padded_width, padded_height);
    imageops::replace(&mut padded, img, 0, 0);
    padded
}

/// Derive the full mip chain from a level-0 image by repeated halving
/// (floored at 1) down to 1x1, each level resampled from the previous with
/// a triangle filter.
pub fn build_mip_chain(level0: RgbaImage) -> Vec<RgbaImage> {
    let mut levels = vec![level0];
    loop {
        let (width, height) = levels[levels.len() - 1].dimensions();
        if width == 1 && height == 1 {
            break;
        }
        let next = imageops::resize(
            &levels[levels.len() - 1],
            (width / 2).max(1),
            (height / 2).max(1),
            imageops::FilterType::Triangle,
        );
        levels.push(next);
    }
    levels
}
