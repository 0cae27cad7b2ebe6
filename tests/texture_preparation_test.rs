use face_ngin::resources::texture::{build_mip_chain, pad_to_power_of_two, prepare};
use image::{DynamicImage, Rgba, RgbaImage};

fn solid_image(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(pixel))
}

#[test]
fn should_pad_to_smallest_enclosing_powers_of_two() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (w, h, expected_w, expected_h) in [
        (1u32, 1u32, 1u32, 1u32),
        (2, 2, 2, 2),
        (3, 5, 4, 8),
        (100, 50, 128, 64),
        (128, 64, 128, 64),
        (129, 65, 256, 128),
        (640, 480, 1024, 512),
    ] {
        let padded = pad_to_power_of_two(&solid_image(w, h, [10, 20, 30, 255]));
        assert_eq!(
            padded.dimensions(),
            (expected_w, expected_h),
            "padding {w}x{h}"
        );
    }
}

#[test]
fn should_keep_source_pixels_at_origin_and_zero_the_padding() {
    let mut img = solid_image(3, 2, [200, 100, 50, 255]);
    img.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
    let padded = pad_to_power_of_two(&img);
    assert_eq!(padded.dimensions(), (4, 2));
    assert_eq!(*padded.get_pixel(0, 0), Rgba([200, 100, 50, 255]));
    assert_eq!(*padded.get_pixel(2, 1), Rgba([1, 2, 3, 4]));
    // Padding texels keep the allocation default.
    assert_eq!(*padded.get_pixel(3, 0), Rgba([0, 0, 0, 0]));
    assert_eq!(*padded.get_pixel(3, 1), Rgba([0, 0, 0, 0]));
}

#[test]
fn should_build_full_mip_chain_down_to_one_by_one() {
    let levels = build_mip_chain(solid_image(128, 64, [255, 0, 0, 255]));
    // floor(log2(128)) + 1
    assert_eq!(levels.len(), 8);
    let expected = [
        (128, 64),
        (64, 32),
        (32, 16),
        (16, 8),
        (8, 4),
        (4, 2),
        (2, 1),
        (1, 1),
    ];
    for (level, &dims) in levels.iter().zip(expected.iter()) {
        assert_eq!(level.dimensions(), dims);
    }
}

#[test]
fn should_preserve_solid_color_through_downsampling() {
    let levels = build_mip_chain(solid_image(16, 16, [40, 80, 120, 255]));
    for level in &levels {
        for pixel in level.pixels() {
            assert_eq!(*pixel, Rgba([40, 80, 120, 255]));
        }
    }
}

#[test]
fn should_prepare_100x50_image_with_no_skipped_levels() {
    // Scenario from the design: 100x50 source, device max 4096.
    let prepared = prepare(
        &DynamicImage::ImageRgba8(solid_image(100, 50, [0, 255, 0, 255])),
        4096,
    )
    .unwrap();
    assert_eq!(prepared.padded_dimensions(), (128, 64));
    assert_eq!(prepared.skip, 0);
    assert_eq!(prepared.levels.len(), 8);
    assert_eq!(prepared.upload_dimensions(), (128, 64));
    assert_eq!(prepared.upload_levels().len(), 8);
}

#[test]
fn should_skip_leading_levels_beyond_the_device_limit() {
    let prepared = prepare(
        &DynamicImage::ImageRgba8(solid_image(100, 50, [0, 255, 0, 255])),
        32,
    )
    .unwrap();
    // 128x64 and 64x32 exceed a 32 texel limit; upload starts at 32x16.
    assert_eq!(prepared.padded_dimensions(), (128, 64));
    assert_eq!(prepared.skip, 2);
    assert_eq!(prepared.upload_dimensions(), (32, 16));
    assert_eq!(prepared.upload_levels().len(), 6);
    assert_eq!(
        prepared.upload_levels().last().unwrap().dimensions(),
        (1, 1)
    );
}

#[test]
fn should_flip_rows_so_the_source_top_row_lands_at_the_bottom() {
    // Two-row source: top row red, bottom row blue.
    let mut img = RgbaImage::new(4, 2);
    for x in 0..4 {
        img.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(x, 1, Rgba([0, 0, 255, 255]));
    }
    let prepared = prepare(&DynamicImage::ImageRgba8(img), 4096).unwrap();
    let level0 = &prepared.levels[0];
    assert_eq!(level0.dimensions(), (4, 2));
    // Row order is reversed for the bottom-to-top texture convention.
    assert_eq!(*level0.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    assert_eq!(*level0.get_pixel(0, 1), Rgba([255, 0, 0, 255]));
}

#[test]
fn should_reject_zero_sized_images_and_limits() {
    let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 7));
    assert!(prepare(&empty, 4096).is_err());

    let fine = DynamicImage::ImageRgba8(solid_image(4, 4, [0, 0, 0, 255]));
    assert!(prepare(&fine, 0).is_err());
}

#[test]
fn should_always_leave_at_least_one_uploadable_level() {
    // Even a 1 texel device limit keeps the 1x1 tail of the chain.
    let prepared = prepare(
        &DynamicImage::ImageRgba8(solid_image(100, 50, [9, 9, 9, 255])),
        1,
    )
    .unwrap();
    assert_eq!(prepared.upload_levels().len(), 1);
    assert_eq!(prepared.upload_dimensions(), (1, 1));
}
