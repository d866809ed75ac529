use super::*;

fn gradient_rgb(width: u32, height: u32) -> image::RgbImage {
    image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8])
    })
}

#[test]
fn alpha_follows_mask_and_color_is_copied() {
    let rgb = gradient_rgb(5, 3);
    let mask_bytes = (0..15u8).map(|i| if i % 3 == 0 { 0 } else { i }).collect::<Vec<_>>();
    let mask = MaskPlane::new(&mask_bytes, 5, 3).unwrap();

    let out = composite_image(&rgb, mask).unwrap();
    assert_eq!(out.data.len(), 5 * 3 * 4);
    for (i, (px, src)) in out.data.chunks_exact(4).zip(rgb.pixels()).enumerate() {
        assert_eq!(&px[..3], &src.0[..], "rgb at pixel {i}");
        let expected = if mask_bytes[i] > 0 { 255 } else { 0 };
        assert_eq!(px[3], expected, "alpha at pixel {i}");
    }
}

#[test]
fn bgr_source_is_normalized_to_rgb() {
    let src = [10u8, 20, 30, 40, 50, 60];
    let mask = MaskPlane::new(&[1, 0], 2, 1).unwrap();
    let out = composite_buffer(&src, ChannelOrder::Bgr, mask).unwrap();
    assert_eq!(out.data, vec![30, 20, 10, 255, 60, 50, 40, 0]);
}

#[test]
fn compositing_is_idempotent() {
    let rgb = gradient_rgb(33, 17);
    let mask_bytes = (0..33 * 17).map(|i| (i % 5) as u8).collect::<Vec<_>>();
    let mask = MaskPlane::new(&mask_bytes, 33, 17).unwrap();

    let a = composite_image(&rgb, mask).unwrap();
    let b = composite_image(&rgb, mask).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dimension_mismatch_is_an_error_not_a_panic() {
    let rgb = gradient_rgb(4, 4);
    let mask_bytes = vec![255u8; 6];
    let mask = MaskPlane::new(&mask_bytes, 3, 2).unwrap();
    let err = composite_image(&rgb, mask).unwrap_err();
    assert!(err.to_string().contains("4x4"));

    assert!(composite_buffer(&[0u8; 5], ChannelOrder::Rgb, mask).is_err());
}

#[test]
fn all_zero_mask_gives_fully_transparent_frame() {
    let rgb = gradient_rgb(8, 8);
    let mask_bytes = vec![0u8; 64];
    let out = composite_image(&rgb, MaskPlane::new(&mask_bytes, 8, 8).unwrap()).unwrap();
    assert!(out.data.chunks_exact(4).all(|px| px[3] == 0));
}
