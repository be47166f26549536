use super::*;

fn size(w: u32, h: u32) -> Size {
    Size::new(w, h).unwrap()
}

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, size(1, 2), 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn kernel_covers_three_sigmas() {
    let radius = |sigma: f32| GaussianKernel::from_sigma(sigma).map(|k| k.radius());
    assert_eq!(radius(0.0), None);
    assert_eq!(radius(f32::NAN), None);
    assert_eq!(radius(0.1), Some(1));
    assert_eq!(radius(1.0), Some(3));
    assert_eq!(radius(2.5), Some(8));
}

#[test]
fn kernel_taps_are_symmetric_and_sum_to_one() {
    let k = GaussianKernel::from_sigma(1.7).unwrap();
    let taps = &k.taps;
    assert_eq!(taps.len(), 2 * k.radius() + 1);
    assert_eq!(taps.iter().map(|&t| u64::from(t)).sum::<u64>(), 1 << 16);
    assert!(taps.iter().eq(taps.iter().rev()));
    assert_eq!(taps.iter().max(), Some(&taps[k.radius()]));
}

#[test]
fn constant_image_is_unchanged() {
    let px = [10u8, 20u8, 30u8, 255u8];
    let src = px.repeat(12);
    let out = blur_rgba8_premul(&src, size(4, 3), 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn single_pixel_energy_spreads_and_is_conserved() {
    let s = size(9, 9);
    let mut src = vec![0u8; s.rgba_len()];
    let center = ((4 * 9 + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, s, 1.0).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 7], size(1, 2), 1.0).is_err());
    assert!(blur_rgba8_premul(&[0u8; 7], size(1, 2), 0.0).is_err());
}
