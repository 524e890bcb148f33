use super::*;

#[test]
fn radius_zero_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_channel(&src, 3, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_channel_is_unchanged() {
    let src = vec![77u8; 6 * 4];
    assert_eq!(blur_channel(&src, 6, 4, 3, 2.0).unwrap(), src);
}

#[test]
fn single_pixel_energy_spreads_and_is_preserved() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_channel(&src, w, h, 3, 1.5).unwrap();

    assert!(out.iter().filter(|&&v| v != 0).count() > 1);
    let sum: u32 = out.iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 30);
    assert!(out[(4 * w + 4) as usize] < 255);
}

#[test]
fn mismatched_length_is_rejected() {
    let err = blur_channel(&[0u8; 5], 2, 2, 1, 1.0).unwrap_err();
    assert!(matches!(err, GhostError::Validation(_)));
}

#[test]
fn kernel_sums_to_one_in_q16() {
    let k = gaussian_kernel_q16(8, 8.0).unwrap();
    assert_eq!(k.len(), 17);
    assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
    assert!(gaussian_kernel_q16(2, 0.0).is_err());
}
