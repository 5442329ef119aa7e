use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&encode_png(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage_as_decode_error() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, AdError::Decode(_)), "{err}");
}

#[test]
fn clones_share_pixels() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let a = decode_image(&encode_png(img)).unwrap();
    let b = a.clone();
    assert!(a.same_pixels(&b));
    assert!(a.is_consistent());
}

#[test]
fn from_premul_rgba8_checks_length() {
    assert!(PreparedImage::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn load_image_file_reports_missing_path() {
    let err = load_image_file(std::path::Path::new("target/does/not/exist.png")).unwrap_err();
    assert!(err.to_string().contains("exist.png"));
}
