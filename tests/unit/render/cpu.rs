use super::*;
use crate::{foundation::core::Canvas, render::plan::RenderPlan};

#[test]
fn pixmap_conversion_checks_length_and_opacity() {
    let p = image_premul_bytes_to_pixmap(&[1, 2, 3, 255, 4, 5, 6, 255], 2, 1).unwrap();
    assert_eq!((p.width(), p.height()), (2, 1));
    assert_eq!(p.data_as_u8_slice(), &[1, 2, 3, 255, 4, 5, 6, 255]);

    assert!(image_premul_bytes_to_pixmap(&[0; 7], 2, 1).is_err());
    assert!(image_premul_bytes_to_pixmap(&[], 70_000, 1).is_err());
}

#[test]
fn empty_plan_yields_transparent_frame() {
    let mut backend = CpuBackend::new();
    let plan = RenderPlan {
        canvas: Canvas::new(4, 3).unwrap(),
        ops: Vec::new(),
    };
    let frame = backend
        .render_plan(&plan, &mut TextLayoutEngine::new())
        .unwrap();
    assert_eq!(frame.data, vec![0u8; 4 * 3 * 4]);
}

#[test]
fn surface_is_cleared_between_plans() {
    let mut backend = CpuBackend::new();
    let canvas = Canvas::new(8, 8).unwrap();
    let filled = RenderPlan {
        canvas,
        ops: vec![DrawOp::FillRect {
            rect: canvas.rect(),
            color: Rgb8::new(9, 9, 9),
        }],
    };
    let empty = RenderPlan {
        canvas,
        ops: Vec::new(),
    };
    let mut text = TextLayoutEngine::new();
    let first = backend.render_plan(&filled, &mut text).unwrap();
    assert_eq!(first.pixel(3, 3), Some([9, 9, 9, 255]));
    let second = backend.render_plan(&empty, &mut text).unwrap();
    assert_eq!(second.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn image_paint_is_reused_for_shared_pixels() {
    let mut backend = CpuBackend::new();
    let img = PreparedImage::from_premul_rgba8(1, 1, vec![1, 2, 3, 255]).unwrap();
    backend.image_paint_for(&img).unwrap();
    backend.image_paint_for(&img.clone()).unwrap();
    let (cached, _) = backend.image_cache.as_ref().unwrap();
    assert!(cached.same_pixels(&img));

    let other = PreparedImage::from_premul_rgba8(1, 1, vec![1, 2, 3, 255]).unwrap();
    backend.image_paint_for(&other).unwrap();
    let (cached, _) = backend.image_cache.as_ref().unwrap();
    assert!(cached.same_pixels(&other));
}

#[test]
fn text_without_font_is_skipped() {
    let mut backend = CpuBackend::new();
    let canvas = Canvas::new(16, 16).unwrap();
    let plan = RenderPlan {
        canvas,
        ops: vec![DrawOp::Text {
            text: "hi".to_string(),
            origin: crate::foundation::core::Point::new(1.0, 12.0),
            size_px: 12.0,
            color: Rgb8::WHITE,
            clip: None,
        }],
    };
    let frame = backend
        .render_plan(&plan, &mut TextLayoutEngine::new())
        .unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
    assert!(backend.warned_missing_font);
}
