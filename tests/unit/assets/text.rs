use super::*;

/// First readable font from `ADCANVAS_TEST_FONT` or a few common system locations.
fn find_test_font() -> Option<Vec<u8>> {
    let mut candidates: Vec<std::path::PathBuf> = Vec::new();
    if let Some(p) = std::env::var_os("ADCANVAS_TEST_FONT") {
        candidates.push(p.into());
    }
    for p in [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ] {
        candidates.push(p.into());
    }
    candidates.into_iter().find_map(|p| std::fs::read(p).ok())
}

#[test]
fn fixed_advance_counts_chars_not_bytes() {
    let mut m = FixedAdvance::new(0.5);
    assert_eq!(m.measure("", 16.0), 0.0);
    assert_eq!(m.measure("abcd", 16.0), 32.0);
    assert_eq!(m.measure("é ", 10.0), 10.0);
}

#[test]
fn engine_without_face_uses_fallback_and_skips_shaping() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.face().is_none());
    assert_eq!(
        engine.measure("Shop now", 14.0),
        FixedAdvance::default().measure("Shop now", 14.0)
    );
    assert!(
        engine
            .layout_line("Shop now", 14.0, TextBrushRgba8::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn layout_line_rejects_bad_sizes() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.layout_line("x", 0.0, TextBrushRgba8::default()).is_err());
    assert!(engine.layout_line("x", f32::NAN, TextBrushRgba8::default()).is_err());
}

#[test]
fn engine_rejects_non_font_bytes() {
    assert!(TextLayoutEngine::with_font_bytes(b"not a font".to_vec()).is_err());
}

#[test]
fn brush_from_rgb_is_opaque() {
    let b = TextBrushRgba8::from(Rgb8::new(1, 2, 3));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 255));
}

#[test]
fn shaped_widths_grow_with_text_when_font_available() {
    let Some(bytes) = find_test_font() else {
        eprintln!("no test font found; skipping");
        return;
    };
    let mut engine = TextLayoutEngine::with_font_bytes(bytes).unwrap();
    assert!(!engine.family_name().unwrap().trim().is_empty());

    let short = engine.measure("Treat ", 16.0);
    let long = engine.measure("Treat yourself ", 16.0);
    assert!(short > 0.0);
    assert!(long > short);
    // Cached measurement is stable.
    assert_eq!(engine.measure("Treat yourself ", 16.0), long);
}

#[test]
fn resolve_reports_missing_explicit_font() {
    let err = TextLayoutEngine::resolve(Some(Path::new("target/no/such/font.ttf")))
        .err()
        .unwrap();
    assert!(err.to_string().contains("font.ttf"));
}
