use super::*;

#[test]
fn hex_parses_long_short_and_bare_forms() {
    assert_eq!(Rgb8::from_hex("#0369A1").unwrap(), Rgb8::new(0x03, 0x69, 0xA1));
    assert_eq!(Rgb8::from_hex("0369a1").unwrap(), Rgb8::new(0x03, 0x69, 0xA1));
    assert_eq!(Rgb8::from_hex("#fff").unwrap(), Rgb8::WHITE);
    assert_eq!(Rgb8::from_hex("  #000000 ").unwrap(), Rgb8::BLACK);
}

#[test]
fn hex_rejects_malformed_input() {
    for bad in ["", "#", "#12345", "#1234567", "#GG0000", "#ff00ff00", "#ééé"] {
        assert!(Rgb8::from_hex(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn display_is_uppercase_and_case_insensitive_equality() {
    let lower: Rgb8 = "#ff00aa".parse().unwrap();
    let upper: Rgb8 = "#FF00AA".parse().unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.to_hex(), "#FF00AA");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgb8 = serde_json::from_str("\"#0369a1\"").unwrap();
    assert_eq!(c, Rgb8::new(0x03, 0x69, 0xA1));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#0369A1\"");
    assert!(serde_json::from_str::<Rgb8>("\"blue\"").is_err());
}

#[test]
fn canvas_validation_bounds() {
    assert!(Canvas::new(400, 400).is_ok());
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert_eq!(Canvas::default(), Canvas::DEFAULT);
    assert_eq!(Canvas::DEFAULT.rect(), Rect::new(0.0, 0.0, 400.0, 400.0));
}
