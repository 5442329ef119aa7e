use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AdError::decode("x").to_string().contains("decode error:"));
    assert!(AdError::render("x").to_string().contains("render error:"));
    assert!(
        AdError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
