use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        InklineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        InklineError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        InklineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = InklineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
