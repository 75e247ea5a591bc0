use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MatteboxError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        MatteboxError::decode("x")
            .to_string()
            .contains("decode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MatteboxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
