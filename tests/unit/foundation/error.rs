use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BoothError::camera("x")
            .to_string()
            .contains("camera unavailable:")
    );
    assert!(BoothError::decode("x").to_string().contains("decode error:"));
    assert!(BoothError::export("x").to_string().contains("export error:"));
    assert!(
        BoothError::session("x")
            .to_string()
            .contains("session error:")
    );
    assert!(
        BoothError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn bake_names_the_failing_shot() {
    let err = BoothError::bake(2, BoothError::decode("truncated png"));
    let msg = err.to_string();
    assert!(msg.contains("shot 2"));
    assert!(msg.contains("truncated png"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
