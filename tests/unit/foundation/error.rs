use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EngineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        EngineError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(EngineError::render("x").to_string().contains("render error:"));
    assert!(EngineError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EngineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
