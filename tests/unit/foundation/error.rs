use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MvError::file_not_found("a.csv")
            .to_string()
            .contains("file not found: a.csv")
    );
    assert!(MvError::parse("x").to_string().contains("parse error:"));
    assert!(
        MvError::missing_column("src_x")
            .to_string()
            .contains("missing required column: 'src_x'")
    );
    assert!(MvError::argument("x").to_string().contains("argument error:"));
    assert!(
        MvError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MvError::media("x").to_string().contains("media error:"));
    assert!(
        MvError::benchmark("x")
            .to_string()
            .contains("benchmark error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MvError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn variants_are_distinguishable() {
    let not_found = MvError::file_not_found("missing.csv");
    let parse = MvError::parse("bad row");
    assert!(matches!(not_found, MvError::FileNotFound(_)));
    assert!(matches!(parse, MvError::Parse(_)));
}
