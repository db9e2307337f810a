use super::*;

#[test]
fn config_validation_catches_bad_values() {
    assert!(default_mp4_config("target/out.mp4", 0, 10, 30).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 11, 10, 30).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 10, 10, 0).validate().is_err());
    assert!(default_mp4_config("target/out.mp4", 1920, 1080, 24).validate().is_ok());
}

#[test]
fn refuses_to_clobber_without_overwrite() {
    let path = PathBuf::from("target").join("unit_encode").join("exists.mp4");
    ensure_parent_dir(&path).unwrap();
    std::fs::write(&path, b"x").unwrap();
    let cfg = EncodeConfig {
        overwrite: false,
        ..default_mp4_config(&path, 16, 16, 24)
    };
    let err = FfmpegEncoder::new(cfg).err().unwrap();
    assert!(matches!(err, MvError::Validation(_)), "{err}");
}
