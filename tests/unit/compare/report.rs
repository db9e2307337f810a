use super::*;

#[test]
fn clean_report_renders_the_sentinel() {
    let r = ComparisonReport::new(FrameRange::new(10, 100).unwrap(), Vec::new());
    assert!(r.is_clean());
    assert_eq!(r.render(), "No differences found in frames 10 to 100.\n");
}

#[test]
fn discrepancies_render_one_per_line() {
    let r = ComparisonReport::new(
        FrameRange::new(1, 2).unwrap(),
        vec![
            Discrepancy::FieldDiffers {
                frame: 1,
                column: "dst_x".to_string(),
                left: "5".to_string(),
                right: "6".to_string(),
            },
            Discrepancy::MissingFrame { frame: 2 },
        ],
    );
    assert_eq!(
        r.render(),
        "Frame 1: 'dst_x' differs (method0=5, method7=6)\nFrame 2: missing in one of the files\n"
    );
}

#[test]
fn write_to_creates_parent_dirs() {
    let path = std::path::PathBuf::from("target")
        .join("unit_report")
        .join("nested")
        .join("out.txt");
    let _ = std::fs::remove_file(&path);
    let r = ComparisonReport::new(FrameRange::new(0, 0).unwrap(), Vec::new());
    r.write_to(&path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "No differences found in frames 0 to 0.\n"
    );
}
