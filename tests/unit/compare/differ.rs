use super::*;
use crate::vectors::{cell::Cell, record::MotionVectorRecord};

fn table(rows: &[(u64, f64, f64)]) -> VectorTable {
    VectorTable::from_records(
        rows.iter()
            .map(|&(frame, dst_x, dst_y)| MotionVectorRecord::new(frame, (0.0, 0.0), (dst_x, dst_y)))
            .collect(),
    )
}

fn lines(d: &[Discrepancy]) -> Vec<String> {
    d.iter().map(ToString::to_string).collect()
}

#[test]
fn identical_tables_have_no_differences() {
    let a = table(&[(1, 5.0, 0.0), (2, 3.0, 4.0), (3, 1.0, 1.0)]);
    let range = FrameRange::new(1, 3).unwrap();
    assert!(compare_frames(&a, &a, range).is_empty());
}

#[test]
fn field_level_differences_are_reported_per_column() {
    let a = table(&[(1, 5.0, 0.0)]);
    let b = table(&[(1, 6.0, 0.0)]);
    let out = compare_frames(&a, &b, FrameRange::new(1, 1).unwrap());
    assert_eq!(
        lines(&out),
        vec![
            "Frame 1: 'dst_x' differs (method0=5, method7=6)",
            "Frame 1: 'motion_x' differs (method0=5, method7=6)",
        ]
    );
}

#[test]
fn missing_frame_short_circuits_field_comparison() {
    let a = table(&[(1, 5.0, 0.0), (2, 5.0, 0.0)]);
    let b = table(&[(1, 9.0, 0.0)]);
    let out = compare_frames(&a, &b, FrameRange::new(2, 2).unwrap());
    assert_eq!(lines(&out), vec!["Frame 2: missing in one of the files"]);
}

#[test]
fn output_is_frame_ascending() {
    let a = table(&[(3, 1.0, 0.0), (1, 1.0, 0.0)]);
    let b = table(&[(1, 2.0, 0.0)]);
    let out = compare_frames(&a, &b, FrameRange::new(1, 3).unwrap());
    let frames: Vec<u64> = out.iter().map(Discrepancy::frame).collect();
    assert_eq!(frames, vec![1, 1, 2, 3]);
    assert_eq!(out[2], Discrepancy::MissingFrame { frame: 2 });
}

#[test]
fn duplicate_frames_use_the_first_row() {
    let a = table(&[(1, 5.0, 0.0), (1, 99.0, 0.0)]);
    let b = table(&[(1, 5.0, 0.0)]);
    assert!(compare_frames(&a, &b, FrameRange::new(1, 1).unwrap()).is_empty());
}

#[test]
fn two_nulls_are_equal_but_null_versus_value_differs() {
    let mut a = table(&[(1, 5.0, 0.0)]);
    let mut b = table(&[(1, 5.0, 0.0)]);
    a.records[0].flags = Cell::Missing;
    b.records[0].flags = Cell::Missing;
    a.records[0].motion_scale = Cell::Present(1.0);
    b.records[0].motion_scale = Cell::Missing;
    let out = compare_frames(&a, &b, FrameRange::new(1, 1).unwrap());
    assert_eq!(
        lines(&out),
        vec!["Frame 1: 'motion_scale' differs (method0=1, method7=nan)"]
    );
}

#[test]
fn method_id_is_never_compared() {
    let a = VectorTable::from_records(vec![
        MotionVectorRecord::new(1, (0.0, 0.0), (1.0, 1.0)).with_method(0),
    ]);
    let b = VectorTable::from_records(vec![
        MotionVectorRecord::new(1, (0.0, 0.0), (1.0, 1.0)).with_method(7),
    ]);
    assert!(compare_frames(&a, &b, FrameRange::new(1, 1).unwrap()).is_empty());
}

#[test]
fn columns_missing_from_the_second_table_are_skipped() {
    let a = VectorTable::from_reader("frame,src_x,src_y,dst_x,dst_y,note\n1,0,0,1,1,x\n".as_bytes())
        .unwrap();
    let b = VectorTable::from_reader("frame,src_x,src_y,dst_x,dst_y\n1,0,0,1,1\n".as_bytes())
        .unwrap();
    assert!(compare_frames(&a, &b, FrameRange::new(1, 1).unwrap()).is_empty());
}
