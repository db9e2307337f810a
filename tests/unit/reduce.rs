use super::*;
use crate::vectors::cell::Cell;

fn horizontal(frame: u64, len: f64) -> MotionVectorRecord {
    MotionVectorRecord::new(frame, (100.0, 100.0), (100.0 + len, 100.0))
}

#[test]
fn sub_threshold_motion_is_discarded_regardless_of_cap() {
    let data: Vec<MotionVectorRecord> = (0..10_000)
        .map(|_| MotionVectorRecord::new(0, (0.0, 0.0), (0.9, 1.2)))
        .collect();
    assert!((data[0].magnitude() - 1.5).abs() < 1e-12);
    assert!(reduce(&data, 100).is_empty());
}

#[test]
fn keeps_the_largest_when_over_cap() {
    let data: Vec<MotionVectorRecord> = (1..=200).map(|m| horizontal(0, m as f64)).collect();
    let out = reduce(&data, 50);
    assert_eq!(out.len(), 50);
    let mut mags: Vec<u32> = out.iter().map(|v| v.magnitude as u32).collect();
    mags.sort_unstable();
    assert_eq!(mags, (151..=200).collect::<Vec<u32>>());
}

#[test]
fn exactly_two_pixels_is_not_significant() {
    let data = vec![horizontal(0, 2.0), horizontal(0, 2.5)];
    let out = reduce(&data, 10);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].magnitude, 2.5);
}

#[test]
fn output_is_a_subset_with_added_magnitude() {
    let data: Vec<MotionVectorRecord> = [0.5, 3.0, 8.0, 1.0, 30.0]
        .iter()
        .map(|&m| horizontal(4, m))
        .collect();
    let out = reduce(&data, 100);
    assert_eq!(out.len(), 3);
    for v in &out {
        assert!(data.contains(&v.record));
        assert!(v.magnitude > 2.0);
        assert_eq!(v.magnitude, v.record.magnitude());
    }
    assert_eq!(
        out.iter().map(|v| v.magnitude).collect::<Vec<_>>(),
        vec![3.0, 8.0, 30.0]
    );
}

#[test]
fn ties_prefer_earlier_rows() {
    let mut data: Vec<MotionVectorRecord> = (0..5).map(|_| horizontal(0, 10.0)).collect();
    for (i, r) in data.iter_mut().enumerate() {
        r.src_y = i as f64;
        r.dst_y = i as f64;
    }
    let out = reduce(&data, 2);
    assert_eq!(
        out.iter().map(|v| v.record.src_y).collect::<Vec<_>>(),
        vec![0.0, 1.0]
    );
}

#[test]
fn reducing_twice_is_a_no_op_when_under_cap() {
    let data: Vec<MotionVectorRecord> = (0..40).map(|m| horizontal(0, m as f64 * 0.5)).collect();
    let once = reduce(&data, 1000);
    let twice = reduce(once.iter().map(|v| &v.record), 1000);
    assert_eq!(once, twice);
}

#[test]
fn missing_motion_is_never_significant() {
    let mut r = horizontal(0, 50.0);
    r.motion_x = Cell::Missing;
    assert!(reduce(std::slice::from_ref(&r), 10).is_empty());
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(reduce(std::iter::empty(), 10).is_empty());
}

#[test]
fn zero_cap_yields_nothing() {
    let data = vec![horizontal(0, 50.0)];
    assert!(reduce(&data, 0).is_empty());
}
