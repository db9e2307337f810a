use super::*;

#[test]
fn frame_range_is_inclusive() {
    let r = FrameRange::new(10, 12).unwrap();
    assert_eq!(r.len_frames(), 3);
    assert_eq!(r.frames().collect::<Vec<_>>(), vec![10, 11, 12]);
}

#[test]
fn single_frame_range_is_valid() {
    let r = FrameRange::new(7, 7).unwrap();
    assert_eq!(r.len_frames(), 1);
}

#[test]
fn inverted_range_is_an_argument_error() {
    let err = FrameRange::new(5, 4).unwrap_err();
    assert!(matches!(err, MvError::Argument(_)));
    assert!(err.to_string().contains("start_frame (5) must be <= end_frame (4)"));
}

#[test]
fn canvas_rejects_zero_size() {
    assert!(Canvas::new(0, 10).is_err());
    assert_eq!(Canvas::new(4, 2).unwrap().rgba_len(), 32);
}
