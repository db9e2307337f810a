use super::*;

const GRAY: [u8; 4] = [DIVIDER_GRAY, DIVIDER_GRAY, DIVIDER_GRAY, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

#[test]
fn video_segment_defaults_to_last() {
    let layout = SegmentLayout::new(2, None, 100, 50).unwrap();
    assert_eq!(layout.segments(), 3);
    assert_eq!(layout.video_index, 2);
    assert_eq!(layout.combined_width(), 300);
    assert_eq!(layout.table_for_segment(0), Some(0));
    assert_eq!(layout.table_for_segment(1), Some(1));
    assert_eq!(layout.table_for_segment(2), None);
}

#[test]
fn tables_shift_right_of_video_segment() {
    let layout = SegmentLayout::new(2, Some(0), 100, 50).unwrap();
    assert_eq!(layout.table_for_segment(0), None);
    assert_eq!(layout.table_for_segment(1), Some(0));
    assert_eq!(layout.table_for_segment(2), Some(1));
    assert_eq!(layout.x_offset(2), 200);
}

#[test]
fn out_of_range_video_index_is_an_argument_error() {
    let err = SegmentLayout::new(2, Some(3), 100, 50).unwrap_err();
    assert!(matches!(err, MvError::Argument(_)), "{err}");
}

#[test]
fn no_tables_means_video_only() {
    let layout = SegmentLayout::new(0, None, 40, 20).unwrap();
    assert_eq!(layout.segments(), 1);
    assert_eq!(layout.table_for_segment(0), None);
}

#[test]
fn frame_count_is_capped() {
    assert_eq!(combined_frame_count(100, 50, 660), 100);
    assert_eq!(combined_frame_count(10, 900, 660), 660);
    assert_eq!(combined_frame_count(0, 0, 660), 0);
}

#[test]
fn compose_places_video_overlay_and_dividers() {
    let layout = SegmentLayout::new(1, None, 40, 20).unwrap();
    let mut out = Raster::black(layout.combined_width(), 20).unwrap();
    let mut scratch = Raster::black(40, 20).unwrap();
    let video = Raster::filled(40, 20, Rgb8::new(0, 0, 200)).unwrap();
    let rows = [MotionVectorRecord::new(1, (2.0, 10.0), (35.0, 10.0))];
    let frame_rows = vec![rows.iter().collect::<Vec<_>>()];
    let opts = CombinedVideoOpts::default();
    let renderer = OverlayRenderer::new(opts.policy, opts.style);

    let drawn = compose_segments(
        &mut out,
        &mut scratch,
        &layout,
        Some(&video),
        &frame_rows,
        &renderer,
        opts.max_vectors,
        opts.divider,
    )
    .unwrap();

    assert_eq!(drawn, 1);
    // Vector segment: red arrow on black.
    let [r, g, b, _] = out.pixel(20, 10).unwrap();
    assert!(r >= 200 && g <= 60 && b <= 60, "{r},{g},{b}");
    assert_eq!(out.pixel(20, 2).unwrap(), BLACK);
    // Divider at the left edge of the video segment.
    assert_eq!(out.pixel(40, 0).unwrap(), GRAY);
    assert_eq!(out.pixel(40, 19).unwrap(), GRAY);
    // Video pixels elsewhere.
    assert_eq!(out.pixel(60, 5).unwrap(), [0, 0, 200, 255]);
    // No divider on the first segment.
    assert_eq!(out.pixel(0, 0).unwrap(), BLACK);
}

#[test]
fn missing_video_frame_renders_black() {
    let layout = SegmentLayout::new(1, Some(0), 10, 6).unwrap();
    let mut out = Raster::filled(20, 6, Rgb8::WHITE).unwrap();
    let mut scratch = Raster::black(10, 6).unwrap();
    let renderer = OverlayRenderer::default();

    compose_segments(
        &mut out,
        &mut scratch,
        &layout,
        None,
        &[Vec::new()],
        &renderer,
        10,
        Rgb8::new(DIVIDER_GRAY, DIVIDER_GRAY, DIVIDER_GRAY),
    )
    .unwrap();

    assert_eq!(out.pixel(3, 3).unwrap(), BLACK);
    assert_eq!(out.pixel(10, 3).unwrap(), GRAY);
    assert_eq!(out.pixel(15, 3).unwrap(), BLACK);
}

#[test]
fn table_count_must_match_layout() {
    let layout = SegmentLayout::new(2, None, 10, 6).unwrap();
    let mut out = Raster::black(30, 6).unwrap();
    let mut scratch = Raster::black(10, 6).unwrap();
    let err = compose_segments(
        &mut out,
        &mut scratch,
        &layout,
        None,
        &[Vec::new()],
        &OverlayRenderer::default(),
        10,
        Rgb8::BLACK,
    )
    .unwrap_err();
    assert!(matches!(err, MvError::Validation(_)), "{err}");
}
