use super::*;

fn small_opts() -> VectorVideoOpts {
    VectorVideoOpts {
        width: 64,
        height: 48,
        ..VectorVideoOpts::default()
    }
}

#[test]
fn defaults_match_standalone_video() {
    let opts = VectorVideoOpts::default();
    assert_eq!((opts.width, opts.height, opts.fps), (1920, 1080, 24));
    assert_eq!(opts.max_vectors, 15_000);
    assert_eq!(opts.style, OverlayStyle::emphasized());
    assert!(opts.captions);
    assert_eq!(opts.caption_font, None);
}

#[test]
fn single_frame_uses_side_by_side_style() {
    let cfg = VisualizationConfig {
        max_vectors_per_frame: 9,
        ..VisualizationConfig::default()
    };
    let opts = VectorVideoOpts::single_frame(&cfg);
    assert_eq!(opts.style, cfg.overlay);
    assert_ne!(opts.style, cfg.video_overlay);
    assert_eq!(opts.max_vectors, 9);
}

#[test]
fn from_config_takes_cap_and_video_style() {
    let cfg = VisualizationConfig {
        max_vectors_per_frame: 7,
        ..VisualizationConfig::default()
    };
    let opts = VectorVideoOpts::from_config(&cfg);
    assert_eq!(opts.max_vectors, 7);
    assert_eq!(opts.style, cfg.video_overlay);
    assert_eq!(opts.width, 1920);
}

#[test]
fn paint_clears_previous_frame() {
    let opts = small_opts();
    let renderer = opts.renderer();
    let mut canvas = Raster::black(64, 48).unwrap();

    let first = [MotionVectorRecord::new(1, (5.0, 5.0), (40.0, 5.0))];
    assert_eq!(paint_vector_frame(&mut canvas, &first, &renderer, 10).unwrap().drawn, 1);
    assert_ne!(canvas.pixel(20, 5).unwrap(), [0, 0, 0, 255]);

    let still = [MotionVectorRecord::new(2, (5.0, 5.0), (6.0, 5.0))];
    assert_eq!(
        paint_vector_frame(&mut canvas, &still, &renderer, 10).unwrap(),
        PaintedFrame::default()
    );
    assert!(canvas.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn paint_respects_cap() {
    let opts = small_opts();
    let rows: Vec<_> = (0..10)
        .map(|i| MotionVectorRecord::new(1, (1.0, f64::from(i) * 4.0), (30.0, f64::from(i) * 4.0)))
        .collect();
    let mut canvas = Raster::black(64, 48).unwrap();
    let painted = paint_vector_frame(&mut canvas, &rows, &opts.renderer(), 3).unwrap();
    assert_eq!(painted, PaintedFrame { reduced: 3, drawn: 3 });
}

#[test]
fn frame_png_is_written() {
    let table = VectorTable::from_records(vec![
        MotionVectorRecord::new(3, (4.0, 4.0), (30.0, 20.0)),
        MotionVectorRecord::new(4, (4.0, 4.0), (30.0, 20.0)),
    ]);
    let out = Path::new("target/unit_video/frame3.png");
    let drawn = render_frame_png(&table, 3, out, &small_opts()).unwrap();
    assert_eq!(drawn, 1);
    let img = image::open(out).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
}

#[test]
fn absent_frame_gives_black_png() {
    let table = VectorTable::from_records(vec![MotionVectorRecord::new(
        3,
        (4.0, 4.0),
        (30.0, 20.0),
    )]);
    let out = Path::new("target/unit_video/frame9.png");
    assert_eq!(render_frame_png(&table, 9, out, &small_opts()).unwrap(), 0);
    let img = image::open(out).unwrap().to_rgba8();
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn empty_table_is_rejected_before_ffmpeg() {
    let err = render_vector_video(
        &VectorTable::default(),
        Path::new("target/unit_video/empty.mp4"),
        &small_opts(),
    )
    .unwrap_err();
    assert!(matches!(err, MvError::Validation(_)), "{err}");
}

fn lit_pixels(canvas: &Raster, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let [r, g, b, _] = canvas.pixel(x, y).unwrap();
            r > 128 && g > 128 && b > 128
        })
        .count()
}

#[test]
fn video_frame_captions_land_top_left() {
    let mut captions =
        CaptionRenderer::from_path(Path::new("tests/data/fonts/DejaVuSans.ttf"), Rgb8::WHITE)
            .unwrap();
    let renderer = OverlayRenderer::new(MagnitudePolicy::default(), OverlayStyle::emphasized());
    let mut canvas = Raster::black(400, 300).unwrap();
    // One vector far from the caption area, one too short to survive reduction.
    let rows = [
        MotionVectorRecord::new(42, (200.0, 250.0), (380.0, 250.0)),
        MotionVectorRecord::new(42, (10.0, 290.0), (11.0, 290.0)),
    ];

    let painted =
        paint_video_frame(&mut canvas, 42, &rows, &renderer, Some(&mut captions), 100).unwrap();
    assert_eq!(painted, PaintedFrame { reduced: 1, drawn: 1 });

    assert!(lit_pixels(&canvas, 50, 10, 350, 51) > 50, "frame caption missing");
    assert!(lit_pixels(&canvas, 50, 70, 350, 101) > 50, "vectors caption missing");
    assert_eq!(lit_pixels(&canvas, 0, 0, 45, 120), 0);
}

#[test]
fn video_frame_without_captions_leaves_corner_black() {
    let renderer = OverlayRenderer::new(MagnitudePolicy::default(), OverlayStyle::emphasized());
    let mut canvas = Raster::black(400, 300).unwrap();
    let rows = [MotionVectorRecord::new(1, (200.0, 250.0), (380.0, 250.0))];
    paint_video_frame(&mut canvas, 1, &rows, &renderer, None, 100).unwrap();
    assert_eq!(lit_pixels(&canvas, 0, 0, 400, 120), 0);
}

#[test]
fn configured_caption_font_must_exist() {
    let table = VectorTable::from_records(vec![MotionVectorRecord::new(1, (0.0, 0.0), (9.0, 9.0))]);
    let opts = VectorVideoOpts {
        caption_font: Some(PathBuf::from("tests/data/fonts/none.ttf")),
        ..small_opts()
    };
    let err = render_vector_video(&table, Path::new("target/unit_video/nofont.mp4"), &opts)
        .unwrap_err();
    assert!(matches!(err, MvError::FileNotFound(_)), "{err}");
}
