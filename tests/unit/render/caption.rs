use super::*;

const FONT: &str = "tests/data/fonts/DejaVuSans.ttf";

fn renderer() -> CaptionRenderer {
    CaptionRenderer::from_path(Path::new(FONT), Rgb8::WHITE).unwrap()
}

fn lit_pixels(canvas: &Raster, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
    let mut n = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            let [r, g, b, _] = canvas.pixel(x, y).unwrap();
            if r > 128 && g > 128 && b > 128 {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn registers_family_from_font_bytes() {
    assert!(!renderer().family_name().trim().is_empty());
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = CaptionRenderer::from_font_bytes(vec![1, 2, 3, 4], Rgb8::WHITE).unwrap_err();
    assert!(matches!(err, MvError::Validation(_)), "{err}");
}

#[test]
fn missing_font_file_is_file_not_found() {
    let err = CaptionRenderer::from_path(Path::new("tests/data/fonts/none.ttf"), Rgb8::WHITE)
        .unwrap_err();
    assert!(matches!(err, MvError::FileNotFound(_)), "{err}");
    assert!(CaptionRenderer::discover(Some(Path::new("tests/data/fonts/none.ttf")), Rgb8::WHITE).is_err());
}

#[test]
fn frame_captions_match_layout() {
    let [frame, vectors] = frame_captions(12, 345);
    assert_eq!(frame.text, "Frame: 12");
    assert_eq!((frame.x, frame.baseline), (50.0, 50.0));
    assert_eq!(vectors.text, "Vectors: 345");
    assert_eq!((vectors.x, vectors.baseline), (50.0, 100.0));
}

#[test]
fn captions_sit_above_their_baselines() {
    let mut canvas = Raster::black(320, 140).unwrap();
    renderer()
        .draw(&mut canvas, &frame_captions(7, 3))
        .unwrap();

    // "Frame: 7" glyphs between the top of the ascender and the first baseline.
    assert!(lit_pixels(&canvas, 50, 10, 300, 51) > 50);
    // "Vectors: 3" above the second baseline.
    assert!(lit_pixels(&canvas, 50, 70, 300, 101) > 50);
    // Nothing left of the anchor or below the last baseline's descenders.
    assert_eq!(lit_pixels(&canvas, 0, 0, 45, 140), 0);
    assert_eq!(lit_pixels(&canvas, 0, 115, 320, 140), 0);
}

#[test]
fn empty_caption_list_leaves_canvas_untouched() {
    let mut canvas = Raster::black(64, 32).unwrap();
    renderer().draw(&mut canvas, &[]).unwrap();
    assert_eq!(canvas, Raster::black(64, 32).unwrap());
}
