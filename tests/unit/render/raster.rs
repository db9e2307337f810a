use super::*;

#[test]
fn black_canvas_is_opaque() {
    let r = Raster::black(4, 3).unwrap();
    assert_eq!(r.data.len(), 48);
    assert_eq!(r.pixel(3, 2), Some([0, 0, 0, 255]));
    assert_eq!(r.pixel(4, 0), None);
}

#[test]
fn zero_sized_canvas_is_rejected() {
    assert!(Raster::black(0, 4).is_err());
}

#[test]
fn from_rgba8_checks_length() {
    assert!(Raster::from_rgba8(2, 2, vec![0u8; 15]).is_err());
    assert!(Raster::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
}

#[test]
fn blit_places_source_at_offset_and_clips() {
    let mut dst = Raster::black(6, 2).unwrap();
    let src = Raster::filled(4, 2, Rgb8::WHITE).unwrap();
    dst.blit(&src, 4);
    assert_eq!(dst.pixel(3, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(4, 1), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(5, 0), Some([255, 255, 255, 255]));
}

#[test]
fn vertical_line_covers_full_height() {
    let mut r = Raster::black(3, 3).unwrap();
    r.draw_vertical_line(1, Rgb8::new(128, 128, 128));
    for y in 0..3 {
        assert_eq!(r.pixel(1, y), Some([128, 128, 128, 255]));
        assert_eq!(r.pixel(0, y), Some([0, 0, 0, 255]));
    }
}

#[test]
fn png_round_trips_through_image() {
    let path = std::path::PathBuf::from("target")
        .join("unit_raster")
        .join("frame.png");
    let mut r = Raster::black(8, 4).unwrap();
    r.draw_vertical_line(2, Rgb8::WHITE);
    r.save_png(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (8, 4));
    assert_eq!(back.get_pixel(2, 3).0, [255, 255, 255, 255]);
}
