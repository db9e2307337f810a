use super::*;

const SAMPLE: &str = "\
Running 9 methods on clip.mp4 with 3 streams
Method | Time/Frame | FPS | CPU | Mem | MVs | Frames | HighProfile
-----------------------------------------------------------------
FFmpeg Decode | 1.25 ms | 800.0 | 95.5% | 20480 | 123456 | 300 | 1
LIVE555 Parser | 0.40 ms | 2500 | 12% | 4096 | 0 | 300 | 0

Custom Extractor | n/a | 0 | 0% | 0 | 0 | 0 | 1
Short | 1 | 2
——————————
Motion Only | 0.9ms | 1111.1 | 80% | 10000 | 99 | 300 | 1
";

#[test]
fn parses_table_rows_and_strips_units() {
    let rows = parse_benchmark_output(SAMPLE, 3);
    assert_eq!(rows.len(), 3);

    let first = &rows[0];
    assert_eq!(first.method, "FFmpeg Decode");
    assert_eq!(first.streams, 3);
    assert_eq!(first.time_per_frame, 1.25);
    assert_eq!(first.cpu, 95.5);
    assert_eq!(first.memory, 20480.0);
    assert_eq!(first.mvs, 123_456);
    assert_eq!(first.frames, 300);
    assert!(first.is_high_profile());

    assert!(!rows[1].is_high_profile());
    assert_eq!(rows[2].method, "Motion Only");
    assert_eq!(rows[2].time_per_frame, 0.9);
}

#[test]
fn lines_before_header_are_ignored() {
    let text = "A | 1 | 2 | 3 | 4 | 5 | 6 | 1\n";
    assert!(parse_benchmark_output(text, 1).is_empty());
}

#[test]
fn no_header_means_no_rows() {
    assert!(parse_benchmark_output("", 1).is_empty());
    assert!(parse_benchmark_output("nothing to see\n", 1).is_empty());
}
