use std::path::Path;

use crate::{
    foundation::{
        config::{MagnitudePolicy, OverlayStyle, VIDEO_MAX_VECTORS, VisualizationConfig},
        core::Rgb8,
        error::{MvError, MvResult},
    },
    render::{overlay::OverlayRenderer, raster::Raster},
    vectors::{record::MotionVectorRecord, table::VectorTable},
    video::vector_video::{VideoSummary, paint_vector_frame},
};

/// Frames rendered when no cap is given.
pub const DEFAULT_MAX_FRAMES: u64 = 660;

/// Gray level of the one-pixel segment divider.
pub const DIVIDER_GRAY: u8 = 128;

/// Settings for [`render_combined_video`].
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedVideoOpts {
    /// Segment holding the source video; `None` puts it after every vector segment.
    pub video_segment_index: Option<usize>,
    /// Highest frame number rendered.
    pub max_frames: u64,
    pub max_vectors: usize,
    pub divider: Rgb8,
    pub policy: MagnitudePolicy,
    pub style: OverlayStyle,
    pub overwrite: bool,
}

impl Default for CombinedVideoOpts {
    fn default() -> Self {
        Self {
            video_segment_index: None,
            max_frames: DEFAULT_MAX_FRAMES,
            max_vectors: VIDEO_MAX_VECTORS,
            divider: Rgb8::new(DIVIDER_GRAY, DIVIDER_GRAY, DIVIDER_GRAY),
            policy: MagnitudePolicy::default(),
            style: OverlayStyle::standard(),
            overwrite: true,
        }
    }
}

impl CombinedVideoOpts {
    /// Defaults with policy, side-by-side style and cap taken from `cfg`.
    pub fn from_config(cfg: &VisualizationConfig) -> Self {
        Self {
            max_vectors: cfg.max_vectors_per_frame,
            policy: cfg.policy,
            style: cfg.overlay,
            ..Self::default()
        }
    }
}

/// Placement of `n` vector segments and one video segment in a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentLayout {
    /// Vector segments (one per table).
    pub tables: usize,
    /// Position of the video segment, `0..=tables`.
    pub video_index: usize,
    /// Width of every segment (the source width).
    pub segment_width: u32,
    /// Height of every segment (the source height).
    pub height: u32,
}

impl SegmentLayout {
    /// Lay out `tables + 1` segments of `segment_width x height`.
    pub fn new(
        tables: usize,
        video_index: Option<usize>,
        segment_width: u32,
        height: u32,
    ) -> MvResult<Self> {
        let video_index = video_index.unwrap_or(tables);
        if video_index > tables {
            return Err(MvError::argument(format!(
                "video segment index {video_index} is out of range for {} segments",
                tables + 1
            )));
        }
        if segment_width == 0 || height == 0 {
            return Err(MvError::validation("segment width/height must be non-zero"));
        }
        let layout = Self {
            tables,
            video_index,
            segment_width,
            height,
        };
        u32::try_from(layout.segments())
            .ok()
            .and_then(|n| n.checked_mul(segment_width))
            .ok_or_else(|| MvError::validation("combined frame is too wide"))?;
        Ok(layout)
    }

    /// Total segment count.
    pub fn segments(&self) -> usize {
        self.tables + 1
    }

    /// Width of the combined frame.
    pub fn combined_width(&self) -> u32 {
        self.segment_width * self.segments() as u32
    }

    /// Left edge of segment `i`.
    pub fn x_offset(&self, i: usize) -> u32 {
        self.segment_width * i as u32
    }

    /// Table drawn in segment `i`, or `None` for the video segment.
    pub fn table_for_segment(&self, i: usize) -> Option<usize> {
        match i.cmp(&self.video_index) {
            std::cmp::Ordering::Less => Some(i),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(i - 1),
        }
    }
}

/// Frames to render: `max(max csv frame, video frames)`, capped at `max_frames`.
pub fn combined_frame_count(max_csv_frame: u64, video_frames: u64, max_frames: u64) -> u64 {
    max_csv_frame.max(video_frames).min(max_frames)
}

/// Assemble one combined frame into `out`.
///
/// `video` is copied into its segment (black when `None`); every other segment shows
/// the reduced overlay of `frame_rows[table]` on black. A divider is drawn at the left
/// edge of every segment after the first. `scratch` must be one segment in size.
/// Returns the number of arrows drawn.
#[allow(clippy::too_many_arguments)]
pub fn compose_segments(
    out: &mut Raster,
    scratch: &mut Raster,
    layout: &SegmentLayout,
    video: Option<&Raster>,
    frame_rows: &[Vec<&MotionVectorRecord>],
    renderer: &OverlayRenderer,
    max_vectors: usize,
    divider: Rgb8,
) -> MvResult<usize> {
    if frame_rows.len() != layout.tables {
        return Err(MvError::validation(format!(
            "expected rows for {} tables, got {}",
            layout.tables,
            frame_rows.len()
        )));
    }

    out.fill(Rgb8::BLACK);
    let mut drawn = 0usize;
    for i in 0..layout.segments() {
        let x = layout.x_offset(i);
        match layout.table_for_segment(i) {
            None => {
                if let Some(v) = video {
                    out.blit(v, x);
                }
            }
            Some(t) => {
                drawn += paint_vector_frame(
                    scratch,
                    frame_rows[t].iter().copied(),
                    renderer,
                    max_vectors,
                )?
                .drawn;
                out.blit(scratch, x);
            }
        }
        if i > 0 {
            out.draw_vertical_line(x, divider);
        }
    }
    Ok(drawn)
}

/// Lay the vector tables and the source video side by side, one output frame per
/// frame number starting at 1.
#[cfg(feature = "media-ffmpeg")]
#[tracing::instrument(skip_all, fields(video = %video.display(), out = %out.display()))]
pub fn render_combined_video(
    tables: &[VectorTable],
    video: &Path,
    out: &Path,
    opts: &CombinedVideoOpts,
) -> MvResult<VideoSummary> {
    use std::collections::BTreeMap;

    use crate::video::{
        encode::{EncodeConfig, FfmpegEncoder},
        source::{VideoFrameReader, inspect_video},
    };

    let info = inspect_video(video)?;
    let layout = SegmentLayout::new(
        tables.len(),
        opts.video_segment_index,
        info.width,
        info.height,
    )?;

    let by_frame: Vec<BTreeMap<u64, Vec<&MotionVectorRecord>>> =
        tables.iter().map(VectorTable::rows_by_frame).collect();
    let max_csv_frame = tables
        .iter()
        .filter_map(VectorTable::max_frame)
        .max()
        .unwrap_or(0);
    let total = combined_frame_count(max_csv_frame, info.frame_count, opts.max_frames);
    if total == 0 {
        return Err(MvError::validation("nothing to render: no frames in csv or video"));
    }

    let mut encoder = FfmpegEncoder::new(EncodeConfig {
        width: layout.combined_width(),
        height: layout.height,
        fps: info.whole_fps(),
        out_path: out.to_path_buf(),
        overwrite: opts.overwrite,
    })?;
    let mut reader = VideoFrameReader::open(&info)?;
    let renderer = OverlayRenderer::new(opts.policy, opts.style);
    let mut combined = Raster::black(layout.combined_width(), layout.height)?;
    let mut scratch = Raster::black(layout.segment_width, layout.height)?;
    let mut summary = VideoSummary::default();

    for frame in 1..=total {
        let decoded = if frame <= info.frame_count {
            reader.next_frame()?
        } else {
            None
        };
        let rows: Vec<Vec<&MotionVectorRecord>> = by_frame
            .iter()
            .map(|m| m.get(&frame).cloned().unwrap_or_default())
            .collect();

        summary.vectors_drawn += compose_segments(
            &mut combined,
            &mut scratch,
            &layout,
            decoded.as_ref(),
            &rows,
            &renderer,
            opts.max_vectors,
            opts.divider,
        )? as u64;
        encoder.encode_frame(&combined)?;

        if frame % 30 == 0 {
            tracing::info!(frame, total, "rendering combined video");
        }
    }

    summary.frames = encoder.finish()?;
    Ok(summary)
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn render_combined_video(
    _tables: &[VectorTable],
    _video: &Path,
    _out: &Path,
    _opts: &CombinedVideoOpts,
) -> MvResult<VideoSummary> {
    Err(MvError::media(
        "combining with a source video requires the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/video/combined.rs"]
mod tests;
