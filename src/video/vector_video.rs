use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        config::{MagnitudePolicy, OverlayStyle, VIDEO_MAX_VECTORS, VisualizationConfig},
        core::Rgb8,
        error::{MvError, MvResult},
    },
    reduce::reduce_with_policy,
    render::{
        caption::{CaptionRenderer, frame_captions},
        overlay::OverlayRenderer,
        raster::Raster,
    },
    vectors::{record::MotionVectorRecord, table::VectorTable},
    video::encode::{EncodeConfig, FfmpegEncoder},
};

/// Settings for [`render_vector_video`] and [`render_frame_png`].
#[derive(Clone, Debug, PartialEq)]
pub struct VectorVideoOpts {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Per-frame cap handed to the reducer.
    pub max_vectors: usize,
    pub policy: MagnitudePolicy,
    pub style: OverlayStyle,
    pub overwrite: bool,
    /// Draw the "Frame:" and "Vectors:" captions on video frames.
    pub captions: bool,
    /// Caption font file; see [`CaptionRenderer::discover`] for the fallbacks.
    pub caption_font: Option<PathBuf>,
}

impl Default for VectorVideoOpts {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 24,
            max_vectors: VIDEO_MAX_VECTORS,
            policy: MagnitudePolicy::default(),
            style: OverlayStyle::emphasized(),
            overwrite: true,
            captions: true,
            caption_font: None,
        }
    }
}

impl VectorVideoOpts {
    /// Default canvas with policy, video style and cap taken from `cfg`.
    pub fn from_config(cfg: &VisualizationConfig) -> Self {
        Self {
            max_vectors: cfg.max_vectors_per_frame,
            policy: cfg.policy,
            style: cfg.video_overlay,
            ..Self::default()
        }
    }

    /// Like [`VectorVideoOpts::from_config`] but with the side-by-side `overlay` style,
    /// used for single-frame PNGs.
    pub fn single_frame(cfg: &VisualizationConfig) -> Self {
        Self {
            style: cfg.overlay,
            ..Self::from_config(cfg)
        }
    }

    fn renderer(&self) -> OverlayRenderer {
        OverlayRenderer::new(self.policy, self.style)
    }
}

/// Counts reported after a video is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoSummary {
    /// Frames encoded.
    pub frames: u64,
    /// Arrows drawn over all frames.
    pub vectors_drawn: u64,
}

/// Vector counts for one painted frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintedFrame {
    /// Vectors kept by the reducer.
    pub reduced: usize,
    /// Vectors long enough to be drawn.
    pub drawn: usize,
}

/// Clear `canvas` to black, reduce `rows` and draw what survives.
pub fn paint_vector_frame<'a, I>(
    canvas: &mut Raster,
    rows: I,
    renderer: &OverlayRenderer,
    max_vectors: usize,
) -> MvResult<PaintedFrame>
where
    I: IntoIterator<Item = &'a MotionVectorRecord>,
{
    canvas.fill(Rgb8::BLACK);
    let reduced = reduce_with_policy(rows, max_vectors, renderer.policy());
    let drawn = renderer.draw(canvas, &reduced)?;
    Ok(PaintedFrame {
        reduced: reduced.len(),
        drawn,
    })
}

/// Paint one standalone-video frame: the overlay, then the frame number and the
/// reduced vector count in the top-left corner when `captions` is given.
pub fn paint_video_frame<'a, I>(
    canvas: &mut Raster,
    frame: u64,
    rows: I,
    renderer: &OverlayRenderer,
    captions: Option<&mut CaptionRenderer>,
    max_vectors: usize,
) -> MvResult<PaintedFrame>
where
    I: IntoIterator<Item = &'a MotionVectorRecord>,
{
    let painted = paint_vector_frame(canvas, rows, renderer, max_vectors)?;
    if let Some(c) = captions {
        c.draw(canvas, &frame_captions(frame, painted.reduced))?;
    }
    Ok(painted)
}

/// Encode one black frame with overlaid vectors per distinct frame number, ascending.
///
/// With `opts.captions` set and no usable font found, frames are encoded without
/// captions and a warning is logged. An explicitly configured font that fails to load
/// is an error.
#[tracing::instrument(skip_all, fields(out = %out.display()))]
pub fn render_vector_video(
    table: &VectorTable,
    out: &Path,
    opts: &VectorVideoOpts,
) -> MvResult<VideoSummary> {
    let by_frame = table.rows_by_frame();
    if by_frame.is_empty() {
        return Err(MvError::validation("no frames with motion vectors to render"));
    }

    let mut captions = if opts.captions {
        let found = CaptionRenderer::discover(opts.caption_font.as_deref(), Rgb8::WHITE)?;
        if found.is_none() {
            tracing::warn!("no caption font found; rendering frames without captions");
        }
        found
    } else {
        None
    };

    let mut encoder = FfmpegEncoder::new(EncodeConfig {
        width: opts.width,
        height: opts.height,
        fps: opts.fps,
        out_path: out.to_path_buf(),
        overwrite: opts.overwrite,
    })?;

    let renderer = opts.renderer();
    let mut canvas = Raster::black(opts.width, opts.height)?;
    let mut summary = VideoSummary::default();
    let total = by_frame.len();

    for (i, (&frame, rows)) in by_frame.iter().enumerate() {
        let painted = paint_video_frame(
            &mut canvas,
            frame,
            rows.iter().copied(),
            &renderer,
            captions.as_mut(),
            opts.max_vectors,
        )?;
        encoder.encode_frame(&canvas)?;
        summary.vectors_drawn += painted.drawn as u64;
        if (i + 1) % 100 == 0 {
            tracing::info!(frame, done = i + 1, total, "rendering vector video");
        }
    }

    summary.frames = encoder.finish()?;
    Ok(summary)
}

/// Render a single frame's overlay to a PNG. A frame with no rows gives a black image.
#[tracing::instrument(skip_all, fields(frame = frame, out = %out.display()))]
pub fn render_frame_png(
    table: &VectorTable,
    frame: u64,
    out: &Path,
    opts: &VectorVideoOpts,
) -> MvResult<usize> {
    let frames = table.frame_numbers();
    if frames.binary_search(&frame).is_err() {
        tracing::warn!(
            frame,
            first = ?frames.first(),
            last = ?frames.last(),
            "frame not present in table"
        );
    }
    let rows = table
        .records()
        .iter()
        .filter(|r| r.frame_number() == Some(frame));

    let mut canvas = Raster::black(opts.width, opts.height)?;
    let drawn = paint_vector_frame(&mut canvas, rows, &opts.renderer(), opts.max_vectors)?.drawn;
    if drawn == 0 {
        tracing::warn!(frame, "no drawable vectors in frame");
    }
    canvas.save_png(out)?;
    Ok(drawn)
}

#[cfg(test)]
#[path = "../../tests/unit/video/vector_video.rs"]
mod tests;
