//! mvscope compares, reduces and visualizes motion vectors exported by several
//! extraction methods.
//!
//! - Load a per-method CSV into a [`VectorTable`]
//! - Diff two tables over a [`FrameRange`] with [`compare_frames`]
//! - Bound a frame's vectors with [`reduce`] and draw them with [`OverlayRenderer`]
//! - Write overlay videos through the [`video`] module, or drive benchmark sweeps via
//!   [`bench`]
#![forbid(unsafe_code)]

mod foundation;

/// Benchmark executable driver.
pub mod bench;
/// Frame-by-frame comparison of two tables.
pub mod compare;
pub mod merge;
pub mod reduce;
/// Overlay rasterization.
pub mod render;
/// CSV loading and the record model.
pub mod vectors;
pub mod video;

pub use crate::foundation::config::{
    DEFAULT_MAX_VECTORS, MAX_VECTORS_ENV, MagnitudePolicy, MagnitudeTier, OverlayStyle,
    TierStyle, VIDEO_MAX_VECTORS, VisualizationConfig,
};
pub use crate::foundation::core::{Canvas, FrameRange, Rgb8};
pub use crate::foundation::error::{MvError, MvResult};

pub use crate::bench::runner::{
    BenchmarkInvocation, SweepOutcome, fastest_per_stream, prune_stream_outputs,
    run_benchmark, run_sweep, stream_run_steps,
};
pub use crate::bench::table::{BenchmarkRow, parse_benchmark_output};
pub use crate::compare::differ::{Discrepancy, compare_frames};
pub use crate::compare::report::ComparisonReport;
pub use crate::merge::merge_method_outputs;
pub use crate::reduce::{ReducedVector, reduce, reduce_with_policy};
pub use crate::render::caption::{Caption, CaptionRenderer, frame_captions};
pub use crate::render::overlay::{OverlayRenderer, draw_motion_vectors};
pub use crate::render::raster::Raster;
pub use crate::vectors::cell::Cell;
pub use crate::vectors::record::{Column, MotionVectorRecord};
pub use crate::vectors::table::{FrameLookup, VectorTable};
pub use crate::video::combined::{CombinedVideoOpts, render_combined_video};
pub use crate::video::vector_video::{
    PaintedFrame, VectorVideoOpts, VideoSummary, paint_video_frame, render_frame_png,
    render_vector_video,
};
