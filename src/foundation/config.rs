use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::{
    core::Rgb8,
    error::{MvError, MvResult},
};

/// Reducer keeps vectors strictly longer than this (pixels).
pub const SIGNIFICANCE_PX: f64 = 2.0;
/// Renderer draws vectors at least this long (pixels, inclusive).
pub const DRAW_MIN_PX: f64 = 2.0;
/// Vectors longer than this are drawn in the medium tier.
pub const MEDIUM_ABOVE_PX: f64 = 10.0;
/// Vectors longer than this are drawn in the high tier.
pub const HIGH_ABOVE_PX: f64 = 20.0;

/// Default cap used by [`reduce`](crate::reduce) callers that do not pick their own.
pub const DEFAULT_MAX_VECTORS: usize = 10_000;
/// Per-frame cap used by the video generators.
pub const VIDEO_MAX_VECTORS: usize = 15_000;

/// Environment override for the per-frame vector cap of the video generators.
pub const MAX_VECTORS_ENV: &str = "MVSCOPE_MAX_VECTORS";

/// Magnitude break points shared by the reducer and the overlay renderer.
///
/// The reducer filter is strict (`> significance_px`) while the renderer threshold is
/// inclusive (`>= draw_min_px`); the two are separate stages and are kept separate here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MagnitudePolicy {
    /// Reducer significance threshold (strict).
    pub significance_px: f64,
    /// Lowest drawable magnitude (inclusive).
    pub draw_min_px: f64,
    /// Medium tier starts strictly above this.
    pub medium_above_px: f64,
    /// High tier starts strictly above this.
    pub high_above_px: f64,
}

impl Default for MagnitudePolicy {
    fn default() -> Self {
        Self {
            significance_px: SIGNIFICANCE_PX,
            draw_min_px: DRAW_MIN_PX,
            medium_above_px: MEDIUM_ABOVE_PX,
            high_above_px: HIGH_ABOVE_PX,
        }
    }
}

/// Display class of a drawn vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MagnitudeTier {
    /// `[draw_min, medium_above]`
    Low,
    /// `(medium_above, high_above]`
    Medium,
    /// `> high_above`
    High,
}

impl MagnitudePolicy {
    /// Reject non-finite or unordered break points.
    pub fn validate(&self) -> MvResult<()> {
        let all = [
            self.significance_px,
            self.draw_min_px,
            self.medium_above_px,
            self.high_above_px,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(MvError::validation(
                "magnitude thresholds must be finite and non-negative",
            ));
        }
        if !(self.draw_min_px <= self.medium_above_px && self.medium_above_px <= self.high_above_px)
        {
            return Err(MvError::validation(
                "magnitude thresholds must satisfy draw_min <= medium_above <= high_above",
            ));
        }
        Ok(())
    }

    /// Whether the reducer keeps a vector of this magnitude. NaN is never kept.
    pub fn is_significant(&self, magnitude: f64) -> bool {
        magnitude > self.significance_px
    }

    /// Tier for a magnitude, or `None` if it is below the drawing threshold (or NaN).
    pub fn tier(&self, magnitude: f64) -> Option<MagnitudeTier> {
        if magnitude.is_nan() || magnitude < self.draw_min_px {
            return None;
        }
        if magnitude > self.high_above_px {
            Some(MagnitudeTier::High)
        } else if magnitude > self.medium_above_px {
            Some(MagnitudeTier::Medium)
        } else {
            Some(MagnitudeTier::Low)
        }
    }
}

/// Stroke settings for one tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierStyle {
    /// Arrow color.
    pub color: Rgb8,
    /// Arrow stroke width in pixels.
    pub thickness: f64,
}

/// How the overlay renderer paints vectors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Low tier (white by default).
    pub low: TierStyle,
    /// Medium tier (yellow by default).
    pub medium: TierStyle,
    /// High tier (red by default).
    pub high: TierStyle,
    /// Fill color of the origin marker.
    pub marker_color: Rgb8,
    /// Radius of the origin marker in pixels.
    pub marker_radius: f64,
    /// Arrow tip length as a fraction of the arrow length.
    pub tip_ratio: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::standard()
    }
}

impl OverlayStyle {
    /// Thin single-pixel arrows with a small white marker, used for side-by-side output.
    pub fn standard() -> Self {
        Self {
            low: TierStyle {
                color: Rgb8::WHITE,
                thickness: 1.0,
            },
            medium: TierStyle {
                color: Rgb8::new(255, 255, 0),
                thickness: 1.0,
            },
            high: TierStyle {
                color: Rgb8::new(255, 0, 0),
                thickness: 1.0,
            },
            marker_color: Rgb8::WHITE,
            marker_radius: 1.0,
            tip_ratio: 0.3,
        }
    }

    /// Thicker arrows for stronger motion and a larger cyan marker, used for the
    /// standalone vector video.
    pub fn emphasized() -> Self {
        let base = Self::standard();
        Self {
            low: TierStyle {
                thickness: 1.0,
                ..base.low
            },
            medium: TierStyle {
                thickness: 2.0,
                ..base.medium
            },
            high: TierStyle {
                thickness: 3.0,
                ..base.high
            },
            marker_color: Rgb8::new(0, 255, 255),
            marker_radius: 3.0,
            tip_ratio: 0.3,
        }
    }

    /// Style for a tier.
    pub fn for_tier(&self, tier: MagnitudeTier) -> &TierStyle {
        match tier {
            MagnitudeTier::Low => &self.low,
            MagnitudeTier::Medium => &self.medium,
            MagnitudeTier::High => &self.high,
        }
    }

    /// Reject negative or non-finite sizes.
    pub fn validate(&self) -> MvResult<()> {
        let sizes = [
            self.low.thickness,
            self.medium.thickness,
            self.high.thickness,
            self.marker_radius,
            self.tip_ratio,
        ];
        if sizes.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(MvError::validation(
                "overlay sizes must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Everything the reducer and renderers need, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Magnitude break points.
    pub policy: MagnitudePolicy,
    /// Style for side-by-side segments and single-frame PNGs.
    pub overlay: OverlayStyle,
    /// Style for the standalone vector video.
    pub video_overlay: OverlayStyle,
    /// Per-frame cap applied before drawing.
    pub max_vectors_per_frame: usize,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            policy: MagnitudePolicy::default(),
            overlay: OverlayStyle::standard(),
            video_overlay: OverlayStyle::emphasized(),
            max_vectors_per_frame: VIDEO_MAX_VECTORS,
        }
    }
}

impl VisualizationConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> MvResult<Self> {
        let f = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MvError::file_not_found(path)
            } else {
                MvError::Other(anyhow::Error::new(e).context(format!(
                    "open visualization config '{}'",
                    path.display()
                )))
            }
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            MvError::parse(format!(
                "visualization config '{}': {e}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate every nested section.
    pub fn validate(&self) -> MvResult<()> {
        self.policy.validate()?;
        self.overlay.validate()?;
        self.video_overlay.validate()?;
        Ok(())
    }

    /// Apply [`MAX_VECTORS_ENV`] if it holds a positive integer.
    pub fn with_env_overrides(self) -> Self {
        let raw = std::env::var(MAX_VECTORS_ENV).ok();
        self.with_max_vectors_override(raw.as_deref())
    }

    /// Replace the per-frame cap with `raw` when it parses as a positive integer.
    pub fn with_max_vectors_override(mut self, raw: Option<&str>) -> Self {
        if let Some(n) = raw
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            tracing::debug!(max_vectors = n, "per-frame vector cap overridden");
            self.max_vectors_per_frame = n;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
