use crate::foundation::error::{MvError, MvResult};

/// Inclusive frame range `[start, end]` used by the comparison tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame, inclusive.
    pub start: u64,
    /// Last frame, inclusive.
    pub end: u64,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: u64, end: u64) -> MvResult<Self> {
        if start > end {
            return Err(MvError::argument(format!(
                "start_frame ({start}) must be <= end_frame ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered (always at least one).
    pub fn len_frames(self) -> u64 {
        self.end - self.start + 1
    }

    /// Iterate over every frame number in ascending order.
    pub fn frames(self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Pixel dimensions of a canvas or video stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> MvResult<Self> {
        if width == 0 || height == 0 {
            return Err(MvError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Byte length of an RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Straight (non-premultiplied) opaque RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// RGBA8 with full alpha; identical in straight and premultiplied form.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
