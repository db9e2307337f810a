use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Rgb8},
    error::{MvError, MvResult},
};

/// An RGBA8 frame buffer (premultiplied; opaque in practice).
///
/// Canvases are reused across frames by the video generators, so every drawing entry
/// point mutates in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Raster {
    /// A canvas filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> MvResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let mut data = vec![0u8; canvas.rgba_len()];
        fill_rgba(&mut data, color.to_rgba8());
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An opaque black canvas.
    pub fn black(width: u32, height: u32) -> MvResult<Self> {
        Self::filled(width, height, Rgb8::BLACK)
    }

    /// Wrap decoded RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> MvResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if data.len() != canvas.rgba_len() {
            return Err(MvError::render(format!(
                "rgba8 buffer has {} bytes, expected {} for {width}x{height}",
                data.len(),
                canvas.rgba_len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Repaint the whole canvas.
    pub fn fill(&mut self, color: Rgb8) {
        fill_rgba(&mut self.data, color.to_rgba8());
    }

    /// Pixel at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = self.offset(x, y);
        let px = &self.data[off..off + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy `src` into this canvas with its left edge at column `x_offset`. Columns past
    /// the right edge and rows past the bottom edge are clipped.
    pub fn blit(&mut self, src: &Raster, x_offset: u32) {
        if x_offset >= self.width {
            return;
        }
        let cols = src.width.min(self.width - x_offset) as usize;
        let rows = src.height.min(self.height);
        for y in 0..rows {
            let s = src.offset(0, y);
            let d = self.offset(x_offset, y);
            self.data[d..d + cols * 4].copy_from_slice(&src.data[s..s + cols * 4]);
        }
    }

    /// Paint the one-pixel column `x` with `color`.
    pub fn draw_vertical_line(&mut self, x: u32, color: Rgb8) {
        if x >= self.width {
            return;
        }
        let rgba = color.to_rgba8();
        for y in 0..self.height {
            let off = self.offset(x, y);
            self.data[off..off + 4].copy_from_slice(&rgba);
        }
    }

    /// Write the canvas as a PNG, creating the parent directory.
    pub fn save_png(&self, path: &Path) -> MvResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn fill_rgba(data: &mut [u8], rgba: [u8; 4]) {
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
