use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Rgb8,
        error::{MvError, MvResult},
    },
    render::{composite::over_in_place, raster::Raster},
};

/// Environment variable naming a TTF/OTF file for frame captions.
pub const CAPTION_FONT_ENV: &str = "MVSCOPE_CAPTION_FONT";

/// Fonts tried when no caption font is configured.
pub const SYSTEM_FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// One line of text anchored at its baseline-left point.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Left edge of the text, in pixels.
    pub x: f32,
    /// Baseline, in pixels.
    pub baseline: f32,
    pub size_px: f32,
}

/// The two captions of a standalone vector video frame: the frame number and the
/// number of vectors kept after reduction.
pub fn frame_captions(frame: u64, vectors: usize) -> [Caption; 2] {
    [
        Caption {
            text: format!("Frame: {frame}"),
            x: 50.0,
            baseline: 50.0,
            size_px: 40.0,
        },
        Caption {
            text: format!("Vectors: {vectors}"),
            x: 50.0,
            baseline: 100.0,
            size_px: 28.0,
        },
    ]
}

/// Shapes caption text with Parley and fills the glyphs through vello_cpu.
pub struct CaptionRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    color: Rgb8,
}

impl std::fmt::Debug for CaptionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionRenderer")
            .field("family_name", &self.family_name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl CaptionRenderer {
    /// Register `font_bytes` (first face) as the caption font.
    pub fn from_font_bytes(font_bytes: Vec<u8>, color: Rgb8) -> MvResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MvError::validation("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MvError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            color,
        })
    }

    /// Load a font file.
    pub fn from_path(path: &Path, color: Rgb8) -> MvResult<Self> {
        if !path.is_file() {
            return Err(MvError::file_not_found(path));
        }
        let bytes = std::fs::read(path)
            .with_context(|| format!("read caption font '{}'", path.display()))?;
        Self::from_font_bytes(bytes, color)
    }

    /// Resolve a caption font: `explicit`, then [`CAPTION_FONT_ENV`], then the first
    /// existing [`SYSTEM_FONT_CANDIDATES`] entry. `Ok(None)` when nothing is found.
    pub fn discover(explicit: Option<&Path>, color: Rgb8) -> MvResult<Option<Self>> {
        if let Some(p) = explicit {
            return Self::from_path(p, color).map(Some);
        }
        if let Some(p) = std::env::var_os(CAPTION_FONT_ENV).map(PathBuf::from) {
            return Self::from_path(&p, color).map(Some);
        }
        match SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
        {
            Some(p) => {
                tracing::debug!(font = %p.display(), "using system caption font");
                Self::from_path(p, color).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Fill `captions` onto `canvas` in the caption color.
    pub fn draw(&mut self, canvas: &mut Raster, captions: &[Caption]) -> MvResult<()> {
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MvError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MvError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for caption in captions.iter().filter(|c| !c.text.is_empty()) {
            if !caption.size_px.is_finite() || caption.size_px <= 0.0 {
                return Err(MvError::validation(
                    "caption size_px must be finite and > 0",
                ));
            }
            let layout = self.layout(caption);
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, 255,
                    ));

                    // Lines are placed so the first baseline sits on `caption.baseline`.
                    let dy = caption.baseline - line.metrics().baseline;
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: caption.x + g.x,
                        y: g.y + dy,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }

        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        over_in_place(&mut canvas.data, layer.data_as_u8_slice())
    }

    fn layout(&mut self, caption: &Caption) -> parley::Layout<Rgb8> {
        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &caption.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(caption.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(self.color));

        let mut layout: parley::Layout<Rgb8> = builder.build(&caption.text);
        layout.break_all_lines(None);
        layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
