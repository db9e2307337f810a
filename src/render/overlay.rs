use std::f64::consts::FRAC_PI_4;

use kurbo::{BezPath, Circle, PathEl, Point, Shape as _, Vec2};

use crate::{
    foundation::{
        config::{MagnitudePolicy, OverlayStyle},
        core::Rgb8,
        error::{MvError, MvResult},
    },
    reduce::ReducedVector,
    render::{composite::over_in_place, raster::Raster},
};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// Draws reduced vector sets as tier-colored arrows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayRenderer {
    policy: MagnitudePolicy,
    style: OverlayStyle,
}

impl OverlayRenderer {
    /// Renderer with explicit break points and style.
    pub fn new(policy: MagnitudePolicy, style: OverlayStyle) -> Self {
        Self { policy, style }
    }

    /// Break points in use.
    pub fn policy(&self) -> &MagnitudePolicy {
        &self.policy
    }

    /// Style in use.
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Draw every vector whose record magnitude is at least `draw_min_px` onto `canvas`.
    ///
    /// Tiers come from [`MotionVectorRecord::magnitude`](crate::MotionVectorRecord::magnitude)
    /// of each record, not from [`ReducedVector::magnitude`]. Each vector becomes an arrow
    /// from `(src_x, src_y)` to `(dst_x, dst_y)` in its tier color plus a filled marker
    /// at the origin. Coordinates are used as given, truncated to whole pixels. Returns how many vectors were drawn.
    pub fn draw(&self, canvas: &mut Raster, vectors: &[ReducedVector]) -> MvResult<usize> {
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MvError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MvError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let mut drawn = 0usize;

        for v in vectors {
            let Some(tier) = self.policy.tier(v.record.magnitude()) else {
                continue;
            };
            let tier_style = self.style.for_tier(tier);
            let r = &v.record;
            let src = pixel_center(r.src_x, r.src_y);
            let dst = pixel_center(r.dst_x, r.dst_y);

            ctx.set_paint(color_to_cpu(tier_style.color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(tier_style.thickness));
            ctx.stroke_path(&bezpath_to_cpu(&arrow_path(src, dst, self.style.tip_ratio)));

            if self.style.marker_radius > 0.0 {
                let marker = Circle::new(src, self.style.marker_radius).to_path(CIRCLE_TOLERANCE);
                ctx.set_paint(color_to_cpu(self.style.marker_color));
                ctx.fill_path(&bezpath_to_cpu(&marker));
            }
            drawn += 1;
        }

        if drawn == 0 {
            return Ok(0);
        }

        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        over_in_place(&mut canvas.data, layer.data_as_u8_slice())?;

        tracing::trace!(drawn, "overlay drawn");
        Ok(drawn)
    }
}

/// Draw with the default break points and the standard style.
pub fn draw_motion_vectors(canvas: &mut Raster, vectors: &[ReducedVector]) -> MvResult<usize> {
    OverlayRenderer::default().draw(canvas, vectors)
}

/// Shaft from `src` to `dst` plus two head strokes of `tip_ratio * length` at ±45°.
pub fn arrow_path(src: Point, dst: Point, tip_ratio: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(src);
    path.line_to(dst);

    let back: Vec2 = src - dst;
    let len = back.hypot();
    if len > 0.0 && tip_ratio > 0.0 {
        let tip = len * tip_ratio;
        let angle = back.atan2();
        for a in [angle + FRAC_PI_4, angle - FRAC_PI_4] {
            path.move_to(dst + Vec2::from_angle(a) * tip);
            path.line_to(dst);
        }
    }
    path
}

fn pixel_center(x: f64, y: f64) -> Point {
    Point::new(x.trunc() + 0.5, y.trunc() + 0.5)
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
