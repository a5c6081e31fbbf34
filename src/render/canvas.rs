use kurbo::{Affine, BezPath, Point};

use crate::assets::store::ImagePaint;
use crate::config::color::Rgba;
use crate::foundation::error::{PlacardError, PlacardResult};

/// One rendered frame in RGBA8 (premultiplied; fully covered by the opaque
/// background in practice).
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixel bytes.
    pub data: Vec<u8>,
}

/// A drawing surface exposing the normalized [0,1]x[0,1] coordinate space the
/// layout tables are written in, backed by a `vello_cpu` render context.
///
/// A canvas is created fresh per render call, exclusively owned by it, and
/// consumed by [`Canvas::finish`]. Transform and clip state is scoped through
/// [`Canvas::saved`], which restores on every exit path so no draw step can
/// leak local state into later draws.
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u32,
    height: u32,
    width_u16: u16,
    height_u16: u16,
    /// Maps normalized space onto pixel space.
    base: Affine,
    /// Current user-space transform, composed under `base`.
    cur: Affine,
    open_clips: usize,
    stack: Vec<SavedState>,
}

struct SavedState {
    cur: Affine,
    open_clips: usize,
}

impl Canvas {
    /// Create a canvas of the given pixel size with a white background.
    pub fn new(width: u32, height: u32) -> PlacardResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| PlacardError::validation("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| PlacardError::validation("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(PlacardError::validation("canvas size must be positive"));
        }

        let mut canvas = Self {
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            width,
            height,
            width_u16,
            height_u16,
            base: Affine::scale_non_uniform(f64::from(width), f64::from(height)),
            cur: Affine::IDENTITY,
            open_clips: 0,
            stack: Vec::new(),
        };

        let full = rect_path(1.0, 1.0);
        canvas.fill(&full, Rgba::WHITE);
        Ok(canvas)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Run `f` with the current transform and clip state saved; both are
    /// restored afterwards whether `f` succeeds or fails. Scopes nest.
    pub fn saved<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PlacardResult<R>,
    ) -> PlacardResult<R> {
        self.stack.push(SavedState {
            cur: self.cur,
            open_clips: self.open_clips,
        });

        let out = f(self);

        let saved = self
            .stack
            .pop()
            .expect("save/restore is strictly paired by construction");
        while self.open_clips > saved.open_clips {
            self.ctx.pop_layer();
            self.open_clips -= 1;
        }
        self.cur = saved.cur;
        out
    }

    /// Append a translation to the user-space transform.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.cur = self.cur * Affine::translate((x, y));
    }

    /// Append a (possibly non-uniform) scale to the user-space transform.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.cur = self.cur * Affine::scale_non_uniform(sx, sy);
    }

    /// Intersect the clip region with `path` (interpreted in the current
    /// user space). Undone when the enclosing [`Canvas::saved`] scope exits.
    pub fn clip(&mut self, path: &BezPath) {
        self.ctx.set_transform(affine_to_cpu(self.device()));
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.open_clips += 1;
    }

    /// Fill `path` with a straight-alpha color.
    pub fn fill(&mut self, path: &BezPath, color: Rgba) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.device()));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Stroke `path` with the given user-space line width.
    pub fn stroke(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.device()));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Paint an image with its top-left corner at the user-space origin, one
    /// source pixel per user-space unit (callers scale the space first).
    pub fn draw_image(&mut self, image: &ImagePaint) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.device()));
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
    }

    /// Fill one shaped glyph run at `anchor`.
    ///
    /// Glyph coordinates are in pixels at `size_px`; the transform maps them
    /// so that `size_px = s * canvas_height` reproduces a normalized font
    /// size of `s`, including the canvas's non-uniform x stretch.
    pub fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size_px: f32,
        anchor: Point,
        color: Rgba,
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
    ) {
        let to_px = self.device()
            * Affine::translate((anchor.x, anchor.y))
            * Affine::scale(1.0 / f64::from(self.height));

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(to_px));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx
            .glyph_run(font)
            .font_size(size_px)
            .fill_glyphs(glyphs);
    }

    /// Rasterize and consume the canvas.
    pub fn finish(mut self) -> FrameRGBA {
        while self.open_clips > 0 {
            self.ctx.pop_layer();
            self.open_clips -= 1;
        }

        let mut pixmap = vello_cpu::Pixmap::new(self.width_u16, self.height_u16);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        FrameRGBA {
            width: self.width,
            height: self.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    fn device(&self) -> Affine {
        self.base * self.cur
    }
}

/// Axis-aligned rectangle path from the origin, in normalized units.
pub fn rect_path(w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((w, 0.0));
    path.line_to((w, h));
    path.line_to((0.0, h));
    path.close_path();
    path
}

fn color_to_cpu(color: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
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
