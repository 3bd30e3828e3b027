use crate::error::RenderError;
use crate::theme::Rgba;
use resvg::tiny_skia::{
    BlendMode, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, Transform,
};
use std::ops::{Deref, DerefMut};

/// Drawing surface with a current transform applied to every draw call.
pub struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        pixmap.fill(background.to_color());
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Concatenates `transform` onto the current one until the returned scope
    /// is dropped, whichever way the scope is left.
    pub fn scoped_transform(&mut self, transform: Transform) -> TransformScope<'_> {
        let saved = self.transform;
        self.transform = saved.pre_concat(transform);
        TransformScope {
            canvas: self,
            saved,
        }
    }

    /// Hard-edged square, used for grid cells.
    pub fn fill_square(&mut self, x: f32, y: f32, side: f32, color: Rgba) {
        let Some(rect) = Rect::from_xywh(x, y, side, side) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, self.transform, None);
    }

    /// Strokes an open polyline. Fewer than two points draw nothing.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: Rgba) {
        let Some((&(start_x, start_y), rest)) = points.split_first() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(start_x, start_y);
        for &(x, y) in rest {
            builder.line_to(x, y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color.to_color());
        paint.anti_alias = true;
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }

    /// Draws `icon` with its center on `(x, y)`.
    pub fn draw_centered(&mut self, icon: &Pixmap, x: f32, y: f32) {
        let left = x.floor() - (icon.width() / 2) as f32;
        let top = y.floor() - (icon.height() / 2) as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            icon.as_ref(),
            &paint,
            self.transform.pre_translate(left, top),
            None,
        );
    }

    /// Final presentation step: nearest-neighbour magnification by `factor`.
    pub fn upscale(self, factor: f32) -> Result<Pixmap, RenderError> {
        if factor == 1.0 {
            return Ok(self.pixmap);
        }
        let width = (self.pixmap.width() as f32 * factor).round().max(1.0) as u32;
        let height = (self.pixmap.height() as f32 * factor).round().max(1.0) as u32;
        let mut output =
            Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        output.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &paint,
            Transform::from_scale(factor, factor),
            None,
        );
        Ok(output)
    }
}

/// Restores the canvas transform it replaced when dropped.
pub struct TransformScope<'a> {
    canvas: &'a mut Canvas,
    saved: Transform,
}

impl Deref for TransformScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.canvas.transform = self.saved;
    }
}
