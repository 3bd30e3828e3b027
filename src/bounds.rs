use crate::error::RenderError;
use crate::snapshot::MapSnapshot;
use serde::Serialize;

/// Cropped map region in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }
}

/// Computes the box enclosing every layer's dimensions, padded on each axis by
/// `padding_ratio` of that axis's nominal extent.
///
/// A snapshot without layers falls back to the unpadded nominal extent.
pub fn compute_bounds(snapshot: &MapSnapshot, padding_ratio: f32) -> Result<Bounds, RenderError> {
    if snapshot.pixel_size <= 0 {
        return Err(RenderError::InvalidPixelSize(snapshot.pixel_size));
    }
    let pixel_size = snapshot.pixel_size as f32;
    let nominal_w = (snapshot.size.x as f32 / pixel_size).round() as i32;
    let nominal_h = (snapshot.size.y as f32 / pixel_size).round() as i32;

    let mut layers = snapshot.layers.iter().map(|layer| &layer.dimensions);
    let Some(first) = layers.next() else {
        return Ok(Bounds {
            min_x: 0,
            min_y: 0,
            max_x: nominal_w,
            max_y: nominal_h,
        });
    };

    let mut bounds = Bounds {
        min_x: first.x.min,
        min_y: first.y.min,
        max_x: first.x.max,
        max_y: first.y.max,
    };
    for dims in layers {
        bounds.min_x = bounds.min_x.min(dims.x.min);
        bounds.min_y = bounds.min_y.min(dims.y.min);
        bounds.max_x = bounds.max_x.max(dims.x.max);
        bounds.max_y = bounds.max_y.max(dims.y.max);
    }

    let pad_x = (nominal_w as f32 * padding_ratio).floor() as i32;
    let pad_y = (nominal_h as f32 * padding_ratio).floor() as i32;
    bounds.min_x = bounds.min_x.saturating_sub(pad_x);
    bounds.max_x = bounds.max_x.saturating_add(pad_x);
    bounds.min_y = bounds.min_y.saturating_sub(pad_y);
    bounds.max_y = bounds.max_y.saturating_add(pad_y);
    Ok(bounds)
}

/// Maps grid cells and millimeter coordinates onto the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub bounds: Bounds,
    pub pixel_size: f32,
    pub scale: f32,
}

impl Projection {
    pub fn new(bounds: Bounds, pixel_size: i32, scale: f32) -> Self {
        Self {
            bounds,
            pixel_size: pixel_size as f32,
            scale,
        }
    }

    /// Canvas size before the final upscale; never smaller than 1x1.
    pub fn canvas_size(&self) -> (u32, u32) {
        let width = (self.bounds.width().max(0) as f32 * self.scale).ceil();
        let height = (self.bounds.height().max(0) as f32 * self.scale).ceil();
        (width.max(1.0) as u32, height.max(1.0) as u32)
    }

    /// Top-left canvas corner of grid cell `(x, y)`. Cells outside the bounds
    /// land off-canvas rather than wrapping.
    pub fn cell_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (
            (x as f32 - self.bounds.min_x as f32) * self.scale,
            (y as f32 - self.bounds.min_y as f32) * self.scale,
        )
    }

    /// Canvas position of a point given in millimeters.
    pub fn project(&self, x_mm: i32, y_mm: i32) -> (f32, f32) {
        (
            (x_mm as f32 / self.pixel_size - self.bounds.min_x as f32) * self.scale,
            (y_mm as f32 / self.pixel_size - self.bounds.min_y as f32) * self.scale,
        )
    }
}
