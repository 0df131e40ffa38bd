use anyhow::{Context, Result};
use std::path::Path;
use tiny_skia::{BlendMode, FillRule, Paint, Path as SkiaPath, PathBuilder, Pixmap, Rect, Transform};
use tracing::{debug, trace};

use crate::Rgba;

/// Inclusive device-space bounds: both `x1` and `y1` are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The square bounding a circle.
    pub const fn around(cx: i32, cy: i32, radius: i32) -> Self {
        Self::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }

    pub const fn inset(&self, by: i32) -> Self {
        Self::new(self.x0 + by, self.y0 + by, self.x1 - by, self.y1 - by)
    }

    /// Covers pixel centers `x0..=x1` and `y0..=y1`, or `None` when empty.
    fn to_rect(self) -> Option<Rect> {
        Rect::from_ltrb(
            self.x0 as f32,
            self.y0 as f32,
            (self.x1 + 1) as f32,
            (self.y1 + 1) as f32,
        )
    }
}

/// An RGBA raster that shapes are drawn onto.
///
/// Drawing is aliased and replaces pixels: a translucent fill is written
/// as-is rather than composited over what is already there.
pub struct Canvas {
    pixmap: Pixmap,
}

fn paint(color: Rgba) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::Source;
    paint
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Failed to allocate a {width}x{height} canvas"))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba([color.red(), color.green(), color.blue(), color.alpha()]))
    }

    pub fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        let Some(rect) = bounds.to_rect() else {
            debug!(?bounds, "Skipping empty rectangle");
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color), Transform::identity(), None);
    }

    pub fn fill_ellipse(&mut self, bounds: Bounds, color: Rgba) {
        let Some(path) = bounds.to_rect().and_then(PathBuilder::from_oval) else {
            debug!(?bounds, "Skipping empty ellipse");
            return;
        };
        self.fill_path(&path, FillRule::Winding, color);
    }

    /// Draw an ellipse outline of the given width inside `bounds`.
    pub fn stroke_ellipse(&mut self, bounds: Bounds, width: i32, color: Rgba) {
        if width <= 0 {
            debug!(?bounds, "Skipping zero-width outline");
            return;
        }
        let Some(outer) = bounds.to_rect() else {
            debug!(?bounds, "Skipping empty outline");
            return;
        };

        let mut builder = PathBuilder::new();
        builder.push_oval(outer);
        // Outlines thicker than the radius degenerate into a filled ellipse
        if let Some(inner) = bounds.inset(width).to_rect() {
            builder.push_oval(inner);
        }
        if let Some(path) = builder.finish() {
            self.fill_path(&path, FillRule::EvenOdd, color);
        }
    }

    /// Draw a rectangle with circular corners of the given radius.
    ///
    /// Composed of two overlapping rectangles covering the straight edges and
    /// four corner circles covering the rounding.
    pub fn fill_rounded_rect(&mut self, bounds: Bounds, radius: i32, color: Rgba) {
        let Bounds { x0, y0, x1, y1 } = bounds;
        let r = radius;
        let d = radius * 2;

        self.fill_rect(Bounds::new(x0 + r, y0, x1 - r, y1), color);
        self.fill_rect(Bounds::new(x0, y0 + r, x1, y1 - r), color);

        self.fill_ellipse(Bounds::new(x0, y0, x0 + d, y0 + d), color);
        self.fill_ellipse(Bounds::new(x1 - d, y0, x1, y0 + d), color);
        self.fill_ellipse(Bounds::new(x0, y1 - d, x0 + d, y1), color);
        self.fill_ellipse(Bounds::new(x1 - d, y1 - d, x1, y1), color);
    }

    fn fill_path(&mut self, path: &SkiaPath, rule: FillRule, color: Rgba) {
        self.pixmap
            .fill_path(path, &paint(color), rule, Transform::identity(), None);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().context("Failed to encode PNG")
    }

    /// Write the canvas as a PNG file, replacing any existing file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.encode_png()?;
        trace!(bytes = data.len(), "Encoded canvas");
        std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
    }
}
