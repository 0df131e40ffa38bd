use anyhow::Result;
use tracing::{debug, info};

use crate::{
    Rgba,
    canvas::{Bounds, Canvas},
    resolve_paint, scale,
    svg::{Circle, Element, Rect, Svg},
};

/// An SVG paint value plus the alpha it is drawn with.
#[derive(Debug, Clone, Copy)]
pub struct Fill {
    pub paint: &'static str,
    pub alpha: u8,
}

impl Fill {
    pub const fn solid(paint: &'static str) -> Self {
        Self { paint, alpha: 255 }
    }

    pub const fn translucent(paint: &'static str, alpha: u8) -> Self {
        Self { paint, alpha }
    }

    pub fn color(&self) -> Result<Rgba> {
        Ok(resolve_paint(self.paint)?.with_alpha(self.alpha))
    }

    fn opacity(&self) -> Option<String> {
        (self.alpha != 255).then(|| format!("{:.2}", f32::from(self.alpha) / 255.0))
    }
}

/// A primitive of the icon design, in design-grid units.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Rect {
        bounds: [u32; 4],
        fill: Fill,
    },
    RoundedRect {
        bounds: [u32; 4],
        radius: u32,
        fill: Fill,
    },
    Circle {
        center: [u32; 2],
        radius: u32,
        fill: Fill,
    },
    /// A circle outline drawn inside the circle's bounds.
    Ring {
        center: [u32; 2],
        radius: u32,
        width: u32,
        fill: Fill,
    },
}

const BRAND: &str = "#07c160";
const WHITE: &str = "#ffffff";
const GRAY: &str = "#969799";
const BLUE: &str = "#1989fa";
const DARK: &str = "#323233";

#[rustfmt::skip]
const ICON: [Shape; 14] = [
    // Background panel, painted with a gradient in the source artwork
    Shape::RoundedRect { bounds: [64, 64, 960, 960], radius: 180, fill: Fill::solid("url(#bg)") },

    // Card and its header bar
    Shape::RoundedRect { bounds: [220, 280, 804, 800], radius: 60, fill: Fill::solid(WHITE) },
    Shape::RoundedRect { bounds: [220, 280, 804, 380], radius: 60, fill: Fill::solid(BRAND) },
    Shape::Rect { bounds: [220, 340, 804, 380], fill: Fill::solid(BRAND) },

    // Done
    Shape::Circle { center: [320, 460], radius: 40, fill: Fill::solid(BRAND) },
    Shape::Circle { center: [320, 460], radius: 15, fill: Fill::solid(WHITE) },
    Shape::RoundedRect { bounds: [400, 440, 720, 460], radius: 10, fill: Fill::solid(GRAY) },

    // Done
    Shape::Circle { center: [320, 580], radius: 40, fill: Fill::solid(BRAND) },
    Shape::Circle { center: [320, 580], radius: 15, fill: Fill::solid(WHITE) },
    Shape::RoundedRect { bounds: [400, 560, 680, 580], radius: 10, fill: Fill::solid(GRAY) },

    // Pending
    Shape::Ring { center: [320, 700], radius: 40, width: 12, fill: Fill::solid(BLUE) },
    Shape::RoundedRect { bounds: [400, 680, 760, 700], radius: 10, fill: Fill::solid(DARK) },

    // Decoration
    Shape::Circle { center: [800, 220], radius: 30, fill: Fill::translucent(WHITE, 77) },
    Shape::Circle { center: [860, 280], radius: 20, fill: Fill::translucent(WHITE, 51) },
];

/// The shapes of the icon in painting order.
pub fn icon_shapes() -> &'static [Shape] {
    &ICON
}

impl Shape {
    /// Scale to a `size`×`size` canvas and draw.
    pub fn draw(&self, canvas: &mut Canvas, size: u32) -> Result<()> {
        let s = |value: u32| scale(value, size);
        let bounds = |[x0, y0, x1, y1]: [u32; 4]| Bounds::new(s(x0), s(y0), s(x1), s(y1));
        let circle = |[cx, cy]: [u32; 2], radius: u32| Bounds::around(s(cx), s(cy), s(radius));

        match *self {
            Shape::Rect { bounds: b, fill } => canvas.fill_rect(bounds(b), fill.color()?),
            Shape::RoundedRect {
                bounds: b,
                radius,
                fill,
            } => canvas.fill_rounded_rect(bounds(b), s(radius), fill.color()?),
            Shape::Circle {
                center,
                radius,
                fill,
            } => canvas.fill_ellipse(circle(center, radius), fill.color()?),
            Shape::Ring {
                center,
                radius,
                width,
                fill,
            } => canvas.stroke_ellipse(circle(center, radius), s(width), fill.color()?),
        }
        Ok(())
    }

    /// The equivalent SVG element in design-grid units.
    pub fn to_element(&self) -> Result<Element> {
        Ok(match *self {
            Shape::Rect { bounds, fill } => Element::Rect(Rect::new(bounds, None, fill)?),
            Shape::RoundedRect {
                bounds,
                radius,
                fill,
            } => Element::Rect(Rect::new(bounds, Some(radius), fill)?),
            Shape::Circle {
                center: [cx, cy],
                radius,
                fill,
            } => Element::Circle(Circle {
                cx,
                cy,
                r: radius,
                fill: fill.color()?.hex(),
                fill_opacity: fill.opacity(),
                stroke: None,
                stroke_width: None,
            }),
            Shape::Ring {
                center: [cx, cy],
                radius,
                width,
                fill,
            } => Element::Circle(Circle {
                cx,
                cy,
                // Keep the stroke inside the circle, as the raster does
                r: radius.saturating_sub(width / 2),
                fill: String::from("none"),
                fill_opacity: None,
                stroke: Some(fill.color()?.hex()),
                stroke_width: Some(width),
            }),
        })
    }
}

/// Draw the icon onto a new transparent `size`×`size` canvas.
pub fn render_icon(size: u32) -> Result<Canvas> {
    info!(size, "Rendering icon");

    let mut canvas = Canvas::new(size, size)?;
    for shape in icon_shapes() {
        debug!(?shape, "Drawing");
        shape.draw(&mut canvas, size)?;
    }
    Ok(canvas)
}

/// Build the icon as an SVG document of the given pixel size.
pub fn icon_svg(size: u32) -> Result<Svg> {
    let mut svg = Svg::new(size);
    for shape in icon_shapes() {
        svg.elements.push(shape.to_element()?);
    }
    Ok(svg)
}
