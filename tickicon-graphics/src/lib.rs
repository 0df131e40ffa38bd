//! Procedural rendering of the tickicon checklist icon.
//!
//! The icon is described once in a 1024×1024 design grid and scaled down to
//! the requested canvas size with integer truncation.

use anyhow::{Result, bail};

pub mod canvas;
pub mod icon;
pub mod svg;

pub use canvas::Canvas;
pub use icon::{Shape, icon_shapes, icon_svg, render_icon};

/// Side length of the design grid.
pub const DESIGN_GRID: u32 = 1024;

/// Paint substituted for reference-style values such as `url(#bg)`.
pub const DEFAULT_PAINT: &str = "#07c160";

/// Convert a design-grid coordinate into a device coordinate for a canvas of
/// side `size`, rounding toward zero.
pub fn scale(value: u32, size: u32) -> i32 {
    (u64::from(value) * u64::from(size) / u64::from(DESIGN_GRID)) as i32
}

/// A straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// The `#rrggbb` form, without alpha.
    pub fn hex(&self) -> String {
        let [r, g, b, _] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Resolve an SVG paint value into a color.
///
/// Only hash-prefixed literals are understood. Paint server references
/// (`url(...)`) fall back to [`DEFAULT_PAINT`].
pub fn resolve_paint(value: &str) -> Result<Rgba> {
    let value = value.trim();
    if value.starts_with("url(") {
        return resolve_paint(DEFAULT_PAINT);
    }

    let Some(hex) = value.strip_prefix('#') else {
        bail!("Unsupported paint: {value}");
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid color literal: {value}");
    }

    let channel = |s: &str| u8::from_str_radix(s, 16);
    match hex.len() {
        6 => Ok(Rgba::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // #rgb expands each digit to a full byte
            let digit = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(Rgba::rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => bail!("Invalid color literal: {value}"),
    }
}
