use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::{DESIGN_GRID, icon::Fill};

#[derive(Serialize, Debug)]
#[serde(rename = "svg")]
pub struct Svg {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
    #[serde(rename = "@viewBox")]
    pub view_box: String,
    #[serde(rename = "$value")]
    pub elements: Vec<Element>,
}

impl Svg {
    /// An empty document spanning the design grid, displayed at `size` pixels.
    pub fn new(size: u32) -> Self {
        Self {
            xmlns: "http://www.w3.org/2000/svg",
            width: size,
            height: size,
            view_box: format!("0 0 {DESIGN_GRID} {DESIGN_GRID}"),
            elements: Vec::new(),
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        quick_xml::se::to_string(self).context("Failed to serialize SVG")
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_xml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[derive(Serialize, Debug, Clone)]
pub enum Element {
    #[serde(rename = "rect")]
    Rect(Rect),
    #[serde(rename = "circle")]
    Circle(Circle),
}

#[derive(Serialize, Debug, Clone)]
pub struct Rect {
    #[serde(rename = "@x")]
    pub x: u32,
    #[serde(rename = "@y")]
    pub y: u32,
    #[serde(rename = "@width")]
    pub width: u32,
    #[serde(rename = "@height")]
    pub height: u32,
    #[serde(rename = "@rx", skip_serializing_if = "Option::is_none")]
    pub rx: Option<u32>,
    #[serde(rename = "@fill")]
    pub fill: String,
    #[serde(rename = "@fill-opacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<String>,
}

impl Rect {
    pub(crate) fn new([x0, y0, x1, y1]: [u32; 4], rx: Option<u32>, fill: Fill) -> Result<Self> {
        Ok(Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
            rx,
            fill: fill.color()?.hex(),
            fill_opacity: None,
        })
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Circle {
    #[serde(rename = "@cx")]
    pub cx: u32,
    #[serde(rename = "@cy")]
    pub cy: u32,
    #[serde(rename = "@r")]
    pub r: u32,
    #[serde(rename = "@fill")]
    pub fill: String,
    #[serde(rename = "@fill-opacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<String>,
    #[serde(rename = "@stroke", skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(rename = "@stroke-width", skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<u32>,
}
