//! Two-stage conversion: the SVG is first loaded into a `usvg` tree, then the
//! tree is drawn and encoded with the `png` crate.

use crate::{BackendKind, Convert, ConvertError, Job};

#[derive(Debug, Clone, Copy, Default)]
pub struct UsvgBackend;

impl Convert for UsvgBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Usvg
    }

    fn available(&self) -> bool {
        cfg!(feature = "usvg")
    }

    #[cfg(feature = "usvg")]
    fn convert(&self, job: &Job) -> Result<(), ConvertError> {
        let drawing = Drawing::load(&job.input)?;
        drawing.write_png(&job.output, job.size)?;
        Ok(())
    }

    #[cfg(not(feature = "usvg"))]
    fn convert(&self, _job: &Job) -> Result<(), ConvertError> {
        Err(ConvertError::Unavailable(String::from(
            "built without the usvg feature",
        )))
    }
}

#[cfg(feature = "usvg")]
pub use drawing::Drawing;

#[cfg(feature = "usvg")]
mod drawing {
    use anyhow::{Context, Result};
    use resvg::{tiny_skia, usvg};
    use std::{fs::File, io::BufWriter, path::Path};
    use tracing::debug;

    /// A parsed vector document, independent of any output resolution.
    pub struct Drawing {
        tree: usvg::Tree,
    }

    impl Drawing {
        pub fn load(path: &Path) -> Result<Self> {
            let data =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let tree = usvg::Tree::from_data(&data, &crate::svg_options(path))
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(Self { tree })
        }

        /// The document's intrinsic size in user units.
        pub fn size(&self) -> (f32, f32) {
            let size = self.tree.size();
            (size.width(), size.height())
        }

        /// Draw into a `size`×`size` straight-alpha RGBA buffer.
        pub fn rasterize(&self, size: u32) -> Result<Vec<u8>> {
            let (width, height) = self.size();
            let mut pixmap = tiny_skia::Pixmap::new(size, size)
                .with_context(|| format!("Failed to allocate a {size}x{size} pixmap"))?;
            let transform =
                tiny_skia::Transform::from_scale(size as f32 / width, size as f32 / height);
            resvg::render(&self.tree, transform, &mut pixmap.as_mut());

            Ok(pixmap
                .pixels()
                .iter()
                .flat_map(|pixel| {
                    let color = pixel.demultiply();
                    [color.red(), color.green(), color.blue(), color.alpha()]
                })
                .collect())
        }

        pub fn write_png(&self, path: &Path, size: u32) -> Result<()> {
            let data = self.rasterize(size)?;
            debug!(size, path = %path.display(), "Encoding PNG");

            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut encoder = png::Encoder::new(BufWriter::new(file), size, size);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
            writer.finish()?;
            Ok(())
        }
    }
}

#[cfg(all(test, feature = "usvg"))]
mod tests {
    use super::*;

    const CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><circle cx="16" cy="16" r="8" fill="#1989fa" fill-opacity="0.5"/></svg>"##;

    const IMAGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="32" height="32"><image x="0" y="0" width="32" height="32" xlink:href="dot.png"/></svg>"##;

    #[test]
    fn test_available() {
        assert!(UsvgBackend.available());
    }

    #[test]
    fn test_relative_image_resolves_next_to_input() {
        let tmp = tempfile::tempdir().unwrap();
        let mut dot = resvg::tiny_skia::Pixmap::new(4, 4).unwrap();
        dot.fill(resvg::tiny_skia::Color::from_rgba8(25, 137, 250, 255));
        dot.save_png(tmp.path().join("dot.png")).unwrap();

        let input = tmp.path().join("in.svg");
        std::fs::write(&input, IMAGE).unwrap();

        let data = Drawing::load(&input).unwrap().rasterize(32).unwrap();
        let center = (16 * 32 + 16) * 4;
        assert_eq!(data[center + 3], 255);
    }

    #[test]
    fn test_drawing_size() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.svg");
        std::fs::write(&input, CIRCLE).unwrap();

        let drawing = Drawing::load(&input).unwrap();
        assert_eq!(drawing.size(), (32.0, 32.0));
    }

    #[test_log::test]
    fn test_convert() {
        let tmp = tempfile::tempdir().unwrap();
        let job = Job {
            input: tmp.path().join("in.svg"),
            output: tmp.path().join("out.png"),
            size: 96,
        };
        std::fs::write(&job.input, CIRCLE).unwrap();

        UsvgBackend.convert(&job).unwrap();

        let decoder = png::Decoder::new(std::fs::File::open(&job.output).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (96, 96));
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_rasterize_straight_alpha() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.svg");
        std::fs::write(&input, CIRCLE).unwrap();

        let data = Drawing::load(&input).unwrap().rasterize(32).unwrap();
        assert_eq!(data.len(), 32 * 32 * 4);

        // Center of the circle: color is not premultiplied
        let center = (16 * 32 + 16) * 4;
        let alpha = data[center + 3];
        assert!((120..=135).contains(&alpha), "alpha {alpha}");
        assert!(data[center + 2] >= 245, "blue {}", data[center + 2]);

        // Outside the circle
        assert_eq!(data[3], 0);
    }
}
