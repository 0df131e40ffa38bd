use crate::{BackendKind, Convert, ConvertError, Job};

/// Renders the SVG straight to a PNG of the requested dimensions with resvg.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgBackend;

impl Convert for ResvgBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Resvg
    }

    fn available(&self) -> bool {
        cfg!(feature = "resvg")
    }

    #[cfg(feature = "resvg")]
    fn convert(&self, job: &Job) -> Result<(), ConvertError> {
        render(job)?;
        Ok(())
    }

    #[cfg(not(feature = "resvg"))]
    fn convert(&self, _job: &Job) -> Result<(), ConvertError> {
        Err(ConvertError::Unavailable(String::from(
            "built without the resvg feature",
        )))
    }
}

#[cfg(feature = "resvg")]
fn render(job: &Job) -> anyhow::Result<()> {
    use anyhow::Context;
    use resvg::{tiny_skia, usvg};
    use tracing::debug;

    let data = std::fs::read(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))?;

    let tree = usvg::Tree::from_data(&data, &crate::svg_options(&job.input))
        .context("Failed to parse SVG")?;

    let size = tree.size();
    debug!(width = size.width(), height = size.height(), "Parsed SVG");

    let mut pixmap = tiny_skia::Pixmap::new(job.size, job.size)
        .with_context(|| format!("Failed to allocate a {0}x{0} pixmap", job.size))?;
    let transform = tiny_skia::Transform::from_scale(
        job.size as f32 / size.width(),
        job.size as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(&job.output)
        .with_context(|| format!("Failed to write {}", job.output.display()))
}
