use std::path::PathBuf;
use tickicon_convert::BackendKind;

pub mod backends;
pub mod convert;
pub mod draw;

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Commands {
    /// Draw the checklist icon from its built-in design
    Draw(DrawArgs),

    /// Rasterize an SVG file with the first converter backend that works
    Convert(ConvertArgs),

    /// List converter backends and whether they can run here
    Backends(ToolArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DrawArgs {
    /// Where to write the PNG
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Side length of the icon in pixels
    #[clap(long)]
    pub size: Option<u32>,

    /// Also write the design as an SVG document
    #[clap(long)]
    pub svg: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// The SVG file to rasterize
    #[clap(long)]
    pub input: Option<PathBuf>,

    /// Where to write the PNG
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Side length of the output in pixels
    #[clap(long)]
    pub size: Option<u32>,

    /// Backend to try; repeat to try several in the given order
    #[clap(long = "backend", value_enum)]
    pub backends: Vec<BackendKind>,

    #[clap(flatten)]
    pub tools: ToolArgs,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Path or name of the Inkscape executable
    #[clap(long)]
    pub inkscape: Option<PathBuf>,

    /// Path or name of the ImageMagick executable
    #[clap(long)]
    pub magick: Option<PathBuf>,
}

impl ToolArgs {
    /// Override the configured tool locations with those given on the command
    /// line.
    pub fn apply(self, config: &mut crate::config::ConvertConfig) {
        if let Some(inkscape) = self.inkscape {
            config.inkscape = inkscape;
        }
        if let Some(magick) = self.magick {
            config.magick = magick;
        }
    }
}
