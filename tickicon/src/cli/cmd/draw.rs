use anyhow::Result;
use std::process::ExitCode;
use tickicon_graphics::{icon_svg, render_icon};
use tracing::{error, info};
use validator::Validate;

use super::DrawArgs;
use crate::{
    cli::{print_banner, print_summary},
    config::{Config, DrawConfig},
};

impl DrawArgs {
    /// Merge into the configured settings.
    pub fn apply(self, mut config: DrawConfig) -> Result<DrawConfig> {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if self.svg.is_some() {
            config.svg = self.svg;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Render the icon and write it, plus the SVG export when requested.
pub fn draw(settings: &DrawConfig) -> Result<()> {
    let canvas = render_icon(settings.size)?;
    canvas.save_png(&settings.output)?;
    info!(path = %settings.output.display(), "Wrote icon");

    if let Some(svg) = &settings.svg {
        icon_svg(settings.size)?.write_to(svg)?;
        info!(path = %svg.display(), "Wrote SVG");
    }
    Ok(())
}

pub fn run(args: DrawArgs, config: &Config) -> ExitCode {
    let settings = match args.apply(config.draw.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid options: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    print_banner("Checklist icon renderer");

    match draw(&settings) {
        Ok(()) => {
            print_summary(&settings.output, settings.size);
            if let Some(svg) = &settings.svg {
                println!("SVG file: {}", svg.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_overrides() {
        let args = DrawArgs {
            output: Some(PathBuf::from("out.png")),
            size: Some(64),
            svg: None,
        };
        let settings = args.apply(DrawConfig::default()).unwrap();

        assert_eq!(settings.output, PathBuf::from("out.png"));
        assert_eq!(settings.size, 64);
        assert_eq!(settings.svg, None);
    }

    #[test]
    fn test_apply_rejects_zero_size() {
        let args = DrawArgs {
            size: Some(0),
            ..Default::default()
        };
        assert!(args.apply(DrawConfig::default()).is_err());
    }

    #[test_log::test]
    fn test_draw_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = DrawConfig {
            output: tmp.path().join("icon.png"),
            size: 144,
            svg: Some(tmp.path().join("icon.svg")),
        };

        draw(&settings).unwrap();

        assert!(settings.output.is_file());
        assert!(tmp.path().join("icon.svg").is_file());
    }

    #[test]
    fn test_draw_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = DrawConfig {
            output: tmp.path().join("assets/icon/icon.png"),
            ..Default::default()
        };

        assert!(draw(&settings).is_err());
        assert!(!tmp.path().join("assets").exists());
    }
}
