use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tickicon_convert::{BackendKind, Tools};
use tracing::debug;
use validator::Validate;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "tickicon.toml";

/// Where generated icons go unless told otherwise.
pub const DEFAULT_PNG: &str = "assets/icon/xucheng.png";

/// The vector source converted by default.
pub const DEFAULT_SVG: &str = "assets/icon/xucheng.svg";

pub const DEFAULT_SIZE: u32 = 144;

#[derive(Deserialize, Validate, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[validate(nested)]
    pub draw: DrawConfig,

    #[validate(nested)]
    pub convert: ConvertConfig,
}

/// Settings for the procedural renderer.
#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct DrawConfig {
    pub output: PathBuf,

    #[validate(range(min = 1, max = 4096))]
    pub size: u32,

    /// Also export the design as SVG here
    pub svg: Option<PathBuf>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_PNG),
            size: DEFAULT_SIZE,
            svg: None,
        }
    }
}

/// Settings for the converter dispatcher.
#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub input: PathBuf,

    pub output: PathBuf,

    #[validate(range(min = 1, max = 4096))]
    pub size: u32,

    /// Backends to try, highest priority first
    #[validate(length(min = 1))]
    pub backends: Vec<BackendKind>,

    pub inkscape: PathBuf,

    pub magick: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let tools = Tools::default();
        Self {
            input: PathBuf::from(DEFAULT_SVG),
            output: PathBuf::from(DEFAULT_PNG),
            size: DEFAULT_SIZE,
            backends: BackendKind::iter().collect(),
            inkscape: tools.inkscape,
            magick: tools.magick,
        }
    }
}

impl ConvertConfig {
    pub fn tools(&self) -> Tools {
        Tools {
            inkscape: self.inkscape.clone(),
            magick: self.magick.clone(),
        }
    }
}

impl Config {
    /// Check for a configuration file in the given directory.
    pub fn from_dir(path: impl AsRef<Path>) -> Option<PathBuf> {
        let path = path.as_ref().join(CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Read and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration");

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config =
            toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Load the explicitly given file, else the one in the working directory,
    /// else fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::from_dir(".") {
                Some(path) => Self::load(path),
                None => Ok(Self::default()),
            },
        }
    }
}
