//! Vector to raster conversion through interchangeable backends.
//!
//! Backends are tried in priority order. A backend that cannot run in this
//! environment is skipped quietly, one that fails is reported, and the first
//! one that succeeds ends the scan.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, warn};

pub mod imagemagick;
pub mod inkscape;
pub mod pipeline;
mod process;
pub mod rasterizer;

use imagemagick::ImageMagickBackend;
use inkscape::InkscapeBackend;
use pipeline::UsvgBackend;
use rasterizer::ResvgBackend;

/// Fallback suggestion printed when no backend could convert.
pub const WEB_CONVERTER: &str = "https://convertio.co/svg-png/";

/// One requested conversion.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Side length of the square output, in pixels.
    pub size: u32,
}

/// Parse options for the library backends. Relative references such as
/// `<image href="...">` resolve against the input's directory.
#[cfg(any(feature = "resvg", feature = "usvg"))]
pub(crate) fn svg_options(input: &std::path::Path) -> resvg::usvg::Options<'static> {
    let mut options = resvg::usvg::Options::default();
    options.resources_dir = std::fs::canonicalize(input)
        .ok()
        .and_then(|path| path.parent().map(|parent| parent.to_path_buf()));
    options
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The backend cannot run here. Not a failure.
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Identifies a backend, in default priority order.
#[derive(
    Debug,
    Display,
    EnumIter,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Resvg,
    Usvg,
    Inkscape,
    Imagemagick,
}

impl BackendKind {
    /// Human readable name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Resvg => "resvg",
            BackendKind::Usvg => "usvg + png",
            BackendKind::Inkscape => "Inkscape",
            BackendKind::Imagemagick => "ImageMagick",
        }
    }

    /// How to make this backend available.
    pub fn install_hint(&self) -> &'static str {
        match self {
            BackendKind::Resvg => "cargo install tickicon --features resvg",
            BackendKind::Usvg => "cargo install tickicon --features usvg",
            BackendKind::Inkscape => "https://inkscape.org/release/",
            BackendKind::Imagemagick => "https://imagemagick.org/",
        }
    }
}

/// A backend converts vector files to PNG.
#[enum_dispatch(Backend)]
pub trait Convert {
    fn kind(&self) -> BackendKind;

    /// Whether the backend can run in this environment.
    fn available(&self) -> bool;

    fn convert(&self, job: &Job) -> Result<(), ConvertError>;
}

#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Backend {
    ResvgBackend,
    UsvgBackend,
    InkscapeBackend,
    ImageMagickBackend,
}

/// Where the external tools live.
#[derive(Debug, Clone)]
pub struct Tools {
    pub inkscape: PathBuf,
    pub magick: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            inkscape: PathBuf::from("inkscape"),
            magick: PathBuf::from("magick"),
        }
    }
}

impl Backend {
    pub fn new(kind: BackendKind, tools: &Tools) -> Self {
        match kind {
            BackendKind::Resvg => ResvgBackend.into(),
            BackendKind::Usvg => UsvgBackend.into(),
            BackendKind::Inkscape => InkscapeBackend::new(&tools.inkscape).into(),
            BackendKind::Imagemagick => ImageMagickBackend::new(&tools.magick).into(),
        }
    }

    /// Every backend in default priority order.
    pub fn all(tools: &Tools) -> Vec<Self> {
        BackendKind::iter().map(|kind| Self::new(kind, tools)).collect()
    }
}

/// What happened when a backend was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted,
    Unavailable(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Attempt {
    pub backend: BackendKind,
    pub outcome: Outcome,
}

/// The attempts made by [`dispatch`], in order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub attempts: Vec<Attempt>,
}

impl Report {
    /// The backend that produced the output, if any.
    pub fn converted(&self) -> Option<BackendKind> {
        self.attempts
            .iter()
            .find(|attempt| attempt.outcome == Outcome::Converted)
            .map(|attempt| attempt.backend)
    }

    pub fn failures(&self) -> impl Iterator<Item = (BackendKind, &str)> {
        self.attempts.iter().filter_map(|attempt| match &attempt.outcome {
            Outcome::Failed(error) => Some((attempt.backend, error.as_str())),
            _ => None,
        })
    }
}

/// Try each backend in order until one converts the job.
pub fn dispatch<B: Convert>(backends: &[B], job: &Job) -> Report {
    let mut report = Report::default();

    for backend in backends {
        let kind = backend.kind();
        info!(backend = %kind.label(), "Trying");

        let outcome = match backend.convert(job) {
            Ok(()) => {
                info!(backend = %kind.label(), output = %job.output.display(), "Converted");
                Outcome::Converted
            }
            Err(ConvertError::Unavailable(reason)) => {
                debug!(backend = %kind.label(), reason = %reason, "Skipping unavailable backend");
                Outcome::Unavailable(reason)
            }
            Err(ConvertError::Failed(error)) => {
                let error = format!("{error:#}");
                warn!(backend = %kind.label(), error = %error, "Conversion failed");
                Outcome::Failed(error)
            }
        };

        let done = outcome == Outcome::Converted;
        report.attempts.push(Attempt {
            backend: kind,
            outcome,
        });
        if done {
            break;
        }
    }

    report
}

/// Instructions for obtaining a working backend.
pub fn guidance() -> String {
    let mut text = String::from("Install one of the following:\n");
    for (i, kind) in BackendKind::iter().enumerate() {
        text.push_str(&format!("{}. {}: {}\n", i + 1, kind.label(), kind.install_hint()));
    }
    text.push_str("\nOr use an online converter:\n");
    text.push_str(WEB_CONVERTER);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A scripted backend that counts how often it is invoked.
    struct Fake {
        kind: BackendKind,
        result: fn(&Job) -> Result<(), ConvertError>,
        calls: Cell<usize>,
    }

    impl Fake {
        fn new(kind: BackendKind, result: fn(&Job) -> Result<(), ConvertError>) -> Self {
            Self {
                kind,
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl Convert for Fake {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn available(&self) -> bool {
            true
        }

        fn convert(&self, job: &Job) -> Result<(), ConvertError> {
            self.calls.set(self.calls.get() + 1);
            (self.result)(job)
        }
    }

    fn unavailable(_: &Job) -> Result<(), ConvertError> {
        Err(ConvertError::Unavailable(String::from("not installed")))
    }

    fn failing(_: &Job) -> Result<(), ConvertError> {
        Err(anyhow::anyhow!("broken pipe").into())
    }

    fn writing(job: &Job) -> Result<(), ConvertError> {
        std::fs::write(&job.output, b"png").map_err(anyhow::Error::from)?;
        Ok(())
    }

    fn job(dir: &tempfile::TempDir) -> Job {
        Job {
            input: dir.path().join("icon.svg"),
            output: dir.path().join("icon.png"),
            size: 144,
        }
    }

    #[test_log::test]
    fn test_stops_at_first_success() {
        let tmp = tempfile::tempdir().unwrap();
        let job = job(&tmp);
        let backends = [
            Fake::new(BackendKind::Resvg, unavailable),
            Fake::new(BackendKind::Usvg, unavailable),
            Fake::new(BackendKind::Inkscape, writing),
            Fake::new(BackendKind::Imagemagick, writing),
        ];

        let report = dispatch(&backends, &job);

        assert_eq!(report.converted(), Some(BackendKind::Inkscape));
        assert_eq!(report.attempts.len(), 3);
        assert_eq!(backends[2].calls.get(), 1);
        assert_eq!(backends[3].calls.get(), 0);
        assert!(job.output.exists());
    }

    #[test]
    fn test_failure_advances() {
        let tmp = tempfile::tempdir().unwrap();
        let job = job(&tmp);
        let backends = [
            Fake::new(BackendKind::Resvg, failing),
            Fake::new(BackendKind::Usvg, writing),
        ];

        let report = dispatch(&backends, &job);

        assert_eq!(report.converted(), Some(BackendKind::Usvg));
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec![(BackendKind::Resvg, "broken pipe")]
        );
    }

    #[test]
    fn test_all_backends_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let job = job(&tmp);
        let backends = [
            Fake::new(BackendKind::Resvg, unavailable),
            Fake::new(BackendKind::Usvg, failing),
            Fake::new(BackendKind::Inkscape, unavailable),
            Fake::new(BackendKind::Imagemagick, failing),
        ];

        let report = dispatch(&backends, &job);

        assert_eq!(report.converted(), None);
        assert_eq!(report.attempts.len(), 4);
        assert!(backends.iter().all(|b| b.calls.get() == 1));
        assert_eq!(report.failures().count(), 2);
        assert!(!job.output.exists());
    }

    #[test]
    fn test_empty_backend_list() {
        let tmp = tempfile::tempdir().unwrap();
        let report = dispatch::<Backend>(&[], &job(&tmp));
        assert!(report.attempts.is_empty());
        assert_eq!(report.converted(), None);
    }

    #[test]
    fn test_guidance_names_every_backend() {
        let text = guidance();
        for kind in BackendKind::iter() {
            assert!(text.contains(kind.label()), "missing {kind}");
            assert!(text.contains(kind.install_hint()), "missing hint for {kind}");
        }
        assert!(text.ends_with(WEB_CONVERTER));
    }

    #[test]
    fn test_all_in_priority_order() {
        let kinds: Vec<BackendKind> = Backend::all(&Tools::default())
            .iter()
            .map(|backend| backend.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                BackendKind::Resvg,
                BackendKind::Usvg,
                BackendKind::Inkscape,
                BackendKind::Imagemagick
            ]
        );
    }

    #[test]
    fn test_kind_names() {
        use clap::ValueEnum;

        assert_eq!(BackendKind::Imagemagick.to_string(), "imagemagick");
        assert_eq!(BackendKind::from_str("usvg", false), Ok(BackendKind::Usvg));
        assert!(BackendKind::from_str("cairosvg", false).is_err());
    }

    #[cfg(any(feature = "resvg", feature = "usvg"))]
    #[test]
    fn test_svg_options_resolve_against_input_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("icon.svg");
        std::fs::write(&input, "<svg/>").unwrap();

        let options = svg_options(&input);
        assert_eq!(
            options.resources_dir,
            Some(std::fs::canonicalize(tmp.path()).unwrap())
        );
        assert_eq!(svg_options(&tmp.path().join("missing.svg")).resources_dir, None);
    }
}
