use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{BackendKind, Convert, ConvertError, Job, process};

/// Converts through ImageMagick's `magick convert`, keeping the background
/// transparent.
#[derive(Debug, Clone)]
pub struct ImageMagickBackend {
    pub program: PathBuf,
}

impl ImageMagickBackend {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    fn args(job: &Job) -> Vec<OsString> {
        vec![
            OsString::from("convert"),
            OsString::from("-background"),
            OsString::from("none"),
            OsString::from("-resize"),
            OsString::from(format!("{0}x{0}", job.size)),
            job.input.clone().into_os_string(),
            job.output.clone().into_os_string(),
        ]
    }
}

impl Convert for ImageMagickBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Imagemagick
    }

    fn available(&self) -> bool {
        process::find_executable(&self.program)
    }

    fn convert(&self, job: &Job) -> Result<(), ConvertError> {
        process::run_tool(&self.program, &Self::args(job))
    }
}
