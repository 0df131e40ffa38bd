use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{BackendKind, Convert, ConvertError, Job, process};

/// Exports through the Inkscape command line.
#[derive(Debug, Clone)]
pub struct InkscapeBackend {
    pub program: PathBuf,
}

impl InkscapeBackend {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    fn args(job: &Job) -> Vec<OsString> {
        let mut filename = OsString::from("--export-filename=");
        filename.push(&job.output);

        vec![
            OsString::from("--export-type=png"),
            OsString::from(format!("--export-width={}", job.size)),
            OsString::from(format!("--export-height={}", job.size)),
            filename,
            job.input.clone().into_os_string(),
        ]
    }
}

impl Convert for InkscapeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Inkscape
    }

    fn available(&self) -> bool {
        process::find_executable(&self.program)
    }

    fn convert(&self, job: &Job) -> Result<(), ConvertError> {
        process::run_tool(&self.program, &Self::args(job))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(dir: &Path) -> Job {
        Job {
            input: dir.join("icon.svg"),
            output: dir.join("icon.png"),
            size: 144,
        }
    }

    #[test]
    fn test_args() {
        let job = job(Path::new("/assets"));
        assert_eq!(
            InkscapeBackend::args(&job),
            vec![
                OsString::from("--export-type=png"),
                OsString::from("--export-width=144"),
                OsString::from("--export-height=144"),
                OsString::from("--export-filename=/assets/icon.png"),
                OsString::from("/assets/icon.svg"),
            ]
        );
    }

    #[test]
    fn test_not_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = InkscapeBackend::new(tmp.path().join("inkscape"));

        assert!(!backend.available());
        assert!(matches!(
            backend.convert(&job(tmp.path())),
            Err(ConvertError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_export() {
        let tmp = tempfile::tempdir().unwrap();
        let program = crate::process::tests::script(
            tmp.path(),
            "inkscape",
            r#"for arg in "$@"; do
  case "$arg" in
    --export-filename=*) printf png > "${arg#--export-filename=}" ;;
  esac
done"#,
        );
        let backend = InkscapeBackend::new(&program);
        let job = job(tmp.path());

        assert!(backend.available());
        backend.convert(&job).unwrap();
        assert_eq!(std::fs::read_to_string(&job.output).unwrap(), "png");
    }
}
