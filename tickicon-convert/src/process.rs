use anyhow::anyhow;
use std::{
    ffi::OsString,
    io::ErrorKind,
    path::Path,
    process::{Command, Stdio},
};
use tracing::debug;

use crate::ConvertError;

/// Run an external tool to completion.
///
/// A missing executable is reported as unavailable; a non-zero exit status is
/// a failure carrying the tool's stderr.
pub(crate) fn run_tool(program: &Path, args: &[OsString]) -> Result<(), ConvertError> {
    debug!(program = %program.display(), ?args, "Spawning");

    let output = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConvertError::Unavailable(format!(
                "{} not found",
                program.display()
            )));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to start {}", program.display()))
                .into());
        }
    };

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    Err(match output.status.code() {
        Some(code) if stderr.is_empty() => anyhow!("exited with status {code}"),
        Some(code) => anyhow!("exited with status {code}: {stderr}"),
        None => anyhow!("terminated by signal: {stderr}"),
    }
    .into())
}

/// Whether `program` resolves to an executable file, either as given or on
/// `PATH`.
pub(crate) fn find_executable(program: &Path) -> bool {
    if program.components().count() > 1 {
        return program.is_file();
    }

    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file()
            || candidate
                .with_extension(std::env::consts::EXE_EXTENSION)
                .is_file()
    })
}
