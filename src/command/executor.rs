//! Running commands against the host system

use crate::command::builder::Command;
use crate::io::error::{Result, SegError};
use crate::io::logging::LogFile;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Seam between the pipeline and the processes it launches
pub trait Executor {
    /// Whether the executable can be found
    fn is_available(&self, program: &str) -> bool;

    /// Run a command to completion, recording it in the log
    ///
    /// # Errors
    ///
    /// Returns an error if the program is missing, cannot be started, or
    /// exits unsuccessfully
    fn execute(&self, command: &Command, log: &mut LogFile) -> Result<()>;
}

/// Executes commands as child processes, searching `PATH`
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    search_path: Option<OsString>,
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemExecutor {
    /// Executor using the process `PATH`
    pub fn new() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Executor using an explicit search path
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Locate an executable on the search path
    ///
    /// Names containing a path separator are checked directly.
    pub fn find_program(&self, program: &str) -> Option<PathBuf> {
        let direct = Path::new(program);
        if direct.components().count() > 1 {
            return is_executable(direct).then(|| direct.to_path_buf());
        }

        let search_path = self.search_path.as_deref().unwrap_or_else(|| OsStr::new(""));
        std::env::split_paths(search_path)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

impl Executor for SystemExecutor {
    fn is_available(&self, program: &str) -> bool {
        self.find_program(program).is_some()
    }

    fn execute(&self, command: &Command, log: &mut LogFile) -> Result<()> {
        log.log(&format!("Running: {command}"))?;

        let program = self
            .find_program(command.program())
            .ok_or_else(|| SegError::DependencyMissing {
                program: command.program().to_string(),
            })?;

        let mut process = std::process::Command::new(&program);
        process.args(command.arguments());
        if let Some(dir) = command.working_dir() {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|source| SegError::CommandSpawn {
            program: command.program().to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        log.log_output("stdout", &stdout)?;
        log.log_output("stderr", &stderr)?;

        if output.status.success() {
            Ok(())
        } else {
            Err(SegError::CommandFailed {
                command: command.to_string(),
                status: output.status.code(),
                stderr: stderr.into_owned(),
            })
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
