//! External command description: program, arguments, and declared outputs

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a declared output is checked after the command finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Must pass NIfTI validation
    Nifti,
    /// Must merely exist (matrices, text files)
    Plain,
}

/// A file the command promises to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Where the file will be written
    pub path: PathBuf,
    /// Validation applied once the command succeeds
    pub kind: OutputKind,
}

/// A fully specified external command
///
/// Built with chained calls, then handed to an
/// [`Executor`](crate::command::executor::Executor):
///
/// ```
/// use anatseg::command::Command;
///
/// let cmd = Command::new("fnirt")
///     .flag_value("--in", "head.nii.gz")
///     .arg("-v");
/// assert_eq!(cmd.to_string(), "fnirt --in=head.nii.gz -v");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<OsString>,
    outputs: Vec<Output>,
    current_dir: Option<PathBuf>,
}

impl Command {
    /// Start a command for the given executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            outputs: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// Append a `--flag=value` argument
    #[must_use]
    pub fn flag_value(mut self, flag: &str, value: impl AsRef<OsStr>) -> Self {
        let mut joined = OsString::from(flag);
        joined.push("=");
        joined.push(value);
        self.args.push(joined);
        self
    }

    /// Declare a file the command writes
    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>, kind: OutputKind) -> Self {
        self.outputs.push(Output {
            path: path.into(),
            kind,
        });
        self
    }

    /// Declare a NIfTI image the command writes
    #[must_use]
    pub fn nifti_output(self, path: impl Into<PathBuf>) -> Self {
        self.output(path, OutputKind::Nifti)
    }

    /// Run the command from a specific directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Executable name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in order
    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as strings, replacing invalid UTF-8
    pub fn argument_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Declared outputs in order
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Working directory override, if any
    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
