//! N4 bias field correction from ANTs

use crate::command::{Command, Executor};
use crate::io::configuration::{
    N4_BSPLINE_FITTING, N4_CONVERGENCE, N4_FALLBACK_PROGRAM, N4_HISTOGRAM_SHARPENING,
    N4_PROGRAM, N4_SHRINK_FACTOR,
};
use crate::io::error::{Result, SegError};
use crate::nifti::{resolve_input, with_nifti_extension};
use crate::tools::{BiasFieldOutputs, Tool};
use std::ffi::OsString;
use std::path::PathBuf;

/// Pick the installed N4 executable
///
/// ANTs installs `N4BiasFieldCorrection`; the dHCP structural pipeline
/// installs the same program as `N4`.
///
/// # Errors
///
/// Returns an error if neither executable is available
pub fn resolve_program(executor: &dyn Executor) -> Result<&'static str> {
    [N4_PROGRAM, N4_FALLBACK_PROGRAM]
        .into_iter()
        .find(|program| executor.is_available(program))
        .ok_or_else(|| SegError::DependencyMissing {
            program: N4_PROGRAM.to_string(),
        })
}

/// N4 correction of a whole-head image within a brain mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct N4 {
    program: String,
    image: PathBuf,
    mask: Option<PathBuf>,
    restore: PathBuf,
    bias: PathBuf,
}

impl N4 {
    /// Correct `image`, writing the corrected image and the bias field
    pub fn new(
        image: impl Into<PathBuf>,
        restore: impl Into<PathBuf>,
        bias: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: N4_PROGRAM.to_string(),
            image: image.into(),
            mask: None,
            restore: restore.into(),
            bias: bias.into(),
        }
    }

    /// Restrict the estimate to a mask
    #[must_use]
    pub fn mask(mut self, mask: impl Into<PathBuf>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Executable to run, see [`resolve_program`]
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Tool for N4 {
    type Output = BiasFieldOutputs;

    fn command(&self) -> Result<Command> {
        let image = resolve_input(&self.image)?;
        let outputs = self.outputs();

        let mut cmd = Command::new(self.program.as_str()).arg("-i").arg(image);
        if let Some(mask) = &self.mask {
            cmd = cmd.arg("-x").arg(resolve_input(mask)?);
        }

        let mut out_pair = OsString::from("[");
        out_pair.push(&outputs.restore);
        out_pair.push(",");
        out_pair.push(&outputs.bias);
        out_pair.push("]");

        Ok(cmd
            .arg("-o")
            .arg(out_pair)
            .args(["-c", N4_CONVERGENCE])
            .arg("-s")
            .arg(N4_SHRINK_FACTOR.to_string())
            .args(["-b", N4_BSPLINE_FITTING])
            .args(["-t", N4_HISTOGRAM_SHARPENING])
            .nifti_output(outputs.restore)
            .nifti_output(outputs.bias))
    }

    fn outputs(&self) -> BiasFieldOutputs {
        BiasFieldOutputs {
            restore: with_nifti_extension(&self.restore),
            bias: with_nifti_extension(&self.bias),
        }
    }
}
