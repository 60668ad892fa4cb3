//! Linear registration with FLIRT
//!
//! FLIRT performs best when non-brain tissue has been removed from both
//! images.

use crate::command::{Command, OutputKind};
use crate::io::configuration::REGISTRATION_DOF;
use crate::io::error::{Result, invalid_parameter};
use crate::nifti::{resolve_input, strip_extension, with_nifti_extension};
use crate::tools::Tool;
use std::ffi::OsString;
use std::path::PathBuf;

/// Degrees of freedom FLIRT supports for 3D registration
pub const SUPPORTED_DOF: [u8; 4] = [6, 7, 9, 12];

/// Where, if anywhere, the transformation matrix is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatrixOutput {
    /// No matrix
    #[default]
    None,
    /// `<out prefix>.mat`, or `xfm-linear_dof-<dof>.mat` without an output image
    Derived,
    /// Explicit path; `.mat` is appended unless already present
    Path(PathBuf),
}

/// FLIRT registration of `image` onto `reference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flirt {
    image: PathBuf,
    reference: PathBuf,
    out: Option<PathBuf>,
    matrix: MatrixOutput,
    dof: u8,
}

/// Files written by FLIRT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlirtOutputs {
    /// Registered image, when an output was requested
    pub image: Option<PathBuf>,
    /// Affine transformation matrix, when requested
    pub matrix: Option<PathBuf>,
}

impl Flirt {
    /// Register `image` to `reference` with 12 degrees of freedom
    pub fn new(image: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            reference: reference.into(),
            out: None,
            matrix: MatrixOutput::None,
            dof: REGISTRATION_DOF,
        }
    }

    /// Write the registered image
    #[must_use]
    pub fn out(mut self, out: impl Into<PathBuf>) -> Self {
        self.out = Some(out.into());
        self
    }

    /// Write the transformation matrix
    #[must_use]
    pub fn matrix(mut self, matrix: MatrixOutput) -> Self {
        self.matrix = matrix;
        self
    }

    /// Degrees of freedom of the transformation
    #[must_use]
    pub const fn dof(mut self, dof: u8) -> Self {
        self.dof = dof;
        self
    }
}

impl Tool for Flirt {
    type Output = FlirtOutputs;

    fn command(&self) -> Result<Command> {
        if !SUPPORTED_DOF.contains(&self.dof) {
            return Err(invalid_parameter(
                "dof",
                &self.dof,
                &"must be one of 6, 7, 9, or 12",
            ));
        }

        let image = resolve_input(&self.image)?;
        let reference = resolve_input(&self.reference)?;
        let outputs = self.outputs();

        let mut cmd = Command::new("flirt")
            .arg("-in")
            .arg(image)
            .arg("-ref")
            .arg(reference)
            .arg("-dof")
            .arg(self.dof.to_string())
            .arg("-v");

        if let Some(out) = outputs.image {
            cmd = cmd.arg("-out").arg(&out).nifti_output(out);
        }
        if let Some(matrix) = outputs.matrix {
            cmd = cmd
                .arg("-omat")
                .arg(&matrix)
                .output(matrix, OutputKind::Plain);
        }

        Ok(cmd)
    }

    fn outputs(&self) -> FlirtOutputs {
        let matrix = match &self.matrix {
            MatrixOutput::None => None,
            MatrixOutput::Derived => Some(self.out.as_ref().map_or_else(
                || PathBuf::from(format!("xfm-linear_dof-{}.mat", self.dof)),
                |out| mat_path(strip_extension(out)),
            )),
            MatrixOutput::Path(path) if path.extension().is_some_and(|ext| ext == "mat") => {
                Some(path.clone())
            }
            MatrixOutput::Path(path) => Some(mat_path(strip_extension(path))),
        };

        FlirtOutputs {
            image: self.out.as_deref().map(with_nifti_extension),
            matrix,
        }
    }
}

fn mat_path(prefix: PathBuf) -> PathBuf {
    let mut name = OsString::from(prefix);
    name.push(".mat");
    PathBuf::from(name)
}
