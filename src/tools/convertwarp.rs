//! Warp field conversion and composition with convertwarp

use crate::command::Command;
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::nifti::{resolve_input, with_nifti_extension};
use crate::tools::{Tool, WarpConvention};
use std::path::PathBuf;

/// Combine warp fields (and an optional pre-transform) into one warp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertWarp {
    warp: PathBuf,
    out: PathBuf,
    reference: PathBuf,
    second_warp: Option<PathBuf>,
    premat: Option<PathBuf>,
    convention: WarpConvention,
}

impl ConvertWarp {
    /// Convert `warp` into the space of `reference`, writing `out`
    pub fn new(
        warp: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
    ) -> Self {
        Self {
            warp: warp.into(),
            out: out.into(),
            reference: reference.into(),
            second_warp: None,
            premat: None,
            convention: WarpConvention::default(),
        }
    }

    /// Warp applied after the first
    #[must_use]
    pub fn second_warp(mut self, warp: impl Into<PathBuf>) -> Self {
        self.second_warp = Some(warp.into());
        self
    }

    /// Affine matrix applied before the first warp
    #[must_use]
    pub fn premat(mut self, premat: impl Into<PathBuf>) -> Self {
        self.premat = Some(premat.into());
        self
    }

    /// Convention of the output warp
    #[must_use]
    pub const fn convention(mut self, convention: WarpConvention) -> Self {
        self.convention = convention;
        self
    }
}

impl Tool for ConvertWarp {
    type Output = PathBuf;

    fn command(&self) -> Result<Command> {
        let warp = resolve_input(&self.warp)?;
        let reference = resolve_input(&self.reference)?;
        let out = self.outputs();

        let mut cmd = Command::new("convertwarp")
            .arg("-v")
            .flag_value("--warp1", warp)
            .flag_value("--out", &out)
            .flag_value("--ref", reference);

        if let Some(second) = &self.second_warp {
            cmd = cmd.flag_value("--warp2", resolve_input(second)?);
        }
        if let Some(premat) = &self.premat {
            if !premat.is_file() {
                return Err(invalid_parameter(
                    "premat",
                    &premat.display(),
                    &"matrix file does not exist",
                ));
            }
            let premat =
                std::path::absolute(premat).map_err(file_system(premat, "resolve absolute path"))?;
            cmd = cmd.flag_value("--premat", premat);
        }

        Ok(cmd.arg(self.convention.flag()).nifti_output(out))
    }

    fn outputs(&self) -> PathBuf {
        with_nifti_extension(&self.out)
    }
}
