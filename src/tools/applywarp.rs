//! Resampling images through warp fields with applywarp

use crate::command::Command;
use crate::io::error::Result;
use crate::nifti::{resolve_input, with_nifti_extension};
use crate::tools::{Tool, WarpConvention};
use std::path::PathBuf;

/// Resample `image` into the space of `reference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyWarp {
    image: PathBuf,
    reference: PathBuf,
    out: PathBuf,
    warp: Option<PathBuf>,
    convention: WarpConvention,
}

impl ApplyWarp {
    /// Resample without a warp (identity) until one is set
    pub fn new(
        image: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image: image.into(),
            reference: reference.into(),
            out: out.into(),
            warp: None,
            convention: WarpConvention::default(),
        }
    }

    /// Warp field to apply
    #[must_use]
    pub fn warp(mut self, warp: impl Into<PathBuf>) -> Self {
        self.warp = Some(warp.into());
        self
    }

    /// Convention of the warp field
    #[must_use]
    pub const fn convention(mut self, convention: WarpConvention) -> Self {
        self.convention = convention;
        self
    }
}

impl Tool for ApplyWarp {
    type Output = PathBuf;

    fn command(&self) -> Result<Command> {
        let image = resolve_input(&self.image)?;
        let reference = resolve_input(&self.reference)?;
        let out = self.outputs();

        let mut cmd = Command::new("applywarp")
            .arg("-v")
            .flag_value("--in", image)
            .flag_value("--ref", reference)
            .flag_value("--out", &out);

        if let Some(warp) = &self.warp {
            cmd = cmd.flag_value("--warp", resolve_input(warp)?);
        }

        Ok(cmd.arg(self.convention.flag()).nifti_output(out))
    }

    fn outputs(&self) -> PathBuf {
        with_nifti_extension(&self.out)
    }
}
