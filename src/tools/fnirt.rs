//! Non-linear registration with FNIRT
//!
//! FNIRT performs best on whole-head images, skull included.

use crate::command::Command;
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::nifti::{resolve_input, strip_extension, suffixed, with_nifti_extension};
use crate::tools::Tool;
use std::path::PathBuf;

/// Output prefix used when none is given
pub const DEFAULT_PREFIX: &str = "xfm-nonlinear";

/// FNIRT registration of `image` onto `reference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fnirt {
    image: PathBuf,
    reference: PathBuf,
    affine: Option<PathBuf>,
    out: PathBuf,
    warped_image: bool,
    field: bool,
    coefficients: bool,
}

/// Files written by FNIRT, each present only when requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnirtOutputs {
    /// Warped input image (`<prefix>.nii.gz`)
    pub image: Option<PathBuf>,
    /// Warp field (`<prefix>_field.nii.gz`)
    pub field: Option<PathBuf>,
    /// Warp field coefficients (`<prefix>_field_coeff.nii.gz`)
    pub coefficients: Option<PathBuf>,
}

impl Fnirt {
    /// Register `image` to `reference`, writing nothing extra by default
    pub fn new(image: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            reference: reference.into(),
            affine: None,
            out: PathBuf::from(DEFAULT_PREFIX),
            warped_image: false,
            field: false,
            coefficients: false,
        }
    }

    /// Initial affine transformation from FLIRT
    #[must_use]
    pub fn affine(mut self, affine: impl Into<PathBuf>) -> Self {
        self.affine = Some(affine.into());
        self
    }

    /// Prefix for every output
    #[must_use]
    pub fn out(mut self, out: impl Into<PathBuf>) -> Self {
        self.out = out.into();
        self
    }

    /// Write the warped image
    #[must_use]
    pub const fn warped_image(mut self, enabled: bool) -> Self {
        self.warped_image = enabled;
        self
    }

    /// Write the warp field
    #[must_use]
    pub const fn field(mut self, enabled: bool) -> Self {
        self.field = enabled;
        self
    }

    /// Write the warp field coefficients
    #[must_use]
    pub const fn coefficients(mut self, enabled: bool) -> Self {
        self.coefficients = enabled;
        self
    }
}

impl Tool for Fnirt {
    type Output = FnirtOutputs;

    fn command(&self) -> Result<Command> {
        let image = resolve_input(&self.image)?;
        let reference = resolve_input(&self.reference)?;

        let mut cmd = Command::new("fnirt")
            .flag_value("--in", image)
            .flag_value("--ref", reference)
            .arg("-v");

        if let Some(affine) = &self.affine {
            if !affine.is_file() {
                return Err(invalid_parameter(
                    "affine",
                    &affine.display(),
                    &"matrix file does not exist",
                ));
            }
            let affine =
                std::path::absolute(affine).map_err(file_system(affine, "resolve absolute path"))?;
            cmd = cmd.flag_value("--aff", affine);
        }

        let outputs = self.outputs();
        if let Some(image) = outputs.image {
            cmd = cmd.flag_value("--iout", &image).nifti_output(image);
        }
        if let Some(field) = outputs.field {
            cmd = cmd.flag_value("--fout", &field).nifti_output(field);
        }
        if let Some(coefficients) = outputs.coefficients {
            cmd = cmd
                .flag_value("--cout", &coefficients)
                .nifti_output(coefficients);
        }

        Ok(cmd)
    }

    fn outputs(&self) -> FnirtOutputs {
        let prefix = strip_extension(&self.out);
        FnirtOutputs {
            image: self.warped_image.then(|| with_nifti_extension(&prefix)),
            field: self.field.then(|| suffixed(&prefix, "_field")),
            coefficients: self.coefficients.then(|| suffixed(&prefix, "_field_coeff")),
        }
    }
}
