//! Tissue segmentation and bias field estimation with FAST
//!
//! Bias correction must happen before [`Fast`] runs, since it always passes
//! `--nobias`. [`FastBias`] is the bias-only counterpart used for FSL style
//! correction of a whole-head image.

use crate::command::Command;
use crate::io::configuration::{DEFAULT_CLASSES, DEFAULT_IMAGE_TYPE, MIN_CLASSES, PRIOR_COUNT};
use crate::io::error::{Result, invalid_parameter};
use crate::nifti::{resolve_input, strip_extension, suffixed};
use crate::tools::{BiasFieldOutputs, Tool};
use std::fmt;
use std::path::PathBuf;

/// MR contrast of the input image, as FAST's `--type` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    /// T1-weighted
    T1w = 1,
    /// T2-weighted
    T2w = 2,
    /// Proton density
    Pd = 3,
}

impl ImageType {
    /// Parse a FAST type code
    ///
    /// # Errors
    ///
    /// Returns an error for codes other than 1, 2, or 3
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::T1w),
            2 => Ok(Self::T2w),
            3 => Ok(Self::Pd),
            _ => Err(invalid_parameter(
                "type",
                &code,
                &"must be 1 (T1w), 2 (T2w), or 3 (PD)",
            )),
        }
    }

    /// FAST type code
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::T1w => "T1w",
            Self::T2w => "T2w",
            Self::Pd => "PD",
        };
        f.write_str(name)
    }
}

/// FAST segmentation of one or more co-registered channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fast {
    images: Vec<PathBuf>,
    out: PathBuf,
    image_type: ImageType,
    classes: u8,
    priors: Vec<PathBuf>,
}

/// Maps written by FAST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastOutputs {
    /// Partial volume estimates, one per class in class order
    pub partial_volumes: Vec<PathBuf>,
    /// Hard segmentation
    pub segmentation: PathBuf,
    /// Hard segmentation derived from the partial volumes
    pub partial_volume_segmentation: PathBuf,
    /// Mixed-tissue voxel classification
    pub mixeltype: PathBuf,
}

impl Fast {
    /// Segment `images` into 3 classes assuming T1w contrast
    pub fn new(images: Vec<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            images,
            out: out.into(),
            image_type: DEFAULT_IMAGE_TYPE,
            classes: DEFAULT_CLASSES,
            priors: Vec::new(),
        }
    }

    /// Contrast of the input channels
    #[must_use]
    pub const fn image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = image_type;
        self
    }

    /// Number of tissue classes
    #[must_use]
    pub const fn classes(mut self, classes: u8) -> Self {
        self.classes = classes;
        self
    }

    /// Alternative CSF, GM, and WM prior images
    #[must_use]
    pub fn priors(mut self, priors: Vec<PathBuf>) -> Self {
        self.priors = priors;
        self
    }
}

impl Tool for Fast {
    type Output = FastOutputs;

    fn command(&self) -> Result<Command> {
        if self.images.is_empty() {
            return Err(invalid_parameter(
                "images",
                &"[]",
                &"at least one input image is required",
            ));
        }
        if self.classes < MIN_CLASSES {
            return Err(invalid_parameter(
                "classes",
                &self.classes,
                &format!("must be at least {MIN_CLASSES}"),
            ));
        }
        if !self.priors.is_empty() && self.priors.len() != PRIOR_COUNT {
            return Err(invalid_parameter(
                "priors",
                &self.priors.len(),
                &format!("exactly {PRIOR_COUNT} priors (CSF, GM, WM) are required"),
            ));
        }

        let images = self
            .images
            .iter()
            .map(|image| resolve_input(image))
            .collect::<Result<Vec<_>>>()?;
        let priors = self
            .priors
            .iter()
            .map(|prior| resolve_input(prior))
            .collect::<Result<Vec<_>>>()?;

        let mut cmd = Command::new("fast")
            .arg("--nobias")
            .arg(format!("--channels={}", images.len()))
            .arg(format!("--class={}", self.classes))
            .arg(format!("--type={}", self.image_type.code()))
            .flag_value("--out", strip_extension(&self.out));

        if !priors.is_empty() {
            cmd = cmd.arg("-A").args(&priors);
        }
        cmd = cmd.args(&images);

        let outputs = self.outputs();
        for pve in outputs.partial_volumes {
            cmd = cmd.nifti_output(pve);
        }
        Ok(cmd
            .nifti_output(outputs.segmentation)
            .nifti_output(outputs.partial_volume_segmentation)
            .nifti_output(outputs.mixeltype))
    }

    fn outputs(&self) -> FastOutputs {
        FastOutputs {
            partial_volumes: (0..self.classes)
                .map(|class| suffixed(&self.out, &format!("_pve_{class}")))
                .collect(),
            segmentation: suffixed(&self.out, "_seg"),
            partial_volume_segmentation: suffixed(&self.out, "_pveseg"),
            mixeltype: suffixed(&self.out, "_mixeltype"),
        }
    }
}

/// FAST run that only estimates and removes the bias field (`-b -B`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastBias {
    image: PathBuf,
    out: PathBuf,
}

impl FastBias {
    /// Estimate the bias field of `image`, writing to the `out` prefix
    pub fn new(image: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            out: out.into(),
        }
    }
}

impl Tool for FastBias {
    type Output = BiasFieldOutputs;

    fn command(&self) -> Result<Command> {
        let image = resolve_input(&self.image)?;
        let outputs = self.outputs();

        Ok(Command::new("fast")
            .args(["-b", "-B", "-o"])
            .arg(strip_extension(&self.out))
            .arg(image)
            .nifti_output(outputs.restore)
            .nifti_output(outputs.bias))
    }

    fn outputs(&self) -> BiasFieldOutputs {
        BiasFieldOutputs {
            restore: suffixed(&self.out, "_restore"),
            bias: suffixed(&self.out, "_bias"),
        }
    }
}
