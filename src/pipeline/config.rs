//! Resolved settings for one segmentation run

use crate::io::configuration::{
    DEFAULT_CLASSES, DEFAULT_FRAC_INT, DEFAULT_IMAGE_TYPE, MIN_CLASSES, NEONATE_CLASSES,
    NEONATE_FRAC_INT, NEONATE_IMAGE_TYPE, NEONATE_MIN_CLASSES, PRIOR_COUNT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::tools::ImageType;
use std::path::PathBuf;

/// Bias field correction applied before brain extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiasCorrection {
    /// Use the input as is
    None,
    /// FSL FAST bias estimation
    #[default]
    Fsl,
    /// ANTs N4, recommended
    N4,
}

impl BiasCorrection {
    /// Combine the command-line flags; disabling correction wins
    pub const fn from_flags(n4: bool, no_bias: bool) -> Self {
        match (n4, no_bias) {
            (_, true) => Self::None,
            (true, false) => Self::N4,
            (false, false) => Self::Fsl,
        }
    }
}

/// Everything the pipeline needs to know about a run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Structural input (T1w, or T2w for neonates), not skull-stripped
    pub image: PathBuf,
    /// Directory receiving every output
    pub out_dir: PathBuf,
    /// BET fractional intensity threshold
    pub frac_int: f64,
    /// Bias correction method
    pub bias_correction: BiasCorrection,
    /// Contrast of the input image
    pub image_type: ImageType,
    /// Number of FAST tissue classes
    pub classes: u8,
    /// Alternative CSF, GM, and WM priors in native space
    pub priors: Vec<PathBuf>,
    /// Atlas-based neonatal segmentation
    pub neonate: bool,
    /// Directory holding the neonatal atlas
    pub atlas_dir: Option<PathBuf>,
}

impl SegmentationConfig {
    /// Settings with the adult or neonatal defaults applied
    pub fn new(image: impl Into<PathBuf>, out_dir: impl Into<PathBuf>, neonate: bool) -> Self {
        let (frac_int, image_type, classes) = if neonate {
            (NEONATE_FRAC_INT, NEONATE_IMAGE_TYPE, NEONATE_CLASSES)
        } else {
            (DEFAULT_FRAC_INT, DEFAULT_IMAGE_TYPE, DEFAULT_CLASSES)
        };

        Self {
            image: image.into(),
            out_dir: out_dir.into(),
            frac_int,
            bias_correction: BiasCorrection::default(),
            image_type,
            classes,
            priors: Vec::new(),
            neonate,
            atlas_dir: None,
        }
    }

    /// Check parameter ranges and mode-specific requirements
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fractional intensity is outside 0 to 1
    /// - There are too few tissue classes for the selected mode
    /// - Priors are given but not exactly three
    /// - Neonatal mode is selected without an atlas directory
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.frac_int) {
            return Err(invalid_parameter(
                "frac_int",
                &self.frac_int,
                &"must be between 0 and 1",
            ));
        }

        let min_classes = if self.neonate {
            NEONATE_MIN_CLASSES
        } else {
            MIN_CLASSES
        };
        if self.classes < min_classes {
            return Err(invalid_parameter(
                "classes",
                &self.classes,
                &format!("must be at least {min_classes}"),
            ));
        }

        if !self.priors.is_empty() && self.priors.len() != PRIOR_COUNT {
            return Err(invalid_parameter(
                "priors",
                &self.priors.len(),
                &format!("exactly {PRIOR_COUNT} priors (CSF, GM, WM) are required"),
            ));
        }

        if self.neonate && self.atlas_dir.is_none() {
            return Err(invalid_parameter(
                "atlas_dir",
                &"",
                &"neonatal segmentation requires an atlas directory",
            ));
        }

        Ok(())
    }
}
