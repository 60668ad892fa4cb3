//! Pipeline constants and runtime configuration defaults

use crate::tools::ImageType;

// Adult (and pediatric) defaults
/// Default BET fractional intensity threshold
pub const DEFAULT_FRAC_INT: f64 = 0.5;
/// Default input image contrast
pub const DEFAULT_IMAGE_TYPE: ImageType = ImageType::T1w;
/// Default number of FAST tissue classes
pub const DEFAULT_CLASSES: u8 = 3;

// Neonatal defaults, tuned for T2w images
/// Neonatal BET fractional intensity threshold
pub const NEONATE_FRAC_INT: f64 = 0.3;
/// Neonatal input image contrast
pub const NEONATE_IMAGE_TYPE: ImageType = ImageType::T2w;
/// Neonatal number of FAST tissue classes
pub const NEONATE_CLASSES: u8 = 5;
/// Fewest classes the neonatal post-processing can work with
pub const NEONATE_MIN_CLASSES: u8 = 4;

/// Fewest classes FAST accepts
pub const MIN_CLASSES: u8 = 2;
/// Number of alternative priors FAST expects (CSF, GM, WM)
pub const PRIOR_COUNT: usize = 3;

/// Name of the per-run log file written into the output directory
pub const LOG_FILE_NAME: &str = "anatseg.log";

/// Environment variable naming the atlas directory
pub const ATLAS_DIR_ENV: &str = "ANATSEG_ATLAS_DIR";
/// Directory name of the extracted UNC neonatal atlas
pub const UNC_ATLAS_DIR: &str = "UNC_infant_atlas_2020";
/// Archive holding the UNC neonatal atlas
pub const UNC_ATLAS_ARCHIVE: &str = "UNC.tar.gz";

// N4 bias field correction
/// BET fractional intensity used to build the N4 mask
pub const N4_MASK_FRAC_INT: f64 = 0.1;
/// Primary N4 executable (ANTs)
pub const N4_PROGRAM: &str = "N4BiasFieldCorrection";
/// Fallback N4 executable (dHCP structural pipeline)
pub const N4_FALLBACK_PROGRAM: &str = "N4";
/// N4 convergence: iterations per level and threshold
pub const N4_CONVERGENCE: &str = "[50x50x50,0.001]";
/// N4 shrink factor
pub const N4_SHRINK_FACTOR: u8 = 2;
/// N4 B-spline fitting: spline distance and order
pub const N4_BSPLINE_FITTING: &str = "[100,3]";
/// N4 histogram sharpening: FWHM, Wiener noise, bins
pub const N4_HISTOGRAM_SHARPENING: &str = "[0.15,0.01,200]";

/// Registration degrees of freedom for template to native FLIRT
pub const REGISTRATION_DOF: u8 = 12;

// Output naming
/// Prefix for bias corrected outputs
pub const BIASCORR_PREFIX: &str = "anat";
/// Skull-stripped image
pub const BRAIN_IMAGE: &str = "anat_brain.nii.gz";
/// FAST output prefix
pub const FAST_PREFIX: &str = "fast_segmentation";
/// Linear template to native registration
pub const LINEAR_XFM_IMAGE: &str = "template-to-native_space-native_xfm-linear.nii.gz";
/// Non-linear template to native registration prefix
pub const NONLINEAR_XFM_PREFIX: &str = "template-to-native_space-native_xfm-nonlinear";
/// Final tissue maps in native space, formatted with the tissue name
pub const TISSUE_OUTPUT_PREFIX: &str = "fast_segmentation_space-native_tissue";
/// Suffix of bias corrected images
pub const RESTORE_SUFFIX: &str = "_restore";
/// Suffix of estimated bias fields
pub const BIAS_FIELD_SUFFIX: &str = "_bias_field";
