//! Anatomical segmentation of adult, pediatric, and neonatal structural brain MR images
//!
//! Image processing is delegated to the FSL and ANTs executables. This crate
//! validates inputs, builds and runs the commands, checks every output, and
//! records the whole run in a log file.

#![forbid(unsafe_code)]

/// External command construction, execution, and archive handling
pub mod command;
/// Command line, configuration, errors, logging, and directories
pub mod io;
/// NIfTI file validation and naming conventions
pub mod nifti;
/// Bias correction, brain extraction, registration, and segmentation stages
pub mod pipeline;
/// Typed wrappers for the FSL and ANTs executables
pub mod tools;

pub use io::error::{Result, SegError};
