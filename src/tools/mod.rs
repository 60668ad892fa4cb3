//! Wrappers for the FSL and ANTs executables
//!
//! Each wrapper validates its inputs, renders the exact argument vector the
//! executable expects, and declares the files it will write so the pipeline
//! can verify them once the process exits.

use crate::command::Command;
use crate::io::error::Result;
use std::path::PathBuf;

/// FSL warp application
pub mod applywarp;
/// FSL brain extraction
pub mod bet;
/// FSL warp field conversion
pub mod convertwarp;
/// FSL tissue segmentation and bias field estimation
pub mod fast;
/// FSL linear registration
pub mod flirt;
/// FSL non-linear registration
pub mod fnirt;
/// FSL image arithmetic
pub mod fslmaths;
/// ANTs N4 bias field correction
pub mod n4;

pub use applywarp::ApplyWarp;
pub use bet::{Bet, BetOutputs};
pub use convertwarp::ConvertWarp;
pub use fast::{Fast, FastBias, FastOutputs, ImageType};
pub use flirt::{Flirt, FlirtOutputs, MatrixOutput};
pub use fnirt::{Fnirt, FnirtOutputs};
pub use fslmaths::{DataType, FslMaths, Operand};
pub use n4::N4;

/// An external program invocation with typed results
pub trait Tool {
    /// Paths the tool writes, in a shape meaningful to callers
    type Output;

    /// Validate inputs and build the command line
    ///
    /// # Errors
    ///
    /// Returns an error if an input image is invalid or a parameter is out
    /// of range
    fn command(&self) -> Result<Command>;

    /// Files written by a successful run
    fn outputs(&self) -> Self::Output;
}

/// Images written by bias field correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasFieldOutputs {
    /// Bias corrected image
    pub restore: PathBuf,
    /// Estimated bias field
    pub bias: PathBuf,
}

/// Interpretation of displacement values in FSL warp fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarpConvention {
    /// `x' = w(x)`
    #[default]
    Absolute,
    /// `x' = x + w(x)`
    Relative,
}

impl WarpConvention {
    /// Command-line flag selecting this convention
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Absolute => "--abs",
            Self::Relative => "--rel",
        }
    }
}
