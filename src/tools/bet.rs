//! Brain extraction with BET

use crate::command::Command;
use crate::io::error::{Result, invalid_parameter};
use crate::nifti::{resolve_input, strip_extension, suffixed, with_nifti_extension};
use crate::tools::Tool;
use std::path::PathBuf;

/// BET invocation with robust centre estimation (`-R`)
#[derive(Debug, Clone, PartialEq)]
pub struct Bet {
    image: PathBuf,
    out: PathBuf,
    frac_int: f64,
    mask: bool,
}

/// Images written by BET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetOutputs {
    /// Skull-stripped image
    pub brain: PathBuf,
    /// Binary brain mask, when requested
    pub mask: Option<PathBuf>,
}

impl Bet {
    /// Extract the brain from `image`, writing to the `out` prefix
    pub fn new(image: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            out: out.into(),
            frac_int: 0.5,
            mask: false,
        }
    }

    /// Fractional intensity threshold (0 to 1); smaller values give larger
    /// brain outline estimates
    #[must_use]
    pub const fn frac_int(mut self, frac_int: f64) -> Self {
        self.frac_int = frac_int;
        self
    }

    /// Also write a binary brain mask
    #[must_use]
    pub const fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }
}

impl Tool for Bet {
    type Output = BetOutputs;

    fn command(&self) -> Result<Command> {
        if !(0.0..=1.0).contains(&self.frac_int) {
            return Err(invalid_parameter(
                "frac_int",
                &self.frac_int,
                &"must be between 0 and 1",
            ));
        }

        let image = resolve_input(&self.image)?;
        let outputs = self.outputs();

        let mut cmd = Command::new("bet")
            .arg(image)
            .arg(strip_extension(&self.out))
            .arg("-f")
            .arg(self.frac_int.to_string())
            .arg("-R")
            .nifti_output(outputs.brain);

        if let Some(mask) = outputs.mask {
            cmd = cmd.arg("-m").nifti_output(mask);
        }

        Ok(cmd)
    }

    fn outputs(&self) -> BetOutputs {
        BetOutputs {
            brain: with_nifti_extension(&self.out),
            mask: self.mask.then(|| suffixed(&self.out, "_mask")),
        }
    }
}
