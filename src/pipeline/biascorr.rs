//! Bias field correction of the whole-head image

use crate::io::configuration::{BIAS_FIELD_SUFFIX, N4_MASK_FRAC_INT, RESTORE_SUFFIX};
use crate::io::error::Result;
use crate::io::workdir::WorkDir;
use crate::nifti::{copy_image, suffixed};
use crate::pipeline::config::BiasCorrection;
use crate::pipeline::context::Context;
use crate::tools::{Bet, BiasFieldOutputs, FastBias, N4, n4};
use std::path::Path;

/// Correct `image` and publish the result next to the `out` prefix
///
/// Intermediate files live in a scratch directory that is removed once the
/// corrected image and bias field have been copied to
/// `<out>_restore.nii.gz` and `<out>_bias_field.nii.gz`. The input must not
/// be skull-stripped. Returns `None` when correction is disabled.
///
/// # Errors
///
/// Returns an error if a required program is missing, a tool fails, or the
/// outputs cannot be copied
pub fn correct(
    image: &Path,
    out: &Path,
    method: BiasCorrection,
    ctx: &mut Context<'_>,
) -> Result<Option<BiasFieldOutputs>> {
    if method == BiasCorrection::None {
        return Ok(None);
    }

    let parent = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let scratch = WorkDir::create(parent)?.scratch()?;

    let produced = if method == BiasCorrection::N4 {
        run_n4(image, scratch.path(), ctx)?
    } else {
        ctx.run(&FastBias::new(image, scratch.path().join("anat")))?
    };

    let published = BiasFieldOutputs {
        restore: copy_image(&produced.restore, &suffixed(out, RESTORE_SUFFIX))?,
        bias: copy_image(&produced.bias, &suffixed(out, BIAS_FIELD_SUFFIX))?,
    };
    ctx.log(&format!(
        "Bias corrected image written to {}",
        published.restore.display()
    ))?;
    Ok(Some(published))
}

/// N4 needs a brain mask, taken from a generous BET run
fn run_n4(image: &Path, scratch: &Path, ctx: &mut Context<'_>) -> Result<BiasFieldOutputs> {
    let program = n4::resolve_program(ctx.executor())?;

    let brain = ctx.run(
        &Bet::new(image, scratch.join("brain"))
            .frac_int(N4_MASK_FRAC_INT)
            .mask(true),
    )?;

    let mut tool = N4::new(
        image,
        scratch.join("restore.nii.gz"),
        scratch.join("bias.nii.gz"),
    )
    .program(program);
    if let Some(mask) = brain.mask {
        tool = tool.mask(mask);
    }
    ctx.run(&tool)
}
