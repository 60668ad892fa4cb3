//! Standard and neonatal tissue segmentation

use crate::io::configuration::{
    BIASCORR_PREFIX, BRAIN_IMAGE, FAST_PREFIX, LINEAR_XFM_IMAGE, NONLINEAR_XFM_PREFIX,
    REGISTRATION_DOF, TISSUE_OUTPUT_PREFIX,
};
use crate::io::error::{Result, SegError, invalid_parameter};
use crate::io::workdir::WorkDir;
use crate::nifti::{rename_image, resolve_input};
use crate::pipeline::atlas::{NeonateAtlas, locate_unc_atlas};
use crate::pipeline::biascorr;
use crate::pipeline::config::SegmentationConfig;
use crate::pipeline::context::Context;
use crate::tools::{
    ApplyWarp, Bet, BetOutputs, BiasFieldOutputs, ConvertWarp, Fast, FastOutputs, Flirt, Fnirt,
    FslMaths, MatrixOutput, WarpConvention,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Tissue maps produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentationOutputs {
    /// FAST maps as written
    Standard(FastOutputs),
    /// Atlas-guided CSF, GM, and WM maps
    Neonate(NeonateTissues),
}

/// Final neonatal tissue maps in native space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeonateTissues {
    /// Cerebrospinal fluid
    pub csf: PathBuf,
    /// Grey matter
    pub gm: PathBuf,
    /// White matter
    pub wm: PathBuf,
    /// FAST mixed-tissue classification
    pub mixeltype: PathBuf,
}

impl SegmentationOutputs {
    /// Every tissue map, in a stable order
    pub fn files(&self) -> Vec<&Path> {
        match self {
            Self::Standard(fast) => fast
                .partial_volumes
                .iter()
                .chain([
                    &fast.segmentation,
                    &fast.partial_volume_segmentation,
                    &fast.mixeltype,
                ])
                .map(PathBuf::as_path)
                .collect(),
            Self::Neonate(tissues) => vec![
                tissues.csf.as_path(),
                tissues.gm.as_path(),
                tissues.wm.as_path(),
                tissues.mixeltype.as_path(),
            ],
        }
    }
}

/// Everything a run wrote to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Bias correction outputs, absent when correction was disabled
    pub bias: Option<BiasFieldOutputs>,
    /// Skull-stripped image and mask
    pub brain: BetOutputs,
    /// Tissue maps
    pub tissues: SegmentationOutputs,
}

impl Segmentation {
    /// Every file the run produced
    pub fn files(&self) -> Vec<&Path> {
        let mut files = Vec::new();
        if let Some(bias) = &self.bias {
            files.push(bias.restore.as_path());
            files.push(bias.bias.as_path());
        }
        files.push(self.brain.brain.as_path());
        if let Some(mask) = &self.brain.mask {
            files.push(mask.as_path());
        }
        files.extend(self.tissues.files());
        files
    }
}

/// Bias corrected whole head and its skull-stripped counterpart
struct Preprocessed {
    head: PathBuf,
    bias: Option<BiasFieldOutputs>,
    brain: BetOutputs,
}

/// Segment a structural image into tissue classes
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a required program or
/// atlas is missing, or any stage fails
pub fn segment(config: &SegmentationConfig, ctx: &mut Context<'_>) -> Result<Segmentation> {
    config.validate()?;
    let start = Instant::now();
    let workdir = WorkDir::create(&config.out_dir)?;

    ctx.log(&format!(
        "Segmenting {} ({}, {} classes) into {}",
        config.image.display(),
        config.image_type,
        config.classes,
        workdir.path().display()
    ))?;

    let pre = preprocess(config, &workdir, ctx)?;
    let tissues = if config.neonate {
        SegmentationOutputs::Neonate(segment_neonate(config, &workdir, &pre, ctx)?)
    } else {
        ctx.stage("Tissue segmentation")?;
        let fast = Fast::new(vec![pre.brain.brain.clone()], workdir.join(FAST_PREFIX))
            .image_type(config.image_type)
            .classes(config.classes)
            .priors(config.priors.clone());
        SegmentationOutputs::Standard(ctx.run(&fast)?)
    };

    let elapsed = start.elapsed();
    tracing::info!("Segmentation finished in {:.1}s", elapsed.as_secs_f64());
    ctx.log(&format!(
        "Segmentation finished in {:.1} seconds",
        elapsed.as_secs_f64()
    ))?;

    Ok(Segmentation {
        bias: pre.bias,
        brain: pre.brain,
        tissues,
    })
}

fn preprocess(
    config: &SegmentationConfig,
    workdir: &WorkDir,
    ctx: &mut Context<'_>,
) -> Result<Preprocessed> {
    ctx.stage("Bias field correction")?;
    let bias = biascorr::correct(
        &config.image,
        &workdir.join(BIASCORR_PREFIX),
        config.bias_correction,
        ctx,
    )?;
    let head = match &bias {
        Some(outputs) => outputs.restore.clone(),
        None => resolve_input(&config.image)?,
    };

    ctx.stage("Brain extraction")?;
    let brain = ctx.run(
        &Bet::new(&head, workdir.join(BRAIN_IMAGE))
            .frac_int(config.frac_int)
            .mask(true),
    )?;

    Ok(Preprocessed { head, bias, brain })
}

fn segment_neonate(
    config: &SegmentationConfig,
    workdir: &WorkDir,
    pre: &Preprocessed,
    ctx: &mut Context<'_>,
) -> Result<NeonateTissues> {
    let Some(atlas_dir) = &config.atlas_dir else {
        return Err(invalid_parameter(
            "atlas_dir",
            &"",
            &"neonatal segmentation requires an atlas directory",
        ));
    };

    ctx.stage("Locating neonatal atlas")?;
    let atlas = locate_unc_atlas(atlas_dir, ctx)?;

    let priors = warp_priors(&atlas, workdir, pre, ctx)?;

    ctx.stage("Tissue segmentation")?;
    let fast = ctx.run(
        &Fast::new(vec![pre.brain.brain.clone()], workdir.join(FAST_PREFIX))
            .image_type(config.image_type)
            .classes(config.classes)
            .priors(priors),
    )?;

    ctx.stage("Tissue map construction")?;
    combine_tissues(&fast, workdir, ctx)
}

/// Register the atlas to native space and warp its CSF, GM, and WM priors
fn warp_priors(
    atlas: &NeonateAtlas,
    workdir: &WorkDir,
    pre: &Preprocessed,
    ctx: &mut Context<'_>,
) -> Result<Vec<PathBuf>> {
    ctx.stage("Linear template registration")?;
    let linear = ctx.run(
        &Flirt::new(&atlas.template_brain, &pre.brain.brain)
            .out(workdir.join(LINEAR_XFM_IMAGE))
            .matrix(MatrixOutput::Derived)
            .dof(REGISTRATION_DOF),
    )?;
    let affine = linear.matrix.ok_or_else(|| missing("flirt", LINEAR_XFM_IMAGE))?;

    ctx.stage("Non-linear template registration")?;
    let nonlinear = ctx.run(
        &Fnirt::new(&atlas.template, &pre.head)
            .affine(affine)
            .out(workdir.join(NONLINEAR_XFM_PREFIX))
            .warped_image(true)
            .field(true)
            .coefficients(true),
    )?;
    let field = nonlinear
        .field
        .ok_or_else(|| missing("fnirt", NONLINEAR_XFM_PREFIX))?;

    let warp = ctx.run(
        &ConvertWarp::new(
            field,
            workdir.join(format!("{NONLINEAR_XFM_PREFIX}_warp")),
            &pre.head,
        )
        .convention(WarpConvention::Relative),
    )?;

    ctx.stage("Warping tissue priors")?;
    [("csf", &atlas.csf), ("gm", &atlas.gm), ("wm", &atlas.wm)]
        .into_iter()
        .map(|(tissue, prior)| {
            ctx.run(
                &ApplyWarp::new(
                    prior,
                    &pre.brain.brain,
                    workdir.join(format!("{NONLINEAR_XFM_PREFIX}_tissue-{tissue}.nii.gz")),
                )
                .warp(&warp)
                .convention(WarpConvention::Relative),
            )
        })
        .collect()
}

/// Build the final maps from FAST's partial volumes
///
/// With atlas priors the partial volumes settle as: 0 is CSF, 3 is GM, and
/// 1 plus 2 cover WM.
fn combine_tissues(
    fast: &FastOutputs,
    workdir: &WorkDir,
    ctx: &mut Context<'_>,
) -> Result<NeonateTissues> {
    let [pve0, pve1, pve2, pve3, ..] = fast.partial_volumes.as_slice() else {
        return Err(invalid_parameter(
            "classes",
            &fast.partial_volumes.len(),
            &"neonatal tissue maps need at least 4 partial volumes",
        ));
    };
    let tissue_path = |tissue: &str| workdir.join(format!("{TISSUE_OUTPUT_PREFIX}-{tissue}.nii.gz"));

    let csf_path = tissue_path("csf");
    ctx.log(&format!("Moving {} to {}", pve0.display(), csf_path.display()))?;
    let csf = rename_image(pve0, &csf_path)?;

    let gm = ctx.run(&FslMaths::new(pve3, tissue_path("gm")).fmean())?;
    let wm = ctx.run(
        &FslMaths::new(pve1, tissue_path("wm"))
            .add(pve2.as_path())
            .fmedian(),
    )?;

    Ok(NeonateTissues {
        csf,
        gm,
        wm,
        mixeltype: fast.mixeltype.clone(),
    })
}

fn missing(program: &str, name: &str) -> SegError {
    SegError::MissingOutput {
        program: program.to_string(),
        path: PathBuf::from(name),
    }
}
