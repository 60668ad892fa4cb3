//! Command-line interface for segmentation runs and repository maintenance

use crate::command::Executor;
use crate::command::submodule::update_submodules;
use crate::io::configuration::{ATLAS_DIR_ENV, LOG_FILE_NAME};
use crate::io::error::Result;
use crate::io::logging::LogFile;
use crate::io::progress::StageProgress;
use crate::io::workdir::WorkDir;
use crate::pipeline::{BiasCorrection, Context, Segmentation, SegmentationConfig, segment};
use crate::tools::ImageType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "anatseg")]
#[command(
    author,
    version,
    about = "Anatomical segmentation of structural brain MR images using FSL and ANTs",
    arg_required_else_help = true
)]
/// Command-line arguments for anatseg
pub struct Cli {
    /// Show every command and its output on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to perform
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Operations offered by the binary
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Segment a structural image into tissue classes
    Segment(SegmentArgs),
    /// Pull git submodules to their remote branches and merge
    UpdateSubmodules(UpdateArgs),
}

/// Options of the `segment` subcommand
///
/// Unset numeric options take the adult defaults, or the neonatal ones with
/// `--neonate`.
#[derive(Args, Debug, Clone)]
// Mode switches map one-to-one onto pipeline options
#[allow(clippy::struct_excessive_bools)]
pub struct SegmentArgs {
    /// Structural input image (T1w, or T2w for neonates), not skull-stripped
    #[arg(short, long, value_name = "NIFTI")]
    pub image: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// BET fractional intensity threshold (0 to 1); smaller values give
    /// larger brain outline estimates
    #[arg(short, long, value_name = "FLOAT")]
    pub frac_int: Option<f64>,

    /// Use ANTs N4 for bias field correction (recommended)
    #[arg(long = "N4")]
    pub n4: bool,

    /// Skip bias field correction
    #[arg(long)]
    pub no_bias: bool,

    /// Input image type: 1 (T1w), 2 (T2w), or 3 (PD)
    #[arg(short = 't', long = "type", value_name = "INT")]
    pub image_type: Option<u8>,

    /// Number of tissue classes
    #[arg(short, long, value_name = "INT")]
    pub classes: Option<u8>,

    /// Alternative CSF, GM, and WM priors in native space, in that order
    #[arg(short, long, value_name = "NIFTI", num_args = 1..)]
    pub priors: Vec<PathBuf>,

    /// Atlas-based segmentation for neonates
    #[arg(long)]
    pub neonate: bool,

    /// Directory containing the UNC neonatal atlas or its archive
    #[arg(long, env = ATLAS_DIR_ENV, value_name = "DIR")]
    pub atlas_dir: Option<PathBuf>,
}

/// Options of the `update-submodules` subcommand
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Repository checkout to update
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,
}

impl SegmentArgs {
    /// Apply the mode defaults and explicit overrides, then validate
    ///
    /// # Errors
    ///
    /// Returns an error if the image type code is unknown or the resulting
    /// configuration is invalid
    pub fn resolve(&self) -> Result<SegmentationConfig> {
        let mut config = SegmentationConfig::new(&self.image, &self.output_dir, self.neonate);

        if let Some(frac_int) = self.frac_int {
            config.frac_int = frac_int;
        }
        if let Some(code) = self.image_type {
            config.image_type = ImageType::from_code(code)?;
        }
        if let Some(classes) = self.classes {
            config.classes = classes;
        }

        if self.n4 && self.no_bias {
            tracing::warn!("--no-bias overrides --N4, skipping bias field correction");
        }
        config.bias_correction = BiasCorrection::from_flags(self.n4, self.no_bias);

        if self.neonate && !self.priors.is_empty() {
            tracing::warn!("--priors is ignored with --neonate, the atlas priors are used");
        } else {
            config.priors.clone_from(&self.priors);
        }
        config.atlas_dir.clone_from(&self.atlas_dir);

        config.validate()?;
        Ok(config)
    }
}

/// Dispatches a parsed command line
pub struct Application {
    cli: Cli,
}

impl Application {
    /// Wrap parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or the operation fails
    pub fn run(&self, executor: &dyn Executor) -> Result<()> {
        match &self.cli.command {
            CliCommand::Segment(args) => self.segment(args, executor),
            CliCommand::UpdateSubmodules(args) => {
                let mut log = LogFile::console();
                update_submodules(&args.repo, executor, &mut log)
            }
        }
    }

    fn segment(&self, args: &SegmentArgs, executor: &dyn Executor) -> Result<()> {
        let config = args.resolve()?;
        let workdir = WorkDir::create(&config.out_dir)?;

        let mut log = LogFile::create(workdir.join(LOG_FILE_NAME))?;
        log.log(&format!("anatseg v{}", env!("CARGO_PKG_VERSION")))?;

        let progress = StageProgress::for_terminal(self.cli.quiet);
        let mut ctx = Context::new(executor, log, progress);
        let outcome = segment(&config, &mut ctx);
        let mut log = ctx.finish();

        match outcome {
            Ok(segmentation) => {
                log.log("Segmentation complete")?;
                print_outputs(&segmentation);
                Ok(())
            }
            Err(error) => {
                log.log(&format!("Segmentation failed: {error}"))?;
                Err(error)
            }
        }
    }
}

// Output paths go to stdout so they can be piped
#[allow(clippy::print_stdout)]
fn print_outputs(segmentation: &Segmentation) {
    for file in segmentation.files() {
        println!("{}", file.display());
    }
}
