//! Shared state for running tools within one pipeline invocation

use crate::command::{Command, Executor, OutputKind};
use crate::io::error::{Result, SegError};
use crate::io::logging::LogFile;
use crate::io::progress::StageProgress;
use crate::nifti::validate;
use crate::tools::Tool;

/// Executor, log, and progress display for a run
///
/// Every command goes through [`Context::execute`], which checks the program
/// is installed, runs it, and then verifies each declared output.
pub struct Context<'a> {
    executor: &'a dyn Executor,
    log: LogFile,
    progress: StageProgress,
    stage_open: bool,
}

impl<'a> Context<'a> {
    /// Bundle the pieces of a run
    pub fn new(executor: &'a dyn Executor, log: LogFile, progress: StageProgress) -> Self {
        Self {
            executor,
            log,
            progress,
            stage_open: false,
        }
    }

    /// Executor used for every command
    pub fn executor(&self) -> &'a dyn Executor {
        self.executor
    }

    /// Run log
    pub const fn log_file(&mut self) -> &mut LogFile {
        &mut self.log
    }

    /// Append a message to the run log
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written
    pub fn log(&mut self, message: &str) -> Result<()> {
        self.log.log(message)
    }

    /// Close the current stage, if any, and open the next one
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written
    pub fn stage(&mut self, name: &str) -> Result<()> {
        if self.stage_open {
            self.progress.complete_stage();
        }
        self.stage_open = true;
        self.progress.start_stage(name);
        tracing::info!("{name}");
        self.log.log(&format!("Stage: {name}"))
    }

    /// Run a tool and return its outputs once they are verified
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be built, fails, or does not
    /// produce its declared outputs
    pub fn run<T: Tool>(&mut self, tool: &T) -> Result<T::Output> {
        let cmd = tool.command()?;
        self.execute(&cmd)?;
        Ok(tool.outputs())
    }

    /// Execute a prepared command and verify its declared outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the program is missing, fails, or does not
    /// produce its declared outputs
    pub fn execute(&mut self, cmd: &Command) -> Result<()> {
        if !self.executor.is_available(cmd.program()) {
            return Err(SegError::DependencyMissing {
                program: cmd.program().to_string(),
            });
        }

        self.executor.execute(cmd, &mut self.log)?;
        verify_outputs(cmd)
    }

    /// Close the last stage and hand back the log
    pub fn finish(mut self) -> LogFile {
        if self.stage_open {
            self.progress.complete_stage();
        }
        self.progress.finish();
        self.log
    }

    /// Number of stages completed so far
    pub const fn completed_stages(&self) -> usize {
        self.progress.completed()
    }
}

fn verify_outputs(cmd: &Command) -> Result<()> {
    for output in cmd.outputs() {
        if !output.path.exists() {
            return Err(SegError::MissingOutput {
                program: cmd.program().to_string(),
                path: output.path.clone(),
            });
        }
        if output.kind == OutputKind::Nifti {
            validate(&output.path)?;
        }
    }
    Ok(())
}
