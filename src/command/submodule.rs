//! Refreshing vendored git submodules

use crate::command::builder::Command;
use crate::command::executor::Executor;
use crate::io::error::{Result, SegError};
use crate::io::logging::LogFile;
use std::path::Path;

/// Pull every submodule to its remote tracking branch and merge
pub fn update_command(repo: &Path) -> Command {
    Command::new("git")
        .args(["submodule", "update", "--remote", "--merge"])
        .current_dir(repo)
}

/// Update the submodules of a repository checkout
///
/// # Errors
///
/// Returns an error if git is missing or the update fails; a failed update
/// carries git's exit status
pub fn update_submodules(repo: &Path, executor: &dyn Executor, log: &mut LogFile) -> Result<()> {
    let cmd = update_command(repo);
    if !executor.is_available(cmd.program()) {
        return Err(SegError::DependencyMissing {
            program: cmd.program().to_string(),
        });
    }
    executor.execute(&cmd, log)
}
