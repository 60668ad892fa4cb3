//! Validated file operations on NIfTI images

use crate::io::error::{Result, file_system};
use crate::nifti::header::validate;
use std::fs;
use std::path::{Path, PathBuf};

/// Validate an input image and return its absolute path
///
/// # Errors
///
/// Returns an error if the image fails validation or the current directory
/// cannot be determined
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    validate(path)?;
    std::path::absolute(path).map_err(file_system(path, "resolve absolute path"))
}

/// Copy a validated image to a new location
///
/// # Errors
///
/// Returns an error if the source fails validation or the copy fails
pub fn copy_image(src: &Path, dst: &Path) -> Result<PathBuf> {
    validate(src)?;
    fs::copy(src, dst).map_err(file_system(dst, "copy image"))?;
    Ok(dst.to_path_buf())
}

/// Move a validated image to a new location
///
/// # Errors
///
/// Returns an error if the source fails validation or the rename fails
pub fn rename_image(src: &Path, dst: &Path) -> Result<PathBuf> {
    validate(src)?;
    fs::rename(src, dst).map_err(file_system(src, "move image"))?;
    Ok(dst.to_path_buf())
}
