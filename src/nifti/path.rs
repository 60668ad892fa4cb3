//! Extension handling for NIfTI paths and FSL output prefixes
//!
//! FSL tools take output *prefixes* and append `.nii.gz` themselves, so most
//! wrappers need to go back and forth between a prefix and a full file name.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Compressed NIfTI extension, the FSL default output type
pub const NII_GZ: &str = ".nii.gz";
/// Uncompressed NIfTI extension
pub const NII: &str = ".nii";

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Check whether a path ends in `.nii` or `.nii.gz`
pub fn has_nifti_extension(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(NII_GZ) || name.ends_with(NII))
}

/// Check whether a path ends in `.nii.gz`
pub fn is_compressed(path: &Path) -> bool {
    file_name(path).is_some_and(|name| name.ends_with(NII_GZ))
}

/// Remove the image extension, giving the prefix FSL expects
///
/// `.nii.gz` is removed as a unit. Anything else is already a prefix and is
/// returned unchanged, dots included.
pub fn strip_extension(path: &Path) -> PathBuf {
    let stem = file_name(path).and_then(|name| {
        name.strip_suffix(NII_GZ)
            .or_else(|| name.strip_suffix(NII))
            .filter(|stem| !stem.is_empty())
    });

    match stem {
        Some(stem) => path.with_file_name(stem),
        None => path.to_path_buf(),
    }
}

/// Append a suffix to the prefix of a path and give it a `.nii.gz` extension
///
/// `suffixed("out/anat.nii.gz", "_restore")` is `out/anat_restore.nii.gz`.
pub fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = strip_extension(path).into_os_string();
    name.push(suffix);
    name.push(NII_GZ);
    PathBuf::from(name)
}

/// Force a `.nii.gz` extension, replacing any existing NIfTI extension
pub fn with_nifti_extension(path: &Path) -> PathBuf {
    if is_compressed(path) {
        return path.to_path_buf();
    }
    suffixed(path, "")
}
