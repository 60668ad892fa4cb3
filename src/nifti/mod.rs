//! NIfTI-1 file handling
//!
//! Only file-level concerns live here: extension handling for FSL style
//! output prefixes, header sanity checks, and validated copy/rename. Voxel
//! data is never decoded; all image arithmetic is delegated to FSL.

/// Validated copy, rename, and input resolution
pub mod file;
/// Header and compression sanity checks
pub mod header;
/// Extension handling and FSL prefix conventions
pub mod path;

pub use file::{copy_image, rename_image, resolve_input};
pub use header::validate;
pub use path::{has_nifti_extension, strip_extension, suffixed, with_nifti_extension};
