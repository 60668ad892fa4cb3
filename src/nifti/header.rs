//! Lightweight NIfTI-1 sanity checks
//!
//! Uncompressed files are checked for a plausible 348 byte header in either
//! byte order. Compressed files are only checked for a gzip stream, since
//! decoding them is left to the tools that consume them.

use crate::io::error::{Result, file_system, invalid_image};
use crate::nifti::path::{has_nifti_extension, is_compressed};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of a NIfTI-1 header in bytes
pub const HEADER_SIZE: usize = 348;

// `sizeof_hdr` as stored in the header itself
const SIZEOF_HDR: i32 = 348;

/// Offset of the magic string within the header
pub const MAGIC_OFFSET: usize = 344;
/// Magic for single-file images
pub const MAGIC_SINGLE: &[u8; 4] = b"n+1\0";
/// Magic for header/image pairs
pub const MAGIC_PAIR: &[u8; 4] = b"ni1\0";
/// First two bytes of every gzip stream
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Validate that a path refers to a NIfTI-1 image
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist or is not a regular file
/// - The extension is neither `.nii` nor `.nii.gz`
/// - The file is too short or its header fields do not match NIfTI-1
pub fn validate(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(invalid_image(path, &"file does not exist"));
    }
    if !has_nifti_extension(path) {
        return Err(invalid_image(path, &"expected a .nii or .nii.gz extension"));
    }

    let mut file = File::open(path).map_err(file_system(path, "open image"))?;

    if is_compressed(path) {
        let mut magic = [0_u8; 2];
        file.read_exact(&mut magic)
            .map_err(|err| invalid_image(path, &format!("file is empty or truncated: {err}")))?;
        if magic != GZIP_MAGIC {
            return Err(invalid_image(path, &"not a gzip compressed file"));
        }
        return Ok(());
    }

    let mut header = [0_u8; HEADER_SIZE];
    file.read_exact(&mut header)
        .map_err(|err| invalid_image(path, &format!("header is truncated: {err}")))?;
    check_header(&header).map_err(|reason| invalid_image(path, &reason))
}

/// Check the `sizeof_hdr` field and magic string of a raw header
///
/// # Errors
///
/// Returns a description of the first mismatching field
pub fn check_header(header: &[u8; HEADER_SIZE]) -> std::result::Result<(), String> {
    let [a, b, c, d, ..] = *header;
    let size_le = i32::from_le_bytes([a, b, c, d]);
    let size_be = i32::from_be_bytes([a, b, c, d]);
    if size_le != SIZEOF_HDR && size_be != SIZEOF_HDR {
        return Err(format!("sizeof_hdr is {size_le}, expected {HEADER_SIZE}"));
    }

    match header.get(MAGIC_OFFSET..HEADER_SIZE) {
        Some(magic) if magic == MAGIC_SINGLE || magic == MAGIC_PAIR => Ok(()),
        _ => Err("missing NIfTI-1 magic".to_string()),
    }
}
