//! Tests for NIfTI header and compression sanity checks

#[cfg(test)]
mod tests {
    use crate::common::{nifti_header, write_nifti};
    use anatseg::SegError;
    use anatseg::nifti::header::{HEADER_SIZE, check_header};
    use anatseg::nifti::validate;
    use std::fs;

    fn header(sizeof_hdr: [u8; 4], magic: [u8; 4]) -> [u8; HEADER_SIZE] {
        let bytes = nifti_header(sizeof_hdr, magic);
        let mut header = [0_u8; HEADER_SIZE];
        header.copy_from_slice(bytes.get(..HEADER_SIZE).expect("Fixture is long enough"));
        header
    }

    // Tests both byte orders of sizeof_hdr are accepted
    // Verified by only accepting little-endian headers
    #[test]
    fn test_check_header_byte_orders() {
        assert!(check_header(&header(348_i32.to_le_bytes(), *b"n+1\0")).is_ok());
        assert!(check_header(&header(348_i32.to_be_bytes(), *b"n+1\0")).is_ok());
        assert!(check_header(&header(348_i32.to_le_bytes(), *b"ni1\0")).is_ok());
    }

    #[test]
    fn test_check_header_rejects_wrong_size() {
        let reason = check_header(&header(540_i32.to_le_bytes(), *b"n+1\0"))
            .expect_err("NIfTI-2 sized headers are rejected");
        assert!(reason.contains("540"));
    }

    #[test]
    fn test_check_header_rejects_wrong_magic() {
        assert!(check_header(&header(348_i32.to_le_bytes(), *b"n+2\0")).is_err());
    }

    #[test]
    fn test_validate_accepts_fixtures() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let compressed = dir.path().join("a.nii.gz");
        let plain = dir.path().join("a.nii");
        write_nifti(&compressed);
        write_nifti(&plain);

        assert!(validate(&compressed).is_ok());
        assert!(validate(&plain).is_ok());
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = validate(&dir.path().join("missing.nii.gz"));
        assert!(matches!(result, Err(SegError::InvalidImage { .. })));
    }

    #[test]
    fn test_validate_directory_is_not_an_image() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let fake = dir.path().join("looks.nii.gz");
        fs::create_dir(&fake).expect("Failed to create directory");
        assert!(validate(&fake).is_err());
    }

    // Tests the extension is checked before content
    #[test]
    fn test_validate_wrong_extension() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("brain.img");
        fs::write(&path, nifti_header(348_i32.to_le_bytes(), *b"n+1\0"))
            .expect("Failed to write file");
        assert!(matches!(
            validate(&path),
            Err(SegError::InvalidImage { reason, .. }) if reason.contains("extension")
        ));
    }

    #[test]
    fn test_validate_uncompressed_content_with_gz_extension() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("brain.nii.gz");
        fs::write(&path, nifti_header(348_i32.to_le_bytes(), *b"n+1\0"))
            .expect("Failed to write file");
        assert!(validate(&path).is_err());
    }

    #[test]
    fn test_validate_truncated_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let short_nii = dir.path().join("short.nii");
        let empty_gz = dir.path().join("empty.nii.gz");
        fs::write(&short_nii, [0x5c_u8, 0x01, 0x00, 0x00]).expect("Failed to write file");
        fs::write(&empty_gz, b"").expect("Failed to write file");

        assert!(validate(&short_nii).is_err());
        assert!(validate(&empty_gz).is_err());
    }
}
