//! Tests for the FNIRT wrapper

#[cfg(test)]
mod tests {
    use crate::common::input_image;
    use anatseg::SegError;
    use anatseg::tools::fnirt::DEFAULT_PREFIX;
    use anatseg::tools::{Fnirt, Tool};
    use std::fs;
    use std::path::PathBuf;

    // Tests a full file name as prefix does not double the extension
    // Verified by appending suffixes to the unstripped output name
    #[test]
    fn test_outputs_from_full_file_name() {
        let outputs = Fnirt::new("template.nii.gz", "head.nii.gz")
            .out("out/xfm-nonlinear.nii.gz")
            .warped_image(true)
            .field(true)
            .coefficients(true)
            .outputs();

        assert_eq!(outputs.image, Some(PathBuf::from("out/xfm-nonlinear.nii.gz")));
        assert_eq!(
            outputs.field,
            Some(PathBuf::from("out/xfm-nonlinear_field.nii.gz"))
        );
        assert_eq!(
            outputs.coefficients,
            Some(PathBuf::from("out/xfm-nonlinear_field_coeff.nii.gz"))
        );
    }

    #[test]
    fn test_default_outputs() {
        let outputs = Fnirt::new("template.nii.gz", "head.nii.gz")
            .field(true)
            .outputs();

        assert!(outputs.image.is_none());
        assert!(outputs.coefficients.is_none());
        assert_eq!(
            outputs.field,
            Some(PathBuf::from(format!("{DEFAULT_PREFIX}_field.nii.gz")))
        );
    }

    #[test]
    fn test_command() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let template = input_image(dir.path(), "template.nii.gz");
        let head = input_image(dir.path(), "anat_restore.nii.gz");
        let affine = dir.path().join("linear.mat");
        fs::write(&affine, "1 0 0 0\n").expect("Failed to write matrix");
        let prefix = dir.path().join("nonlinear");

        let cmd = Fnirt::new(&template, &head)
            .affine(&affine)
            .out(&prefix)
            .field(true)
            .command()
            .expect("Valid FNIRT command");

        assert_eq!(cmd.program(), "fnirt");
        assert_eq!(
            cmd.argument_strings(),
            vec![
                format!("--in={}", template.display()),
                format!("--ref={}", head.display()),
                "-v".to_string(),
                format!("--aff={}", affine.display()),
                format!("--fout={}", dir.path().join("nonlinear_field.nii.gz").display()),
            ]
        );
        assert_eq!(cmd.outputs().len(), 1);
    }

    #[test]
    fn test_missing_affine() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = input_image(dir.path(), "a.nii.gz");

        let result = Fnirt::new(&image, &image)
            .affine(dir.path().join("missing.mat"))
            .command();
        assert!(matches!(
            result,
            Err(SegError::InvalidParameter { parameter: "affine", .. })
        ));
    }
}
