//! Tests for the N4 wrapper and executable discovery

#[cfg(test)]
mod tests {
    use crate::common::{FakeExecutor, input_image};
    use anatseg::SegError;
    use anatseg::io::configuration::{N4_FALLBACK_PROGRAM, N4_PROGRAM};
    use anatseg::tools::n4::resolve_program;
    use anatseg::tools::{N4, Tool};

    #[test]
    fn test_resolve_prefers_ants_name() {
        let executor = FakeExecutor::new();
        assert_eq!(
            resolve_program(&executor).expect("Both available"),
            N4_PROGRAM
        );
    }

    // Tests the dHCP executable name is used when ANTs is absent
    // Verified by only checking the ANTs name
    #[test]
    fn test_resolve_falls_back() {
        let executor = FakeExecutor::new().without(N4_PROGRAM);
        assert_eq!(
            resolve_program(&executor).expect("Fallback available"),
            N4_FALLBACK_PROGRAM
        );
    }

    #[test]
    fn test_resolve_neither_available() {
        let executor = FakeExecutor::new()
            .without(N4_PROGRAM)
            .without(N4_FALLBACK_PROGRAM);
        assert!(matches!(
            resolve_program(&executor),
            Err(SegError::DependencyMissing { program }) if program == N4_PROGRAM
        ));
    }

    #[test]
    fn test_command() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = input_image(dir.path(), "T2w.nii.gz");
        let mask = input_image(dir.path(), "brain_mask.nii.gz");
        let restore = dir.path().join("restore.nii.gz");
        let bias = dir.path().join("bias");

        let tool = N4::new(&image, &restore, &bias)
            .mask(&mask)
            .program(N4_FALLBACK_PROGRAM);
        let cmd = tool.command().expect("Valid N4 command");
        let bias_written = dir.path().join("bias.nii.gz");

        assert_eq!(cmd.program(), "N4");
        assert_eq!(
            cmd.argument_strings(),
            vec![
                "-i".to_string(),
                image.to_string_lossy().into_owned(),
                "-x".to_string(),
                mask.to_string_lossy().into_owned(),
                "-o".to_string(),
                format!("[{},{}]", restore.display(), bias_written.display()),
                "-c".to_string(),
                "[50x50x50,0.001]".to_string(),
                "-s".to_string(),
                "2".to_string(),
                "-b".to_string(),
                "[100,3]".to_string(),
                "-t".to_string(),
                "[0.15,0.01,200]".to_string(),
            ]
        );

        let outputs = tool.outputs();
        assert_eq!(outputs.restore, restore);
        assert_eq!(outputs.bias, bias_written);
    }

    #[test]
    fn test_command_without_mask() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = input_image(dir.path(), "T1w.nii.gz");

        let cmd = N4::new(&image, dir.path().join("r"), dir.path().join("b"))
            .command()
            .expect("Valid N4 command");

        assert_eq!(cmd.program(), N4_PROGRAM);
        assert!(!cmd.argument_strings().contains(&"-x".to_string()));
    }
}
