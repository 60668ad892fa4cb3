//! Tests for fslmaths operation chains

#[cfg(test)]
mod tests {
    use crate::common::input_image;
    use anatseg::tools::{DataType, FslMaths, Operand, Tool};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_operand_conversions() {
        assert_eq!(Operand::from(2.5), Operand::Number(2.5));
        assert_eq!(
            Operand::from(PathBuf::from("a.nii.gz")),
            Operand::Image(PathBuf::from("a.nii.gz"))
        );
        assert_eq!(
            Operand::from(Path::new("b.nii.gz")),
            Operand::Image(PathBuf::from("b.nii.gz"))
        );
    }

    #[test]
    fn test_data_type_names() {
        let names: Vec<_> = [
            DataType::Char,
            DataType::Short,
            DataType::Int,
            DataType::Float,
            DataType::Double,
            DataType::Input,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["char", "short", "int", "float", "double", "input"]);
    }

    // Tests operations render in call order between input and output
    // Verified by sorting operations before rendering
    #[test]
    fn test_chain_order() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let pve1 = input_image(dir.path(), "pve_1.nii.gz");
        let pve2 = input_image(dir.path(), "pve_2.nii.gz");
        let out = dir.path().join("tissue-wm");

        let tool = FslMaths::new(&pve1, &out).add(pve2.as_path()).fmedian();
        let cmd = tool.command().expect("Valid fslmaths command");
        let written = dir.path().join("tissue-wm.nii.gz");

        assert_eq!(cmd.program(), "fslmaths");
        assert_eq!(
            cmd.argument_strings(),
            vec![
                pve1.to_string_lossy().into_owned(),
                "-add".to_string(),
                pve2.to_string_lossy().into_owned(),
                "-fmedian".to_string(),
                written.to_string_lossy().into_owned(),
            ]
        );
        assert_eq!(tool.outputs(), written);
    }

    #[test]
    fn test_data_types_and_scalars() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = input_image(dir.path(), "a.nii.gz");
        let mask = input_image(dir.path(), "mask.nii.gz");
        let out = dir.path().join("b.nii.gz");

        let cmd = FslMaths::new(&image, &out)
            .internal_type(DataType::Float)
            .thr_percent(10.0)
            .thr(0.5)
            .mask(&mask)
            .ero(2)
            .sub(1.0)
            .mul(2.0)
            .div(4.0)
            .fmean()
            .output_type(DataType::Short)
            .command()
            .expect("Valid fslmaths command");

        let args = cmd.argument_strings();
        let image_arg = image.to_string_lossy().into_owned();
        let mask_arg = mask.to_string_lossy().into_owned();
        let out_arg = out.to_string_lossy().into_owned();
        let expected = [
            "-dt", "float", &image_arg, "-thrP", "10", "-thr", "0.5", "-mas", &mask_arg, "-ero",
            "-ero", "-sub", "1", "-mul", "2", "-div", "4", "-fmean", &out_arg, "-odt", "short",
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn test_missing_operand_image() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let image = input_image(dir.path(), "a.nii.gz");

        let result = FslMaths::new(&image, dir.path().join("out"))
            .add(dir.path().join("missing.nii.gz"))
            .command();
        assert!(result.is_err());
    }
}
