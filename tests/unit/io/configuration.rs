//! Tests for segmentation defaults and tool parameters

#[cfg(test)]
mod tests {
    use anatseg::io::configuration::{
        DEFAULT_CLASSES, DEFAULT_FRAC_INT, DEFAULT_IMAGE_TYPE, MIN_CLASSES, N4_CONVERGENCE,
        N4_MASK_FRAC_INT, N4_SHRINK_FACTOR, NEONATE_CLASSES, NEONATE_FRAC_INT, NEONATE_IMAGE_TYPE,
        NEONATE_MIN_CLASSES, NONLINEAR_XFM_PREFIX, PRIOR_COUNT, REGISTRATION_DOF,
        TISSUE_OUTPUT_PREFIX,
    };
    use anatseg::tools::ImageType;
    use anatseg::tools::flirt::SUPPORTED_DOF;

    // Tests adult defaults target T1w images
    // Verified by swapping adult and neonatal defaults
    #[test]
    fn test_adult_defaults() {
        assert!((DEFAULT_FRAC_INT - 0.5).abs() < f64::EPSILON);
        assert_eq!(DEFAULT_IMAGE_TYPE, ImageType::T1w);
        assert_eq!(DEFAULT_CLASSES, 3);
    }

    #[test]
    fn test_neonate_defaults() {
        assert!((NEONATE_FRAC_INT - 0.3).abs() < f64::EPSILON);
        assert_eq!(NEONATE_IMAGE_TYPE, ImageType::T2w);
        assert_eq!(NEONATE_CLASSES, 5);
    }

    // Tests every default satisfies the bounds enforced at validation
    #[test]
    fn test_defaults_within_bounds() {
        assert!(DEFAULT_CLASSES >= MIN_CLASSES);
        assert!(NEONATE_CLASSES >= NEONATE_MIN_CLASSES);
        assert!(NEONATE_MIN_CLASSES > MIN_CLASSES);
        assert!((0.0..=1.0).contains(&N4_MASK_FRAC_INT));
        assert!(N4_MASK_FRAC_INT < NEONATE_FRAC_INT);
        assert!(SUPPORTED_DOF.contains(&REGISTRATION_DOF));
        assert_eq!(PRIOR_COUNT, 3);
    }

    #[test]
    fn test_n4_parameters() {
        assert_eq!(N4_CONVERGENCE, "[50x50x50,0.001]");
        assert_eq!(N4_SHRINK_FACTOR, 2);
    }

    // Tests output names keep the template-to-native naming scheme
    #[test]
    fn test_output_prefixes() {
        assert!(NONLINEAR_XFM_PREFIX.starts_with("template-to-native_space-native"));
        assert!(TISSUE_OUTPUT_PREFIX.ends_with("_tissue"));
    }
}
