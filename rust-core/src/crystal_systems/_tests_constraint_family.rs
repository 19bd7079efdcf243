#[cfg(test)]
mod _tests_constraint_family {
    use super::super::constraint_family::MetricConstraintFamily;
    use super::super::crystal_family::{CrystalFamily, TrigonalAxes, UniqueAxis};
    use super::super::parameter_set::{MetricParameterSet, RADIAN_120, RADIAN_90};
    use crate::interfaces::NumericComparer;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-10;

    fn family(family: CrystalFamily) -> MetricConstraintFamily {
        MetricConstraintFamily::new(family, NumericComparer::new(TOL), 1000.0)
    }

    fn assert_set_eq(actual: &MetricParameterSet, expected: &MetricParameterSet) {
        for (a, e) in actual.lengths().iter().zip(expected.lengths().iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
        for (a, e) in actual.angles().iter().zip(expected.angles().iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
    }

    // ==================== Defaults ====================

    #[test]
    fn test_every_default_passes_its_own_validators() {
        for setting in CrystalFamily::ALL {
            let family = family(setting);
            let defaults = family.default_parameter_set();
            assert!(
                family.validate_soft_angle_condition(defaults.alpha, defaults.beta, defaults.gamma),
                "{} default fails its angle rule",
                setting
            );
            assert!(
                family.validate_soft_parameter_condition(defaults.a, defaults.b, defaults.c),
                "{} default fails its length rule",
                setting
            );
            assert!(family.is_valid(&defaults));
            assert_eq!(family.parameters(), &defaults);
        }
    }

    #[test]
    fn test_hexagonal_defaults_use_120_degrees() {
        let defaults = family(CrystalFamily::Hexagonal).default_parameter_set();
        assert_relative_eq!(defaults.gamma, RADIAN_120);
        let trigonal = family(CrystalFamily::Trigonal(TrigonalAxes::Hexagonal)).default_parameter_set();
        assert_eq!(defaults, trigonal);
    }

    // ==================== Dependencies ====================

    #[test]
    fn test_cubic_dependencies() {
        let input = MetricParameterSet::from_degrees(2.0, 5.0, 9.0, 70.0, 80.0, 100.0);
        let result = family(CrystalFamily::Cubic).apply_parameter_dependencies(&input);
        assert_set_eq(&result, &MetricParameterSet::from_degrees(2.0, 2.0, 2.0, 90.0, 90.0, 90.0));
    }

    #[test]
    fn test_hexagonal_dependencies() {
        let input = MetricParameterSet::from_degrees(3.0, 4.0, 7.0, 60.0, 70.0, 80.0);
        let result = family(CrystalFamily::Hexagonal).apply_parameter_dependencies(&input);
        assert_set_eq(&result, &MetricParameterSet::new(3.0, 3.0, 7.0, RADIAN_90, RADIAN_90, RADIAN_120));
    }

    #[test]
    fn test_tetragonal_dependencies_keep_b_as_given() {
        // Only the angles are forced. b is not copied from a, unlike the cubic and hexagonal rules.
        let input = MetricParameterSet::from_degrees(2.0, 5.0, 9.0, 70.0, 80.0, 100.0);
        let result = family(CrystalFamily::Tetragonal).apply_parameter_dependencies(&input);
        assert_set_eq(&result, &MetricParameterSet::from_degrees(2.0, 5.0, 9.0, 90.0, 90.0, 90.0));
    }

    #[test]
    fn test_rhombohedral_dependencies() {
        let input = MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 75.0, 80.0, 85.0);
        let result = family(CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral)).apply_parameter_dependencies(&input);
        assert_set_eq(&result, &MetricParameterSet::from_degrees(2.0, 2.0, 2.0, 75.0, 75.0, 75.0));
    }

    #[test]
    fn test_monoclinic_dependencies_keep_unique_angle() {
        let input = MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 75.0, 80.0, 85.0);
        let axis_a = family(CrystalFamily::Monoclinic(UniqueAxis::A)).apply_parameter_dependencies(&input);
        let axis_b = family(CrystalFamily::Monoclinic(UniqueAxis::B)).apply_parameter_dependencies(&input);
        let axis_c = family(CrystalFamily::Monoclinic(UniqueAxis::C)).apply_parameter_dependencies(&input);
        assert_set_eq(&axis_a, &MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 75.0, 90.0, 90.0));
        assert_set_eq(&axis_b, &MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 90.0, 80.0, 90.0));
        assert_set_eq(&axis_c, &MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 90.0, 90.0, 85.0));
    }

    #[test]
    fn test_triclinic_dependencies_are_identity() {
        let input = MetricParameterSet::from_degrees(2.0, 3.0, 4.0, 75.0, 80.0, 85.0);
        assert_eq!(family(CrystalFamily::Triclinic).apply_parameter_dependencies(&input), input);
    }

    // ==================== Soft conditions ====================

    #[test]
    fn test_monoclinic_unique_b_angle_condition() {
        let family = family(CrystalFamily::Monoclinic(UniqueAxis::B));
        let d = f64::to_radians;
        assert!(family.validate_soft_angle_condition(d(90.0), d(77.0), d(90.0)));
        assert!(!family.validate_soft_angle_condition(d(91.0), d(77.0), d(90.0)));
        // The unique angle may itself be right (orthorhombic-like cell)
        assert!(family.validate_soft_angle_condition(d(90.0), d(90.0), d(90.0)));
    }

    #[test]
    fn test_monoclinic_axes_constrain_different_pairs() {
        let d = f64::to_radians;
        let axis_a = family(CrystalFamily::Monoclinic(UniqueAxis::A));
        let axis_c = family(CrystalFamily::Monoclinic(UniqueAxis::C));
        assert!(axis_a.validate_soft_angle_condition(d(100.0), d(90.0), d(90.0)));
        assert!(!axis_a.validate_soft_angle_condition(d(90.0), d(100.0), d(90.0)));
        assert!(axis_c.validate_soft_angle_condition(d(90.0), d(90.0), d(100.0)));
        assert!(!axis_c.validate_soft_angle_condition(d(100.0), d(90.0), d(90.0)));
    }

    #[test]
    fn test_orthorhombic_has_no_length_condition() {
        let family = family(CrystalFamily::Orthorhombic);
        assert!(family.validate_soft_parameter_condition(1.0, 2.0, 3.0));
        assert!(family.validate_soft_angle_condition(RADIAN_90, RADIAN_90, RADIAN_90));
        assert!(!family.validate_soft_angle_condition(RADIAN_90, RADIAN_90, RADIAN_120));
    }

    #[test]
    fn test_rhombohedral_soft_conditions() {
        let family = family(CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral));
        let d = f64::to_radians;
        assert!(family.validate_soft_angle_condition(d(70.0), d(70.0), d(70.0)));
        assert!(!family.validate_soft_angle_condition(d(70.0), d(70.0), d(80.0)));
        assert!(family.validate_soft_parameter_condition(2.0, 2.0, 2.0));
        assert!(!family.validate_soft_parameter_condition(2.0, 2.0, 3.0));
    }

    #[test]
    fn test_cubic_and_hexagonal_length_conditions() {
        let cubic = family(CrystalFamily::Cubic);
        assert!(cubic.validate_soft_parameter_condition(3.0, 3.0, 3.0));
        assert!(!cubic.validate_soft_parameter_condition(3.0, 3.0, 4.0));

        let hexagonal = family(CrystalFamily::Hexagonal);
        assert!(hexagonal.validate_soft_parameter_condition(3.0, 3.0, 5.0));
        assert!(!hexagonal.validate_soft_parameter_condition(3.0, 3.1, 5.0));
    }

    #[test]
    fn test_tolerance_decides_equality() {
        let loose = MetricConstraintFamily::new(CrystalFamily::Cubic, NumericComparer::new(1e-3), 1000.0);
        let strict = family(CrystalFamily::Cubic);
        assert!(loose.validate_soft_parameter_condition(1.0, 1.0005, 0.9995));
        assert!(!strict.validate_soft_parameter_condition(1.0, 1.0005, 0.9995));
    }

    #[test]
    fn test_general_angle_condition() {
        let family = family(CrystalFamily::Triclinic);
        let d = f64::to_radians;
        assert!(family.validate_general_angle_condition(d(80.0), d(85.0), d(95.0)));
        // alpha larger than beta + gamma cannot span a cell
        assert!(!family.validate_general_angle_condition(d(170.0), d(30.0), d(30.0)));
        // alpha = beta + gamma spans a flat cell, also inside the tolerance
        assert!(!family.validate_general_angle_condition(d(60.0), d(30.0), d(30.0)));
        assert!(!family.validate_general_angle_condition(d(60.0) - 1e-12, d(30.0), d(30.0)));
    }

    // ==================== Try set ====================

    #[test]
    fn test_try_set_accepts_and_applies_dependencies() {
        let cubic = family(CrystalFamily::Cubic);
        let candidate = MetricParameterSet::new(4.0, 4.0, 4.0 + 1e-12, RADIAN_90, RADIAN_90, RADIAN_90);
        let accepted = cubic.try_set_parameter_values(&candidate).expect("candidate is cubic");
        assert_eq!(accepted.parameters().c, 4.0);
        assert_eq!(accepted.family(), CrystalFamily::Cubic);
        // The original value is untouched
        assert_eq!(cubic.parameters(), &MetricParameterSet::unit_cube());
    }

    #[test]
    fn test_try_set_rejects_atomically() {
        let tetragonal = family(CrystalFamily::Tetragonal);
        let wrong_angle = MetricParameterSet::from_degrees(2.0, 2.0, 5.0, 90.0, 90.0, 100.0);
        let wrong_length = MetricParameterSet::from_degrees(2.0, 3.0, 5.0, 90.0, 90.0, 90.0);
        assert!(tetragonal.try_set_parameter_values(&wrong_angle).is_none());
        assert!(tetragonal.try_set_parameter_values(&wrong_length).is_none());
        assert_eq!(tetragonal.parameters(), &MetricParameterSet::unit_cube());
    }

    #[test]
    fn test_try_set_respects_length_bound() {
        let bounded = MetricConstraintFamily::new(CrystalFamily::Orthorhombic, NumericComparer::new(TOL), 10.0);
        let too_long = MetricParameterSet::from_degrees(2.0, 3.0, 11.0, 90.0, 90.0, 90.0);
        let negative = MetricParameterSet::from_degrees(-2.0, 3.0, 5.0, 90.0, 90.0, 90.0);
        let zero = MetricParameterSet::from_degrees(0.0, 3.0, 5.0, 90.0, 90.0, 90.0);
        assert!(bounded.try_set_parameter_values(&too_long).is_none());
        assert!(bounded.try_set_parameter_values(&negative).is_none());
        assert!(bounded.try_set_parameter_values(&zero).is_none());
        assert!(bounded
            .try_set_parameter_values(&MetricParameterSet::from_degrees(2.0, 3.0, 10.0, 90.0, 90.0, 90.0))
            .is_some());
    }

    #[test]
    fn test_accepted_sets_stay_valid() {
        let candidate = MetricParameterSet::from_degrees(3.0, 3.0, 3.0, 80.0, 80.0, 80.0);
        let rhombohedral = family(CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral));
        let accepted = rhombohedral.try_set_parameter_values(&candidate).expect("rhombohedral cell");
        assert!(accepted.is_valid(accepted.parameters()));

        // The same cell is also a valid triclinic cell, but not a cubic one
        assert!(family(CrystalFamily::Triclinic).try_set_parameter_values(&candidate).is_some());
        assert!(family(CrystalFamily::Cubic).try_set_parameter_values(&candidate).is_none());
    }

    #[test]
    fn test_fixed_parameter_flags() {
        let cubic = family(CrystalFamily::Cubic).fixed_parameters();
        assert!(!cubic.a && cubic.b && cubic.c && cubic.alpha && cubic.beta && cubic.gamma);
        let monoclinic = family(CrystalFamily::Monoclinic(UniqueAxis::B)).fixed_parameters();
        assert!(monoclinic.alpha && !monoclinic.beta && monoclinic.gamma);
        let triclinic = family(CrystalFamily::Triclinic).fixed_parameters();
        assert!(!triclinic.a && !triclinic.alpha);
    }
}
