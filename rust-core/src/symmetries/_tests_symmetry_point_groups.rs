#[cfg(test)]
mod _tests_symmetry_point_groups {
    use super::super::symmetry_operations::SymmetryOperation;
    use super::super::symmetry_point_groups::*;
    use crate::crystal_systems::{
        CellBasis, CrystalFamily, MetricConstraintCatalog, MetricParameterSet, TrigonalAxes, UniqueAxis,
    };
    use crate::config::{SymmetryConfig, DEFAULT_TRIM_TOLERANCE};
    use crate::interfaces::NumericComparer;
    use nalgebra::Vector3;
    use approx::assert_relative_eq;

    fn assert_is_group(operations: &[SymmetryOperation]) {
        assert!(operations[0].is_identity());
        for lhs in operations {
            let inverse = lhs.inverse().unwrap();
            assert!(operations.iter().any(|op| op.rotation == inverse.rotation));
            for rhs in operations {
                let product = lhs.compose(rhs);
                assert!(
                    operations.iter().any(|op| op.rotation == product.rotation),
                    "{} * {} leaves the group",
                    lhs,
                    rhs
                );
            }
        }
    }

    #[test]
    fn test_group_orders() {
        assert_eq!(generate_identity_operations().len(), 1);
        assert_eq!(generate_triclinic_operations().len(), 2);
        assert_eq!(generate_monoclinic_operations(UniqueAxis::B).len(), 4);
        assert_eq!(generate_orthorhombic_operations().len(), 8);
        assert_eq!(generate_tetragonal_operations().len(), 16);
        assert_eq!(generate_trigonal_operations(TrigonalAxes::Hexagonal).len(), 12);
        assert_eq!(generate_trigonal_operations(TrigonalAxes::Rhombohedral).len(), 12);
        assert_eq!(generate_hexagonal_operations().len(), 24);
        assert_eq!(generate_cubic_operations().len(), 48);
    }

    #[test]
    fn test_groups_are_closed() {
        for family in CrystalFamily::ALL {
            assert_is_group(&generate_family_operations(&family));
        }
    }

    #[test]
    fn test_cubic_operations_are_signed_permutations() {
        let operations = generate_cubic_operations();
        for operation in &operations {
            for row in operation.rotation.row_iter() {
                assert_eq!(row.iter().filter(|&&x| x != 0).count(), 1);
            }
            assert!(operation.translation.iter().all(|&t| t == 0.0));
        }
        for (i, lhs) in operations.iter().enumerate() {
            assert!(operations[i + 1..].iter().all(|rhs| rhs.rotation != lhs.rotation));
        }
    }

    #[test]
    fn test_operations_preserve_family_metric() {
        let catalog = MetricConstraintCatalog::default();
        let cases = [
            (CrystalFamily::Triclinic, MetricParameterSet::from_degrees(3.0, 4.0, 5.0, 80.0, 85.0, 95.0)),
            (CrystalFamily::Monoclinic(UniqueAxis::A), MetricParameterSet::from_degrees(3.0, 4.0, 5.0, 100.0, 90.0, 90.0)),
            (CrystalFamily::Monoclinic(UniqueAxis::B), MetricParameterSet::from_degrees(3.0, 4.0, 5.0, 90.0, 100.0, 90.0)),
            (CrystalFamily::Monoclinic(UniqueAxis::C), MetricParameterSet::from_degrees(3.0, 4.0, 5.0, 90.0, 90.0, 100.0)),
            (CrystalFamily::Orthorhombic, MetricParameterSet::from_degrees(3.0, 4.0, 5.0, 90.0, 90.0, 90.0)),
            (CrystalFamily::Tetragonal, MetricParameterSet::from_degrees(3.0, 3.0, 5.0, 90.0, 90.0, 90.0)),
            (CrystalFamily::Trigonal(TrigonalAxes::Hexagonal), MetricParameterSet::from_degrees(3.0, 3.0, 5.0, 90.0, 90.0, 120.0)),
            (CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral), MetricParameterSet::from_degrees(3.0, 3.0, 3.0, 80.0, 80.0, 80.0)),
            (CrystalFamily::Hexagonal, MetricParameterSet::from_degrees(3.0, 3.0, 5.0, 90.0, 90.0, 120.0)),
            (CrystalFamily::Cubic, MetricParameterSet::from_degrees(3.0, 3.0, 3.0, 90.0, 90.0, 90.0)),
        ];

        for (family, parameters) in cases {
            let accepted = catalog
                .create(family)
                .try_set_parameter_values(&parameters)
                .unwrap_or_else(|| panic!("{} rejected its own test cell", family));
            let metric = CellBasis::from_family(&accepted).unwrap().metric();
            for operation in generate_family_operations(&family) {
                let linear = operation.linear();
                assert_relative_eq!(linear.transpose() * metric * linear, metric, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_determinants_are_unit() {
        let comparer = NumericComparer::new(1e-12);
        for family in CrystalFamily::ALL {
            for operation in generate_family_operations(&family) {
                assert!(comparer.equals(operation.linear().determinant().abs(), 1.0));
            }
        }
    }

    #[test]
    fn test_lookup_by_symbol() {
        assert_eq!(operations_for_symbol("m-3m").unwrap().len(), 48);
        assert_eq!(operations_for_symbol(" 6/mmm ").unwrap().len(), 24);
        assert_eq!(operations_for_symbol("-3m:r").unwrap().len(), 12);
        assert_eq!(operations_for_symbol("1").unwrap().len(), 1);
        assert!(operations_for_symbol("432").is_err());
    }

    #[test]
    fn test_configured_trim_tolerance() {
        let default = configured_operations("m-3m", &SymmetryConfig::default()).unwrap();
        assert!(default.iter().all(|op| op.trim_tolerance == DEFAULT_TRIM_TOLERANCE));

        let config = SymmetryConfig {
            trim_tolerance: 1e-3,
            ..SymmetryConfig::default()
        };
        let loose = configured_operations("m-3m", &config).unwrap();
        assert_eq!(loose.len(), 48);
        assert!(loose.iter().all(|op| op.trim_tolerance == 1e-3));
        // The identity now snaps 0.9995 onto the next integer
        assert_eq!(loose[0].apply(Vector3::new(0.9995, 0.25, 0.0)), Vector3::new(1.0, 0.25, 0.0));
        assert_eq!(default[0].apply(Vector3::new(0.9995, 0.25, 0.0)), Vector3::new(0.9995, 0.25, 0.0));

        assert!(configured_operations("432", &config).is_err());
    }
}
