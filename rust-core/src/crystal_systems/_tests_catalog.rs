#[cfg(test)]
mod _tests_catalog {
    use super::super::catalog::MetricConstraintCatalog;
    use super::super::crystal_family::{
        CrystalFamily, CrystalFamilyIdentification, FamilyType, SpaceGroupClassification, TrigonalAxes, UniqueAxis,
        Variation,
    };
    use super::super::parameter_set::MetricParameterSet;
    use crate::config::{SymmetryConfig, SOFT_TOLERANCE};

    // ==================== Identification ====================

    #[test]
    fn test_identification_round_trip_for_every_setting() {
        for family in CrystalFamily::ALL {
            let identification = family.identification();
            assert_eq!(CrystalFamily::from_identification(identification).unwrap(), family);
            assert_eq!(CrystalFamily::try_from(identification).unwrap(), family);
        }
    }

    #[test]
    fn test_trigonal_without_variation_uses_hexagonal_axes() {
        let identification = CrystalFamilyIdentification::new(FamilyType::Trigonal, Variation::None);
        assert_eq!(
            CrystalFamily::from_identification(identification).unwrap(),
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal)
        );
    }

    #[test]
    fn test_unknown_identification_is_an_error() {
        let catalog = MetricConstraintCatalog::default();
        let invalid = [
            CrystalFamilyIdentification::new(FamilyType::Cubic, Variation::UniqueAxisB),
            CrystalFamilyIdentification::new(FamilyType::Monoclinic, Variation::None),
            CrystalFamilyIdentification::new(FamilyType::Hexagonal, Variation::RhombohedralAxes),
        ];
        for identification in invalid {
            let err = catalog.get_family(identification).unwrap_err();
            assert!(err.to_string().contains("No crystal family"), "{}", err);
        }
    }

    #[test]
    fn test_parse_family_and_variation() {
        assert_eq!("Cubic".parse::<FamilyType>().unwrap(), FamilyType::Cubic);
        assert_eq!(" monoclinic ".parse::<FamilyType>().unwrap(), FamilyType::Monoclinic);
        assert!("quasicrystal".parse::<FamilyType>().is_err());
        assert_eq!("b".parse::<Variation>().unwrap(), Variation::UniqueAxisB);
        assert_eq!("rhombohedral".parse::<Variation>().unwrap(), Variation::RhombohedralAxes);
        assert_eq!("".parse::<Variation>().unwrap(), Variation::None);
        assert!("d".parse::<Variation>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CrystalFamily::Cubic.to_string(), "Cubic");
        assert_eq!(CrystalFamily::Monoclinic(UniqueAxis::C).to_string(), "Monoclinic (unique axis C)");
        assert_eq!(
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral).to_string(),
            "Trigonal (rhombohedral axes)"
        );
        assert_eq!(CrystalFamily::Trigonal(TrigonalAxes::Hexagonal).name(), "Trigonal");
    }

    // ==================== Space groups ====================

    #[test]
    fn test_space_group_number_ranges() {
        let cases = [
            (1, FamilyType::Triclinic),
            (2, FamilyType::Triclinic),
            (3, FamilyType::Monoclinic),
            (15, FamilyType::Monoclinic),
            (16, FamilyType::Orthorhombic),
            (74, FamilyType::Orthorhombic),
            (75, FamilyType::Tetragonal),
            (142, FamilyType::Tetragonal),
            (143, FamilyType::Trigonal),
            (167, FamilyType::Trigonal),
            (168, FamilyType::Hexagonal),
            (194, FamilyType::Hexagonal),
            (195, FamilyType::Cubic),
            (230, FamilyType::Cubic),
        ];
        for (number, expected) in cases {
            let group = SpaceGroupClassification::new(number, Variation::None);
            assert_eq!(group.family_type().unwrap(), expected, "space group {}", number);
        }
        assert!(SpaceGroupClassification::new(0, Variation::None).family_type().is_err());
        assert!(SpaceGroupClassification::new(231, Variation::None).family_type().is_err());
    }

    #[test]
    fn test_space_group_settings() {
        let catalog = MetricConstraintCatalog::default();

        // P2_1/c defaults to unique axis b
        let p21c = catalog
            .family_for_space_group(&SpaceGroupClassification::new(14, Variation::None))
            .unwrap();
        assert_eq!(p21c.family(), CrystalFamily::Monoclinic(UniqueAxis::B));

        let p21c_c = catalog
            .family_for_space_group(&SpaceGroupClassification::new(14, Variation::UniqueAxisC))
            .unwrap();
        assert_eq!(p21c_c.family(), CrystalFamily::Monoclinic(UniqueAxis::C));

        // R-3m in both settings
        let r3m_h = catalog
            .family_for_space_group(&SpaceGroupClassification::new(166, Variation::HexagonalAxes))
            .unwrap();
        let r3m_r = catalog
            .family_for_space_group(&SpaceGroupClassification::new(166, Variation::RhombohedralAxes))
            .unwrap();
        assert_eq!(r3m_h.family(), CrystalFamily::Trigonal(TrigonalAxes::Hexagonal));
        assert_eq!(r3m_r.family(), CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral));

        // Fm-3m ignores the variation
        let fm3m = catalog
            .family_for_space_group(&SpaceGroupClassification::new(225, Variation::UniqueAxisA))
            .unwrap();
        assert_eq!(fm3m.family(), CrystalFamily::Cubic);
    }

    #[test]
    fn test_monoclinic_group_with_foreign_variation_is_rejected() {
        let catalog = MetricConstraintCatalog::default();
        let group = SpaceGroupClassification::new(14, Variation::RhombohedralAxes);
        assert!(catalog.family_for_space_group(&group).is_err());
    }

    // ==================== Catalog ====================

    #[test]
    fn test_all_families_are_distinct_and_default_seeded() {
        let catalog = MetricConstraintCatalog::default();
        let families = catalog.all_families();
        assert_eq!(families.len(), 10);
        for (family, expected) in families.iter().zip(CrystalFamily::ALL) {
            assert_eq!(family.family(), expected);
            assert_eq!(family.parameters(), &family.default_parameter_set());
        }
    }

    #[test]
    fn test_strict_and_soft_catalogs_differ_only_in_tolerance() {
        let strict = MetricConstraintCatalog::default();
        let soft = MetricConstraintCatalog::soft();
        assert_eq!(soft.comparer().tolerance(), SOFT_TOLERANCE);

        // Lengths differing by 1e-8 are equal to the soft catalog only
        let candidate = MetricParameterSet::from_degrees(2.0, 2.0 + 1e-8, 2.0, 90.0, 90.0, 90.0);
        let strict_cubic = strict.create(CrystalFamily::Cubic);
        let soft_cubic = soft.create(CrystalFamily::Cubic);
        assert!(strict_cubic.try_set_parameter_values(&candidate).is_none());
        let accepted = soft_cubic.try_set_parameter_values(&candidate).unwrap();
        assert_eq!(accepted.parameters().b, 2.0);
    }

    #[test]
    fn test_catalog_from_config() {
        let config = SymmetryConfig {
            parameter_max: 5.0,
            ..SymmetryConfig::default()
        };
        let catalog = MetricConstraintCatalog::from_config(&config);
        assert_eq!(catalog.parameter_max(), 5.0);
        let orthorhombic = catalog.create(CrystalFamily::Orthorhombic);
        let too_long = MetricParameterSet::from_degrees(1.0, 2.0, 6.0, 90.0, 90.0, 90.0);
        assert!(orthorhombic.try_set_parameter_values(&too_long).is_none());
    }

    #[test]
    fn test_cubic_cell_passes_the_lower_families() {
        let catalog = MetricConstraintCatalog::default();
        let cubic_cell = MetricParameterSet::from_degrees(3.0, 3.0, 3.0, 90.0, 90.0, 90.0);
        let accepting: Vec<CrystalFamily> = catalog
            .all_families()
            .into_iter()
            .filter(|family| family.try_set_parameter_values(&cubic_cell).is_some())
            .map(|family| family.family())
            .collect();
        assert!(accepting.contains(&CrystalFamily::Triclinic));
        assert!(accepting.contains(&CrystalFamily::Orthorhombic));
        assert!(accepting.contains(&CrystalFamily::Tetragonal));
        assert!(accepting.contains(&CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral)));
        assert!(accepting.contains(&CrystalFamily::Cubic));
        assert!(!accepting.contains(&CrystalFamily::Hexagonal));
    }
}
