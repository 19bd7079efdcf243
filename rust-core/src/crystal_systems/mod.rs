// Crystal systems module: Contains the metric rules of the seven crystal families
// This module validates candidate unit-cell metrics and derives dependent parameters per family symmetry

// ======================== MODULE DECLARATIONS ========================
pub mod catalog;
pub mod cell_basis;
pub mod constraint_family;
pub mod crystal_family;
pub mod parameter_set;

// Test modules
mod _tests_catalog;
mod _tests_constraint_family;

// ======================== FAMILY IDENTIFICATION ========================
pub use crystal_family::{
    CrystalFamily,                 // enum - closed set of family settings (Monoclinic(UniqueAxis), Trigonal(TrigonalAxes), ...)
    CrystalFamilyIdentification,   // struct - (FamilyType, Variation) lookup key
    FamilyType,                    // enum - Triclinic, Monoclinic, Orthorhombic, Tetragonal, Trigonal, Hexagonal, Cubic
    SpaceGroupClassification,      // struct - International Tables number + variation, maps onto a CrystalFamily
    TrigonalAxes,                  // enum - Hexagonal, Rhombohedral
    UniqueAxis,                    // enum - A, B, C
    Variation,                     // enum - None, UniqueAxisA/B/C, HexagonalAxes, RhombohedralAxes
};

// ======================== METRIC PARAMETERS ========================
pub use parameter_set::{
    MetricParameterSet, // struct - a, b, c, alpha, beta, gamma (radians)
    RADIAN_120,         // const - 2π/3
    RADIAN_90,          // const - π/2
};

// ======================== CONSTRAINT FAMILIES ========================
pub use constraint_family::{
    FixedParameters,        // struct - flags for parameters set by the dependency rules
    MetricConstraintFamily, // struct - family + comparer + bound + accepted parameter set
};
// MetricConstraintFamily impl methods:
//   new(family: CrystalFamily, comparer: NumericComparer, parameter_max: f64) -> Self - seeded with the default set
//   parameters(&self) -> &MetricParameterSet                         - currently accepted set
//   apply_parameter_dependencies(&self, set: &MetricParameterSet) -> MetricParameterSet - derive dependent fields
//   validate_soft_angle_condition(&self, alpha, beta, gamma) -> bool - minimum angle rule of the family
//   validate_soft_parameter_condition(&self, a, b, c) -> bool      - minimum length rule of the family
//   validate_angle_conditions / validate_parameter_conditions       - soft rules plus general/bound checks
//   default_parameter_set(&self) -> MetricParameterSet              - canonical valid set
//   try_set_parameter_values(&self, candidate: &MetricParameterSet) -> Option<Self> - accept-or-reject, never partial

pub use catalog::MetricConstraintCatalog; // struct - builds families with a shared tolerance and length bound
// MetricConstraintCatalog impl methods:
//   new(tolerance: f64, parameter_max: f64) -> Self                 - strict catalog
//   soft() -> Self                                                  - relaxed tolerance for hierarchy checks
//   get_family(&self, id: CrystalFamilyIdentification) -> Result<MetricConstraintFamily> - lookup by identification
//   family_for_space_group(&self, group: &SpaceGroupClassification) -> Result<MetricConstraintFamily> - lookup by group
//   all_families(&self) -> Vec<MetricConstraintFamily>              - one family per setting

// ======================== CELL BASIS ========================
pub use cell_basis::CellBasis; // struct - cartesian cell vectors built from a validated parameter set
