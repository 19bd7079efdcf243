// Symmetries module: Contains symmetry operations, reference point groups and the site orbit engine
// This module reduces point sequences around an origin site to their symmetry distinct representatives

// ======================== MODULE DECLARATIONS ========================
pub mod permutations;
pub mod point_operation_group;
pub mod symmetry_operations;
pub mod symmetry_point_groups;

mod _tests_symmetry_point_groups;

// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::{
    wrap_to_unit_cell, // fn(point: &Fractional3D, tolerance: f64) -> Fractional3D - wraps coordinates into [0, 1)
    SymmetryOperation, // struct - integer linear part + fractional translation + trim tolerance
};
// SymmetryOperation impl methods:
//   new(rotation: Matrix3<i8>, translation: Vector3<f64>) -> Self  - creates operation with default trim tolerance
//   identity() -> Self                                             - creates identity operation
//   from_xyz(literal: &str) -> Result<Self>                        - parses "-y,x-y,z+1/3"
//   to_xyz(&self) -> String                                        - renders the coordinate triplet
//   apply(&self, point: Fractional3D) -> Fractional3D              - linear * p + t with integer snapping, no wrapping
//   apply_with_trim(&self, point: Fractional3D) -> Fractional3D    - apply and wrap into the unit cell
//   transform(&self, sequence: &[Fractional3D]) -> impl Iterator   - lazy, order preserving, restartable
//   with_shift(&self, shift: &Vector3<f64>) -> Self                - new operation with moved translation
//   compose(&self, other: &Self) -> Self                           - other first, then self
//   inverse(&self) -> Result<Self>                                 - inverse for integer invertible linear parts
//   is_identity(&self) -> bool                                     - identity linear part and zero translation

// ======================== REFERENCE POINT GROUPS ========================
pub use symmetry_point_groups::{
    configured_operations,            // fn(symbol: &str, config: &SymmetryConfig) -> Result<Vec<SymmetryOperation>> - symbol lookup with the configured trim tolerance
    generate_cubic_operations,        // fn() -> Vec<SymmetryOperation> - m-3m (48)
    generate_family_operations,       // fn(family: &CrystalFamily) -> Vec<SymmetryOperation> - holohedry of a family setting
    generate_group,                   // fn(generators: &[Matrix3<i8>]) -> Vec<SymmetryOperation> - closure under composition
    generate_hexagonal_operations,    // fn() -> Vec<SymmetryOperation> - 6/mmm (24)
    generate_identity_operations,     // fn() -> Vec<SymmetryOperation> - 1 (1)
    generate_monoclinic_operations,   // fn(unique_axis: UniqueAxis) -> Vec<SymmetryOperation> - 2/m (4)
    generate_orthorhombic_operations, // fn() -> Vec<SymmetryOperation> - mmm (8)
    generate_tetragonal_operations,   // fn() -> Vec<SymmetryOperation> - 4/mmm (16)
    generate_triclinic_operations,    // fn() -> Vec<SymmetryOperation> - -1 (2)
    generate_trigonal_operations,     // fn(axes: TrigonalAxes) -> Vec<SymmetryOperation> - -3m (12)
    operations_for_symbol,            // fn(symbol: &str) -> Result<Vec<SymmetryOperation>> - lookup by Hermann-Mauguin symbol
};

// ======================== PERMUTATION SOURCES ========================
pub use permutations::{
    PermutationSlotMachine, // struct - cartesian product of per-slot options, first slot fastest
    PermutationSource,      // trait - result_length() + permutations()
};

// ======================== SITE ORBIT ENGINE ========================
pub use point_operation_group::{
    build_point_operation_groups, // fn(ops, requests: &[OrbitRequest], comparer, cancel) -> Vec<Result<PointOperationGroup>> - batch, rayon with `parallel`
    find_local_operations,        // fn(ops, origin, comparer) -> Vec<SymmetryOperation> - shifted stabilizer
    find_projection_orders,       // fn(self_projections, sequence, comparer, cancel) -> Result<Vec<Vec<usize>>> - index permutations
    find_self_projections,        // fn(ops, sequence, comparer) -> Vec<SymmetryOperation> - multiset preserving operations
    reduce_order_ignoring,        // fn(ops, sequence, comparer) -> Vec<SymmetryOperation> - one per distinct multiset image
    reduce_order_preserving,      // fn(ops, sequence, comparer) -> Vec<SymmetryOperation> - one per distinct ordered image
    OrbitRequest,                 // struct - origin + point sequence
    PointOperationGroup,          // struct - read-only result of the five stages
};
// PointOperationGroup impl methods:
//   build(ops, origin, sequence, comparer, cancel) -> Result<Self>  - runs all stages
//   local_sequence_operations(&self) -> &[SymmetryOperation]       - stabilizer of the origin
//   unique_origin_site_count(&self) -> usize                        - |G| / |stabilizer|
//   self_projection_orders(&self) -> &[Vec<usize>]                  - distinct index permutations
//   has_permutation_multiplicity(&self) -> bool                     - more than the identity order
//   is_full_self_projection(&self) -> bool                          - every stabilizer operation self projects
//   unique_permutations(&self, source, eq, selector, cancel) -> Result<Vec<Vec<T>>> - permutation equivalence filter
