use anyhow::{bail, Error};
use log::trace;
use nalgebra::Matrix3;

use crate::config::SymmetryConfig;
use crate::crystal_systems::{CrystalFamily, TrigonalAxes, UniqueAxis};
use crate::symmetries::symmetry_operations::SymmetryOperation;

// Generators, written row by row as in the x,y,z notation
const INVERSION: [i8; 9] = [-1, 0, 0, 0, -1, 0, 0, 0, -1];
const TWOFOLD_X: [i8; 9] = [1, 0, 0, 0, -1, 0, 0, 0, -1]; // x,-y,-z
const TWOFOLD_Y: [i8; 9] = [-1, 0, 0, 0, 1, 0, 0, 0, -1]; // -x,y,-z
const TWOFOLD_Z: [i8; 9] = [-1, 0, 0, 0, -1, 0, 0, 0, 1]; // -x,-y,z
const FOURFOLD_Z: [i8; 9] = [0, -1, 0, 1, 0, 0, 0, 0, 1]; // -y,x,z
const THREEFOLD_HEX: [i8; 9] = [0, -1, 0, 1, -1, 0, 0, 0, 1]; // -y,x-y,z
const SIXFOLD_HEX: [i8; 9] = [1, -1, 0, 1, 0, 0, 0, 0, 1]; // x-y,x,z
const TWOFOLD_HEX_110: [i8; 9] = [0, 1, 0, 1, 0, 0, 0, 0, -1]; // y,x,-z
const TWOFOLD_HEX_1M10: [i8; 9] = [0, -1, 0, -1, 0, 0, 0, 0, -1]; // -y,-x,-z
const THREEFOLD_DIAGONAL: [i8; 9] = [0, 0, 1, 1, 0, 0, 0, 1, 0]; // z,x,y

fn matrix(rows: &[i8; 9]) -> Matrix3<i8> {
    Matrix3::from_row_slice(rows)
}

/// Close a set of generators under composition. The identity comes first.
pub fn generate_group(generators: &[Matrix3<i8>]) -> Vec<SymmetryOperation> {
    let mut elements: Vec<Matrix3<i8>> = vec![Matrix3::identity()];
    let mut index = 0;
    while index < elements.len() {
        let current = elements[index];
        for generator in generators {
            let product = generator * current;
            if !elements.contains(&product) {
                elements.push(product);
            }
        }
        index += 1;
    }
    trace!("Generated point group with {} operations", elements.len());

    elements
        .into_iter()
        .map(|rotation| SymmetryOperation::new(rotation, nalgebra::Vector3::zeros()))
        .collect()
}

/// p1: identity only
pub fn generate_identity_operations() -> Vec<SymmetryOperation> {
    vec![SymmetryOperation::identity()]
}

/// -1 (Ci), 2 operations
pub fn generate_triclinic_operations() -> Vec<SymmetryOperation> {
    generate_group(&[matrix(&INVERSION)])
}

/// 2/m (C2h), 4 operations
pub fn generate_monoclinic_operations(unique_axis: UniqueAxis) -> Vec<SymmetryOperation> {
    let twofold = match unique_axis {
        UniqueAxis::A => TWOFOLD_X,
        UniqueAxis::B => TWOFOLD_Y,
        UniqueAxis::C => TWOFOLD_Z,
    };
    generate_group(&[matrix(&twofold), matrix(&INVERSION)])
}

/// mmm (D2h), 8 operations
pub fn generate_orthorhombic_operations() -> Vec<SymmetryOperation> {
    generate_group(&[matrix(&TWOFOLD_Z), matrix(&TWOFOLD_X), matrix(&INVERSION)])
}

/// 4/mmm (D4h), 16 operations
pub fn generate_tetragonal_operations() -> Vec<SymmetryOperation> {
    generate_group(&[matrix(&FOURFOLD_Z), matrix(&TWOFOLD_X), matrix(&INVERSION)])
}

/// -3m (D3d), 12 operations, in hexagonal or rhombohedral axes
pub fn generate_trigonal_operations(axes: TrigonalAxes) -> Vec<SymmetryOperation> {
    match axes {
        TrigonalAxes::Hexagonal => {
            generate_group(&[matrix(&THREEFOLD_HEX), matrix(&TWOFOLD_HEX_1M10), matrix(&INVERSION)])
        }
        TrigonalAxes::Rhombohedral => {
            generate_group(&[matrix(&THREEFOLD_DIAGONAL), matrix(&TWOFOLD_HEX_1M10), matrix(&INVERSION)])
        }
    }
}

/// 6/mmm (D6h), 24 operations
pub fn generate_hexagonal_operations() -> Vec<SymmetryOperation> {
    generate_group(&[matrix(&SIXFOLD_HEX), matrix(&TWOFOLD_HEX_110), matrix(&INVERSION)])
}

/// m-3m (Oh), 48 operations
pub fn generate_cubic_operations() -> Vec<SymmetryOperation> {
    generate_group(&[matrix(&THREEFOLD_DIAGONAL), matrix(&FOURFOLD_Z), matrix(&INVERSION)])
}

/// Holohedral point group of a family setting
pub fn generate_family_operations(family: &CrystalFamily) -> Vec<SymmetryOperation> {
    match family {
        CrystalFamily::Triclinic => generate_triclinic_operations(),
        CrystalFamily::Monoclinic(axis) => generate_monoclinic_operations(*axis),
        CrystalFamily::Orthorhombic => generate_orthorhombic_operations(),
        CrystalFamily::Tetragonal => generate_tetragonal_operations(),
        CrystalFamily::Trigonal(axes) => generate_trigonal_operations(*axes),
        CrystalFamily::Hexagonal => generate_hexagonal_operations(),
        CrystalFamily::Cubic => generate_cubic_operations(),
    }
}

/// Look up a reference group by its Hermann-Mauguin symbol
pub fn operations_for_symbol(symbol: &str) -> Result<Vec<SymmetryOperation>, Error> {
    let operations = match symbol.trim() {
        "1" | "p1" => generate_identity_operations(),
        "-1" => generate_triclinic_operations(),
        "2/m" => generate_monoclinic_operations(UniqueAxis::B),
        "mmm" => generate_orthorhombic_operations(),
        "4/mmm" => generate_tetragonal_operations(),
        "-3m" => generate_trigonal_operations(TrigonalAxes::Hexagonal),
        "-3m:r" => generate_trigonal_operations(TrigonalAxes::Rhombohedral),
        "6/mmm" => generate_hexagonal_operations(),
        "m-3m" => generate_cubic_operations(),
        other => bail!(
            "Unknown point group '{}'. Known: 1, -1, 2/m, mmm, 4/mmm, -3m, -3m:r, 6/mmm, m-3m",
            other
        ),
    };
    Ok(operations)
}

/// Symbol lookup with the configured trim tolerance on every operation
pub fn configured_operations(symbol: &str, config: &SymmetryConfig) -> Result<Vec<SymmetryOperation>, Error> {
    Ok(operations_for_symbol(symbol)?
        .into_iter()
        .map(|operation| operation.with_trim_tolerance(config.trim_tolerance))
        .collect())
}
