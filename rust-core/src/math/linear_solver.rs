//! Gauss-Jordan elimination for one or more right-hand sides.
//!
//! The solver only ever *adds* rows onto each other (never swaps them) and compares
//! every entry through the caller's [`NumericComparer`], so near-zero values are treated
//! as exact zeros. It reports a plain `bool`: a malformed shape and a singular system
//! both yield `false`.

use log::trace;
use nalgebra::{DMatrix, Matrix3};

use crate::interfaces::NumericComparer;

/// Solve `left * X = right` for `X`.
///
/// On success `left` is reduced to the identity and `right` holds the solution columns.
/// On failure both matrices are left untouched.
pub fn try_solve(left: &mut DMatrix<f64>, right: &mut DMatrix<f64>, comparer: &NumericComparer) -> bool {
    if !left.is_square() || left.nrows() != right.nrows() {
        return false;
    }

    let mut work_left = left.clone();
    let mut work_right = right.clone();
    clean_almost_zero_entries(&mut work_left, comparer);
    clean_almost_zero_entries(&mut work_right, comparer);

    if !repair_zero_diagonal(&mut work_left, &mut work_right, comparer) {
        trace!("Gauss-Jordan: diagonal cannot be made non-zero before elimination");
        return false;
    }

    if !eliminate(&mut work_left, &mut work_right, comparer) {
        trace!("Gauss-Jordan: system is singular within tolerance");
        return false;
    }

    normalize_by_diagonal(&mut work_left, &mut work_right, comparer);
    *left = work_left;
    *right = work_right;
    true
}

/// Invert a 3x3 matrix by solving against the identity
pub fn try_invert(matrix: &Matrix3<f64>, comparer: &NumericComparer) -> Option<Matrix3<f64>> {
    let mut left = DMatrix::from_iterator(3, 3, matrix.iter().copied());
    let mut right = DMatrix::<f64>::identity(3, 3);
    if !try_solve(&mut left, &mut right, comparer) {
        return None;
    }
    Some(Matrix3::from_iterator(right.iter().copied()))
}

fn clean_almost_zero_entries(matrix: &mut DMatrix<f64>, comparer: &NumericComparer) {
    for value in matrix.iter_mut() {
        *value = comparer.snap_zero(*value);
    }
}

/// Make every diagonal entry non-zero by adding a row that carries a value in that column
fn repair_zero_diagonal(left: &mut DMatrix<f64>, right: &mut DMatrix<f64>, comparer: &NumericComparer) -> bool {
    let rows = left.nrows();
    for row in 0..rows {
        if !comparer.is_zero(left[(row, row)]) {
            continue;
        }
        let source = (0..rows).find(|&other| other != row && !comparer.is_zero(left[(other, row)]));
        match source {
            Some(source) => {
                add_row_to(left, source, row, 1.0);
                add_row_to(right, source, row, 1.0);
            }
            None => return false,
        }
    }
    true
}

fn eliminate(left: &mut DMatrix<f64>, right: &mut DMatrix<f64>, comparer: &NumericComparer) -> bool {
    let rows = left.nrows();
    for pivot in 0..rows {
        // Earlier eliminations may have cancelled this diagonal; only rows below may repair it
        if comparer.is_zero(left[(pivot, pivot)]) {
            match (pivot + 1..rows).find(|&other| !comparer.is_zero(left[(other, pivot)])) {
                Some(source) => {
                    add_row_to(left, source, pivot, 1.0);
                    add_row_to(right, source, pivot, 1.0);
                }
                None => return false,
            }
        }

        let diagonal = left[(pivot, pivot)];
        for target in (0..rows).filter(|&target| target != pivot) {
            let entry = left[(target, pivot)];
            if comparer.is_zero(entry) {
                continue;
            }
            let factor = -entry / diagonal;
            add_row_to(left, pivot, target, factor);
            add_row_to(right, pivot, target, factor);
        }
    }
    true
}

fn normalize_by_diagonal(left: &mut DMatrix<f64>, right: &mut DMatrix<f64>, comparer: &NumericComparer) {
    for row in 0..left.nrows() {
        let factor = 1.0 / left[(row, row)];
        left.row_mut(row).scale_mut(factor);
        right.row_mut(row).scale_mut(factor);
    }
    clean_almost_zero_entries(left, comparer);
    clean_almost_zero_entries(right, comparer);
}

fn add_row_to(matrix: &mut DMatrix<f64>, source: usize, target: usize, factor: f64) {
    for col in 0..matrix.ncols() {
        let value = matrix[(source, col)] * factor;
        matrix[(target, col)] += value;
    }
}
