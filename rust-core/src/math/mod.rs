// Math module: Contains the numeric building blocks used by the crystal system layer
// This module provides a tolerance-aware Gauss-Jordan solver for multiple right-hand sides

// ======================== MODULE DECLARATIONS ========================
pub mod linear_solver;


// ======================== LINEAR SYSTEMS ========================
pub use linear_solver::{
    try_solve,  // fn(left: &mut DMatrix<f64>, right: &mut DMatrix<f64>, comparer: &NumericComparer) -> bool - solves left * X = right in place
    try_invert, // fn(matrix: &Matrix3<f64>, comparer: &NumericComparer) -> Option<Matrix3<f64>> - inverse through try_solve
};
