// Constants and the configuration value shared by all modules
use serde::{Deserialize, Serialize};

// Tolerances
pub const DEFAULT_TOLERANCE: f64 = 1e-10; // For metric and vector comparisons
pub const DEFAULT_TRIM_TOLERANCE: f64 = 1e-10; // For snapping transformed coordinates onto integers
pub const SOFT_TOLERANCE: f64 = 1e-6; // Relaxed comparisons used for hierarchy checks

// Bounds
pub const DEFAULT_PARAMETER_MAX: f64 = 1000.0; // Largest accepted cell length

/// Tolerance and bound settings handed to the catalog and the orbit engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetryConfig {
    /// Equality range for lengths, angles and fractional coordinates
    pub tolerance: f64,
    /// Upper bound for the cell lengths a, b, c
    pub parameter_max: f64,
    /// Range within which transformed coordinates are snapped onto integers
    pub trim_tolerance: f64,
    /// Largest point sequence a caller is willing to reduce (None = unlimited)
    pub max_sequence_length: Option<usize>,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parameter_max: DEFAULT_PARAMETER_MAX,
            trim_tolerance: DEFAULT_TRIM_TOLERANCE,
            max_sequence_length: None,
        }
    }
}

impl SymmetryConfig {
    /// Relaxed settings for hierarchy checks between related families
    pub fn soft() -> Self {
        Self {
            tolerance: SOFT_TOLERANCE,
            ..Self::default()
        }
    }

    /// Check a point sequence length against the configured cap
    pub fn accepts_sequence_length(&self, length: usize) -> bool {
        self.max_sequence_length.map_or(true, |max| length <= max)
    }
}
