use anyhow::Error;
use log::debug;

use super::constraint_family::MetricConstraintFamily;
use super::crystal_family::{CrystalFamily, CrystalFamilyIdentification, SpaceGroupClassification};
use crate::config::{SymmetryConfig, DEFAULT_PARAMETER_MAX, DEFAULT_TOLERANCE, SOFT_TOLERANCE};
use crate::interfaces::NumericComparer;

/// Factory for [`MetricConstraintFamily`] values sharing one tolerance and one length bound.
///
/// Strict and soft catalogs use the same family rules; they only differ in these two inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricConstraintCatalog {
    comparer: NumericComparer,
    parameter_max: f64,
}

impl MetricConstraintCatalog {
    pub fn new(tolerance: f64, parameter_max: f64) -> Self {
        Self {
            comparer: NumericComparer::new(tolerance),
            parameter_max,
        }
    }

    pub fn from_config(config: &SymmetryConfig) -> Self {
        Self::new(config.tolerance, config.parameter_max)
    }

    /// Catalog with a relaxed tolerance for hierarchy checks
    pub fn soft() -> Self {
        Self::new(SOFT_TOLERANCE, DEFAULT_PARAMETER_MAX)
    }

    pub fn comparer(&self) -> &NumericComparer {
        &self.comparer
    }

    pub fn parameter_max(&self) -> f64 {
        self.parameter_max
    }

    /// Look up the family for an identification
    pub fn get_family(&self, identification: CrystalFamilyIdentification) -> Result<MetricConstraintFamily, Error> {
        let family = CrystalFamily::from_identification(identification)?;
        Ok(self.create(family))
    }

    /// Look up the family a space group belongs to
    pub fn family_for_space_group(&self, classification: &SpaceGroupClassification) -> Result<MetricConstraintFamily, Error> {
        let family = classification.crystal_family()?;
        Ok(self.create(family))
    }

    /// One family per distinct setting
    pub fn all_families(&self) -> Vec<MetricConstraintFamily> {
        CrystalFamily::ALL.iter().map(|&family| self.create(family)).collect()
    }

    /// Build a family seeded with its default set.
    ///
    /// # Panics
    /// If the default set fails the family's own soft validators. That is a defect in the
    /// rule tables, not an input error.
    pub fn create(&self, family: CrystalFamily) -> MetricConstraintFamily {
        let constraint_family = MetricConstraintFamily::new(family, self.comparer, self.parameter_max);
        let defaults = constraint_family.parameters();
        assert!(
            constraint_family.validate_soft_angle_condition(defaults.alpha, defaults.beta, defaults.gamma)
                && constraint_family.validate_soft_parameter_condition(defaults.a, defaults.b, defaults.c),
            "Default parameter set of {} violates its own constraints",
            family
        );
        debug!("Created constraint family {} (tolerance {})", family, self.comparer.tolerance());
        constraint_family
    }
}

impl Default for MetricConstraintCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_PARAMETER_MAX)
    }
}
