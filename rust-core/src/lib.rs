//! Crystal symmetry core library
//!
//! This library validates unit-cell metrics against the rules of the crystal families and
//! reduces point sequences around a site to their symmetry distinct representatives.

pub mod config;
pub mod crystal_systems;
pub mod interfaces;
pub mod math;
pub mod symmetries;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
