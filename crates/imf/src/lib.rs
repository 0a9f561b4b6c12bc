//! Stellar initial mass functions (IMFs).
//!
//! Normalized probability densities over stellar mass in solar masses, built
//! from power-law and log-normal pieces, plus the numerical machinery to
//! normalize them and to draw synthetic stellar populations from them.

pub mod broken_power_law;
pub mod config;
pub mod error;
pub mod l3;
pub mod log_normal;
pub mod mass_function;
pub mod models;
pub mod power_law;
pub mod quadrature;
pub mod sampling;

#[cfg(test)]
mod sampling_test;

pub use broken_power_law::BrokenPowerLaw;
pub use config::{Imf, ImfConfig};
pub use error::{ImfError, Result};
pub use l3::{L3Params, L3};
pub use log_normal::LogNormal;
pub use mass_function::MassFunction;
pub use models::{Chabrier, ChabrierParams, Kroupa, Salpeter};
pub use power_law::PowerLaw;
pub use sampling::{geometric_grid, MassSampler, WeightedMassSampler};
