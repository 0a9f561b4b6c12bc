//! Stellar bodies and IMF-driven population synthesis.
//!
//! Builds on the [`imf`] crate: masses drawn from an initial mass function
//! become [`CelestialBody`] values with blackbody colours from a
//! [`BlackbodyTable`].

pub mod blackbody;
pub mod bodies;
pub mod constants;
pub mod error;
pub mod population;
pub mod spectral;
pub mod stellar_color;

#[cfg(test)]
mod bodies_test;
#[cfg(test)]
mod population_test;

pub use blackbody::BlackbodyTable;
pub use bodies::{
    BodyCategory, BodyKind, BodyProperties, CelestialBody, ConstructKind, Orbit, Photosphere,
    StarSystem, StellarBinary, SystemHost,
};
pub use error::{Result, StellarError};
pub use population::{body_from_mass, generate_population};
pub use spectral::SpectralType;
pub use stellar_color::StellarColor;
