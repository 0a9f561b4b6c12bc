//! Celestial body taxonomy.
//!
//! Every body shares a small set of [`BodyProperties`]; what kind of body it is,
//! and the fields only that kind carries, live in [`BodyKind`]. Bodies are
//! plain data for serialization.

use serde::{Deserialize, Serialize};

use crate::constants::{ASTRONOMICAL_UNIT, GRAVITATIONAL_CONSTANT, SECONDS_PER_DAY, SOLAR_MASS};
use crate::error::{Result, StellarError};
use crate::spectral::SpectralType;
use crate::stellar_color::StellarColor;

/// Properties common to every celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProperties {
    /// Mass in solar masses (M☉)
    pub mass: f64,
    /// Age in millions of years; 0 is arrival on the main sequence
    pub age_myr: f64,
    /// Spin angular momentum (kg·m²/s)
    pub angular_momentum: f64,
}

impl BodyProperties {
    /// # Errors
    /// [`StellarError::InvalidMass`] unless `mass` is finite and positive.
    pub fn new(mass: f64, age_myr: f64, angular_momentum: f64) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(StellarError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            age_myr,
            angular_momentum,
        })
    }
}

/// Coarse grouping of [`BodyKind`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    /// Fusing stars
    Stellar,
    /// Stellar remnants
    Remnant,
    /// Protostars, pre-main-sequence objects and brown dwarfs
    Substellar,
    /// Natural bodies in orbit around another body
    Satellite,
    /// Artificial structures
    Construct,
}

/// Radius, luminosity and effective temperature of a fusing star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photosphere {
    /// Radius in solar radii (R☉)
    pub radius: f64,
    /// Luminosity in solar luminosities (L☉)
    pub luminosity: f64,
    /// Effective temperature in solar units
    pub temperature: f64,
    pub spectral_type: SpectralType,
    pub color: StellarColor,
}

/// Keplerian orbit of a satellite around its host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orbit {
    /// Semi-major axis in AU
    pub semi_major_axis: f64,
    pub eccentricity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    DysonSwarm,
    DysonSphere,
    Topopolis,
    Ringworld,
    BishopRing,
    OrbitalRing,
    ONeillCylinder,
    SpaceStation,
}

/// What a body is, with the fields particular to that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyKind {
    // Stars
    MainSequence(Photosphere),
    Subgiant(Photosphere),
    Giant(Photosphere),

    // Remnants
    WhiteDwarf {
        /// Radius in solar radii
        radius: f64,
    },
    NeutronStar {
        /// Radius in kilometres
        radius_km: f64,
        pulsar: bool,
    },
    NovaRemnant {
        /// Shell expansion velocity (km/s)
        expansion_velocity: f64,
    },

    // Substellar
    Protostar {
        /// Envelope accretion rate (M☉/yr)
        accretion_rate: f64,
    },
    PreMainSequence {
        /// Radius in solar radii
        radius: f64,
    },
    BrownDwarf {
        /// Radius in solar radii
        radius: f64,
    },

    // Satellites
    AccretionDisk {
        /// Inner edge in AU
        inner_radius: f64,
        /// Outer edge in AU
        outer_radius: f64,
    },
    Planet {
        orbit: Orbit,
    },
    Moon {
        orbit: Orbit,
    },
    Asteroid {
        orbit: Orbit,
    },
    Comet {
        orbit: Orbit,
    },

    Construct {
        construct: ConstructKind,
        orbit: Orbit,
    },
}

impl BodyKind {
    pub fn category(&self) -> BodyCategory {
        match self {
            BodyKind::MainSequence(_) | BodyKind::Subgiant(_) | BodyKind::Giant(_) => {
                BodyCategory::Stellar
            }
            BodyKind::WhiteDwarf { .. }
            | BodyKind::NeutronStar { .. }
            | BodyKind::NovaRemnant { .. } => BodyCategory::Remnant,
            BodyKind::Protostar { .. }
            | BodyKind::PreMainSequence { .. }
            | BodyKind::BrownDwarf { .. } => BodyCategory::Substellar,
            BodyKind::AccretionDisk { .. }
            | BodyKind::Planet { .. }
            | BodyKind::Moon { .. }
            | BodyKind::Asteroid { .. }
            | BodyKind::Comet { .. } => BodyCategory::Satellite,
            BodyKind::Construct { .. } => BodyCategory::Construct,
        }
    }

    /// Photosphere of a fusing star, if this is one.
    pub fn photosphere(&self) -> Option<&Photosphere> {
        match self {
            BodyKind::MainSequence(p) | BodyKind::Subgiant(p) | BodyKind::Giant(p) => Some(p),
            _ => None,
        }
    }
}

/// Any object in space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub properties: BodyProperties,
    pub kind: BodyKind,
}

impl CelestialBody {
    pub fn new(properties: BodyProperties, kind: BodyKind) -> Self {
        Self { properties, kind }
    }

    pub fn mass(&self) -> f64 {
        self.properties.mass
    }

    pub fn category(&self) -> BodyCategory {
        self.kind.category()
    }
}

// ============================================================================
// Compositions
// ============================================================================

/// Two bodies orbiting their common centre of mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StellarBinary {
    /// The more massive component
    pub primary: CelestialBody,
    pub secondary: CelestialBody,
    /// Semi-major axis of the relative orbit (AU)
    pub separation: f64,
}

impl StellarBinary {
    /// Pair two bodies; the heavier becomes the primary.
    pub fn new(a: CelestialBody, b: CelestialBody, separation: f64) -> Self {
        let (primary, secondary) = if b.mass() > a.mass() { (b, a) } else { (a, b) };
        Self {
            primary,
            secondary,
            separation,
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.primary.mass() + self.secondary.mass()
    }

    /// Secondary over primary mass, in `(0, 1]`.
    pub fn mass_ratio(&self) -> f64 {
        self.secondary.mass() / self.primary.mass()
    }

    /// Orbital period in days, from Kepler's third law.
    pub fn period(&self) -> f64 {
        let a = self.separation * ASTRONOMICAL_UNIT;
        let mu = GRAVITATIONAL_CONSTANT * self.total_mass() * SOLAR_MASS;
        2.0 * std::f64::consts::PI * (a * a * a / mu).sqrt() / SECONDS_PER_DAY
    }
}

/// A single or binary star at the centre of a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemHost {
    Single(CelestialBody),
    Binary(StellarBinary),
}

/// A host and everything that orbits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    pub host: SystemHost,
    pub satellites: Vec<CelestialBody>,
}

impl StarSystem {
    pub fn new(host: SystemHost) -> Self {
        Self {
            host,
            satellites: Vec::new(),
        }
    }

    pub fn with_satellite(mut self, body: CelestialBody) -> Self {
        self.satellites.push(body);
        self
    }

    /// Every body in the system, host components first.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        let host: Vec<&CelestialBody> = match &self.host {
            SystemHost::Single(body) => vec![body],
            SystemHost::Binary(binary) => vec![&binary.primary, &binary.secondary],
        };
        host.into_iter().chain(self.satellites.iter())
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies().map(CelestialBody::mass).sum()
    }

    pub fn count(&self, category: BodyCategory) -> usize {
        self.bodies().filter(|b| b.category() == category).count()
    }
}
