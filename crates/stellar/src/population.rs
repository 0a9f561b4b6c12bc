//! Population synthesis: draw masses from an IMF and turn them into bodies.
//!
//! Every body is placed at zero age. Masses below the hydrogen-burning limit
//! become brown dwarfs; the rest are main-sequence stars whose radius,
//! luminosity and temperature follow empirical mass relations.

use imf::{MassFunction, MassSampler};
use rand_chacha::ChaChaRng;
use tracing::debug;

use crate::blackbody::BlackbodyTable;
use crate::bodies::{BodyKind, BodyProperties, CelestialBody, Photosphere};
use crate::constants::{
    HYDROGEN_BURNING_LIMIT, SECONDS_PER_DAY, SOLAR_MOMENT_OF_INERTIA, SOLAR_ROTATION_RATE,
    SOLAR_TEMPERATURE,
};
use crate::error::Result;
use crate::spectral::SpectralType;

/// Brown dwarfs all have roughly Jupiter's radius (R☉).
pub const BROWN_DWARF_RADIUS: f64 = 0.1;

/// Draw `count` bodies with masses from `imf` restricted to `mass_range`.
///
/// # Errors
/// Any [`imf::ImfError`] from building the sampler, e.g. a range outside the
/// IMF domain, and colour lookup failures.
pub fn generate_population<M: MassFunction + ?Sized>(
    imf: &M,
    count: usize,
    mass_range: (f64, f64),
    table: &BlackbodyTable,
    rng: &mut ChaChaRng,
) -> Result<Vec<CelestialBody>> {
    let (lower, upper) = mass_range;
    let sampler = MassSampler::with_range(imf, lower, upper)?;

    let bodies = sampler
        .sample_n(rng, count)
        .into_iter()
        .map(|mass| body_from_mass(mass, table))
        .collect::<Result<Vec<_>>>()?;

    let brown_dwarfs = bodies
        .iter()
        .filter(|b| matches!(b.kind, BodyKind::BrownDwarf { .. }))
        .count();
    debug!(
        count,
        lower,
        upper,
        brown_dwarfs,
        stars = count - brown_dwarfs,
        "generated population"
    );
    Ok(bodies)
}

/// Zero-age body of the given mass (M☉).
pub fn body_from_mass(mass: f64, table: &BlackbodyTable) -> Result<CelestialBody> {
    if mass < HYDROGEN_BURNING_LIMIT {
        let properties = BodyProperties::new(
            mass,
            0.0,
            spin_angular_momentum(mass, BROWN_DWARF_RADIUS),
        )?;
        return Ok(CelestialBody::new(
            properties,
            BodyKind::BrownDwarf {
                radius: BROWN_DWARF_RADIUS,
            },
        ));
    }

    let photosphere = main_sequence_photosphere(mass, table)?;
    let properties = BodyProperties::new(
        mass,
        0.0,
        spin_angular_momentum(mass, photosphere.radius),
    )?;
    Ok(CelestialBody::new(
        properties,
        BodyKind::MainSequence(photosphere),
    ))
}

/// Photosphere of a main-sequence star of `mass` M☉.
pub fn main_sequence_photosphere(mass: f64, table: &BlackbodyTable) -> Result<Photosphere> {
    let luminosity = main_sequence_luminosity(mass);
    let radius = main_sequence_radius(mass);
    // Stefan-Boltzmann in solar units: L = R² T⁴
    let temperature = (luminosity / (radius * radius)).powf(0.25);

    Ok(Photosphere {
        radius,
        luminosity,
        temperature,
        spectral_type: SpectralType::from_temperature(temperature * SOLAR_TEMPERATURE),
        color: table.color_match(temperature)?,
    })
}

/// Piecewise mass-luminosity relation (L☉).
pub fn main_sequence_luminosity(mass: f64) -> f64 {
    match mass {
        m if m < 0.43 => 0.23 * m.powf(2.3),
        m if m < 2.0 => m.powi(4),
        m if m < 55.0 => 1.4 * m.powf(3.5),
        m => 32_000.0 * m,
    }
}

/// Mass-radius relation (R☉).
pub fn main_sequence_radius(mass: f64) -> f64 {
    if mass < 1.0 {
        mass.powf(0.8)
    } else {
        mass.powf(0.57)
    }
}

/// Spin angular momentum (kg·m²/s) of a uniform sphere turning at the solar
/// rate.
pub fn spin_angular_momentum(mass: f64, radius: f64) -> f64 {
    SOLAR_MOMENT_OF_INERTIA * mass * radius * radius * SOLAR_ROTATION_RATE / SECONDS_PER_DAY
}
