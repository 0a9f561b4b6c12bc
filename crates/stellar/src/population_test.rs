use approx::assert_relative_eq;
use imf::{ImfError, Kroupa, Salpeter};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::blackbody::BlackbodyTable;
use crate::bodies::{BodyCategory, BodyKind};
use crate::constants::HYDROGEN_BURNING_LIMIT;
use crate::error::StellarError;
use crate::population::{
    body_from_mass, generate_population, main_sequence_luminosity, main_sequence_photosphere,
    BROWN_DWARF_RADIUS,
};
use crate::spectral::SpectralType;

#[test]
fn solar_mass_star_matches_the_sun() {
    let table = BlackbodyTable::default();
    let sun = main_sequence_photosphere(1.0, &table).unwrap();
    assert_relative_eq!(sun.luminosity, 1.0);
    assert_relative_eq!(sun.radius, 1.0);
    assert_relative_eq!(sun.temperature, 1.0);
    assert_eq!(sun.spectral_type, SpectralType::G);
    assert_eq!(sun.color, table.color_match(1.0).unwrap());
}

#[test]
fn heavier_stars_are_hotter_and_brighter() {
    let table = BlackbodyTable::default();
    let masses = [0.2, 0.5, 1.0, 5.0, 60.0];
    let stars: Vec<_> = masses
        .iter()
        .map(|&m| main_sequence_photosphere(m, &table).unwrap())
        .collect();
    for pair in stars.windows(2) {
        assert!(pair[1].luminosity > pair[0].luminosity);
        assert!(pair[1].temperature > pair[0].temperature);
    }
    assert_eq!(stars[0].spectral_type, SpectralType::M);
    assert_eq!(stars[4].spectral_type, SpectralType::O);
}

#[test]
fn luminosity_relation_segments() {
    assert_relative_eq!(main_sequence_luminosity(0.2), 0.23 * 0.2_f64.powf(2.3));
    assert_relative_eq!(main_sequence_luminosity(10.0), 1.4 * 10.0_f64.powf(3.5));
    assert_relative_eq!(main_sequence_luminosity(100.0), 3.2e6);
}

#[test]
fn light_bodies_become_brown_dwarfs() {
    let table = BlackbodyTable::default();
    let body = body_from_mass(0.05, &table).unwrap();
    assert_eq!(
        body.kind,
        BodyKind::BrownDwarf {
            radius: BROWN_DWARF_RADIUS
        }
    );
    assert_eq!(body.category(), BodyCategory::Substellar);
    assert_eq!(body.properties.age_myr, 0.0);
    assert!(body.properties.angular_momentum > 0.0);

    let star = body_from_mass(HYDROGEN_BURNING_LIMIT, &table).unwrap();
    assert_eq!(star.category(), BodyCategory::Stellar);
}

#[test]
fn population_follows_imf_and_classification() {
    let imf = Kroupa::new(150.0).unwrap();
    let table = BlackbodyTable::default();
    let mut rng = ChaChaRng::seed_from_u64(42);

    let bodies = generate_population(&imf, 500, (0.01, 150.0), &table, &mut rng).unwrap();
    assert_eq!(bodies.len(), 500);

    for body in &bodies {
        assert!((0.01..=150.0).contains(&body.mass()));
        let expected = if body.mass() < HYDROGEN_BURNING_LIMIT {
            BodyCategory::Substellar
        } else {
            BodyCategory::Stellar
        };
        assert_eq!(body.category(), expected);
    }

    let brown_dwarfs = bodies
        .iter()
        .filter(|b| b.category() == BodyCategory::Substellar)
        .count();
    assert!(
        brown_dwarfs > 100 && brown_dwarfs < 300,
        "{} brown dwarfs out of 500",
        brown_dwarfs
    );
}

#[test]
fn population_is_deterministic_for_a_seed() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    let table = BlackbodyTable::default();
    let a = generate_population(&imf, 50, (0.1, 100.0), &table, &mut ChaChaRng::seed_from_u64(9))
        .unwrap();
    let b = generate_population(&imf, 50, (0.1, 100.0), &table, &mut ChaChaRng::seed_from_u64(9))
        .unwrap();
    assert_eq!(a, b);
    assert!(generate_population(&imf, 0, (0.1, 100.0), &table, &mut ChaChaRng::seed_from_u64(9))
        .unwrap()
        .is_empty());
}

#[test]
fn range_outside_imf_domain_is_an_error() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    let table = BlackbodyTable::default();
    let mut rng = ChaChaRng::seed_from_u64(1);
    let result = generate_population(&imf, 10, (0.01, 100.0), &table, &mut rng);
    assert!(matches!(
        result,
        Err(StellarError::Imf(ImfError::OutOfDomain { .. }))
    ));
}
