use approx::assert_relative_eq;

use crate::bodies::{
    BodyCategory, BodyKind, BodyProperties, CelestialBody, ConstructKind, Orbit, Photosphere,
    StarSystem, StellarBinary, SystemHost,
};
use crate::error::StellarError;
use crate::spectral::SpectralType;
use crate::stellar_color::StellarColor;

fn star(mass: f64) -> CelestialBody {
    CelestialBody::new(
        BodyProperties::new(mass, 4_600.0, 1.9e41).unwrap(),
        BodyKind::MainSequence(Photosphere {
            radius: 1.0,
            luminosity: 1.0,
            temperature: 1.0,
            spectral_type: SpectralType::G,
            color: StellarColor::new(255, 244, 234),
        }),
    )
}

fn planet(semi_major_axis: f64) -> CelestialBody {
    CelestialBody::new(
        BodyProperties::new(3.0e-6, 4_500.0, 7.1e33).unwrap(),
        BodyKind::Planet {
            orbit: Orbit {
                semi_major_axis,
                eccentricity: 0.0167,
            },
        },
    )
}

#[test]
fn body_properties_require_positive_mass() {
    assert_eq!(
        BodyProperties::new(0.0, 0.0, 0.0),
        Err(StellarError::InvalidMass(0.0))
    );
    assert!(BodyProperties::new(f64::NAN, 0.0, 0.0).is_err());
    assert!(BodyProperties::new(f64::INFINITY, 0.0, 0.0).is_err());
}

#[test]
fn kinds_report_their_category() {
    let orbit = Orbit {
        semi_major_axis: 1.0,
        eccentricity: 0.0,
    };
    let cases = [
        (star(1.0).kind, BodyCategory::Stellar),
        (BodyKind::WhiteDwarf { radius: 0.012 }, BodyCategory::Remnant),
        (
            BodyKind::NeutronStar {
                radius_km: 12.0,
                pulsar: true,
            },
            BodyCategory::Remnant,
        ),
        (
            BodyKind::Protostar {
                accretion_rate: 1e-5,
            },
            BodyCategory::Substellar,
        ),
        (BodyKind::BrownDwarf { radius: 0.1 }, BodyCategory::Substellar),
        (
            BodyKind::AccretionDisk {
                inner_radius: 0.1,
                outer_radius: 100.0,
            },
            BodyCategory::Satellite,
        ),
        (BodyKind::Comet { orbit }, BodyCategory::Satellite),
        (
            BodyKind::Construct {
                construct: ConstructKind::DysonSwarm,
                orbit,
            },
            BodyCategory::Construct,
        ),
    ];
    for (kind, category) in cases {
        assert_eq!(kind.category(), category, "{:?}", kind);
    }
}

#[test]
fn only_stars_have_photospheres() {
    assert!(star(1.0).kind.photosphere().is_some());
    assert!(BodyKind::BrownDwarf { radius: 0.1 }.photosphere().is_none());
}

#[test]
fn binary_orders_components_by_mass() {
    let binary = StellarBinary::new(star(0.5), star(1.2), 20.0);
    assert_eq!(binary.primary.mass(), 1.2);
    assert_eq!(binary.secondary.mass(), 0.5);
    assert_relative_eq!(binary.total_mass(), 1.7);
    assert_relative_eq!(binary.mass_ratio(), 0.5 / 1.2);
}

#[test]
fn star_system_iterates_host_then_satellites() {
    let system = StarSystem::new(SystemHost::Binary(StellarBinary::new(
        star(1.1),
        star(0.9),
        23.0,
    )))
    .with_satellite(planet(1.0))
    .with_satellite(planet(5.2));

    assert_eq!(system.bodies().count(), 4);
    assert_eq!(system.count(BodyCategory::Stellar), 2);
    assert_eq!(system.count(BodyCategory::Satellite), 2);
    assert_eq!(system.count(BodyCategory::Remnant), 0);
    assert_relative_eq!(system.total_mass(), 2.0 + 6.0e-6, max_relative = 1e-12);

    let single = StarSystem::new(SystemHost::Single(star(1.0)));
    assert_eq!(single.bodies().count(), 1);
}

#[test]
fn bodies_serialize_with_kind_tag() {
    let body = CelestialBody::new(
        BodyProperties::new(0.05, 0.0, 1.0e40).unwrap(),
        BodyKind::BrownDwarf { radius: 0.1 },
    );
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["kind"]["kind"], "brown_dwarf");
    assert_eq!(value["properties"]["ageMyr"], 0.0);

    let json = serde_json::to_string(&star(1.0)).unwrap();
    let back: CelestialBody = serde_json::from_str(&json).unwrap();
    assert_eq!(back, star(1.0));
}

#[test]
fn binary_period_follows_kepler() {
    // One solar mass at 1 AU: one year
    let binary = StellarBinary::new(star(0.5), star(0.5), 1.0);
    assert_relative_eq!(binary.period(), 365.25, max_relative = 2e-3);

    // P ∝ a^(3/2)
    let wide = StellarBinary::new(star(0.5), star(0.5), 4.0);
    assert_relative_eq!(wide.period() / binary.period(), 8.0, max_relative = 1e-12);
}
