use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::error::ImfError;
use crate::mass_function::MassFunction;
use crate::models::{Kroupa, Salpeter};
use crate::sampling::{geometric_grid, MassSampler, WeightedMassSampler};

// =============================================================================
// Geometric grid
// =============================================================================

#[test]
fn geometric_grid_has_constant_ratio() {
    let grid = geometric_grid(0.1, 100.0, 4).unwrap();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0], 0.1);
    assert_eq!(grid[3], 100.0);
    assert_relative_eq!(grid[1], 1.0, max_relative = 1e-12);
    assert_relative_eq!(grid[2], 10.0, max_relative = 1e-12);
}

#[test]
fn geometric_grid_rejects_bad_input() {
    assert!(matches!(
        geometric_grid(0.1, f64::INFINITY, 10),
        Err(ImfError::InvalidDomain { .. })
    ));
    assert!(matches!(
        geometric_grid(0.0, 1.0, 10),
        Err(ImfError::InvalidDomain { .. })
    ));
    assert!(matches!(
        geometric_grid(0.1, 1.0, 1),
        Err(ImfError::InvalidParameter { name: "count", .. })
    ));
}

// =============================================================================
// Weighted choice
// =============================================================================

#[test]
fn weighted_sampler_draws_grid_members() {
    let imf = Kroupa::new(150.0).unwrap();
    let grid = geometric_grid(0.01, 150.0, 200).unwrap();
    let sampler = WeightedMassSampler::new(&imf, grid.clone()).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(7);

    let draws = sampler.sample_n(&mut rng, 2_000);
    assert!(draws.iter().all(|m| grid.contains(m)));
    assert_eq!(sampler.masses(), grid.as_slice());

    // Most stars in a Kroupa population are below a solar mass
    let light = draws.iter().filter(|&&m| m < 1.0).count() as f64 / draws.len() as f64;
    assert!(light > 0.9, "fraction below 1 M☉ was {}", light);
}

#[test]
fn weighted_sampler_rejects_empty_and_foreign_masses() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    assert!(matches!(
        WeightedMassSampler::new(&imf, Vec::new()),
        Err(ImfError::EmptyPopulation)
    ));
    assert!(matches!(
        WeightedMassSampler::new(&imf, vec![1.0, 200.0]),
        Err(ImfError::OutOfDomain { .. })
    ));
}

// =============================================================================
// Inverse transform
// =============================================================================

#[test]
fn quantile_matches_analytic_salpeter_inverse() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    let sampler = MassSampler::with_range(&imf, 0.1, 100.0).unwrap();

    let g1 = -1.35_f64;
    let (a, b) = (0.1_f64.powf(g1), 100.0_f64.powf(g1));
    for u in [0.1, 0.5, 0.9, 0.99] {
        let expected = (a + u * (b - a)).powf(1.0 / g1);
        assert_relative_eq!(sampler.quantile(u), expected, max_relative = 1e-3);
    }
    assert_eq!(sampler.quantile(0.0), 0.1);
    assert_eq!(sampler.quantile(1.0), 100.0);
}

#[test]
fn quantile_returns_table_nodes_exactly() {
    let imf = Kroupa::new(150.0).unwrap();
    for (lower, upper) in [(0.08, 150.0), (0.3, 7.0), (0.01, 0.5)] {
        let sampler = MassSampler::new(&imf, lower, upper, 97).unwrap();
        assert_eq!(sampler.quantile(0.0), lower);
        assert_eq!(sampler.quantile(1.0), upper);
        assert_eq!(sampler.quantile(-0.5), lower);
        assert_eq!(sampler.quantile(1.5), upper);
    }
}

#[test]
fn failing_density_aborts_tabulation() {
    let imf = PatchyDensity;
    assert!(imf.cumulative(1.5).is_ok());
    assert!(matches!(
        imf.cumulative(5.0),
        Err(ImfError::OutOfDomain { mass: 2.0, .. })
    ));
    assert_eq!(
        MassSampler::with_range(&imf, 0.1, 10.0).unwrap_err(),
        ImfError::OutOfDomain {
            mass: 2.0,
            lower: 0.1,
            upper: 2.0
        }
    );
}

#[test]
fn samples_stay_in_range_and_follow_median() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    let sampler = MassSampler::with_range(&imf, 0.1, 100.0).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(42);

    let mut draws = sampler.sample_n(&mut rng, 4_001);
    assert!(draws.iter().all(|&m| (0.1..=100.0).contains(&m)));

    draws.sort_by(f64::total_cmp);
    let median = draws[draws.len() / 2];
    assert!(median > 0.12 && median < 0.25, "median was {}", median);
}

#[test]
fn sampling_is_deterministic_for_a_seed() {
    let imf = Kroupa::new(150.0).unwrap();
    let sampler = MassSampler::with_range(&imf, 0.08, 150.0).unwrap();
    let a = sampler.sample_n(&mut ChaChaRng::seed_from_u64(3), 50);
    let b = sampler.sample_n(&mut ChaChaRng::seed_from_u64(3), 50);
    assert_eq!(a, b);
}

#[test]
fn sub_range_is_renormalized() {
    let imf = Kroupa::standard().unwrap();
    let sampler = MassSampler::new(&imf, 1.0, 10.0, 128).unwrap();
    let mut rng = ChaChaRng::seed_from_u64(11);
    assert!(sampler
        .sample_n(&mut rng, 500)
        .iter()
        .all(|&m| (1.0..=10.0).contains(&m)));
}

#[test]
fn sampler_range_must_lie_in_domain() {
    let imf = Salpeter::new(0.1, 100.0).unwrap();
    assert!(matches!(
        MassSampler::with_range(&imf, 0.05, 10.0),
        Err(ImfError::OutOfDomain { .. })
    ));
    assert!(matches!(
        MassSampler::with_range(&imf, 10.0, 1.0),
        Err(ImfError::InvalidDomain { .. })
    ));
    let unbounded = Kroupa::standard().unwrap();
    assert!(matches!(
        MassSampler::with_range(&unbounded, 1.0, f64::INFINITY),
        Err(ImfError::InvalidDomain { .. })
    ));
}

#[test]
fn table_includes_breakpoints_and_tracks_cumulative() {
    let imf = Kroupa::new(150.0).unwrap();
    let sampler = MassSampler::new(&imf, 0.01, 150.0, 64).unwrap();
    let table: Vec<(f64, f64)> = sampler.table().collect();

    for b in [0.08, 0.5, 1.0] {
        assert!(table.iter().any(|&(m, _)| m == b), "missing breakpoint {}", b);
    }
    for &(mass, fraction) in table.iter().step_by(7) {
        assert_relative_eq!(
            fraction,
            imf.cumulative(mass).unwrap(),
            epsilon = 1e-9,
            max_relative = 1e-8
        );
    }
}

/// Claims a domain of `[0.1, 10]` but can only evaluate up to 2 M☉.
struct PatchyDensity;

impl MassFunction for PatchyDensity {
    fn domain(&self) -> (f64, f64) {
        (0.1, 10.0)
    }

    fn evaluate(&self, mass: f64) -> crate::error::Result<f64> {
        if mass > 2.0 {
            return Err(ImfError::OutOfDomain {
                mass: 2.0,
                lower: 0.1,
                upper: 2.0,
            });
        }
        Ok(1.0 / mass)
    }
}
