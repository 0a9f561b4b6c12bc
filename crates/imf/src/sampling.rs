//! Drawing stellar masses from an initial mass function.
//!
//! Two strategies:
//! - [`WeightedMassSampler`] picks from a fixed population of candidate masses,
//!   weighting each by the IMF density (the classic "geomspace + weighted
//!   choice" recipe).
//! - [`MassSampler`] tabulates the cumulative distribution on a fine
//!   logarithmic grid and draws continuous masses by inverse transform.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use rand_chacha::ChaChaRng;
use tracing::debug;

use crate::error::{check_domain, check_mass, ImfError, Result};
use crate::mass_function::MassFunction;
use crate::quadrature::integrate_density;

/// `count` logarithmically spaced masses from `lower` to `upper` inclusive.
///
/// # Errors
/// [`ImfError::InvalidDomain`] unless `0 < lower < upper < inf`;
/// [`ImfError::InvalidParameter`] if `count < 2`.
pub fn geometric_grid(lower: f64, upper: f64, count: usize) -> Result<Vec<f64>> {
    check_domain(lower, upper)?;
    if upper.is_infinite() {
        return Err(ImfError::InvalidDomain { lower, upper });
    }
    if count < 2 {
        return Err(ImfError::InvalidParameter {
            name: "count",
            value: count as f64,
        });
    }

    let (log_lower, log_upper) = (lower.ln(), upper.ln());
    let step = (log_upper - log_lower) / (count - 1) as f64;
    let mut grid: Vec<f64> = (0..count)
        .map(|i| (log_lower + step * i as f64).exp())
        .collect();
    // Pin the ends so they survive domain checks exactly.
    grid[0] = lower;
    grid[count - 1] = upper;
    Ok(grid)
}

// ============================================================================
// Weighted choice over a fixed population
// ============================================================================

/// Weighted random choice among candidate masses.
#[derive(Debug, Clone)]
pub struct WeightedMassSampler {
    masses: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl WeightedMassSampler {
    /// Weight every candidate mass by `imf`.
    ///
    /// # Errors
    /// [`ImfError::OutOfDomain`] if a candidate lies outside the IMF domain;
    /// [`ImfError::EmptyPopulation`] if there are no candidates with positive
    /// weight.
    pub fn new<M: MassFunction + ?Sized>(imf: &M, masses: Vec<f64>) -> Result<Self> {
        let weights = imf.weights(&masses)?;
        let index = WeightedIndex::new(&weights).map_err(|_| ImfError::EmptyPopulation)?;
        Ok(Self { masses, index })
    }

    /// Draw one candidate mass.
    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        self.masses[self.index.sample(rng)]
    }

    /// Draw `count` candidate masses with replacement.
    pub fn sample_n(&self, rng: &mut ChaChaRng, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }
}

// ============================================================================
// Inverse-transform sampling
// ============================================================================

/// Inverse-CDF sampler over a finite slice of an IMF's domain.
///
/// The cumulative distribution is tabulated once at construction; each draw is
/// a binary search plus log-linear interpolation.
#[derive(Debug, Clone)]
pub struct MassSampler {
    masses: Vec<f64>,
    cdf: Vec<f64>,
}

impl MassSampler {
    /// Default number of tabulation nodes.
    pub const DEFAULT_RESOLUTION: usize = 512;

    /// Tabulate `imf` on `[lower, upper]` with `resolution` logarithmic nodes.
    ///
    /// The range must be finite and inside the IMF domain; draws are
    /// renormalized to that range. Breakpoints of the IMF are added as extra
    /// nodes.
    pub fn new<M: MassFunction + ?Sized>(
        imf: &M,
        lower: f64,
        upper: f64,
        resolution: usize,
    ) -> Result<Self> {
        let (domain_lower, domain_upper) = imf.domain();
        check_mass(lower, domain_lower, domain_upper)?;
        check_mass(upper, domain_lower, domain_upper)?;

        let mut masses = geometric_grid(lower, upper, resolution)?;
        masses.extend(
            imf.breakpoints()
                .into_iter()
                .filter(|&b| b > lower && b < upper),
        );
        masses.sort_by(f64::total_cmp);
        masses.dedup();

        let mut cdf = Vec::with_capacity(masses.len());
        cdf.push(0.0);
        let mut running = 0.0;
        for pair in masses.windows(2) {
            running += integrate_density(|m| imf.evaluate(m), pair[0], pair[1])?;
            cdf.push(running);
        }
        if !(running.is_finite() && running > 0.0) {
            return Err(ImfError::EmptyPopulation);
        }
        for c in &mut cdf {
            *c /= running;
        }
        debug!(
            lower,
            upper,
            nodes = masses.len(),
            coverage = running,
            "tabulated mass sampler"
        );

        Ok(Self { masses, cdf })
    }

    /// Tabulate with [`DEFAULT_RESOLUTION`](Self::DEFAULT_RESOLUTION) nodes.
    pub fn with_range<M: MassFunction + ?Sized>(imf: &M, lower: f64, upper: f64) -> Result<Self> {
        Self::new(imf, lower, upper, Self::DEFAULT_RESOLUTION)
    }

    /// Mass below which a fraction `u ∈ [0, 1]` of the tabulated population lies.
    pub fn quantile(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        let last = self.masses.len() - 1;
        let i = self.cdf.partition_point(|&c| c < u).clamp(1, last);

        let (c0, c1) = (self.cdf[i - 1], self.cdf[i]);
        let (m0, m1) = (self.masses[i - 1], self.masses[i]);
        let t = if c1 > c0 { (u - c0) / (c1 - c0) } else { 0.0 };
        // Nodes are returned exactly at the ends of each cell.
        if t <= 0.0 {
            return m0;
        }
        if t >= 1.0 {
            return m1;
        }
        (m0 * (m1 / m0).powf(t)).clamp(m0, m1)
    }

    /// Draw one mass.
    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        self.quantile(rng.random::<f64>())
    }

    /// Draw `count` masses.
    pub fn sample_n(&self, rng: &mut ChaChaRng, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Tabulated `(mass, cumulative fraction)` nodes.
    pub fn table(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.masses.iter().copied().zip(self.cdf.iter().copied())
    }
}
