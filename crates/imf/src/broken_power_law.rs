//! Piecewise power-law densities joined continuously at fixed breakpoints.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::error::{check_domain, check_finite, check_mass, ImfError, Result};
use crate::mass_function::MassFunction;
use crate::quadrature::integrate;

/// A continuous, jointly normalized sequence of power-law segments.
///
/// Segment `i` covers `[bounds[i], bounds[i + 1]]` with density
/// `k·c[i]·m^gammas[i]`. The continuity coefficients `c` make neighbouring
/// segments agree at every interior breakpoint; `k` normalizes the whole
/// domain. Only the terminal bound may be infinite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenPowerLaw {
    gammas: Vec<f64>,
    bounds: Vec<f64>,
    coefficients: Vec<f64>,
    norm: f64,
}

impl BrokenPowerLaw {
    /// Build a broken power law from segment exponents and boundaries.
    ///
    /// # Errors
    /// * [`ImfError::ShapeMismatch`] unless `gammas.len() == bounds.len() - 1 > 0`
    /// * [`ImfError::NonMonotonicBounds`] if `bounds` is not strictly increasing
    /// * [`ImfError::InvalidDomain`] if the first bound is not positive
    /// * [`ImfError::InvalidParameter`] for a non-finite exponent
    /// * [`ImfError::DivergentNormalization`] for an infinite terminal bound whose
    ///   exponent is `>= -1`
    pub fn new(gammas: &[f64], bounds: &[f64]) -> Result<Self> {
        if gammas.is_empty() || gammas.len() + 1 != bounds.len() {
            return Err(ImfError::ShapeMismatch {
                gammas: gammas.len(),
                bounds: bounds.len(),
            });
        }
        if let Some(index) = bounds
            .windows(2)
            .position(|pair| pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater))
            .map(|i| i + 1)
        {
            return Err(ImfError::NonMonotonicBounds { index });
        }
        let (lower, upper) = (bounds[0], bounds[bounds.len() - 1]);
        check_domain(lower, upper)?;
        for &gamma in gammas {
            check_finite("gamma", gamma)?;
        }
        let last = gammas[gammas.len() - 1];
        if upper.is_infinite() && last >= -1.0 {
            return Err(ImfError::DivergentNormalization { gamma: last });
        }

        let coefficients = continuity_coefficients(gammas, bounds);

        let mut total = 0.0;
        for (i, (&gamma, &c)) in gammas.iter().zip(&coefficients).enumerate() {
            total += c * integrate(|m| m.powf(gamma), bounds[i], bounds[i + 1])?;
        }
        if !(total.is_finite() && total > 0.0) {
            return Err(ImfError::Integration(format!(
                "broken power law integrates to {total}"
            )));
        }
        let norm = 1.0 / total;
        debug!(
            segments = gammas.len(),
            lower,
            upper,
            norm,
            "normalized broken power law"
        );

        Ok(Self {
            gammas: gammas.to_vec(),
            bounds: bounds.to_vec(),
            coefficients,
            norm,
        })
    }

    pub fn gammas(&self) -> &[f64] {
        &self.gammas
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Continuity coefficients, `coefficients()[0] == 1`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Normalization constant `k`.
    pub fn normalization(&self) -> f64 {
        self.norm
    }

    pub fn segment_count(&self) -> usize {
        self.gammas.len()
    }

    /// Index of the segment that evaluates `mass`.
    ///
    /// The index is one less than the first bound `>= mass`, so a mass lying
    /// exactly on an interior breakpoint belongs to the lower segment.
    /// `mass` is assumed to be inside the domain.
    pub fn segment_index(&self, mass: f64) -> usize {
        let first_at_or_above = self.bounds.partition_point(|&b| b < mass);
        first_at_or_above
            .saturating_sub(1)
            .min(self.gammas.len() - 1)
    }
}

/// `c[0] = 1`; each following coefficient carries the previous segment's
/// weighted value across the shared breakpoint.
fn continuity_coefficients(gammas: &[f64], bounds: &[f64]) -> Vec<f64> {
    let mut coefficients = Vec::with_capacity(gammas.len());
    coefficients.push(1.0);
    for i in 1..gammas.len() {
        let b = bounds[i];
        let previous = coefficients[i - 1] * b.powf(gammas[i - 1]);
        coefficients.push(previous / b.powf(gammas[i]));
    }
    coefficients
}

impl MassFunction for BrokenPowerLaw {
    fn domain(&self) -> (f64, f64) {
        (self.bounds[0], self.bounds[self.bounds.len() - 1])
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        let (lower, upper) = self.domain();
        check_mass(mass, lower, upper)?;
        let i = self.segment_index(mass);
        Ok(self.coefficients[i] * self.norm * mass.powf(self.gammas[i]))
    }

    fn breakpoints(&self) -> Vec<f64> {
        self.bounds.clone()
    }
}
