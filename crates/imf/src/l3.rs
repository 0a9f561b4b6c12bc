//! Maschberger (2013) "L3" IMF.
//!
//! `p(m) = A·(m/μ)^-α·(1 + (m/μ)^(1-α))^-β`
//!
//! A smooth alternative to the broken power laws: a power law of slope -α at
//! high mass that turns over below μ, with no seams to join.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_domain, check_finite, check_mass, check_positive, ImfError, Result};
use crate::mass_function::MassFunction;
use crate::quadrature::integrate;

/// Parameters of the L3 IMF and its mass range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L3Params {
    /// High-mass slope α
    pub alpha: f64,
    /// Low-mass turnover strength β
    pub beta: f64,
    /// Turnover scale μ (M☉)
    pub mu: f64,
    pub lower: f64,
    /// `f64::INFINITY` is allowed when `alpha > 1`
    pub upper: f64,
}

impl Default for L3Params {
    fn default() -> Self {
        Self {
            alpha: 2.3,
            beta: 1.4,
            mu: 0.2,
            lower: 0.01,
            upper: 150.0,
        }
    }
}

/// Normalized L3 IMF.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3 {
    params: L3Params,
    /// Amplitude `A`
    norm: f64,
}

impl L3 {
    pub fn new(params: L3Params) -> Result<Self> {
        let L3Params {
            alpha,
            beta,
            mu,
            lower,
            upper,
        } = params;
        check_domain(lower, upper)?;
        check_finite("alpha", alpha)?;
        check_finite("beta", beta)?;
        check_positive("mu", mu)?;
        if upper.is_infinite() && alpha <= 1.0 {
            return Err(ImfError::DivergentNormalization { gamma: -alpha });
        }

        let total = integrate(|m| shape(&params, m), lower, upper)?;
        if !(total.is_finite() && total > 0.0) {
            return Err(ImfError::Integration(format!(
                "L3 IMF on [{lower}, {upper}] integrates to {total}"
            )));
        }
        let norm = 1.0 / total;
        debug!(alpha, beta, mu, norm, "normalized L3 IMF");

        Ok(Self { params, norm })
    }

    pub fn params(&self) -> &L3Params {
        &self.params
    }

    /// Amplitude `A`.
    pub fn normalization(&self) -> f64 {
        self.norm
    }
}

fn shape(params: &L3Params, mass: f64) -> f64 {
    let x = mass / params.mu;
    x.powf(-params.alpha) * (1.0 + x.powf(1.0 - params.alpha)).powf(-params.beta)
}

/// Auxiliary function `G(m) = (1 + (m/μ)^(1-α))^(1-β)`; the antiderivative of the
/// shape is `μ·G(m) / ((1-α)(1-β))`.
fn auxiliary(params: &L3Params, mass: f64) -> f64 {
    (1.0 + (mass / params.mu).powf(1.0 - params.alpha)).powf(1.0 - params.beta)
}

impl MassFunction for L3 {
    fn domain(&self) -> (f64, f64) {
        (self.params.lower, self.params.upper)
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        check_mass(mass, self.params.lower, self.params.upper)?;
        Ok(self.norm * shape(&self.params, mass))
    }

    fn cumulative(&self, mass: f64) -> Result<f64> {
        let p = &self.params;
        check_mass(mass, p.lower, p.upper)?;
        let denom = (1.0 - p.alpha) * (1.0 - p.beta);
        if denom.abs() < 1e-12 {
            // Closed form degenerates; integrate numerically instead.
            let integral = integrate(|m| shape(p, m), p.lower, mass)?;
            return Ok((self.norm * integral).clamp(0.0, 1.0));
        }
        let integral = p.mu * (auxiliary(p, mass) - auxiliary(p, p.lower)) / denom;
        Ok((self.norm * integral).clamp(0.0, 1.0))
    }
}
