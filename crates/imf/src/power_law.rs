//! Single power-law density `k·m^γ` on a bounded mass range.

use serde::Serialize;
use tracing::debug;

use crate::error::{check_domain, check_finite, check_mass, ImfError, Result};
use crate::mass_function::MassFunction;
use crate::quadrature::integrate;

/// Power-law density normalized on `[lower, upper]`.
///
/// The upper limit may be infinite as long as `gamma < -1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerLaw {
    gamma: f64,
    lower: f64,
    upper: f64,
    /// Normalization constant `k`
    norm: f64,
}

impl PowerLaw {
    /// Create a power law with exponent `gamma` on `[lower, upper]`.
    ///
    /// # Errors
    /// * [`ImfError::InvalidDomain`] if `lower <= 0` or `upper <= lower`
    /// * [`ImfError::InvalidParameter`] if `gamma` is not finite
    /// * [`ImfError::DivergentNormalization`] for an infinite `upper` with `gamma >= -1`
    pub fn new(gamma: f64, lower: f64, upper: f64) -> Result<Self> {
        check_domain(lower, upper)?;
        check_finite("gamma", gamma)?;
        if upper.is_infinite() && gamma >= -1.0 {
            return Err(ImfError::DivergentNormalization { gamma });
        }

        let total = integrate(|m| m.powf(gamma), lower, upper)?;
        if !(total.is_finite() && total > 0.0) {
            return Err(ImfError::Integration(format!(
                "power law {gamma} on [{lower}, {upper}] integrates to {total}"
            )));
        }
        let norm = 1.0 / total;
        debug!(gamma, lower, upper, norm, "normalized power law");

        Ok(Self {
            gamma,
            lower,
            upper,
            norm,
        })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Normalization constant `k`.
    pub fn normalization(&self) -> f64 {
        self.norm
    }

    /// Unnormalized shape `m^γ`, defined for any positive mass.
    pub fn shape(&self, mass: f64) -> f64 {
        mass.powf(self.gamma)
    }
}

impl MassFunction for PowerLaw {
    fn domain(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        check_mass(mass, self.lower, self.upper)?;
        Ok(self.norm * self.shape(mass))
    }

    /// Closed form `k·(m^(γ+1) - a^(γ+1)) / (γ+1)`, or `k·ln(m/a)` for `γ = -1`.
    fn cumulative(&self, mass: f64) -> Result<f64> {
        check_mass(mass, self.lower, self.upper)?;
        if mass.is_infinite() {
            return Ok(1.0);
        }
        let g1 = self.gamma + 1.0;
        let integral = if g1.abs() < 1e-12 {
            (mass / self.lower).ln()
        } else {
            (mass.powf(g1) - self.lower.powf(g1)) / g1
        };
        Ok((self.norm * integral).clamp(0.0, 1.0))
    }
}
