//! The evaluation surface shared by every initial mass function.

use crate::error::{check_mass, Result};
use crate::quadrature::integrate_density_piecewise;

/// A normalized probability density over stellar mass (M☉).
///
/// Implementations are immutable once constructed, so they can be shared
/// freely across threads and evaluated concurrently.
pub trait MassFunction: Send + Sync {
    /// Inclusive mass domain `(lower, upper)`; `upper` may be infinite.
    fn domain(&self) -> (f64, f64);

    /// Probability density at `mass`.
    ///
    /// Fails with [`ImfError::OutOfDomain`](crate::ImfError::OutOfDomain)
    /// outside [`domain`](Self::domain).
    fn evaluate(&self, mass: f64) -> Result<f64>;

    /// Domain edges plus every interior seam or narrow feature of the density,
    /// ascending. Quadrature is split at these points.
    fn breakpoints(&self) -> Vec<f64> {
        let (lower, upper) = self.domain();
        vec![lower, upper]
    }

    /// Fraction of the population with mass at or below `mass`.
    fn cumulative(&self, mass: f64) -> Result<f64> {
        let (lower, upper) = self.domain();
        check_mass(mass, lower, upper)?;

        let mut points: Vec<f64> = self
            .breakpoints()
            .into_iter()
            .filter(|&b| b < mass)
            .collect();
        points.push(mass);

        let integral = integrate_density_piecewise(|m| self.evaluate(m), &points)?;
        Ok(integral.clamp(0.0, 1.0))
    }

    /// Density at each mass, as relative weights for weighted sampling.
    fn weights(&self, masses: &[f64]) -> Result<Vec<f64>> {
        masses.iter().map(|&m| self.evaluate(m)).collect()
    }
}
