//! Log-normal density in mass, normalized on a bounded mass range.

use serde::Serialize;
use tracing::debug;

use crate::error::{check_domain, check_mass, check_positive, ImfError, Result};
use crate::mass_function::MassFunction;
use crate::quadrature::integrate_piecewise;

/// Offsets from the peak, in units of the spread, at which quadrature is split.
const SPLITS: [f64; 9] = [-8.0, -4.0, -2.0, -1.0, 0.0, 1.0, 2.0, 4.0, 8.0];

/// Domain edges plus the split points that fall strictly inside them.
fn split_points(center: f64, spread: f64, lower: f64, upper: f64) -> Vec<f64> {
    let mut points = vec![lower];
    points.extend(
        SPLITS
            .iter()
            .map(|k| center * (k * spread).exp())
            .filter(|&m| m > lower && m < upper),
    );
    points.push(upper);
    points
}

/// Density proportional to `(A/m)·exp(-(ln m - ln m_c)² / (2σ²))` on `[lower, upper]`.
///
/// The prefactor `A` cancels under normalization but is kept so that composite
/// models can join this shape to other pieces at its literature amplitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogNormal {
    prefactor: f64,
    center: f64,
    spread: f64,
    lower: f64,
    upper: f64,
    norm: f64,
}

impl LogNormal {
    /// Create a log-normal density with characteristic mass `center` and
    /// logarithmic width `spread` (natural-log units).
    ///
    /// # Errors
    /// * [`ImfError::InvalidDomain`] for malformed bounds
    /// * [`ImfError::InvalidParameter`] if `prefactor`, `center` or `spread` is not
    ///   finite and positive
    pub fn new(prefactor: f64, center: f64, spread: f64, lower: f64, upper: f64) -> Result<Self> {
        check_domain(lower, upper)?;
        check_positive("prefactor", prefactor)?;
        check_positive("center", center)?;
        check_positive("spread", spread)?;

        let mut model = Self {
            prefactor,
            center,
            spread,
            lower,
            upper,
            norm: 1.0,
        };
        let points = split_points(center, spread, lower, upper);
        let total = integrate_piecewise(|m| model.shape(m), &points)?;
        if !(total.is_finite() && total > 0.0) {
            return Err(ImfError::Integration(format!(
                "log-normal on [{lower}, {upper}] integrates to {total}"
            )));
        }
        model.norm = 1.0 / total;
        debug!(center, spread, lower, upper, norm = model.norm, "normalized log-normal");

        Ok(model)
    }

    /// Unnormalized shape at any positive mass.
    pub fn shape(&self, mass: f64) -> f64 {
        let z = (mass.ln() - self.center.ln()) / self.spread;
        self.prefactor / mass * (-0.5 * z * z).exp()
    }

    pub fn prefactor(&self) -> f64 {
        self.prefactor
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Normalization constant `k`.
    pub fn normalization(&self) -> f64 {
        self.norm
    }
}

impl MassFunction for LogNormal {
    fn domain(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        check_mass(mass, self.lower, self.upper)?;
        Ok(self.norm * self.shape(mass))
    }

    /// Domain edges with the peak and its flanks, so narrow peaks are resolved.
    fn breakpoints(&self) -> Vec<f64> {
        split_points(self.center, self.spread, self.lower, self.upper)
    }
}
