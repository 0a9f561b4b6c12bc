//! Literature-parameterized initial mass functions.
//!
//! * Salpeter (1955): a single power law with slope -2.35.
//! * Kroupa (2001): a four-segment broken power law.
//! * Chabrier (2003): a log-normal below 1 M☉ joined to a Salpeter tail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::broken_power_law::BrokenPowerLaw;
use crate::error::{check_domain, check_mass, ImfError, Result};
use crate::log_normal::LogNormal;
use crate::mass_function::MassFunction;
use crate::power_law::PowerLaw;

/// Salpeter (1955) slope.
pub const SALPETER_GAMMA: f64 = -2.35;

/// Kroupa (2001) segment exponents, lowest mass first.
pub const KROUPA_GAMMAS: [f64; 4] = [-0.3, -1.3, -2.3, -2.3];

/// Kroupa (2001) breakpoints below the caller-chosen upper bound (M☉).
pub const KROUPA_BREAKS: [f64; 4] = [0.01, 0.08, 0.5, 1.0];

/// Lowest mass covered by the named models: ~13 Jupiter masses, the
/// deuterium-burning limit.
pub const MIN_STELLAR_MASS: f64 = 0.01;

/// Mass at which the Chabrier log-normal hands over to its power-law tail.
pub const CHABRIER_SEAM: f64 = 1.0;

// ============================================================================
// Salpeter
// ============================================================================

/// Salpeter IMF: `k·m^-2.35` on a caller-supplied range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Salpeter(PowerLaw);

impl Salpeter {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        PowerLaw::new(SALPETER_GAMMA, lower, upper).map(Self)
    }

    pub fn power_law(&self) -> &PowerLaw {
        &self.0
    }
}

impl MassFunction for Salpeter {
    fn domain(&self) -> (f64, f64) {
        self.0.domain()
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        self.0.evaluate(mass)
    }

    fn cumulative(&self, mass: f64) -> Result<f64> {
        self.0.cumulative(mass)
    }
}

// ============================================================================
// Kroupa
// ============================================================================

/// Kroupa IMF: four power-law segments broken at 0.08, 0.5 and 1 M☉.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Kroupa(BrokenPowerLaw);

impl Kroupa {
    /// Kroupa exponents on `[0.01, upper_bound]`.
    pub fn new(upper_bound: f64) -> Result<Self> {
        Self::with_exponents(&KROUPA_GAMMAS, upper_bound)
    }

    /// Kroupa exponents with no upper mass limit.
    pub fn standard() -> Result<Self> {
        Self::new(f64::INFINITY)
    }

    /// Kroupa breakpoints with caller-chosen exponents.
    ///
    /// # Errors
    /// [`ImfError::WrongSegmentCount`] unless exactly four exponents are given;
    /// otherwise any [`BrokenPowerLaw::new`] error.
    pub fn with_exponents(gammas: &[f64], upper_bound: f64) -> Result<Self> {
        if gammas.len() != KROUPA_GAMMAS.len() {
            return Err(ImfError::WrongSegmentCount {
                expected: KROUPA_GAMMAS.len(),
                got: gammas.len(),
            });
        }
        let mut bounds = KROUPA_BREAKS.to_vec();
        bounds.push(upper_bound);
        BrokenPowerLaw::new(gammas, &bounds).map(Self)
    }

    pub fn broken_power_law(&self) -> &BrokenPowerLaw {
        &self.0
    }
}

impl MassFunction for Kroupa {
    fn domain(&self) -> (f64, f64) {
        self.0.domain()
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        self.0.evaluate(mass)
    }

    fn breakpoints(&self) -> Vec<f64> {
        self.0.breakpoints()
    }
}

// ============================================================================
// Chabrier
// ============================================================================

/// Shape parameters of the Chabrier log-normal and the extent of its tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChabrierParams {
    /// Log-normal amplitude
    pub prefactor: f64,
    /// Characteristic mass m_c (M☉)
    pub center: f64,
    /// Logarithmic width σ (natural-log units)
    pub spread: f64,
    /// Upper end of the power-law tail; `f64::INFINITY` for none
    pub upper_bound: f64,
}

impl Default for ChabrierParams {
    fn default() -> Self {
        Self {
            prefactor: 0.158 / std::f64::consts::LN_10,
            center: 0.079,
            spread: 1.0,
            upper_bound: f64::INFINITY,
        }
    }
}

/// Chabrier IMF: log-normal on `[0.01, 1]`, Salpeter power law on `[1, upper]`.
///
/// The power law is scaled by a join coefficient so both branches agree at the
/// seam; a single `k` normalizes the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chabrier {
    log_normal: LogNormal,
    tail: PowerLaw,
    join: f64,
    norm: f64,
}

impl Chabrier {
    /// # Errors
    /// [`ImfError::InvalidDomain`] if `upper_bound <= 1`, or any error from the
    /// log-normal parameters.
    pub fn new(params: ChabrierParams) -> Result<Self> {
        let ChabrierParams {
            prefactor,
            center,
            spread,
            upper_bound,
        } = params;
        check_domain(MIN_STELLAR_MASS, upper_bound)?;
        if upper_bound <= CHABRIER_SEAM {
            return Err(ImfError::InvalidDomain {
                lower: MIN_STELLAR_MASS,
                upper: upper_bound,
            });
        }

        let log_normal = LogNormal::new(prefactor, center, spread, MIN_STELLAR_MASS, CHABRIER_SEAM)?;
        let tail = PowerLaw::new(SALPETER_GAMMA, CHABRIER_SEAM, upper_bound)?;
        let join = log_normal.shape(CHABRIER_SEAM) / tail.shape(CHABRIER_SEAM);

        // Both branches are already normalized over their own ranges.
        let body = 1.0 / log_normal.normalization();
        let tail_area = 1.0 / tail.normalization();
        let total = body + join * tail_area;
        if !(total.is_finite() && total > 0.0) {
            return Err(ImfError::Integration(format!(
                "Chabrier IMF integrates to {total}"
            )));
        }
        let norm = 1.0 / total;
        debug!(join, norm, upper_bound, "normalized Chabrier IMF");

        Ok(Self {
            log_normal,
            tail,
            join,
            norm,
        })
    }

    /// Default Chabrier shape with the given upper mass limit.
    pub fn with_upper_bound(upper_bound: f64) -> Result<Self> {
        Self::new(ChabrierParams {
            upper_bound,
            ..ChabrierParams::default()
        })
    }

    /// Seam coefficient applied to the power-law branch.
    pub fn join_coefficient(&self) -> f64 {
        self.join
    }

    /// Normalization constant `k`.
    pub fn normalization(&self) -> f64 {
        self.norm
    }
}

impl MassFunction for Chabrier {
    fn domain(&self) -> (f64, f64) {
        (MIN_STELLAR_MASS, self.tail.domain().1)
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        let (lower, upper) = self.domain();
        check_mass(mass, lower, upper)?;
        if mass <= CHABRIER_SEAM {
            Ok(self.norm * self.log_normal.shape(mass))
        } else {
            Ok(self.norm * self.join * self.tail.shape(mass))
        }
    }

    fn breakpoints(&self) -> Vec<f64> {
        let mut points = self.log_normal.breakpoints();
        points.push(self.tail.domain().1);
        points
    }
}
