//! Serializable IMF selection and the [`Imf`] enum it builds.
//!
//! ```
//! use imf::{ImfConfig, MassFunction};
//!
//! let config: ImfConfig =
//!     serde_json::from_str(r#"{ "model": "kroupa", "upper_bound": 150.0 }"#).unwrap();
//! let imf = config.build().unwrap();
//! assert_eq!(imf.domain(), (0.01, 150.0));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::broken_power_law::BrokenPowerLaw;
use crate::error::Result;
use crate::l3::{L3Params, L3};
use crate::log_normal::LogNormal;
use crate::mass_function::MassFunction;
use crate::models::{Chabrier, ChabrierParams, Kroupa, Salpeter, KROUPA_GAMMAS};
use crate::power_law::PowerLaw;

/// Declarative choice of mass function.
///
/// Absent upper bounds mean "unbounded"; JSON has no representation for
/// infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ImfConfig {
    Salpeter {
        lower: f64,
        upper: f64,
    },
    Kroupa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exponents: Option<Vec<f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },
    Chabrier {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefactor: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spread: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },
    L3 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        beta: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mu: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<f64>,
    },
    PowerLaw {
        gamma: f64,
        lower: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<f64>,
    },
    LogNormal {
        prefactor: f64,
        center: f64,
        spread: f64,
        lower: f64,
        upper: f64,
    },
    BrokenPowerLaw {
        gammas: Vec<f64>,
        bounds: Vec<f64>,
    },
}

impl Default for ImfConfig {
    fn default() -> Self {
        ImfConfig::Kroupa {
            exponents: None,
            upper_bound: None,
        }
    }
}

impl ImfConfig {
    /// Construct and normalize the configured model.
    pub fn build(&self) -> Result<Imf> {
        let unbounded = |upper: &Option<f64>| upper.unwrap_or(f64::INFINITY);

        let imf = match self {
            ImfConfig::Salpeter { lower, upper } => Imf::Salpeter(Salpeter::new(*lower, *upper)?),
            ImfConfig::Kroupa {
                exponents,
                upper_bound,
            } => {
                let gammas = exponents.as_deref().unwrap_or(&KROUPA_GAMMAS[..]);
                Imf::Kroupa(Kroupa::with_exponents(gammas, unbounded(upper_bound))?)
            }
            ImfConfig::Chabrier {
                prefactor,
                center,
                spread,
                upper_bound,
            } => {
                let defaults = ChabrierParams::default();
                Imf::Chabrier(Chabrier::new(ChabrierParams {
                    prefactor: prefactor.unwrap_or(defaults.prefactor),
                    center: center.unwrap_or(defaults.center),
                    spread: spread.unwrap_or(defaults.spread),
                    upper_bound: unbounded(upper_bound),
                })?)
            }
            ImfConfig::L3 {
                alpha,
                beta,
                mu,
                lower,
                upper,
            } => {
                let defaults = L3Params::default();
                Imf::L3(L3::new(L3Params {
                    alpha: alpha.unwrap_or(defaults.alpha),
                    beta: beta.unwrap_or(defaults.beta),
                    mu: mu.unwrap_or(defaults.mu),
                    lower: lower.unwrap_or(defaults.lower),
                    upper: upper.unwrap_or(defaults.upper),
                })?)
            }
            ImfConfig::PowerLaw {
                gamma,
                lower,
                upper,
            } => Imf::PowerLaw(PowerLaw::new(*gamma, *lower, unbounded(upper))?),
            ImfConfig::LogNormal {
                prefactor,
                center,
                spread,
                lower,
                upper,
            } => Imf::LogNormal(LogNormal::new(
                *prefactor, *center, *spread, *lower, *upper,
            )?),
            ImfConfig::BrokenPowerLaw { gammas, bounds } => {
                Imf::BrokenPowerLaw(BrokenPowerLaw::new(gammas, bounds)?)
            }
        };
        Ok(imf)
    }
}

/// Any constructed mass function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model", content = "state", rename_all = "snake_case")]
pub enum Imf {
    Salpeter(Salpeter),
    Kroupa(Kroupa),
    Chabrier(Chabrier),
    L3(L3),
    PowerLaw(PowerLaw),
    LogNormal(LogNormal),
    BrokenPowerLaw(BrokenPowerLaw),
}

impl Imf {
    fn inner(&self) -> &dyn MassFunction {
        match self {
            Imf::Salpeter(m) => m,
            Imf::Kroupa(m) => m,
            Imf::Chabrier(m) => m,
            Imf::L3(m) => m,
            Imf::PowerLaw(m) => m,
            Imf::LogNormal(m) => m,
            Imf::BrokenPowerLaw(m) => m,
        }
    }
}

impl MassFunction for Imf {
    fn domain(&self) -> (f64, f64) {
        self.inner().domain()
    }

    fn evaluate(&self, mass: f64) -> Result<f64> {
        self.inner().evaluate(mass)
    }

    fn breakpoints(&self) -> Vec<f64> {
        self.inner().breakpoints()
    }

    fn cumulative(&self, mass: f64) -> Result<f64> {
        self.inner().cumulative(mass)
    }
}

impl fmt::Display for Imf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Imf::Salpeter(_) => "Salpeter",
            Imf::Kroupa(_) => "Kroupa",
            Imf::Chabrier(_) => "Chabrier",
            Imf::L3(_) => "L3",
            Imf::PowerLaw(_) => "power law",
            Imf::LogNormal(_) => "log-normal",
            Imf::BrokenPowerLaw(_) => "broken power law",
        };
        let (lower, upper) = self.domain();
        write!(f, "{} IMF on [{}, {}] M☉", name, lower, upper)
    }
}
