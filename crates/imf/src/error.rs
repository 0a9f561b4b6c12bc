//! Error types for mass function construction, evaluation and sampling.

use thiserror::Error;

/// Errors raised by the IMF engine.
///
/// Construction errors are reported before any model escapes its constructor;
/// evaluation errors are reported per call and never replaced by a sentinel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImfError {
    /// Malformed domain bounds (non-positive lower bound, lower >= upper, NaN).
    #[error("invalid mass domain [{lower}, {upper}]: requires 0 < lower < upper")]
    InvalidDomain {
        /// Requested lower bound
        lower: f64,
        /// Requested upper bound
        upper: f64,
    },

    /// Exponent count does not match the number of boundaries minus one.
    #[error("{gammas} exponents cannot describe segments between {bounds} bounds")]
    ShapeMismatch {
        /// Number of exponents supplied
        gammas: usize,
        /// Number of boundaries supplied
        bounds: usize,
    },

    /// Boundary sequence is not strictly increasing.
    #[error("segment bounds must be strictly increasing (violated at index {index})")]
    NonMonotonicBounds {
        /// Index of the first bound that is not greater than its predecessor
        index: usize,
    },

    /// A named model requires a fixed number of segments.
    #[error("model requires exactly {expected} segments, got {got}")]
    WrongSegmentCount {
        /// Segment count the model is defined with
        expected: usize,
        /// Segment count supplied by the caller
        got: usize,
    },

    /// Evaluation requested outside the model's domain.
    #[error("mass {mass} outside of domain [{lower}, {upper}]")]
    OutOfDomain {
        /// Requested mass
        mass: f64,
        /// Lower edge of the domain
        lower: f64,
        /// Upper edge of the domain
        upper: f64,
    },

    /// A shape parameter is non-finite or outside its admissible range.
    #[error("invalid value for {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// The normalizing integral of an unbounded tail does not converge.
    #[error("tail exponent {gamma} must be below -1 for an unbounded upper limit")]
    DivergentNormalization {
        /// Exponent of the unbounded terminal segment
        gamma: f64,
    },

    /// Quadrature produced a non-finite or non-positive result.
    #[error("numerical integration failed: {0}")]
    Integration(String),

    /// Every weight in a sampling population is zero.
    #[error("sampling population has no positive weight")]
    EmptyPopulation,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImfError>;

/// Validate `0 < lower < upper`, allowing `upper = +inf`.
pub(crate) fn check_domain(lower: f64, upper: f64) -> Result<()> {
    let valid = lower.is_finite() && lower > 0.0 && !upper.is_nan() && upper > lower;
    if valid {
        Ok(())
    } else {
        Err(ImfError::InvalidDomain { lower, upper })
    }
}

/// Require a finite parameter.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ImfError::InvalidParameter { name, value })
    }
}

/// Require a finite, strictly positive parameter.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImfError::InvalidParameter { name, value })
    }
}

/// Membership test shared by every model's `evaluate`.
pub(crate) fn check_mass(mass: f64, lower: f64, upper: f64) -> Result<()> {
    // NaN fails both comparisons, so it is rejected here as well.
    if mass >= lower && mass <= upper {
        Ok(())
    } else {
        Err(ImfError::OutOfDomain { mass, lower, upper })
    }
}
