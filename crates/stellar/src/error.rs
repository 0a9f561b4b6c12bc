//! Error types for stellar bodies, colour tables and population synthesis.

use imf::ImfError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StellarError {
    /// Failure inside the mass function engine.
    #[error(transparent)]
    Imf(#[from] ImfError),

    #[error("invalid hex colour {0:?}: expected #RRGGBB")]
    InvalidHex(String),

    /// A colour table line that is not `temperature,#RRGGBB`.
    #[error("malformed colour table row {line}: {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("colour table has no rows")]
    EmptyTable,

    #[error("invalid temperature {0}")]
    InvalidTemperature(f64),

    #[error("invalid body mass {0}: must be finite and positive")]
    InvalidMass(f64),
}

pub type Result<T> = std::result::Result<T, StellarError>;
