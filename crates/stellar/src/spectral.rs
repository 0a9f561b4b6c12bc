use std::fmt;

use serde::{Deserialize, Serialize};

/// Harvard spectral class, extended through the brown dwarf classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralType {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    // Brown dwarfs
    L,
    T,
    Y,
}

impl SpectralType {
    /// Class for an effective temperature in kelvin.
    pub fn from_temperature(kelvin: f64) -> Self {
        match kelvin {
            t if t >= 30_000.0 => SpectralType::O,
            t if t >= 10_000.0 => SpectralType::B,
            t if t >= 7_500.0 => SpectralType::A,
            t if t >= 6_000.0 => SpectralType::F,
            t if t >= 5_200.0 => SpectralType::G,
            t if t >= 3_700.0 => SpectralType::K,
            t if t >= 2_400.0 => SpectralType::M,
            t if t >= 1_300.0 => SpectralType::L,
            t if t >= 550.0 => SpectralType::T,
            _ => SpectralType::Y,
        }
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            SpectralType::O => "O",
            SpectralType::B => "B",
            SpectralType::A => "A",
            SpectralType::F => "F",
            SpectralType::G => "G",
            SpectralType::K => "K",
            SpectralType::M => "M",
            SpectralType::L => "L",
            SpectralType::T => "T",
            SpectralType::Y => "Y",
        };
        write!(f, "{}", str)
    }
}
