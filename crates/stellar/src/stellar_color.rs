use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StellarError};

/// Visual colour of a stellar body as 8-bit sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StellarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StellarColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blackbody colour at `kelvin`, from a fit to the Planckian locus.
    ///
    /// Temperatures are clamped to 1000-40000 K, where the fit holds.
    pub fn from_temperature(kelvin: f64) -> Self {
        let t = kelvin.clamp(1000.0, 40_000.0) / 100.0;

        let r = if t <= 66.0 {
            255.0
        } else {
            329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2)
        };
        let g = if t <= 66.0 {
            99.470_802_586_1 * t.ln() - 161.119_568_166_1
        } else {
            288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2)
        };
        let b = if t >= 66.0 {
            255.0
        } else if t <= 19.0 {
            0.0
        } else {
            138.517_731_223_1 * (t - 10.0).ln() - 305.044_792_730_7
        };

        Self::new(channel(r), channel(g), channel(b))
    }

    /// `#RRGGBB`, upper case.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `RRGGBB`, either case.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || StellarError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for StellarColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for StellarColor {
    type Err = StellarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
