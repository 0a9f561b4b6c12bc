//! Temperature-to-colour lookup for blackbody emitters.
//!
//! A [`BlackbodyTable`] holds `(temperature, colour)` rows sorted by
//! temperature. Rows come from caller data, from `temperature,#RRGGBB` text, or
//! are tabulated from the Planckian locus fit in [`StellarColor`].

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::constants::SOLAR_TEMPERATURE;
use crate::error::{Result, StellarError};
use crate::stellar_color::StellarColor;

/// Coolest tabulated temperature of the default table (K)
pub const DEFAULT_MIN_TEMPERATURE: f64 = 1000.0;
/// Hottest tabulated temperature of the default table (K)
pub const DEFAULT_MAX_TEMPERATURE: f64 = 40_000.0;
/// Spacing of the default table (K)
pub const DEFAULT_STEP: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackbodyTable {
    rows: Vec<(f64, StellarColor)>,
}

impl BlackbodyTable {
    /// Build from arbitrary rows; they are sorted by temperature.
    ///
    /// # Errors
    /// [`StellarError::EmptyTable`] for no rows, and
    /// [`StellarError::InvalidTemperature`] for a non-finite or negative
    /// temperature.
    pub fn from_rows(mut rows: Vec<(f64, StellarColor)>) -> Result<Self> {
        if rows.is_empty() {
            return Err(StellarError::EmptyTable);
        }
        if let Some(&(t, _)) = rows.iter().find(|(t, _)| !(t.is_finite() && *t >= 0.0)) {
            return Err(StellarError::InvalidTemperature(t));
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { rows })
    }

    /// Parse one `temperature,#RRGGBB` row per line. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || StellarError::MalformedRow {
                line: i + 1,
                content: line.to_string(),
            };
            let (temperature, hex) = line.split_once(',').ok_or_else(malformed)?;
            let temperature: f64 = temperature.trim().parse().map_err(|_| malformed())?;
            rows.push((temperature, StellarColor::from_hex(hex)?));
        }
        let table = Self::from_rows(rows)?;
        debug!(rows = table.len(), "parsed blackbody colour table");
        Ok(table)
    }

    /// Tabulate the Planckian fit from `lower` to `upper` kelvin every `step`.
    pub fn tabulate(lower: f64, upper: f64, step: f64) -> Result<Self> {
        if !(lower.is_finite() && lower >= 0.0) {
            return Err(StellarError::InvalidTemperature(lower));
        }
        if !(upper.is_finite() && upper >= lower) {
            return Err(StellarError::InvalidTemperature(upper));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(StellarError::InvalidTemperature(step));
        }

        let count = ((upper - lower) / step).floor() as usize + 1;
        Self::from_rows(planckian_rows(lower, step, count))
    }

    /// Colour for an effective temperature in solar units.
    ///
    /// Picks the first row at or above `t_eff · 5772 K`; hotter temperatures
    /// than the table covers get the last row.
    pub fn color_match(&self, t_eff: f64) -> Result<StellarColor> {
        if !(t_eff.is_finite() && t_eff >= 0.0) {
            return Err(StellarError::InvalidTemperature(t_eff));
        }
        let kelvin = t_eff * SOLAR_TEMPERATURE;
        let idx = self
            .rows
            .partition_point(|&(t, _)| t < kelvin)
            .min(self.rows.len() - 1);
        Ok(self.rows[idx].1)
    }

    pub fn rows(&self) -> &[(f64, StellarColor)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for BlackbodyTable {
    /// Planckian fit from 1000 K to 40000 K in 100 K steps.
    fn default() -> Self {
        let count = ((DEFAULT_MAX_TEMPERATURE - DEFAULT_MIN_TEMPERATURE) / DEFAULT_STEP) as usize + 1;
        Self {
            rows: planckian_rows(DEFAULT_MIN_TEMPERATURE, DEFAULT_STEP, count),
        }
    }
}

/// Rows are ascending for a positive `step`.
fn planckian_rows(lower: f64, step: f64, count: usize) -> Vec<(f64, StellarColor)> {
    (0..count)
        .map(|i| {
            let t = lower + step * i as f64;
            (t, StellarColor::from_temperature(t))
        })
        .collect()
}

impl FromStr for BlackbodyTable {
    type Err = StellarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
