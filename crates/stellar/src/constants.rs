//! Nominal solar values and conversion factors.
//!
//! Bodies store mass, radius, luminosity and temperature in solar units; these
//! convert them to SI.

use std::f64::consts::PI;

/// Nominal solar mass (kg)
pub const SOLAR_MASS: f64 = 1.988e30;

/// Nominal solar radius (m)
pub const SOLAR_RADIUS: f64 = 6.957e8;

/// Nominal solar luminosity (W)
pub const SOLAR_LUMINOSITY: f64 = 3.828e26;

/// Nominal solar effective temperature (K)
pub const SOLAR_TEMPERATURE: f64 = 5772.0;

/// Mean solar sidereal rotation rate (rad/day)
pub const SOLAR_ROTATION_RATE: f64 = 2.0 * PI / 24.47;

/// Solar moment of inertia, solid-sphere approximation (kg·m²)
pub const SOLAR_MOMENT_OF_INERTIA: f64 = 0.4 * SOLAR_MASS * SOLAR_RADIUS * SOLAR_RADIUS;

/// Gravitational constant (N·m²/kg²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Astronomical unit (m)
pub const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minimum mass for sustained hydrogen fusion (M☉)
pub const HYDROGEN_BURNING_LIMIT: f64 = 0.08;
