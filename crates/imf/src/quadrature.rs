//! Adaptive Gauss-Legendre quadrature over stellar mass ranges.
//!
//! Mass functions span several decades (0.01 to 150 M☉ and beyond), so positive
//! finite ranges are integrated in `ln m`, where power laws become exponentials
//! and log-normals become Gaussians. Unbounded upper limits are mapped onto
//! `[0, 1)` after the same logarithmic substitution.
//!
//! Each interval is estimated with a fixed 16-point rule and bisected until the
//! two halves agree with the whole within tolerance.

use std::cell::RefCell;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::{ImfError, Result};

/// Number of Gauss-Legendre nodes per interval.
const ORDER: usize = 16;

/// Relative tolerance requested from every integration.
pub const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Maximum bisection depth for a single interval.
const MAX_DEPTH: u32 = 40;

/// Maximum number of interval estimates per integration.
const MAX_INTERVALS: usize = 20_000;

/// Compute Gauss-Legendre nodes and weights on `[-1, 1]`.
///
/// Newton iteration on the Legendre recurrence, starting from the Chebyshev
/// approximation of each root; only the positive half is solved.
fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = vec![0.0f64; n];
    let mut weights = vec![0.0f64; n];
    let nf = n as f64;

    let legendre = |x: f64| {
        let mut p0 = 1.0f64;
        let mut p1 = x;
        for j in 2..=n {
            let jf = j as f64;
            let p2 = ((2.0 * jf - 1.0) * x * p1 - (jf - 1.0) * p0) / jf;
            p0 = p1;
            p1 = p2;
        }
        // (P_n(x), P'_n(x))
        (p1, nf * (x * p1 - p0) / (x * x - 1.0))
    };

    for i in 0..n.div_ceil(2) {
        let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre(x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        let (_, dp) = legendre(x);
        let w = 2.0 / ((1.0 - x * x) * dp * dp);

        nodes[i] = -x;
        nodes[n - 1 - i] = x;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    (nodes, weights)
}

fn rule() -> &'static (Vec<f64>, Vec<f64>) {
    static RULE: OnceLock<(Vec<f64>, Vec<f64>)> = OnceLock::new();
    RULE.get_or_init(|| gauss_legendre(ORDER))
}

/// Fixed-order estimate of `∫_a^b g`.
fn estimate<G: Fn(f64) -> f64>(g: &G, a: f64, b: f64) -> f64 {
    let (nodes, weights) = rule();
    let half = 0.5 * (b - a);
    let mid = 0.5 * (a + b);
    nodes
        .iter()
        .zip(weights)
        .map(|(&x, &w)| w * g(mid + half * x))
        .sum::<f64>()
        * half
}

struct Budget {
    intervals: usize,
    exhausted: bool,
}

fn bisect<G: Fn(f64) -> f64>(
    g: &G,
    a: f64,
    b: f64,
    whole: f64,
    tol: f64,
    depth: u32,
    budget: &mut Budget,
) -> f64 {
    let mid = 0.5 * (a + b);
    let left = estimate(g, a, mid);
    let right = estimate(g, mid, b);
    let refined = left + right;
    budget.intervals += 2;

    let floor = 64.0 * f64::EPSILON * refined.abs();
    if (refined - whole).abs() <= tol.max(floor) {
        return refined;
    }
    if depth == 0 || budget.intervals >= MAX_INTERVALS {
        budget.exhausted = true;
        return refined;
    }

    bisect(g, a, mid, left, 0.5 * tol, depth - 1, budget)
        + bisect(g, mid, b, right, 0.5 * tol, depth - 1, budget)
}

/// Adaptive quadrature of `g` over a finite interval.
fn adaptive<G: Fn(f64) -> f64>(g: &G, a: f64, b: f64) -> Result<f64> {
    let whole = estimate(g, a, b);
    if !whole.is_finite() {
        return Err(ImfError::Integration(format!(
            "integrand is not finite on [{a}, {b}]"
        )));
    }
    let tol = (RELATIVE_TOLERANCE * whole.abs()).max(f64::MIN_POSITIVE);
    let mut budget = Budget {
        intervals: 1,
        exhausted: false,
    };
    let value = bisect(g, a, b, whole, tol, MAX_DEPTH, &mut budget);

    if budget.exhausted {
        warn!(
            lower = a,
            upper = b,
            intervals = budget.intervals,
            "quadrature stopped before reaching tolerance"
        );
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImfError::Integration(format!(
            "non-finite integral {value} over [{a}, {b}]"
        )))
    }
}

/// Definite integral `∫_lower^upper f(x) dx`.
///
/// `upper` may be `f64::INFINITY` when `lower > 0`. Reversed limits negate the
/// result. Ranges starting at or below zero are integrated linearly and must be
/// finite.
pub fn integrate<F: Fn(f64) -> f64>(f: F, lower: f64, upper: f64) -> Result<f64> {
    if lower.is_nan() || upper.is_nan() {
        return Err(ImfError::Integration(format!(
            "NaN integration limit [{lower}, {upper}]"
        )));
    }
    if lower == upper {
        return Ok(0.0);
    }
    if upper < lower {
        return integrate(f, upper, lower).map(|v| -v);
    }
    if !lower.is_finite() {
        return Err(ImfError::Integration(format!(
            "lower limit must be finite, got {lower}"
        )));
    }

    if lower <= 0.0 {
        if !upper.is_finite() {
            return Err(ImfError::Integration(format!(
                "improper integrals require a positive lower limit, got {lower}"
            )));
        }
        return adaptive(&f, lower, upper);
    }

    let u0 = lower.ln();
    if upper.is_finite() {
        // x = e^u, dx = e^u du
        let g = |u: f64| {
            let x = u.exp().clamp(lower, upper);
            f(x) * x
        };
        adaptive(&g, u0, upper.ln())
    } else {
        // x = e^u, u = u0 + s / (1 - s), du = ds / (1 - s)^2
        let g = |s: f64| {
            let t = 1.0 - s;
            let x = (u0 + s / t).exp().max(lower);
            if !x.is_finite() {
                return 0.0;
            }
            let term = f(x) * x / (t * t);
            if term.is_finite() {
                term
            } else {
                0.0
            }
        };
        adaptive(&g, 0.0, 1.0)
    }
}

/// Sum of [`integrate`] over consecutive pairs of `points`.
///
/// Use the breakpoints of a piecewise density so that no estimate straddles a
/// kink.
pub fn integrate_piecewise<F: Fn(f64) -> f64>(f: F, points: &[f64]) -> Result<f64> {
    points
        .windows(2)
        .map(|pair| integrate(&f, pair[0], pair[1]))
        .sum()
}

/// [`integrate`] for a density that can fail at a node.
///
/// The first error raised by `f` is returned instead of the integral.
pub fn integrate_density<F: Fn(f64) -> Result<f64>>(f: F, lower: f64, upper: f64) -> Result<f64> {
    let failure = RefCell::new(None);
    let value = integrate(
        |x| match f(x) {
            Ok(v) => v,
            Err(e) => {
                failure.borrow_mut().get_or_insert(e);
                0.0
            }
        },
        lower,
        upper,
    );
    match failure.into_inner() {
        Some(e) => Err(e),
        None => value,
    }
}

/// [`integrate_density`] summed over consecutive pairs of `points`.
pub fn integrate_density_piecewise<F: Fn(f64) -> Result<f64>>(f: F, points: &[f64]) -> Result<f64> {
    points
        .windows(2)
        .map(|pair| integrate_density(&f, pair[0], pair[1]))
        .sum()
}
