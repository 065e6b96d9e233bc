//! Constitutive force-length curves.
//!
//! A curve maps ligament strain to a normalized force multiplier. Curves are
//! immutable once built and are pure functions of their input, so they can be
//! evaluated with no simulation state at all.
//!
//! # Default Curve
//!
//! The default is a smooth interpolating spline through a fixed table of
//! (strain, normalized force) control points:
//!
//! ```text
//!  force
//!   2.0 ┤                            ●━━━●━━●━━━━━━━━━●
//!       │                           ╱
//!   1.17┤                         ●
//!       │                       ╱
//!   0.55┤                    ●
//!   0.26┤                ●
//!   0.12┤           ●
//!   0   ●━━━━━━●━●●
//!       └────────┴─────┴─────┴─────┴─────┴─────┴──── strain
//!               0    0.1   0.2   0.3   0.4   0.5   0.6
//! ```
//!
//! Zero below a small positive strain, a convex toe region, then a cap at
//! twice the force scale.
//!
//! The cap is only as flat as the spline through the table allows. Between
//! strain 0.6 and 4.0 the curve stays within about 0.011 of 2.0, peaking near
//! strain 2, and past 4.0 it extrapolates with the small negative end slope
//! (about −0.012 per unit strain) the table's last cubic leaves behind.
//!
//! # Extrapolation
//!
//! Strain regularly leaves the tabulated range during dynamic simulation, so
//! every curve is total: splines continue linearly with their end slope.

use crate::error::{CurveError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strain abscissae of the default curve.
pub const DEFAULT_STRAIN: [f64; 13] = [
    -6.0, -0.002, -0.001, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.601, 0.602, 4.0,
];

/// Normalized force ordinates of the default curve.
pub const DEFAULT_FORCE: [f64; 13] = [
    0.0, 0.0, 0.0, 0.0, 0.035, 0.12, 0.26, 0.55, 1.17, 2.0, 2.0, 2.0, 2.0,
];

/// Control points of a [`CubicSpline`], as persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplinePoints {
    /// Strictly increasing abscissae.
    pub x: Vec<f64>,
    /// Ordinates, one per abscissa.
    pub y: Vec<f64>,
}

/// Interpolating cubic spline with linear extrapolation.
///
/// Coefficients follow Forsythe, Malcolm and Moler: the third derivative at
/// each end matches that of the cubic through the four nearest points, so a
/// cubic is reproduced exactly. With only two points the spline is the
/// straight line through them.
///
/// On segment `i`, with `dx = u - x[i]`:
///
/// ```text
/// s(u) = y[i] + dx·(b[i] + dx·(c[i] + dx·d[i]))
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "SplinePoints", into = "SplinePoints")
)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(x[i], y[i])`.
    ///
    /// Needs at least two points, equal-length tables, finite values and
    /// strictly increasing abscissae.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(CurveError::InsufficientPoints {
                required: 2,
                actual: x.len(),
            });
        }
        if let Some(index) = x
            .iter()
            .zip(&y)
            .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
        {
            return Err(CurveError::NonFinite { index });
        }
        if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CurveError::NotIncreasing { index: index + 1 });
        }

        let (b, c, d) = fmm_coefficients(&x, &y);
        Ok(Self { x, y, b, c, d })
    }

    /// Number of control points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.x.len()
    }

    /// Control point abscissae.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Control point ordinates.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Tabulated domain `(first, last)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Value at `u`.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> f64 {
        let last = self.x.len() - 1;
        if u < self.x[0] {
            return self.y[0] + (u - self.x[0]) * self.b[0];
        }
        if u > self.x[last] {
            return self.y[last] + (u - self.x[last]) * self.b[last];
        }

        let i = self.segment(u);
        let dx = u - self.x[i];
        self.y[i] + dx * (self.b[i] + dx * (self.c[i] + dx * self.d[i]))
    }

    /// First derivative at `u`.
    #[must_use]
    pub fn derivative(&self, u: f64) -> f64 {
        let last = self.x.len() - 1;
        if u < self.x[0] {
            return self.b[0];
        }
        if u > self.x[last] {
            return self.b[last];
        }

        let i = self.segment(u);
        let dx = u - self.x[i];
        self.b[i] + dx * (2.0 * self.c[i] + 3.0 * self.d[i] * dx)
    }

    fn segment(&self, u: f64) -> usize {
        let upper = self.x.partition_point(|&xi| xi <= u);
        upper.saturating_sub(1).min(self.x.len() - 2)
    }
}

impl TryFrom<SplinePoints> for CubicSpline {
    type Error = CurveError;

    fn try_from(points: SplinePoints) -> Result<Self> {
        Self::new(points.x, points.y)
    }
}

impl From<CubicSpline> for SplinePoints {
    fn from(spline: CubicSpline) -> Self {
        Self {
            x: spline.x,
            y: spline.y,
        }
    }
}

/// Spline coefficients `(b, c, d)` for knots `x` and values `y`.
///
/// Tridiagonal solve for the second-derivative terms, with end conditions
/// taken from the divided differences of the end four points.
#[allow(clippy::needless_range_loop, clippy::many_single_char_names)]
fn fmm_coefficients(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = x.len();
    let nm1 = n - 1;
    let mut b = vec![0.0; n];
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    if n < 3 {
        let slope = (y[1] - y[0]) / (x[1] - x[0]);
        b.fill(slope);
        return (b, c, d);
    }

    // Differences and the tridiagonal system.
    d[0] = x[1] - x[0];
    c[1] = (y[1] - y[0]) / d[0];
    for i in 1..nm1 {
        d[i] = x[i + 1] - x[i];
        b[i] = 2.0 * (d[i - 1] + d[i]);
        c[i + 1] = (y[i + 1] - y[i]) / d[i];
        c[i] = c[i + 1] - c[i];
    }

    // End conditions.
    b[0] = -d[0];
    b[nm1] = -d[nm1 - 1];
    c[0] = 0.0;
    c[nm1] = 0.0;
    if n > 3 {
        c[0] = c[2] / (x[3] - x[1]) - c[1] / (x[2] - x[0]);
        c[nm1] = c[nm1 - 1] / (x[nm1] - x[nm1 - 2]) - c[nm1 - 2] / (x[nm1 - 1] - x[nm1 - 3]);
        c[0] = c[0] * d[0] * d[0] / (x[3] - x[0]);
        c[nm1] = -c[nm1] * d[nm1 - 1] * d[nm1 - 1] / (x[nm1] - x[nm1 - 3]);
    }

    // Elimination and back substitution.
    for i in 1..n {
        let t = d[i - 1] / b[i - 1];
        b[i] -= t * d[i - 1];
        c[i] -= t * c[i - 1];
    }
    c[nm1] /= b[nm1];
    for i in (0..nm1).rev() {
        c[i] = (c[i] - d[i] * c[i + 1]) / b[i];
    }

    // Polynomial coefficients.
    b[nm1] = (y[nm1] - y[nm1 - 1]) / d[nm1 - 1] + d[nm1 - 1] * (c[nm1 - 1] + 2.0 * c[nm1]);
    for i in 0..nm1 {
        b[i] = (y[i + 1] - y[i]) / d[i] - d[i] * (c[i + 1] + 2.0 * c[i]);
        d[i] = (c[i + 1] - c[i]) / d[i];
        c[i] *= 3.0;
    }
    c[nm1] *= 3.0;
    d[nm1] = d[nm1 - 1];

    (b, c, d)
}

/// Straight line `f(x) = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearFunction {
    /// Slope.
    pub slope: f64,
    /// Value at zero.
    pub intercept: f64,
}

impl LinearFunction {
    /// Create a linear function.
    #[must_use]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Value at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Strain to normalized force.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ForceLengthCurve {
    /// Interpolating spline through control points.
    Spline(CubicSpline),
    /// Straight line.
    Linear(LinearFunction),
    /// Same value everywhere.
    Constant {
        /// The value.
        value: f64,
    },
}

impl Default for ForceLengthCurve {
    fn default() -> Self {
        Self::Spline(default_spline())
    }
}

fn default_spline() -> CubicSpline {
    let (b, c, d) = fmm_coefficients(&DEFAULT_STRAIN, &DEFAULT_FORCE);
    CubicSpline {
        x: DEFAULT_STRAIN.to_vec(),
        y: DEFAULT_FORCE.to_vec(),
        b,
        c,
        d,
    }
}

impl ForceLengthCurve {
    /// Fit a spline curve through control points.
    pub fn spline(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        CubicSpline::new(x, y).map(Self::Spline)
    }

    /// Linear curve `f(x) = slope·x`, zero at zero strain.
    #[must_use]
    pub fn linear(slope: f64) -> Self {
        Self::Linear(LinearFunction::new(slope, 0.0))
    }

    /// Constant curve.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::Constant { value }
    }

    /// Normalized force at `strain`.
    #[must_use]
    pub fn evaluate(&self, strain: f64) -> f64 {
        match self {
            Self::Spline(spline) => spline.evaluate(strain),
            Self::Linear(line) => line.evaluate(strain),
            Self::Constant { value } => *value,
        }
    }

    /// Slope at `strain`.
    #[must_use]
    pub fn derivative(&self, strain: f64) -> f64 {
        match self {
            Self::Spline(spline) => spline.derivative(strain),
            Self::Linear(line) => line.slope,
            Self::Constant { .. } => 0.0,
        }
    }
}
