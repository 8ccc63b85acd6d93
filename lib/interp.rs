//! Construction of a continuous potential from sparse control points.
//!
//! Potentials are specified as ordered `(x, y)` control points and lifted to
//! a continuous function by one of three methods, selected by [`Method`];
//! the resulting [`Interpolator`] is then sampled over the full coordinate
//! grid.
//!
//! ```
//! use ndarray as nd;
//! use tise::interp::{ Interpolator, Method };
//!
//! let x: nd::Array1<f64> = nd::array![-2.0, -1.0, 0.0, 1.0, 2.0];
//! let y = x.mapv(|xk| xk * xk);
//! let pot = Interpolator::build(Method::Polynomial, x, y).unwrap();
//! assert!((pot.at(0.5).unwrap() - 0.25).abs() < 1e-10);
//! ```

use std::str::FromStr;
use ndarray as nd;
use ndarray_linalg::LeastSquaresSvd;
use num_traits::Num;
use crate::{
    Arr1,
    error::{ ConfigError, InterpError, LengthError },
};

pub type InterpResult<T> = Result<T, InterpError>;

/// Interpolation method selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Piecewise-linear interpolation between consecutive control points.
    Linear,
    /// Natural cubic spline (zero curvature at both end knots).
    Cspline,
    /// Least-squares polynomial of degree (control point count − 1).
    Polynomial,
}

impl Method {
    /// Return `true` if `self` is `Linear`.
    pub fn is_linear(&self) -> bool { matches!(self, Self::Linear) }

    /// Return `true` if `self` is `Cspline`.
    pub fn is_cspline(&self) -> bool { matches!(self, Self::Cspline) }

    /// Return `true` if `self` is `Polynomial`.
    pub fn is_polynomial(&self) -> bool { matches!(self, Self::Polynomial) }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "cspline" => Ok(Self::Cspline),
            "polynomial" => Ok(Self::Polynomial),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

/// Evaluate a polynomial with ascending-power coefficients via Horner's rule.
pub fn horner<S, A>(coeffs: &Arr1<S>, x: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Num + Copy,
{
    coeffs.iter().rev().fold(A::zero(), |acc, ck| acc * x + *ck)
}

/// Natural cubic spline through a set of knots.
///
/// Second derivatives at the knots are precomputed at construction; the
/// natural boundary condition imposes zero curvature at both end knots.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    // knot coordinates, strictly increasing
    x: nd::Array1<f64>,
    // knot values
    y: nd::Array1<f64>,
    // second derivatives at the knots
    d2: nd::Array1<f64>,
}

impl CubicSpline {
    /// Construct from knots with the natural boundary condition.
    ///
    /// *Panics if fewer than 2 knots are given.*
    pub fn natural(x: nd::Array1<f64>, y: nd::Array1<f64>)
        -> InterpResult<Self>
    {
        LengthError::check(&x, &y)?;
        let n = x.len();
        let mut d2: nd::Array1<f64> = nd::Array1::zeros(n);
        let mut u: Vec<f64> = vec![0.0; n - 1];
        for i in 1..n - 1 {
            let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
            let p = sig * d2[i - 1] + 2.0;
            d2[i] = (sig - 1.0) / p;
            u[i] = (y[i + 1] - y[i]) / (x[i + 1] - x[i])
                - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
            u[i] = (6.0 * u[i] / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
        }
        for k in (1..n.saturating_sub(1)).rev() {
            d2[k] = d2[k] * d2[k + 1] + u[k];
        }
        Ok(Self { x, y, d2 })
    }

    /// Evaluate at a point.
    ///
    /// Outside the knots this extends the boundary polynomial.
    pub fn at(&self, xk: f64) -> f64 {
        let n = self.x.len();
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.x[mid] > xk { hi = mid; } else { lo = mid; }
        }
        let h = self.x[hi] - self.x[lo];
        let a = (self.x[hi] - xk) / h;
        let b = (xk - self.x[lo]) / h;
        a * self.y[lo] + b * self.y[hi]
            + ((a.powi(3) - a) * self.d2[lo] + (b.powi(3) - b) * self.d2[hi])
                * h.powi(2) / 6.0
    }
}

/// A continuous potential built from sparse control points.
///
/// Tagged by [`Method`]; every variant supports pointwise evaluation and
/// sampling over a full coordinate grid.
#[derive(Clone, Debug)]
pub enum Interpolator {
    /// Piecewise-linear interpolant over its control points.
    Linear {
        /// Control point x-coordinates, strictly increasing.
        x: nd::Array1<f64>,
        /// Control point values.
        y: nd::Array1<f64>,
    },
    /// Natural cubic spline interpolant.
    Cspline(CubicSpline),
    /// Fitted polynomial with ascending-power coefficients.
    Polynomial {
        /// Coefficients, ascending in power.
        coeffs: nd::Array1<f64>,
    },
}

impl Interpolator {
    /// Build the interpolant selected by `method` from control points.
    ///
    /// The polynomial variant fits degree (point count − 1) by SVD least
    /// squares over a Vandermonde matrix; for distinct control points this
    /// is the exact interpolating polynomial.
    pub fn build(method: Method, x: nd::Array1<f64>, y: nd::Array1<f64>)
        -> InterpResult<Self>
    {
        LengthError::check(&x, &y)?;
        match method {
            Method::Linear => Ok(Self::Linear { x, y }),
            Method::Cspline => CubicSpline::natural(x, y).map(Self::Cspline),
            Method::Polynomial => {
                let deg = x.len() - 1;
                let vander: nd::Array2<f64>
                    = nd::Array2::from_shape_fn(
                        (x.len(), deg + 1),
                        |(i, j)| x[i].powi(j as i32),
                    );
                let fit = vander.least_squares(&y)?;
                Ok(Self::Polynomial { coeffs: fit.solution })
            },
        }
    }

    /// Evaluate the interpolant at a single coordinate.
    ///
    /// Only the linear variant is restricted to its support; the spline and
    /// polynomial variants evaluate anywhere.
    pub fn at(&self, xk: f64) -> InterpResult<f64> {
        match self {
            Self::Linear { x, y } => {
                let n = x.len();
                // linspace endpoints can overshoot the support by an ulp
                let tol = (x[n - 1] - x[0]) * f64::EPSILON;
                if xk < x[0] - tol || xk > x[n - 1] + tol {
                    return Err(InterpError::OutOfSupport {
                        x: xk,
                        lo: x[0],
                        hi: x[n - 1],
                    });
                }
                let xk = xk.clamp(x[0], x[n - 1]);
                let mut lo = 0;
                let mut hi = n - 1;
                while hi - lo > 1 {
                    let mid = (lo + hi) / 2;
                    if x[mid] > xk { hi = mid; } else { lo = mid; }
                }
                let t = (xk - x[lo]) / (x[hi] - x[lo]);
                Ok((1.0 - t) * y[lo] + t * y[hi])
            },
            Self::Cspline(spline) => Ok(spline.at(xk)),
            Self::Polynomial { coeffs } => Ok(horner(coeffs, xk)),
        }
    }

    /// Sample the interpolant over a coordinate grid.
    pub fn sample<S>(&self, grid: &Arr1<S>) -> InterpResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        grid.iter().map(|&xk| self.at(xk)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_ascending_powers() {
        let coeffs: nd::Array1<f64> = nd::array![1.0, 2.0, 3.0];
        assert_eq!(horner(&coeffs, 2.0), 17.0);
        assert_eq!(horner(&coeffs, 0.0), 1.0);
    }

    #[test]
    fn linear_reproduces_control_points() {
        let x: nd::Array1<f64> = nd::array![-2.0, -0.5, 1.0, 3.0];
        let y: nd::Array1<f64> = nd::array![4.0, 0.25, 1.0, 9.0];
        let pot = Interpolator::build(Method::Linear, x.clone(), y.clone())
            .unwrap();
        for (xk, yk) in x.iter().zip(&y) {
            assert!((pot.at(*xk).unwrap() - yk).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_midpoint() {
        let pot = Interpolator::build(
            Method::Linear,
            nd::array![0.0, 1.0],
            nd::array![0.0, 2.0],
        ).unwrap();
        assert!((pot.at(0.5).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_outside_support_fails() {
        let pot = Interpolator::build(
            Method::Linear,
            nd::array![-1.0, 1.0],
            nd::array![0.0, 0.0],
        ).unwrap();
        assert!(matches!(
            pot.at(1.5),
            Err(InterpError::OutOfSupport { .. }),
        ));
        assert!(matches!(
            pot.at(-1.0 - 1e-6),
            Err(InterpError::OutOfSupport { .. }),
        ));
    }

    #[test]
    fn cspline_passes_through_knots() {
        let x: nd::Array1<f64> = nd::array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y: nd::Array1<f64> = nd::array![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = CubicSpline::natural(x.clone(), y.clone()).unwrap();
        for (xk, yk) in x.iter().zip(&y) {
            assert!(
                (spline.at(*xk) - yk).abs() < 1e-10,
                "spline({}) = {}, expected {}", xk, spline.at(*xk), yk,
            );
        }
    }

    #[test]
    fn cspline_two_knots_is_linear() {
        let spline = CubicSpline::natural(
            nd::array![0.0, 2.0],
            nd::array![1.0, 5.0],
        ).unwrap();
        assert!((spline.at(0.5) - 2.0).abs() < 1e-12);
        assert!((spline.at(1.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn polynomial_exact_at_control_points() {
        let x: nd::Array1<f64> = nd::array![-2.0, -1.0, 0.0, 1.0, 2.0];
        let y = x.mapv(|xk| xk.powi(4) - 2.0 * xk.powi(2) + 0.5);
        let pot = Interpolator::build(Method::Polynomial, x.clone(), y.clone())
            .unwrap();
        for (xk, yk) in x.iter().zip(&y) {
            assert!(
                (pot.at(*xk).unwrap() - yk).abs() < 1e-10,
                "fit({}) = {}, expected {}", xk, pot.at(*xk).unwrap(), yk,
            );
        }
    }

    #[test]
    fn polynomial_matches_parabola_between_points() {
        let pot = Interpolator::build(
            Method::Polynomial,
            nd::array![-1.0, 0.0, 1.0],
            nd::array![0.5, 0.0, 0.5],
        ).unwrap();
        assert!((pot.at(0.5).unwrap() - 0.125).abs() < 1e-10);
        // exact fits extend beyond the control points
        assert!((pot.at(3.0).unwrap() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn sample_covers_grid() {
        let grid: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, 101);
        let pot = Interpolator::build(
            Method::Linear,
            nd::array![-1.0, 1.0],
            nd::array![-1.0, 1.0],
        ).unwrap();
        let V = pot.sample(&grid).unwrap();
        assert_eq!(V.len(), 101);
        assert!((V[50] - 0.0).abs() < 1e-12);
        assert!((V[100] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn method_names_parse() {
        assert_eq!("linear".parse::<Method>().unwrap(), Method::Linear);
        assert_eq!("cspline".parse::<Method>().unwrap(), Method::Cspline);
        assert_eq!(
            "polynomial".parse::<Method>().unwrap(), Method::Polynomial);
        assert!("spline".parse::<Method>().is_err());
    }
}
