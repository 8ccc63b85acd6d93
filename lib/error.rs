//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a [`SimulationConfig`][crate::config::SimulationConfig]
/// fails validation or cannot be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned for an unrecognized interpolation method name.
    #[error("interpolation method must be 'linear', 'cspline', or 'polynomial'; got '{0}'")]
    UnknownMethod(String),

    /// Returned when fewer than two control points are given.
    #[error("interpolation requires at least 2 control points; got {0}")]
    TooFewPoints(usize),

    /// Returned when control point x-coordinates are not strictly increasing.
    #[error("control point x-coordinates must be strictly increasing")]
    UnorderedPoints,

    /// Returned for inverted or empty grid bounds.
    #[error("grid bounds must satisfy xmax > xmin; got [{0}, {1}]")]
    BadBounds(f64, f64),

    /// Returned for grids too small to carry the discretization.
    #[error("grid must contain at least 3 points; got {0}")]
    BadGridSize(usize),

    /// Returned for a non-positive particle mass.
    #[error("particle mass must be greater than 0; got {0}")]
    BadMass(f64),

    /// Returned for a non-positive grid spacing.
    #[error("grid spacing must be greater than 0; got {0}")]
    BadSpacing(f64),

    /// Returned for an eigenvalue index selection outside the spectrum.
    #[error("eigenvalue selection must satisfy 1 <= first <= last <= {n}; got ({first}, {last})")]
    BadEigRange { first: usize, last: usize, n: usize },

    /// Returned for an unparseable input-file line.
    #[error("input line {0}: expected {1}")]
    Malformed(usize, &'static str),

    /// Returned when the input file ends before a required field.
    #[error("input ended before {0}")]
    Truncated(&'static str),

    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// [`std::io::Error`], from reading an input file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_bounds(x_min: f64, x_max: f64) -> Result<(), Self> {
        (x_max > x_min).then_some(()).ok_or(Self::BadBounds(x_min, x_max))
    }

    pub(crate) fn check_grid_size(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::BadGridSize(n))
    }

    pub(crate) fn check_spacing(dx: f64) -> Result<(), Self> {
        (dx > 0.0).then_some(()).ok_or(Self::BadSpacing(dx))
    }

    pub(crate) fn check_eig_range(first: usize, last: usize, n: usize)
        -> Result<(), Self>
    {
        (1 <= first && first <= last && last <= n)
            .then_some(())
            .ok_or(Self::BadEigRange { first, last, n })
    }

    pub(crate) fn check_points(
        x: &nd::Array1<f64>,
        y: &nd::Array1<f64>,
    ) -> Result<(), Self> {
        LengthError::check(x, y)?;
        (x.len() >= 2).then_some(()).ok_or(Self::TooFewPoints(x.len()))?;
        x.iter().zip(x.iter().skip(1)).all(|(a, b)| a < b)
            .then_some(())
            .ok_or(Self::UnorderedPoints)
    }
}

/// Returned from functions in [`interp`][crate::interp].
#[derive(Debug, Error)]
pub enum InterpError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// Returned when a piecewise-linear interpolant is evaluated outside its
    /// support.
    #[error("coordinate {x} lies outside the interpolation support [{lo}, {hi}]")]
    OutOfSupport { x: f64, lo: f64, hi: f64 },

    /// [`LinalgError`], from the polynomial least-squares fit.
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

/// Returned when a wavefunction's interior probability integral is not
/// strictly positive.
#[derive(Debug, Error)]
#[error("wavefunction has non-positive norm {0:.3e}")]
pub struct NormError(pub f64);

impl NormError {
    pub(crate) fn check(norm: f64) -> Result<(), Self> {
        (norm > 0.0).then_some(()).ok_or(Self(norm))
    }
}

/// Returned from the solver pipeline.
#[derive(Debug, Error)]
pub enum SolveError {
    /// [`ConfigError`]
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// [`InterpError`]
    #[error("interpolation error: {0}")]
    Interp(#[from] InterpError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`NormError`], tagged with the offending 1-based eigenvalue index.
    #[error("eigenvalue index {0}: {1}")]
    Degenerate(usize, NormError),

    /// [`std::io::Error`], from result writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
