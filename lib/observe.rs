//! Position-operator statistics for normalized eigenstates.
//!
//! Expectation values are taken under the same interior quadrature rule as
//! the normalizer: only the `n − 2` interior grid points contribute.

use ndarray as nd;
use crate::{
    Arr1,
    solve::{ Solution, System },
};

/// Per-eigenstate position expectation value and uncertainty.
#[derive(Copy, Clone, Debug)]
pub struct Observable {
    /// Position expectation value ⟨x⟩.
    pub x_mean: f64,
    /// Position uncertainty Δx = √(⟨x²⟩ − ⟨x⟩²).
    pub x_unc: f64,
}

/// Interior grid coordinates, `x_min + Δ` through `x_max − Δ`, matching the
/// normalizer's convention of excluding both boundary samples.
pub fn x_interior(x_min: f64, x_max: f64, dx: f64, n: usize)
    -> nd::Array1<f64>
{
    nd::Array1::linspace(x_min + dx, x_max - dx, n - 2)
}

/// Compute ⟨x⟩ and Δx for one normalized wavefunction over the interior
/// coordinates.
///
/// The uncertainty radicand is clamped at zero: floating-point cancellation
/// near a deterministic state can push ⟨x²⟩ − ⟨x⟩² slightly negative, and a
/// NaN must never reach persisted output.
pub fn position_moments<S, T>(dx: f64, x_int: &Arr1<S>, wf: &Arr1<T>)
    -> Observable
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let n = wf.len();
    let mut x_mean: f64 = 0.0;
    let mut x_sq: f64 = 0.0;
    for (xi, qi) in x_int.iter().zip(wf.iter().skip(1).take(n - 2)) {
        let p = qi * qi;
        x_mean += p * xi;
        x_sq += p * xi * xi;
    }
    x_mean *= dx;
    x_sq *= dx;
    let x_unc = (x_sq - x_mean.powi(2)).max(0.0).sqrt();
    Observable { x_mean, x_unc }
}

/// Compute position statistics for every eigenstate of a solved system.
pub fn expectation_values(sys: &System, sols: &[Solution]) -> Vec<Observable> {
    let x = sys.get_x();
    let n = sys.len();
    let x_int = x_interior(x[0], x[n - 1], sys.get_dx(), n);
    sols.iter()
        .map(|sol| position_moments(sys.get_dx(), &x_int, &sol.wf))
        .collect()
}
