//! Miscellaneous tools, chiefly the wavefunction quadrature rule.
//!
//! All quadrature here uses the interior rectangle rule: the first and last
//! grid samples sit on the hard-wall boundaries of the discretization and
//! carry no probability weight, so sums run over indices `1..n−2` only.

use ndarray::{ self as nd, Ix1 };
use crate::{ Arr1, error::NormError };

/// Calculate the squared norm of a wavefunction under the interior
/// rectangle rule.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_norm<S>(q: &Arr1<S>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    let n: usize = q.len();
    dx * q.iter().skip(1).take(n - 2).map(|qk| qk * qk).sum::<f64>()
}

/// Renormalize a wavefunction in place so that its interior probability
/// density integrates to 1.
///
/// Fails if the interior squared norm is not strictly positive, which
/// signals a degenerate eigensolution.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
    -> Result<(), NormError>
where S: nd::DataMut<Elem = f64>
{
    let norm = wf_norm(q, dx);
    NormError::check(norm)?;
    let scale = norm.sqrt();
    q.iter_mut().for_each(|qk| { *qk /= scale; });
    Ok(())
}

/// Return a normalized copy of a wavefunction.
///
/// *Panics if `q` has length less than 3*.
pub fn wf_normalized<S>(q: &Arr1<S>, dx: f64)
    -> Result<nd::Array1<f64>, NormError>
where S: nd::Data<Elem = f64>
{
    let norm = wf_norm(q, dx);
    NormError::check(norm)?;
    let scale = norm.sqrt();
    Ok(q.mapv(|qk| qk / scale))
}
