//! Finite-difference solution of the one-dimensional, time-independent
//! Schrödinger equation (TISE) over a sampled potential.
//!
//! The Hamiltonian is discretized as a symmetric tridiagonal matrix via the
//! 3-point kinetic stencil, and a contiguous index-selected band of its
//! spectrum is computed by Sturm-sequence bisection, with inverse iteration
//! for the eigenvectors; nothing outside the requested band is ever
//! computed. See [`docs`][crate::docs] for background.

use std::mem;
use ndarray as nd;
use crate::{
    Arr1,
    config::SimulationConfig,
    error::{ ConfigError, LengthError, SolveError },
    interp::Interpolator,
    utils::wf_renormalize,
};

pub type SolveResult<T> = Result<T, SolveError>;

// bisection halves the Gershgorin interval down to the tolerance well within
// this many steps for any f64 spectrum
const BISECT_MAXITERS: usize = 128;
// inverse-iteration refinement rounds per eigenvector
const INVIT_ROUNDS: usize = 3;

/// A single eigenpair of the discretized Hamiltonian.
///
/// This struct is usually only returned by a solver function; you probably
/// won't ever instantiate it yourself.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy.
    pub e: f64,
    /// Wavefunction, sampled over the coordinate grid.
    pub wf: nd::Array1<f64>,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }
}

/// Simple record to keep track of coordinate and potential arrays.
///
/// Arrays borrowed from this type are guaranteed to have the same length;
/// the grid spacing held here is the single canonical value reused by every
/// later stage.
#[derive(Clone, Debug)]
pub struct System {
    // coordinate array
    x: nd::Array1<f64>,
    // canonical grid spacing
    dx: f64,
    // potential array
    V: nd::Array1<f64>,
    // array sizes
    n: usize,
}

impl System {
    /// Sample the configured potential onto the configured grid.
    ///
    /// The coordinate array spans `[x_min, x_max]` inclusively, but the
    /// canonical spacing is `(x_max − x_min) / n_points`; see
    /// [`docs`][crate::docs#grid-conventions] before changing either.
    pub fn from_config(cfg: &SimulationConfig) -> SolveResult<Self> {
        cfg.validate()?;
        let x: nd::Array1<f64>
            = nd::Array1::linspace(cfg.x_min, cfg.x_max, cfg.n_points);
        let dx = (cfg.x_max - cfg.x_min) / cfg.n_points as f64;
        let pot = Interpolator::build(
            cfg.method, cfg.points_x.clone(), cfg.points_y.clone())?;
        let V = pot.sample(&x)?;
        Ok(Self { x, dx, V, n: cfg.n_points })
    }

    /// Create from bare coordinate and potential arrays with an explicit
    /// grid spacing.
    pub fn new_arrays(x: nd::Array1<f64>, dx: f64, V: nd::Array1<f64>)
        -> SolveResult<Self>
    {
        LengthError::check(&x, &V)?;
        ConfigError::check_spacing(dx)?;
        let n = x.len();
        Ok(Self { x, dx, V, n })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the canonical grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Thin interface to [`solve`].
    pub fn solve(&self, mass: f64, range: (usize, usize))
        -> SolveResult<Vec<Solution>>
    {
        solve(self.dx, mass, &self.V, range)
    }
}

/// Discretize the Hamiltonian as a symmetric tridiagonal matrix.
///
/// Returns the main diagonal `a + V[i]` and the constant off-diagonal
/// `−a/2`, with `a = 1/(m Δ²)`: the 3-point finite-difference kinetic
/// operator plus the sampled potential, in units with ħ = 1.
///
/// *Panics if `V` is empty*.
pub fn hamiltonian<S>(dx: f64, mass: f64, V: &Arr1<S>)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where S: nd::Data<Elem = f64>
{
    let a = (mass * dx.powi(2)).recip();
    let diag = V.mapv(|Vk| a + Vk);
    let offdiag = nd::Array1::from_elem(V.len() - 1, -a / 2.0);
    (diag, offdiag)
}

// number of eigenvalues strictly below `x`, counted through the signs of the
// pivots of the LDLᵀ factorization of T − xI
fn sturm_count(diag: &[f64], offdiag: &[f64], x: f64, pivmin: f64) -> usize {
    let mut count: usize = 0;
    let mut q: f64 = 1.0;
    for (i, d) in diag.iter().enumerate() {
        let sub = if i == 0 { 0.0 } else { offdiag[i - 1].powi(2) / q };
        q = (d - x) - sub;
        if q.abs() < pivmin { q = -pivmin; }
        if q < 0.0 { count += 1; }
    }
    count
}

// Gershgorin bounds on the full spectrum, padded so the strict bisection
// predicates hold at both ends
fn gershgorin(diag: &[f64], offdiag: &[f64]) -> (f64, f64) {
    let n = diag.len();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (i, d) in diag.iter().enumerate() {
        let left = if i > 0 { offdiag[i - 1].abs() } else { 0.0 };
        let right = if i < n - 1 { offdiag[i].abs() } else { 0.0 };
        lo = lo.min(d - left - right);
        hi = hi.max(d + left + right);
    }
    let pad = f64::EPSILON * (lo.abs() + hi.abs()) + 2.0 * f64::MIN_POSITIVE;
    (lo - pad, hi + pad)
}

// k-th smallest eigenvalue (0-based) by bisection on the Sturm count
fn eigval_kth(
    diag: &[f64],
    offdiag: &[f64],
    k: usize,
    bounds: (f64, f64),
    pivmin: f64,
) -> f64 {
    let (mut lo, mut hi) = bounds;
    for _ in 0..BISECT_MAXITERS {
        let tol = 2.0 * f64::EPSILON * lo.abs().max(hi.abs()) + 2.0 * pivmin;
        if hi - lo <= tol { break; }
        let mid = 0.5 * (lo + hi);
        if sturm_count(diag, offdiag, mid, pivmin) > k {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}

// solve (T − λI) v = b in place via LU with partial pivoting; pivoted
// elimination fills in a second superdiagonal
fn shifted_solve(
    diag: &[f64],
    offdiag: &[f64],
    lambda: f64,
    pivmin: f64,
    b: &mut nd::Array1<f64>,
) {
    let n = diag.len();
    let mut u0: Vec<f64> = diag.iter().map(|d| d - lambda).collect();
    let mut u1: Vec<f64> = offdiag.to_vec();
    let mut u2: Vec<f64> = vec![0.0; n.saturating_sub(2)];
    let mut l: Vec<f64> = offdiag.to_vec();
    for i in 0..n - 1 {
        if l[i].abs() > u0[i].abs() {
            mem::swap(&mut u0[i], &mut l[i]);
            let t = u1[i];
            u1[i] = u0[i + 1];
            u0[i + 1] = t;
            if i + 2 < n {
                let t = u2[i];
                u2[i] = u1[i + 1];
                u1[i + 1] = t;
            }
            b.swap(i, i + 1);
        }
        if u0[i].abs() < pivmin {
            u0[i] = if u0[i] < 0.0 { -pivmin } else { pivmin };
        }
        let m = l[i] / u0[i];
        u0[i + 1] -= m * u1[i];
        if i + 2 < n { u1[i + 1] -= m * u2[i]; }
        let bi = b[i];
        b[i + 1] -= m * bi;
    }
    if u0[n - 1].abs() < pivmin {
        u0[n - 1] = if u0[n - 1] < 0.0 { -pivmin } else { pivmin };
    }
    b[n - 1] /= u0[n - 1];
    if n >= 2 {
        b[n - 2] = (b[n - 2] - u1[n - 2] * b[n - 1]) / u0[n - 2];
    }
    for i in (0..n.saturating_sub(2)).rev() {
        b[i] = (b[i] - u1[i] * b[i + 1] - u2[i] * b[i + 2]) / u0[i];
    }
}

// deterministic start vector for inverse iteration
fn invit_seed(n: usize, k: usize) -> nd::Array1<f64> {
    (0..n)
        .map(|i| {
            (((i + 137 * k + 1) as f64) * 0.618033988749895).fract() - 0.5
        })
        .collect()
}

fn l2_normalize(v: &mut nd::Array1<f64>) {
    let norm = v.iter().map(|vk| vk * vk).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|vk| { *vk /= norm; });
    }
}

// residual ‖T v − λ v‖∞ of a candidate eigenpair with an L2-normalized v
fn eig_residual(
    diag: &[f64],
    offdiag: &[f64],
    lambda: f64,
    v: &nd::Array1<f64>,
) -> f64 {
    let n = diag.len();
    (0..n)
        .map(|i| {
            let mut r = (diag[i] - lambda) * v[i];
            if i > 0 { r += offdiag[i - 1] * v[i - 1]; }
            if i < n - 1 { r += offdiag[i] * v[i + 1]; }
            r.abs()
        })
        .fold(0.0, f64::max)
}

/// Compute the `[first, last]` (1-based, inclusive) band of eigenpairs of a
/// real symmetric tridiagonal matrix.
///
/// Each selected eigenvalue is located individually by bisection on the
/// Sturm sequence, so eigenpairs outside the requested band are never
/// computed; eigenvectors follow from inverse iteration with
/// re-orthogonalization across the band. The returned band is ascending and
/// contiguous: entry `i` holds the `(first + i)`-th smallest eigenvalue of
/// the full spectrum, and its wavefunction is normalized to unit Euclidean
/// length (quadrature normalization is a separate stage).
///
/// The index range is rejected with a configuration error when it does not
/// satisfy `1 <= first <= last <= n`.
pub fn eigh_tridiagonal<S, T>(
    diag: &Arr1<S>,
    offdiag: &Arr1<T>,
    range: (usize, usize),
) -> SolveResult<Vec<Solution>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let n = diag.len();
    if offdiag.len() + 1 != n {
        return Err(LengthError(n, offdiag.len() + 1).into());
    }
    let (first, last) = range;
    ConfigError::check_eig_range(first, last, n)?;

    let d: Vec<f64> = diag.to_vec();
    let e: Vec<f64> = offdiag.to_vec();
    let emax2 = e.iter().fold(1.0_f64, |m, ek| m.max(ek * ek));
    let pivmin = f64::MIN_POSITIVE * emax2;
    let bounds = gershgorin(&d, &e);
    let span = (bounds.1 - bounds.0).max(f64::MIN_POSITIVE);

    let mut sols: Vec<Solution> = Vec::with_capacity(last - first + 1);
    for k in first - 1..last {
        let ek = eigval_kth(&d, &e, k, bounds, pivmin);
        let mut wf = invit_seed(n, k);
        l2_normalize(&mut wf);
        for _ in 0..INVIT_ROUNDS {
            shifted_solve(&d, &e, ek, pivmin, &mut wf);
            // keep near-degenerate neighbors within the band independent
            for prev in sols.iter() {
                let overlap: f64
                    = wf.iter().zip(prev.wf.iter())
                    .map(|(a, b)| a * b)
                    .sum();
                wf.iter_mut().zip(prev.wf.iter())
                    .for_each(|(a, b)| { *a -= overlap * b; });
            }
            l2_normalize(&mut wf);
        }
        let resid = eig_residual(&d, &e, ek, &wf);
        if resid > 1e3 * f64::EPSILON * span {
            println!(
                "solve::eigh_tridiagonal: WARNING: inverse iteration \
                residual {:.3e} for eigenvalue index {}",
                resid, k + 1,
            );
        }
        sols.push(Solution { e: ek, wf });
    }
    Ok(sols)
}

/// Master solving function: discretize the Hamiltonian, compute the selected
/// band of eigenpairs, and normalize each wavefunction in place under the
/// interior quadrature rule.
///
/// `range` selects eigenvalue indices 1-based and inclusive, ascending from
/// the bottom of the spectrum.
pub fn solve<S>(dx: f64, mass: f64, V: &Arr1<S>, range: (usize, usize))
    -> SolveResult<Vec<Solution>>
where S: nd::Data<Elem = f64>
{
    ConfigError::check_mass(mass)?;
    ConfigError::check_spacing(dx)?;
    let (diag, offdiag) = hamiltonian(dx, mass, V);
    let mut sols = eigh_tridiagonal(&diag, &offdiag, range)?;
    for (k, sol) in sols.iter_mut().enumerate() {
        wf_renormalize(&mut sol.wf, dx)
            .map_err(|err| SolveError::Degenerate(range.0 + k, err))?;
    }
    Ok(sols)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use super::*;
    use crate::utils::wf_norm;

    // eigenvalues of tridiag(c, a, c) of size n are a + 2c·cos(kπ/(n+1)),
    // ascending in k for c < 0
    fn toeplitz_eigval(n: usize, a: f64, c: f64, k: usize) -> f64 {
        a + 2.0 * c * (PI * k as f64 / (n as f64 + 1.0)).cos()
    }

    fn laplacian(n: usize) -> (nd::Array1<f64>, nd::Array1<f64>) {
        (
            nd::Array1::from_elem(n, 2.0),
            nd::Array1::from_elem(n - 1, -1.0),
        )
    }

    #[test]
    fn hamiltonian_coefficients() {
        let V: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0];
        let (diag, offdiag) = hamiltonian(0.5, 2.0, &V);
        assert_eq!(diag, nd::array![2.0, 3.0, 4.0]);
        assert_eq!(offdiag, nd::array![-1.0, -1.0]);
    }

    #[test]
    fn full_band_matches_toeplitz_spectrum() {
        let n = 50;
        let (diag, offdiag) = laplacian(n);
        let sols = eigh_tridiagonal(&diag, &offdiag, (1, n)).unwrap();
        assert_eq!(sols.len(), n);
        for (k, sol) in sols.iter().enumerate() {
            let expected = toeplitz_eigval(n, 2.0, -1.0, k + 1);
            assert!(
                (sol.e - expected).abs() < 1e-10,
                "eigenvalue {}: got {}, expected {}", k + 1, sol.e, expected,
            );
        }
    }

    #[test]
    fn interior_band_is_contiguous_and_absolute() {
        let n = 40;
        let (diag, offdiag) = laplacian(n);
        let band = eigh_tridiagonal(&diag, &offdiag, (3, 7)).unwrap();
        assert_eq!(band.len(), 5);
        for (j, sol) in band.iter().enumerate() {
            let expected = toeplitz_eigval(n, 2.0, -1.0, 3 + j);
            assert!((sol.e - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn band_is_nondecreasing() {
        let n = 60;
        // irregular diagonal
        let diag: nd::Array1<f64>
            = (0..n)
            .map(|i| ((i + 1) as f64 * 0.618033988749895).fract() * 4.0)
            .collect();
        let offdiag: nd::Array1<f64> = nd::Array1::from_elem(n - 1, -0.7);
        let sols = eigh_tridiagonal(&diag, &offdiag, (10, 30)).unwrap();
        assert_eq!(sols.len(), 21);
        assert!(
            sols.windows(2).all(|pair| pair[0].e <= pair[1].e),
            "band must be ascending",
        );
    }

    #[test]
    fn eigenvectors_satisfy_eigen_equation() {
        let n = 30;
        let (diag, offdiag) = laplacian(n);
        let sols = eigh_tridiagonal(&diag, &offdiag, (1, 5)).unwrap();
        let d: Vec<f64> = diag.to_vec();
        let e: Vec<f64> = offdiag.to_vec();
        for sol in sols.iter() {
            assert!(eig_residual(&d, &e, sol.e, &sol.wf) < 1e-8);
        }
    }

    #[test]
    fn eigenvectors_match_sine_modes() {
        let n = 30;
        let (diag, offdiag) = laplacian(n);
        let sols = eigh_tridiagonal(&diag, &offdiag, (1, 3)).unwrap();
        for (k, sol) in sols.iter().enumerate() {
            let mut sine: nd::Array1<f64>
                = (0..n)
                .map(|i| {
                    (PI * (k + 1) as f64 * (i + 1) as f64 / (n as f64 + 1.0))
                        .sin()
                })
                .collect();
            l2_normalize(&mut sine);
            let overlap: f64
                = sol.wf.iter().zip(&sine).map(|(a, b)| a * b).sum();
            assert!(
                (overlap.abs() - 1.0).abs() < 1e-8,
                "mode {}: |overlap| = {}", k + 1, overlap.abs(),
            );
        }
    }

    #[test]
    fn bad_ranges_are_rejected() {
        let (diag, offdiag) = laplacian(10);
        for range in [(0, 3), (4, 2), (1, 11)] {
            assert!(matches!(
                eigh_tridiagonal(&diag, &offdiag, range),
                Err(SolveError::Config(ConfigError::BadEigRange { .. })),
            ));
        }
    }

    #[test]
    fn solve_normalizes_under_interior_rule() {
        let n = 40;
        let dx = 0.1;
        let V: nd::Array1<f64> = nd::Array1::zeros(n);
        let sols = solve(dx, 1.0, &V, (1, 4)).unwrap();
        for sol in sols.iter() {
            assert!((wf_norm(&sol.wf, dx) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn solve_rejects_bad_mass_and_spacing() {
        let V: nd::Array1<f64> = nd::Array1::zeros(10);
        assert!(matches!(
            solve(0.1, 0.0, &V, (1, 2)),
            Err(SolveError::Config(ConfigError::BadMass(_))),
        ));
        assert!(matches!(
            solve(-0.1, 1.0, &V, (1, 2)),
            Err(SolveError::Config(ConfigError::BadSpacing(_))),
        ));
    }
}
