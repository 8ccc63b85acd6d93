//! Plain-text result sinks.
//!
//! Every pipeline product is written as a whitespace-separated table into a
//! working directory, one file per product:
//! - `potential.dat` — sampled `(x, V(x))` pairs;
//! - `energies.dat` — selected eigenvalues, ascending, one per line;
//! - `wavefuncs.dat` — one row per grid point: the coordinate, then one
//!   column per selected eigenstate;
//! - `expvalues.dat` — per-eigenstate `(⟨x⟩, Δx)` pairs.
//!
//! These sinks are pure consumers: they are called only after the whole
//! pipeline has succeeded, so a failed run persists nothing.

use std::{
    fs::File,
    io::{ self, BufWriter, Write },
    path::Path,
};
use ndarray as nd;
use crate::{ Arr1, observe::Observable, solve::Solution };

/// Write sampled `(x, V(x))` pairs to `potential.dat`.
pub fn write_potential<S, T, P>(x: &Arr1<S>, V: &Arr1<T>, dir: P)
    -> io::Result<()>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    P: AsRef<Path>,
{
    let mut out
        = BufWriter::new(File::create(dir.as_ref().join("potential.dat"))?);
    for (xk, Vk) in x.iter().zip(V) {
        writeln!(out, "{:.10e} {:.10e}", xk, Vk)?;
    }
    out.flush()
}

/// Write selected eigenvalues to `energies.dat`, one per line, ascending.
pub fn write_eigenvalues<P: AsRef<Path>>(sols: &[Solution], dir: P)
    -> io::Result<()>
{
    let mut out
        = BufWriter::new(File::create(dir.as_ref().join("energies.dat"))?);
    for sol in sols {
        writeln!(out, "{:.10e}", sol.e)?;
    }
    out.flush()
}

/// Write normalized eigenvectors to `wavefuncs.dat` as a table: one row per
/// grid point, first column the coordinate, then one column per eigenstate.
pub fn write_eigenvectors<S, P>(x: &Arr1<S>, sols: &[Solution], dir: P)
    -> io::Result<()>
where
    S: nd::Data<Elem = f64>,
    P: AsRef<Path>,
{
    let mut out
        = BufWriter::new(File::create(dir.as_ref().join("wavefuncs.dat"))?);
    for (i, xk) in x.iter().enumerate() {
        write!(out, "{:.10e}", xk)?;
        for sol in sols {
            write!(out, " {:.10e}", sol.wf[i])?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Write per-eigenstate `(⟨x⟩, Δx)` pairs to `expvalues.dat`.
pub fn write_expectation_values<P: AsRef<Path>>(obs: &[Observable], dir: P)
    -> io::Result<()>
{
    let mut out
        = BufWriter::new(File::create(dir.as_ref().join("expvalues.dat"))?);
    for ob in obs {
        writeln!(out, "{:.10e} {:.10e}", ob.x_mean, ob.x_unc)?;
    }
    out.flush()
}
