#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for automated solution of
//! the one-dimensional, time-independent Schrödinger equation on a uniform
//! coordinate grid, for potentials given as sparse control points.
//!
//! The pipeline runs in five stages:
//! - interpolation of the potential onto the grid ([`interp`]);
//! - discretization of the Hamiltonian as a symmetric tridiagonal matrix
//!   ([`solve::hamiltonian`]);
//! - computation of an index-selected band of its eigenpairs
//!   ([`solve::eigh_tridiagonal`]);
//! - in-place normalization of the eigenvectors under the interior
//!   quadrature rule ([`utils`]);
//! - position expectation values and uncertainties per eigenstate
//!   ([`observe`]).
//!
//! Run configuration comes from a [`config::SimulationConfig`], either
//! constructed directly or parsed from a `schrodinger.inp` file; results are
//! written as plain-text tables by [`io`].
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod config;
pub mod interp;
pub mod solve;
pub mod observe;
pub mod utils;
pub mod io;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
